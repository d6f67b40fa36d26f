mod chart;
mod config;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use blogscope_core::source::{self, AnalyticsClient, AnalyticsStats};
use blogscope_core::{
    aggregate, AggregationResult, BlogPost, DashboardStats, DateFormatter, Employee, Period,
};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use config::BlogscopeConfig;
use tokio::runtime::Runtime;

const DEFAULT_CHART_WIDTH: usize = 80;

#[derive(Parser)]
#[command(name = "blogscope")]
#[command(author, version, about = "Blog view analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Enable debug logging on stderr")]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Show view counts bucketed by period")]
    Views(ViewsArgs),
    #[command(about = "Show blog, employee and view totals")]
    Dashboard(DashboardArgs),
    #[command(about = "List period selectors")]
    Periods {
        #[arg(long, help = "Label language (en or uz)")]
        locale: Option<String>,
    },
}

#[derive(Args)]
struct ViewsArgs {
    #[arg(short, long, help = "daily, weekly, monthly or yearly")]
    period: Option<Period>,
    #[arg(short, long, help = "Read an analytics payload from a JSON file instead of the API")]
    input: Option<PathBuf>,
    #[arg(long, help = "Analytics API base URL")]
    api_url: Option<String>,
    #[arg(long, help = "Bearer token for the API")]
    token: Option<String>,
    #[arg(long, help = "Label language (en or uz)")]
    locale: Option<String>,
    #[arg(long, help = "Output as JSON")]
    json: bool,
    #[arg(long, help = "Draw a bar chart below the table")]
    chart: bool,
    #[arg(long, default_value_t = DEFAULT_CHART_WIDTH, help = "Chart width in columns")]
    width: usize,
    #[arg(long, help = "Show processing time")]
    benchmark: bool,
}

#[derive(Args)]
struct DashboardArgs {
    #[arg(long, requires = "employees", help = "Blog list payload (JSON file)")]
    blogs: Option<PathBuf>,
    #[arg(long, requires = "blogs", help = "Employee list payload (JSON file)")]
    employees: Option<PathBuf>,
    #[arg(long, help = "Analytics API base URL")]
    api_url: Option<String>,
    #[arg(long, help = "Bearer token for the API")]
    token: Option<String>,
    #[arg(long, help = "Output as JSON")]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::Views(args) => run_views_command(args),
        Commands::Dashboard(args) => run_dashboard_command(args),
        Commands::Periods { locale } => run_periods_command(locale),
    }
}

fn init_tracing(debug: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if debug {
        Some(EnvFilter::new("debug"))
    } else {
        std::env::var("BLOGSCOPE_LOG").ok().map(EnvFilter::new)
    };

    if let Some(filter) = filter {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run_views_command(args: ViewsArgs) -> Result<()> {
    let config = BlogscopeConfig::load();
    let period = config.period(args.period)?;
    let locale = config.locale(args.locale)?;
    let fmt = locale.formatter();

    let start = Instant::now();
    let stats = match &args.input {
        Some(path) => source::load_analytics(path)
            .with_context(|| format!("Failed to load analytics from {}", path.display()))?,
        None => {
            let client =
                AnalyticsClient::new(config.api_url(args.api_url), config.token(args.token));
            fetch_analytics(&client, period)?
        }
    };

    let samples = stats.samples()?;
    let result = aggregate(&samples, period, fmt)?;
    warn_on_total_mismatch(&stats, result.grand_total);
    let processing_time_ms = start.elapsed().as_millis();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_views_table(&result, fmt);

    if args.chart && !result.is_empty() {
        println!();
        for line in chart::render_bar_chart(&result.buckets, args.width) {
            println!("{}", line.blue());
        }
    }

    if args.benchmark {
        println!(
            "{}",
            format!("  Processing time: {}ms", processing_time_ms).bright_black()
        );
    }

    Ok(())
}

fn fetch_analytics(client: &AnalyticsClient, period: Period) -> Result<AnalyticsStats> {
    let rt = Runtime::new()?;
    rt.block_on(client.fetch_analytics(period))
        .with_context(|| format!("Failed to fetch analytics from {}", client.base_url()))
}

// The backend reports its own total; ours is recomputed from the samples
fn warn_on_total_mismatch(stats: &AnalyticsStats, computed: u64) {
    if stats.total_views != 0 && stats.total_views != computed {
        tracing::warn!(
            reported = stats.total_views,
            computed,
            "backend totalViews differs from the sum of daily views"
        );
    }
}

fn print_views_table(result: &AggregationResult, fmt: &dyn DateFormatter) {
    use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

    let period_name = fmt.period_name(result.period);

    if result.is_empty() {
        println!("{}", "No views recorded for this period".bright_black());
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Label", "Detail", "Views"]);

        for bucket in &result.buckets {
            table.add_row(vec![
                Cell::new(&bucket.label),
                Cell::new(bucket.detail()),
                Cell::new(chart::format_with_commas(bucket.total_views))
                    .set_alignment(CellAlignment::Right),
            ]);
        }

        println!("{table}");
    }

    println!(
        "\nTotal ({}): {}",
        period_name.to_lowercase(),
        chart::format_with_commas(result.grand_total).bold()
    );
}

fn run_dashboard_command(args: DashboardArgs) -> Result<()> {
    let (blogs, employees) = match (&args.blogs, &args.employees) {
        (Some(blogs_path), Some(employees_path)) => {
            let blogs = source::load_blogs(blogs_path)
                .with_context(|| format!("Failed to load blogs from {}", blogs_path.display()))?;
            let employees = source::load_employees(employees_path).with_context(|| {
                format!("Failed to load employees from {}", employees_path.display())
            })?;
            (blogs, employees)
        }
        _ => {
            let config = BlogscopeConfig::load();
            let client =
                AnalyticsClient::new(config.api_url(args.api_url), config.token(args.token));
            fetch_dashboard_records(&client)?
        }
    };

    let stats = DashboardStats::from_records(&blogs, &employees);

    if args.json {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct DashboardJson {
            #[serde(flatten)]
            stats: DashboardStats,
            top_slices: Vec<blogscope_core::ViewSlice>,
        }

        let output = DashboardJson {
            top_slices: stats.top_slices(),
            stats,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_dashboard(&stats);
    Ok(())
}

fn fetch_dashboard_records(client: &AnalyticsClient) -> Result<(Vec<BlogPost>, Vec<Employee>)> {
    let rt = Runtime::new()?;
    let (blogs, employees) =
        rt.block_on(async { tokio::join!(client.fetch_blogs(), client.fetch_employees()) });
    let blogs = blogs.with_context(|| format!("Failed to fetch blogs from {}", client.base_url()))?;
    let employees = employees
        .with_context(|| format!("Failed to fetch employees from {}", client.base_url()))?;
    Ok((blogs, employees))
}

fn print_dashboard(stats: &DashboardStats) {
    use comfy_table::{ContentArrangement, Table};

    let mut summary = Table::new();
    summary.set_content_arrangement(ContentArrangement::Dynamic);
    summary.set_header(vec!["Metric", "Value"]);
    summary.add_row(vec!["Blogs".to_string(), stats.total_blogs.to_string()]);
    summary.add_row(vec!["Employees".to_string(), stats.total_employees.to_string()]);
    summary.add_row(vec![
        "Total views".to_string(),
        chart::format_with_commas(stats.total_views),
    ]);
    println!("{summary}");

    println!("\n{}", "Recent posts".bold());
    if stats.recent_blogs.is_empty() {
        println!("{}", "No posts yet".bright_black());
        return;
    }

    let mut recent = Table::new();
    recent.set_content_arrangement(ContentArrangement::Dynamic);
    recent.set_header(vec!["Title", "Created", "Views"]);
    for blog in &stats.recent_blogs {
        recent.add_row(vec![
            blog.title.clone(),
            format_created(blog.created_at.as_deref()),
            chart::format_with_commas(blog.views),
        ]);
    }
    println!("{recent}");
}

fn format_created(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => source::parse_sample_date(raw)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| raw.to_string()),
        None => "-".to_string(),
    }
}

fn run_periods_command(locale: Option<String>) -> Result<()> {
    let locale = BlogscopeConfig::load().locale(locale)?;
    let fmt = locale.formatter();

    for period in Period::all() {
        println!("{:<8} {}", period.as_str(), fmt.period_name(*period));
    }
    Ok(())
}
