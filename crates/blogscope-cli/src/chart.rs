//! Horizontal bar chart rendered with block characters

use blogscope_core::Bucket;

/// 8-level block characters for sub-cell precision
const BLOCKS: &[char] = &[' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

const MIN_BAR_WIDTH: usize = 10;

/// Render one line per bucket: `label │████▌     1.2K`
pub fn render_bar_chart(buckets: &[Bucket], width: usize) -> Vec<String> {
    if buckets.is_empty() {
        return Vec::new();
    }

    let label_width = buckets
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);
    let values: Vec<String> = buckets.iter().map(|b| format_compact(b.total_views)).collect();
    let value_width = values.iter().map(|v| v.len()).max().unwrap_or(0);

    // label + " │" + bar + " " + value
    let bar_width = width
        .saturating_sub(label_width + value_width + 3)
        .max(MIN_BAR_WIDTH);

    let max_value = buckets.iter().map(|b| b.total_views).max().unwrap_or(0).max(1);

    buckets
        .iter()
        .zip(values)
        .map(|(bucket, value)| {
            let bar = bar_cells(bucket.total_views, max_value, bar_width);
            format!(
                "{:>lw$} │{:<bw$} {:>vw$}",
                bucket.label,
                bar,
                value,
                lw = label_width,
                bw = bar_width,
                vw = value_width
            )
        })
        .collect()
}

fn bar_cells(value: u64, max_value: u64, width: usize) -> String {
    let eighths = ((value as f64 / max_value as f64) * (width * 8) as f64).round() as usize;
    let full = eighths / 8;
    let remainder = eighths % 8;

    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat(BLOCKS[8]).take(full));
    if remainder > 0 {
        bar.push(BLOCKS[remainder]);
    }
    bar
}

pub fn format_compact(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

pub fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut result = String::with_capacity(len + len / 3);
    for (i, &b) in bytes.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(b as char);
    }
    result
}
