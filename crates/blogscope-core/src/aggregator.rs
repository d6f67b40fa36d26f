//! Period aggregation of daily view samples
//!
//! Turns a chronological series of daily view counts into labeled chart
//! buckets. Every call is a pure transform over its input.

use crate::error::AggregateError;
use crate::locale::DateFormatter;
use crate::{AggregationResult, Bucket, DailySample, Period};
use chrono::Datelike;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Samples per weekly bucket. Weeks are positional chunks, not calendar weeks.
pub const WEEK_LEN: usize = 7;

/// Aggregate daily samples into buckets for the given period
pub fn aggregate(
    samples: &[DailySample],
    period: Period,
    fmt: &dyn DateFormatter,
) -> Result<AggregationResult, AggregateError> {
    check_unique_dates(samples)?;

    if samples.is_empty() {
        return Ok(AggregationResult::empty(period));
    }

    let grand_total = grand_total(samples);

    let buckets = match period {
        Period::Daily => bucket_daily(samples, fmt),
        Period::Weekly => bucket_weekly(samples, fmt),
        Period::Monthly => bucket_monthly(samples, fmt),
        Period::Yearly => bucket_yearly(samples, fmt),
    };

    debug!(
        period = period.as_str(),
        samples = samples.len(),
        buckets = buckets.len(),
        grand_total,
        "aggregated view samples"
    );

    Ok(AggregationResult {
        period,
        buckets,
        grand_total,
    })
}

/// Aggregate the same series under every period
pub fn aggregate_all(
    samples: &[DailySample],
    fmt: &dyn DateFormatter,
) -> Result<Vec<AggregationResult>, AggregateError> {
    Period::all()
        .iter()
        .map(|&period| aggregate(samples, period, fmt))
        .collect()
}

/// Sum of all sample views, independent of any bucketing
pub fn grand_total(samples: &[DailySample]) -> u64 {
    samples
        .iter()
        .fold(0u64, |acc, s| acc.saturating_add(s.views))
}

// =============================================================================
// Internal helpers
// =============================================================================

fn check_unique_dates(samples: &[DailySample]) -> Result<(), AggregateError> {
    let mut seen = HashSet::with_capacity(samples.len());
    for sample in samples {
        if !seen.insert(sample.date) {
            return Err(AggregateError::DuplicateDate(sample.date));
        }
    }
    Ok(())
}

fn bucket_daily(samples: &[DailySample], fmt: &dyn DateFormatter) -> Vec<Bucket> {
    samples
        .iter()
        .map(|s| {
            let short = fmt.short_date(s.date);
            Bucket {
                label: format!("{}, {}", fmt.weekday(s.date), short),
                detail_label: Some(s.display_date.clone().unwrap_or(short)),
                total_views: s.views,
                sample_count: 1,
            }
        })
        .collect()
}

fn bucket_weekly(samples: &[DailySample], fmt: &dyn DateFormatter) -> Vec<Bucket> {
    let mut weeks = Vec::with_capacity(samples.len().div_ceil(WEEK_LEN));

    for (i, chunk) in samples.chunks(WEEK_LEN).enumerate() {
        let (Some(first), Some(last)) = (chunk.first(), chunk.last()) else {
            continue;
        };

        weeks.push(Bucket {
            label: fmt.week_label(i + 1),
            detail_label: Some(format!(
                "{} - {}",
                fmt.short_date(first.date),
                fmt.short_date(last.date)
            )),
            total_views: grand_total(chunk),
            sample_count: chunk.len(),
        });
    }

    weeks
}

/// Buckets come out in first-appearance order of each year-month
fn bucket_monthly(samples: &[DailySample], fmt: &dyn DateFormatter) -> Vec<Bucket> {
    let mut index: HashMap<(i32, u32), usize> = HashMap::with_capacity(16);
    let mut months: Vec<Bucket> = Vec::new();

    for s in samples {
        let key = (s.date.year(), s.date.month());
        let slot = *index.entry(key).or_insert_with(|| {
            months.push(Bucket {
                label: fmt.month_year(s.date),
                detail_label: None,
                total_views: 0,
                sample_count: 0,
            });
            months.len() - 1
        });

        let bucket = &mut months[slot];
        bucket.total_views = bucket.total_views.saturating_add(s.views);
        bucket.sample_count += 1;
    }

    months
}

/// Buckets come out in ascending year order, whatever the input order
fn bucket_yearly(samples: &[DailySample], fmt: &dyn DateFormatter) -> Vec<Bucket> {
    let mut years: BTreeMap<i32, YearAccumulator> = BTreeMap::new();

    for s in samples {
        let entry = years.entry(s.date.year()).or_default();
        entry.views = entry.views.saturating_add(s.views);
        entry.samples += 1;
    }

    years
        .into_iter()
        .map(|(year, acc)| Bucket {
            label: fmt.year_label(year),
            detail_label: None,
            total_views: acc.views,
            sample_count: acc.samples,
        })
        .collect()
}

#[derive(Default)]
struct YearAccumulator {
    views: u64,
    samples: usize,
}
