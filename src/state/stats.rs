//! Reading statistics by month of a year or by day of a month.
//!
//! DESIGN
//! ======
//! The backend only reports periods with recorded pages. `load_stats` fills
//! the gaps so the chart always has one bucket per month (12) or per day of
//! the month, labelled `"1"`, `"2"`, ... in order.

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;

use chrono::{Datelike, NaiveDate};

use super::ui::Notice;
use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::http::HttpTransport;
use crate::net::types::{StatPoint, Stats};

pub const MONTHS_PER_YEAR: u32 = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatsPeriod {
    Monthly { year: i32 },
    Daily { year: i32, month: u32 },
}

impl StatsPeriod {
    /// Number of buckets in this period, or `None` for an invalid month.
    pub fn buckets(self) -> Option<u32> {
        match self {
            Self::Monthly { .. } => Some(MONTHS_PER_YEAR),
            Self::Daily { year, month } => days_in_month(year, month),
        }
    }
}

/// Days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    Some(NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?.day())
}

/// One point per bucket `1..=buckets`, taking pages from `points` where the
/// backend reported them and 0 elsewhere.
pub fn fill_buckets(points: &[StatPoint], buckets: u32) -> Vec<StatPoint> {
    (1..=buckets)
        .map(|bucket| {
            let date = bucket.to_string();
            let pages = points.iter().find(|p| p.date == date).map_or(0, |p| p.pages);
            StatPoint { date, pages }
        })
        .collect()
}

/// Largest bucket value, used to scale the chart axis.
pub fn peak_pages(stats: &Stats) -> i64 {
    stats.progress.iter().map(|p| p.pages).max().unwrap_or(0).max(stats.goal)
}

/// Fetch and zero-fill statistics for `period`.
///
/// # Errors
///
/// Returns an error notice for an invalid month (no request is sent) or a
/// failed request.
pub async fn load_stats<T: HttpTransport>(api: &ApiClient<T>, period: StatsPeriod) -> Result<Stats, Notice> {
    let Some(buckets) = period.buckets() else {
        return Err(Notice::error("Please select a valid month."));
    };
    let fetched = match period {
        StatsPeriod::Monthly { year } => api::fetch_monthly_stats(api, year).await,
        StatsPeriod::Daily { year, month } => api::fetch_daily_stats(api, year, month).await,
    };
    let stats = fetched.map_err(|err| Notice::error(err.user_message("Failed to fetch stats")))?;
    log::debug!("stats: {period:?} returned {} points", stats.progress.len());
    Ok(Stats { progress: fill_buckets(&stats.progress, buckets), goal: stats.goal })
}
