//! My-reads workflows: reading records, progress entries and goal progress.
//!
//! SYSTEM CONTEXT
//! ==============
//! The my-reads page pages through `GET /readings` with a `Pager`, shows the
//! goal progress card, and lets the user start a reading or log pages read.
//! Logged pages are added to the local entry and the goal card is refreshed
//! from the backend, since only the backend knows how pages map onto the
//! goal period.

#[cfg(test)]
#[path = "reads_test.rs"]
mod reads_test;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::pager::{DEFAULT_PAGE_SIZE, PageSource, Pager};
use super::ui::Notice;
use crate::net::api::{self, ReadingPages};
use crate::net::client::ApiClient;
use crate::net::error::ApiError;
use crate::net::http::HttpTransport;
use crate::net::types::{GoalProgress, NewReading, ProgressEntry, ReadingEntry};

pub const LOAD_READINGS_CONTEXT: &str = "Failed to fetch readings";
pub const NO_GOAL_NOTICE: &str = "Set a goal to track your reading progress";

/// `<input type="date">` value format.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

pub type ReadingPager<T> = Pager<ReadingEntry, ReadingPages<T>>;

/// Pager over `GET /readings`.
pub fn reading_pager<T: HttpTransport>(api: ApiClient<T>) -> ReadingPager<T> {
    Pager::new(ReadingPages(api), DEFAULT_PAGE_SIZE).with_error_context(LOAD_READINGS_CONTEXT)
}

/// Values collected by the "add reading" form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReadingForm {
    pub book_id: Option<i64>,
    /// Title of the picked suggestion, shown in the table until a refetch.
    pub book_title: String,
    pub total_pages: i64,
    pub link: String,
}

impl ReadingForm {
    /// # Errors
    ///
    /// Returns `Validation` when no book is picked or the page count is not
    /// positive.
    pub fn validate(&self) -> Result<NewReading, ApiError> {
        let Some(book_id) = self.book_id else {
            return Err(ApiError::validation("Please select a book!"));
        };
        if self.total_pages <= 0 {
            return Err(ApiError::validation("Total pages must be greater than 0."));
        }
        let link = self.link.trim();
        Ok(NewReading { book_id, total_pages: self.total_pages, link: (!link.is_empty()).then(|| link.to_owned()) })
    }
}

/// Start a reading and append it to the table as not started.
///
/// # Errors
///
/// Returns an error notice on validation or request failure.
pub async fn add_reading<T, S>(
    api: &ApiClient<T>,
    readings: &Pager<ReadingEntry, S>,
    form: &ReadingForm,
) -> Result<(), Notice>
where
    T: HttpTransport,
    S: PageSource<ReadingEntry>,
{
    let request = form.validate().map_err(|err| Notice::error(err.user_message("Failed to add reading")))?;
    let reading = api::create_reading(api, &request)
        .await
        .map_err(|err| Notice::error(err.user_message("Failed to add reading")))?;
    log::debug!("reads: started reading {}", reading.id);
    readings.push_local(ReadingEntry::started(form.book_title.clone(), reading));
    Ok(())
}

/// What the goal card should show after a refresh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GoalProgressView {
    /// New value for the card; `None` keeps whatever it showed before.
    pub progress: Option<GoalProgress>,
    pub notice: Option<Notice>,
}

/// Fetch goal progress. No goal set (404) shows an empty card and a hint.
pub async fn load_goal_progress<T: HttpTransport>(api: &ApiClient<T>) -> GoalProgressView {
    match api::fetch_goal_progress(api).await {
        Ok(progress) => GoalProgressView { progress: Some(progress), notice: None },
        Err(err) if err.is_not_found() => {
            GoalProgressView { progress: Some(GoalProgress::default()), notice: Some(Notice::info(NO_GOAL_NOTICE)) }
        }
        Err(err) => GoalProgressView {
            progress: None,
            notice: Some(Notice::error(err.user_message("Failed to fetch goal progress"))),
        },
    }
}

/// Day a progress entry is logged for, from a date input value. The entry
/// is stamped at midnight UTC of that day.
///
/// # Errors
///
/// Returns an error notice for a missing or malformed date.
pub fn parse_reading_date(raw: &str) -> Result<DateTime<Utc>, Notice> {
    NaiveDate::parse_from_str(raw.trim(), DATE_INPUT_FORMAT)
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| Notice::error("Please select a date!"))
}

/// Record `pages` read on `date`, update the local entry, then refresh the
/// goal card.
///
/// # Errors
///
/// Returns an error notice on validation or request failure; the table is
/// unchanged in that case.
pub async fn add_progress<T, S>(
    api: &ApiClient<T>,
    readings: &Pager<ReadingEntry, S>,
    reading_id: i64,
    pages: i64,
    date: DateTime<Utc>,
) -> Result<GoalProgressView, Notice>
where
    T: HttpTransport,
    S: PageSource<ReadingEntry>,
{
    if pages <= 0 {
        return Err(Notice::error("Pages read must be greater than 0."));
    }
    api::add_progress(api, reading_id, &ProgressEntry { pages, date })
        .await
        .map_err(|err| Notice::error(err.user_message("Failed to add progress")))?;
    readings.update_local(&reading_id, |entry| entry.record_pages(pages));
    Ok(load_goal_progress(api).await)
}
