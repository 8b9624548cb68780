use chrono::{Datelike, Local, Months, NaiveDate};

/// Parses the calendar date of an upstream period string.
///
/// Upstream dates come as `YYYY-MM-DD`, optionally followed by a space-separated
/// time of day (`2025-03-31 00:00:00`) or as ISO timestamps (`2025-03-31T00:00:00Z`).
/// Only the date part is considered. Returns `None` when it is not a valid date.
pub fn parse_period_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.split(' ').next().unwrap_or(trimmed);
    let date_part = date_part.split('T').next().unwrap_or(date_part);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Shifts a date back by whole months, clamping the day to the target month length.
pub fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// Last day of the month that precedes `date + months`.
///
/// This is the inclusive upper bound of the display window: moving forward by
/// `months` and stepping back to the previous month end.
pub fn month_end_before(date: NaiveDate, months: u32) -> NaiveDate {
    let shifted = date
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX);
    first_of_month(shifted).pred_opt().unwrap_or(shifted)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Today's date in the server's local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `dd/mm/yyyy`
pub fn format_day_month_year(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `Mar 2025`
pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}
