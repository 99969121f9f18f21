//! The range of whole months covered by an analytics request.

use time::{Date, Month};

use crate::validation::ValidationError;

/// The number of months summarised when the client does not ask for a number.
pub const DEFAULT_MONTHS: u32 = 6;

/// An inclusive date range that starts on the first day of a month and ends
/// on the last day of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: Date,
    pub end: Date,
}

/// The window of `months` whole months ending with the month containing `anchor`.
///
/// A window of one month covers only the anchor's month.
///
/// # Errors
///
/// Returns [ValidationError::InvalidMonths] if `months` is zero or reaches
/// further back than the calendar supports.
pub fn month_window(anchor: Date, months: u32) -> Result<MonthWindow, ValidationError> {
    let invalid_months = || ValidationError::InvalidMonths(months.to_string());

    if months == 0 {
        return Err(invalid_months());
    }

    let anchor_index = i64::from(anchor.year()) * 12 + i64::from(u8::from(anchor.month())) - 1;
    let start_index = anchor_index - i64::from(months - 1);
    let start_year = i32::try_from(start_index.div_euclid(12)).map_err(|_| invalid_months())?;
    let start_month = u8::try_from(start_index.rem_euclid(12) + 1)
        .ok()
        .and_then(|month| Month::try_from(month).ok())
        .ok_or_else(invalid_months)?;

    let start =
        Date::from_calendar_date(start_year, start_month, 1).map_err(|_| invalid_months())?;
    let end = Date::from_calendar_date(
        anchor.year(),
        anchor.month(),
        last_day_of_month(anchor.year(), anchor.month()),
    )
    .map_err(|_| invalid_months())?;

    Ok(MonthWindow { start, end })
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
