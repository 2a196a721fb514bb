//! Lenient date parsing for uploaded cells.
//!
//! Values that cannot be interpreted as a date become `None` instead of an
//! error so a single bad cell does not abort loading the whole file.

use time::{
    Date, Duration,
    format_description::BorrowedFormatItem,
    macros::{date, format_description},
};

const ISO_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month padding:none]-[day padding:none]");
const SLASH_YEAR_FIRST_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]/[month padding:none]/[day padding:none]");
const SLASH_MONTH_FIRST_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month padding:none]/[day padding:none]/[year]");

const DATE_FORMATS: [&[BorrowedFormatItem]; 3] = [
    ISO_FORMAT,
    SLASH_YEAR_FIRST_FORMAT,
    SLASH_MONTH_FIRST_FORMAT,
];

/// Day zero for Excel serial dates after the 1900 leap year bug.
const EXCEL_EPOCH: Date = date!(1899 - 12 - 30);
/// Day zero for Excel serial dates before 1 March 1900.
const EXCEL_EARLY_EPOCH: Date = date!(1899 - 12 - 31);
/// Excel's serial for 29 February 1900, a day that never existed.
const EXCEL_PHANTOM_LEAP_DAY: i64 = 60;
/// The serial for 9999-12-31, the last date Excel can represent.
const EXCEL_MAX_SERIAL: f64 = 2_958_465.0;

/// Parse `text` as a calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and month-first `MM/DD/YYYY`, with an
/// optional time part after a `T` or a space which is ignored.
pub(super) fn parse_date_text(text: &str) -> Option<Date> {
    let text = text.trim();
    let date_part = text
        .split(['T', ' '])
        .next()
        .filter(|part| !part.is_empty())?;

    DATE_FORMATS
        .iter()
        .find_map(|format| Date::parse(date_part, format).ok())
}

/// Convert an Excel serial date (days since 1900-01-00) to a calendar date.
///
/// The fractional part holds the time of day and is ignored.
pub(super) fn date_from_excel_serial(serial: f64) -> Option<Date> {
    if !serial.is_finite() || !(1.0..EXCEL_MAX_SERIAL + 1.0).contains(&serial) {
        return None;
    }

    let days = serial.floor() as i64;

    match days {
        EXCEL_PHANTOM_LEAP_DAY => None,
        days if days < EXCEL_PHANTOM_LEAP_DAY => {
            EXCEL_EARLY_EPOCH.checked_add(Duration::days(days))
        }
        days => EXCEL_EPOCH.checked_add(Duration::days(days)),
    }
}
