//! Publication date formatting
//!
//! Every date shown on the site goes through [`normalize_date`], which
//! produces `DD mon YYYY` (`25 mar 2021`) whatever the locale.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error::ContentError;

/// Month names and connector word of a date locale
#[derive(Debug)]
pub struct DateLocale {
    /// BCP 47 language tag, e.g. `pt-BR`
    pub language: &'static str,
    /// Abbreviated month names, January first, as the locale writes them
    months: [&'static str; 12],
    /// Word joining day, month and year in the long form (`de` in Portuguese)
    connector: Option<&'static str>,
}

pub static PT_BR: DateLocale = DateLocale {
    language: "pt-BR",
    months: [
        "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.",
        "dez.",
    ],
    connector: Some("de"),
};

pub static EN_GB: DateLocale = DateLocale {
    language: "en-GB",
    months: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    connector: None,
};

static LOCALES: [&DateLocale; 2] = [&PT_BR, &EN_GB];

impl DateLocale {
    /// Look up a locale by language tag (case-insensitive, `_` or `-`)
    pub fn for_language(language: &str) -> Option<&'static DateLocale> {
        let wanted = language.replace('_', "-");
        LOCALES
            .iter()
            .copied()
            .find(|locale| locale.language.eq_ignore_ascii_case(&wanted))
    }

    /// Long form as the locale prints it: `25 de mar. de 2021`
    fn long_form<Tz: TimeZone>(&self, date: &DateTime<Tz>) -> String {
        let month = self.months[date.month0() as usize];
        match self.connector {
            Some(connector) => format!(
                "{:02} {} {} {} {:04}",
                date.day(),
                connector,
                month,
                connector,
                date.year()
            ),
            None => format!("{:02} {} {:04}", date.day(), month, date.year()),
        }
    }

    /// Drop connector words and trailing periods, collapse whitespace, lowercase
    fn compact(&self, long_form: &str) -> String {
        long_form
            .split_whitespace()
            .filter(|token| Some(*token) != self.connector)
            .map(|token| token.trim_end_matches('.'))
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

/// ISO 8601 with an offset, fractional seconds optional, `+hh`, `+hhmm` or `+hh:mm`
const OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%#z";

/// ISO 8601 without an offset, read as UTC
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a CMS timestamp
///
/// Accepts RFC 3339, the `+0000` offset form Prismic emits
/// (`2021-03-25T19:25:28+0000`) and the other usual ISO 8601 shapes. A
/// timestamp without an offset, or a bare date, is taken as UTC.
///
/// On failure the error of the offset form is returned.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Ok(date);
    }
    let err = match DateTime::parse_from_str(raw, OFFSET_FORMAT) {
        Ok(date) => return Ok(date),
        Err(err) => err,
    };

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or(err)
}

/// Format a date as `DD mon YYYY` in the given locale
pub fn display_date<Tz: TimeZone>(date: &DateTime<Tz>, locale: &DateLocale) -> String {
    locale.compact(&locale.long_form(date))
}

/// Turn an optional CMS timestamp into the display date
///
/// # Examples
/// ```ignore
/// normalize_date(Some("2021-03-25T00:00:00+0000"), &PT_BR, &Tz::UTC) // -> Ok(Some("25 mar 2021"))
/// ```
pub fn normalize_date(
    raw: Option<&str>,
    locale: &DateLocale,
    tz: &Tz,
) -> Result<Option<String>, ContentError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let parsed = parse_timestamp(raw).map_err(|source| ContentError::InvalidDate {
        value: raw.to_string(),
        source,
    })?;

    Ok(Some(display_date(&parsed.with_timezone(tz), locale)))
}
