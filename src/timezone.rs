//! Resolves the current date in the user's timezone.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Get the current UTC offset of the timezone `canonical_timezone`, e.g. "Asia/Kolkata".
///
/// Returns `None` if the timezone name is not recognised.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Get today's date in `canonical_timezone`.
///
/// # Errors
/// Returns [Error::InvalidTimezone] if the timezone name is not recognised.
pub fn today_in(canonical_timezone: &str) -> Result<Date, Error> {
    let offset = get_local_offset(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))?;

    Ok(OffsetDateTime::now_utc().to_offset(offset).date())
}

#[cfg(test)]
mod timezone_tests {
    use crate::Error;

    use super::{get_local_offset, today_in};

    #[test]
    fn utc_has_zero_offset() {
        assert_eq!(get_local_offset("Etc/UTC").map(|offset| offset.is_utc()), Some(true));
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        assert_eq!(
            today_in("Mars/Olympus_Mons"),
            Err(Error::InvalidTimezone("Mars/Olympus_Mons".to_owned()))
        );
    }
}
