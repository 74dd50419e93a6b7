//! Helpers for working with the configured local timezone.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Get the current UTC offset for a canonical timezone name, e.g. "Asia/Jakarta".
///
/// Returns `None` if `canonical_timezone` is not a known timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Get today's date in the timezone `canonical_timezone`.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `canonical_timezone` is not a
/// valid, canonical timezone name.
pub fn get_local_date(canonical_timezone: &str) -> Result<Date, Error> {
    let local_offset = get_local_offset(canonical_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", canonical_timezone);
        Error::InvalidTimezoneError(canonical_timezone.to_owned())
    })?;

    Ok(OffsetDateTime::now_utc().to_offset(local_offset).date())
}

#[cfg(test)]
mod tests {
    use time::{OffsetDateTime, UtcOffset};

    use crate::Error;

    use super::{get_local_date, get_local_offset};

    #[test]
    fn jakarta_is_seven_hours_ahead_of_utc() {
        let offset = get_local_offset("Asia/Jakarta").expect("Asia/Jakarta should be valid");

        assert_eq!(offset, UtcOffset::from_hms(7, 0, 0).unwrap());
    }

    #[test]
    fn unknown_timezone_has_no_offset() {
        assert_eq!(get_local_offset("Mars/Olympus_Mons"), None);
    }

    #[test]
    fn local_date_in_utc_matches_utc_date() {
        let want = OffsetDateTime::now_utc().date();

        let got = get_local_date("Etc/UTC").unwrap();

        // Allow for the test running across midnight.
        assert!(got == want || got == want.next_day().unwrap());
    }

    #[test]
    fn local_date_fails_on_invalid_timezone() {
        let result = get_local_date("Not/A_Timezone");

        assert_eq!(
            result,
            Err(Error::InvalidTimezoneError("Not/A_Timezone".to_owned()))
        );
    }
}
