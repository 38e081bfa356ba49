/// Utilities for date and time formatting
///
/// Converts between stored datetimes, `<input type="datetime-local">` values
/// and the read-only table display
use chrono::NaiveDateTime;

/// Value format of `<input type="datetime-local" step="1">`
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// Browsers drop seconds when they are zero
const INPUT_FORMAT_SHORT: &str = "%Y-%m-%dT%H:%M";

/// Format a datetime for a datetime-local input
/// Example: 2024-03-15 14:02:26 -> "2024-03-15T14:02:26"
pub fn to_datetime_local(value: &NaiveDateTime) -> String {
    value.format(INPUT_FORMAT).to_string()
}

/// Parse a datetime-local input value, with or without seconds.
/// Returns `None` for an empty or partial value.
pub fn parse_datetime_local(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(value, INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, INPUT_FORMAT_SHORT))
        .ok()
}

/// Format datetime to DD.MM.YYYY HH:MM:SS format
/// Example: 2024-03-15 14:02:26 -> "15.03.2024 14:02:26"
pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format("%d.%m.%Y %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 2, 26)
            .unwrap()
    }

    #[test]
    fn test_to_datetime_local() {
        assert_eq!(to_datetime_local(&sample()), "2024-03-15T14:02:26");
    }

    #[test]
    fn test_parse_datetime_local() {
        assert_eq!(parse_datetime_local("2024-03-15T14:02:26"), Some(sample()));
        assert_eq!(
            parse_datetime_local("2024-03-15T14:02"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(14, 2, 0)
        );
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(parse_datetime_local(""), None);
        assert_eq!(parse_datetime_local("2024-03-15"), None);
        assert_eq!(parse_datetime_local("invalid"), None);
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime(&sample()), "15.03.2024 14:02:26");
    }
}
