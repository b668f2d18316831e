use chrono::{DateTime, FixedOffset, Locale, Utc};

use crate::error::{FetchError, FetchResult};

pub const DEFAULT_DATE_FORMAT: &str = "%d %b %Y";
pub const DEFAULT_LOCALE: &str = "pt_BR";

#[derive(Clone, Debug)]
pub struct DateFormatter {
    format: String,
    locale: Locale,
}

impl Default for DateFormatter {
    fn default() -> Self {
        DateFormatter {
            format: DEFAULT_DATE_FORMAT.to_string(),
            locale: Locale::pt_BR,
        }
    }
}

impl DateFormatter {
    pub fn new(format: &str, locale: &str) -> Result<Self, String> {
        let locale = Locale::try_from(locale)
            .map_err(|_| format!("Unknown locale {}", locale))?;
        Ok(DateFormatter {
            format: format.to_string(),
            locale,
        })
    }

    /// Formats a publication timestamp in UTC. A missing date renders empty.
    pub fn format(&self, timestamp: Option<&str>) -> FetchResult<String> {
        let Some(timestamp) = timestamp else {
            return Ok(String::new());
        };
        let date_time = parse_timestamp(timestamp)?;
        let rendered = date_time
            .with_timezone(&Utc)
            .format_localized(&self.format, self.locale)
            .to_string();
        Ok(rendered)
    }
}

// The content API emits `+0000` offsets, which RFC 3339 does not accept
fn parse_timestamp(buf: &str) -> FetchResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(buf)
        .or_else(|_| DateTime::parse_from_str(buf, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(buf, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map_err(|_| FetchError::Date(buf.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pt_br() {
        let fmt = DateFormatter::default();
        assert_eq!(fmt.format(Some("2021-03-25T00:00:00Z")).unwrap(), "25 mar 2021");
        assert_eq!(fmt.format(Some("2021-03-15T19:25:28+0000")).unwrap(), "15 mar 2021");
        assert_eq!(fmt.format(Some("2020-12-01T08:00:00.000+0000")).unwrap(), "01 dez 2020");
    }

    #[test]
    fn test_format_is_deterministic() {
        let fmt = DateFormatter::new(DEFAULT_DATE_FORMAT, DEFAULT_LOCALE).unwrap();
        let first = fmt.format(Some("2021-03-25T00:00:00Z")).unwrap();
        let second = fmt.format(Some("2021-03-25T00:00:00Z")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_offset_is_converted_to_utc() {
        let fmt = DateFormatter::default();
        assert_eq!(fmt.format(Some("2021-03-24T23:00:00-03:00")).unwrap(), "25 mar 2021");
    }

    #[test]
    fn test_null_date() {
        let fmt = DateFormatter::default();
        assert_eq!(fmt.format(None).unwrap(), "");
    }

    #[test]
    fn test_invalid_date() {
        let fmt = DateFormatter::default();
        match fmt.format(Some("25/03/2021")) {
            Err(FetchError::Date(s)) => assert_eq!(s, "25/03/2021"),
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_other_locale() {
        let fmt = DateFormatter::new("%Y-%m-%d", "en_US").unwrap();
        assert_eq!(fmt.format(Some("2021-03-25T00:00:00Z")).unwrap(), "2021-03-25");
        assert!(DateFormatter::new(DEFAULT_DATE_FORMAT, "xx_YY").is_err());
    }
}
