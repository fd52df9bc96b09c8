use std::path::PathBuf;
use chrono::{DateTime, Utc};
use super::ValueParser;

#[derive(Clone, Debug)]
pub struct StringParser { }

impl ValueParser<String> for self::StringParser {
    fn parse(&self, value: &str) -> Result<String, String> {
        Ok(value.to_owned())
    }
}

pub const STRING: StringParser = StringParser {};

#[derive(Clone, Debug)]
pub struct BoolParser { }

impl ValueParser<bool> for self::BoolParser {
    fn parse(&self, value: &str) -> Result<bool, String> {
        value.parse::<bool>()
            .map_err(|_| format!("invalid boolean value: {value}"))
    }
}

pub const BOOL: BoolParser = BoolParser {};

/// Empty values parse to `None`.
#[derive(Clone, Debug)]
pub struct OptFilePathParser { }

impl ValueParser<Option<PathBuf>> for self::OptFilePathParser {
    fn parse(&self, value: &str) -> Result<Option<PathBuf>, String> {
        if value.trim().is_empty() {
            return Ok(None)
        }
        Ok(Some(PathBuf::from(shellexpand::tilde(value).into_owned())))
    }
}

pub const OPT_FILE_PATH: OptFilePathParser = OptFilePathParser {};

#[derive(Clone, Debug)]
pub struct WebPortParser { }

impl ValueParser<u16> for self::WebPortParser {
    fn parse(&self, value: &str) -> Result<u16, String> {
        value.parse::<u16>()
            .map_err(|_| format!("invalid port number: {value}"))
    }
}

pub const WEB_PORT: WebPortParser = WebPortParser {};

/// RFC 3339 instant; empty values parse to `None`.
#[derive(Clone, Debug)]
pub struct OptDateTimeParser { }

impl ValueParser<Option<DateTime<Utc>>> for self::OptDateTimeParser {
    fn parse(&self, value: &str) -> Result<Option<DateTime<Utc>>, String> {
        if value.trim().is_empty() {
            return Ok(None)
        }
        DateTime::parse_from_rfc3339(value.trim())
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| format!("invalid RFC 3339 time ({value}): {e}"))
    }
}

pub const OPT_DATE_TIME: OptDateTimeParser = OptDateTimeParser {};
