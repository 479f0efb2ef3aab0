use crate::utils::error::{Result, WatchError};
use chrono::NaiveDate;
use url::Url;

/// 日期格式 dd/mm/yyyy，與報價服務的 query 參數一致
pub const PROVIDER_DATE_FORMAT: &str = "%d/%m/%Y";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(WatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(WatchError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(WatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(WatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(WatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_provider_date(field_name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, PROVIDER_DATE_FORMAT).map_err(|e| {
        WatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Expected a dd/mm/yyyy date: {}", e),
        }
    })
}

pub fn validate_date_window(date_from: &str, date_to: &str) -> Result<()> {
    let from = validate_provider_date("provider.date_from", date_from)?;
    let to = validate_provider_date("provider.date_to", date_to)?;

    if from > to {
        return Err(WatchError::ConfigValidationError {
            field: "provider.date_to".to_string(),
            message: format!("date_to ({}) is before date_from ({})", date_to, date_from),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoint", "https://example.com").is_ok());
        assert!(validate_url("endpoint", "http://example.com").is_ok());
        assert!(validate_url("endpoint", "").is_err());
        assert!(validate_url("endpoint", "invalid-url").is_err());
        assert!(validate_url("endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("tasks_file", "./data/flight-task.csv").is_ok());
        assert!(validate_path("tasks_file", "").is_err());
        assert!(validate_path("tasks_file", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_date_window() {
        assert!(validate_date_window("30/01/2022", "07/02/2022").is_ok());
        assert!(validate_date_window("30/01/2022", "30/01/2022").is_ok());
        assert!(validate_date_window("07/02/2022", "30/01/2022").is_err());
        assert!(validate_date_window("2022-01-30", "07/02/2022").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("provider.fly_from", "CUU").is_ok());
        assert!(validate_non_empty_string("provider.fly_from", "   ").is_err());
    }
}
