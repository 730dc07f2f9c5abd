use crate::error::{AuthRelayError, Result};
use chrono::{DateTime, TimeZone};
use reqwest::multipart::Form;
use serde_json::Value;
use std::fmt::Display;

/// `YYYY-MM-DD`
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM-DD HH:MM:SS`
pub fn format_datetime<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// True for empty strings and strings made only of whitespace
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Serialize a flat JSON object into multipart form fields.
///
/// Strings are sent verbatim, `null` fields are skipped and everything
/// else is sent as its JSON text.
pub fn to_multipart_form(fields: &Value) -> Result<Form> {
    let object = fields.as_object().ok_or_else(|| {
        AuthRelayError::Other("form payload must be a JSON object".to_string())
    })?;

    let mut form = Form::new();
    for (name, value) in object {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        form = form.text(name.clone(), text);
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn formats_dates() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(format_date(&date), "2024-03-07");
        assert_eq!(format_datetime(&date), "2024-03-07 09:05:01");
    }

    #[test]
    fn blank_check() {
        assert!(is_blank(""));
        assert!(is_blank("  \t\n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn form_requires_object() {
        assert!(to_multipart_form(&json!(["a"])).is_err());
        assert!(to_multipart_form(&json!({"a": 1, "b": null, "c": "x"})).is_ok());
    }
}
