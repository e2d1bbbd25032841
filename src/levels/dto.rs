use serde::Deserialize;
use serde_json::Value;
use time::{format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime};

use crate::validation::FieldErrors;

/// Request body for logging a level. Both fields are kept as raw JSON so
/// type mismatches become field errors.
#[derive(Debug, Default, Deserialize)]
pub struct CreateLevelRequest {
    pub value: Option<Value>,
    pub date: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLevel {
    pub value: f64,
    pub date: OffsetDateTime,
}

impl CreateLevelRequest {
    pub fn validate(self) -> Result<NewLevel, FieldErrors> {
        let mut errors = FieldErrors::new();

        let value = match self.value {
            None | Some(Value::Null) => {
                errors.required("value");
                None
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                errors.required("value");
                None
            }
            Some(raw) => {
                let parsed = cast_number(&raw);
                if parsed.is_none() {
                    errors.cast("value", "Number");
                }
                parsed
            }
        };

        let date = match self.date {
            None | Some(Value::Null) => {
                errors.required("date");
                None
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                errors.required("date");
                None
            }
            Some(raw) => {
                let parsed = cast_date(&raw);
                if parsed.is_none() {
                    errors.cast("date", "Date");
                }
                parsed
            }
        };

        match (value, date) {
            (Some(value), Some(date)) => errors.into_result(NewLevel { value, date }),
            _ => Err(errors),
        }
    }
}

/// Numbers pass through; numeric strings are parsed.
fn cast_number(raw: &Value) -> Option<f64> {
    let n = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// RFC 3339 timestamps, bare `YYYY-MM-DD` dates (midnight UTC) or epoch
/// milliseconds. Years outside 0..=9999 are rejected so the value can be
/// rendered back as RFC 3339.
fn cast_date(raw: &Value) -> Option<OffsetDateTime> {
    let date = match raw {
        Value::String(s) => {
            let s = s.trim();
            OffsetDateTime::parse(s, &Rfc3339).ok().or_else(|| {
                Date::parse(s, format_description!("[year]-[month]-[day]"))
                    .ok()
                    .map(|d| d.midnight().assume_utc())
            })
        }
        Value::Number(n) => {
            let ms = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok()
        }
        _ => None,
    }?;
    (0..=9999).contains(&date.year()).then_some(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldErrorKind;
    use serde_json::json;
    use time::macros::datetime;

    fn request(body: Value) -> CreateLevelRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn accepts_number_and_rfc3339() {
        let level = request(json!({ "value": 7, "date": "2024-03-01T08:30:00Z" }))
            .validate()
            .unwrap();
        assert_eq!(level.value, 7.0);
        assert_eq!(level.date, datetime!(2024-03-01 08:30:00 UTC));
    }

    #[test]
    fn coerces_numeric_string_and_plain_date() {
        let level = request(json!({ "value": " 3.5 ", "date": "2024-03-01" }))
            .validate()
            .unwrap();
        assert_eq!(level.value, 3.5);
        assert_eq!(level.date, datetime!(2024-03-01 00:00:00 UTC));
    }

    #[test]
    fn accepts_epoch_millis() {
        let level = request(json!({ "value": 1, "date": 1_700_000_000_000i64 }))
            .validate()
            .unwrap();
        assert_eq!(level.date, datetime!(2023-11-14 22:13:20 UTC));
    }

    #[test]
    fn missing_fields_are_required() {
        let errors = CreateLevelRequest::default().validate().unwrap_err();
        assert_eq!(errors.get("value").unwrap().kind, FieldErrorKind::Required);
        assert_eq!(errors.get("date").unwrap().kind, FieldErrorKind::Required);

        let errors = request(json!({ "value": null, "date": "" }))
            .validate()
            .unwrap_err();
        assert_eq!(errors.get("value").unwrap().kind, FieldErrorKind::Required);
        assert_eq!(errors.get("date").unwrap().kind, FieldErrorKind::Required);
    }

    #[test]
    fn wrong_types_are_cast_errors() {
        let errors = request(json!({ "value": "high", "date": "yesterday" }))
            .validate()
            .unwrap_err();
        assert_eq!(errors.get("value").unwrap().kind, FieldErrorKind::Cast);
        assert_eq!(errors.get("date").unwrap().kind, FieldErrorKind::Cast);

        let errors = request(json!({ "value": [1], "date": true }))
            .validate()
            .unwrap_err();
        assert_eq!(errors.get("value").unwrap().kind, FieldErrorKind::Cast);
        assert_eq!(errors.get("date").unwrap().kind, FieldErrorKind::Cast);
    }

    #[test]
    fn only_the_bad_field_is_reported() {
        let errors = request(json!({ "value": 4, "date": "nope" }))
            .validate()
            .unwrap_err();
        assert!(errors.get("value").is_none());
        assert!(errors.get("date").is_some());
    }
}
