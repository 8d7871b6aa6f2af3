//! Request-body validation.
//!
//! Bodies arrive as raw JSON so that every field can be checked and every
//! problem reported at once, keyed by field name, instead of failing on the
//! first serde type mismatch.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

use crate::error::AppError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Messages per offending field.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: &str) {
        self.0.entry(field).or_default().push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

/// Field-by-field reader over a JSON object body.
///
/// Each accessor records a message when the field is invalid and returns
/// `None`; callers check [`Fields::is_clean`] before using the values.
pub struct Fields<'a> {
    body: &'a Value,
    errors: FieldErrors,
}

impl<'a> Fields<'a> {
    pub fn new(body: &'a Value) -> Self {
        Self {
            body,
            errors: FieldErrors::default(),
        }
    }

    fn raw(&self, name: &str) -> Option<&'a Value> {
        self.body.as_object().and_then(|o| o.get(name))
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_error(self) -> AppError {
        AppError::Validation(self.errors)
    }

    /// Required string of at least `min` characters.
    pub fn string(
        &mut self,
        name: &'static str,
        min: usize,
        type_msg: &str,
        min_msg: &str,
    ) -> Option<String> {
        match self.raw(name) {
            Some(Value::String(s)) if s.chars().count() >= min => Some(s.clone()),
            Some(Value::String(_)) => {
                self.errors.push(name, min_msg);
                None
            }
            _ => {
                self.errors.push(name, type_msg);
                None
            }
        }
    }

    /// Optional string of at least `min` characters; absent or null is `None`.
    pub fn optional_string(
        &mut self,
        name: &'static str,
        min: usize,
        type_msg: &str,
        min_msg: &str,
    ) -> Option<String> {
        match self.raw(name) {
            None | Some(Value::Null) => None,
            Some(_) => self.string(name, min, type_msg, min_msg),
        }
    }

    /// Absent is `None`, null is `Some(None)`.
    pub fn nullable_string(&mut self, name: &'static str, type_msg: &str) -> Option<Option<String>> {
        match self.raw(name) {
            None => None,
            Some(Value::Null) => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(_) => {
                self.errors.push(name, type_msg);
                None
            }
        }
    }

    pub fn email(&mut self, name: &'static str, msg: &str) -> Option<String> {
        match self.raw(name) {
            Some(Value::String(s)) if is_valid_email(s) => Some(s.clone()),
            _ => {
                self.errors.push(name, msg);
                None
            }
        }
    }

    pub fn optional_email(&mut self, name: &'static str, msg: &str) -> Option<String> {
        match self.raw(name) {
            None | Some(Value::Null) => None,
            Some(_) => self.email(name, msg),
        }
    }

    /// Required finite number strictly greater than zero.
    pub fn positive_number(
        &mut self,
        name: &'static str,
        type_msg: &str,
        positive_msg: &str,
    ) -> Option<f64> {
        match self.raw(name).and_then(Value::as_f64) {
            Some(n) if n.is_finite() && n > 0.0 => Some(n),
            Some(_) => {
                self.errors.push(name, positive_msg);
                None
            }
            None => {
                self.errors.push(name, type_msg);
                None
            }
        }
    }

    pub fn optional_positive_number(
        &mut self,
        name: &'static str,
        type_msg: &str,
        positive_msg: &str,
    ) -> Option<f64> {
        match self.raw(name) {
            None => None,
            Some(_) => self.positive_number(name, type_msg, positive_msg),
        }
    }

    pub fn uuid(&mut self, name: &'static str, msg: &str) -> Option<Uuid> {
        match self.raw(name).and_then(Value::as_str).map(Uuid::parse_str) {
            Some(Ok(id)) => Some(id),
            _ => {
                self.errors.push(name, msg);
                None
            }
        }
    }

    /// RFC 3339 / ISO-8601 timestamp with offset.
    pub fn datetime(&mut self, name: &'static str, msg: &str) -> Option<OffsetDateTime> {
        let parsed = self
            .raw(name)
            .and_then(Value::as_str)
            .map(|s| OffsetDateTime::parse(s, &Rfc3339));
        match parsed {
            Some(Ok(dt)) => Some(dt),
            _ => {
                self.errors.push(name, msg);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn email_regex() {
        assert!(is_valid_email("e@x.com"));
        assert!(!is_valid_email("invalid-email"));
        assert!(!is_valid_email("a b@x.com"));
    }

    #[test]
    fn collects_every_problem() {
        let body = json!({ "email": "invalid-email", "flowRate": "fast", "depth": -1 });
        let mut f = Fields::new(&body);
        assert!(f.email("email", "bad email").is_none());
        assert!(f.string("password", 6, "not a string", "too short").is_none());
        assert!(f.positive_number("flowRate", "nan", "neg").is_none());
        assert!(f.positive_number("depth", "nan", "neg").is_none());
        assert!(!f.is_clean());

        let AppError::Validation(errors) = f.into_error() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("email"), Some(&["bad email".to_string()][..]));
        assert_eq!(errors.get("password"), Some(&["not a string".to_string()][..]));
        assert_eq!(errors.get("flowRate"), Some(&["nan".to_string()][..]));
        assert_eq!(errors.get("depth"), Some(&["neg".to_string()][..]));
    }

    #[test]
    fn optional_and_nullable_fields() {
        let body = json!({ "description": null, "note": "x" });
        let mut f = Fields::new(&body);
        assert_eq!(f.nullable_string("description", "t"), Some(None));
        assert_eq!(f.nullable_string("missing", "t"), None);
        assert_eq!(f.optional_string("note", 1, "t", "m"), Some("x".into()));
        assert_eq!(f.optional_positive_number("flowRate", "t", "p"), None);
        assert!(f.is_clean());
    }

    #[test]
    fn uuid_and_datetime() {
        let id = Uuid::new_v4();
        let body = json!({ "pivotId": id.to_string(), "irrigationDate": "2024-01-01T14:00:00Z" });
        let mut f = Fields::new(&body);
        assert_eq!(f.uuid("pivotId", "m"), Some(id));
        let dt = f.datetime("irrigationDate", "m").expect("parsed");
        assert_eq!(dt.unix_timestamp(), 1_704_117_600);

        let bad = json!({ "pivotId": "123", "irrigationDate": "yesterday" });
        let mut f = Fields::new(&bad);
        assert!(f.uuid("pivotId", "m").is_none());
        assert!(f.datetime("irrigationDate", "m").is_none());
        assert!(!f.is_clean());
    }

    #[test]
    fn non_object_body_reports_required_fields() {
        let body = json!([1, 2, 3]);
        let mut f = Fields::new(&body);
        assert!(f.string("name", 1, "t", "m").is_none());
        assert!(!f.is_clean());
    }
}
