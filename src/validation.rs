use std::collections::BTreeMap;

use serde::Serialize;

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldErrorKind {
    Required,
    Cast,
    Unique,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub message: String,
    pub kind: FieldErrorKind,
    pub path: String,
}

/// Per-field rejections keyed by field name, rendered as the `errors` object
/// of a 400 response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(&mut self, path: &str) {
        self.push(
            path,
            FieldErrorKind::Required,
            format!("Path `{path}` is required."),
        );
    }

    pub fn cast(&mut self, path: &str, expected: &str) {
        self.push(
            path,
            FieldErrorKind::Cast,
            format!("Cast to {expected} failed for path `{path}`"),
        );
    }

    pub fn unique(&mut self, path: &str) {
        self.push(
            path,
            FieldErrorKind::Unique,
            format!("Path `{path}` is already taken."),
        );
    }

    /// The request body itself could not be read as the expected JSON object.
    pub fn malformed_body(&mut self, detail: String) {
        self.push("body", FieldErrorKind::Cast, detail);
    }

    fn push(&mut self, path: &str, kind: FieldErrorKind, message: String) {
        self.0.insert(
            path.to_string(),
            FieldError {
                message,
                kind,
                path: path.to_string(),
            },
        );
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&FieldError> {
        self.0.get(path)
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected errors.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Treats a missing, null or empty string as absent.
pub fn require_text(errors: &mut FieldErrors, path: &str, value: Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            errors.required(path);
            String::new()
        }
    }
}
