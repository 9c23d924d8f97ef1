//! Field-scoped validation errors.
//!
//! Validation functions accumulate every independent violation into an
//! ordered [`ErrorList`] instead of stopping at the first one, so a single
//! admission request surfaces the complete set of problems at once.

use std::fmt;

/// Dotted path to the field an error is attributed to, e.g.
/// `networks.zones[0].internal`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path(String);

impl Path {
    pub fn new(name: impl Into<String>) -> Self {
        Path(name.into())
    }

    /// Append a child field: `networks` -> `networks.vpc`.
    pub fn child(&self, name: &str) -> Self {
        Path(format!("{}.{name}", self.0))
    }

    /// Append a list index: `networks.zones` -> `networks.zones[0]`.
    pub fn index(&self, i: usize) -> Self {
        Path(format!("{}[{i}]", self.0))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ErrorType classifies a field error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorType {
    /// A mandatory field was absent.
    Required,
    /// A present field violates a semantic constraint.
    Invalid,
    /// A failure outside the request itself, e.g. an undecodable
    /// provider config payload.
    InternalError,
}

/// A single field-scoped validation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub error_type: ErrorType,
    pub field: Path,
    pub value: String,
    pub detail: String,
}

impl FieldError {
    pub fn required(field: Path, detail: impl Into<String>) -> Self {
        FieldError {
            error_type: ErrorType::Required,
            field,
            value: String::new(),
            detail: detail.into(),
        }
    }

    pub fn invalid(field: Path, value: impl Into<String>, detail: impl Into<String>) -> Self {
        FieldError {
            error_type: ErrorType::Invalid,
            field,
            value: value.into(),
            detail: detail.into(),
        }
    }

    pub fn internal_error(field: Path, detail: impl Into<String>) -> Self {
        FieldError {
            error_type: ErrorType::InternalError,
            field,
            value: String::new(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_type {
            ErrorType::Required => {
                write!(f, "{}: Required value: {}", self.field, self.detail)
            }
            ErrorType::Invalid => {
                write!(
                    f,
                    "{}: Invalid value: \"{}\": {}",
                    self.field, self.value, self.detail
                )
            }
            ErrorType::InternalError => {
                write!(f, "{}: Internal error: {}", self.field, self.detail)
            }
        }
    }
}

/// Ordered list of field errors; order is the order checks are performed.
pub type ErrorList = Vec<FieldError>;

/// Render an error list into a single admission-rejection reason.
pub fn join(errors: &[FieldError]) -> String {
    let rendered: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}
