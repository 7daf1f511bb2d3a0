//! Assertion primitives
//!
//! Each check is evaluated into an [`Assertion`] first and then recorded by
//! the [`Reporter`], so every primitive counts exactly once.

use std::fmt;
use std::io;

use serde_json::{Map, Value};

use crate::client::ApiResponse;
use crate::report::Reporter;

/// Runtime kind of a decoded JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Boolean,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Boolean => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    passed: bool,
    message: String,
    details: Vec<String>,
}

impl Assertion {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Extra context printed after a failure
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }
}

pub fn status(response: &ApiResponse, expected: u16) -> Assertion {
    let actual = response.status().as_u16();

    if actual == expected {
        Assertion::pass(format!("Status code is {}", expected))
    } else {
        Assertion::fail(format!("Expected {}, got {}", expected, actual))
            .with_detail(format!("Response: {}", response.text()))
    }
}

/// Presence only; the value may be anything, including `null`
pub fn has_field(object: &Map<String, Value>, field: &str) -> Assertion {
    if object.contains_key(field) {
        return Assertion::pass(format!("Has field '{}'", field));
    }

    let available: Vec<&str> = object.keys().map(String::as_str).collect();

    Assertion::fail(format!("Missing field '{}'", field))
        .with_detail(format!("Available fields: {:?}", available))
}

pub fn field_type(object: &Map<String, Value>, field: &str, expected: JsonKind) -> Assertion {
    let Some(value) = object.get(field) else {
        return Assertion::fail(format!("Field '{}' missing", field));
    };

    let actual = JsonKind::of(value);
    if actual == expected {
        Assertion::pass(format!("Field '{}' is {}", field, expected))
    } else {
        Assertion::fail(format!("Field '{}' is {}, expected {}", field, actual, expected))
    }
}

/// Heuristic only: an `@` and a `.` somewhere in the string
pub fn email_format(value: &str) -> Assertion {
    if value.contains('@') && value.contains('.') {
        Assertion::pass(format!("Email format is valid: {}", value))
    } else {
        Assertion::fail(format!("Invalid email format: {}", value))
    }
}

impl Reporter {
    /// Count and print an evaluated assertion; returns whether it passed
    pub fn record(&mut self, assertion: Assertion) -> io::Result<bool> {
        if assertion.passed() {
            self.pass(assertion.message())?;
        } else {
            self.fail(assertion.message())?;
            for detail in assertion.details() {
                self.info(detail)?;
            }
        }

        Ok(assertion.passed())
    }

    pub fn assert_status(&mut self, response: &ApiResponse, expected: u16) -> io::Result<bool> {
        self.record(status(response, expected))
    }

    pub fn assert_has_field(&mut self, object: &Map<String, Value>, field: &str) -> io::Result<bool> {
        self.record(has_field(object, field))
    }

    pub fn assert_field_type(
        &mut self,
        object: &Map<String, Value>,
        field: &str,
        expected: JsonKind,
    ) -> io::Result<bool> {
        self.record(field_type(object, field, expected))
    }

    pub fn assert_email_format(&mut self, value: &str) -> io::Result<bool> {
        self.record(email_format(value))
    }

    /// Status check for a known backend gap.
    ///
    /// Passes when the target already returns `expected`; any other status is
    /// printed as informational and not counted.
    pub fn note_status(&mut self, response: &ApiResponse, expected: u16, subject: &str) -> io::Result<bool> {
        let actual = response.status().as_u16();

        if actual == expected {
            self.pass(format!("Returns {} {}", expected, subject))?;
            return Ok(true);
        }

        self.info(format!(
            "Known backend gap: got {}, should return {} {}",
            actual, expected, subject
        ))?;
        Ok(false)
    }
}
