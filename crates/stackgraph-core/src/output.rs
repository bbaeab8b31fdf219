//! Named outputs

use crate::value::Value;

/// External-facing value bound to attributes of the finished graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBinding {
    name: String,
    value: Value,
    description: Option<String>,
}

impl OutputBinding {
    /// New output
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            description: None,
        }
    }

    /// Attach a human readable description
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Output name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bound value
    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Description, if any
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Rendered expression, e.g. `${aws_lb.alb.dns_name}`
    #[must_use]
    pub fn expression(&self) -> String {
        match self.value.to_json() {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        }
    }
}
