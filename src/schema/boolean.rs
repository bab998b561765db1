//! 布尔校验器

use super::{Input, Presence};
use crate::domain::validator::{SchemaIssue, Validator};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanSchema {
    presence: Presence<bool>,
}

impl BooleanSchema {
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    #[must_use]
    pub fn default(mut self, value: bool) -> Self {
        self.presence = Presence::Default(value);
        self
    }

    fn coerce(raw: &str) -> Result<bool, SchemaIssue> {
        match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(SchemaIssue::invalid_type("布尔值", raw)),
        }
    }
}

impl Validator for BooleanSchema {
    fn validate(&self, raw: Option<&str>) -> Result<Value, SchemaIssue> {
        let value = match self.presence.apply(raw)? {
            None => return Ok(Value::Null),
            Some(Input::Raw(s)) => Self::coerce(s)?,
            Some(Input::Default(d)) => *d,
        };
        Ok(Value::Bool(value))
    }
}
