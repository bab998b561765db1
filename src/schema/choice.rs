//! 枚举校验器

use super::{Input, Presence};
use crate::domain::validator::{IssueCode, SchemaIssue, Validator};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoiceSchema {
    values: Vec<String>,
    presence: Presence<String>,
}

impl ChoiceSchema {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            presence: Presence::Required,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    #[must_use]
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.presence = Presence::Default(value.into());
        self
    }

    fn check(&self, value: &str) -> Result<(), SchemaIssue> {
        if self.values.iter().any(|v| v == value) {
            return Ok(());
        }
        Err(SchemaIssue::new(
            IssueCode::InvalidEnum,
            format!("应为 {} 之一，实际为 \"{value}\"", self.values.join(" | ")),
        ))
    }
}

impl Validator for ChoiceSchema {
    fn validate(&self, raw: Option<&str>) -> Result<Value, SchemaIssue> {
        let value = match self.presence.apply(raw)? {
            None => return Ok(Value::Null),
            Some(Input::Raw(s)) => s.to_string(),
            Some(Input::Default(d)) => d.clone(),
        };
        self.check(&value)?;
        Ok(Value::String(value))
    }
}
