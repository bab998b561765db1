//! 字符串校验器

use super::{Input, Presence};
use crate::domain::validator::{IssueCode, SchemaIssue, Validator};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+[^\s]*$").expect("URL 正则无效")
});

#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    trim: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
    url: bool,
    presence: Presence<String>,
}

impl StringSchema {
    /// 去除首尾空白后再检查
    #[must_use]
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    #[must_use]
    pub fn non_empty(self) -> Self {
        let min = self.min_length.unwrap_or(0).max(1);
        self.min_length(min)
    }

    #[must_use]
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    #[must_use]
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    #[must_use]
    pub fn url(mut self) -> Self {
        self.url = true;
        self
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
        let len = value.chars().count();
        if let Some(min) = self.min_length
            && len < min
        {
            return Err(SchemaIssue::new(
                IssueCode::TooSmall,
                format!("字符串长度至少为 {min}"),
            ));
        }
        if let Some(max) = self.max_length
            && len > max
        {
            return Err(SchemaIssue::new(
                IssueCode::TooBig,
                format!("字符串长度至多为 {max}"),
            ));
        }
        if let Some(re) = &self.pattern
            && !re.is_match(value)
        {
            return Err(SchemaIssue::new(
                IssueCode::InvalidString,
                format!("不匹配模式 {}", re.as_str()),
            ));
        }
        if self.url && !URL_RE.is_match(value) {
            return Err(SchemaIssue::new(IssueCode::InvalidString, "不是有效的 URL"));
        }
        Ok(())
    }
}

impl Validator for StringSchema {
    fn validate(&self, raw: Option<&str>) -> Result<Value, SchemaIssue> {
        let value = match self.presence.apply(raw)? {
            None => return Ok(Value::Null),
            Some(Input::Raw(s)) if self.trim => s.trim().to_string(),
            Some(Input::Raw(s)) => s.to_string(),
            Some(Input::Default(d)) => d.clone(),
        };
        self.check(&value)?;
        Ok(Value::String(value))
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::validator::{IssueCode, Validator};
    use crate::schema::string;
    use regex::Regex;
    use serde_json::{Value, json};

    #[test]
    fn test_required_by_default() {
        let issue = string().validate(None).unwrap_err();
        assert_eq!(issue.code, IssueCode::Required);
        assert_eq!(string().validate(Some("")).unwrap(), json!(""));
    }

    #[test]
    fn test_non_empty() {
        let s = string().non_empty();
        assert_eq!(s.validate(Some("svc-a")).unwrap(), json!("svc-a"));
        assert_eq!(s.validate(Some("")).unwrap_err().code, IssueCode::TooSmall);
    }

    #[test]
    fn test_length_counts_chars() {
        let s = string().min_length(2).max_length(3);
        assert!(s.validate(Some("环境")).is_ok());
        assert_eq!(s.validate(Some("a")).unwrap_err().code, IssueCode::TooSmall);
        assert_eq!(s.validate(Some("abcd")).unwrap_err().code, IssueCode::TooBig);
    }

    #[test]
    fn test_trim_before_check() {
        let s = string().trim().non_empty();
        assert_eq!(s.validate(Some("  v1 ")).unwrap(), json!("v1"));
        assert!(s.validate(Some("   ")).is_err());
    }

    #[test]
    fn test_pattern() {
        let s = string().pattern(Regex::new(r"^\d+\.\d+\.\d+$").unwrap());
        assert!(s.validate(Some("1.4.0")).is_ok());
        let issue = s.validate(Some("latest")).unwrap_err();
        assert_eq!(issue.code, IssueCode::InvalidString);
    }

    #[test]
    fn test_url() {
        let s = string().url();
        assert!(s.validate(Some("https://example.com/app")).is_ok());
        assert!(s.validate(Some("postgres://user@db:5432/app")).is_ok());
        assert!(s.validate(Some("example.com")).is_err());
        assert!(s.validate(Some("https://")).is_err());
    }

    #[test]
    fn test_optional_and_default() {
        assert_eq!(string().optional().validate(None).unwrap(), Value::Null);
        assert_eq!(
            string().default("dev").validate(None).unwrap(),
            json!("dev")
        );
        assert_eq!(
            string().default("dev").validate(Some("prod")).unwrap(),
            json!("prod")
        );
    }

    #[test]
    fn test_default_is_checked() {
        let s = string().url().default("not a url");
        assert_eq!(s.validate(None).unwrap_err().code, IssueCode::InvalidString);
    }
}
