//! 数字校验器

use super::{Input, Presence};
use crate::domain::validator::{IssueCode, SchemaIssue, Validator};
use serde_json::{Number, Value};

/// 超过该值的整数无法用 f64 精确表示
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberSchema {
    int: bool,
    positive: bool,
    nonnegative: bool,
    min: Option<f64>,
    max: Option<f64>,
    presence: Presence<f64>,
}

impl NumberSchema {
    #[must_use]
    pub fn int(mut self) -> Self {
        self.int = true;
        self
    }

    /// 必须大于 0
    #[must_use]
    pub fn positive(mut self) -> Self {
        self.positive = true;
        self
    }

    /// 必须大于等于 0
    #[must_use]
    pub fn nonnegative(mut self) -> Self {
        self.nonnegative = true;
        self
    }

    #[must_use]
    pub fn min(mut self, min: impl Into<f64>) -> Self {
        self.min = Some(min.into());
        self
    }

    #[must_use]
    pub fn max(mut self, max: impl Into<f64>) -> Self {
        self.max = Some(max.into());
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    #[must_use]
    pub fn default(mut self, value: impl Into<f64>) -> Self {
        self.presence = Presence::Default(value.into());
        self
    }

    fn coerce(raw: &str) -> Result<f64, SchemaIssue> {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| SchemaIssue::invalid_type("数字", raw))
    }

    fn check(&self, n: f64) -> Result<(), SchemaIssue> {
        if self.int && n.fract() != 0.0 {
            return Err(SchemaIssue::new(
                IssueCode::InvalidType,
                format!("应为整数，实际为 {n}"),
            ));
        }
        if self.positive && n <= 0.0 {
            return Err(SchemaIssue::new(IssueCode::TooSmall, "数值必须大于 0"));
        }
        if self.nonnegative && n < 0.0 {
            return Err(SchemaIssue::new(IssueCode::TooSmall, "数值必须大于等于 0"));
        }
        if let Some(min) = self.min
            && n < min
        {
            return Err(SchemaIssue::new(
                IssueCode::TooSmall,
                format!("数值必须大于等于 {min}"),
            ));
        }
        if let Some(max) = self.max
            && n > max
        {
            return Err(SchemaIssue::new(
                IssueCode::TooBig,
                format!("数值必须小于等于 {max}"),
            ));
        }
        Ok(())
    }
}

/// 整数值输出为 JSON 整数，便于反序列化到 `u16`/`i64` 等类型
fn to_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl Validator for NumberSchema {
    fn validate(&self, raw: Option<&str>) -> Result<Value, SchemaIssue> {
        let n = match self.presence.apply(raw)? {
            None => return Ok(Value::Null),
            Some(Input::Raw(s)) => Self::coerce(s)?,
            Some(Input::Default(d)) => *d,
        };
        self.check(n)?;
        Ok(to_value(n))
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::validator::{IssueCode, Validator};
    use crate::schema::{integer, number};
    use serde_json::{Value, json};

    #[test]
    fn test_coerces_strings() {
        assert_eq!(number().validate(Some("8080")).unwrap(), json!(8080));
        assert_eq!(number().validate(Some(" 0.5 ")).unwrap(), json!(0.5));
        assert_eq!(number().validate(Some("-3")).unwrap(), json!(-3));
    }

    #[test]
    fn test_rejects_non_numbers() {
        for raw in ["", "abc", "NaN", "inf", "12px"] {
            let issue = number().validate(Some(raw)).unwrap_err();
            assert_eq!(issue.code, IssueCode::InvalidType, "{raw}");
        }
    }

    #[test]
    fn test_positive_with_default() {
        let port = number().positive().default(3000);
        assert_eq!(port.validate(None).unwrap(), json!(3000));
        assert_eq!(port.validate(Some("8080")).unwrap(), json!(8080));
        assert_eq!(port.validate(Some("0")).unwrap_err().code, IssueCode::TooSmall);
        assert_eq!(
            port.validate(Some("-1")).unwrap_err().code,
            IssueCode::TooSmall
        );
    }

    #[test]
    fn test_default_is_checked() {
        let bad = number().positive().default(-1);
        assert_eq!(bad.validate(None).unwrap_err().code, IssueCode::TooSmall);
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer().validate(Some("42")).unwrap(), json!(42));
        assert_eq!(
            integer().validate(Some("4.2")).unwrap_err().code,
            IssueCode::InvalidType
        );
    }

    #[test]
    fn test_bounds() {
        let n = number().min(1).max(65535);
        assert!(n.validate(Some("1")).is_ok());
        assert!(n.validate(Some("65535")).is_ok());
        assert_eq!(n.validate(Some("0")).unwrap_err().code, IssueCode::TooSmall);
        assert_eq!(n.validate(Some("65536")).unwrap_err().code, IssueCode::TooBig);
    }

    #[test]
    fn test_nonnegative() {
        let n = number().nonnegative();
        assert!(n.validate(Some("0")).is_ok());
        assert!(n.validate(Some("-0.1")).is_err());
    }

    #[test]
    fn test_optional() {
        assert_eq!(number().optional().validate(None).unwrap(), Value::Null);
        assert_eq!(
            number().validate(None).unwrap_err().code,
            IssueCode::Required
        );
    }
}
