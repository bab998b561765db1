//! 校验能力（输入端口）
//!
//! 每个条目持有一个校验器：输入原始字符串或缺失，输出类型化的值或结构化的问题。
//! 任何校验库都可以通过实现 [`Validator`] 接入。

use serde_json::Value;
use std::fmt;

/// 校验问题分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// 值缺失且条目必填
    Required,
    /// 无法转换为目标类型
    InvalidType,
    /// 低于下限（数值或长度）
    TooSmall,
    /// 超过上限（数值或长度）
    TooBig,
    /// 字符串格式不符
    InvalidString,
    /// 不在可选值列表中
    InvalidEnum,
    /// 自定义校验
    Custom,
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueCode::Required => write!(f, "required"),
            IssueCode::InvalidType => write!(f, "invalid_type"),
            IssueCode::TooSmall => write!(f, "too_small"),
            IssueCode::TooBig => write!(f, "too_big"),
            IssueCode::InvalidString => write!(f, "invalid_string"),
            IssueCode::InvalidEnum => write!(f, "invalid_enum_value"),
            IssueCode::Custom => write!(f, "custom"),
        }
    }
}

/// 校验器给出的结构化诊断
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{code}] {message}")]
pub struct SchemaIssue {
    pub code: IssueCode,
    pub message: String,
}

impl SchemaIssue {
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn required() -> Self {
        Self::new(IssueCode::Required, "必填项缺失")
    }

    pub fn invalid_type(expected: &str, received: &str) -> Self {
        Self::new(
            IssueCode::InvalidType,
            format!("应为 {expected}，实际为 \"{received}\""),
        )
    }

    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(IssueCode::Custom, message)
    }
}

/// 校验/转换能力
///
/// `raw` 为 `None` 表示两个存储中都没有该条目；是否接受缺失由校验器自己决定
/// （例如可选或带默认值）。
pub trait Validator: Send + Sync {
    fn validate(&self, raw: Option<&str>) -> Result<Value, SchemaIssue>;
}

impl<F> Validator for F
where
    F: Fn(Option<&str>) -> Result<Value, SchemaIssue> + Send + Sync,
{
    fn validate(&self, raw: Option<&str>) -> Result<Value, SchemaIssue> {
        self(raw)
    }
}

/// 在校验成功后追加转换
pub struct Transform<V, F> {
    inner: V,
    f: F,
}

impl<V, F> Validator for Transform<V, F>
where
    V: Validator,
    F: Fn(Value) -> Result<Value, SchemaIssue> + Send + Sync,
{
    fn validate(&self, raw: Option<&str>) -> Result<Value, SchemaIssue> {
        let value = self.inner.validate(raw)?;
        (self.f)(value)
    }
}

/// 校验器组合方法
pub trait ValidatorExt: Validator + Sized {
    /// 校验通过后对结果做转换，转换本身也可以失败
    fn transform<F>(self, f: F) -> Transform<Self, F>
    where
        F: Fn(Value) -> Result<Value, SchemaIssue> + Send + Sync,
    {
        Transform { inner: self, f }
    }
}

impl<V: Validator + Sized> ValidatorExt for V {}
