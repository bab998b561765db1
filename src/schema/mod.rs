//! 内置校验器
//!
//! 覆盖常见的环境变量形态：字符串、数字、布尔、枚举。
//! 所有校验器都支持 `optional()`（缺失时为 `null`）和 `default(..)`（缺失时使用默认值，
//! 默认值同样要通过约束检查）。

pub mod boolean;
pub mod choice;
pub mod number;
pub mod string;

pub use boolean::BooleanSchema;
pub use choice::ChoiceSchema;
pub use number::NumberSchema;
pub use string::StringSchema;

use crate::domain::validator::SchemaIssue;

/// 字符串校验器
pub fn string() -> StringSchema {
    Default::default()
}

/// 数字校验器，原始字符串会被转换为数字
pub fn number() -> NumberSchema {
    Default::default()
}

/// 整数校验器
pub fn integer() -> NumberSchema {
    number().int()
}

/// 布尔校验器：true/false/1/0/yes/no/on/off
pub fn boolean() -> BooleanSchema {
    Default::default()
}

/// 枚举校验器
pub fn one_of<I, S>(values: I) -> ChoiceSchema
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ChoiceSchema::new(values)
}

/// 缺失值策略
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) enum Presence<T> {
    #[default]
    Required,
    Optional,
    Default(T),
}

/// 进入约束检查的输入
pub(crate) enum Input<'a, T> {
    Raw(&'a str),
    Default(&'a T),
}

impl<T> Presence<T> {
    /// `Ok(None)` 表示可选条目缺失，直接输出 `null`
    pub(crate) fn apply<'a>(
        &'a self,
        raw: Option<&'a str>,
    ) -> Result<Option<Input<'a, T>>, SchemaIssue> {
        match (raw, self) {
            (Some(s), _) => Ok(Some(Input::Raw(s))),
            (None, Presence::Required) => Err(SchemaIssue::required()),
            (None, Presence::Optional) => Ok(None),
            (None, Presence::Default(value)) => Ok(Some(Input::Default(value))),
        }
    }
}
