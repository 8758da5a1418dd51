//! 数值范围
//!
//! INT / FLOAT 输入声明的 min/max/step, 以及越界时的处理策略

use std::fmt;

use strum_macros::{Display, EnumIter, EnumString};

use crate::error::Error;

/// 越界处理策略
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
pub enum OutOfRange {
    /// 取最近的边界值
    #[default]
    #[strum(to_string = "clamp")]
    Clamp,
    /// 报错
    #[strum(to_string = "reject")]
    Reject,
}

impl OutOfRange {
    /// 解析前端传入的策略名称
    pub fn parse(mode: &str) -> Result<Self, Error> {
        mode.parse::<OutOfRange>()
            .map_err(|e| Error::ParseEnumString(format!("{mode}, {e}")))
    }

    /// 可选输入, 未连接时使用默认策略
    pub fn parse_optional(mode: Option<&str>) -> Result<Self, Error> {
        mode.map(Self::parse).transpose().map(Option::unwrap_or_default)
    }
}

/// 数值输入范围
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange<T> {
    pub min: T,
    pub max: T,
    pub step: T,
}

impl<T> NumericRange<T> {
    pub const fn new(min: T, max: T, step: T) -> Self {
        Self { min, max, step }
    }
}

impl<T> NumericRange<T>
where
    T: PartialOrd + Copy + fmt::Display,
{
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// 按策略处理输入值
    ///
    /// 范围内原样返回; 越界时 Clamp 返回边界值, Reject 返回 InvalidValue.
    /// 无法比较的值 (NaN) 总是 InvalidValue.
    pub fn apply(&self, value: T, policy: OutOfRange) -> Result<T, Error> {
        if value.partial_cmp(&value).is_none() {
            return Err(Error::InvalidValue(format!("{value} is not a number")));
        }

        if self.contains(value) {
            return Ok(value);
        }

        match policy {
            OutOfRange::Clamp if value < self.min => Ok(self.min),
            OutOfRange::Clamp => Ok(self.max),
            OutOfRange::Reject => Err(Error::InvalidValue(format!(
                "{value} is outside [{}, {}]",
                self.min, self.max
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    const RANGE: NumericRange<i128> = NumericRange::new(0, 10, 1);

    #[test]
    fn test_in_range_is_identity() -> anyhow::Result<()> {
        for value in 0..=10 {
            assert_eq!(RANGE.apply(value, OutOfRange::Clamp)?, value);
            assert_eq!(RANGE.apply(value, OutOfRange::Reject)?, value);
        }
        Ok(())
    }

    #[test]
    fn test_clamp() -> anyhow::Result<()> {
        assert_eq!(RANGE.apply(-5, OutOfRange::Clamp)?, 0);
        assert_eq!(RANGE.apply(11, OutOfRange::Clamp)?, 10);
        Ok(())
    }

    #[test]
    fn test_reject() {
        let err = RANGE.apply(11, OutOfRange::Reject);
        assert!(matches!(err, Err(Error::InvalidValue(_))));
    }

    #[test]
    fn test_nan_is_invalid() {
        let range = NumericRange::new(-1.0, 1.0, 0.1);
        for policy in OutOfRange::iter() {
            assert!(matches!(
                range.apply(f64::NAN, policy),
                Err(Error::InvalidValue(_))
            ));
        }
    }

    #[test]
    fn test_parse_policy() -> anyhow::Result<()> {
        assert_eq!(OutOfRange::parse("clamp")?, OutOfRange::Clamp);
        assert_eq!(OutOfRange::parse("reject")?, OutOfRange::Reject);
        assert_eq!(OutOfRange::default().to_string(), "clamp");
        assert!(OutOfRange::parse("wrap").is_err());
        assert_eq!(OutOfRange::parse_optional(None)?, OutOfRange::Clamp);
        assert_eq!(OutOfRange::parse_optional(Some("reject"))?, OutOfRange::Reject);
        Ok(())
    }
}
