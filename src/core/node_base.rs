//! ComfyUI 节点输入输出构建器
//!
//! 提供类型安全、易用的构建器 API，用于生成 ComfyUI 节点的 INPUT_TYPES
//!
//! # 使用示例
//!
//! ```rust,ignore
//! Python::with_gil(|py| {
//!     InputSpec::new()
//!         .with_required("text", InputType::string().default("hello").multiline(true))
//!         .with_required("count", InputType::int().default(10).min(0).max(100).step(1))
//!         .with_optional("mode", InputType::list(vec!["A".to_string(), "B".to_string()]).default("A"))
//!         .build(py)
//! })
//! ```

use indexmap::IndexMap;
use pyo3::{
    types::{PyDict, PyDictMethods},
    Bound, IntoPyObject, Py, PyAny, PyResult, Python,
};

use crate::wrapper::comfyui::types::{NODE_BOOLEAN, NODE_FLOAT, NODE_INT, NODE_MODEL, NODE_STRING};

/// 输入规范构建器
///
/// 用于构建 ComfyUI 节点的 INPUT_TYPES 字典结构
#[derive(Debug)]
pub struct InputSpec {
    required: Vec<(String, InputType)>,
    optional: Vec<(String, InputType)>,
}

impl InputSpec {
    /// 创建一个新的输入规范构建器
    pub fn new() -> Self {
        Self {
            required: Vec::new(),
            optional: Vec::new(),
        }
    }

    /// 添加必需输入
    pub fn with_required(mut self, name: impl Into<String>, input: InputType) -> Self {
        self.required.push((name.into(), input));
        self
    }

    /// 添加可选输入
    pub fn with_optional(mut self, name: impl Into<String>, input: InputType) -> Self {
        self.optional.push((name.into(), input));
        self
    }

    /// 按名称查找输入, 先必需后可选
    pub fn get(&self, name: &str) -> Option<&InputType> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .find(|(n, _)| n == name)
            .map(|(_, input)| input)
    }

    /// 构建 PyDict
    ///
    /// 生成符合 ComfyUI INPUT_TYPES 格式的字典结构
    pub fn build(self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let dict = PyDict::new(py);

        // Required 字段
        let required = PyDict::new(py);
        for (name, input_type) in self.required {
            required.set_item(name, input_type.to_py_tuple(py)?)?;
        }
        dict.set_item("required", required)?;

        // Optional 字段
        if !self.optional.is_empty() {
            let optional = PyDict::new(py);
            for (name, input_type) in self.optional {
                optional.set_item(name, input_type.to_py_tuple(py)?)?;
            }
            dict.set_item("optional", optional)?;
        }

        Ok(dict.into())
    }
}

impl Default for InputSpec {
    fn default() -> Self {
        Self::new()
    }
}

/// 输入类型（包含类型和参数）
///
/// 统一了类型定义和参数设置，简化了 API
#[derive(Debug)]
pub struct InputType {
    kind: InputKind,
    params: IndexMap<String, ParamValue>,
    list_options: Vec<String>,
}

/// 输入类型枚举（仅表示类型，不包含参数）
#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    String,
    Int,
    Float,
    Bool,
    List,
    Model,
}

/// 参数值
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Int(i128),
    Float(f64),
    Bool(bool),
}

impl InputType {
    /// 创建新的输入类型
    fn new(kind: InputKind) -> Self {
        Self {
            kind,
            params: IndexMap::new(),
            list_options: Vec::new(),
        }
    }

    /// String 类型
    pub fn string() -> Self {
        Self::new(InputKind::String)
    }

    /// Int 类型
    pub fn int() -> Self {
        Self::new(InputKind::Int)
    }

    /// Float 类型
    pub fn float() -> Self {
        Self::new(InputKind::Float)
    }

    /// Bool 类型
    pub fn bool() -> Self {
        Self::new(InputKind::Bool)
    }

    /// Model 类型
    pub fn model() -> Self {
        Self::new(InputKind::Model)
    }

    /// 动态选项列表
    pub fn list(options: Vec<String>) -> Self {
        Self {
            kind: InputKind::List,
            params: IndexMap::new(),
            list_options: options,
        }
    }

    pub fn kind(&self) -> &InputKind {
        &self.kind
    }

    /// 获取参数
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    pub fn list_options(&self) -> &[String] {
        &self.list_options
    }
}

impl InputType {
    // ============ 通用参数 ============

    /// 设置默认值
    pub fn default<V: Into<ParamValue>>(mut self, value: V) -> Self {
        self.params.insert("default".to_string(), value.into());
        self
    }

    /// 设置提示文本
    pub fn tooltip<V: Into<ParamValue>>(mut self, value: V) -> Self {
        self.params.insert("tooltip".to_string(), value.into());
        self
    }

    // ============ 数值类型参数 ============

    /// 设置最小值
    pub fn min<V: Into<ParamValue>>(mut self, value: V) -> Self {
        self.params.insert("min".to_string(), value.into());
        self
    }

    /// 设置最大值
    pub fn max<V: Into<ParamValue>>(mut self, value: V) -> Self {
        self.params.insert("max".to_string(), value.into());
        self
    }

    /// 设置步长
    pub fn step<V: Into<ParamValue>>(mut self, value: V) -> Self {
        self.params.insert("step".to_string(), value.into());
        self
    }

    /// 设置显示方式, number | slider
    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.params
            .insert("display".to_string(), ParamValue::String(display.into()));
        self
    }

    // ============ 字符串类型参数 ============

    /// 设置多行文本
    pub fn multiline(mut self, multiline: bool) -> Self {
        self.params
            .insert("multiline".to_string(), ParamValue::Bool(multiline));
        self
    }

    /// 转换为 Python 元组
    ///
    /// 列表类型：(options_list, params_dict)
    /// 其他类型：(type_name, params_dict)
    fn to_py_tuple<'py>(self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        let params_dict = self.params.to_py_dict(py)?;
        let type_str = match self.kind {
            InputKind::List => {
                return Ok((self.list_options, params_dict)
                    .into_pyobject(py)?
                    .into_any());
            }
            InputKind::String => NODE_STRING,
            InputKind::Int => NODE_INT,
            InputKind::Float => NODE_FLOAT,
            InputKind::Bool => NODE_BOOLEAN,
            InputKind::Model => NODE_MODEL,
        };
        Ok((type_str, params_dict).into_pyobject(py)?.into_any())
    }
}

/// 将 IndexMap<String, ParamValue> 转换为 PyDict
trait ToPyDict {
    fn to_py_dict<'py>(&self, py: Python<'py>) -> PyResult<Py<PyDict>>;
}

impl ToPyDict for IndexMap<String, ParamValue> {
    fn to_py_dict<'py>(&self, py: Python<'py>) -> PyResult<Py<PyDict>> {
        let dict = PyDict::new(py);
        for (key, value) in self {
            match value {
                ParamValue::String(s) => dict.set_item(key, s.as_str())?,
                ParamValue::Int(i) => dict.set_item(key, *i)?,
                ParamValue::Float(f) => dict.set_item(key, *f)?,
                ParamValue::Bool(b) => dict.set_item(key, *b)?,
            }
        }
        Ok(dict.into())
    }
}

// ============ ParamValue 的 From 实现 ============

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<i128> for ParamValue {
    fn from(i: i128) -> Self {
        ParamValue::Int(i)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i as i128)
    }
}

impl From<u64> for ParamValue {
    fn from(i: u64) -> Self {
        ParamValue::Int(i as i128)
    }
}

impl From<i32> for ParamValue {
    fn from(i: i32) -> Self {
        ParamValue::Int(i as i128)
    }
}

impl From<f64> for ParamValue {
    fn from(f: f64) -> Self {
        ParamValue::Float(f)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

/// 输出规范
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSpec {
    pub types: Vec<&'static str>,
    pub names: Vec<&'static str>,
}

impl OutputSpec {
    pub fn new() -> Self {
        Self {
            types: Vec::new(),
            names: Vec::new(),
        }
    }

    pub fn with_output(mut self, type_name: &'static str, name: &'static str) -> Self {
        self.types.push(type_name);
        self.names.push(name);
        self
    }
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrapper::comfyui::types::{NODE_IMAGE, NODE_MASK};

    /// 测试 InputSpec 构建器
    #[test]
    fn test_input_spec_builder() -> anyhow::Result<()> {
        let inputs = InputSpec::new()
            .with_required("text", InputType::string().default("hello"))
            .with_required("count", InputType::int().default(10).min(0).max(100))
            .with_optional("enabled", InputType::bool().default(false));

        assert_eq!(inputs.get("text").map(InputType::kind), Some(&InputKind::String));
        assert_eq!(inputs.get("count").map(InputType::kind), Some(&InputKind::Int));
        assert_eq!(inputs.get("enabled").map(InputType::kind), Some(&InputKind::Bool));
        assert!(inputs.get("missing").is_none());
        Ok(())
    }

    /// 测试选项列表
    #[test]
    fn test_list_input_type() -> anyhow::Result<()> {
        let options = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let inputs =
            InputSpec::new().with_optional("mode", InputType::list(options.clone()).default("A"));

        let mode = inputs.get("mode").expect("mode input");
        assert_eq!(mode.kind(), &InputKind::List);
        assert_eq!(mode.list_options(), options.as_slice());
        assert_eq!(
            mode.param("default"),
            Some(&ParamValue::String("A".to_string()))
        );
        Ok(())
    }

    /// 测试整数范围可以容纳 u64 上限
    #[test]
    fn test_int_with_u64_range() -> anyhow::Result<()> {
        let input = InputType::int().min(0).max(u64::MAX).step(1);

        assert_eq!(input.param("min"), Some(&ParamValue::Int(0)));
        assert_eq!(
            input.param("max"),
            Some(&ParamValue::Int(0xffffffffffffffff))
        );
        Ok(())
    }

    /// 测试浮点数范围
    #[test]
    fn test_float_with_range() -> anyhow::Result<()> {
        let input = InputType::float()
            .default(0.7)
            .min(0.0)
            .max(2.0)
            .display("number");

        assert_eq!(input.param("max"), Some(&ParamValue::Float(2.0)));
        assert_eq!(
            input.param("display"),
            Some(&ParamValue::String("number".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_get_missing_input() {
        let inputs = InputSpec::new().with_required("value", InputType::string());
        assert!(inputs.get("value").is_some());
        assert!(inputs.get("other").is_none());
    }

    #[test]
    fn test_output_spec() {
        let outputs = OutputSpec::new()
            .with_output(NODE_IMAGE, "image")
            .with_output(NODE_MASK, "mask");

        assert_eq!(outputs.types, vec!["IMAGE", "MASK"]);
        assert_eq!(outputs.names, vec!["image", "mask"]);
    }
}
