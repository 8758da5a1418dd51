//! 字符串参数

use pyo3::{
    pyclass, pymethods,
    types::{PyDict, PyTuple, PyType},
    Bound, Py, PyResult, Python,
};

use crate::{
    core::node_base::{InputSpec, InputType, OutputSpec},
    register::NodeKind,
    wrapper::comfyui::{types::NODE_STRING, PromptServer},
};

/// 字符串参数
///
/// 由 API 传入的文本参数, 如提示词
#[pyclass(subclass)]
pub struct ParamString {}

impl PromptServer for ParamString {}

#[pymethods]
impl ParamString {
    #[new]
    fn new() -> Self {
        Self {}
    }

    // 输入列表, 可选
    #[classattr]
    #[pyo3(name = "INPUT_IS_LIST")]
    fn input_is_list() -> bool {
        false
    }

    // 返回参数类型
    #[classattr]
    #[pyo3(name = "RETURN_TYPES")]
    fn return_types(py: Python<'_>) -> PyResult<Bound<'_, PyTuple>> {
        PyTuple::new(py, NodeKind::ParamString.definition().outputs.types)
    }

    // 返回参数名称
    #[classattr]
    #[pyo3(name = "RETURN_NAMES")]
    fn return_names(py: Python<'_>) -> PyResult<Bound<'_, PyTuple>> {
        PyTuple::new(py, NodeKind::ParamString.definition().outputs.names)
    }

    // 输出列表, 可选
    #[classattr]
    #[pyo3(name = "OUTPUT_IS_LIST")]
    fn output_is_list() -> (bool,) {
        (false,)
    }

    // 节点分类
    #[classattr]
    #[pyo3(name = "CATEGORY")]
    fn category() -> &'static str {
        NodeKind::ParamString.definition().category
    }

    // 节点描述, 可选
    #[classattr]
    #[pyo3(name = "DESCRIPTION")]
    fn description() -> &'static str {
        "An input node for a string (text) parameter from the API, e.g. for prompts."
    }

    #[classattr]
    #[pyo3(name = "FUNCTION")]
    fn function() -> &'static str {
        NodeKind::ParamString.definition().function
    }

    #[classmethod]
    #[pyo3(name = "INPUT_TYPES")]
    fn input_types(cls: &Bound<'_, PyType>) -> PyResult<Py<PyDict>> {
        NodeKind::ParamString.definition().inputs.build(cls.py())
    }

    #[pyo3(name = "get_value")]
    fn execute(&self, value: String) -> PyResult<(String,)> {
        Ok((Self::get_value(value),))
    }
}

impl ParamString {
    pub fn input_spec() -> InputSpec {
        InputSpec::new().with_required(
            "value",
            InputType::string()
                .default("")
                .multiline(true)
                .tooltip("String value injected by the API"),
        )
    }

    pub fn output_spec() -> OutputSpec {
        OutputSpec::new().with_output(NODE_STRING, "value")
    }

    /// 原样返回, 空字符串也是有效值
    pub fn get_value(value: String) -> String {
        value
    }
}
