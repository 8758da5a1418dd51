//! 布尔参数

use pyo3::{
    pyclass, pymethods,
    types::{PyDict, PyTuple, PyType},
    Bound, Py, PyResult, Python,
};

use crate::{
    core::node_base::{InputSpec, InputType, OutputSpec},
    register::NodeKind,
    wrapper::comfyui::{types::NODE_BOOLEAN, PromptServer},
};

/// 布尔参数
///
/// 由 API 传入的开关, 用于启用或禁用功能
#[pyclass(subclass)]
pub struct ParamBoolean {}

impl PromptServer for ParamBoolean {}

#[pymethods]
impl ParamBoolean {
    #[new]
    fn new() -> Self {
        Self {}
    }

    #[classattr]
    #[pyo3(name = "INPUT_IS_LIST")]
    fn input_is_list() -> bool {
        false
    }

    #[classattr]
    #[pyo3(name = "RETURN_TYPES")]
    fn return_types(py: Python<'_>) -> PyResult<Bound<'_, PyTuple>> {
        PyTuple::new(py, NodeKind::ParamBoolean.definition().outputs.types)
    }

    #[classattr]
    #[pyo3(name = "RETURN_NAMES")]
    fn return_names(py: Python<'_>) -> PyResult<Bound<'_, PyTuple>> {
        PyTuple::new(py, NodeKind::ParamBoolean.definition().outputs.names)
    }

    #[classattr]
    #[pyo3(name = "OUTPUT_IS_LIST")]
    fn output_is_list() -> (bool,) {
        (false,)
    }

    #[classattr]
    #[pyo3(name = "CATEGORY")]
    fn category() -> &'static str {
        NodeKind::ParamBoolean.definition().category
    }

    #[classattr]
    #[pyo3(name = "DESCRIPTION")]
    fn description() -> &'static str {
        "An input node for a boolean (True/False) parameter from the API."
    }

    #[classattr]
    #[pyo3(name = "FUNCTION")]
    fn function() -> &'static str {
        NodeKind::ParamBoolean.definition().function
    }

    #[classmethod]
    #[pyo3(name = "INPUT_TYPES")]
    fn input_types(cls: &Bound<'_, PyType>) -> PyResult<Py<PyDict>> {
        NodeKind::ParamBoolean.definition().inputs.build(cls.py())
    }

    /// 只接受 python bool, 不做真值转换
    #[pyo3(name = "get_value")]
    fn execute(&self, value: bool) -> PyResult<(bool,)> {
        Ok((Self::get_value(value),))
    }
}

impl ParamBoolean {
    pub fn input_spec() -> InputSpec {
        InputSpec::new().with_required("value", InputType::bool().default(true))
    }

    pub fn output_spec() -> OutputSpec {
        OutputSpec::new().with_output(NODE_BOOLEAN, "value")
    }

    pub fn get_value(value: bool) -> bool {
        value
    }
}
