//! 模型切换

use pyo3::{
    pyclass, pymethods,
    types::{PyAnyMethods, PyDict, PyTuple, PyType},
    Bound, Py, PyAny, PyResult, Python,
};

use crate::{
    core::node_base::{InputSpec, InputType, OutputSpec},
    error::Error,
    register::NodeKind,
    wrapper::comfyui::{types::NODE_MODEL, PromptServer},
};

/// 模型切换
///
/// 根据布尔值输出两个模型之一, 用于按条件启用 LoRA 等处理
#[pyclass(subclass)]
pub struct HelperModelSwitch {}

impl PromptServer for HelperModelSwitch {}

#[pymethods]
impl HelperModelSwitch {
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
        PyTuple::new(py, NodeKind::HelperModelSwitch.definition().outputs.types)
    }

    #[classattr]
    #[pyo3(name = "RETURN_NAMES")]
    fn return_names(py: Python<'_>) -> PyResult<Bound<'_, PyTuple>> {
        PyTuple::new(py, NodeKind::HelperModelSwitch.definition().outputs.names)
    }

    #[classattr]
    #[pyo3(name = "OUTPUT_IS_LIST")]
    fn output_is_list() -> (bool,) {
        (false,)
    }

    #[classattr]
    #[pyo3(name = "CATEGORY")]
    fn category() -> &'static str {
        NodeKind::HelperModelSwitch.definition().category
    }

    #[classattr]
    #[pyo3(name = "DESCRIPTION")]
    fn description() -> &'static str {
        "A switch for model streams. Passes model_a through when select_a is true, otherwise model_b. Replaces the older select_b input (default true): backends that still write select_b must write select_a with the inverted value."
    }

    #[classattr]
    #[pyo3(name = "FUNCTION")]
    fn function() -> &'static str {
        NodeKind::HelperModelSwitch.definition().function
    }

    #[classmethod]
    #[pyo3(name = "INPUT_TYPES")]
    fn input_types(cls: &Bound<'_, PyType>) -> PyResult<Py<PyDict>> {
        NodeKind::HelperModelSwitch.definition().inputs.build(cls.py())
    }

    #[pyo3(name = "switch")]
    fn execute<'py>(
        &self,
        py: Python<'py>,
        model_a: Bound<'py, PyAny>,
        model_b: Bound<'py, PyAny>,
        select_a: bool,
    ) -> PyResult<(Bound<'py, PyAny>,)> {
        let model_a = (!model_a.is_none()).then_some(model_a);
        let model_b = (!model_b.is_none()).then_some(model_b);

        match Self::switch(model_a, model_b, select_a) {
            Ok(model) => Ok((model,)),
            Err(e) => Err(self.raise_error(py, e)),
        }
    }
}

impl HelperModelSwitch {
    pub fn input_spec() -> InputSpec {
        InputSpec::new()
            .with_required("model_a", InputType::model())
            .with_required("model_b", InputType::model())
            .with_required(
                "select_a",
                InputType::bool()
                    .default(false)
                    .tooltip("true: output model_a, false: output model_b (inverse of the old select_b)"),
            )
    }

    pub fn output_spec() -> OutputSpec {
        OutputSpec::new().with_output(NODE_MODEL, "model")
    }

    /// 选择为真时返回第一个输入, 否则返回第二个
    ///
    /// 两个输入都必须存在
    pub fn switch<T>(model_a: Option<T>, model_b: Option<T>, select_a: bool) -> Result<T, Error> {
        let model_a = model_a.ok_or_else(|| Error::InvalidValue("model_a is missing".to_string()))?;
        let model_b = model_b.ok_or_else(|| Error::InvalidValue("model_b is missing".to_string()))?;

        if select_a {
            Ok(model_a)
        } else {
            Ok(model_b)
        }
    }
}
