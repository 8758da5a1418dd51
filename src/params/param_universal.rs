//! 通用参数

use pyo3::{
    pyclass, pymethods,
    types::{PyDict, PyTuple, PyType},
    Bound, Py, PyAny, PyResult, Python,
};

use crate::{
    core::node_base::{InputSpec, InputType, OutputSpec},
    register::NodeKind,
    wrapper::comfyui::{
        types::{any_type, NODE_ANY},
        PromptServer,
    },
};

/// 通用参数
///
/// 输出为任意类型, 可以连接到任意下拉选项 (COMBO) 输入, 如模型文件名
#[pyclass(subclass)]
pub struct ParamUniversal {}

impl PromptServer for ParamUniversal {}

#[pymethods]
impl ParamUniversal {
    #[new]
    fn new() -> Self {
        Self {}
    }

    #[classattr]
    #[pyo3(name = "INPUT_IS_LIST")]
    fn input_is_list() -> bool {
        false
    }

    // 任意类型需要 python 对象, 不能用字符串
    #[classattr]
    #[pyo3(name = "RETURN_TYPES")]
    fn return_types(py: Python<'_>) -> PyResult<(Bound<'_, PyAny>,)> {
        Ok((any_type(py)?,))
    }

    #[classattr]
    #[pyo3(name = "RETURN_NAMES")]
    fn return_names(py: Python<'_>) -> PyResult<Bound<'_, PyTuple>> {
        PyTuple::new(py, NodeKind::ParamUniversal.definition().outputs.names)
    }

    #[classattr]
    #[pyo3(name = "OUTPUT_IS_LIST")]
    fn output_is_list() -> (bool,) {
        (false,)
    }

    #[classattr]
    #[pyo3(name = "CATEGORY")]
    fn category() -> &'static str {
        NodeKind::ParamUniversal.definition().category
    }

    #[classattr]
    #[pyo3(name = "DESCRIPTION")]
    fn description() -> &'static str {
        "A universal input node that can be connected to any COMBO widget. It takes a string from the API (e.g. a model filename) and outputs it as any type."
    }

    #[classattr]
    #[pyo3(name = "FUNCTION")]
    fn function() -> &'static str {
        NodeKind::ParamUniversal.definition().function
    }

    #[classmethod]
    #[pyo3(name = "INPUT_TYPES")]
    fn input_types(cls: &Bound<'_, PyType>) -> PyResult<Py<PyDict>> {
        NodeKind::ParamUniversal.definition().inputs.build(cls.py())
    }

    #[pyo3(name = "get_value")]
    fn execute(&self, value: String) -> PyResult<(String,)> {
        Ok((Self::get_value(value),))
    }
}

impl ParamUniversal {
    pub fn input_spec() -> InputSpec {
        InputSpec::new().with_required(
            "value",
            InputType::string().default("None").multiline(false),
        )
    }

    pub fn output_spec() -> OutputSpec {
        OutputSpec::new().with_output(NODE_ANY, "value")
    }

    pub fn get_value(value: String) -> String {
        value
    }
}

#[cfg(test)]
mod tests {
    use pyo3::types::PyAnyMethods;

    use crate::core::node_base::ParamValue;

    use super::*;

    #[test]
    fn test_get_value() {
        assert_eq!(
            ParamUniversal::get_value("sd_xl_base_1.0.safetensors".to_string()),
            "sd_xl_base_1.0.safetensors"
        );
    }

    #[test]
    fn test_input_spec() {
        let inputs = ParamUniversal::input_spec();
        let value = inputs.get("value").expect("value input");
        assert_eq!(value.param("default"), Some(&ParamValue::from("None")));
        assert_eq!(value.param("multiline"), Some(&ParamValue::Bool(false)));
        assert_eq!(ParamUniversal::output_spec().types, vec![NODE_ANY]);
    }

    #[test]
    #[ignore]
    fn test_return_type_matches_any_socket() -> anyhow::Result<()> {
        Python::with_gil(|py| -> anyhow::Result<()> {
            let (any,) = ParamUniversal::return_types(py)?;
            assert!(any.eq("MODEL")?);
            assert!(any.eq("COMBO")?);
            assert_eq!(any.to_string(), NODE_ANY);
            Ok(())
        })
    }
}
