//! 浮点数参数

use pyo3::{
    pyclass, pymethods,
    types::{PyDict, PyTuple, PyType},
    Bound, Py, PyResult, Python,
};
use strum::IntoEnumIterator;

use crate::{
    core::{
        node_base::{InputSpec, InputType, OutputSpec},
        range::{NumericRange, OutOfRange},
    },
    error::Error,
    register::NodeKind,
    wrapper::comfyui::{types::NODE_FLOAT, PromptServer},
};

/// 声明的取值范围
pub const FLOAT_RANGE: NumericRange<f64> = NumericRange::new(-100.0, 100.0, 0.01);

/// 浮点数参数
///
/// 由 API 传入的浮点数参数, 如 LoRA 强度, CFG
#[pyclass(subclass)]
pub struct ParamFloat {}

impl PromptServer for ParamFloat {}

#[pymethods]
impl ParamFloat {
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
        PyTuple::new(py, NodeKind::ParamFloat.definition().outputs.types)
    }

    #[classattr]
    #[pyo3(name = "RETURN_NAMES")]
    fn return_names(py: Python<'_>) -> PyResult<Bound<'_, PyTuple>> {
        PyTuple::new(py, NodeKind::ParamFloat.definition().outputs.names)
    }

    #[classattr]
    #[pyo3(name = "OUTPUT_IS_LIST")]
    fn output_is_list() -> (bool,) {
        (false,)
    }

    #[classattr]
    #[pyo3(name = "CATEGORY")]
    fn category() -> &'static str {
        NodeKind::ParamFloat.definition().category
    }

    #[classattr]
    #[pyo3(name = "DESCRIPTION")]
    fn description() -> &'static str {
        "An input node for a float parameter from the API, e.g. for LoRA strength, CFG scale."
    }

    #[classattr]
    #[pyo3(name = "FUNCTION")]
    fn function() -> &'static str {
        NodeKind::ParamFloat.definition().function
    }

    #[classmethod]
    #[pyo3(name = "INPUT_TYPES")]
    fn input_types(cls: &Bound<'_, PyType>) -> PyResult<Py<PyDict>> {
        NodeKind::ParamFloat.definition().inputs.build(cls.py())
    }

    #[pyo3(name = "get_value", signature = (value, out_of_range = None))]
    fn execute(&self, py: Python, value: f64, out_of_range: Option<&str>) -> PyResult<(f64,)> {
        let result = OutOfRange::parse_optional(out_of_range)
            .and_then(|policy| Self::get_value(value, policy));

        match result {
            Ok(v) => Ok((v,)),
            Err(e) => Err(self.raise_error(py, e)),
        }
    }
}

impl ParamFloat {
    pub fn input_spec() -> InputSpec {
        InputSpec::new()
            .with_required(
                "value",
                InputType::float()
                    .default(1.0)
                    .min(FLOAT_RANGE.min)
                    .max(FLOAT_RANGE.max)
                    .step(FLOAT_RANGE.step)
                    .display("number"),
            )
            .with_optional(
                "out_of_range",
                InputType::list(OutOfRange::iter().map(|v| v.to_string()).collect())
                    .default(OutOfRange::default().to_string())
                    .tooltip("clamp: use the nearest bound, reject: raise an error"),
            )
    }

    pub fn output_spec() -> OutputSpec {
        OutputSpec::new().with_output(NODE_FLOAT, "value")
    }

    /// 范围内原样返回, 越界按策略处理
    pub fn get_value(value: f64, policy: OutOfRange) -> Result<f64, Error> {
        FLOAT_RANGE.apply(value, policy)
    }
}
