//! 整数参数

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
    wrapper::comfyui::{types::NODE_INT, PromptServer},
};

/// 声明的取值范围, 上限与种子的 u64 范围一致
pub const INT_RANGE: NumericRange<i128> = NumericRange::new(0, u64::MAX as i128, 1);

/// 整数参数
///
/// 由 API 传入的整数参数, 如种子, 步数, 尺寸
#[pyclass(subclass)]
pub struct ParamInt {}

impl PromptServer for ParamInt {}

#[pymethods]
impl ParamInt {
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
        PyTuple::new(py, NodeKind::ParamInt.definition().outputs.types)
    }

    #[classattr]
    #[pyo3(name = "RETURN_NAMES")]
    fn return_names(py: Python<'_>) -> PyResult<Bound<'_, PyTuple>> {
        PyTuple::new(py, NodeKind::ParamInt.definition().outputs.names)
    }

    #[classattr]
    #[pyo3(name = "OUTPUT_IS_LIST")]
    fn output_is_list() -> (bool,) {
        (false,)
    }

    #[classattr]
    #[pyo3(name = "CATEGORY")]
    fn category() -> &'static str {
        NodeKind::ParamInt.definition().category
    }

    #[classattr]
    #[pyo3(name = "DESCRIPTION")]
    fn description() -> &'static str {
        "An input node for an integer parameter from the API, e.g. for seed, steps, dimensions."
    }

    #[classattr]
    #[pyo3(name = "FUNCTION")]
    fn function() -> &'static str {
        NodeKind::ParamInt.definition().function
    }

    #[classmethod]
    #[pyo3(name = "INPUT_TYPES")]
    fn input_types(cls: &Bound<'_, PyType>) -> PyResult<Py<PyDict>> {
        NodeKind::ParamInt.definition().inputs.build(cls.py())
    }

    #[pyo3(name = "get_value", signature = (value, out_of_range = None))]
    fn execute(&self, py: Python, value: i128, out_of_range: Option<&str>) -> PyResult<(i128,)> {
        let result = OutOfRange::parse_optional(out_of_range)
            .and_then(|policy| Self::get_value(value, policy));

        match result {
            Ok(v) => Ok((v,)),
            Err(e) => Err(self.raise_error(py, e)),
        }
    }
}

impl ParamInt {
    pub fn input_spec() -> InputSpec {
        InputSpec::new()
            .with_required(
                "value",
                InputType::int()
                    .default(0)
                    .min(INT_RANGE.min)
                    .max(INT_RANGE.max)
                    .step(INT_RANGE.step),
            )
            .with_optional(
                "out_of_range",
                InputType::list(OutOfRange::iter().map(|v| v.to_string()).collect())
                    .default(OutOfRange::default().to_string())
                    .tooltip("clamp: use the nearest bound, reject: raise an error"),
            )
    }

    pub fn output_spec() -> OutputSpec {
        OutputSpec::new().with_output(NODE_INT, "value")
    }

    /// 范围内原样返回, 越界按策略处理
    pub fn get_value(value: i128, policy: OutOfRange) -> Result<i128, Error> {
        INT_RANGE.apply(value, policy)
    }
}
