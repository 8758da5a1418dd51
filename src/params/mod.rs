//! 参数输入节点

use pyo3::{
    types::{PyModule, PyModuleMethods},
    Bound, PyResult, Python,
};

use crate::{core::node::NodeRegister, register::NodeKind};

mod param_string;
pub use param_string::ParamString;

mod param_int;
pub use param_int::{ParamInt, INT_RANGE};

mod param_float;
pub use param_float::{ParamFloat, FLOAT_RANGE};

mod param_boolean;
pub use param_boolean::ParamBoolean;

mod param_universal;
pub use param_universal::ParamUniversal;

mod param_image;
pub use param_image::ParamImage;

/// 参数模块
pub fn submodule(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let submodule = PyModule::new(py, "params")?;
    submodule.add_class::<ParamString>()?;
    submodule.add_class::<ParamInt>()?;
    submodule.add_class::<ParamFloat>()?;
    submodule.add_class::<ParamBoolean>()?;
    submodule.add_class::<ParamUniversal>()?;
    submodule.add_class::<ParamImage>()?;
    Ok(submodule)
}

/// Params node register
pub fn node_register(py: Python<'_>) -> PyResult<Vec<NodeRegister<'_>>> {
    let nodes: Vec<NodeRegister> = vec![
        NodeRegister::new::<ParamString>(py, NodeKind::ParamString),
        NodeRegister::new::<ParamInt>(py, NodeKind::ParamInt),
        NodeRegister::new::<ParamFloat>(py, NodeKind::ParamFloat),
        NodeRegister::new::<ParamBoolean>(py, NodeKind::ParamBoolean),
        NodeRegister::new::<ParamUniversal>(py, NodeKind::ParamUniversal),
        NodeRegister::new::<ParamImage>(py, NodeKind::ParamImage),
    ];
    Ok(nodes)
}
