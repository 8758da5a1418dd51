//! 逻辑

use pyo3::{
    types::{PyModule, PyModuleMethods},
    Bound, PyResult, Python,
};

use crate::{core::node::NodeRegister, register::NodeKind};

mod model_switch;
pub use model_switch::HelperModelSwitch;

/// 逻辑模块
pub fn submodule(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let submodule = PyModule::new(py, "logic")?;
    submodule.add_class::<HelperModelSwitch>()?;
    Ok(submodule)
}

/// Logic node register
pub fn node_register(py: Python<'_>) -> PyResult<Vec<NodeRegister<'_>>> {
    let nodes: Vec<NodeRegister> = vec![NodeRegister::new::<HelperModelSwitch>(
        py,
        NodeKind::HelperModelSwitch,
    )];
    Ok(nodes)
}
