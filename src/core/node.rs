//! 节点相关

use pyo3::{types::PyType, Bound, PyTypeInfo, Python};

use crate::register::NodeKind;

/// 节点注册
/// (节点class名称, 节点对象, 节点显示名称)
pub struct NodeRegister<'py>(pub &'static str, pub Bound<'py, PyType>, pub &'static str);

impl<'py> NodeRegister<'py> {
    pub fn new<T: PyTypeInfo>(py: Python<'py>, kind: NodeKind) -> Self {
        let definition = kind.definition();
        NodeRegister(definition.identifier, py.get_type::<T>(), definition.display_name)
    }
}
