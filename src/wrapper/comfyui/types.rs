//! 类型定义
//! 相关节点定义: ComfyUI/comfy/comfy_types/node_typing.py

use pyo3::{ffi::c_str, Bound, PyAny, PyResult, Python};

pub const NODE_INT: &str = "INT";
pub const NODE_FLOAT: &str = "FLOAT";
pub const NODE_STRING: &str = "STRING";
pub const NODE_BOOLEAN: &str = "BOOLEAN";
pub const NODE_IMAGE: &str = "IMAGE";
pub const NODE_MASK: &str = "MASK";
pub const NODE_MODEL: &str = "MODEL";
/// 任意类型的名称, 与 any_type 的字符串值一致
pub const NODE_ANY: &str = "*";

/// 任意类型
///
/// 继承 str 且与任何类型比较都相等, 前端据此允许连接到任意输入
pub fn any_type(py: Python<'_>) -> PyResult<Bound<'_, PyAny>> {
    let code = c_str!(
        r#"
class AlwaysEqualProxy(str):
    def __eq__(self, _):
        return True
    def __ne__(self, _):
        return False

    def __hash__(self):
        return str.__hash__(self)
        "#
    );

    py.run(code, None, None)?;
    py.eval(c_str!("AlwaysEqualProxy('*')"), None, None)
}
