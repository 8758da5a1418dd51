//! Prompt Server

use log::error;
use pyo3::{
    types::{PyAnyMethods, PyDict, PyDictMethods, PyModule},
    PyErr, PyResult, PyTypeInfo, Python,
};

use crate::error::Error;

/// 前端消息事件名
pub const EVENT_NAME: &str = "api_params";

/// comfyui PromptServer wrapper
pub trait PromptServer: PyTypeInfo {
    /// 发送错误信息到ComfyUI前端
    ///
    /// 当节点执行出现异常时通知前端
    fn send_error(&self, py: Python, error_type: String, message: String) -> PyResult<()> {
        let server = PyModule::import(py, "server")?
            .getattr("PromptServer")?
            .getattr("instance")?;

        let error_data = PyDict::new(py);
        error_data.set_item("type", &error_type)?;
        error_data.set_item("node", self.get_class_name(py)?)?;
        error_data.set_item("message", message)?;

        server
            .getattr("send_sync")?
            .call1((EVENT_NAME, error_data))?;

        Ok(())
    }

    /// Class 名称
    fn get_class_name(&self, py: Python) -> PyResult<String> {
        Self::type_object(py)
            .getattr("__name__")?
            .extract::<String>()
    }

    /// 记录错误并通知前端, 返回原始错误对应的 python 异常
    ///
    /// 通知失败只记录日志, 不覆盖原始错误
    fn raise_error(&self, py: Python, error: Error) -> PyErr {
        let name = self.get_class_name(py).unwrap_or_default();
        error!("{name} error, {error}");
        if let Err(e) = self.send_error(py, name, error.to_string()) {
            error!("send error failed, {e}");
        }
        error.into()
    }
}
