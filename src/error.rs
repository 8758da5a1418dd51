//! 错误处理

use pyo3::{
    exceptions::{PyFileNotFoundError, PyRuntimeError, PyValueError},
    PyErr,
};

#[allow(unused)]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // 标准库错误处理
    #[error("io error, {0}")]
    Io(std::io::Error),
    #[error("strum error, {0}")]
    ParseEnumString(String),

    #[error("serde json error, {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("invalid value, {0}")]
    InvalidValue(String),
    #[error("type not supported, {0}")]
    TypeNotSupported(String),

    #[error("py error, {0}")]
    PyErr(#[from] pyo3::PyErr),
    #[error("pythonize error, {0}")]
    PythonizeError(#[from] pythonize::PythonizeError),

    #[error("tensor error, {0}")]
    TensorErr(#[from] candle_core::Error),

    #[error("file not found, {0}")]
    FileNotFound(String),
    #[error("decode image error, {0}")]
    DecodeImage(#[from] image::ImageError),

    #[error("node not found, {0}")]
    NodeNotFound(String),
    #[error("input not found, {0}")]
    InputNotFound(String),
    #[error("input is linked to another node, {0}")]
    LinkedInput(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// 转换为 python 异常
///
/// 数值越界等输入问题为 ValueError, 文件不存在为 FileNotFoundError, 其余为 RuntimeError
impl From<Error> for PyErr {
    fn from(e: Error) -> Self {
        match e {
            Error::PyErr(e) => e,
            Error::InvalidValue(_) => PyErr::new::<PyValueError, _>(e.to_string()),
            Error::FileNotFound(_) => PyErr::new::<PyFileNotFoundError, _>(e.to_string()),
            _ => PyErr::new::<PyRuntimeError, _>(e.to_string()),
        }
    }
}
