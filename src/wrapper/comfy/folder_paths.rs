//! 文件夹路径
//!
//! 对应 ComfyUI 的 folder_paths 模块, 仅保留路径解析需要的部分

use std::path::{Path, PathBuf};

use log::warn;
use pyo3::{
    types::{PyAnyMethods, PyModule},
    Python,
};

use crate::error::Error;

/// 文件夹路径配置结构体
#[derive(Debug, Clone)]
pub struct FolderPaths {
    /// 基础路径
    base_path: PathBuf,
}

impl Default for FolderPaths {
    /// 以当前工作目录为基础路径
    fn default() -> Self {
        let base_path = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_base_directory(base_path)
    }
}

impl FolderPaths {
    /// 创建新的FolderPaths实例
    pub fn from_base_directory(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_directory.into(),
        }
    }

    /// 读取宿主 folder_paths.base_path
    ///
    /// 不在 ComfyUI 中运行时回退到当前工作目录
    pub fn from_comfy(py: Python<'_>) -> Self {
        let base_path = PyModule::import(py, "folder_paths")
            .and_then(|m| m.getattr("base_path"))
            .and_then(|p| p.extract::<String>());

        match base_path {
            Ok(base_path) => Self::from_base_directory(base_path),
            Err(e) => {
                warn!("folder_paths.base_path is unavailable, use current directory, {e}");
                Self::default()
            }
        }
    }
}

impl FolderPaths {
    /// 将相对路径转换为绝对路径
    pub fn to_absolute_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        self.base_path.join(path)
    }

    /// 解析文件路径, 文件不存在时返回 FileNotFound
    ///
    /// 相对路径以基础路径为起点, 如 "input/image.png", "output/image.png"
    pub fn resolve_file(&self, path: &str) -> Result<PathBuf, Error> {
        let full_path = self.to_absolute_path(Path::new(path));
        if !full_path.is_file() {
            return Err(Error::FileNotFound(format!(
                "Image not found at path: {}",
                full_path.display()
            )));
        }
        Ok(full_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_joins_base() {
        let folder_paths = FolderPaths::from_base_directory("/opt/comfy");
        assert_eq!(
            folder_paths.to_absolute_path(Path::new("input/a.png")),
            PathBuf::from("/opt/comfy/input/a.png")
        );
    }

    #[test]
    fn test_absolute_path_is_kept() {
        let folder_paths = FolderPaths::from_base_directory("/opt/comfy");
        assert_eq!(
            folder_paths.to_absolute_path(Path::new("/data/b.png")),
            PathBuf::from("/data/b.png")
        );
    }

    #[test]
    fn test_resolve_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir(dir.path().join("input"))?;
        std::fs::write(dir.path().join("input/a.png"), b"")?;

        let folder_paths = FolderPaths::from_base_directory(dir.path());
        let path = folder_paths.resolve_file("input/a.png")?;
        assert_eq!(path, dir.path().join("input/a.png"));

        // 目录不是文件
        assert!(matches!(
            folder_paths.resolve_file("input"),
            Err(Error::FileNotFound(_))
        ));
        assert!(matches!(
            folder_paths.resolve_file("nonexistent.png"),
            Err(Error::FileNotFound(_))
        ));
        Ok(())
    }

    #[test]
    #[ignore]
    fn test_from_comfy() {
        Python::with_gil(|py| {
            let folder_paths = FolderPaths::from_comfy(py);
            assert!(folder_paths.to_absolute_path(Path::new("")).exists());
        });
    }
}
