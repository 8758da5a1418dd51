//! 图片路径参数
//!
//! 由 API 传入图片路径, 加载为 IMAGE 与 MASK

use candle_core::{Device, Tensor};
use log::debug;
use pyo3::{
    pyclass, pymethods,
    types::{PyDict, PyTuple, PyType},
    Bound, Py, PyAny, PyResult, Python,
};

use crate::{
    core::{
        node_base::{InputSpec, InputType, OutputSpec},
        utils::image::{decode_frames, frames_to_batch},
    },
    error::Error,
    register::NodeKind,
    wrapper::{
        comfy::folder_paths::FolderPaths,
        comfyui::{
            types::{NODE_IMAGE, NODE_MASK},
            PromptServer,
        },
        torch::tensor::TensorWrapper,
    },
};

/// 图片路径参数
///
/// 文件需要能被 ComfyUI 服务端访问
#[pyclass(subclass)]
pub struct ParamImage {
    device: Device,
}

impl PromptServer for ParamImage {}

#[pymethods]
impl ParamImage {
    #[new]
    fn new() -> Self {
        Self {
            device: Device::Cpu,
        }
    }

    #[classattr]
    #[pyo3(name = "INPUT_IS_LIST")]
    fn input_is_list() -> bool {
        false
    }

    #[classattr]
    #[pyo3(name = "RETURN_TYPES")]
    fn return_types(py: Python<'_>) -> PyResult<Bound<'_, PyTuple>> {
        PyTuple::new(py, NodeKind::ParamImage.definition().outputs.types)
    }

    #[classattr]
    #[pyo3(name = "RETURN_NAMES")]
    fn return_names(py: Python<'_>) -> PyResult<Bound<'_, PyTuple>> {
        PyTuple::new(py, NodeKind::ParamImage.definition().outputs.names)
    }

    #[classattr]
    #[pyo3(name = "OUTPUT_IS_LIST")]
    fn output_is_list() -> (bool, bool) {
        (false, false)
    }

    #[classattr]
    #[pyo3(name = "CATEGORY")]
    fn category() -> &'static str {
        NodeKind::ParamImage.definition().category
    }

    #[classattr]
    #[pyo3(name = "DESCRIPTION")]
    fn description() -> &'static str {
        "An input node that loads an image from a file path provided by the API. Relative paths start from the ComfyUI base directory."
    }

    #[classattr]
    #[pyo3(name = "FUNCTION")]
    fn function() -> &'static str {
        NodeKind::ParamImage.definition().function
    }

    #[classmethod]
    #[pyo3(name = "INPUT_TYPES")]
    fn input_types(cls: &Bound<'_, PyType>) -> PyResult<Py<PyDict>> {
        NodeKind::ParamImage.definition().inputs.build(cls.py())
    }

    #[pyo3(name = "load_image")]
    fn execute<'py>(
        &self,
        py: Python<'py>,
        image_path: &str,
    ) -> PyResult<(Bound<'py, PyAny>, Bound<'py, PyAny>)> {
        let folder_paths = FolderPaths::from_comfy(py);

        let (images, masks) = self
            .load_image(&folder_paths, image_path)
            .map_err(|e| self.raise_error(py, e))?;

        let images = TensorWrapper::<f32>::from_tensor(images).to_py_tensor(py)?;
        let masks = TensorWrapper::<f32>::from_tensor(masks).to_py_tensor(py)?;

        Ok((images, masks))
    }
}

impl ParamImage {
    pub fn input_spec() -> InputSpec {
        InputSpec::new().with_required(
            "image_path",
            InputType::string()
                .default("input/example.png")
                .tooltip("Absolute path, or a path relative to the ComfyUI base directory"),
        )
    }

    pub fn output_spec() -> OutputSpec {
        OutputSpec::new()
            .with_output(NODE_IMAGE, "image")
            .with_output(NODE_MASK, "mask")
    }

    /// 加载图片
    ///
    /// output: (images [N, H, W, 3], masks [N, H, W])
    pub fn load_image(
        &self,
        folder_paths: &FolderPaths,
        image_path: &str,
    ) -> Result<(Tensor, Tensor), Error> {
        let path = folder_paths.resolve_file(image_path)?;

        let frames = decode_frames(&path)?;
        debug!("load image {}, frames: {}", path.display(), frames.len());

        frames_to_batch(&frames, &self.device)
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    use super::*;

    fn node() -> ParamImage {
        ParamImage {
            device: Device::Cpu,
        }
    }

    #[test]
    fn test_nonexistent_is_not_found() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let folder_paths = FolderPaths::from_base_directory(dir.path());

        let result = node().load_image(&folder_paths, "nonexistent.png");
        assert!(matches!(result, Err(Error::FileNotFound(_))));
        Ok(())
    }

    #[test]
    fn test_relative_path() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir(dir.path().join("input"))?;
        RgbImage::from_pixel(8, 4, Rgb([0, 255, 0])).save(dir.path().join("input/green.png"))?;

        let folder_paths = FolderPaths::from_base_directory(dir.path());
        let (images, masks) = node().load_image(&folder_paths, "input/green.png")?;

        assert_eq!(images.dims(), &[1, 4, 8, 3]);
        // 无 alpha 通道
        assert_eq!(masks.dims(), &[1, 64, 64]);
        Ok(())
    }

    #[test]
    fn test_absolute_path_with_alpha() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("alpha.png");
        RgbaImage::from_pixel(3, 5, Rgba([0, 0, 255, 0])).save(&path)?;

        // 基础路径不影响绝对路径
        let folder_paths = FolderPaths::from_base_directory("/nonexistent");
        let (images, masks) = node().load_image(&folder_paths, &path.to_string_lossy())?;

        assert_eq!(images.dims(), &[1, 5, 3, 3]);
        assert_eq!(masks.dims(), &[1, 5, 3]);
        assert_eq!(masks.mean_all()?.to_scalar::<f32>()?, 1.0);
        Ok(())
    }

    #[test]
    fn test_unreadable_image_is_decode_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("broken.jpg"), [0u8, 1, 2, 3])?;

        let folder_paths = FolderPaths::from_base_directory(dir.path());
        let result = node().load_image(&folder_paths, "broken.jpg");
        assert!(matches!(result, Err(Error::DecodeImage(_))));
        Ok(())
    }
}
