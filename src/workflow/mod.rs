//! 工作流参数覆盖
//!
//! 供后端在提交前修改 API 格式工作流中的参数节点

use indexmap::IndexMap;
use log::info;
use pyo3::{
    pyfunction,
    types::{PyDict, PyModule, PyModuleMethods},
    wrap_pyfunction, Bound, PyAny, PyResult, Python,
};
use pythonize::{depythonize, pythonize};
use serde_json::Value;

use crate::{error::Error, wrapper::comfy::folder_paths::FolderPaths};

mod api_prompt;
pub use api_prompt::{ApiNode, ApiPrompt, InputValue, NodeMeta};

/// 工作流模块
pub fn submodule(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let submodule = PyModule::new(py, "workflow")?;
    submodule.add_function(wrap_pyfunction!(set_params, &submodule)?)?;
    submodule.add_function(wrap_pyfunction!(evaluate, &submodule)?)?;
    Ok(submodule)
}

/// 按标题批量覆盖参数, 返回新的工作流 json
///
/// params: {标题: 值}
pub fn apply_params(prompt: &str, params: IndexMap<String, Value>) -> Result<String, Error> {
    let mut prompt = ApiPrompt::from_json(prompt)?;
    for (title, value) in params {
        let node_id = prompt.set_param(&title, value)?;
        info!("set param {title} on node {node_id}");
    }
    prompt.to_json()
}

#[pyfunction]
fn set_params(prompt: &str, params: Bound<'_, PyDict>) -> PyResult<String> {
    let params: IndexMap<String, Value> = depythonize(&params)?;
    Ok(apply_params(prompt, params)?)
}

#[pyfunction]
fn evaluate<'py>(py: Python<'py>, prompt: &str, node_id: &str) -> PyResult<Bound<'py, PyAny>> {
    let prompt = ApiPrompt::from_json(prompt)?;
    let value = prompt.evaluate_node(node_id, &FolderPaths::from_comfy(py))?;
    Ok(pythonize(py, &value)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_apply_params() -> anyhow::Result<()> {
        let prompt = json!({
            "1": {
                "class_type": "ParamString",
                "inputs": { "value": "x" },
                "_meta": { "title": "prompt" }
            },
            "2": {
                "class_type": "ParamInt",
                "inputs": { "value": 1 },
                "_meta": { "title": "seed" }
            }
        });

        let params = IndexMap::from([
            ("prompt".to_string(), json!("y")),
            ("seed".to_string(), json!(7)),
        ]);
        let output = apply_params(&prompt.to_string(), params)?;
        let output: Value = serde_json::from_str(&output)?;

        assert_eq!(output["1"]["inputs"]["value"], json!("y"));
        assert_eq!(output["2"]["inputs"]["value"], json!(7));
        assert_eq!(output["1"]["_meta"]["title"], json!("prompt"));
        Ok(())
    }

    #[test]
    fn test_apply_unknown_title() {
        let result = apply_params(r#"{}"#, IndexMap::from([("seed".to_string(), json!(1))]));
        assert!(matches!(result, Err(Error::NodeNotFound(_))));
    }

    #[test]
    fn test_apply_invalid_json() {
        let result = apply_params("not json", IndexMap::new());
        assert!(matches!(result, Err(Error::SerdeJsonError(_))));
    }
}
