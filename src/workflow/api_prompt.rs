//! API 格式的工作流 (prompt)
//!
//! ```json
//! {
//!   "6": {
//!     "class_type": "ParamString",
//!     "inputs": { "value": "a cat" },
//!     "_meta": { "title": "prompt" }
//!   },
//!   "3": {
//!     "class_type": "KSampler",
//!     "inputs": { "positive": ["6", 0], "seed": 42 }
//!   }
//! }
//! ```
//!
//! 后端按标题或 class_type 找到参数节点, 覆盖其输入值后重新提交

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    core::range::OutOfRange,
    error::Error,
    logic::HelperModelSwitch,
    params::{ParamBoolean, ParamFloat, ParamInt, ParamString, ParamUniversal},
    register::NodeKind,
    wrapper::comfy::folder_paths::FolderPaths,
};

/// 节点输入, 连接或字面值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    /// [节点id, 输出序号]
    Link(String, u32),
    Literal(Value),
}

/// 节点元信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMeta {
    #[serde(default)]
    pub title: String,
}

/// 工作流节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiNode {
    pub class_type: String,
    #[serde(default)]
    pub inputs: IndexMap<String, InputValue>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<NodeMeta>,
    /// 其他字段原样保留
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiNode {
    pub fn title(&self) -> Option<&str> {
        self.meta.as_ref().map(|meta| meta.title.as_str())
    }

    /// 获取字面值输入
    pub fn literal(&self, name: &str) -> Result<&Value, Error> {
        match self.inputs.get(name) {
            Some(InputValue::Literal(value)) => Ok(value),
            Some(InputValue::Link(node_id, slot)) => Err(Error::LinkedInput(format!(
                "{name} -> [{node_id}, {slot}]"
            ))),
            None => Err(Error::InputNotFound(name.to_string())),
        }
    }

    /// 获取可选的字面值输入, 未设置或为 null 时返回 None
    fn optional_literal(&self, name: &str) -> Result<Option<&Value>, Error> {
        match self.inputs.get(name) {
            None | Some(InputValue::Literal(Value::Null)) => Ok(None),
            Some(_) => self.literal(name).map(Some),
        }
    }

    /// 获取可选的字符串输入
    fn optional_str(&self, name: &str) -> Result<Option<&str>, Error> {
        self.optional_literal(name)?
            .map(|v| as_str(name, v))
            .transpose()
    }
}

/// API 格式工作流, 节点 id -> 节点
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiPrompt {
    nodes: IndexMap<String, ApiNode>,
}

impl ApiPrompt {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn node(&self, node_id: &str) -> Option<&ApiNode> {
        self.nodes.get(node_id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, &ApiNode)> {
        self.nodes.iter().map(|(id, node)| (id.as_str(), node))
    }

    /// 按 class_type 查找节点
    pub fn nodes_by_class_type<'a>(
        &'a self,
        class_type: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a ApiNode)> {
        self.nodes().filter(move |(_, node)| node.class_type == class_type)
    }

    /// 按标题查找节点, 标题重复时返回第一个
    pub fn node_by_title(&self, title: &str) -> Option<(&str, &ApiNode)> {
        self.nodes().find(|(_, node)| node.title() == Some(title))
    }

    /// 覆盖节点的字面值输入
    ///
    /// 连接到其他节点的输入不允许覆盖
    pub fn set_input(&mut self, node_id: &str, name: &str, value: Value) -> Result<(), Error> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| Error::NodeNotFound(node_id.to_string()))?;

        if let Some(InputValue::Link(from, slot)) = node.inputs.get(name) {
            return Err(Error::LinkedInput(format!(
                "{node_id}.{name} -> [{from}, {slot}]"
            )));
        }

        debug!("set input {node_id}.{name} = {value}");
        node.inputs
            .insert(name.to_string(), InputValue::Literal(value));
        Ok(())
    }

    /// 按标题覆盖参数节点的值, 返回节点 id
    pub fn set_param(&mut self, title: &str, value: Value) -> Result<String, Error> {
        let (node_id, node) = self
            .node_by_title(title)
            .ok_or_else(|| Error::NodeNotFound(title.to_string()))?;

        let kind = NodeKind::lookup(&node.class_type)?;
        let input = kind.value_input().ok_or_else(|| {
            Error::TypeNotSupported(format!("{kind} has no overridable value"))
        })?;

        let node_id = node_id.to_string();
        self.set_input(&node_id, input, value)?;
        Ok(node_id)
    }

    /// 计算单个节点的输出
    ///
    /// 只处理输入全部为字面值的节点, 不跟随连接.
    /// ParamImage 输出解析后的文件路径, 不解码图片.
    pub fn evaluate_node(&self, node_id: &str, folder_paths: &FolderPaths) -> Result<Value, Error> {
        let node = self
            .node(node_id)
            .ok_or_else(|| Error::NodeNotFound(node_id.to_string()))?;
        let kind = NodeKind::lookup(&node.class_type)?;

        let output = match kind {
            NodeKind::ParamString => {
                let value = as_str("value", node.literal("value")?)?;
                Value::from(ParamString::get_value(value.to_string()))
            }
            NodeKind::ParamUniversal => {
                let value = as_str("value", node.literal("value")?)?;
                Value::from(ParamUniversal::get_value(value.to_string()))
            }
            NodeKind::ParamInt => {
                let value = as_i128("value", node.literal("value")?)?;
                let policy = OutOfRange::parse_optional(node.optional_str("out_of_range")?)?;
                int_to_json(ParamInt::get_value(value, policy)?)?
            }
            NodeKind::ParamFloat => {
                let value = node.literal("value")?;
                let value = value
                    .as_f64()
                    .ok_or_else(|| type_error("value", "FLOAT", value))?;
                let policy = OutOfRange::parse_optional(node.optional_str("out_of_range")?)?;
                Value::from(ParamFloat::get_value(value, policy)?)
            }
            NodeKind::ParamBoolean => {
                let value = node.literal("value")?;
                let value = value
                    .as_bool()
                    .ok_or_else(|| type_error("value", "BOOLEAN", value))?;
                Value::from(ParamBoolean::get_value(value))
            }
            NodeKind::ParamImage => {
                let image_path = as_str("image_path", node.literal("image_path")?)?;
                let path = folder_paths.resolve_file(image_path)?;
                Value::from(path.to_string_lossy().to_string())
            }
            NodeKind::HelperModelSwitch => {
                let select_a = node.literal("select_a")?;
                let select_a = select_a
                    .as_bool()
                    .ok_or_else(|| type_error("select_a", "BOOLEAN", select_a))?;
                let model_a = node.optional_literal("model_a")?.cloned();
                let model_b = node.optional_literal("model_b")?.cloned();
                HelperModelSwitch::switch(model_a, model_b, select_a)?
            }
        };

        Ok(output)
    }
}

fn type_error(name: &str, expected: &str, value: &Value) -> Error {
    Error::InvalidValue(format!("{name} expects {expected}, got {value}"))
}

fn as_str<'a>(name: &str, value: &'a Value) -> Result<&'a str, Error> {
    value
        .as_str()
        .ok_or_else(|| type_error(name, "STRING", value))
}

fn as_i128(name: &str, value: &Value) -> Result<i128, Error> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
        .ok_or_else(|| type_error(name, "INT", value))
}

/// 结果已限制在声明范围内, 一定能放入 u64 或 i64
fn int_to_json(value: i128) -> Result<Value, Error> {
    if let Ok(v) = u64::try_from(value) {
        return Ok(Value::from(v));
    }
    i64::try_from(value)
        .map(Value::from)
        .map_err(|_| Error::InvalidValue(format!("{value} does not fit in a json number")))
}
