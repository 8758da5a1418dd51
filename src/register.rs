//! 节点注册表
//!
//! 节点类型标识 -> 节点定义 (显示名称, 分类, 入口函数, 输入输出声明)

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{
    core::{
        category::{CATEGORY_HELPERS_LOGIC, CATEGORY_PARAMS_INPUT},
        node_base::{InputSpec, OutputSpec},
    },
    error::Error,
    logic::HelperModelSwitch,
    params::{ParamBoolean, ParamFloat, ParamImage, ParamInt, ParamString, ParamUniversal},
};

/// 节点类型, 字符串形式即工作流中的 class_type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, IntoStaticStr,
)]
pub enum NodeKind {
    ParamString,
    ParamInt,
    ParamFloat,
    ParamBoolean,
    ParamUniversal,
    ParamImage,
    HelperModelSwitch,
}

/// 节点定义
#[derive(Debug)]
pub struct NodeDefinition {
    pub identifier: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub function: &'static str,
    pub inputs: InputSpec,
    pub outputs: OutputSpec,
}

impl NodeKind {
    /// 按 class_type 查找节点类型
    pub fn lookup(class_type: &str) -> Result<Self, Error> {
        class_type
            .parse::<NodeKind>()
            .map_err(|e| Error::ParseEnumString(format!("{class_type}, {e}")))
    }

    pub fn identifier(self) -> &'static str {
        self.into()
    }

    /// 前端显示名称
    pub fn display_name(self) -> &'static str {
        match self {
            NodeKind::ParamString => "String Param",
            NodeKind::ParamInt => "Integer Param",
            NodeKind::ParamFloat => "Float Param",
            NodeKind::ParamBoolean => "Boolean Param",
            NodeKind::ParamUniversal => "Universal Param (for Combos)",
            NodeKind::ParamImage => "Image Path Param",
            NodeKind::HelperModelSwitch => "Model Switch",
        }
    }

    pub fn category(self) -> &'static str {
        match self {
            NodeKind::HelperModelSwitch => CATEGORY_HELPERS_LOGIC,
            _ => CATEGORY_PARAMS_INPUT,
        }
    }

    /// 执行入口函数名 (FUNCTION)
    pub fn function(self) -> &'static str {
        match self {
            NodeKind::ParamImage => "load_image",
            NodeKind::HelperModelSwitch => "switch",
            _ => "get_value",
        }
    }

    /// 可由外部覆盖的参数输入名, 切换节点没有
    pub fn value_input(self) -> Option<&'static str> {
        match self {
            NodeKind::ParamImage => Some("image_path"),
            NodeKind::HelperModelSwitch => None,
            _ => Some("value"),
        }
    }

    pub fn definition(self) -> NodeDefinition {
        let (inputs, outputs) = match self {
            NodeKind::ParamString => (ParamString::input_spec(), ParamString::output_spec()),
            NodeKind::ParamInt => (ParamInt::input_spec(), ParamInt::output_spec()),
            NodeKind::ParamFloat => (ParamFloat::input_spec(), ParamFloat::output_spec()),
            NodeKind::ParamBoolean => (ParamBoolean::input_spec(), ParamBoolean::output_spec()),
            NodeKind::ParamUniversal => {
                (ParamUniversal::input_spec(), ParamUniversal::output_spec())
            }
            NodeKind::ParamImage => (ParamImage::input_spec(), ParamImage::output_spec()),
            NodeKind::HelperModelSwitch => (
                HelperModelSwitch::input_spec(),
                HelperModelSwitch::output_spec(),
            ),
        };

        NodeDefinition {
            identifier: self.identifier(),
            display_name: self.display_name(),
            category: self.category(),
            function: self.function(),
            inputs,
            outputs,
        }
    }
}
