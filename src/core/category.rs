//! 节点分类

/// 参数输入
pub const CATEGORY_PARAMS_INPUT: &str = "Params/Input";
/// 辅助逻辑
pub const CATEGORY_HELPERS_LOGIC: &str = "Helpers/Logic";
