// ==========================================
// 对象构造器 - 领域类型定义
// ==========================================
// 参数值、向导步骤等基础枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 参数值 (Parameter Value)
// ==========================================
// 数值 / 区间字符串 ("0.5 - 0.9") / 任意文本
// 序列化格式: untagged，与目录 JSON 中的 2.5 / "0.5 - 0.9" 一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64 的 Display 输出最短十进制表示: 3.0 → "3", 2.5 → "2.5"
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

// ==========================================
// 向导步骤 (Wizard Step)
// ==========================================
// 线性状态机: SELECT_TYPE → SELECT_PARAMETERS → SELECT_SUB_OBJECTS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardStep {
    SelectType,       // 选择对象类型
    SelectParameters, // 选择 ТЭП 并匹配参考对象
    SelectSubObjects, // 选择子对象及数量
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::SelectType => "SELECT_TYPE",
            WizardStep::SelectParameters => "SELECT_PARAMETERS",
            WizardStep::SelectSubObjects => "SELECT_SUB_OBJECTS",
        }
    }

    /// 下一步（最后一步返回 None）
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::SelectType => Some(WizardStep::SelectParameters),
            WizardStep::SelectParameters => Some(WizardStep::SelectSubObjects),
            WizardStep::SelectSubObjects => None,
        }
    }

    /// 上一步（第一步返回 None）
    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::SelectType => None,
            WizardStep::SelectParameters => Some(WizardStep::SelectType),
            WizardStep::SelectSubObjects => Some(WizardStep::SelectParameters),
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::SelectType
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
