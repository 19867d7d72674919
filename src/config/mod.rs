// ==========================================
// 对象构造器 - 配置层
// ==========================================
// 职责: 向导配置加载，支持文件 + 环境变量覆写
// ==========================================

pub mod wizard_config;

// 重导出核心配置
pub use wizard_config::{config_keys, ConfigError, WizardConfig};
