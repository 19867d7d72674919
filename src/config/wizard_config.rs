// ==========================================
// 对象构造器 - 向导配置
// ==========================================
// 职责: 配置加载、环境变量覆写、校验
// 优先级: 环境变量 > 配置文件 > 默认值
// 存储: <config_dir>/object-constructor/config.json
// ==========================================

use crate::catalog::{CatalogError, StaticCatalog};
use crate::engine::{MatchingConfig, ProgressConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置 JSON 解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("配置值无效: {key}={value} ({message})")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// WizardConfig - 向导配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// 提示信息语言（ru / en）
    pub locale: String,
    /// 数值容差比例
    pub tolerance_ratio: f64,
    /// 创建进度节拍（毫秒）
    pub progress_tick_ms: u64,
    /// 每个节拍推进的百分比
    pub progress_step: u8,
    /// 生成标识前缀
    pub id_prefix: String,
    /// 外部目录 JSON 文件（None 时使用内置目录）
    pub catalog_path: Option<PathBuf>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            locale: "ru".to_string(),
            tolerance_ratio: 0.1,
            progress_tick_ms: 300,
            progress_step: 10,
            id_prefix: "OBJ-".to_string(),
            catalog_path: None,
        }
    }
}

impl WizardConfig {
    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("object-constructor").join("config.json"))
    }

    /// 从 JSON 文件读取（缺失字段取默认值）
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// 加载配置: 默认路径文件（若存在）+ 进程环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        Self::load_with(path.as_deref(), |key| std::env::var(key).ok())
    }

    /// 加载配置
    ///
    /// # 参数
    /// - path: 配置文件路径（不存在时跳过）
    /// - lookup: 环境变量读取函数
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(p) if p.exists() => {
                tracing::info!("加载配置文件: {}", p.display());
                Self::from_file(p)?
            }
            _ => Self::default(),
        };

        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// 应用环境变量覆写（空值忽略）
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = get(config_keys::LOCALE) {
            self.locale = v;
        }
        if let Some(v) = get(config_keys::TOLERANCE_RATIO) {
            self.tolerance_ratio = parse_value(config_keys::TOLERANCE_RATIO, &v)?;
        }
        if let Some(v) = get(config_keys::PROGRESS_TICK_MS) {
            self.progress_tick_ms = parse_value(config_keys::PROGRESS_TICK_MS, &v)?;
        }
        if let Some(v) = get(config_keys::PROGRESS_STEP) {
            self.progress_step = parse_value(config_keys::PROGRESS_STEP, &v)?;
        }
        if let Some(v) = get(config_keys::ID_PREFIX) {
            self.id_prefix = v;
        }
        if let Some(v) = get(config_keys::CATALOG) {
            self.catalog_path = Some(PathBuf::from(v));
        }
        Ok(())
    }

    /// 校验配置取值范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance_ratio.is_finite() || self.tolerance_ratio < 0.0 {
            return Err(invalid(
                "tolerance_ratio",
                self.tolerance_ratio,
                "必须为非负有限数",
            ));
        }
        if self.progress_tick_ms == 0 {
            return Err(invalid("progress_tick_ms", self.progress_tick_ms, "必须大于 0"));
        }
        if !(1..=100).contains(&self.progress_step) {
            return Err(invalid("progress_step", self.progress_step, "必须在 1..=100 之间"));
        }
        if self.locale.trim().is_empty() {
            return Err(invalid("locale", &self.locale, "不能为空"));
        }
        Ok(())
    }

    pub fn matching_config(&self) -> MatchingConfig {
        MatchingConfig {
            tolerance_ratio: self.tolerance_ratio,
        }
    }

    pub fn progress_config(&self) -> ProgressConfig {
        ProgressConfig {
            tick: Duration::from_millis(self.progress_tick_ms),
            step: self.progress_step,
        }
    }

    /// 构造目录: 配置了 catalog_path 时从文件加载，否则使用内置目录
    pub fn load_catalog(&self) -> Result<StaticCatalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => StaticCatalog::from_json_file(path),
            None => Ok(StaticCatalog::builtin()),
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
        message: e.to_string(),
    })
}

fn invalid(key: &str, value: impl std::fmt::Display, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}

// ==========================================
// 环境变量键
// ==========================================
pub mod config_keys {
    pub const LOCALE: &str = "OBJECT_CONSTRUCTOR_LOCALE";
    pub const TOLERANCE_RATIO: &str = "OBJECT_CONSTRUCTOR_TOLERANCE_RATIO";

    // 创建进度
    pub const PROGRESS_TICK_MS: &str = "OBJECT_CONSTRUCTOR_PROGRESS_TICK_MS";
    pub const PROGRESS_STEP: &str = "OBJECT_CONSTRUCTOR_PROGRESS_STEP";
    pub const ID_PREFIX: &str = "OBJECT_CONSTRUCTOR_ID_PREFIX";

    // 目录
    pub const CATALOG: &str = "OBJECT_CONSTRUCTOR_CATALOG";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = WizardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.matching_config(), MatchingConfig::default());
        assert_eq!(config.progress_config(), ProgressConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            (config_keys::TOLERANCE_RATIO, "0.2"),
            (config_keys::PROGRESS_STEP, " 25 "),
            (config_keys::LOCALE, ""),
        ]);
        let mut config = WizardConfig::default();
        config.apply_overrides(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.tolerance_ratio, 0.2);
        assert_eq!(config.progress_step, 25);
        // 空值不覆写
        assert_eq!(config.locale, "ru");
    }

    #[test]
    fn test_unparsable_override_rejected() {
        let vars = env(&[(config_keys::PROGRESS_TICK_MS, "fast")]);
        let mut config = WizardConfig::default();
        let err = config.apply_overrides(|k| vars.get(k).cloned()).unwrap_err();
        match err {
            ConfigError::InvalidValue { key, value, .. } => {
                assert_eq!(key, config_keys::PROGRESS_TICK_MS);
                assert_eq!(value, "fast");
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_ranges() {
        let mut config = WizardConfig::default();
        config.tolerance_ratio = -0.1;
        assert!(config.validate().is_err());

        let mut config = WizardConfig::default();
        config.tolerance_ratio = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = WizardConfig::default();
        config.progress_tick_ms = 0;
        assert!(config.validate().is_err());

        let mut config = WizardConfig::default();
        config.progress_step = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config =
            WizardConfig::load_with(Some(Path::new("/nonexistent/config.json")), |_| None)
                .unwrap();
        assert_eq!(config, WizardConfig::default());
    }

    #[test]
    fn test_default_catalog_is_builtin() {
        use crate::catalog::CatalogProvider;
        let catalog = WizardConfig::default().load_catalog().unwrap();
        assert_eq!(catalog.object_types().len(), 4);
    }
}
