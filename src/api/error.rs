// ==========================================
// 对象构造器 - API层错误类型
// ==========================================
// 职责: 定义向导 API 错误类型，转换目录/配置错误为用户可读的错误消息
// 说明: 无匹配、区间格式错误等属于提示状态，不是错误
// ==========================================

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 向导流程错误
    // ==========================================
    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("无法前进: {0}")]
    NavigationBlocked(String),

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("对象创建已取消: {0}")]
    CreationCancelled(String),

    // ==========================================
    // 基础设施错误
    // ==========================================
    #[error("目录错误: {0}")]
    CatalogError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::CatalogError(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidValue { key, value, message } => {
                ApiError::InvalidInput(format!("{}={}: {}", key, value, message))
            }
            other => ApiError::ConfigError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
