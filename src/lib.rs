// ==========================================
// 对象构造器 - 核心库
// ==========================================
// 功能: 分步向导配置工业对象（压缩站、原油处理装置等）
// 核心: 按 ТЭП 参数匹配参考对象，收敛到唯一对象后继续
// 技术栈: Rust + tokio（创建进度任务）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "ru");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 目录层 - 只读参考数据
pub mod catalog;

// 引擎层 - 参数匹配 / 选择状态 / 创建进度
pub mod engine;

// 配置层 - 向导配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 向导控制器
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ParamValue, WizardStep};

// 领域实体
pub use domain::{CreatedObject, CreationRequest, ObjectType, Parameter, SubObject, SystemObject};

// 目录
pub use catalog::{CatalogError, CatalogProvider, StaticCatalog};

// 引擎
pub use engine::{MatchOutcome, MatchingConfig, MatchingEngine, ParameterSelection, UserValues};

// 配置
pub use config::{ConfigError, WizardConfig};

// API
pub use api::{ApiError, ApiResult, CreationJob, WizardApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Конструктор объектов";
