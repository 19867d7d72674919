// ==========================================
// 对象构造器 - API 层
// ==========================================
// 职责: 向导步骤控制与对象创建接口，供视图层 / CLI 调用
// ==========================================

pub mod error;
pub mod finalizer;
pub mod wizard_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use finalizer::{CreationJob, ObjectFinalizer, SimulatedFinalizer};
pub use wizard_api::{WizardApi, DEFAULT_OBJECT_NAME};
