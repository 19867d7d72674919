// ==========================================
// 对象构造器 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含目录加载逻辑,不含匹配逻辑
// ==========================================

pub mod object;
pub mod types;

// 重导出核心类型
pub use object::{CreatedObject, CreationRequest, ObjectType, Parameter, SubObject, SystemObject};
pub use types::{ParamValue, WizardStep};
