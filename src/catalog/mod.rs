// ==========================================
// 对象构造器 - 目录层
// ==========================================
// 职责: 提供只读参考数据（内置或 JSON 文件）
// 红线: 构造后不可变；查询不报错
// ==========================================

pub mod builtin;
pub mod error;
pub mod store;

pub use error::CatalogError;
pub use store::{CatalogData, CatalogProvider, StaticCatalog};
