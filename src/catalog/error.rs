// ==========================================
// 对象构造器 - 目录模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 目录加载错误类型
///
/// 仅在构造目录时出现；构造完成后的查询永不失败
#[derive(Error, Debug)]
pub enum CatalogError {
    // ===== 文件相关错误 =====
    #[error("目录文件读取失败 ({path}): {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("目录 JSON 解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    // ===== 数据约束错误 =====
    #[error("对象特性重复: object_id={object_id}, parameter_id={parameter_id}")]
    DuplicateCharacteristic {
        object_id: String,
        parameter_id: String,
    },

    #[error("子对象数量无效: sub_object_id={sub_object_id}, count={count}（必须 >= 1）")]
    InvalidSubObjectCount { sub_object_id: String, count: u32 },
}
