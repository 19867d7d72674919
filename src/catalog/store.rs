// ==========================================
// 对象构造器 - 目录存储
// ==========================================
// 职责: 只读数据提供者（类型 / 参数定义 / 参考对象 / 子对象模板）
// 红线: 显式构造后注入，不做进程级单例；未知类型返回空序列，不报错
// ==========================================

use crate::catalog::builtin;
use crate::catalog::error::CatalogError;
use crate::domain::{ObjectType, Parameter, SubObject, SystemObject};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// ==========================================
// CatalogProvider Trait
// ==========================================
// 用途: 匹配引擎与向导控制器依赖的目录读取接口
// 实现者: StaticCatalog
pub trait CatalogProvider: Send + Sync {
    /// 全部对象类型（目录顺序）
    fn object_types(&self) -> &[ObjectType];

    /// 该类型的 ТЭП 参数定义
    fn parameter_definitions(&self, type_id: &str) -> &[Parameter];

    /// 该类型的参考对象
    fn objects(&self, type_id: &str) -> &[SystemObject];

    /// 该类型的子对象模板
    fn sub_object_templates(&self, type_id: &str) -> &[SubObject];

    /// 按 id 查找对象类型
    fn object_type(&self, type_id: &str) -> Option<&ObjectType> {
        self.object_types().iter().find(|t| t.id == type_id)
    }
}

// ==========================================
// CatalogData - 目录文件格式
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub object_types: Vec<ObjectType>,
    #[serde(default)]
    pub parameters_by_type: BTreeMap<String, Vec<Parameter>>,
    #[serde(default)]
    pub system_objects: Vec<SystemObject>,
    #[serde(default)]
    pub sub_objects_by_type: BTreeMap<String, Vec<SubObject>>,
}

// ==========================================
// StaticCatalog - 不可变目录
// ==========================================
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    object_types: Vec<ObjectType>,
    parameters_by_type: BTreeMap<String, Vec<Parameter>>,
    objects_by_type: BTreeMap<String, Vec<SystemObject>>,
    sub_objects_by_type: BTreeMap<String, Vec<SubObject>>,
}

impl StaticCatalog {
    /// 内置参考目录
    pub fn builtin() -> Self {
        // 内置数据满足全部约束，这里直接建索引
        Self::index(builtin::reference_data())
    }

    /// 从目录数据构造（校验约束）
    ///
    /// # 校验
    /// - 同一对象的特性 id 不得重复
    /// - 子对象模板 count >= 1
    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        for obj in &data.system_objects {
            if let Some(dup) = obj.duplicate_characteristic() {
                return Err(CatalogError::DuplicateCharacteristic {
                    object_id: obj.id.clone(),
                    parameter_id: dup.to_string(),
                });
            }
        }

        for sub in data.sub_objects_by_type.values().flatten() {
            if sub.count < 1 {
                return Err(CatalogError::InvalidSubObjectCount {
                    sub_object_id: sub.id.clone(),
                    count: sub.count,
                });
            }
        }

        Ok(Self::index(data))
    }

    /// 从 JSON 字符串构造
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// 从 JSON 文件构造
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::FileRead {
            path: path.display().to_string(),
            source,
        })?;

        let catalog = Self::from_json_str(&raw)?;
        tracing::info!(
            "目录已加载: path={}, types={}",
            path.display(),
            catalog.object_types.len()
        );
        Ok(catalog)
    }

    /// 导出为目录数据（可再序列化为 JSON）
    pub fn to_data(&self) -> CatalogData {
        CatalogData {
            object_types: self.object_types.clone(),
            parameters_by_type: self.parameters_by_type.clone(),
            system_objects: self.objects_by_type.values().flatten().cloned().collect(),
            sub_objects_by_type: self.sub_objects_by_type.clone(),
        }
    }

    fn index(data: CatalogData) -> Self {
        let mut objects_by_type: BTreeMap<String, Vec<SystemObject>> = BTreeMap::new();
        for obj in data.system_objects {
            objects_by_type
                .entry(obj.object_type.clone())
                .or_default()
                .push(obj);
        }

        Self {
            object_types: data.object_types,
            parameters_by_type: data.parameters_by_type,
            objects_by_type,
            sub_objects_by_type: data.sub_objects_by_type,
        }
    }
}

impl CatalogProvider for StaticCatalog {
    fn object_types(&self) -> &[ObjectType] {
        &self.object_types
    }

    fn parameter_definitions(&self, type_id: &str) -> &[Parameter] {
        self.parameters_by_type
            .get(type_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn objects(&self, type_id: &str) -> &[SystemObject] {
        self.objects_by_type
            .get(type_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn sub_object_templates(&self, type_id: &str) -> &[SubObject] {
        self.sub_objects_by_type
            .get(type_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
