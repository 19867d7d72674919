// ==========================================
// 对象构造器 - 对象领域模型
// ==========================================
// 对象类型 / ТЭП 参数 / 参考对象 / 子对象 / 创建结果
// 用途: 目录层加载，引擎层只读，向导层组装创建请求
// ==========================================

use crate::domain::types::ParamValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

// ==========================================
// ObjectType - 对象类型（目录分类）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    pub id: String,    // 类型标识（如 compressor）
    pub label: String, // 显示名称
    pub count: u32,    // 目录中声明的数量
}

impl ObjectType {
    pub fn new(id: &str, label: &str, count: u32) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            count,
        }
    }
}

// ==========================================
// Parameter - ТЭП 参数
// ==========================================
// 作为参数定义时 value 是参考值（默认值）
// 挂在 SystemObject 上时 value 是该对象的实际特性值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: String,
    pub name: String,
    pub value: ParamValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Parameter {
    pub fn new(id: &str, name: &str, value: impl Into<ParamValue>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            value: value.into(),
            unit: None,
        }
    }
}

// ==========================================
// SystemObject - 参考对象（目录条目）
// ==========================================
// 红线: characteristics 中参数 id 唯一（目录加载时校验）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemObject {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(default)]
    pub characteristics: Vec<Parameter>,
}

impl SystemObject {
    /// 按参数 id 查找特性
    pub fn characteristic(&self, parameter_id: &str) -> Option<&Parameter> {
        self.characteristics.iter().find(|c| c.id == parameter_id)
    }

    /// 返回第一个重复的特性 id（无重复返回 None）
    pub fn duplicate_characteristic(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.characteristics
            .iter()
            .find(|c| !seen.insert(c.id.as_str()))
            .map(|c| c.id.as_str())
    }
}

// ==========================================
// SubObject - 子对象（组件目录条目）
// ==========================================
// selected / count 由用户在最后一步修改
// 红线: count >= 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubObject {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String, // 子对象类型（如 "Система управления"）
    #[serde(default)]
    pub characteristics: Vec<Parameter>,
    pub count: u32,
    #[serde(default)]
    pub selected: bool,
}

// ==========================================
// CreationRequest - 创建请求
// ==========================================
// 向导完成时组装，交给 ObjectFinalizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreationRequest {
    pub object_type: ObjectType,
    pub object_name: String,
    pub source_object: SystemObject,
    pub parameters: Vec<Parameter>,
    pub user_values: BTreeMap<String, String>,
    pub sub_objects: Vec<SubObject>,
}

// ==========================================
// CreatedObject - 创建结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedObject {
    pub id: String, // 生成的标识（OBJ-xxxx）
    pub name: String,
    pub object_type: ObjectType,
    pub source_object_id: String,
    pub parameters: Vec<Parameter>,
    pub user_values: BTreeMap<String, String>,
    pub sub_objects: Vec<SubObject>,
    pub created_at: DateTime<Utc>,
}

impl CreatedObject {
    /// 由创建请求和生成的标识组装
    pub fn from_request(id: String, request: CreationRequest) -> Self {
        Self {
            id,
            name: request.object_name,
            object_type: request.object_type,
            source_object_id: request.source_object.id,
            parameters: request.parameters,
            user_values: request.user_values,
            sub_objects: request.sub_objects,
            created_at: Utc::now(),
        }
    }
}
