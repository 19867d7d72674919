// ==========================================
// 对象构造器 - ТЭП 参数选择状态
// ==========================================
// 职责: 维护参数选择步骤内的已选参数与用户值
// 红线: user_values 只包含已选参数；取消选择时同步删除其用户值
// ==========================================

use crate::domain::Parameter;
use std::collections::BTreeMap;

/// 参数 id → 用户输入值
pub type UserValues = BTreeMap<String, String>;

/// 参数勾选结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleResult {
    Selected,
    Deselected,
}

/// 参数选择状态（随对象类型创建，离开步骤即丢弃）
#[derive(Debug, Clone, Default)]
pub struct ParameterSelection {
    object_type: String,
    definitions: Vec<Parameter>,
    selected: Vec<Parameter>,
    user_values: UserValues,
    search_term: String,
}

impl ParameterSelection {
    /// 创建参数选择状态
    ///
    /// # 参数
    /// - object_type: 对象类型 id
    /// - definitions: 该类型的参数定义
    pub fn new(object_type: &str, definitions: Vec<Parameter>) -> Self {
        Self {
            object_type: object_type.to_string(),
            definitions,
            ..Default::default()
        }
    }

    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    /// 全部参数定义
    pub fn definitions(&self) -> &[Parameter] {
        &self.definitions
    }

    /// 已选参数（按勾选顺序）
    pub fn selected(&self) -> &[Parameter] {
        &self.selected
    }

    pub fn user_values(&self) -> &UserValues {
        &self.user_values
    }

    pub fn user_value(&self, parameter_id: &str) -> Option<&str> {
        self.user_values.get(parameter_id).map(String::as_str)
    }

    pub fn is_selected(&self, parameter_id: &str) -> bool {
        self.selected.iter().any(|p| p.id == parameter_id)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// 按当前搜索词可见的参数定义
    ///
    /// 名称包含搜索词（不区分大小写）；搜索词为空白时返回全部
    pub fn visible(&self) -> Vec<&Parameter> {
        let term = self.search_term.trim().to_lowercase();
        if term.is_empty() {
            return self.definitions.iter().collect();
        }
        self.definitions
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&term))
            .collect()
    }

    /// 设置搜索词，返回可见参数
    pub fn search(&mut self, term: &str) -> Vec<&Parameter> {
        self.search_term = term.to_string();
        self.visible()
    }

    /// 勾选 / 取消勾选参数
    ///
    /// # 规则
    /// - 勾选: 追加到已选列表，用户值初始化为参数定义值
    /// - 取消: 从已选列表移除，并删除其用户值
    ///
    /// # 返回
    /// - None: 参数不属于该类型
    pub fn toggle(&mut self, parameter_id: &str) -> Option<ToggleResult> {
        if self.is_selected(parameter_id) {
            self.selected.retain(|p| p.id != parameter_id);
            self.user_values.remove(parameter_id);
            return Some(ToggleResult::Deselected);
        }

        let definition = self
            .definitions
            .iter()
            .find(|p| p.id == parameter_id)?
            .clone();

        self.user_values
            .insert(definition.id.clone(), definition.value.to_string());
        self.selected.push(definition);
        Some(ToggleResult::Selected)
    }

    /// 设置用户值
    ///
    /// # 返回
    /// - false: 参数未勾选（值不写入）
    pub fn set_value(&mut self, parameter_id: &str, value: &str) -> bool {
        if !self.is_selected(parameter_id) {
            return false;
        }
        self.user_values
            .insert(parameter_id.to_string(), value.to_string());
        true
    }

    /// 清除步骤内的临时状态: 用户值与搜索词
    ///
    /// 已选参数列表保留；重新进入参数步骤时调用
    pub fn clear(&mut self) {
        self.user_values.clear();
        self.search_term.clear();
    }
}
