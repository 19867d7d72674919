// ==========================================
// 对象构造器 - 参数匹配引擎
// ==========================================
// 职责: 按已选 ТЭП 与用户目标值过滤参考对象
// 输入: 对象类型 + 已选参数 + 用户值
// 输出: 匹配对象列表 + 唯一匹配 / 无匹配信号
// 红线: 纯函数（除目录只读访问外无副作用）；相同输入必然相同输出
// ==========================================

use crate::catalog::CatalogProvider;
use crate::domain::{Parameter, SystemObject};
use crate::engine::matching_core::MatchingCore;
use crate::engine::parameter_selection::UserValues;
use std::sync::Arc;

/// 匹配引擎配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchingConfig {
    /// 数值容差比例（以对象值为基数）
    pub tolerance_ratio: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            tolerance_ratio: 0.1,
        }
    }
}

/// 一次过滤的结果
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// 对象类型
    pub object_type: String,
    /// 匹配的对象（目录顺序）
    pub objects: Vec<SystemObject>,
    /// 是否应用了参数过滤（未选任何参数时为 false）
    pub filtered: bool,
}

impl MatchOutcome {
    /// 匹配数量
    pub fn count(&self) -> usize {
        self.objects.len()
    }

    /// 无匹配（仅在应用了过滤时成立）
    pub fn is_no_match(&self) -> bool {
        self.filtered && self.objects.is_empty()
    }

    /// 唯一匹配（仅在应用了过滤时成立）
    pub fn singleton(&self) -> Option<&SystemObject> {
        if self.filtered && self.objects.len() == 1 {
            self.objects.first()
        } else {
            None
        }
    }

    /// 匹配对象 id 列表
    pub fn object_ids(&self) -> Vec<&str> {
        self.objects.iter().map(|o| o.id.as_str()).collect()
    }

    /// 是否包含指定对象
    pub fn contains(&self, object_id: &str) -> bool {
        self.objects.iter().any(|o| o.id == object_id)
    }
}

// ==========================================
// MatchingEngine - 参数匹配引擎
// ==========================================
pub struct MatchingEngine {
    catalog: Arc<dyn CatalogProvider>,
    config: MatchingConfig,
}

impl MatchingEngine {
    pub fn new(catalog: Arc<dyn CatalogProvider>, config: MatchingConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// 过滤参考对象
    ///
    /// # 规则
    /// 1. 候选集 = 目录中 type == object_type 的对象
    /// 2. 未选任何参数 → 返回完整候选集（不判定无匹配/唯一匹配）
    /// 3. 否则对象须满足全部已选参数的判据（见 MatchingCore::evaluate_criterion）
    ///
    /// # 参数
    /// - object_type: 对象类型 id
    /// - selected: 已选参数（按选择顺序，id 唯一）
    /// - user_values: 参数 id → 用户输入值
    pub fn filter(
        &self,
        object_type: &str,
        selected: &[Parameter],
        user_values: &UserValues,
    ) -> MatchOutcome {
        let candidates = self.catalog.objects(object_type);

        if selected.is_empty() {
            tracing::debug!(
                "未选择参数，返回完整候选集: type={}, count={}",
                object_type,
                candidates.len()
            );
            return MatchOutcome {
                object_type: object_type.to_string(),
                objects: candidates.to_vec(),
                filtered: false,
            };
        }

        let objects: Vec<SystemObject> = candidates
            .iter()
            .filter(|obj| self.matches_all(obj, selected, user_values))
            .cloned()
            .collect();

        tracing::debug!(
            "匹配完成: type={}, selected={}, matched={}",
            object_type,
            selected.len(),
            objects.len()
        );

        MatchOutcome {
            object_type: object_type.to_string(),
            objects,
            filtered: true,
        }
    }

    fn matches_all(
        &self,
        object: &SystemObject,
        selected: &[Parameter],
        user_values: &UserValues,
    ) -> bool {
        selected.iter().all(|param| {
            let outcome = MatchingCore::evaluate_criterion(
                object,
                &param.id,
                user_values.get(&param.id).map(String::as_str),
                self.config.tolerance_ratio,
            );
            if !outcome.matched {
                tracing::trace!(
                    "对象被排除: object={}, parameter={}, kind={:?}",
                    object.id,
                    param.id,
                    outcome.kind
                );
            }
            outcome.matched
        })
    }
}
