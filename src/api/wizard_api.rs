// ==========================================
// 对象构造器 - 向导 API
// ==========================================
// 职责: 线性步骤控制器，持有向导全部状态并控制前进
// 步骤: SELECT_TYPE → SELECT_PARAMETERS → SELECT_SUB_OBJECTS
// 红线: 不可跳步；离开某一步时清除该步及之后积累的状态
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::finalizer::{CreationJob, ObjectFinalizer, SimulatedFinalizer};
use crate::catalog::CatalogProvider;
use crate::config::WizardConfig;
use crate::domain::{CreationRequest, ObjectType, Parameter, SystemObject, WizardStep};
use crate::engine::{
    MatchEvent, MatchEventPublisher, MatchOutcome, MatchingEngine, OptionalEventPublisher,
    ParameterSelection, ProgressConfig, SubObjectSelection, ToggleResult, UserValues,
};
use crate::i18n;
use std::sync::Arc;

/// 新对象的默认名称（未选定参考对象名称时使用）
pub const DEFAULT_OBJECT_NAME: &str = "Новый объект";

/// 向导会话状态
#[derive(Debug, Default)]
struct WizardSession {
    step: WizardStep,
    object_type: Option<ObjectType>,
    parameters: Option<ParameterSelection>,
    last_match: Option<MatchOutcome>,
    selected_object: Option<SystemObject>,
    sub_objects: SubObjectSelection,
    object_name: String,
}

// ==========================================
// WizardApi - 向导控制器
// ==========================================
pub struct WizardApi {
    catalog: Arc<dyn CatalogProvider>,
    engine: MatchingEngine,
    publisher: OptionalEventPublisher,
    finalizer: Arc<dyn ObjectFinalizer>,
    progress_config: ProgressConfig,
    session: WizardSession,
}

impl WizardApi {
    /// 创建向导控制器
    ///
    /// # 参数
    /// - catalog: 只读目录
    /// - config: 向导配置（容差、进度节拍、标识前缀）
    pub fn new(catalog: Arc<dyn CatalogProvider>, config: &WizardConfig) -> Self {
        Self {
            engine: MatchingEngine::new(catalog.clone(), config.matching_config()),
            catalog,
            publisher: OptionalEventPublisher::none(),
            finalizer: Arc::new(SimulatedFinalizer::new(&config.id_prefix)),
            progress_config: config.progress_config(),
            session: WizardSession::default(),
        }
    }

    /// 设置匹配事件发布者
    pub fn with_publisher(mut self, publisher: Arc<dyn MatchEventPublisher>) -> Self {
        self.publisher = OptionalEventPublisher::with_publisher(publisher);
        self
    }

    /// 替换对象终结器
    pub fn with_finalizer(mut self, finalizer: Arc<dyn ObjectFinalizer>) -> Self {
        self.finalizer = finalizer;
        self
    }

    pub fn with_progress_config(mut self, config: ProgressConfig) -> Self {
        self.progress_config = config;
        self
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn step(&self) -> WizardStep {
        self.session.step
    }

    pub fn object_types(&self) -> &[ObjectType] {
        self.catalog.object_types()
    }

    pub fn selected_type(&self) -> Option<&ObjectType> {
        self.session.object_type.as_ref()
    }

    pub fn parameter_selection(&self) -> Option<&ParameterSelection> {
        self.session.parameters.as_ref()
    }

    /// 最近一次过滤结果
    pub fn last_match(&self) -> Option<&MatchOutcome> {
        self.session.last_match.as_ref()
    }

    pub fn match_count(&self) -> usize {
        self.session.last_match.as_ref().map_or(0, MatchOutcome::count)
    }

    pub fn selected_object(&self) -> Option<&SystemObject> {
        self.session.selected_object.as_ref()
    }

    pub fn sub_object_selection(&self) -> &SubObjectSelection {
        &self.session.sub_objects
    }

    pub fn object_name(&self) -> &str {
        &self.session.object_name
    }

    /// 当前提示信息（无匹配 / 该类型无参考对象）
    pub fn advisory(&self) -> Option<String> {
        if self.session.step != WizardStep::SelectParameters {
            return None;
        }
        let outcome = self.session.last_match.as_ref()?;
        if outcome.is_no_match() {
            Some(i18n::t("matching.no_match"))
        } else if outcome.objects.is_empty() {
            Some(i18n::t("matching.no_objects"))
        } else {
            None
        }
    }

    /// 能否从参数步骤前进: 已选定对象且当前匹配数为 1
    pub fn can_advance(&self) -> bool {
        self.session.step == WizardStep::SelectParameters
            && self.session.selected_object.is_some()
            && self.match_count() == 1
    }

    // ==========================================
    // 步骤 1: 选择对象类型
    // ==========================================

    /// 选择对象类型并进入参数步骤（执行一次未过滤的匹配）
    pub fn select_type(&mut self, type_id: &str) -> ApiResult<&MatchOutcome> {
        self.require_step(WizardStep::SelectType, "select_type")?;

        let object_type = self
            .catalog
            .object_type(type_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("对象类型(id={})不存在", type_id)))?;

        let definitions = self.catalog.parameter_definitions(type_id).to_vec();
        tracing::info!(
            "选择对象类型: type={}, parameters={}",
            object_type.id,
            definitions.len()
        );

        self.session.parameters = Some(ParameterSelection::new(type_id, definitions));
        self.session.object_type = Some(object_type);
        self.session.selected_object = None;
        self.session.step = WizardStep::SelectParameters;

        self.refilter();
        self.session
            .last_match
            .as_ref()
            .ok_or_else(|| ApiError::InternalError("匹配结果缺失".to_string()))
    }

    // ==========================================
    // 步骤 2: 选择参数
    // ==========================================

    /// 按名称搜索参数定义
    pub fn search_parameters(&mut self, term: &str) -> ApiResult<Vec<Parameter>> {
        let selection = self.parameters_mut("search_parameters")?;
        Ok(selection.search(term).into_iter().cloned().collect())
    }

    /// 勾选 / 取消勾选参数并重新匹配
    pub fn toggle_parameter(&mut self, parameter_id: &str) -> ApiResult<ToggleResult> {
        let selection = self.parameters_mut("toggle_parameter")?;
        let result = selection
            .toggle(parameter_id)
            .ok_or_else(|| ApiError::NotFound(format!("参数(id={})不存在", parameter_id)))?;

        tracing::debug!("参数勾选: parameter={}, result={:?}", parameter_id, result);
        self.refilter();
        Ok(result)
    }

    /// 修改已选参数的用户值并重新匹配
    pub fn set_user_value(&mut self, parameter_id: &str, value: &str) -> ApiResult<()> {
        let selection = self.parameters_mut("set_user_value")?;
        if !selection.set_value(parameter_id, value) {
            let known = selection
                .definitions()
                .iter()
                .any(|p| p.id == parameter_id);
            return Err(if known {
                ApiError::InvalidInput(format!("参数(id={})未选择", parameter_id))
            } else {
                ApiError::NotFound(format!("参数(id={})不存在", parameter_id))
            });
        }

        self.refilter();
        Ok(())
    }

    /// 在当前匹配结果中手动选定参考对象
    pub fn select_object(&mut self, object_id: &str) -> ApiResult<()> {
        self.require_step(WizardStep::SelectParameters, "select_object")?;

        let object = self
            .session
            .last_match
            .as_ref()
            .and_then(|m| m.objects.iter().find(|o| o.id == object_id))
            .cloned()
            .ok_or_else(|| {
                ApiError::NotFound(format!("对象(id={})不在当前匹配结果中", object_id))
            })?;

        tracing::debug!("手动选定对象: object={}", object.id);
        self.session.selected_object = Some(object);
        Ok(())
    }

    // ==========================================
    // 导航
    // ==========================================

    /// 前进到下一步
    pub fn next(&mut self) -> ApiResult<WizardStep> {
        let target = self
            .session
            .step
            .next()
            .ok_or_else(|| self.invalid_transition("next"))?;

        // 类型只能通过 select_type 选择
        if target == WizardStep::SelectParameters {
            return Err(ApiError::NavigationBlocked(i18n::t("wizard.type_required")));
        }

        if !self.can_advance() {
            tracing::warn!(
                "前进被阻止: selected_object={:?}, match_count={}",
                self.session.selected_object.as_ref().map(|o| o.id.as_str()),
                self.match_count()
            );
            return Err(ApiError::NavigationBlocked(i18n::t(
                "wizard.navigation_blocked",
            )));
        }

        let type_id = self
            .session
            .object_type
            .as_ref()
            .map(|t| t.id.clone())
            .ok_or_else(|| ApiError::InternalError("对象类型缺失".to_string()))?;
        self.session.sub_objects =
            SubObjectSelection::new(self.catalog.sub_object_templates(&type_id).to_vec());
        self.session.object_name = self
            .session
            .selected_object
            .as_ref()
            .map(|o| o.name.clone())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OBJECT_NAME.to_string());
        self.session.step = target;

        tracing::info!(
            "进入子对象步骤: type={}, object_name={}, templates={}",
            type_id,
            self.session.object_name,
            self.session.sub_objects.items().len()
        );
        Ok(self.session.step)
    }

    /// 返回上一步（清除被离开步骤及之后的状态）
    ///
    /// 回到参数步骤时: 保留已选参数与已选对象，丢弃用户值并重新执行未过滤匹配
    pub fn back(&mut self) -> ApiResult<WizardStep> {
        let target = self
            .session
            .step
            .previous()
            .ok_or_else(|| self.invalid_transition("back"))?;

        if target == WizardStep::SelectType {
            self.session.object_type = None;
            self.session.parameters = None;
            self.session.last_match = None;
            self.session.selected_object = None;
            self.session.step = target;
            tracing::info!("返回类型选择步骤");
            return Ok(self.session.step);
        }

        self.session.sub_objects = SubObjectSelection::default();
        self.session.object_name.clear();
        self.session.step = target;
        self.reload_parameters()?;
        tracing::info!(
            "返回参数选择步骤: match_count={}, selected_object={:?}",
            self.match_count(),
            self.session.selected_object.as_ref().map(|o| o.id.as_str())
        );
        Ok(self.session.step)
    }

    // ==========================================
    // 步骤 3: 子对象
    // ==========================================

    pub fn toggle_sub_object(&mut self, sub_object_id: &str) -> ApiResult<bool> {
        self.require_step(WizardStep::SelectSubObjects, "toggle_sub_object")?;
        self.session
            .sub_objects
            .toggle(sub_object_id)
            .ok_or_else(|| ApiError::NotFound(format!("子对象(id={})不存在", sub_object_id)))
    }

    /// 设置子对象数量（非法输入归一为 1），返回生效数量
    pub fn set_sub_object_count(&mut self, sub_object_id: &str, raw: &str) -> ApiResult<u32> {
        self.require_step(WizardStep::SelectSubObjects, "set_sub_object_count")?;
        self.session
            .sub_objects
            .set_count(sub_object_id, raw)
            .ok_or_else(|| ApiError::NotFound(format!("子对象(id={})不存在", sub_object_id)))
    }

    pub fn set_object_name(&mut self, name: &str) -> ApiResult<()> {
        self.require_step(WizardStep::SelectSubObjects, "set_object_name")?;
        self.session.object_name = name.to_string();
        Ok(())
    }

    /// 完成向导: 组装创建请求，启动创建任务，并重置控制器
    ///
    /// 需在 tokio 运行时内调用
    pub fn finish(&mut self) -> ApiResult<CreationJob> {
        self.require_step(WizardStep::SelectSubObjects, "finish")?;

        if self.session.object_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("对象名称不能为空".to_string()));
        }

        let request = self.build_request()?;
        let job = CreationJob::start(request, self.progress_config, self.finalizer.clone())?;

        tracing::info!(
            "对象创建任务已启动: task_id={}, name={}",
            job.task_id(),
            job.request().object_name
        );
        self.reset();
        Ok(job)
    }

    /// 重置到初始状态
    pub fn reset(&mut self) {
        self.session = WizardSession::default();
    }

    // ==========================================
    // 内部
    // ==========================================

    fn require_step(&self, expected: WizardStep, operation: &str) -> ApiResult<()> {
        if self.session.step != expected {
            return Err(self.invalid_transition(operation));
        }
        Ok(())
    }

    fn invalid_transition(&self, operation: &str) -> ApiError {
        ApiError::InvalidStateTransition {
            from: self.session.step.as_str().to_string(),
            to: operation.to_string(),
        }
    }

    fn parameters_mut(&mut self, operation: &str) -> ApiResult<&mut ParameterSelection> {
        self.require_step(WizardStep::SelectParameters, operation)?;
        self.session
            .parameters
            .as_mut()
            .ok_or_else(|| ApiError::InternalError("参数选择状态缺失".to_string()))
    }

    /// 重新匹配；唯一匹配时自动选定该对象
    fn refilter(&mut self) {
        let Some(selection) = self.session.parameters.as_ref() else {
            return;
        };

        let outcome = self.engine.filter(
            selection.object_type(),
            selection.selected(),
            selection.user_values(),
        );

        self.publish(MatchEvent::count_changed(
            &outcome.object_type,
            outcome.count(),
        ));

        if outcome.is_no_match() {
            self.publish(MatchEvent::no_match(&outcome.object_type));
        }

        if let Some(single) = outcome.singleton() {
            tracing::info!("唯一匹配，自动选定对象: object={}", single.id);
            self.publish(MatchEvent::singleton(&outcome.object_type, &single.id));
            self.session.selected_object = Some(single.clone());
        }

        self.session.last_match = Some(outcome);
    }

    fn publish(&self, event: MatchEvent) {
        self.publisher.publish(event);
    }

    /// 重新进入参数步骤: 清除用户值，匹配结果回到该类型的全部对象
    fn reload_parameters(&mut self) -> ApiResult<()> {
        let selection = self.parameters_mut("back")?;
        selection.clear();
        let object_type = selection.object_type().to_string();

        let outcome = self
            .engine
            .filter(&object_type, &[], &UserValues::new());
        self.publish(MatchEvent::count_changed(
            &outcome.object_type,
            outcome.count(),
        ));
        self.session.last_match = Some(outcome);
        Ok(())
    }

    fn build_request(&self) -> ApiResult<CreationRequest> {
        let object_type = self
            .session
            .object_type
            .clone()
            .ok_or_else(|| ApiError::InternalError("对象类型缺失".to_string()))?;
        let source_object = self
            .session
            .selected_object
            .clone()
            .ok_or_else(|| ApiError::InternalError("参考对象缺失".to_string()))?;
        let (parameters, user_values) = self
            .session
            .parameters
            .as_ref()
            .map(|s| (s.selected().to_vec(), s.user_values().clone()))
            .unwrap_or_default();

        Ok(CreationRequest {
            object_type,
            object_name: self.session.object_name.trim().to_string(),
            source_object,
            parameters,
            user_values,
            sub_objects: self.session.sub_objects.selected(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    fn api() -> WizardApi {
        WizardApi::new(Arc::new(StaticCatalog::builtin()), &WizardConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let api = api();
        assert_eq!(api.step(), WizardStep::SelectType);
        assert_eq!(api.object_types().len(), 4);
        assert!(api.selected_type().is_none());
        assert!(!api.can_advance());
        assert!(api.advisory().is_none());
    }

    #[test]
    fn test_select_type_runs_unfiltered_pass() {
        let mut api = api();
        let outcome = api.select_type("compressor").unwrap();
        assert_eq!(outcome.count(), 5);
        assert!(!outcome.filtered);
        assert_eq!(api.step(), WizardStep::SelectParameters);
        assert!(api.selected_object().is_none());
    }

    #[test]
    fn test_select_unknown_type() {
        let mut api = api();
        assert!(matches!(
            api.select_type("refinery"),
            Err(ApiError::NotFound(_))
        ));
        assert_eq!(api.step(), WizardStep::SelectType);
    }

    #[test]
    fn test_unfiltered_pass_does_not_auto_select() {
        // 未选参数时不判定唯一匹配
        let mut api = api();
        api.select_type("oilPrep").unwrap();
        assert_eq!(api.match_count(), 2);
        assert!(api.selected_object().is_none());
    }

    #[test]
    fn test_operations_in_wrong_step() {
        let mut api = api();
        assert!(matches!(
            api.toggle_parameter("gas-volume"),
            Err(ApiError::InvalidStateTransition { .. })
        ));
        assert!(matches!(
            api.toggle_sub_object("gpa-1"),
            Err(ApiError::InvalidStateTransition { .. })
        ));
        assert!(matches!(api.back(), Err(ApiError::InvalidStateTransition { .. })));
        assert!(matches!(api.finish(), Err(ApiError::InvalidStateTransition { .. })));

        api.select_type("compressor").unwrap();
        assert!(matches!(
            api.select_type("oilPrep"),
            Err(ApiError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_set_user_value_requires_selected_parameter() {
        let mut api = api();
        api.select_type("compressor").unwrap();
        assert!(matches!(
            api.set_user_value("gas-volume", "2.5"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            api.set_user_value("oil-volume", "2.5"),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn test_singleton_auto_selects() {
        let mut api = api();
        api.select_type("compressor").unwrap();
        api.toggle_parameter("temp-in").unwrap();
        api.set_user_value("temp-in", "20").unwrap();

        assert_eq!(api.match_count(), 1);
        assert_eq!(api.selected_object().map(|o| o.id.as_str()), Some("ДКС-4"));
        assert!(api.can_advance());
    }

    #[test]
    fn test_next_blocked_without_convergence() {
        let mut api = api();
        api.select_type("compressor").unwrap();
        api.select_object("ДКС-2").unwrap();
        assert!(matches!(api.next(), Err(ApiError::NavigationBlocked(_))));
        assert_eq!(api.step(), WizardStep::SelectParameters);
    }

    #[test]
    fn test_select_object_must_be_in_matches() {
        let mut api = api();
        api.select_type("compressor").unwrap();
        api.toggle_parameter("temp-in").unwrap();
        api.set_user_value("temp-in", "20").unwrap();
        assert!(matches!(
            api.select_object("ДКС-1"),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn test_advisory_for_no_match() {
        let mut api = api();
        api.select_type("compressor").unwrap();
        api.toggle_parameter("input-pressure").unwrap();
        api.set_user_value("input-pressure", "5").unwrap();
        assert!(api.advisory().is_some());
        assert!(!api.can_advance());
    }

    #[test]
    fn test_back_and_next_defaults_name() {
        let mut api = api();
        api.select_type("compressor").unwrap();
        api.toggle_parameter("temp-in").unwrap();
        api.set_user_value("temp-in", "20").unwrap();
        assert_eq!(api.next().unwrap(), WizardStep::SelectSubObjects);
        assert_eq!(api.object_name(), "ДКС-4");
        assert_eq!(api.sub_object_selection().items().len(), 4);

        api.toggle_sub_object("gpa-1").unwrap();
        api.back().unwrap();
        assert_eq!(api.step(), WizardStep::SelectParameters);
        assert!(api.sub_object_selection().items().is_empty());
        assert!(api.object_name().is_empty());

        // 已选参数保留，用户值与匹配结果重置
        let selection = api.parameter_selection().unwrap();
        assert!(selection.is_selected("temp-in"));
        assert!(selection.user_value("temp-in").is_none());
        assert_eq!(api.match_count(), 5);
        assert!(!api.last_match().unwrap().filtered);
        assert!(!api.can_advance());
        assert!(matches!(api.next(), Err(ApiError::NavigationBlocked(_))));

        api.back().unwrap();
        assert_eq!(api.step(), WizardStep::SelectType);
        assert!(api.selected_type().is_none());
        assert!(api.parameter_selection().is_none());
        assert_eq!(api.match_count(), 0);
    }

    #[test]
    fn test_next_without_type_is_internal_error() {
        let mut api = api();
        api.select_type("compressor").unwrap();
        api.toggle_parameter("temp-in").unwrap();
        api.set_user_value("temp-in", "20").unwrap();
        api.session.object_type = None;

        assert!(matches!(api.next(), Err(ApiError::InternalError(_))));
        assert_eq!(api.step(), WizardStep::SelectParameters);
        assert!(api.sub_object_selection().items().is_empty());
    }

    #[test]
    fn test_reset() {
        let mut api = api();
        api.select_type("compressor").unwrap();
        api.toggle_parameter("gas-volume").unwrap();
        api.reset();
        assert_eq!(api.step(), WizardStep::SelectType);
        assert!(api.last_match().is_none());
    }
}
