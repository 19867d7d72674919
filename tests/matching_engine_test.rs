// ==========================================
// MatchingEngine 集成测试
// ==========================================
// 覆盖: 区间包含 / 数值容差 / 字符串精确匹配 / 缺失特性 / 唯一匹配
// ==========================================


use object_constructor::engine::{
    ChannelEventPublisher, MatchEventType, MatchingConfig, MatchingEngine, UserValues,
};
use object_constructor::{ParamValue, Parameter, WizardConfig, WizardStep};
use std::sync::Arc;
use test_helpers::*;

fn engine() -> MatchingEngine {
    MatchingEngine::new(builtin_catalog(), MatchingConfig::default())
}

#[test]
fn test_empty_selection_returns_type_subset() {
    let outcome = engine().filter("compressor", &[], &UserValues::new());
    assert_eq!(
        outcome.object_ids(),
        vec!["ДКС-1", "ДКС-2", "ДКС-3 УКПГ", "ДКС-4", "ДКС-5"]
    );

    let outcome = engine().filter("pumpStation", &[], &UserValues::new());
    assert_eq!(outcome.object_ids(), vec!["ДНС-1", "ДНС-2"]);
}

#[test]
fn test_range_boundaries_are_inclusive() {
    let selected = vec![param("compressor", "input-pressure")];

    let outcome = engine().filter("compressor", &selected, &values(&[("input-pressure", "0.5")]));
    assert_eq!(outcome.object_ids(), vec!["ДКС-1"]);

    let outcome = engine().filter("compressor", &selected, &values(&[("input-pressure", "1.1")]));
    assert_eq!(outcome.object_ids(), vec!["ДКС-5"]);

    let outcome = engine().filter("compressor", &selected, &values(&[("input-pressure", "1.11")]));
    assert!(outcome.is_no_match());
}

#[test]
fn test_target_uses_leading_number() {
    // "0.8 МПа" 解析为 0.8
    let selected = vec![param("compressor", "input-pressure")];
    let outcome = engine().filter(
        "compressor",
        &selected,
        &values(&[("input-pressure", "0.8 МПа")]),
    );
    assert_eq!(outcome.count(), 5);
}

#[test]
fn test_non_numeric_target_against_range_never_matches() {
    let selected = vec![param("compressor", "input-pressure")];
    let outcome = engine().filter(
        "compressor",
        &selected,
        &values(&[("input-pressure", "высокое")]),
    );
    assert!(outcome.is_no_match());
}

#[test]
fn test_tolerance_is_relative_to_object_value() {
    let selected = vec![param("pumpStation", "pump-volume")];

    // 3.3: ДНС-1 (3.0, ±0.3) 命中; ДНС-2 (3.5, ±0.35) 命中
    let outcome = engine().filter("pumpStation", &selected, &values(&[("pump-volume", "3.3")]));
    assert_eq!(outcome.object_ids(), vec!["ДНС-1", "ДНС-2"]);

    // 3.8: 仅 ДНС-2
    let outcome = engine().filter("pumpStation", &selected, &values(&[("pump-volume", "3.8")]));
    assert_eq!(outcome.object_ids(), vec!["ДНС-2"]);
    assert_eq!(outcome.singleton().map(|o| o.id.as_str()), Some("ДНС-2"));
}

#[test]
fn test_negative_scalar_never_matches() {
    let catalog = custom_catalog(
        "cooler",
        vec![Parameter::new("t", "Температура", -10.0)],
        vec![object_with("X-1", "cooler", vec![Parameter::new("t", "Температура", -10.0)])],
    );
    let engine = MatchingEngine::new(catalog, MatchingConfig::default());
    let selected = vec![Parameter::new("t", "Температура", -10.0)];

    let outcome = engine.filter("cooler", &selected, &values(&[("t", "-10")]));
    assert!(outcome.is_no_match());
}

#[test]
fn test_negative_range_lower_bound() {
    let catalog = custom_catalog(
        "cooler",
        vec![Parameter::new("t", "Температура", "-30 - 45")],
        vec![object_with(
            "X-1",
            "cooler",
            vec![Parameter::new("t", "Температура", "-30 - 45")],
        )],
    );
    let engine = MatchingEngine::new(catalog, MatchingConfig::default());
    let selected = vec![Parameter::new("t", "Температура", "-30 - 45")];

    assert_eq!(engine.filter("cooler", &selected, &values(&[("t", "-20")])).count(), 1);
    assert_eq!(engine.filter("cooler", &selected, &values(&[("t", "-30")])).count(), 1);
    assert!(engine.filter("cooler", &selected, &values(&[("t", "-31")])).is_no_match());
}

#[test]
fn test_exact_string_match_is_case_sensitive() {
    let definition = Parameter::new("material", "Материал", "сталь");
    let catalog = custom_catalog(
        "vessel",
        vec![definition.clone()],
        vec![
            object_with("V-1", "vessel", vec![Parameter::new("material", "Материал", "сталь")]),
            object_with("V-2", "vessel", vec![Parameter::new("material", "Материал", "Сталь")]),
        ],
    );
    let engine = MatchingEngine::new(catalog, MatchingConfig::default());

    let outcome = engine.filter("vessel", &[definition], &values(&[("material", "сталь")]));
    assert_eq!(outcome.object_ids(), vec!["V-1"]);
}

#[test]
fn test_malformed_range_never_matches() {
    let definition = Parameter::new("grade", "Марка", "abc-def");
    let catalog = custom_catalog(
        "vessel",
        vec![definition.clone()],
        vec![object_with("V-1", "vessel", vec![definition.clone()])],
    );
    let engine = MatchingEngine::new(catalog, MatchingConfig::default());

    let outcome = engine.filter("vessel", &[definition.clone()], &values(&[("grade", "5")]));
    assert!(outcome.is_no_match());

    // 非数值目标同样不走精确匹配
    let outcome = engine.filter("vessel", &[definition], &values(&[("grade", "abc-def")]));
    assert!(outcome.is_no_match());
}

#[test]
fn test_numeric_characteristic_with_text_target_uses_equality() {
    let definition = Parameter::new("stages", "Ступени", ParamValue::Number(3.0));
    let catalog = custom_catalog(
        "pump",
        vec![definition.clone()],
        vec![object_with("P-1", "pump", vec![definition.clone()])],
    );
    let engine = MatchingEngine::new(catalog, MatchingConfig::default());

    // 目标不可解析为数值 → 与 "3" 精确比较
    assert!(engine
        .filter("pump", &[definition.clone()], &values(&[("stages", "три")]))
        .is_no_match());
    assert_eq!(
        engine
            .filter("pump", &[definition], &values(&[("stages", "3")]))
            .count(),
        1
    );
}

// ==========================================
// 端到端: 通过向导逐步收敛到唯一对象
// ==========================================

#[test]
fn test_compressor_convergence_end_to_end() {
    let (publisher, mut rx) = ChannelEventPublisher::new();
    let mut api = new_api().with_publisher(Arc::new(publisher));

    api.select_type("compressor").unwrap();
    assert_eq!(api.match_count(), 5);

    api.toggle_parameter("input-pressure").unwrap();
    api.set_user_value("input-pressure", "0.8").unwrap();
    assert_eq!(api.match_count(), 5);
    assert!(!api.can_advance());

    api.toggle_parameter("output-pressure").unwrap();
    api.set_user_value("output-pressure", "2.75").unwrap();
    assert_eq!(
        api.last_match().unwrap().object_ids(),
        vec!["ДКС-1", "ДКС-3 УКПГ", "ДКС-4"]
    );
    assert!(!api.can_advance());

    api.toggle_parameter("gas-volume").unwrap();
    api.set_user_value("gas-volume", "3.0").unwrap();
    assert_eq!(api.match_count(), 1);
    assert_eq!(
        api.selected_object().map(|o| o.id.as_str()),
        Some("ДКС-3 УКПГ")
    );
    assert!(api.can_advance());

    let mut last_singleton = None;
    while let Ok(event) = rx.try_recv() {
        if event.event_type == MatchEventType::SingletonMatched {
            last_singleton = event.object_id;
        }
    }
    assert_eq!(last_singleton.as_deref(), Some("ДКС-3 УКПГ"));

    assert_eq!(api.next().unwrap(), WizardStep::SelectSubObjects);
    assert_eq!(api.object_name(), "ДКС-3 УКПГ");
}

#[test]
fn test_toggle_seeds_reference_value() {
    // 勾选 input-pressure 时用户值为 "0.5 - 0.9"，目标解析为 0.5
    let mut api = new_api();
    api.select_type("compressor").unwrap();
    api.toggle_parameter("input-pressure").unwrap();

    assert_eq!(
        api.parameter_selection().unwrap().user_value("input-pressure"),
        Some("0.5 - 0.9")
    );
    assert_eq!(api.last_match().unwrap().object_ids(), vec!["ДКС-1"]);
}

#[test]
fn test_deselect_drops_criterion() {
    let mut api = new_api();
    api.select_type("compressor").unwrap();
    api.toggle_parameter("input-pressure").unwrap();
    api.set_user_value("input-pressure", "5").unwrap();
    assert!(api.last_match().unwrap().is_no_match());

    api.toggle_parameter("input-pressure").unwrap();
    assert_eq!(api.match_count(), 5);
    assert!(api
        .parameter_selection()
        .unwrap()
        .user_value("input-pressure")
        .is_none());
}

#[test]
fn test_type_without_objects_reports_advisory() {
    let mut api = new_api();
    api.select_type("complexPrep").unwrap();
    assert_eq!(api.match_count(), 0);
    assert!(!api.last_match().unwrap().is_no_match());
    assert!(api.advisory().is_some());
}

#[test]
fn test_configured_tolerance_ratio_applies() {
    let config = WizardConfig {
        tolerance_ratio: 0.5,
        ..Default::default()
    };
    let mut api = object_constructor::WizardApi::new(builtin_catalog(), &config);
    api.select_type("compressor").unwrap();
    api.toggle_parameter("gas-volume").unwrap();
    api.set_user_value("gas-volume", "1.0").unwrap();

    // 1.0: 仅 ДКС-1 (1.5, ±0.75)
    assert_eq!(api.last_match().unwrap().object_ids(), vec!["ДКС-1"]);
}
