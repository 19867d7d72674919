// ==========================================
// 目录加载集成测试
// ==========================================
// 覆盖: JSON 文件加载 / 约束校验 / 文件错误
// ==========================================


use object_constructor::catalog::CatalogData;
use object_constructor::{CatalogError, CatalogProvider, ParamValue, StaticCatalog};
use test_helpers::*;

#[test]
fn test_builtin_catalog_survives_file_round_trip() {
    let data = StaticCatalog::builtin().to_data();
    let file = write_catalog_file(&data).unwrap();

    let loaded = StaticCatalog::from_json_file(file.path()).unwrap();
    assert_eq!(loaded.object_types().len(), 4);
    assert_eq!(loaded.objects("compressor").len(), 5);
    assert_eq!(loaded.parameter_definitions("compressor").len(), 7);
    assert_eq!(loaded.sub_object_templates("pumpStation").len(), 2);

    let volume = &loaded.parameter_definitions("compressor")[0];
    assert_eq!(volume.value, ParamValue::Number(2.5));
    let pressure = &loaded.parameter_definitions("compressor")[1];
    assert_eq!(pressure.value, ParamValue::Text("0.5 - 0.9".to_string()));
}

#[test]
fn test_minimal_json_document() {
    let json = r#"{
        "object_types": [{"id": "tank", "label": "Резервуар", "count": 1}],
        "parameters_by_type": {
            "tank": [{"id": "volume", "name": "Объем, м3", "value": 5000, "unit": "м3"}]
        },
        "system_objects": [
            {"id": "РВС-1", "name": "РВС-1", "type": "tank",
             "characteristics": [{"id": "volume", "name": "Объем, м3", "value": "4000 - 6000"}]}
        ]
    }"#;
    let file = write_temp_file(json).unwrap();
    let catalog = StaticCatalog::from_json_file(file.path()).unwrap();

    assert_eq!(catalog.object_type("tank").map(|t| t.label.as_str()), Some("Резервуар"));
    assert_eq!(
        catalog.parameter_definitions("tank")[0].unit.as_deref(),
        Some("м3")
    );
    assert!(catalog.sub_object_templates("tank").is_empty());
    assert!(catalog.objects("compressor").is_empty());
}

#[test]
fn test_duplicate_characteristic_in_file_rejected() {
    let json = r#"{
        "system_objects": [
            {"id": "A", "name": "A", "type": "t", "characteristics": [
                {"id": "p", "name": "P", "value": 1},
                {"id": "p", "name": "P", "value": 2}
            ]}
        ]
    }"#;
    let file = write_temp_file(json).unwrap();
    match StaticCatalog::from_json_file(file.path()) {
        Err(CatalogError::DuplicateCharacteristic {
            object_id,
            parameter_id,
        }) => {
            assert_eq!(object_id, "A");
            assert_eq!(parameter_id, "p");
        }
        other => panic!("Expected DuplicateCharacteristic, got {:?}", other.err()),
    }
}

#[test]
fn test_zero_count_sub_object_rejected() {
    let json = r#"{
        "sub_objects_by_type": {
            "t": [{"id": "s", "name": "S", "type": "k", "count": 0}]
        }
    }"#;
    assert!(matches!(
        StaticCatalog::from_json_str(json),
        Err(CatalogError::InvalidSubObjectCount { .. })
    ));
}

#[test]
fn test_malformed_json_rejected() {
    let file = write_temp_file("{ not json").unwrap();
    assert!(matches!(
        StaticCatalog::from_json_file(file.path()),
        Err(CatalogError::Parse(_))
    ));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    match StaticCatalog::from_json_file(&path) {
        Err(CatalogError::FileRead { path: reported, .. }) => {
            assert!(reported.ends_with("missing.json"));
        }
        other => panic!("Expected FileRead, got {:?}", other.err()),
    }
}

#[test]
fn test_empty_document_is_valid_empty_catalog() {
    let catalog = StaticCatalog::from_data(CatalogData::default()).unwrap();
    assert!(catalog.object_types().is_empty());
    assert!(catalog.object_type("compressor").is_none());
}
