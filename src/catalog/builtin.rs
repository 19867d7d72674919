// ==========================================
// 对象构造器 - 内置参考目录
// ==========================================
// 对象类型、ТЭП 定义、参考对象、子对象模板
// ==========================================

use crate::catalog::store::CatalogData;
use crate::domain::{ObjectType, ParamValue, Parameter, SubObject, SystemObject};
use std::collections::BTreeMap;

fn param(id: &str, name: &str, value: impl Into<ParamValue>) -> Parameter {
    Parameter::new(id, name, value)
}

fn object(id: &str, object_type: &str, characteristics: Vec<Parameter>) -> SystemObject {
    SystemObject {
        id: id.to_string(),
        name: id.to_string(),
        object_type: object_type.to_string(),
        characteristics,
    }
}

fn sub_object(
    id: &str,
    name: &str,
    kind: &str,
    characteristics: Vec<Parameter>,
    count: u32,
) -> SubObject {
    SubObject {
        id: id.to_string(),
        name: name.to_string(),
        kind: kind.to_string(),
        characteristics,
        count,
        selected: false,
    }
}

/// 内置目录数据
pub fn reference_data() -> CatalogData {
    CatalogData {
        object_types: object_types(),
        parameters_by_type: parameters_by_type(),
        system_objects: system_objects(),
        sub_objects_by_type: sub_objects_by_type(),
    }
}

fn object_types() -> Vec<ObjectType> {
    vec![
        ObjectType::new("compressor", "Компрессорная станция", 5),
        ObjectType::new("oilPrep", "Установка подготовки нефти", 1),
        ObjectType::new("pumpStation", "Дожимная насосная станция", 4),
        ObjectType::new("complexPrep", "Установка комплексной подготовки нефти", 3),
    ]
}

fn parameters_by_type() -> BTreeMap<String, Vec<Parameter>> {
    let mut map = BTreeMap::new();

    map.insert(
        "compressor".to_string(),
        vec![
            param("gas-volume", "Объем компримируемого газа, млн. м3/сут", 2.5),
            param("input-pressure", "Давление газа на входе КС (изб.), МПа", "0.5 - 0.9"),
            param("temp-in", "Температура газа на входе, °C", "0 - 40"),
            param(
                "output-pressure",
                "Давление газа на выходе дожимающего ГПА (изб.), МПа",
                "2.5 - 3.2",
            ),
            param("comp-ratio", "Давление сжигаемой в факеле (изб.), МПа", "2.7 - 2.9"),
            param("temp-out", "Температура газа после АВО, °C", "-30 - 45"),
            param("pipe-pressure", "Давление газа, подаваемого в трубопровод, МПа", 12.0),
        ],
    );

    map.insert(
        "oilPrep".to_string(),
        vec![
            param("oil-volume", "Объем подготавливаемой нефти, тыс. м3/сут", 2.5),
            param("water-content", "Содержание воды, %", 55.0),
            param("mech-impurities", "Содержание механических примесей, %", 0.18),
            param("temp-process", "Температура процесса, °C", 42.0),
        ],
    );

    map.insert(
        "pumpStation".to_string(),
        vec![
            param("pump-volume", "Объем перекачиваемой нефти, тыс. м3/сут", 3.5),
            param("input-pressure-pump", "Давление на входе, МПа", 0.7),
            param("output-pressure-pump", "Давление на выходе, МПа", 6.5),
            param("productivity", "Производительность, млн. м3/сут", 4.2),
        ],
    );

    map.insert(
        "complexPrep".to_string(),
        vec![
            param("complex-volume", "Объем подготавливаемой нефти, тыс. м3/сут", 5.5),
            param("gas-content", "Содержание газа, %", 12.0),
            param("water-complex", "Содержание воды, %", 65.0),
            param("temp-complex", "Температура процесса, °C", 48.0),
        ],
    );

    map
}

fn system_objects() -> Vec<SystemObject> {
    const GAS_VOLUME: &str = "Объем компримируемого газа, млн. м3/сут";
    const INPUT_PRESSURE: &str = "Давление газа на входе КС (изб.), МПа";
    const OUTPUT_PRESSURE: &str = "Давление газа на выходе, МПа";

    vec![
        // ===== compressor =====
        object(
            "ДКС-1",
            "compressor",
            vec![
                param("gas-volume", GAS_VOLUME, 1.5),
                param("input-pressure", INPUT_PRESSURE, "0.5 - 0.9"),
                param("output-pressure", OUTPUT_PRESSURE, "2.5 - 2.8"),
            ],
        ),
        object(
            "ДКС-2",
            "compressor",
            vec![
                param("gas-volume", GAS_VOLUME, 2.5),
                param("input-pressure", INPUT_PRESSURE, "0.7 - 1.0"),
                param("output-pressure", OUTPUT_PRESSURE, "2.8 - 3.0"),
            ],
        ),
        object(
            "ДКС-3 УКПГ",
            "compressor",
            vec![
                param("gas-volume", GAS_VOLUME, 3.0),
                param("input-pressure", INPUT_PRESSURE, "0.6 - 0.95"),
                param("output-pressure", OUTPUT_PRESSURE, "2.7 - 2.9"),
            ],
        ),
        object(
            "ДКС-4",
            "compressor",
            vec![
                param("gas-volume", GAS_VOLUME, 2.2),
                param("input-pressure", INPUT_PRESSURE, "0.6 - 0.85"),
                param("output-pressure", OUTPUT_PRESSURE, "2.6 - 2.85"),
                param("temp-in", "Температура газа на входе, °C", "5 - 35"),
            ],
        ),
        object(
            "ДКС-5",
            "compressor",
            vec![
                param("gas-volume", GAS_VOLUME, 3.5),
                param("input-pressure", INPUT_PRESSURE, "0.75 - 1.1"),
                param("output-pressure", OUTPUT_PRESSURE, "3.0 - 3.2"),
                param("pipe-pressure", "Давление газа, подаваемого в трубопровод, МПа", 12.0),
            ],
        ),
        // ===== oilPrep =====
        object(
            "УПН-1",
            "oilPrep",
            vec![
                param("oil-volume", "Объем подготавливаемой нефти, тыс. м3/сут", 2.0),
                param("water-content", "Содержание воды, %", 50.0),
                param("temp-process", "Температура процесса, °C", 40.0),
            ],
        ),
        object(
            "УПН-2",
            "oilPrep",
            vec![
                param("oil-volume", "Объем подготавливаемой нефти, тыс. м3/сут", 2.5),
                param("water-content", "Содержание воды, %", 55.0),
                param("mech-impurities", "Содержание механических примесей, %", 0.18),
                param("temp-process", "Температура процесса, °C", 42.0),
            ],
        ),
        // ===== pumpStation =====
        object(
            "ДНС-1",
            "pumpStation",
            vec![
                param("pump-volume", "Объем перекачиваемой нефти, тыс. м3/сут", 3.0),
                param("input-pressure-pump", "Давление на входе, МПа", 0.5),
                param("output-pressure-pump", "Давление на выходе, МПа", 6.0),
            ],
        ),
        object(
            "ДНС-2",
            "pumpStation",
            vec![
                param("pump-volume", "Объем перекачиваемой нефти, тыс. м3/сут", 3.5),
                param("input-pressure-pump", "Давление на входе, МПа", 0.7),
                param("output-pressure-pump", "Давление на выходе, МПа", 6.5),
                param("productivity", "Производительность, млн. м3/сут", 4.2),
            ],
        ),
    ]
}

fn sub_objects_by_type() -> BTreeMap<String, Vec<SubObject>> {
    let mut map = BTreeMap::new();

    map.insert(
        "compressor".to_string(),
        vec![
            sub_object(
                "gpa-1",
                "Газоперекачивающий агрегат ГПА-Ц-6,3А (с двигателем НК-12СТ)",
                "Компрессорное устройство",
                vec![
                    param("productivity", "Производительность, млн. м³/сут", 11.0),
                    param("pressure", "Давление нагнетания, МПа (изб.)", 7.5),
                ],
                1,
            ),
            sub_object(
                "cooling-system",
                "Блок аппаратов воздушного охлаждения",
                "Вспомогательное устройство",
                vec![
                    param("type", "Тип", "Секция"),
                    param("quantity", "Количество аппаратов", "2"),
                    param("volume", "Объем КГ, м³", "1,5"),
                ],
                1,
            ),
            sub_object(
                "filter-separator",
                "Фильтр-сепаратор",
                "Вспомогательное устройство",
                vec![
                    param("type", "Тип", "Циклонный"),
                    param("pressure", "Рабочее давление, МПа", "1,0 - 4,0"),
                    param("capacity", "Пропускная способность, млн. м³/сут", "10,0"),
                ],
                1,
            ),
            sub_object(
                "control-system",
                "Система автоматизированного управления",
                "Система управления",
                vec![
                    param("type", "Тип", "САУ"),
                    param("capacity", "Количество входов/выходов", "600/400"),
                ],
                1,
            ),
        ],
    );

    map.insert(
        "oilPrep".to_string(),
        vec![
            sub_object(
                "oil-separator",
                "Сепаратор нефти",
                "Разделительное устройство",
                vec![
                    param("type", "Тип", "Гравитационный"),
                    param("pressure", "Рабочее давление, МПа", "0,6 - 1,6"),
                    param("capacity", "Пропускная способность, тыс. м³/сут", "3,0"),
                ],
                1,
            ),
            sub_object(
                "heater",
                "Нагреватель",
                "Теплообменное оборудование",
                vec![
                    param("type", "Тип", "Пластинчатый"),
                    param("temperature", "Температура нагрева, °C", "до 60"),
                    param("power", "Тепловая мощность, МВт", "1,2"),
                ],
                1,
            ),
        ],
    );

    map.insert(
        "pumpStation".to_string(),
        vec![
            sub_object(
                "pump-unit",
                "Насосный агрегат",
                "Насосное оборудование",
                vec![
                    param("type", "Тип", "Центробежный"),
                    param("capacity", "Производительность, м³/ч", "150"),
                    param("head", "Напор, м", "200"),
                ],
                2,
            ),
            sub_object(
                "pump-control",
                "Система управления насосами",
                "Система управления",
                vec![
                    param("type", "Тип", "АСУТП"),
                    param("features", "Функции", "Мониторинг, управление, защита"),
                ],
                1,
            ),
        ],
    );

    map
}
