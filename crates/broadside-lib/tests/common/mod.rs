#![allow(dead_code)]

use broadside_lib::source::{tables, MemorySource, RawRow};
use serde_json::{json, Value};

pub fn rows(values: Vec<Value>) -> Vec<RawRow> {
    values
        .into_iter()
        .map(|v| v.as_object().cloned().expect("fixture row is an object"))
        .collect()
}

pub fn ship_row(id: i64, name: &str, ship_type: &str, rank: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": ship_type,
        "rank": rank,
        "health": 100.0,
        "armor": 5.0,
        "speed": 8.0,
        "mobility": 4.0,
        "capacity": 40.0,
        "crew_slots": 3.0,
        "upgrade_slots": 2.0,
        "cost": 1500.0,
        "coolness": "Default",
        "fraction": "None"
    })
}

pub fn weapon_row(id: &str, category: &str) -> Value {
    json!({
        "id": id,
        "class": "cannon",
        "category": category,
        "distance": 300.0,
        "penetration": 5.0,
        "cooldown": 12.0,
        "angle": 45.0,
        "scatter": 2.0,
        "extra": "SpeedFactor:0.9;",
        "price": 500.0,
        "crafting_type": "ByGold"
    })
}

pub fn crew_row(id: &str, crew_type: &str) -> Value {
    json!({
        "id": id,
        "type": crew_type,
        "damage": 10.0,
        "health": 20.0,
        "capacity": 1.0,
        "cost": 100.0,
        "effect": "Boost:1;"
    })
}

pub fn localization_rows() -> Vec<Value> {
    vec![
        json!({"key": "ship_1_name", "language": "en", "value": "Sea Wolf"}),
        json!({"key": "ship_2_name", "language": "en", "value": "Iron Maiden"}),
        json!({"key": "ship_3_name", "language": "en", "value": "Merchant Prince"}),
        json!({"key": "ship_1_name", "language": "de", "value": "Seewolf"}),
        json!({"key": "unit_gunner_name", "language": "en", "value": "Gunner"}),
    ]
}

/// A small but representative dataset: three ships, two weapons, one crew
/// unit, and an english localization table.
pub fn fixture_source() -> MemorySource {
    MemorySource::new()
        .with_table(
            tables::SHIPS,
            rows(vec![
                ship_row(1, "ship_one", "Destroyer", 4),
                ship_row(2, "ship_two", "Hardship", 2),
                ship_row(3, "ship_three", "CargoShip", 3),
            ]),
        )
        .with_table(
            tables::WEAPONS,
            rows(vec![
                weapon_row("ncs_long_nine", "Light Culverin Iron"),
                weapon_row("ncs_smasher", "Heavy Carronade Bronze"),
            ]),
        )
        .with_table(tables::CREWS, rows(vec![crew_row("unit_gunner", "Boarding")]))
        .with_table(tables::LOCALIZATION, rows(localization_rows()))
}
