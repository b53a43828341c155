//! Ammunition and powder keg records.

use serde::{Deserialize, Serialize};

use crate::localization::Localization;
use crate::source::RawRow;

use super::row;

/// A cannon round. Swivel-gun rounds share the shape exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ammo {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub speed: f64,
    pub penetration: f64,
    pub damage_factor: f64,
    pub sail_damage: f64,
    pub crew_damage: f64,
    pub min_damage: f64,
    pub effects: Option<String>,
    pub mass: f64,
    pub radius: f64,
    pub reload_factor: f64,
    pub distance_factor: f64,
    pub cost: f64,
    pub is_rare: bool,
    pub icon: Option<String>,
}

/// Falconet ammunition carries the same record shape as cannon ammunition.
pub type SwivelAmmo = Ammo;

impl Ammo {
    pub fn from_row(row: &RawRow, loc: &Localization) -> Option<Self> {
        let id = row::string(row, "id")?.to_string();
        let cost = row::num_or(row, "cost", 0.0);

        Some(Self {
            name: loc.name(&id, row::string(row, "name")),
            description: loc.description(&id, "_text", row::opt_string(row, "description").as_deref()),
            speed: row::num_or(row, "speed", 0.0),
            penetration: row::num_or(row, "penetration", 0.0),
            damage_factor: row::num_or(row, "damage_factor", 1.0),
            sail_damage: row::num_or(row, "sail_damage", 0.0),
            crew_damage: row::num_or(row, "crew_damage", 0.0),
            min_damage: row::num_or(row, "min_damage", 0.0),
            effects: row::opt_string(row, "effects"),
            mass: row::num_or(row, "mass", 0.0),
            radius: row::num_or(row, "radius", 0.0),
            reload_factor: row::num_or(row, "reload_factor", 1.0),
            distance_factor: row::num_or(row, "distance_factor", 1.0),
            cost,
            is_rare: row::boolean(row, "is_rare", false) || cost > 5.0,
            icon: row::opt_string(row, "icon"),
            id,
        })
    }
}

/// Normalize the ammo collection (used for both `ammo` and `swivel_ammo`).
pub fn normalize_ammo(table: &str, rows: &[RawRow], loc: &Localization) -> Vec<Ammo> {
    super::decode_rows(table, rows, |row| Ammo::from_row(row, loc))
}

/// An explosive powder keg dropped behind the ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowderKeg {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub mass: f64,
    pub damage: f64,
    pub trigger_radius: f64,
    pub damage_radius: f64,
    pub count: f64,
    pub reload: f64,
    pub crew_usage: f64,
    pub cost_gold: f64,
    pub cost_skulls: f64,
    pub cost_marks: f64,
    pub is_rare: bool,
    pub icon: Option<String>,
}

impl PowderKeg {
    pub fn from_row(row: &RawRow, loc: &Localization) -> Option<Self> {
        let id = row::string(row, "id")?.to_string();
        // Placeholder rows carry the removed marker instead of a real keg.
        if id == "removed" {
            return None;
        }

        let derived = format!("Powder Keg {}", id.strip_prefix("pkeg_").unwrap_or(&id));

        Some(Self {
            name: loc.name(&id, Some(&derived)),
            description: loc.description(&id, "_text", None),
            mass: row::num_or(row, "mass", 0.0),
            damage: row::num_or(row, "damage", 0.0),
            trigger_radius: row::num_or(row, "trigger_radius", 0.0),
            damage_radius: row::num_or(row, "damage_radius", 0.0),
            count: row::num_or(row, "count", 1.0),
            reload: row::num_or(row, "reload", 0.0),
            crew_usage: row::num_or(row, "crew_usage", 0.0),
            cost_gold: row::num_or(row, "cost_gold", 0.0),
            cost_skulls: row::num_or(row, "cost_skulls", 0.0),
            cost_marks: row::num_or(row, "cost_marks", 0.0),
            is_rare: row::boolean(row, "is_rare", false),
            icon: row::opt_string(row, "icon"),
            id,
        })
    }
}

pub fn normalize_kegs(rows: &[RawRow], loc: &Localization) -> Vec<PowderKeg> {
    super::decode_rows("kegs", rows, |row| PowderKeg::from_row(row, loc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_row(value: serde_json::Value) -> RawRow {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn costly_ammo_is_rare() {
        let loc = Localization::empty();
        let cheap = Ammo::from_row(&to_row(json!({"id": "cball_1", "cost": 5})), &loc).unwrap();
        let pricey = Ammo::from_row(&to_row(json!({"id": "cball_2", "cost": 6})), &loc).unwrap();
        assert!(!cheap.is_rare);
        assert!(pricey.is_rare);
    }

    #[test]
    fn removed_keg_rows_are_dropped() {
        let loc = Localization::empty();
        let rows = vec![
            to_row(json!({"id": "pkeg_1", "damage": 100})),
            to_row(json!({"id": "removed"})),
        ];
        let kegs = normalize_kegs(&rows, &loc);
        assert_eq!(kegs.len(), 1);
        assert_eq!(kegs[0].name, "Powder Keg 1");
    }
}
