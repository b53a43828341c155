//! Entity records and per-kind row validation and normalization.
//!
//! Each entity family owns its canonical record type plus a `normalize_*`
//! function that turns untyped remote rows into trusted records. Rows that
//! fail their kind's minimal validation are dropped and counted, never
//! propagated as errors; the drop count is logged per collection.

pub mod ammo;
pub mod build;
pub mod crew;
pub mod item;
pub mod row;
pub mod ship;
pub mod weapon;
pub mod world;

pub use ammo::{Ammo, PowderKeg, SwivelAmmo};
pub use build::{Build, BuildAmmo, BuildWeapons};
pub use crew::{CaptainSkill, CrewOptions, CrewType, CrewUnit, SkillCategory};
pub use item::{
    Consumable, ConsumableCategory, Cosmetic, CosmeticKind, Resource, ResourceCategory, Upgrade,
    UpgradeCategory, UpgradeEffect,
};
pub use ship::{Faction, Rarity, Ship, ShipClass, ShipType};
pub use weapon::{CraftingType, Weapon, WeaponCategory, WeaponSize};
pub use world::{Achievement, AchievementCategory, ArenaBonus, Guild, GuildPlace, Port, PortType, Rank};

use tracing::warn;

use crate::source::RawRow;

/// Decode a collection of rows, dropping (and counting) rows that fail
/// their kind's validation.
pub(crate) fn decode_rows<T>(
    table: &str,
    rows: &[RawRow],
    mut decode: impl FnMut(&RawRow) -> Option<T>,
) -> Vec<T> {
    let mut dropped = 0usize;
    let decoded: Vec<T> = rows
        .iter()
        .filter_map(|row| {
            let item = decode(row);
            if item.is_none() {
                dropped += 1;
            }
            item
        })
        .collect();

    if dropped > 0 {
        warn!(table, dropped, "dropped rows failing validation");
    }

    decoded
}
