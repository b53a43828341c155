//! Snapshot assembly over the remote row-store.
//!
//! The aggregator fetches every collection, normalizes each one, and wraps
//! the lot in an immutable [`AppData`] snapshot. One collection failing to
//! fetch degrades that collection to empty and records the table name on the
//! snapshot; it never fails the whole load.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::cache::TtlCache;
use crate::localization::Localization;
use crate::model::{
    ammo, crew, item, ship, weapon, world, Ammo, ArenaBonus, Achievement, CaptainSkill, Consumable,
    Cosmetic, CrewUnit, Guild, Port, PowderKeg, Rank, Resource, Ship, SwivelAmmo, Upgrade, Weapon,
};
use crate::source::{tables, DataSource, RawRow};

/// How long a snapshot stays fresh before the next load refetches.
pub const SNAPSHOT_TTL: Duration = Duration::from_secs(5 * 60);

/// One immutable load of every collection. Never mutated after assembly;
/// a refetch produces an entirely new snapshot.
#[derive(Debug, Clone)]
pub struct AppData {
    pub ships: Vec<Ship>,
    pub weapons: Vec<Weapon>,
    pub ammo: Vec<Ammo>,
    pub swivel_ammo: Vec<SwivelAmmo>,
    pub kegs: Vec<PowderKeg>,
    pub crews: Vec<CrewUnit>,
    pub skills: Vec<CaptainSkill>,
    pub upgrades: Vec<Upgrade>,
    pub cosmetics: Vec<Cosmetic>,
    pub consumables: Vec<Consumable>,
    pub resources: Vec<Resource>,
    pub ports: Vec<Port>,
    pub achievements: Vec<Achievement>,
    pub ranks: Vec<Rank>,
    pub guilds: Vec<Guild>,
    pub arena_bonuses: Vec<ArenaBonus>,
    pub localization: Localization,
    /// Tables that failed to fetch and were degraded to empty.
    pub failed_tables: Vec<String>,
    pub loaded_at: Instant,
}

/// Owns the data source, the session localization, and the snapshot cache.
pub struct Aggregator {
    source: Box<dyn DataSource>,
    language: String,
    localization: Option<Localization>,
    cache: TtlCache<(), Arc<AppData>>,
}

impl Aggregator {
    pub fn new(source: Box<dyn DataSource>, language: impl Into<String>) -> Self {
        Self::with_ttl(source, language, SNAPSHOT_TTL)
    }

    pub fn with_ttl(source: Box<dyn DataSource>, language: impl Into<String>, ttl: Duration) -> Self {
        Self {
            source,
            language: language.into(),
            localization: None,
            cache: TtlCache::new(ttl),
        }
    }

    /// Current snapshot, served from cache while fresh.
    pub fn load(&mut self) -> Arc<AppData> {
        self.load_at(Instant::now())
    }

    pub fn load_at(&mut self, now: Instant) -> Arc<AppData> {
        if let Some(snapshot) = self.cache.get_at(&(), now) {
            debug!("serving cached snapshot");
            return snapshot;
        }

        let snapshot = Arc::new(self.assemble(now));
        self.cache.set_at((), Arc::clone(&snapshot), now);
        snapshot
    }

    /// Drop the cached snapshot so the next load refetches.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    fn assemble(&mut self, now: Instant) -> AppData {
        // Localization is fetched once per session, not once per snapshot.
        if self.localization.is_none() {
            self.localization = Some(Localization::load(self.source.as_ref(), &self.language));
        }
        let loc = self
            .localization
            .clone()
            .unwrap_or_else(Localization::empty);

        let mut failed = Vec::new();
        let fetch = |table: &str, failed: &mut Vec<String>| -> Vec<RawRow> {
            match self.source.fetch_rows(table) {
                Ok(rows) => rows,
                Err(err) => {
                    warn!(table, error = %err, "collection degraded to empty");
                    failed.push(table.to_string());
                    Vec::new()
                }
            }
        };

        let ships = ship::normalize_ships(&fetch(tables::SHIPS, &mut failed), &loc);
        let weapons = weapon::normalize_weapons(&fetch(tables::WEAPONS, &mut failed));
        let ammo_rows = fetch(tables::AMMO, &mut failed);
        let swivel_rows = fetch(tables::SWIVEL_AMMO, &mut failed);
        let snapshot = AppData {
            weapons,
            ammo: ammo::normalize_ammo(tables::AMMO, &ammo_rows, &loc),
            swivel_ammo: ammo::normalize_ammo(tables::SWIVEL_AMMO, &swivel_rows, &loc),
            kegs: ammo::normalize_kegs(&fetch(tables::KEGS, &mut failed), &loc),
            crews: crew::normalize_crews(&fetch(tables::CREWS, &mut failed), &loc),
            skills: crew::normalize_skills(&fetch(tables::SKILLS, &mut failed), &loc),
            upgrades: item::normalize_upgrades(&fetch(tables::UPGRADES, &mut failed), &loc),
            cosmetics: item::normalize_cosmetics(&fetch(tables::COSMETICS, &mut failed), &loc),
            consumables: item::normalize_consumables(&fetch(tables::CONSUMABLES, &mut failed), &loc),
            resources: item::normalize_resources(&fetch(tables::RESOURCES, &mut failed), &loc),
            ports: world::normalize_ports(&fetch(tables::PORTS, &mut failed), &loc),
            achievements: world::normalize_achievements(&fetch(tables::ACHIEVEMENTS, &mut failed), &loc),
            ranks: world::normalize_ranks(&fetch(tables::RANKS, &mut failed)),
            guilds: world::normalize_guilds(&fetch(tables::GUILDS, &mut failed), &loc),
            arena_bonuses: world::normalize_arena_bonuses(&fetch(tables::ARENA_BONUSES, &mut failed)),
            ships,
            localization: loc,
            failed_tables: failed,
            loaded_at: now,
        };

        info!(
            ships = snapshot.ships.len(),
            weapons = snapshot.weapons.len(),
            failed = snapshot.failed_tables.len(),
            "assembled snapshot"
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use serde_json::json;

    fn rows(values: Vec<serde_json::Value>) -> Vec<RawRow> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().expect("object"))
            .collect()
    }

    fn seeded_source() -> MemorySource {
        MemorySource::new()
            .with_table(
                tables::SHIPS,
                rows(vec![json!({"id": 1, "name": "Sloop", "type": "Destroyer", "rank": 4, "health": 800, "speed": 11, "armor": 3})]),
            )
            .with_table(
                tables::LOCALIZATION,
                rows(vec![json!({"key": "ship_1_name", "value": "Swift Sloop", "language": "en"})]),
            )
    }

    #[test]
    fn snapshot_is_cached_while_fresh() {
        let mut agg = Aggregator::new(Box::new(seeded_source()), "en");
        let start = Instant::now();
        let first = agg.load_at(start);
        let second = agg.load_at(start + Duration::from_secs(60));
        assert!(Arc::ptr_eq(&first, &second));

        let third = agg.load_at(start + SNAPSHOT_TTL);
        assert!(!Arc::ptr_eq(&first, &third));
    }

    #[test]
    fn failing_table_degrades_to_empty() {
        let source = seeded_source().with_failing_table(tables::WEAPONS, "boom");
        let mut agg = Aggregator::new(Box::new(source), "en");
        let snapshot = agg.load();
        assert!(snapshot.weapons.is_empty());
        assert_eq!(snapshot.failed_tables, vec![tables::WEAPONS.to_string()]);
        // Sibling collections load as usual.
        assert_eq!(snapshot.ships.len(), 1);
        assert_eq!(snapshot.ships[0].name, "Swift Sloop");
    }

    #[test]
    fn invalidate_forces_refetch() {
        let mut agg = Aggregator::new(Box::new(seeded_source()), "en");
        let first = agg.load();
        agg.invalidate();
        let second = agg.load();
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
