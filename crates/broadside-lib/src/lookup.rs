//! O(1) reverse-lookup indexes over the current snapshot.
//!
//! Indexes are rebuilt from each new snapshot and never mutated in place.
//! Resolving foreign ids through them degrades stale references to silent
//! omission rather than errors.

use std::collections::{BTreeMap, HashMap};

use crate::aggregate::AppData;
use crate::error::{Error, Result};
use crate::model::{Ammo, CaptainSkill, CrewUnit, Ship, ShipClass, Upgrade, Weapon};

/// Similarity floor below which a name is not worth suggesting.
const SUGGESTION_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Default)]
pub struct Lookups {
    pub ships_by_id: HashMap<i64, Ship>,
    /// Keyed by lowercased ship name.
    pub ships_by_name: HashMap<String, Ship>,
    pub weapons_by_id: HashMap<String, Weapon>,
    pub ammo_by_id: HashMap<String, Ammo>,
    pub crews_by_id: HashMap<String, CrewUnit>,
    pub skills_by_id: HashMap<String, CaptainSkill>,
    pub upgrades_by_id: HashMap<String, Upgrade>,
}

impl Lookups {
    pub fn build(snapshot: &AppData) -> Self {
        Self {
            ships_by_id: snapshot.ships.iter().map(|s| (s.id, s.clone())).collect(),
            ships_by_name: snapshot
                .ships
                .iter()
                .map(|s| (s.name.to_lowercase(), s.clone()))
                .collect(),
            weapons_by_id: snapshot
                .weapons
                .iter()
                .map(|w| (w.id.clone(), w.clone()))
                .collect(),
            ammo_by_id: snapshot
                .ammo
                .iter()
                .map(|a| (a.id.clone(), a.clone()))
                .collect(),
            crews_by_id: snapshot
                .crews
                .iter()
                .map(|c| (c.id.clone(), c.clone()))
                .collect(),
            skills_by_id: snapshot
                .skills
                .iter()
                .map(|s| (s.id.clone(), s.clone()))
                .collect(),
            upgrades_by_id: snapshot
                .upgrades
                .iter()
                .map(|u| (u.id.clone(), u.clone()))
                .collect(),
        }
    }

    /// Resolve a list of ship ids, silently omitting stale references.
    pub fn resolve_ships(&self, ids: &[i64]) -> Vec<&Ship> {
        ids.iter()
            .filter_map(|id| self.ships_by_id.get(id))
            .collect()
    }

    /// Case-insensitive ship lookup by name, with close-match suggestions
    /// on failure.
    pub fn ship_by_name(&self, name: &str) -> Result<&Ship> {
        self.ships_by_name
            .get(&name.to_lowercase())
            .ok_or_else(|| Error::UnknownShip {
                name: name.to_string(),
                suggestions: self.fuzzy_ship_matches(name, 3),
            })
    }

    /// Closest ship names to `name`, best first, at most `limit`.
    pub fn fuzzy_ship_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &Ship)> = self
            .ships_by_name
            .iter()
            .map(|(candidate, ship)| (strsim::jaro_winkler(&needle, candidate), ship))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, ship)| ship.name.clone())
            .collect()
    }
}

/// Ships grouped by class, every class present even when empty.
pub fn ships_by_class(ships: &[Ship]) -> Vec<(ShipClass, Vec<&Ship>)> {
    let mut grouped: Vec<(ShipClass, Vec<&Ship>)> =
        ShipClass::ALL.iter().map(|&class| (class, Vec::new())).collect();
    for ship in ships {
        if let Some(entry) = grouped.iter_mut().find(|(class, _)| *class == ship.ship_class) {
            entry.1.push(ship);
        }
    }
    grouped
}

/// Ships grouped by tier, only tiers that occur.
pub fn ships_by_tier(ships: &[Ship]) -> BTreeMap<i64, Vec<&Ship>> {
    let mut grouped: BTreeMap<i64, Vec<&Ship>> = BTreeMap::new();
    for ship in ships {
        grouped.entry(ship.tier).or_default().push(ship);
    }
    grouped
}

/// Weapons grouped by category name, only categories that occur.
pub fn weapons_by_category(weapons: &[Weapon]) -> BTreeMap<String, Vec<&Weapon>> {
    let mut grouped: BTreeMap<String, Vec<&Weapon>> = BTreeMap::new();
    for weapon in weapons {
        grouped
            .entry(weapon.category.to_string())
            .or_default()
            .push(weapon);
    }
    grouped
}

/// Ordered set of ship ids selected for side-by-side comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonSet {
    ids: Vec<i64>,
}

impl ComparisonSet {
    pub const MAX_SHIPS: usize = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ship id. Duplicates and adds beyond capacity are no-ops.
    pub fn add(&mut self, id: i64) {
        if self.ids.contains(&id) || self.ids.len() >= Self::MAX_SHIPS {
            return;
        }
        self.ids.push(id);
    }

    pub fn remove(&mut self, id: i64) {
        self.ids.retain(|existing| *existing != id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolve the selection against the current lookups. Ids with no match
    /// in the snapshot are omitted.
    pub fn resolve<'a>(&self, lookups: &'a Lookups) -> Vec<&'a Ship> {
        lookups.resolve_ships(&self.ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ship::{derive_pvp_role, Faction, Rarity, ShipType};

    fn ship(id: i64, name: &str) -> Ship {
        Ship {
            id,
            name: name.to_string(),
            description: None,
            ship_type: ShipType::Destroyer,
            ship_class: ShipClass::Fast,
            subtype: None,
            rank: 3,
            tier: 4,
            rarity: Rarity::Default,
            faction: Faction::None,
            health: 700.0,
            armor: 4.0,
            speed: 10.0,
            mobility: 7.0,
            cargo: 300.0,
            crew_slots: 30.0,
            upgrade_slots: 2.0,
            cost_gold: 900.0,
            required_rank: 0,
            is_playable: true,
            pvp_role: derive_pvp_role(ShipType::Destroyer, 4.0, 10.0).to_string(),
            icon: None,
        }
    }

    fn lookups(ships: Vec<Ship>) -> Lookups {
        Lookups {
            ships_by_id: ships.iter().map(|s| (s.id, s.clone())).collect(),
            ships_by_name: ships
                .iter()
                .map(|s| (s.name.to_lowercase(), s.clone()))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn stale_ids_resolve_to_omission() {
        let lookups = lookups(vec![ship(1, "Galleon"), ship(2, "Sloop")]);
        let resolved = lookups.resolve_ships(&[2, 99, 1]);
        let names: Vec<&str> = resolved.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Sloop", "Galleon"]);
    }

    #[test]
    fn near_miss_name_yields_suggestion() {
        let lookups = lookups(vec![ship(1, "Galleon")]);
        let err = lookups.ship_by_name("Galeon").unwrap_err();
        assert!(err.to_string().contains("Did you mean 'Galleon'?"));
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        let lookups = lookups(vec![ship(1, "Galleon")]);
        assert_eq!(lookups.ship_by_name("gALLEON").unwrap().id, 1);
    }

    #[test]
    fn comparison_set_caps_at_three_without_duplicates() {
        let mut set = ComparisonSet::new();
        set.add(1);
        set.add(1);
        set.add(2);
        set.add(3);
        set.add(4);
        assert_eq!(set.ids(), &[1, 2, 3]);

        set.remove(2);
        set.add(4);
        assert_eq!(set.ids(), &[1, 3, 4]);

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn class_grouping_keeps_every_class_key() {
        let ships = vec![ship(1, "Galleon")];
        let grouped = ships_by_class(&ships);
        assert_eq!(grouped.len(), ShipClass::ALL.len());
        let fast = grouped
            .iter()
            .find(|(class, _)| *class == ShipClass::Fast)
            .map(|(_, ships)| ships.len());
        assert_eq!(fast, Some(1));
        assert!(grouped
            .iter()
            .filter(|(class, _)| *class != ShipClass::Fast)
            .all(|(_, ships)| ships.is_empty()));
    }
}
