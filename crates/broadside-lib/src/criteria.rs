//! Per-kind filter criteria, predicates, and sort-key extractors.
//!
//! Each entity kind gets one criteria struct with documented defaults, one
//! single-pass predicate, one sort-key function, and a constructor wiring
//! them into the generic [`View`]. String-valued filters read as off when
//! empty; the tier filter keeps its string form and is parsed per match.

use std::sync::Arc;

use crate::archetype::Archetype;
use crate::model::{
    Build, CrewOptions, CrewType, CrewUnit, Ship, ShipClass, Weapon, WeaponCategory, WeaponSize,
};
use crate::view::{SortKey, SortSpec, View};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn tier_matches(filter: &str, tier: i64) -> bool {
    match filter.parse::<i64>() {
        Ok(wanted) => tier == wanted,
        // An unparseable tier filter matches nothing.
        Err(_) => false,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipCriteria {
    pub class: Option<ShipClass>,
    pub tier: String,
    pub role: String,
    pub search: String,
}

pub fn ship_matches(ship: &Ship, criteria: &ShipCriteria) -> bool {
    if let Some(class) = criteria.class {
        if ship.ship_class != class {
            return false;
        }
    }
    if !criteria.tier.is_empty() && !tier_matches(&criteria.tier, ship.tier) {
        return false;
    }
    if !criteria.role.is_empty() && ship.pvp_role != criteria.role {
        return false;
    }
    if !criteria.search.is_empty() {
        let subtype_hit = ship
            .subtype
            .as_deref()
            .is_some_and(|s| contains_ci(s, &criteria.search));
        if !contains_ci(&ship.name, &criteria.search) && !subtype_hit {
            return false;
        }
    }
    true
}

pub fn ship_sort_key(ship: &Ship, field: &str) -> SortKey {
    match field {
        "name" => SortKey::Text(ship.name.clone()),
        "tier" => SortKey::Number(ship.tier as f64),
        "rank" => SortKey::Number(ship.rank as f64),
        "health" => SortKey::Number(ship.health),
        "armor" => SortKey::Number(ship.armor),
        "speed" => SortKey::Number(ship.speed),
        "mobility" => SortKey::Number(ship.mobility),
        "cargo" => SortKey::Number(ship.cargo),
        "crew_slots" => SortKey::Number(ship.crew_slots),
        "cost_gold" => SortKey::Number(ship.cost_gold),
        "class" => SortKey::Text(ship.ship_class.to_string()),
        "role" => SortKey::Text(ship.pvp_role.clone()),
        _ => SortKey::Missing,
    }
}

/// Default ship ordering is tier ascending.
pub fn ship_view(source: Arc<Vec<Ship>>) -> View<Ship, ShipCriteria> {
    View::new(
        source,
        ShipCriteria::default(),
        SortSpec::ascending("tier"),
        ship_matches,
        ship_sort_key,
    )
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeaponCriteria {
    pub category: Option<WeaponCategory>,
    pub size: Option<WeaponSize>,
    pub tier: String,
    pub search: String,
}

pub fn weapon_matches(weapon: &Weapon, criteria: &WeaponCriteria) -> bool {
    if let Some(category) = criteria.category {
        if weapon.category != category {
            return false;
        }
    }
    if let Some(size) = criteria.size {
        if weapon.size != size {
            return false;
        }
    }
    if !criteria.tier.is_empty() && !tier_matches(&criteria.tier, weapon.tier) {
        return false;
    }
    if !criteria.search.is_empty()
        && !contains_ci(&weapon.name, &criteria.search)
        && !contains_ci(&weapon.weapon_class, &criteria.search)
    {
        return false;
    }
    true
}

pub fn weapon_sort_key(weapon: &Weapon, field: &str) -> SortKey {
    match field {
        "name" => SortKey::Text(weapon.name.clone()),
        "tier" => SortKey::Number(weapon.tier as f64),
        "distance" => SortKey::Number(weapon.distance),
        "penetration" => SortKey::Number(weapon.penetration),
        "cooldown" => SortKey::Number(weapon.cooldown),
        "angle" => SortKey::Number(weapon.angle),
        "scatter" => SortKey::Number(weapon.scatter),
        "price" => SortKey::Number(weapon.price),
        "category" => SortKey::Text(weapon.category.to_string()),
        "size" => SortKey::Text(weapon.size.to_string()),
        _ => SortKey::Missing,
    }
}

pub fn weapon_view(source: Arc<Vec<Weapon>>) -> View<Weapon, WeaponCriteria> {
    View::new(
        source,
        WeaponCriteria::default(),
        SortSpec::ascending("tier"),
        weapon_matches,
        weapon_sort_key,
    )
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrewCriteria {
    pub crew_type: Option<CrewType>,
    pub options: Option<CrewOptions>,
    pub pvp_only: bool,
    pub search: String,
}

pub fn crew_matches(crew: &CrewUnit, criteria: &CrewCriteria) -> bool {
    if let Some(crew_type) = criteria.crew_type {
        if crew.crew_type != crew_type {
            return false;
        }
    }
    if let Some(options) = criteria.options {
        if crew.options != options {
            return false;
        }
    }
    if criteria.pvp_only && !crew.pvp_relevant {
        return false;
    }
    if !criteria.search.is_empty() {
        let effect_hit = crew
            .effect
            .as_deref()
            .is_some_and(|e| contains_ci(e, &criteria.search));
        if !contains_ci(&crew.name, &criteria.search) && !effect_hit {
            return false;
        }
    }
    true
}

pub fn crew_sort_key(crew: &CrewUnit, field: &str) -> SortKey {
    match field {
        "name" => SortKey::Text(crew.name.clone()),
        "damage" => SortKey::Number(crew.damage),
        "health" => SortKey::Number(crew.health),
        "capacity" => SortKey::Number(crew.capacity),
        "cost" => SortKey::Number(crew.cost),
        "type" => SortKey::Text(crew.crew_type.to_string()),
        _ => SortKey::Missing,
    }
}

/// Default crew ordering is name ascending.
pub fn crew_view(source: Arc<Vec<CrewUnit>>) -> View<CrewUnit, CrewCriteria> {
    View::new(
        source,
        CrewCriteria::default(),
        SortSpec::ascending("name"),
        crew_matches,
        crew_sort_key,
    )
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildCriteria {
    pub archetype: Option<Archetype>,
    pub tier: String,
    pub search: String,
}

pub fn build_matches(build: &Build, criteria: &BuildCriteria) -> bool {
    if let Some(archetype) = criteria.archetype {
        if build.archetype != archetype {
            return false;
        }
    }
    if !criteria.tier.is_empty() && !tier_matches(&criteria.tier, build.tier) {
        return false;
    }
    if !criteria.search.is_empty()
        && !contains_ci(&build.name, &criteria.search)
        && !contains_ci(&build.strategy, &criteria.search)
    {
        return false;
    }
    true
}

pub fn build_sort_key(build: &Build, field: &str) -> SortKey {
    match field {
        "name" => SortKey::Text(build.name.clone()),
        "tier" => SortKey::Number(build.tier as f64),
        "archetype" => SortKey::Text(build.archetype.to_string()),
        "estimated_score" => SortKey::Number(build.estimated_score),
        "created_at" => SortKey::Number(build.created_at as f64),
        "updated_at" => SortKey::Number(build.updated_at as f64),
        _ => SortKey::Missing,
    }
}

/// Default build ordering is most recently updated first.
pub fn build_view(source: Arc<Vec<Build>>) -> View<Build, BuildCriteria> {
    View::new(
        source,
        BuildCriteria::default(),
        SortSpec::descending("updated_at"),
        build_matches,
        build_sort_key,
    )
}
