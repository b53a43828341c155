//! Archetype scoring: how well a hull fits a named combat role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Ship;
use crate::numeric::safe_max;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Brawler,
    Kite,
    Sniper,
    Pursuit,
    Trade,
    Siege,
}

impl Archetype {
    pub const ALL: [Archetype; 6] = [
        Archetype::Brawler,
        Archetype::Kite,
        Archetype::Sniper,
        Archetype::Pursuit,
        Archetype::Trade,
        Archetype::Siege,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "brawler" => Some(Self::Brawler),
            "kite" => Some(Self::Kite),
            "sniper" => Some(Self::Sniper),
            "pursuit" => Some(Self::Pursuit),
            "trade" => Some(Self::Trade),
            "siege" => Some(Self::Siege),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brawler => "brawler",
            Self::Kite => "kite",
            Self::Sniper => "sniper",
            Self::Pursuit => "pursuit",
            Self::Trade => "trade",
            Self::Siege => "siege",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Brawler => "Brawler",
            Self::Kite => "Kite",
            Self::Sniper => "Sniper",
            Self::Pursuit => "Pursuit",
            Self::Trade => "Trade",
            Self::Siege => "Siege",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Brawler => "Close-range combat focused on HP and damage",
            Self::Kite => "Fast ships that keep distance and harass",
            Self::Sniper => "Long-range precision strikes",
            Self::Pursuit => "Speed-focused hunters that chase down targets",
            Self::Trade => "Cargo capacity with defensive capability",
            Self::Siege => "Heavy damage at range, slow but powerful",
        }
    }

    pub fn weights(&self) -> &'static ArchetypeWeights {
        match self {
            Self::Brawler => &BRAWLER_WEIGHTS,
            Self::Kite => &KITE_WEIGHTS,
            Self::Sniper => &SNIPER_WEIGHTS,
            Self::Pursuit => &PURSUIT_WEIGHTS,
            Self::Trade => &TRADE_WEIGHTS,
            Self::Siege => &SIEGE_WEIGHTS,
        }
    }
}

impl FromStr for Archetype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown archetype: {s}"))
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-stat importance for one archetype. Weights sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeWeights {
    pub hp: f64,
    pub speed: f64,
    pub dps: f64,
    pub range: f64,
    pub accuracy: f64,
    pub cargo: f64,
    pub crew: f64,
    pub armor: f64,
}

const BRAWLER_WEIGHTS: ArchetypeWeights = ArchetypeWeights {
    hp: 0.30, speed: 0.05, dps: 0.35, range: 0.00, accuracy: 0.10, cargo: 0.00, crew: 0.10, armor: 0.10,
};
const KITE_WEIGHTS: ArchetypeWeights = ArchetypeWeights {
    hp: 0.10, speed: 0.30, dps: 0.15, range: 0.25, accuracy: 0.05, cargo: 0.00, crew: 0.00, armor: 0.00,
};
const SNIPER_WEIGHTS: ArchetypeWeights = ArchetypeWeights {
    hp: 0.10, speed: 0.05, dps: 0.20, range: 0.30, accuracy: 0.25, cargo: 0.00, crew: 0.00, armor: 0.00,
};
const PURSUIT_WEIGHTS: ArchetypeWeights = ArchetypeWeights {
    hp: 0.05, speed: 0.35, dps: 0.25, range: 0.10, accuracy: 0.05, cargo: 0.00, crew: 0.05, armor: 0.00,
};
const TRADE_WEIGHTS: ArchetypeWeights = ArchetypeWeights {
    hp: 0.20, speed: 0.20, dps: 0.05, range: 0.00, accuracy: 0.00, cargo: 0.40, crew: 0.00, armor: 0.10,
};
const SIEGE_WEIGHTS: ArchetypeWeights = ArchetypeWeights {
    hp: 0.25, speed: 0.00, dps: 0.25, range: 0.30, accuracy: 0.10, cargo: 0.00, crew: 0.00, armor: 0.10,
};

/// Fleet-wide stat maxima used to normalize per-ship ratios. Every field
/// defaults to 1 on an empty fleet so downstream divisions stay finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatMaximums {
    pub health: f64,
    pub speed: f64,
    pub armor: f64,
    pub cargo: f64,
    pub crew: f64,
}

pub fn calculate_stat_maximums(ships: &[Ship]) -> StatMaximums {
    if ships.is_empty() {
        return StatMaximums { health: 1.0, speed: 1.0, armor: 1.0, cargo: 1.0, crew: 1.0 };
    }

    let stat = |f: fn(&Ship) -> f64| ships.iter().map(f).collect::<Vec<f64>>();

    StatMaximums {
        health: safe_max(&stat(|s| s.health), 1.0),
        speed: safe_max(&stat(|s| s.speed), 1.0),
        armor: safe_max(&stat(|s| s.armor), 1.0),
        cargo: safe_max(&stat(|s| s.cargo), 1.0),
        crew: safe_max(&stat(|s| s.crew_slots), 1.0),
    }
}

/// Weighted fitness of one ship for one archetype, rounded to the nearest
/// integer. DPS, range and accuracy come from weapons rather than the hull,
/// so they contribute a fixed placeholder amount scaled by their weights.
pub fn calculate_archetype_score(ship: &Ship, archetype: Archetype, maxima: &StatMaximums) -> i64 {
    let w = archetype.weights();

    let mut score = 0.0;
    score += (ship.health / maxima.health) * w.hp * 100.0;
    score += (ship.speed / maxima.speed) * w.speed * 100.0;
    score += (ship.armor / maxima.armor) * w.armor * 100.0;
    score += (ship.cargo / maxima.cargo) * w.cargo * 100.0;
    score += (ship.crew_slots / maxima.crew) * w.crew * 100.0;
    score += 30.0 * (w.dps + w.range + w.accuracy);

    score.round() as i64
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArchetypeScore<'a> {
    pub ship: &'a Ship,
    pub score: i64,
}

/// Top `limit` ships for one archetype, descending by score. The sort is
/// stable, so source order breaks ties.
pub fn top_ships_for_archetype<'a>(
    ships: &'a [Ship],
    archetype: Archetype,
    maxima: &StatMaximums,
    limit: usize,
) -> Vec<ArchetypeScore<'a>> {
    let mut scored: Vec<ArchetypeScore<'a>> = ships
        .iter()
        .map(|ship| ArchetypeScore { ship, score: calculate_archetype_score(ship, archetype, maxima) })
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// Top `limit` ships for every archetype over the playable subset.
pub fn all_archetype_top_ships(ships: &[Ship], limit: usize) -> Vec<(Archetype, Vec<ArchetypeScore<'_>>)> {
    let maxima = calculate_stat_maximums(ships);
    Archetype::ALL
        .iter()
        .map(|&archetype| (archetype, top_ships_for_archetype(ships, archetype, &maxima, limit)))
        .collect()
}

/// Highest-scoring archetype for a ship. A ship that scores zero everywhere
/// falls back to brawler.
pub fn best_archetype_for_ship(ship: &Ship, maxima: &StatMaximums) -> (Archetype, i64) {
    let mut best = (Archetype::Brawler, 0);
    for archetype in Archetype::ALL {
        let score = calculate_archetype_score(ship, archetype, maxima);
        if score > best.1 {
            best = (archetype, score);
        }
    }
    best
}
