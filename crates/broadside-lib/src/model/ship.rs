//! Ship records: validation, normalization, and derived classification.
//!
//! Tier is always recomputed as `7 - rank`; a tier column present on the raw
//! row is never trusted, since rank is the source of truth.

use serde::{Deserialize, Serialize};

use crate::localization::Localization;
use crate::source::RawRow;

use super::row;

/// Hull type as shipped by the game data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipType {
    Destroyer,
    Battleship,
    Hardship,
    CargoShip,
    Mortar,
}

impl ShipType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Destroyer" => Some(Self::Destroyer),
            "Battleship" => Some(Self::Battleship),
            "Hardship" => Some(Self::Hardship),
            "CargoShip" => Some(Self::CargoShip),
            "Mortar" => Some(Self::Mortar),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Destroyer => "Destroyer",
            Self::Battleship => "Battleship",
            Self::Hardship => "Hardship",
            Self::CargoShip => "CargoShip",
            Self::Mortar => "Mortar",
        }
    }

    /// Fixed hull-type to class mapping; unmapped types read as Combat.
    pub fn ship_class(self) -> ShipClass {
        match self {
            Self::Destroyer => ShipClass::Fast,
            Self::Battleship => ShipClass::Combat,
            Self::Hardship => ShipClass::Heavy,
            Self::CargoShip => ShipClass::Transport,
            Self::Mortar => ShipClass::Siege,
        }
    }
}

/// Broad ship classification used by the class filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipClass {
    Combat,
    Fast,
    Heavy,
    Transport,
    Siege,
    Imperial,
}

impl ShipClass {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Combat" => Some(Self::Combat),
            "Fast" => Some(Self::Fast),
            "Heavy" => Some(Self::Heavy),
            "Transport" => Some(Self::Transport),
            "Siege" => Some(Self::Siege),
            "Imperial" => Some(Self::Imperial),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Combat => "Combat",
            Self::Fast => "Fast",
            Self::Heavy => "Heavy",
            Self::Transport => "Transport",
            Self::Siege => "Siege",
            Self::Imperial => "Imperial",
        }
    }

    pub const ALL: [ShipClass; 6] = [
        Self::Combat,
        Self::Fast,
        Self::Heavy,
        Self::Transport,
        Self::Siege,
        Self::Imperial,
    ];
}

impl std::str::FromStr for ShipClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown ship class: {s}"))
    }
}

impl std::fmt::Display for ShipClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rarity grade; unknown raw values fall back to Default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    Default,
    Unique,
    Elite,
    Rare,
    Empire,
    SailageLegend,
}

impl Rarity {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Default" => Some(Self::Default),
            "Unique" => Some(Self::Unique),
            "Elite" => Some(Self::Elite),
            "Rare" => Some(Self::Rare),
            "Empire" => Some(Self::Empire),
            "SailageLegend" => Some(Self::SailageLegend),
            _ => None,
        }
    }
}

/// Faction allegiance; unknown raw values fall back to None.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    None,
    Antilia,
    Empire,
    Espaniol,
    KaiAndSeveria,
    Scandinavia,
    Pirates,
    TradeUnion,
    Pirate,
}

impl Faction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "None" => Some(Self::None),
            "Antilia" => Some(Self::Antilia),
            "Empire" => Some(Self::Empire),
            "Espaniol" => Some(Self::Espaniol),
            "KaiAndSeveria" => Some(Self::KaiAndSeveria),
            "Scandinavia" => Some(Self::Scandinavia),
            "Pirates" => Some(Self::Pirates),
            "TradeUnion" => Some(Self::TradeUnion),
            "Pirate" => Some(Self::Pirate),
            _ => None,
        }
    }
}

/// A playable ship, fully normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub ship_type: ShipType,
    pub ship_class: ShipClass,
    pub subtype: Option<String>,
    pub rank: i64,
    /// Derived: `7 - rank`. Rank 0 is tier VII, rank 6 is tier I.
    pub tier: i64,
    pub rarity: Rarity,
    pub faction: Faction,
    pub health: f64,
    pub armor: f64,
    pub speed: f64,
    pub mobility: f64,
    pub cargo: f64,
    pub crew_slots: f64,
    pub upgrade_slots: f64,
    pub cost_gold: f64,
    pub required_rank: i64,
    pub is_playable: bool,
    pub pvp_role: String,
    pub icon: Option<String>,
}

/// PvP role classification from hull type and stats.
pub fn derive_pvp_role(ship_type: ShipType, armor: f64, speed: f64) -> &'static str {
    match ship_type {
        ShipType::Mortar => "Siege",
        ShipType::CargoShip => "Trade",
        ShipType::Hardship => {
            if armor >= 8.0 {
                "Tank/Brawl"
            } else {
                "Frontline"
            }
        }
        ShipType::Destroyer => {
            if speed >= 9.0 {
                "Kite/Scout"
            } else {
                "Pursuit"
            }
        }
        ShipType::Battleship => {
            if armor >= 6.0 {
                "Frontline"
            } else {
                "Skirmish"
            }
        }
    }
}

impl Ship {
    /// Validate and normalize one raw row. Requires a positive numeric id,
    /// a numeric rank, and a numeric health; anything else is dropped.
    pub fn from_row(row: &RawRow, loc: &Localization) -> Option<Self> {
        let id = row::int(row, "id")?;
        if id <= 0 {
            return None;
        }
        let rank = row::int(row, "rank")?;
        let health = row::num(row, "health")?;

        let tier = 7 - rank;
        let is_playable = health > 0.0 && (1..=7).contains(&tier);
        if !is_playable {
            return None;
        }

        let ship_type = row::string(row, "type")
            .and_then(ShipType::parse)
            .unwrap_or(ShipType::Battleship);
        let armor = row::num_or(row, "armor", 0.0);
        let speed = row::num_or(row, "speed", 0.0);

        Some(Self {
            id,
            name: loc.ship_name(id, row::string(row, "name")),
            description: loc.ship_description(id, "_desc", row::opt_string(row, "description").as_deref()),
            ship_type,
            ship_class: ship_type.ship_class(),
            subtype: row::opt_string(row, "subtype"),
            rank,
            tier,
            rarity: row::string(row, "coolness")
                .and_then(Rarity::parse)
                .unwrap_or(Rarity::Default),
            faction: row::string(row, "fraction")
                .and_then(Faction::parse)
                .unwrap_or(Faction::None),
            health,
            armor,
            speed,
            mobility: row::num_or(row, "mobility", 0.0),
            cargo: row::num_or(row, "capacity", 0.0),
            crew_slots: row::num_or(row, "crew_slots", 0.0),
            upgrade_slots: row::num_or(row, "upgrade_slots", 0.0),
            cost_gold: row::num_or(row, "cost", 0.0),
            required_rank: row::int_or(row, "required_rank", 0),
            is_playable,
            pvp_role: derive_pvp_role(ship_type, armor, speed).to_string(),
            icon: row::opt_string(row, "icon"),
        })
    }
}

/// Normalize the ships collection: validate each row, drop unplayable
/// hulls, then order by tier and name.
pub fn normalize_ships(rows: &[RawRow], loc: &Localization) -> Vec<Ship> {
    let mut ships = super::decode_rows("ships", rows, |row| Ship::from_row(row, loc));
    ships.sort_by(|a, b| a.tier.cmp(&b.tier).then_with(|| a.name.cmp(&b.name)));
    ships
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pvp_role_table() {
        assert_eq!(derive_pvp_role(ShipType::Mortar, 0.0, 0.0), "Siege");
        assert_eq!(derive_pvp_role(ShipType::CargoShip, 9.0, 9.0), "Trade");
        assert_eq!(derive_pvp_role(ShipType::Hardship, 8.0, 0.0), "Tank/Brawl");
        assert_eq!(derive_pvp_role(ShipType::Hardship, 7.9, 0.0), "Frontline");
        assert_eq!(derive_pvp_role(ShipType::Destroyer, 0.0, 9.0), "Kite/Scout");
        assert_eq!(derive_pvp_role(ShipType::Destroyer, 0.0, 8.0), "Pursuit");
        assert_eq!(derive_pvp_role(ShipType::Battleship, 6.0, 0.0), "Frontline");
        assert_eq!(derive_pvp_role(ShipType::Battleship, 5.0, 0.0), "Skirmish");
    }

    #[test]
    fn unmapped_type_reads_as_combat_class() {
        assert_eq!(ShipType::Battleship.ship_class(), ShipClass::Combat);
        assert_eq!(ShipType::CargoShip.ship_class(), ShipClass::Transport);
    }
}
