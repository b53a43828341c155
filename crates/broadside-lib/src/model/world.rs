//! World-side records: ports, achievements, ranks, guilds, arena bonuses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::localization::Localization;
use crate::model::ship::Faction;
use crate::source::RawRow;

use super::row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortType {
    PirateBay,
    NeutralBay,
    Bay,
    City,
}

impl PortType {
    pub const ALL: [PortType; 4] = [
        PortType::PirateBay,
        PortType::NeutralBay,
        PortType::Bay,
        PortType::City,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "PirateBay" => Some(Self::PirateBay),
            "NeutralBay" => Some(Self::NeutralBay),
            "Bay" => Some(Self::Bay),
            "City" => Some(Self::City),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PirateBay => "PirateBay",
            Self::NeutralBay => "NeutralBay",
            Self::Bay => "Bay",
            Self::City => "City",
        }
    }
}

impl FromStr for PortType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown port type: {s}"))
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: String,
    pub name: String,
    pub port_type: PortType,
    pub build_ranks: f64,
    pub team_limit: Option<f64>,
    pub flags: Option<String>,
    pub produced_resource: Option<String>,
    pub fixed_level: f64,
}

impl Port {
    pub fn from_row(row: &RawRow, loc: &Localization) -> Option<Self> {
        let id = row::string(row, "id")?.to_string();
        let port_type = PortType::parse(row::string(row, "type")?)?;

        Some(Self {
            name: loc.name(&id, row::string(row, "name")),
            port_type,
            build_ranks: row::num_or(row, "build_ranks", 0.0),
            team_limit: row::num(row, "team_limit"),
            flags: row::opt_string(row, "flags"),
            produced_resource: row::opt_string(row, "produced_resource"),
            fixed_level: row::num_or(row, "fixed_level", 0.0),
            id,
        })
    }
}

pub fn normalize_ports(rows: &[RawRow], loc: &Localization) -> Vec<Port> {
    super::decode_rows("ports", rows, |row| Port::from_row(row, loc))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementCategory {
    Battle,
    Arena,
    Top,
    Collection,
    Trade,
}

impl AchievementCategory {
    pub const ALL: [AchievementCategory; 5] = [
        AchievementCategory::Battle,
        AchievementCategory::Arena,
        AchievementCategory::Top,
        AchievementCategory::Collection,
        AchievementCategory::Trade,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Battle" => Some(Self::Battle),
            "Arena" => Some(Self::Arena),
            "Top" => Some(Self::Top),
            "Collection" => Some(Self::Collection),
            "Trade" => Some(Self::Trade),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Battle => "Battle",
            Self::Arena => "Arena",
            Self::Top => "Top",
            Self::Collection => "Collection",
            Self::Trade => "Trade",
        }
    }
}

impl FromStr for AchievementCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown achievement category: {s}"))
    }
}

impl fmt::Display for AchievementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub internal_id: Option<String>,
    pub enum_ref: Option<String>,
    pub rating_weight: f64,
    pub single_give: bool,
    pub category: AchievementCategory,
    pub name: String,
    pub description: Option<String>,
}

impl Achievement {
    pub fn from_row(row: &RawRow, loc: &Localization) -> Option<Self> {
        let id = row::string(row, "id")?.to_string();
        let category = AchievementCategory::parse(row::string(row, "category")?)?;

        Some(Self {
            internal_id: row::opt_string(row, "internal_id"),
            enum_ref: row::opt_string(row, "enum_ref"),
            rating_weight: row::num_or(row, "rating_weight", 0.0),
            single_give: row::boolean(row, "single_give", false),
            category,
            name: loc.name(&id, None),
            description: loc.description(&id, "_desc", None),
            id,
        })
    }
}

pub fn normalize_achievements(rows: &[RawRow], loc: &Localization) -> Vec<Achievement> {
    super::decode_rows("achievements", rows, |row| Achievement::from_row(row, loc))
}

/// Progression step, keyed by the `rank` column rather than an id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rank {
    pub rank: i64,
    pub xp_required: f64,
}

impl Rank {
    pub fn from_row(row: &RawRow) -> Option<Self> {
        Some(Self {
            rank: row::int(row, "rank")?,
            xp_required: row::num_or(row, "xp_required", 0.0),
        })
    }
}

pub fn normalize_ranks(rows: &[RawRow]) -> Vec<Rank> {
    super::decode_rows("ranks", rows, Rank::from_row)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuildPlace {
    Gold,
    Silver,
    Bronze,
    Copper,
}

impl GuildPlace {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Gold" => Some(Self::Gold),
            "Silver" => Some(Self::Silver),
            "Bronze" => Some(Self::Bronze),
            "Copper" => Some(Self::Copper),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
            Self::Copper => "Copper",
        }
    }
}

impl fmt::Display for GuildPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guild {
    pub id: i64,
    pub name: String,
    pub name_key: String,
    pub faction: Faction,
    pub place: GuildPlace,
    pub reward: f64,
}

impl Guild {
    pub fn from_row(row: &RawRow, loc: &Localization) -> Option<Self> {
        let id = row::int(row, "id")?;
        if id <= 0 {
            return None;
        }
        let name_key = row::string(row, "name_key")?.to_string();
        let place = GuildPlace::parse(row::string(row, "place")?)?;

        Some(Self {
            id,
            name: loc.get(&name_key).to_string(),
            name_key,
            faction: row::string(row, "faction")
                .and_then(Faction::parse)
                .unwrap_or(Faction::None),
            place,
            reward: row::num_or(row, "reward", 0.0),
        })
    }
}

pub fn normalize_guilds(rows: &[RawRow], loc: &Localization) -> Vec<Guild> {
    super::decode_rows("guilds", rows, |row| Guild::from_row(row, loc))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaBonus {
    pub id: i64,
    pub max_quantity: f64,
    pub effects: Option<String>,
    pub probability: f64,
}

impl ArenaBonus {
    pub fn from_row(row: &RawRow) -> Option<Self> {
        let id = row::int(row, "id")?;
        if id <= 0 {
            return None;
        }

        Some(Self {
            id,
            max_quantity: row::num_or(row, "max_quantity", 0.0),
            effects: row::opt_string(row, "effects"),
            probability: row::num_or(row, "probability", 0.0),
        })
    }
}

pub fn normalize_arena_bonuses(rows: &[RawRow]) -> Vec<ArenaBonus> {
    super::decode_rows("arena_bonuses", rows, ArenaBonus::from_row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_row(value: serde_json::Value) -> RawRow {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn ports_require_a_known_type() {
        let loc = Localization::empty();
        let rows = vec![
            to_row(json!({"id": "port_haven", "type": "City", "fixed_level": 3})),
            to_row(json!({"id": "port_lost", "type": "Atlantis"})),
        ];
        let ports = normalize_ports(&rows, &loc);
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].port_type, PortType::City);
    }

    #[test]
    fn ranks_key_by_rank_column() {
        let rows = vec![
            to_row(json!({"rank": 3, "xp_required": 1500})),
            to_row(json!({"xp_required": 9000})),
        ];
        let ranks = normalize_ranks(&rows);
        assert_eq!(ranks.len(), 1);
        assert_eq!(ranks[0].rank, 3);
        assert_eq!(ranks[0].xp_required, 1500.0);
    }

    #[test]
    fn guild_names_resolve_through_name_key() {
        let loc_rows = vec![to_row(json!({
            "key": "guild_9_name", "value": "Crimson Fleet", "language": "en"
        }))];
        let loc = Localization::from_rows(&loc_rows, "en");
        let guild = Guild::from_row(
            &to_row(json!({
                "id": 9, "name_key": "guild_9_name", "place": "Gold", "faction": "Pirates"
            })),
            &loc,
        )
        .unwrap();
        assert_eq!(guild.name, "Crimson Fleet");
        assert_eq!(guild.place, GuildPlace::Gold);
    }
}
