//! Upgrades, cosmetics, consumables and trade resources.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::localization::Localization;
use crate::source::RawRow;

use super::row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeCategory {
    Support,
    Protection,
    Combat,
    Speed,
}

impl UpgradeCategory {
    pub const ALL: [UpgradeCategory; 4] = [
        UpgradeCategory::Support,
        UpgradeCategory::Protection,
        UpgradeCategory::Combat,
        UpgradeCategory::Speed,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Support" => Some(Self::Support),
            "Protection" => Some(Self::Protection),
            "Combat" => Some(Self::Combat),
            "Speed" => Some(Self::Speed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Support => "Support",
            Self::Protection => "Protection",
            Self::Combat => "Combat",
            Self::Speed => "Speed",
        }
    }
}

impl FromStr for UpgradeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown upgrade category: {s}"))
    }
}

impl fmt::Display for UpgradeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parsed stat modifier, tier-bracketed. Currently reserved:
/// effect strings are carried raw and `parsed_effects` stays `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeEffect {
    pub stat: String,
    pub values: Vec<f64>,
    pub prefix: char,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub effects: Option<String>,
    pub icon: Option<String>,
    pub craft_resource: Option<String>,
    pub category: UpgradeCategory,
    pub wear_type: Option<String>,
    pub parsed_effects: Option<Vec<UpgradeEffect>>,
}

impl Upgrade {
    pub fn from_row(row: &RawRow, loc: &Localization) -> Option<Self> {
        let id = row::string(row, "id")?.to_string();
        let category = row::string(row, "category")
            .and_then(UpgradeCategory::parse)
            .unwrap_or(UpgradeCategory::Support);

        Some(Self {
            name: loc.name(&id, row::string(row, "name")),
            description: loc.description(&id, "_text", row::opt_string(row, "description").as_deref()),
            effects: row::opt_string(row, "effects"),
            icon: row::opt_string(row, "icon"),
            craft_resource: row::opt_string(row, "craft_resource"),
            category,
            wear_type: row::opt_string(row, "wear_type"),
            parsed_effects: None,
            id,
        })
    }
}

pub fn normalize_upgrades(rows: &[RawRow], loc: &Localization) -> Vec<Upgrade> {
    super::decode_rows("upgrades", rows, |row| Upgrade::from_row(row, loc))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CosmeticKind {
    Design,
    Sail,
    Flag,
    Guild,
    Private,
}

impl CosmeticKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "design" => Some(Self::Design),
            "sail" => Some(Self::Sail),
            "flag" => Some(Self::Flag),
            "guild" => Some(Self::Guild),
            "private" => Some(Self::Private),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Design => "design",
            Self::Sail => "sail",
            Self::Flag => "flag",
            Self::Guild => "guild",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for CosmeticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cosmetic {
    pub id: i64,
    pub name: String,
    pub name_key: String,
    pub kind: CosmeticKind,
    pub icon: Option<String>,
    pub in_shop: Option<String>,
    pub bonus: Option<String>,
}

impl Cosmetic {
    pub fn from_row(row: &RawRow, loc: &Localization) -> Option<Self> {
        let id = row::int(row, "id")?;
        if id <= 0 {
            return None;
        }
        let name_key = row::string(row, "name_key")?.to_string();
        let kind = row::string(row, "type").and_then(CosmeticKind::parse)?;

        Some(Self {
            id,
            name: loc.get(&name_key).to_string(),
            name_key,
            kind,
            icon: row::opt_string(row, "icon"),
            in_shop: row::opt_string(row, "in_shop"),
            bonus: row::opt_string(row, "bonus"),
        })
    }
}

pub fn normalize_cosmetics(rows: &[RawRow], loc: &Localization) -> Vec<Cosmetic> {
    super::decode_rows("cosmetics", rows, |row| Cosmetic::from_row(row, loc))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsumableCategory {
    Mending,
    Equipment,
    Group,
}

impl ConsumableCategory {
    pub const ALL: [ConsumableCategory; 3] = [
        ConsumableCategory::Mending,
        ConsumableCategory::Equipment,
        ConsumableCategory::Group,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "mending" => Some(Self::Mending),
            "equipment" => Some(Self::Equipment),
            "group" => Some(Self::Group),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mending => "mending",
            Self::Equipment => "equipment",
            Self::Group => "group",
        }
    }
}

impl FromStr for ConsumableCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown consumable category: {s}"))
    }
}

impl fmt::Display for ConsumableCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consumable {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub category: ConsumableCategory,
    pub cooldown: f64,
    pub duration: f64,
    pub crafting_gold: f64,
    pub is_group_effect: bool,
    pub group_range: Option<f64>,
    pub min_rank: Option<i64>,
    pub npc_can_use: bool,
    pub hidden_from_craft: bool,
}

impl Consumable {
    pub fn from_row(row: &RawRow, loc: &Localization) -> Option<Self> {
        let id = row::int(row, "id")?;
        if id <= 0 {
            return None;
        }
        let category = row::string(row, "category")
            .and_then(ConsumableCategory::parse)
            .unwrap_or(ConsumableCategory::Equipment);

        Some(Self {
            id,
            name: loc.ship_name(id, row::string(row, "name")),
            description: row::opt_string(row, "description"),
            icon: row::opt_string(row, "icon"),
            category,
            cooldown: row::num_or(row, "cooldown", 0.0),
            duration: row::num_or(row, "duration", 0.0),
            crafting_gold: row::num_or(row, "crafting_gold", 0.0),
            is_group_effect: row::boolean(row, "is_group_effect", false),
            group_range: row::num(row, "group_range"),
            min_rank: row::int(row, "min_rank"),
            npc_can_use: row::boolean(row, "npc_can_use", false),
            hidden_from_craft: row::boolean(row, "hidden_from_craft", false),
        })
    }
}

pub fn normalize_consumables(rows: &[RawRow], loc: &Localization) -> Vec<Consumable> {
    super::decode_rows("consumables", rows, |row| Consumable::from_row(row, loc))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    Trade,
    Food,
    Material,
    Special,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 4] = [
        ResourceCategory::Trade,
        ResourceCategory::Food,
        ResourceCategory::Material,
        ResourceCategory::Special,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trade => "trade",
            Self::Food => "food",
            Self::Material => "material",
            Self::Special => "special",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category comes from substring matches on the effects string, with
/// food winning over trade over special.
pub fn resource_category(effects: Option<&str>) -> ResourceCategory {
    let Some(effects) = effects else {
        return ResourceCategory::Material;
    };
    if effects.contains("FoodValue") {
        ResourceCategory::Food
    } else if effects.contains("TradingItem") {
        ResourceCategory::Trade
    } else if effects.contains("Special") {
        ResourceCategory::Special
    } else {
        ResourceCategory::Material
    }
}

/// Extract the numeric value following `Corruption:` in an effects
/// string, defaulting to 0 when absent or unparseable.
pub fn extract_corruption(effects: Option<&str>) -> f64 {
    let Some(effects) = effects else {
        return 0.0;
    };
    let Some(start) = effects.find("Corruption:") else {
        return 0.0;
    };
    let rest = &effects[start + "Corruption:".len()..];
    let digits: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    digits.parse().unwrap_or(0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub category: ResourceCategory,
    pub medium_cost: f64,
    pub mass: f64,
    pub icon: Option<String>,
    pub effects: Option<String>,
    pub is_food: bool,
    pub is_tradeable: bool,
    pub corruption: f64,
}

impl Resource {
    pub fn from_row(row: &RawRow, loc: &Localization) -> Option<Self> {
        let id = row::string(row, "id")?.to_string();
        let effects = row::opt_string(row, "effects");

        Some(Self {
            name: loc.name(&id, row::string(row, "name")),
            description: loc.description(&id, "_text", row::opt_string(row, "description").as_deref()),
            status: row::opt_string(row, "status"),
            category: resource_category(effects.as_deref()),
            medium_cost: row::num_or(row, "medium_cost", 0.0),
            mass: row::num_or(row, "mass", 0.0),
            icon: row::opt_string(row, "icon"),
            is_food: effects.as_deref().is_some_and(|e| e.contains("FoodValue")),
            is_tradeable: effects.as_deref().is_some_and(|e| e.contains("TradingItem")),
            corruption: extract_corruption(effects.as_deref()),
            effects,
            id,
        })
    }
}

pub fn normalize_resources(rows: &[RawRow], loc: &Localization) -> Vec<Resource> {
    super::decode_rows("resources", rows, |row| Resource::from_row(row, loc))
}
