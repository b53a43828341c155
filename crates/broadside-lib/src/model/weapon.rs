//! Weapon records and the compound category-string derivations.
//!
//! The raw `category` column is a compound string such as
//! `"Light Culverin Iron"`; category, size class, and material tier are all
//! parsed out of it with fixed priority rules. The display name is derived
//! from the row id.

use serde::{Deserialize, Serialize};

use crate::source::RawRow;

use super::row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponCategory {
    Cannon,
    Culverin,
    Carronade,
    Bombard,
    Mortar,
    LongGun,
}

impl WeaponCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Cannon" => Some(Self::Cannon),
            "Culverin" => Some(Self::Culverin),
            "Carronade" => Some(Self::Carronade),
            "Bombard" => Some(Self::Bombard),
            "Mortar" => Some(Self::Mortar),
            "Long Gun" | "LongGun" => Some(Self::LongGun),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cannon => "Cannon",
            Self::Culverin => "Culverin",
            Self::Carronade => "Carronade",
            Self::Bombard => "Bombard",
            Self::Mortar => "Mortar",
            Self::LongGun => "Long Gun",
        }
    }
}

impl std::str::FromStr for WeaponCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown weapon category: {s}"))
    }
}

impl std::fmt::Display for WeaponCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponSize {
    Light,
    Medium,
    Heavy,
}

impl WeaponSize {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Light" => Some(Self::Light),
            "Medium" => Some(Self::Medium),
            "Heavy" => Some(Self::Heavy),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Medium => "Medium",
            Self::Heavy => "Heavy",
        }
    }
}

impl std::str::FromStr for WeaponSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown weapon size: {s}"))
    }
}

impl std::fmt::Display for WeaponSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CraftingType {
    ByGold,
    ByCraft,
    NotAvailable,
    ByMarks,
    ByResources,
}

impl CraftingType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ByGold" => Some(Self::ByGold),
            "ByCraft" => Some(Self::ByCraft),
            "NotAvailable" => Some(Self::NotAvailable),
            "ByMarks" => Some(Self::ByMarks),
            "ByResources" => Some(Self::ByResources),
            _ => None,
        }
    }
}

/// A ship-mounted weapon, fully normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: String,
    pub name: String,
    pub weapon_class: String,
    pub category: WeaponCategory,
    pub size: WeaponSize,
    /// Derived from the material keyword in the category string, 1 (best)
    /// through 5.
    pub tier: i64,
    pub distance: f64,
    pub penetration: f64,
    pub cooldown: f64,
    pub angle: f64,
    pub scatter: f64,
    pub speed_factor: f64,
    pub price: f64,
    pub crafting_type: CraftingType,
    pub icon: Option<String>,
}

/// Derive category and size class from the compound category string.
///
/// Category is chosen by case-insensitive substring match in fixed priority
/// order; size is the first whitespace token when it names a size class,
/// else Medium.
pub fn parse_weapon_category(raw: &str) -> (WeaponCategory, WeaponSize) {
    let lower = raw.to_lowercase();
    let category = if lower.contains("culverin") || lower.contains("distance") {
        WeaponCategory::Culverin
    } else if lower.contains("carronade") || lower.contains("heavy") {
        WeaponCategory::Carronade
    } else if lower.contains("bombard") {
        WeaponCategory::Bombard
    } else if lower.contains("mortar") {
        WeaponCategory::Mortar
    } else {
        WeaponCategory::Cannon
    };

    let size = raw
        .split_whitespace()
        .next()
        .and_then(WeaponSize::parse)
        .unwrap_or(WeaponSize::Medium);

    (category, size)
}

/// Derive tier from the material keyword in the category string.
///
/// Case-sensitive keyword priority: CastIron/Default before the bare Iron
/// check, since "CastIron" contains "Iron".
pub fn material_tier(raw: &str) -> i64 {
    if raw.contains("CastIron") || raw.contains("Default") {
        5
    } else if raw.contains("Bronze") {
        4
    } else if raw.contains("Iron") {
        3
    } else if raw.contains("Steel") {
        2
    } else if raw.contains("Gold") || raw.contains("Elite") {
        1
    } else {
        4
    }
}

/// Derive a readable display name from a weapon id: strip the `ncs_`
/// prefix, split on underscores, and title-case each token.
pub fn display_name_from_id(id: &str) -> String {
    let stripped = id.strip_prefix("ncs_").unwrap_or(id);
    stripped
        .split('_')
        .map(|token| {
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract `SpeedFactor:<float>` from the row's extras string; defaults to 1.
pub fn extract_speed_factor(extra: &str) -> f64 {
    let Some(start) = extra.find("SpeedFactor:") else {
        return 1.0;
    };
    let tail = &extra[start + "SpeedFactor:".len()..];
    let digits: String = tail
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse::<f64>().unwrap_or(1.0)
}

impl Weapon {
    /// Validate and normalize one raw row. Requires a string id and the
    /// compound category string.
    pub fn from_row(row: &RawRow) -> Option<Self> {
        let id = row::string(row, "id")?.to_string();
        let raw_category = row::string(row, "category")?;
        let (category, size) = parse_weapon_category(raw_category);

        Some(Self {
            name: display_name_from_id(&id),
            weapon_class: row::string(row, "class").unwrap_or_default().to_string(),
            category,
            size,
            tier: material_tier(raw_category),
            distance: row::num_or(row, "distance", 0.0),
            penetration: row::num_or(row, "penetration", 0.0),
            cooldown: row::num_or(row, "cooldown", 0.0),
            angle: row::num_or(row, "angle", 0.0),
            scatter: row::num_or(row, "scatter", 0.0),
            speed_factor: extract_speed_factor(row::string(row, "extra").unwrap_or_default()),
            price: row::num_or(row, "price", 0.0),
            crafting_type: row::string(row, "crafting_type")
                .and_then(CraftingType::parse)
                .unwrap_or(CraftingType::ByGold),
            icon: row::opt_string(row, "icon"),
            id,
        })
    }
}

/// Normalize the weapons collection.
pub fn normalize_weapons(rows: &[RawRow]) -> Vec<Weapon> {
    super::decode_rows("weapons", rows, Weapon::from_row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_culverin_iron_derives_all_three() {
        let (category, size) = parse_weapon_category("Light Culverin Iron");
        assert_eq!(category, WeaponCategory::Culverin);
        assert_eq!(size, WeaponSize::Light);
        assert_eq!(material_tier("Light Culverin Iron"), 3);
    }

    #[test]
    fn category_substring_priority() {
        assert_eq!(parse_weapon_category("Distance Gun").0, WeaponCategory::Culverin);
        assert_eq!(parse_weapon_category("Heavy Carronade").0, WeaponCategory::Carronade);
        // "heavy" matches the carronade branch before anything else.
        assert_eq!(parse_weapon_category("Heavy Bombard").0, WeaponCategory::Carronade);
        assert_eq!(parse_weapon_category("Medium Bombard").0, WeaponCategory::Bombard);
        assert_eq!(parse_weapon_category("Mortar Default").0, WeaponCategory::Mortar);
        assert_eq!(parse_weapon_category("Plain Gun").0, WeaponCategory::Cannon);
    }

    #[test]
    fn size_falls_back_to_medium() {
        assert_eq!(parse_weapon_category("Culverin Iron").1, WeaponSize::Medium);
        assert_eq!(parse_weapon_category("Heavy Cannon").1, WeaponSize::Heavy);
    }

    #[test]
    fn material_tier_priority() {
        assert_eq!(material_tier("Medium Cannon CastIron"), 5);
        assert_eq!(material_tier("Medium Cannon Default"), 5);
        assert_eq!(material_tier("Medium Cannon Bronze"), 4);
        assert_eq!(material_tier("Medium Cannon Steel"), 2);
        assert_eq!(material_tier("Medium Cannon Gold"), 1);
        assert_eq!(material_tier("Medium Cannon Elite"), 1);
        assert_eq!(material_tier("Medium Cannon Wood"), 4);
    }

    #[test]
    fn display_name_title_cases_tokens() {
        assert_eq!(display_name_from_id("ncs_long_nine"), "Long Nine");
        assert_eq!(display_name_from_id("bronze_gun"), "Bronze Gun");
    }

    #[test]
    fn speed_factor_extraction() {
        assert_eq!(extract_speed_factor("SpeedFactor:0.85;Other:1"), 0.85);
        assert_eq!(extract_speed_factor("Other:1"), 1.0);
        assert_eq!(extract_speed_factor(""), 1.0);
    }
}
