//! Crew units and captain skills, including PvP-relevance derivation.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::localization::Localization;
use crate::source::RawRow;

use super::row;

/// Special-crew ids considered meaningful in PvP regardless of type.
static PVP_RELEVANT_CREW: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "unit_special_8",
        "unit_special_8b",
        "unit_special_8c",
        "unit_special_9",
        "unit_special_9b",
        "unit_special_11",
        "unit_special_11b",
        "unit_special_11c",
        "unit_special_21",
        "unit_special_28",
        "unit_special_30",
    ]
});

/// Skill ids considered PvP-relevant outside the combat category.
static PVP_RELEVANT_SKILLS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "skill_27", "skill_28", "skill_29", "skill_30", "skill_31", "skill_32", "skill_33",
        "skill_34", "skill_35", "skill_36", "skill_37", "skill_38", "skill_39", "skill_40",
        "skill_41", "skill_42", "skill_52", "skill_53",
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrewType {
    Sailor,
    Boarding,
    Special,
}

impl CrewType {
    pub const ALL: [CrewType; 3] = [CrewType::Sailor, CrewType::Boarding, CrewType::Special];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Sailor" => Some(Self::Sailor),
            "Boarding" => Some(Self::Boarding),
            "Special" => Some(Self::Special),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sailor => "Sailor",
            Self::Boarding => "Boarding",
            Self::Special => "Special",
        }
    }
}

impl FromStr for CrewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown crew type: {s}"))
    }
}

impl fmt::Display for CrewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Restriction on which captains may hire the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrewOptions {
    All,
    Combats,
    Sailors,
    Pirates,
    Adventurers,
    BoardingOnly,
    SailorOnly,
}

impl CrewOptions {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "All" => Some(Self::All),
            "Combats" => Some(Self::Combats),
            "Sailors" => Some(Self::Sailors),
            "Pirates" => Some(Self::Pirates),
            "Adventurers" => Some(Self::Adventurers),
            "BoardingOnly" => Some(Self::BoardingOnly),
            "SailorOnly" => Some(Self::SailorOnly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Combats => "Combats",
            Self::Sailors => "Sailors",
            Self::Pirates => "Pirates",
            Self::Adventurers => "Adventurers",
            Self::BoardingOnly => "BoardingOnly",
            Self::SailorOnly => "SailorOnly",
        }
    }
}

impl FromStr for CrewOptions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown crew options: {s}"))
    }
}

impl fmt::Display for CrewOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewUnit {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub crew_type: CrewType,
    pub damage: f64,
    pub health: f64,
    pub capacity: f64,
    pub cost: f64,
    pub cost_marks: f64,
    pub options: CrewOptions,
    pub effect: Option<String>,
    pub effect_per_sailor: Option<String>,
    pub effect_per_boarding: Option<String>,
    pub icon: Option<String>,
    pub pvp_relevant: bool,
}

/// Sailors and boarders always matter in PvP; specials only from the
/// fixed allow-list (gunners, artillerists, sail handlers and similar).
pub fn derive_crew_pvp_relevance(id: &str, crew_type: CrewType) -> bool {
    matches!(crew_type, CrewType::Sailor | CrewType::Boarding)
        || PVP_RELEVANT_CREW.contains(&id)
}

impl CrewUnit {
    pub fn from_row(row: &RawRow, loc: &Localization) -> Option<Self> {
        let id = row::string(row, "id")?.to_string();
        let crew_type = CrewType::parse(row::string(row, "type")?)?;
        let options = row::string(row, "options")
            .and_then(CrewOptions::parse)
            .unwrap_or(CrewOptions::All);

        Some(Self {
            name: loc.name(&id, row::string(row, "name")),
            description: loc.description(&id, "_text", row::opt_string(row, "description").as_deref()),
            crew_type,
            damage: row::num_or(row, "damage", 0.0),
            health: row::num_or(row, "health", 0.0),
            capacity: row::num_or(row, "capacity", 0.0),
            cost: row::num_or(row, "cost", 0.0),
            cost_marks: row::num_or(row, "cost_marks", 0.0),
            options,
            effect: row::opt_string(row, "effect"),
            effect_per_sailor: row::opt_string(row, "effect_per_sailor"),
            effect_per_boarding: row::opt_string(row, "effect_per_boarding"),
            icon: row::opt_string(row, "icon"),
            pvp_relevant: derive_crew_pvp_relevance(&id, crew_type),
            id,
        })
    }
}

pub fn normalize_crews(rows: &[RawRow], loc: &Localization) -> Vec<CrewUnit> {
    super::decode_rows("crews", rows, |row| CrewUnit::from_row(row, loc))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Economy,
    Logistics,
    Combat,
    Legend,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Economy,
        SkillCategory::Logistics,
        SkillCategory::Combat,
        SkillCategory::Legend,
    ];

    /// Upstream encodes the category as a small integer.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Logistics,
            2 => Self::Combat,
            3 => Self::Legend,
            _ => Self::Economy,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "economy" => Some(Self::Economy),
            "logistics" => Some(Self::Logistics),
            "combat" => Some(Self::Combat),
            "legend" => Some(Self::Legend),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Logistics => "logistics",
            Self::Combat => "combat",
            Self::Legend => "legend",
        }
    }
}

impl FromStr for SkillCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown skill category: {s}"))
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptainSkill {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub cost_points: f64,
    pub cost: Option<String>,
    pub effect: Option<String>,
    pub category: SkillCategory,
    pub position: Option<String>,
    pub radial_position: Option<String>,
    pub depends_on: Option<String>,
    pub required_achievements: Option<String>,
    pub required_ships: Option<String>,
    pub required_rank: Option<String>,
    pub icon: Option<String>,
    pub pvp_relevant: bool,
}

pub fn derive_skill_pvp_relevance(id: &str, category: SkillCategory) -> bool {
    category == SkillCategory::Combat || PVP_RELEVANT_SKILLS.contains(&id)
}

impl CaptainSkill {
    pub fn from_row(row: &RawRow, loc: &Localization) -> Option<Self> {
        let id = row::string(row, "id")?.to_string();
        // Placeholder rows and effect-less stubs are not real skills.
        if id == "removed" {
            return None;
        }
        let effect = row::opt_string(row, "effect")?;
        let category = SkillCategory::from_code(row::int_or(row, "category", 0));

        Some(Self {
            name: loc.name(&id, row::string(row, "name")),
            description: loc.description(&id, "_text", row::opt_string(row, "description").as_deref()),
            cost_points: row::num_or(row, "cost_points", 0.0),
            cost: row::opt_string(row, "cost"),
            effect: Some(effect),
            category,
            position: row::opt_string(row, "position"),
            radial_position: row::opt_string(row, "radial_position"),
            depends_on: row::opt_string(row, "depends_on"),
            required_achievements: row::opt_string(row, "required_achievements"),
            required_ships: row::opt_string(row, "required_ships"),
            required_rank: row::opt_string(row, "required_rank"),
            icon: row::opt_string(row, "icon"),
            pvp_relevant: derive_skill_pvp_relevance(&id, category),
            id,
        })
    }
}

pub fn normalize_skills(rows: &[RawRow], loc: &Localization) -> Vec<CaptainSkill> {
    super::decode_rows("skills", rows, |row| CaptainSkill::from_row(row, loc))
}
