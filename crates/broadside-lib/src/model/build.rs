//! User-authored build records.
//!
//! Serialized camelCase so the persisted container stays byte-compatible
//! with exports from the original web app.

use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;

/// Weapon loadout by mount point. Missing mounts stay unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildWeapons {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadside: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mortar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildAmmo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub archetype: Archetype,
    pub tier: i64,
    pub ship_id: Option<i64>,
    #[serde(default)]
    pub weapons: BuildWeapons,
    #[serde(default)]
    pub ammo: BuildAmmo,
    #[serde(default)]
    pub upgrades: Vec<String>,
    #[serde(default)]
    pub consumables: Vec<String>,
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub estimated_score: f64,
    #[serde(default)]
    pub created_at: u64,
    #[serde(default)]
    pub updated_at: u64,
}

impl Build {
    /// Fresh empty build with nothing selected yet.
    pub fn template(id: String, archetype: Archetype, now_millis: u64) -> Self {
        Self {
            id,
            name: "New Build".to_string(),
            archetype,
            tier: 4,
            ship_id: None,
            weapons: BuildWeapons::default(),
            ammo: BuildAmmo::default(),
            upgrades: Vec::new(),
            consumables: Vec::new(),
            strategy: String::new(),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            estimated_score: 0.0,
            created_at: now_millis,
            updated_at: now_millis,
        }
    }
}
