//! Broadside library entry points.
//!
//! This crate loads the remote game dataset, normalizes it into typed
//! collections, and exposes the pieces a planning frontend needs: cached
//! aggregation, filtered and sorted views, archetype scoring, lookups, and
//! persisted user builds. Higher-level consumers (CLI) should only depend on
//! the types exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod aggregate;
pub mod archetype;
pub mod builds;
pub mod cache;
pub mod criteria;
pub mod error;
pub mod localization;
pub mod lookup;
pub mod model;
pub mod numeric;
pub mod source;
pub mod storage;
pub mod view;

pub use aggregate::{AppData, Aggregator, SNAPSHOT_TTL};
pub use archetype::{
    all_archetype_top_ships, best_archetype_for_ship, calculate_archetype_score,
    calculate_stat_maximums, top_ships_for_archetype, Archetype, ArchetypeScore,
    ArchetypeWeights, StatMaximums,
};
pub use builds::{BuildStore, ImportReport, SaveDebouncer};
pub use cache::TtlCache;
pub use criteria::{
    build_view, crew_view, ship_view, weapon_view, BuildCriteria, CrewCriteria, ShipCriteria,
    WeaponCriteria,
};
pub use error::{Error, Result};
pub use localization::Localization;
pub use lookup::{ComparisonSet, Lookups};
pub use model::{Build, CaptainSkill, CrewUnit, Ship, Weapon};
pub use source::{DataSource, DirectorySource, HttpSource, MemorySource, RawRow};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use view::{SortDirection, SortKey, SortSpec, View};
