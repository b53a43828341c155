//! Versioned persistence for user-authored builds.
//!
//! The container lives under a single storage key as
//! `{"version": N, "builds": [...]}`. Loading an older version runs the
//! migration over the raw records and re-persists immediately; corrupt or
//! absent storage degrades to an empty list, never an error. Mutations
//! schedule a debounced write-through so rapid edits coalesce into one write.

use std::collections::hash_map::RandomState;
use std::collections::BTreeMap;
use std::hash::{BuildHasher, Hash, Hasher};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::archetype::Archetype;
use crate::model::Build;
use crate::storage::KeyValueStore;

pub const STORAGE_KEY: &str = "builds";
/// v2: the ship reference changed from string to number-or-null.
pub const STORAGE_VERSION: u64 = 2;
pub const AUTO_SAVE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Single pending save deadline. Scheduling again replaces the deadline
/// rather than stacking a second one.
#[derive(Debug)]
pub struct SaveDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SaveDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Clear and report whether a deadline was pending.
    pub fn take(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}

/// Outcome of an import: how many records landed and why the rest did not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub errors: Vec<String>,
}

pub struct BuildStore<S: KeyValueStore> {
    storage: S,
    builds: Vec<Build>,
    debouncer: SaveDebouncer,
}

impl<S: KeyValueStore> BuildStore<S> {
    /// Load the persisted container, migrating older versions in place.
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            builds: Vec::new(),
            debouncer: SaveDebouncer::new(AUTO_SAVE_DEBOUNCE),
        };
        store.builds = store.load();
        store
    }

    fn load(&mut self) -> Vec<Build> {
        let Some(text) = self.storage.read(STORAGE_KEY) else {
            return Vec::new();
        };

        let container: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "persisted builds are not valid JSON, starting empty");
                return Vec::new();
            }
        };

        let version = container
            .get("version")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        let Some(raw_builds) = container.get("builds").and_then(Value::as_array) else {
            warn!("persisted container carries no builds array, starting empty");
            return Vec::new();
        };
        let mut records: Vec<Value> = raw_builds.clone();

        if version != STORAGE_VERSION {
            info!(from = version, to = STORAGE_VERSION, "migrating persisted builds");
            for record in &mut records {
                migrate_ship_reference(record);
            }
        }

        let mut builds = Vec::with_capacity(records.len());
        let mut dropped = 0usize;
        for record in records {
            match serde_json::from_value::<Build>(record) {
                Ok(build) => builds.push(build),
                Err(_) => dropped += 1,
            }
        }
        if dropped > 0 {
            warn!(dropped, "dropped persisted builds failing structural decode");
        }

        if version != STORAGE_VERSION {
            // Persist the migrated container right away so the next load
            // reads the current version.
            self.persist(&builds);
        }

        builds
    }

    pub fn builds(&self) -> &[Build] {
        &self.builds
    }

    pub fn len(&self) -> usize {
        self.builds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Build> {
        self.builds.iter().find(|b| b.id == id)
    }

    /// Append a new build with a fresh id and timestamps.
    pub fn create(&mut self, build: Build) -> Build {
        self.create_at(build, now_millis(), Instant::now())
    }

    pub fn create_at(&mut self, mut build: Build, now_ms: u64, now: Instant) -> Build {
        build.id = generate_build_id(now_ms);
        build.created_at = now_ms;
        build.updated_at = now_ms;
        self.builds.push(build.clone());
        self.debouncer.schedule(now);
        build
    }

    /// Fresh empty build for the given archetype.
    pub fn create_template(&mut self, archetype: Archetype) -> Build {
        let now_ms = now_millis();
        self.create_at(
            Build::template(String::new(), archetype, now_ms),
            now_ms,
            Instant::now(),
        )
    }

    /// Apply a partial edit to a build. The id cannot be changed; the
    /// closure's edits to it are discarded.
    pub fn update(&mut self, id: &str, apply: impl FnOnce(&mut Build)) -> Option<Build> {
        self.update_at(id, apply, now_millis(), Instant::now())
    }

    pub fn update_at(
        &mut self,
        id: &str,
        apply: impl FnOnce(&mut Build),
        now_ms: u64,
        now: Instant,
    ) -> Option<Build> {
        let build = self.builds.iter_mut().find(|b| b.id == id)?;
        apply(build);
        build.id = id.to_string();
        build.updated_at = now_ms;
        let updated = build.clone();
        self.debouncer.schedule(now);
        Some(updated)
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.delete_at(id, Instant::now())
    }

    pub fn delete_at(&mut self, id: &str, now: Instant) -> bool {
        let before = self.builds.len();
        self.builds.retain(|b| b.id != id);
        let deleted = self.builds.len() < before;
        if deleted {
            self.debouncer.schedule(now);
        }
        deleted
    }

    /// Clone an existing build under a new id and name suffix.
    pub fn duplicate(&mut self, id: &str) -> Option<Build> {
        self.duplicate_at(id, now_millis(), Instant::now())
    }

    pub fn duplicate_at(&mut self, id: &str, now_ms: u64, now: Instant) -> Option<Build> {
        let original = self.get(id)?.clone();
        let mut copy = original;
        copy.id = generate_build_id(now_ms);
        copy.name = format!("{} (Copy)", copy.name);
        copy.created_at = now_ms;
        copy.updated_at = now_ms;
        self.builds.push(copy.clone());
        self.debouncer.schedule(now);
        Some(copy)
    }

    pub fn clear(&mut self) {
        self.clear_at(Instant::now());
    }

    pub fn clear_at(&mut self, now: Instant) {
        self.builds.clear();
        self.debouncer.schedule(now);
    }

    /// Import builds from untrusted container JSON. Valid records get fresh
    /// ids and are appended; invalid ones are skipped and reported by name.
    pub fn import(&mut self, text: &str) -> ImportReport {
        self.import_at(text, now_millis(), Instant::now())
    }

    pub fn import_at(&mut self, text: &str, now_ms: u64, now: Instant) -> ImportReport {
        let mut report = ImportReport::default();

        let container: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(err) => {
                report.errors.push(format!("Parse error: {err}"));
                return report;
            }
        };
        let Some(candidates) = container.get("builds").and_then(Value::as_array) else {
            report.errors.push("Invalid build data format".to_string());
            return report;
        };

        let mut appended = false;
        for candidate in candidates {
            if !validate_build(candidate) {
                let name = candidate
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown");
                report.errors.push(format!("Invalid build: {name}"));
                continue;
            }

            // Legacy string ship references are valid on import; bring them
            // to the current shape before the typed decode.
            let mut record = candidate.clone();
            migrate_ship_reference(&mut record);
            match serde_json::from_value::<Build>(record) {
                Ok(mut build) => {
                    build.id = generate_build_id(now_ms);
                    if build.created_at == 0 {
                        build.created_at = now_ms;
                    }
                    build.updated_at = now_ms;
                    self.builds.push(build);
                    report.imported += 1;
                    appended = true;
                }
                Err(_) => {
                    let name = candidate
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or("Unknown");
                    report.errors.push(format!("Invalid build: {name}"));
                }
            }
        }

        if appended {
            self.debouncer.schedule(now);
        }
        report
    }

    /// Export the full list or an id subset as pretty-printed container JSON.
    pub fn export(&self, ids: Option<&[String]>) -> String {
        self.export_at(ids, now_millis())
    }

    pub fn export_at(&self, ids: Option<&[String]>, exported_at: u64) -> String {
        let selected: Vec<&Build> = match ids {
            Some(ids) => self
                .builds
                .iter()
                .filter(|b| ids.iter().any(|id| *id == b.id))
                .collect(),
            None => self.builds.iter().collect(),
        };
        let container = json!({
            "version": STORAGE_VERSION,
            "builds": selected,
            "exportedAt": exported_at,
        });
        serde_json::to_string_pretty(&container).unwrap_or_else(|_| String::from("{}"))
    }

    /// Builds grouped by archetype, every archetype present as a key.
    pub fn by_archetype(&self) -> BTreeMap<Archetype, Vec<&Build>> {
        let mut grouped: BTreeMap<Archetype, Vec<&Build>> = Archetype::ALL
            .iter()
            .map(|&archetype| (archetype, Vec::new()))
            .collect();
        for build in &self.builds {
            if let Some(entry) = grouped.get_mut(&build.archetype) {
                entry.push(build);
            }
        }
        grouped
    }

    /// Write through if the debounce deadline has passed.
    pub fn flush_if_due(&mut self, now: Instant) -> bool {
        if !self.debouncer.is_due(now) {
            return false;
        }
        self.flush();
        true
    }

    /// Unconditional write-through, clearing any pending deadline.
    pub fn flush(&mut self) {
        self.debouncer.take();
        let builds = self.builds.clone();
        self.persist(&builds);
    }

    pub fn has_pending_save(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn persist(&mut self, builds: &[Build]) {
        let container = json!({
            "version": STORAGE_VERSION,
            "builds": builds,
        });
        let text = match serde_json::to_string(&container) {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "failed to serialize builds container");
                return;
            }
        };
        if !self.storage.write(STORAGE_KEY, &text) {
            warn!("failed to persist builds, keeping in-memory state");
        }
    }
}

/// v1 to v2: a string ship reference becomes a number, with empty and
/// non-numeric strings becoming null. Idempotent by construction since the
/// output shapes are never strings.
pub fn migrate_ship_reference(record: &mut Value) {
    let Some(ship_id) = record.get("shipId") else {
        return;
    };
    let Some(raw) = ship_id.as_str() else {
        return;
    };
    let migrated = if raw.is_empty() {
        Value::Null
    } else {
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => json!(n as i64),
            _ => Value::Null,
        }
    };
    if let Some(object) = record.as_object_mut() {
        object.insert("shipId".to_string(), migrated);
    }
}

/// Structural validation used on import, stricter than runtime typing.
pub fn validate_build(value: &Value) -> bool {
    let Some(record) = value.as_object() else {
        return false;
    };

    let name_ok = record
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|n| !n.trim().is_empty());
    if !name_ok {
        return false;
    }

    let archetype_ok = record
        .get("archetype")
        .and_then(Value::as_str)
        .is_some_and(|a| Archetype::parse(a).is_some());
    if !archetype_ok {
        return false;
    }

    if !record.get("strategy").is_some_and(Value::is_string) {
        return false;
    }

    let tier_ok = record
        .get("tier")
        .and_then(Value::as_f64)
        .is_some_and(|t| (1.0..=7.0).contains(&t));
    if !tier_ok {
        return false;
    }

    if let Some(score) = record.get("estimatedScore") {
        if !score.is_number() {
            return false;
        }
    }

    let ship_id_ok = match record.get("shipId") {
        None => false,
        Some(Value::Null) => true,
        Some(v) => v.is_number() || v.is_string(),
    };
    if !ship_id_ok {
        return false;
    }

    if !record.get("weapons").is_some_and(Value::is_object) {
        return false;
    }

    ["upgrades", "strengths", "weaknesses"]
        .iter()
        .all(|key| record.get(*key).is_some_and(Value::is_array))
}

/// Collision-resistant id: base36 timestamp plus a random suffix.
pub fn generate_build_id(now_ms: u64) -> String {
    let mut hasher = RandomState::new().build_hasher();
    now_ms.hash(&mut hasher);
    let random = to_base36(hasher.finish());
    let suffix: String = random.chars().take(6).collect();
    format!("build_{}_{}", to_base36(now_ms), suffix)
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
