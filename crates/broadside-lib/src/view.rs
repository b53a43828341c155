//! Generic filtered/sorted views over a snapshot collection.
//!
//! A [`View`] owns its source array, a filter criteria value, and a sort
//! spec. It recomputes lazily: any change marks the view dirty and the next
//! [`View::items`] call filters in a single pass and re-sorts. `Vec::sort_by`
//! is stable, so equal-key elements keep their source order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Value of one item's sort field.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
    Missing,
}

impl SortKey {
    /// String coercion used when two keys disagree about their kind.
    fn coerced(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Missing => String::new(),
        }
    }

    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.coerced().cmp(&other.coerced()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            _ => Err(format!("unknown sort direction: {s}")),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which field to sort by and in which direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

/// Single-pass filter predicate for one entity kind.
pub type Predicate<T, C> = fn(&T, &C) -> bool;

/// Sort-field extractor for one entity kind. Unknown fields read as
/// [`SortKey::Missing`] rather than failing.
pub type KeyFn<T> = fn(&T, &str) -> SortKey;

pub struct View<T, C> {
    source: Arc<Vec<T>>,
    criteria: C,
    default_criteria: C,
    sort: SortSpec,
    default_sort: SortSpec,
    matches: Predicate<T, C>,
    sort_key: KeyFn<T>,
    dirty: bool,
    cached: Vec<T>,
}

impl<T: Clone, C: Clone> View<T, C> {
    pub fn new(
        source: Arc<Vec<T>>,
        default_criteria: C,
        default_sort: SortSpec,
        matches: Predicate<T, C>,
        sort_key: KeyFn<T>,
    ) -> Self {
        Self {
            source,
            criteria: default_criteria.clone(),
            default_criteria,
            sort: default_sort.clone(),
            default_sort,
            matches,
            sort_key,
            dirty: true,
            cached: Vec::new(),
        }
    }

    /// Current filtered and sorted items, recomputing if anything changed.
    pub fn items(&mut self) -> &[T] {
        if self.dirty {
            self.recompute();
            self.dirty = false;
        }
        &self.cached
    }

    /// Swap in a new source array (a fresh snapshot's collection).
    pub fn set_source(&mut self, source: Arc<Vec<T>>) {
        self.source = source;
        self.dirty = true;
    }

    pub fn criteria(&self) -> &C {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: C) {
        self.criteria = criteria;
        self.dirty = true;
    }

    /// Mutate criteria in place through a closure.
    pub fn update_criteria(&mut self, apply: impl FnOnce(&mut C)) {
        apply(&mut self.criteria);
        self.dirty = true;
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        self.dirty = true;
    }

    /// Restore criteria to its default, leaving sort untouched.
    pub fn reset(&mut self) {
        self.criteria = self.default_criteria.clone();
        self.dirty = true;
    }

    /// Restore both criteria and sort to their defaults.
    pub fn reset_all(&mut self) {
        self.criteria = self.default_criteria.clone();
        self.sort = self.default_sort.clone();
        self.dirty = true;
    }

    fn recompute(&mut self) {
        let mut items: Vec<T> = self
            .source
            .iter()
            .filter(|item| (self.matches)(item, &self.criteria))
            .cloned()
            .collect();

        let field = self.sort.field.as_str();
        let sort_key = self.sort_key;
        items.sort_by(|a, b| {
            let ordering = sort_key(a, field).compare(&sort_key(b, field));
            match self.sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        self.cached = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: &'static str,
        tier: f64,
    }

    #[derive(Debug, Clone, Default)]
    struct Criteria {
        min_tier: f64,
    }

    fn matches(item: &Item, criteria: &Criteria) -> bool {
        item.tier >= criteria.min_tier
    }

    fn sort_key(item: &Item, field: &str) -> SortKey {
        match field {
            "name" => SortKey::Text(item.name.to_string()),
            "tier" => SortKey::Number(item.tier),
            _ => SortKey::Missing,
        }
    }

    fn view() -> View<Item, Criteria> {
        let source = Arc::new(vec![
            Item { name: "c", tier: 2.0 },
            Item { name: "a", tier: 1.0 },
            Item { name: "b", tier: 2.0 },
        ]);
        View::new(
            source,
            Criteria::default(),
            SortSpec::ascending("tier"),
            matches,
            sort_key,
        )
    }

    #[test]
    fn filters_and_sorts_with_stable_ties() {
        let mut view = view();
        let items: Vec<&str> = view.items().iter().map(|i| i.name).collect();
        // Tier ties between c and b keep source order.
        assert_eq!(items, vec!["a", "c", "b"]);
    }

    #[test]
    fn criteria_changes_take_effect_on_next_read() {
        let mut view = view();
        view.update_criteria(|c| c.min_tier = 2.0);
        let items: Vec<&str> = view.items().iter().map(|i| i.name).collect();
        assert_eq!(items, vec!["c", "b"]);
    }

    #[test]
    fn descending_reverses_order() {
        let mut view = view();
        view.set_sort(SortSpec::descending("name"));
        let items: Vec<&str> = view.items().iter().map(|i| i.name).collect();
        assert_eq!(items, vec!["c", "b", "a"]);
    }

    #[test]
    fn unknown_sort_field_keeps_source_order() {
        let mut view = view();
        view.set_sort(SortSpec::ascending("nonexistent"));
        let items: Vec<&str> = view.items().iter().map(|i| i.name).collect();
        assert_eq!(items, vec!["c", "a", "b"]);
    }

    #[test]
    fn mixed_key_kinds_fall_back_to_string_coercion() {
        assert_eq!(
            SortKey::Number(2.0).compare(&SortKey::Text("10".to_string())),
            Ordering::Greater
        );
        assert_eq!(SortKey::Missing.compare(&SortKey::Missing), Ordering::Equal);
    }

    #[test]
    fn reset_restores_criteria_but_not_sort() {
        let mut view = view();
        view.update_criteria(|c| c.min_tier = 2.0);
        view.set_sort(SortSpec::descending("tier"));
        view.reset();
        assert_eq!(view.items().len(), 3);
        assert_eq!(view.sort().direction, SortDirection::Descending);

        view.reset_all();
        assert_eq!(view.sort(), &SortSpec::ascending("tier"));
    }
}
