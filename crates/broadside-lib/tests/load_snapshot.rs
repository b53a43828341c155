mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use broadside_lib::source::{tables, MemorySource};
use broadside_lib::Aggregator;
use common::{fixture_source, rows, ship_row};

#[test]
fn snapshot_normalizes_and_localizes_collections() {
    let mut aggregator = Aggregator::new(Box::new(fixture_source()), "en");
    let snapshot = aggregator.load();

    // Ships are ordered by tier then name, names resolved through the
    // localization table.
    let names: Vec<&str> = snapshot.ships.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Sea Wolf", "Merchant Prince", "Iron Maiden"]);
    assert_eq!(snapshot.ships[0].tier, 3);
    assert_eq!(snapshot.ships[2].tier, 5);

    assert_eq!(snapshot.weapons.len(), 2);
    assert_eq!(snapshot.weapons[0].name, "Long Nine");
    assert_eq!(snapshot.weapons[0].speed_factor, 0.9);

    assert_eq!(snapshot.crews.len(), 1);
    assert_eq!(snapshot.crews[0].name, "Gunner");

    assert!(snapshot.failed_tables.is_empty());
}

#[test]
fn unseeded_tables_read_as_empty_collections() {
    let mut aggregator = Aggregator::new(Box::new(fixture_source()), "en");
    let snapshot = aggregator.load();
    assert!(snapshot.ports.is_empty());
    assert!(snapshot.upgrades.is_empty());
    assert!(snapshot.arena_bonuses.is_empty());
}

#[test]
fn failed_table_degrades_without_aborting_the_load() {
    let source = MemorySource::new()
        .with_table(tables::SHIPS, rows(vec![ship_row(1, "ship_one", "Battleship", 3)]))
        .with_failing_table(tables::WEAPONS, "backend offline");
    let mut aggregator = Aggregator::new(Box::new(source), "en");
    let snapshot = aggregator.load();

    assert_eq!(snapshot.ships.len(), 1);
    assert!(snapshot.weapons.is_empty());
    assert_eq!(snapshot.failed_tables, vec![tables::WEAPONS.to_string()]);
}

#[test]
fn snapshot_is_shared_until_the_ttl_lapses() {
    let ttl = Duration::from_secs(60);
    let mut aggregator = Aggregator::with_ttl(Box::new(fixture_source()), "en", ttl);
    let start = Instant::now();

    let first = aggregator.load_at(start);
    let second = aggregator.load_at(start + Duration::from_secs(30));
    assert!(Arc::ptr_eq(&first, &second));

    let third = aggregator.load_at(start + ttl + Duration::from_secs(1));
    assert!(!Arc::ptr_eq(&first, &third));
}

#[test]
fn invalidate_forces_a_refetch() {
    let mut aggregator = Aggregator::new(Box::new(fixture_source()), "en");
    let now = Instant::now();
    let first = aggregator.load_at(now);
    aggregator.invalidate();
    let second = aggregator.load_at(now);
    assert!(!Arc::ptr_eq(&first, &second));
}
