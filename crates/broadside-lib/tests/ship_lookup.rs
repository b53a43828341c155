mod common;

use broadside_lib::lookup::{ships_by_class, ships_by_tier};
use broadside_lib::model::ShipClass;
use broadside_lib::{Aggregator, ComparisonSet, Error, Lookups};
use common::fixture_source;

fn lookups() -> Lookups {
    let snapshot = Aggregator::new(Box::new(fixture_source()), "en").load();
    Lookups::build(&snapshot)
}

#[test]
fn ship_by_name_is_case_insensitive() {
    let lookups = lookups();
    let ship = lookups.ship_by_name("sea wolf").unwrap();
    assert_eq!(ship.id, 1);
}

#[test]
fn unknown_ship_carries_close_suggestions() {
    let lookups = lookups();
    let err = lookups.ship_by_name("Sea Wulf").unwrap_err();
    match err {
        Error::UnknownShip { name, suggestions } => {
            assert_eq!(name, "Sea Wulf");
            assert!(suggestions.contains(&"Sea Wolf".to_string()));
        }
        other => panic!("expected UnknownShip, got {other:?}"),
    }
}

#[test]
fn garbage_name_yields_no_suggestions() {
    let lookups = lookups();
    assert!(lookups.fuzzy_ship_matches("zzzzqqq", 3).is_empty());
}

#[test]
fn resolve_ships_omits_stale_ids() {
    let lookups = lookups();
    let resolved = lookups.resolve_ships(&[1, 999, 2]);
    let ids: Vec<i64> = resolved.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn class_grouping_keeps_every_class_key() {
    let snapshot = Aggregator::new(Box::new(fixture_source()), "en").load();
    let grouped = ships_by_class(&snapshot.ships);
    assert_eq!(grouped.len(), ShipClass::ALL.len());

    let heavy = grouped
        .iter()
        .find(|(class, _)| *class == ShipClass::Heavy)
        .map(|(_, ships)| ships)
        .unwrap();
    assert_eq!(heavy.len(), 1);

    let imperial = grouped
        .iter()
        .find(|(class, _)| *class == ShipClass::Imperial)
        .map(|(_, ships)| ships)
        .unwrap();
    assert!(imperial.is_empty());
}

#[test]
fn tier_grouping_is_ordered() {
    let snapshot = Aggregator::new(Box::new(fixture_source()), "en").load();
    let grouped = ships_by_tier(&snapshot.ships);
    let tiers: Vec<i64> = grouped.keys().copied().collect();
    assert_eq!(tiers, vec![3, 4, 5]);
}

#[test]
fn comparison_set_caps_and_ignores_duplicates() {
    let mut set = ComparisonSet::new();
    set.add(1);
    set.add(1);
    assert_eq!(set.len(), 1);

    set.add(2);
    set.add(3);
    set.add(4);
    assert_eq!(set.ids(), &[1, 2, 3]);

    set.remove(2);
    assert_eq!(set.ids(), &[1, 3]);

    set.clear();
    assert!(set.is_empty());
}

#[test]
fn comparison_set_resolves_against_lookups() {
    let lookups = lookups();
    let mut set = ComparisonSet::new();
    set.add(3);
    set.add(999);
    let ships = set.resolve(&lookups);
    assert_eq!(ships.len(), 1);
    assert_eq!(ships[0].name, "Merchant Prince");
}
