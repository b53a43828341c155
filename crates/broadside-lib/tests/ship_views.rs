mod common;

use std::sync::Arc;

use broadside_lib::criteria::{ship_view, weapon_view};
use broadside_lib::model::{ShipClass, WeaponCategory};
use broadside_lib::view::SortSpec;
use broadside_lib::Aggregator;
use common::fixture_source;

fn snapshot() -> Arc<broadside_lib::AppData> {
    Aggregator::new(Box::new(fixture_source()), "en").load()
}

#[test]
fn default_view_keeps_tier_order() {
    let snapshot = snapshot();
    let mut view = ship_view(Arc::new(snapshot.ships.clone()));
    let names: Vec<String> = view.items().iter().map(|s| s.name.clone()).collect();
    assert_eq!(names, vec!["Sea Wolf", "Merchant Prince", "Iron Maiden"]);
}

#[test]
fn class_and_tier_filters_compose() {
    let snapshot = snapshot();
    let mut view = ship_view(Arc::new(snapshot.ships.clone()));

    view.update_criteria(|c| c.class = Some(ShipClass::Fast));
    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].name, "Sea Wolf");

    // A tier filter that contradicts the class filter matches nothing.
    view.update_criteria(|c| c.tier = "5".to_string());
    assert!(view.items().is_empty());

    // An unparseable tier matches nothing rather than everything.
    view.update_criteria(|c| {
        c.class = None;
        c.tier = "five".to_string();
    });
    assert!(view.items().is_empty());
}

#[test]
fn search_is_case_insensitive_substring() {
    let snapshot = snapshot();
    let mut view = ship_view(Arc::new(snapshot.ships.clone()));
    view.update_criteria(|c| c.search = "IRON".to_string());
    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].name, "Iron Maiden");
}

#[test]
fn sort_direction_flips_without_refiltering() {
    let snapshot = snapshot();
    let mut view = ship_view(Arc::new(snapshot.ships.clone()));
    view.set_sort(SortSpec::descending("tier"));
    let tiers: Vec<i64> = view.items().iter().map(|s| s.tier).collect();
    assert_eq!(tiers, vec![5, 4, 3]);
}

#[test]
fn reset_restores_defaults() {
    let snapshot = snapshot();
    let mut view = ship_view(Arc::new(snapshot.ships.clone()));
    view.update_criteria(|c| c.search = "wolf".to_string());
    view.set_sort(SortSpec::descending("name"));
    assert_eq!(view.items().len(), 1);

    view.reset_all();
    assert_eq!(view.items().len(), 3);
    assert_eq!(view.sort().field, "tier");
}

#[test]
fn weapon_view_filters_by_derived_category() {
    let snapshot = snapshot();
    let mut view = weapon_view(Arc::new(snapshot.weapons.clone()));
    view.update_criteria(|c| c.category = Some(WeaponCategory::Carronade));
    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].name, "Smasher");
}
