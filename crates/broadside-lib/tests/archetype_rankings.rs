mod common;

use broadside_lib::{
    all_archetype_top_ships, best_archetype_for_ship, calculate_archetype_score,
    calculate_stat_maximums, top_ships_for_archetype, Aggregator, Archetype,
};
use common::fixture_source;

#[test]
fn maximums_come_from_the_loaded_fleet() {
    let snapshot = Aggregator::new(Box::new(fixture_source()), "en").load();
    let maximums = calculate_stat_maximums(&snapshot.ships);
    assert_eq!(maximums.health, 100.0);
    assert_eq!(maximums.speed, 8.0);
}

#[test]
fn rankings_are_descending_and_bounded() {
    let snapshot = Aggregator::new(Box::new(fixture_source()), "en").load();
    let maximums = calculate_stat_maximums(&snapshot.ships);
    let top = top_ships_for_archetype(&snapshot.ships, Archetype::Brawler, &maximums, 2);
    assert_eq!(top.len(), 2);
    assert!(top[0].score >= top[1].score);
}

#[test]
fn every_archetype_gets_a_ranking() {
    let snapshot = Aggregator::new(Box::new(fixture_source()), "en").load();
    let all = all_archetype_top_ships(&snapshot.ships, 3);
    assert_eq!(all.len(), Archetype::ALL.len());
    for (_, ranked) in &all {
        assert_eq!(ranked.len(), snapshot.ships.len().min(3));
    }
}

#[test]
fn trade_archetype_prefers_the_cargo_hull() {
    let snapshot = Aggregator::new(Box::new(fixture_source()), "en").load();

    // All fixture ships share identical stats, so cargo weighting alone
    // cannot separate them; bias the cargo hull upward first.
    let mut ships = snapshot.ships.clone();
    for ship in &mut ships {
        if ship.name == "Merchant Prince" {
            ship.cargo = 200.0;
        }
    }
    let maximums = calculate_stat_maximums(&ships);
    let top = top_ships_for_archetype(&ships, Archetype::Trade, &maximums, 1);
    assert_eq!(top[0].ship.name, "Merchant Prince");
}

#[test]
fn hull_stats_never_underflow_the_placeholder_floor() {
    // A ship with zero hull stats still carries the fixed combat placeholder
    // for each archetype, so the best pick is the heaviest combat weighting.
    let snapshot = Aggregator::new(Box::new(fixture_source()), "en").load();
    let maximums = calculate_stat_maximums(&snapshot.ships);
    let mut ship = snapshot.ships[0].clone();
    ship.health = 0.0;
    ship.speed = 0.0;
    ship.armor = 0.0;
    ship.cargo = 0.0;
    ship.crew_slots = 0.0;

    let (archetype, score) = best_archetype_for_ship(&ship, &maximums);
    assert_eq!(archetype, Archetype::Sniper);
    assert_eq!(score, calculate_archetype_score(&ship, Archetype::Sniper, &maximums));
    assert!(score > 0);
}
