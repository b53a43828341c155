//! Archetypes command handler: per-archetype ship rankings.

use anyhow::Result;

use broadside_lib::{
    calculate_stat_maximums, top_ships_for_archetype, AppData, Archetype, ArchetypeScore,
};

pub fn handle_archetypes(snapshot: &AppData, archetype: Option<Archetype>, limit: usize) -> Result<()> {
    if snapshot.ships.is_empty() {
        println!("No ships loaded; nothing to rank.");
        return Ok(());
    }

    let maximums = calculate_stat_maximums(&snapshot.ships);
    let selected: Vec<Archetype> = match archetype {
        Some(one) => vec![one],
        None => Archetype::ALL.to_vec(),
    };

    for archetype in selected {
        let ranked = top_ships_for_archetype(&snapshot.ships, archetype, &maximums, limit);
        println!("{} - {}", archetype.display_name(), archetype.description());
        print_ranking(&ranked);
        println!();
    }
    Ok(())
}

fn print_ranking(ranked: &[ArchetypeScore<'_>]) {
    for (position, entry) in ranked.iter().enumerate() {
        println!(
            "  {}. {:<24} tier {} score {}",
            position + 1,
            entry.ship.name,
            entry.ship.tier,
            entry.score,
        );
    }
}
