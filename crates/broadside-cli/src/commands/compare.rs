//! Compare command handler: side-by-side stats for up to three ships.

use anyhow::{bail, Result};

use broadside_lib::lookup::ComparisonSet;
use broadside_lib::{AppData, Lookups};

pub fn handle_compare(snapshot: &AppData, names: &[String]) -> Result<()> {
    if names.len() > ComparisonSet::MAX_SHIPS {
        bail!("at most {} ships can be compared", ComparisonSet::MAX_SHIPS);
    }

    let lookups = Lookups::build(snapshot);
    let mut set = ComparisonSet::new();
    for name in names {
        let ship = lookups.ship_by_name(name)?;
        set.add(ship.id);
    }

    let ships = set.resolve(&lookups);
    if ships.is_empty() {
        println!("Nothing to compare.");
        return Ok(());
    }

    let name_row: Vec<String> = ships.iter().map(|s| s.name.clone()).collect();
    println!("{:<12} {}", "", name_row.join(" | "));
    print_row("Tier", &ships, |s| s.tier.to_string());
    print_row("Class", &ships, |s| s.ship_class.to_string());
    print_row("Role", &ships, |s| s.pvp_role.clone());
    print_row("Health", &ships, |s| format!("{:.0}", s.health));
    print_row("Armor", &ships, |s| format!("{:.1}", s.armor));
    print_row("Speed", &ships, |s| format!("{:.1}", s.speed));
    print_row("Mobility", &ships, |s| format!("{:.1}", s.mobility));
    print_row("Cargo", &ships, |s| format!("{:.0}", s.cargo));
    print_row("Crew slots", &ships, |s| format!("{:.0}", s.crew_slots));
    print_row("Cost", &ships, |s| format!("{:.0}", s.cost_gold));
    Ok(())
}

fn print_row(
    label: &str,
    ships: &[&broadside_lib::Ship],
    cell: impl Fn(&broadside_lib::Ship) -> String,
) {
    let cells: Vec<String> = ships.iter().map(|s| cell(s)).collect();
    println!("{:<12} {}", label, cells.join(" | "));
}
