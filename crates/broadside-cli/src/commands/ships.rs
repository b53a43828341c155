//! Ships command handler: filtered, sorted listing of the ship catalog.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use broadside_lib::criteria::ship_view;
use broadside_lib::model::ShipClass;
use broadside_lib::view::{SortDirection, SortSpec};
use broadside_lib::AppData;

#[derive(Args, Debug)]
pub struct ShipsArgs {
    /// Only ships of this class.
    #[arg(long)]
    pub class: Option<ShipClass>,

    /// Only ships of this tier (1 through 7).
    #[arg(long)]
    pub tier: Option<i64>,

    /// Only ships whose PvP role contains this text.
    #[arg(long)]
    pub role: Option<String>,

    /// Only ships whose name or subtype contains this text.
    #[arg(long)]
    pub search: Option<String>,

    /// Sort field (name, tier, rank, health, armor, speed, mobility,
    /// cargo, crew_slots, cost_gold, class, role).
    #[arg(long, default_value = "tier")]
    pub sort: String,

    /// Sort descending instead of ascending.
    #[arg(long)]
    pub desc: bool,
}

pub fn handle_ships(snapshot: &AppData, args: ShipsArgs) -> Result<()> {
    let mut view = ship_view(Arc::new(snapshot.ships.clone()));
    view.update_criteria(|c| {
        c.class = args.class;
        c.tier = args.tier.map(|t| t.to_string()).unwrap_or_default();
        c.role = args.role.clone().unwrap_or_default();
        c.search = args.search.clone().unwrap_or_default();
    });
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    view.set_sort(SortSpec::new(args.sort.clone(), direction));

    let ships = view.items();
    if ships.is_empty() {
        println!("No ships match the given filters.");
        return Ok(());
    }

    println!("Ships ({}):", ships.len());
    println!(
        "{:<24} {:>4} {:<10} {:>8} {:>6} {:>6} {:>7} {:<12}",
        "Name", "Tier", "Class", "Health", "Armor", "Speed", "Cargo", "Role"
    );
    for ship in ships {
        println!(
            "{:<24} {:>4} {:<10} {:>8.0} {:>6.1} {:>6.1} {:>7.0} {:<12}",
            ship.name,
            ship.tier,
            ship.ship_class.as_str(),
            ship.health,
            ship.armor,
            ship.speed,
            ship.cargo,
            ship.pvp_role,
        );
    }
    Ok(())
}
