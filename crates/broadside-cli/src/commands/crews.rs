//! Crews command handler.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use broadside_lib::criteria::crew_view;
use broadside_lib::model::{CrewOptions, CrewType};
use broadside_lib::AppData;

#[derive(Args, Debug)]
pub struct CrewsArgs {
    /// Only crew units of this type.
    #[arg(long)]
    pub crew_type: Option<CrewType>,

    /// Only crew units with this hiring restriction.
    #[arg(long)]
    pub options: Option<CrewOptions>,

    /// Only crew units that matter in PvP.
    #[arg(long)]
    pub pvp_only: bool,

    /// Only crew units whose name or effect contains this text.
    #[arg(long)]
    pub search: Option<String>,
}

pub fn handle_crews(snapshot: &AppData, args: CrewsArgs) -> Result<()> {
    let mut view = crew_view(Arc::new(snapshot.crews.clone()));
    view.update_criteria(|c| {
        c.crew_type = args.crew_type;
        c.options = args.options;
        c.pvp_only = args.pvp_only;
        c.search = args.search.clone().unwrap_or_default();
    });

    let crews = view.items();
    if crews.is_empty() {
        println!("No crew units match the given filters.");
        return Ok(());
    }

    println!("Crew units ({}):", crews.len());
    println!(
        "{:<24} {:<10} {:>7} {:>7} {:>6} {:>5}",
        "Name", "Type", "Damage", "Health", "Cost", "PvP"
    );
    for crew in crews {
        println!(
            "{:<24} {:<10} {:>7.0} {:>7.0} {:>6.0} {:>5}",
            crew.name,
            crew.crew_type.as_str(),
            crew.damage,
            crew.health,
            crew.cost,
            if crew.pvp_relevant { "yes" } else { "no" },
        );
    }
    Ok(())
}
