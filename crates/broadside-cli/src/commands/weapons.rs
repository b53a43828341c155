//! Weapons command handler.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use broadside_lib::criteria::weapon_view;
use broadside_lib::model::{WeaponCategory, WeaponSize};
use broadside_lib::view::{SortDirection, SortSpec};
use broadside_lib::AppData;

#[derive(Args, Debug)]
pub struct WeaponsArgs {
    /// Only weapons of this category.
    #[arg(long)]
    pub category: Option<WeaponCategory>,

    /// Only weapons of this size class.
    #[arg(long)]
    pub size: Option<WeaponSize>,

    /// Only weapons of this material tier (1 best, 5 worst).
    #[arg(long)]
    pub tier: Option<i64>,

    /// Only weapons whose name or class contains this text.
    #[arg(long)]
    pub search: Option<String>,

    /// Sort field (name, tier, distance, penetration, cooldown, angle,
    /// scatter, price, category, size).
    #[arg(long, default_value = "tier")]
    pub sort: String,

    /// Sort descending instead of ascending.
    #[arg(long)]
    pub desc: bool,
}

pub fn handle_weapons(snapshot: &AppData, args: WeaponsArgs) -> Result<()> {
    let mut view = weapon_view(Arc::new(snapshot.weapons.clone()));
    view.update_criteria(|c| {
        c.category = args.category;
        c.size = args.size;
        c.tier = args.tier.map(|t| t.to_string()).unwrap_or_default();
        c.search = args.search.clone().unwrap_or_default();
    });
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    view.set_sort(SortSpec::new(args.sort.clone(), direction));

    let weapons = view.items();
    if weapons.is_empty() {
        println!("No weapons match the given filters.");
        return Ok(());
    }

    println!("Weapons ({}):", weapons.len());
    println!(
        "{:<26} {:<10} {:<8} {:>4} {:>9} {:>11} {:>9}",
        "Name", "Category", "Size", "Tier", "Distance", "Penetration", "Cooldown"
    );
    for weapon in weapons {
        println!(
            "{:<26} {:<10} {:<8} {:>4} {:>9.0} {:>11.1} {:>9.1}",
            weapon.name,
            weapon.category.as_str(),
            weapon.size.as_str(),
            weapon.tier,
            weapon.distance,
            weapon.penetration,
            weapon.cooldown,
        );
    }
    Ok(())
}
