//! Sync command handler: load a snapshot and report what came back.

use anyhow::Result;

use broadside_lib::AppData;

pub fn handle_sync(snapshot: &AppData) -> Result<()> {
    println!("Loaded collections:");
    print_count("ships", snapshot.ships.len());
    print_count("weapons", snapshot.weapons.len());
    print_count("ammo", snapshot.ammo.len());
    print_count("swivel ammo", snapshot.swivel_ammo.len());
    print_count("kegs", snapshot.kegs.len());
    print_count("crews", snapshot.crews.len());
    print_count("skills", snapshot.skills.len());
    print_count("upgrades", snapshot.upgrades.len());
    print_count("cosmetics", snapshot.cosmetics.len());
    print_count("consumables", snapshot.consumables.len());
    print_count("resources", snapshot.resources.len());
    print_count("ports", snapshot.ports.len());
    print_count("achievements", snapshot.achievements.len());
    print_count("ranks", snapshot.ranks.len());
    print_count("guilds", snapshot.guilds.len());
    print_count("arena bonuses", snapshot.arena_bonuses.len());
    print_count("localization strings", snapshot.localization.len());

    if snapshot.failed_tables.is_empty() {
        println!("All collections loaded.");
    } else {
        println!("Degraded collections: {}", snapshot.failed_tables.join(", "));
    }
    Ok(())
}

fn print_count(label: &str, count: usize) {
    println!("  {label:<22} {count:>6}");
}
