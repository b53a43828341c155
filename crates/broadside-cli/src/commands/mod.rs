// Each module handles one CLI subcommand; main.rs only parses and
// dispatches.

pub mod archetypes;
pub mod builds;
pub mod compare;
pub mod crews;
pub mod ships;
pub mod sync;
pub mod weapons;
