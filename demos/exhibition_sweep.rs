//! Example: Exhibition × Cold-Storage Sweep, 2015 → 2100
//!
//! Runs the reference grid of loan schedules for a triacetate film kept in
//! Italy: exhibitions of 1 to 4 weeks alternate with 6 to 36 months in a
//! 2 °C vault. Prints the final acetic-acid concentration of every schedule.
//!
//! **Usage**:
//!
//! ```bash
//! cargo run --release --example exhibition_sweep
//!
//! # custom scenario (JSON, see ScenarioConfig)
//! cargo run --release --example exhibition_sweep -- scenario.json
//!
//! # per-cell progress
//! RUST_LOG=debug cargo run --release --example exhibition_sweep
//! ```

use cta_aging::{
    physics::kelvin_to_celsius,
    scenario::ScenarioConfig,
    sweep::{SweepEngine, SweepGrid},
};

use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("═══════════════════════════════════════════════════════");
    println!("  CTA Film Aging - Exhibition / Cold-Storage Sweep");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Scenario ======

    let config = match std::env::args().nth(1) {
        Some(path) => ScenarioConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => ScenarioConfig::reference(),
    };

    println!("Scenario:");
    println!("  Location     : {}", config.climate.location);
    println!("  Span         : {} → {} ({} days)", config.start_date, config.end_date, config.simulated_days());
    println!("  Vault        : {:.1} °C", kelvin_to_celsius(config.climate.cold_storage_temperature));
    for (season, kelvin) in config.climate.exhibition.iter() {
        println!("  {:<13}: {:.1} °C", season.to_string(), kelvin_to_celsius(kelvin));
    }
    println!("  HOAc₀        : {} mol/m³", config.initial.acetic_acid);
    println!("  Ceiling      : {} mol/m³\n", config.initial.acid_ceiling());

    // ====== Sweep ======

    let grid = SweepGrid::reference();
    let engine = SweepEngine::new(config);

    let start = Instant::now();
    let matrix = engine.run(&grid)?;
    let elapsed = start.elapsed();

    println!("Final HOAc (mol/m³), rows = cold storage, columns = exhibition:\n");
    println!("{matrix}");

    for failure in matrix.failures() {
        println!(
            "  ✗ {} d / {} mo: {}",
            failure.exhibition_days, failure.cold_storage_months, failure.error
        );
    }

    println!("\n{} cells in {:.2?}", grid.len(), elapsed);
    println!("═══════════════════════════════════════════════════════");

    Ok(())
}
