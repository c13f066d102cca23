//! Example: Phase-by-Phase History of One Loan Schedule
//!
//! Follows a single schedule (4-week exhibitions, 1-year storage) through the
//! first decade and prints every phase: dates, temperature, rate constant
//! and the acid level before and after. Shows the saw-tooth of fast aging on
//! display and slow aging in the vault.

use cta_aging::{
    physics::kelvin_to_celsius,
    scenario::ScenarioConfig,
    schedule::{Phase, PhasePlan, PhaseScheduler},
    solver::DormandPrince,
};

use chrono::NaiveDate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════");
    println!("  CTA Film Aging - Phase History");
    println!("═══════════════════════════════════════════════════════\n");

    let end = NaiveDate::from_ymd_opt(2025, 1, 1).ok_or("invalid end date")?;
    let reference = ScenarioConfig::reference();
    let start = reference.start_date;
    let config = reference.with_dates(start, end);
    config.validate()?;

    let plan = PhasePlan::new(28, 12);
    let integrator = DormandPrince::new();
    let history = PhaseScheduler::new(&config, plan, &integrator)?.run_with_history()?;

    println!(
        "{:<14} {:<12} {:>6} {:>8} {:>12} {:>10} {:>10}",
        "phase", "start", "days", "°C", "k", "HOAc in", "HOAc out"
    );

    for record in &history {
        let label = match record.scheduled.phase {
            Phase::Exhibition { season, .. } => format!("show ({})", season),
            Phase::ColdStorage { .. } => "vault".to_string(),
        };
        let truncated = if record.scheduled.is_truncated() { " *" } else { "" };

        println!(
            "{:<14} {:<12} {:>6} {:>8.1} {:>12.3e} {:>10.4} {:>10.4}{}",
            label,
            record.scheduled.start,
            record.scheduled.days,
            kelvin_to_celsius(record.scheduled.phase.temperature()),
            record.rate_constant,
            record.acetic_acid_start,
            record.acetic_acid_end,
            truncated,
        );
    }

    let Some(last) = history.last() else {
        println!("(empty timeline)");
        return Ok(());
    };

    let on_display: f64 = history
        .iter()
        .filter(|r| matches!(r.scheduled.phase, Phase::Exhibition { .. }))
        .map(|r| r.acetic_acid_end - r.acetic_acid_start)
        .sum();
    let total = last.acetic_acid_end - config.initial.acetic_acid;

    println!("\n* truncated at the end date");
    println!(
        "Acid produced on display: {:.4} of {:.4} mol/m³ ({:.1} %)",
        on_display,
        total,
        100.0 * on_display / total
    );
    println!("═══════════════════════════════════════════════════════");

    Ok(())
}
