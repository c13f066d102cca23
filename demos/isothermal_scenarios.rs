//! Example: 50 Years at Constant Temperature
//!
//! Compares a good (2 °C), an average (7 °C) and a bad (15 °C) storage room
//! over fifty years, printing HOAc once a year, then checks the adaptive
//! integrator against fixed-step RK4 on the same cases.

use cta_aging::{
    scenario::{run_isothermal, IsothermalCase, ScenarioConfig},
    solver::{DormandPrince, Rk4Integrator},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════");
    println!("  CTA Film Aging - Isothermal Storage, 50 Years");
    println!("═══════════════════════════════════════════════════════\n");

    let config = ScenarioConfig::reference();
    let cases = IsothermalCase::reference_cases();
    let years = 50;

    let table = run_isothermal(&config, &cases, years, 1, &DormandPrince::new())?;

    // ====== Annual table ======

    print!("{:>6}", "year");
    for series in &table.series {
        print!("{:>12}", series.case.label);
    }
    println!();

    for (i, year) in table.years.iter().enumerate() {
        if i % 5 != 0 {
            continue;
        }
        print!("{:>6}", year);
        for series in &table.series {
            print!("{:>12.3}", series.acetic_acid[i]);
        }
        println!();
    }

    // ====== Cross-check ======

    let reference = run_isothermal(&config, &cases, years, 1, &Rk4Integrator::new())?;

    println!("\nDormand-Prince vs RK4 after {} years:", years);
    for (adaptive, fixed) in table.series.iter().zip(reference.series.iter()) {
        let (Some(a), Some(b)) = (adaptive.final_value(), fixed.final_value()) else {
            continue;
        };
        println!(
            "  {:>6}: {:.6} vs {:.6} (relative difference {:.2e})",
            adaptive.case.label,
            a,
            b,
            ((a - b) / b).abs()
        );
    }

    println!("\n═══════════════════════════════════════════════════════");

    Ok(())
}
