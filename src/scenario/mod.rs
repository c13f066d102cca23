//! Scenario definitions
//!
//! - **`config`**: [`ScenarioConfig`], the immutable inputs of a run
//! - **`isothermal`**: constant-temperature runs sampled over the years

mod config;
mod isothermal;

pub use config::ScenarioConfig;
pub use isothermal::{run_isothermal, IsothermalCase, IsothermalSeries, IsothermalTable};
