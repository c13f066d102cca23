//! Numerical methods for scalar rate equations
//!
//! Concrete implementations of the [`Integrator`](crate::solver::Integrator) trait.
//!
//! # Available Methods
//!
//! - **[`DormandPrince`]**: embedded Runge–Kutta 5(4)
//!   - Order: fifth-order solution, fourth-order error estimate
//!   - Cost: 6 function evaluations per step (first-same-as-last)
//!   - Use: **production runs**; adapts the step between one-week
//!     exhibitions and multi-year storage spans
//!
//! - **[`Rk4Integrator`]**: classical fourth-order Runge–Kutta, fixed step
//!   - Order: O(dt⁴)
//!   - Cost: 4 function evaluations per step
//!   - Use: reference solutions and benchmarks
//!
//! # Design
//!
//! Each integrator is:
//! - **Stateless**: one instance serves every phase of every sweep cell
//! - **Fail-fast**: returns an error instead of a doubtful number

mod dormand_prince;
mod rk4;

// Re-exports for convenience
pub use dormand_prince::DormandPrince;
pub use rk4::Rk4Integrator;
