//! Exact-multiple ConvTranspose3d parameter solving.
//!
//! Re-exports the solver ([`params`]) and the suite/report tooling built on
//! it ([`planner`]).

pub use upconv_params as params;
pub use upconv_planner as planner;

pub use upconv_params::{solve, ConvTransposeParams, SolveRequest, SolverError};
