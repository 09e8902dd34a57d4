//! Case suites, reports and table rendering for the upconv solver.

#[cfg(feature = "cli")]
pub mod cli;
pub mod eval;
pub mod table;

#[cfg(feature = "cli")]
pub use cli::*;
pub use eval::*;
pub use table::*;
