//! Transposed-convolution parameter solving for exact-multiple upsampling.
//!
//! Given a cubic kernel and a desired integer scale factor `m`, the solver
//! finds `(stride, padding, output_padding)` for a ConvTranspose3d layer with
//! unit dilation whose output extent is exactly `m * input`. Stride is pinned
//! to `m`; output padding is searched over `{0, 1}` in ascending order and the
//! padding is derived in closed form.
//!
//! ```
//! use upconv_params::{solve, ConvTransposeParams};
//!
//! let params = solve(32, 2, 3, true).unwrap();
//! assert_eq!(params, Some(ConvTransposeParams::new(2, 1, 1)));
//! ```

pub mod config;
pub mod error;
pub mod shape;
pub mod solver;

pub use config::*;
pub use error::*;
pub use shape::*;
pub use solver::*;
