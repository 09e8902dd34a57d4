//! Solver request and parameter structures.

use crate::error::Result;
use crate::shape::transposed_output_size;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stride, padding and output padding of a ConvTranspose3d layer.
///
/// The same values apply to all three spatial axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConvTransposeParams {
    pub stride: i64,
    pub padding: i64,
    pub output_padding: i64,
}

impl ConvTransposeParams {
    pub fn new(stride: i64, padding: i64, output_padding: i64) -> Self {
        Self {
            stride,
            padding,
            output_padding,
        }
    }

    /// Output extent produced for `input_size` with a cubic `kernel_size` kernel.
    pub fn output_size(&self, input_size: i64, kernel_size: i64) -> i128 {
        transposed_output_size(input_size, kernel_size, self)
    }

    /// Whether these params scale `input_size` by exactly `multiplier`.
    pub fn reaches(&self, input_size: i64, kernel_size: i64, multiplier: i64) -> bool {
        self.output_size(input_size, kernel_size) == i128::from(multiplier) * i128::from(input_size)
    }
}

impl fmt::Display for ConvTransposeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stride={} padding={} output_padding={}",
            self.stride, self.padding, self.output_padding
        )
    }
}

fn default_allow_output_padding() -> bool {
    true
}

/// One solver query.
///
/// `allow_output_padding` defaults to `true` when omitted from serialized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolveRequest {
    pub input_size: i64,
    pub multiplier: i64,
    pub kernel_size: i64,
    #[serde(default = "default_allow_output_padding")]
    pub allow_output_padding: bool,
}

impl SolveRequest {
    pub fn new(input_size: i64, multiplier: i64, kernel_size: i64) -> Self {
        Self {
            input_size,
            multiplier,
            kernel_size,
            allow_output_padding: true,
        }
    }

    pub fn with_output_padding(mut self, allow: bool) -> Self {
        self.allow_output_padding = allow;
        self
    }

    /// Requested output extent, `multiplier * input_size`.
    pub fn target_size(&self) -> i128 {
        i128::from(self.multiplier) * i128::from(self.input_size)
    }

    pub fn solve(&self) -> Result<Option<ConvTransposeParams>> {
        crate::solver::solve(
            self.input_size,
            self.multiplier,
            self.kernel_size,
            self.allow_output_padding,
        )
    }
}
