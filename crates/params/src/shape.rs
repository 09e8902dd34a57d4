//! Shape arithmetic for transposed convolutions with unit dilation.

use crate::config::ConvTransposeParams;
use crate::error::{Result, SolverError};

/// Output-padding values tried by the solver, in search order.
pub const OUTPUT_PADDING_CANDIDATES: [i64; 2] = [0, 1];

pub fn candidate_output_paddings(allow_output_padding: bool) -> &'static [i64] {
    if allow_output_padding {
        &OUTPUT_PADDING_CANDIDATES
    } else {
        &OUTPUT_PADDING_CANDIDATES[..1]
    }
}

/// `(input - 1) * stride - 2 * padding + (kernel - 1) + output_padding + 1`
///
/// Evaluated in 128-bit so any `i64` operands are exact.
pub fn transposed_output_size(
    input_size: i64,
    kernel_size: i64,
    params: &ConvTransposeParams,
) -> i128 {
    let input = i128::from(input_size);
    let kernel = i128::from(kernel_size);
    (input - 1) * i128::from(params.stride) - 2 * i128::from(params.padding)
        + (kernel - 1)
        + i128::from(params.output_padding)
        + 1
}

pub fn validate_multiplier(multiplier: i64) -> Result<()> {
    if multiplier < 1 {
        return Err(SolverError::InvalidMultiplier { multiplier });
    }
    Ok(())
}
