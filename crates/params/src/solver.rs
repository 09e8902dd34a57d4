//! Closed-form search for exact-multiple transposed-convolution params.

use crate::config::ConvTransposeParams;
use crate::error::Result;
use crate::shape::{candidate_output_paddings, validate_multiplier};

/// Find `(stride, padding, output_padding)` such that a ConvTranspose3d with a
/// cubic `kernel_size` kernel and unit dilation maps `input_size` to exactly
/// `multiplier * input_size`.
///
/// Stride is always `multiplier`. Output padding is tried in ascending order
/// (`0`, then `1` if `allow_output_padding`), and for each candidate the padding
/// is `(kernel_size + output_padding - multiplier) / 2` when that is a
/// non-negative integer. The first candidate whose recomputed output size hits
/// the target is returned.
///
/// `Ok(None)` means no allowed output padding yields an exact multiple. The
/// only error is a `multiplier` below 1; `input_size` and `kernel_size` are
/// taken as given.
pub fn solve(
    input_size: i64,
    multiplier: i64,
    kernel_size: i64,
    allow_output_padding: bool,
) -> Result<Option<ConvTransposeParams>> {
    validate_multiplier(multiplier)?;

    let stride = multiplier;
    let target = i128::from(multiplier) * i128::from(input_size);

    for &output_padding in candidate_output_paddings(allow_output_padding) {
        // The input extent cancels out of the size equation.
        let n = i128::from(kernel_size) + i128::from(output_padding) - i128::from(multiplier);
        if n % 2 != 0 {
            continue;
        }
        if n < 0 {
            continue;
        }
        // multiplier >= 1 keeps n <= kernel_size, so n / 2 fits in i64.
        let padding = (n / 2) as i64;

        let params = ConvTransposeParams::new(stride, padding, output_padding);
        if params.output_size(input_size, kernel_size) == target {
            return Ok(Some(params));
        }
    }

    Ok(None)
}
