use ndarray::{s, Array2, ArrayView2, Axis, Zip};

use super::Params;

/// Computes the states of the recurrence for every sample of the batch.
///
/// Column `0` holds the initial state, which is always zero. Column `k + 1` is
/// `x[:, k] * input_weight + state[:, k] * recurrence_weight`, so the last column holds the
/// prediction for each sample.
///
/// # Arguments
/// * `x` - The batch, one sequence per row.
/// * `params` - The shared parameters.
///
/// # Returns
/// A `(nrows, ncols + 1)` state matrix.
pub fn unroll(x: ArrayView2<f64>, params: Params) -> Array2<f64> {
    let Params {
        input_weight: wx,
        recurrence_weight: wrec,
    } = params;

    let (n, t) = x.dim();
    let mut states = Array2::zeros((n, t + 1));

    for k in 0..t {
        let (prev, mut next) = states.multi_slice_mut((s![.., k], s![.., k + 1]));

        Zip::from(&mut next)
            .and(&prev)
            .and(x.index_axis(Axis(1), k))
            .for_each(|next, &prev, &xk| *next = xk * wx + prev * wrec);
    }

    states
}
