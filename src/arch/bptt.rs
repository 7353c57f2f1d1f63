use ndarray::{Array2, ArrayView1, ArrayView2};

use super::Params;
use crate::{Result, RnnErr};

/// The outcome of a backward pass through time.
#[derive(Debug, Clone, PartialEq)]
pub struct Backward {
    /// The gradient of the loss with respect to each shared parameter, averaged over the batch.
    pub grad: Params,

    /// The gradient of the loss with respect to every state, same shape as the state matrix.
    pub grad_over_time: Array2<f64>,
}

/// Propagates the output gradient backwards through the unrolled recurrence.
///
/// Every timestep shares the same two parameters, so their gradient is the sum of the local
/// gradient of each timestep. The jacobian between consecutive states is exactly the recurrence
/// weight, which makes the backward signal scale by `recurrence_weight^k` after `k` steps.
///
/// # Arguments
/// * `x` - The batch the states were computed from.
/// * `states` - The output of `unroll` for `x`.
/// * `d_out` - The derivative of the loss with respect to each sample's prediction.
/// * `recurrence_weight` - The recurrence weight used to compute `states`.
///
/// # Returns
/// The accumulated parameter gradient and the gradient over time, or an error if the shapes
/// of the arguments don't agree.
pub fn backpropagate(
    x: ArrayView2<f64>,
    states: ArrayView2<f64>,
    d_out: ArrayView1<f64>,
    recurrence_weight: f64,
) -> Result<Backward> {
    let (n, t) = x.dim();

    if n == 0 {
        return Err(RnnErr::EmptyBatch);
    }

    if states.nrows() != n {
        return Err(RnnErr::SizeMismatch {
            what: "state rows",
            got: states.nrows(),
            expected: n,
        });
    }

    if states.ncols() != t + 1 {
        return Err(RnnErr::SizeMismatch {
            what: "state columns",
            got: states.ncols(),
            expected: t + 1,
        });
    }

    if d_out.len() != n {
        return Err(RnnErr::SizeMismatch {
            what: "output gradient",
            got: d_out.len(),
            expected: n,
        });
    }

    let mut grad_over_time = Array2::zeros((n, t + 1));
    grad_over_time.column_mut(t).assign(&d_out);

    let grad = (1..=t).rev().fold(Params::default(), |acc, k| {
        let g = grad_over_time.column(k);
        let d_wx = (&g * &x.column(k - 1)).mean().unwrap_or_default();
        let d_wrec = (&g * &states.column(k - 1)).mean().unwrap_or_default();
        let g_prev = g.mapv(|v| v * recurrence_weight);

        grad_over_time.column_mut(k - 1).assign(&g_prev);

        Params::new(acc.input_weight + d_wx, acc.recurrence_weight + d_wrec)
    });

    Ok(Backward {
        grad,
        grad_over_time,
    })
}
