//! Finite difference checks of the analytic gradient computed by [`backpropagate`].

use ndarray::{ArrayView1, ArrayView2};

use super::{
    backpropagate,
    loss::{LossFn, Mse},
    unroll, Params,
};
use crate::{Result, RnnErr};

/// The comparison between the analytic and the numerical gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheck {
    pub analytic: Params,
    pub numerical: Params,
    pub max_abs_err: f64,
}

fn mse_at(x: ArrayView2<f64>, y: ArrayView1<f64>, params: Params) -> f64 {
    let states = unroll(x, params);
    Mse.loss(states.column(states.ncols() - 1), y)
}

/// Approximates the gradient of the mean squared error with central differences.
///
/// # Arguments
/// * `x` - The batch.
/// * `y` - The targets.
/// * `params` - The point where the gradient is evaluated.
/// * `eps` - The perturbation applied to each parameter.
pub fn numerical_gradient(
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
    params: Params,
    eps: f64,
) -> Params {
    let raw: [f64; 2] = params.into();
    let mut grad = [0.0; Params::LEN];

    for (i, g) in grad.iter_mut().enumerate() {
        let mut plus = raw;
        let mut minus = raw;
        plus[i] += eps;
        minus[i] -= eps;

        *g = (mse_at(x, y, plus.into()) - mse_at(x, y, minus.into())) / (2.0 * eps);
    }

    grad.into()
}

/// Computes both the analytic and the numerical gradient of the mean squared error.
///
/// # Returns
/// The two gradients and the largest absolute difference between them, or an error if `x`
/// and `y` have a different amount of rows.
pub fn check_gradient(
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
    params: Params,
    eps: f64,
) -> Result<GradCheck> {
    let states = unroll(x, params);
    let y_pred = states.column(states.ncols() - 1);

    if y_pred.len() != y.len() {
        return Err(RnnErr::SizeMismatch {
            what: "targets",
            got: y.len(),
            expected: y_pred.len(),
        });
    }

    let d_out = Mse.loss_prime(y_pred, y);
    let analytic = backpropagate(x, states.view(), d_out.view(), params.recurrence_weight)?.grad;
    let numerical = numerical_gradient(x, y, params, eps);

    let max_abs_err = (analytic.input_weight - numerical.input_weight)
        .abs()
        .max((analytic.recurrence_weight - numerical.recurrence_weight).abs());

    Ok(GradCheck {
        analytic,
        numerical,
        max_abs_err,
    })
}
