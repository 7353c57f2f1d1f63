use ndarray::{Array2, ArrayView1, ArrayView2};

use super::{
    loss::{LossFn, Mse},
    unroll, Params,
};
use crate::{Result, RnnErr};

/// Evaluates the mean squared error on a grid of parameters.
///
/// # Arguments
/// * `x` - The batch.
/// * `y` - The targets.
/// * `wx_values` - The input weights to evaluate, one per column of the output.
/// * `wrec_values` - The recurrence weights to evaluate, one per row of the output.
///
/// # Returns
/// A `(wrec_values.len(), wx_values.len())` matrix of losses.
pub fn loss_surface(
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
    wx_values: &[f64],
    wrec_values: &[f64],
) -> Result<Array2<f64>> {
    if x.nrows() != y.len() {
        return Err(RnnErr::SizeMismatch {
            what: "targets",
            got: y.len(),
            expected: x.nrows(),
        });
    }

    let t = x.ncols();
    let surface = Array2::from_shape_fn((wrec_values.len(), wx_values.len()), |(i, j)| {
        let states = unroll(x, Params::new(wx_values[j], wrec_values[i]));
        Mse.loss(states.column(t), y)
    });

    Ok(surface)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn minimum_lies_at_the_ideal_counter() {
        let x = array![[1., 0., 1., 1.], [0., 1., 1., 0.]];
        let y = array![3., 2.];
        let grid = [0.5, 1.0, 1.5];

        let surface = loss_surface(x.view(), y.view(), &grid, &grid).unwrap();

        assert_eq!(surface.dim(), (3, 3));
        assert_eq!(surface[[1, 1]], 0.0);
        assert!(surface.iter().all(|&l| l >= 0.0));
    }
}
