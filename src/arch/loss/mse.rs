use ndarray::{Array1, ArrayView1};

use super::LossFn;

/// Mean squared error loss function.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        (&y - &y_pred)
            .mapv(|x| x.powi(2))
            .mean()
            .unwrap_or_default()
    }

    /// Per sample `2 * (y_pred - y)`. The `1 / n` factor of the mean is applied when the
    /// parameter gradients are accumulated over the batch.
    fn loss_prime(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64> {
        (&y_pred - &y) * 2.0
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn loss_is_the_mean_of_the_squared_errors() {
        let y_pred = array![1.0, 2.0, 5.0];
        let y = array![1.0, 4.0, 4.0];

        assert_eq!(Mse.loss(y_pred.view(), y.view()), 5.0 / 3.0);
    }

    #[test]
    fn loss_prime_is_not_averaged() {
        let y_pred = array![1.0, 2.0, 5.0];
        let y = array![1.0, 4.0, 4.0];

        assert_eq!(
            Mse.loss_prime(y_pred.view(), y.view()),
            array![0.0, -4.0, 2.0]
        );
    }
}
