use ndarray::{Array1, ArrayView1};

pub trait LossFn {
    /// The scalar loss of a prediction over the whole batch.
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> f64;

    /// The derivative of the loss with respect to each sample's prediction.
    fn loss_prime(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64>;
}
