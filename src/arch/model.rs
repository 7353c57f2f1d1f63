use ndarray::{Array1, ArrayView2};

use super::{unroll, Params};

/// A trained single unit linear recurrent model, used for inference only.
#[derive(Debug, Clone, Copy)]
pub struct LinearRnn {
    params: Params,
}

impl LinearRnn {
    /// Creates a new `LinearRnn`.
    ///
    /// # Arguments
    /// * `params` - The parameters of the model, usually the outcome of a training run.
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Returns the parameters of this model.
    pub fn params(&self) -> Params {
        self.params
    }

    /// Makes a prediction for every row of `x`.
    ///
    /// # Arguments
    /// * `x` - The held out sequences, one per row.
    ///
    /// # Returns
    /// The final state for each sequence.
    pub fn predict(&self, x: ArrayView2<f64>) -> Array1<f64> {
        let states = unroll(x, self.params);
        states.column(states.ncols() - 1).to_owned()
    }

    /// Makes a prediction for a single sequence.
    pub fn predict_sequence(&self, seq: &[f64]) -> f64 {
        let Params {
            input_weight: wx,
            recurrence_weight: wrec,
        } = self.params;

        seq.iter().fold(0.0, |s, &x| x * wx + s * wrec)
    }
}
