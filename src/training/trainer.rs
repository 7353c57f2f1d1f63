use log::{debug, info, warn};

use crate::{
    arch::{backpropagate, loss::LossFn, unroll, Params},
    dataset::Dataset,
    optimization::Optimizer,
    Result,
};

/// The outcome of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    /// The parameters after the last iteration.
    pub params: Params,

    /// The initial parameters followed by the parameters after each iteration.
    pub trajectory: Vec<Params>,

    /// The loss of each iteration, measured before its update.
    pub losses: Vec<f64>,
}

impl TrainingReport {
    /// Returns the loss of the last iteration, if any.
    pub fn final_loss(&self) -> Option<f64> {
        self.losses.last().copied()
    }
}

/// Trains the linear recurrent model with full backpropagation through time.
pub struct Trainer<O, L>
where
    O: Optimizer,
    L: LossFn,
{
    dataset: Dataset,
    optimizer: O,
    loss_fn: L,
    iterations: usize,
}

impl<O, L> Trainer<O, L>
where
    O: Optimizer,
    L: LossFn,
{
    /// Returns a new `Trainer`.
    ///
    /// # Arguments
    /// * `dataset` - The batch and targets the model is trained on.
    /// * `optimizer` - Dictates how the parameters are updated after each backward pass.
    /// * `loss_fn` - Measures the difference between the predictions and the targets.
    /// * `iterations` - The fixed amount of updates to make.
    pub fn new(dataset: Dataset, optimizer: O, loss_fn: L, iterations: usize) -> Self {
        Self {
            dataset,
            optimizer,
            loss_fn,
            iterations,
        }
    }

    /// Returns the optimizer, along with the state it accumulated.
    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    /// Runs every iteration of training starting from `params`.
    ///
    /// There's no early stopping, the run completes even if the parameters diverge.
    ///
    /// # Arguments
    /// * `params` - The initial parameters.
    ///
    /// # Returns
    /// The training report, or an error if the optimizer rejects the gradient.
    pub fn train(&mut self, params: Params) -> Result<TrainingReport> {
        let x = self.dataset.x();
        let y = self.dataset.y();

        info!(
            "training on {} samples of length {} for {} iterations",
            self.dataset.len(),
            self.dataset.seq_len(),
            self.iterations
        );

        let mut trajectory = Vec::with_capacity(self.iterations + 1);
        let mut losses = Vec::with_capacity(self.iterations);
        let mut raw: [f64; 2] = params.into();
        let mut warned = false;
        trajectory.push(params);

        for i in 0..self.iterations {
            let current = Params::from(raw);
            let states = unroll(x, current);
            let y_pred = states.column(states.ncols() - 1);

            let loss = self.loss_fn.loss(y_pred, y);
            let d_out = self.loss_fn.loss_prime(y_pred, y);
            let back = backpropagate(x, states.view(), d_out.view(), current.recurrence_weight)?;
            let grad: [f64; 2] = back.grad.into();

            self.optimizer.update_params(&grad, &mut raw)?;

            if !loss.is_finite() && !warned {
                warn!("loss is no longer finite at iteration {i}");
                warned = true;
            }

            debug!(
                "iter {i}: loss={loss} wx={} wrec={}",
                current.input_weight, current.recurrence_weight
            );

            losses.push(loss);
            trajectory.push(Params::from(raw));
        }

        let params = Params::from(raw);

        info!(
            "finished training: wx={} wrec={} loss={:?}",
            params.input_weight,
            params.recurrence_weight,
            losses.last()
        );

        Ok(TrainingReport {
            params,
            trajectory,
            losses,
        })
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::{arch::loss::Mse, optimization::Rprop};

    fn trainer(iterations: usize) -> Trainer<Rprop, Mse> {
        let dataset = Dataset::counting(array![[1., 0., 1.], [0., 1., 1.], [1., 1., 1.]]).unwrap();
        let rprop = Rprop::new(&[0.01, 0.01], 1.2, 0.5);
        Trainer::new(dataset, rprop, Mse, iterations)
    }

    #[test]
    fn report_tracks_every_iteration() {
        let init = Params::new(0.2, 0.3);
        let report = trainer(25).train(init).unwrap();

        assert_eq!(report.losses.len(), 25);
        assert_eq!(report.trajectory.len(), 26);
        assert_eq!(report.trajectory[0], init);
        assert_eq!(report.trajectory.last(), Some(&report.params));
    }

    #[test]
    fn zero_iterations_return_the_initial_params() {
        let init = Params::new(0.2, 0.3);
        let report = trainer(0).train(init).unwrap();

        assert_eq!(report.params, init);
        assert_eq!(report.final_loss(), None);
    }

    #[test]
    fn training_reduces_the_loss() {
        let report = trainer(200).train(Params::new(0.2, 0.3)).unwrap();

        assert!(report.final_loss().unwrap() < report.losses[0]);
    }

    #[test]
    fn first_update_moves_against_the_gradient() {
        // Predictions are below the targets, both gradients are negative.
        let report = trainer(1).train(Params::new(0.2, 0.3)).unwrap();
        let next = report.params;

        assert_eq!(next.input_weight, 0.2 + 0.005);
        assert_eq!(next.recurrence_weight, 0.3 + 0.005);
    }
}
