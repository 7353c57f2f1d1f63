use super::Optimizer;
use crate::{Result, RnnErr};

/// The sign of a gradient component.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Negative,
    #[default]
    Zero,
    Positive,
}

impl Sign {
    /// Returns the sign of `x`. `NaN` has no direction and maps to `Zero`.
    pub fn of(x: f64) -> Self {
        if x > 0.0 {
            Sign::Positive
        } else if x < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    /// Returns the sign as one of `-1`, `0` or `1`.
    pub fn as_f64(self) -> f64 {
        match self {
            Sign::Negative => -1.0,
            Sign::Zero => 0.0,
            Sign::Positive => 1.0,
        }
    }
}

/// The adaptive state Rprop keeps for a single parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RpropState {
    /// The magnitude of the next update, strictly positive.
    pub step_size: f64,

    /// The sign of the gradient seen on the previous step.
    pub prev_sign: Sign,
}

impl RpropState {
    /// Creates a new `RpropState` that hasn't seen any gradient yet.
    ///
    /// # Arguments
    /// * `step_size` - The initial magnitude of the updates.
    pub fn new(step_size: f64) -> Self {
        Self {
            step_size,
            prev_sign: Sign::Zero,
        }
    }
}

/// Adapts the state of a single parameter given its newest gradient.
///
/// The step grows by `growth` when the gradient keeps the sign it had on the previous step,
/// otherwise it shrinks by `shrink`. Only the sign of `grad` is used.
///
/// # Arguments
/// * `grad` - The gradient of the parameter.
/// * `state` - The previous state of the parameter.
/// * `growth` - The factor applied on a repeated sign, greater than `1`.
/// * `shrink` - The factor applied on a sign change, between `0` and `1`.
///
/// # Returns
/// The new state, whose `prev_sign` is the sign of `grad`.
pub fn rprop_step(grad: f64, state: RpropState, growth: f64, shrink: f64) -> RpropState {
    let sign = Sign::of(grad);
    let factor = if sign == state.prev_sign {
        growth
    } else {
        shrink
    };

    RpropState {
        step_size: state.step_size * factor,
        prev_sign: sign,
    }
}

/// Resilient backpropagation: each parameter moves against the sign of its gradient by a
/// step size adapted from the history of the signs, ignoring the gradient's magnitude.
#[derive(Debug, Clone)]
pub struct Rprop {
    growth: f64,
    shrink: f64,
    states: Box<[RpropState]>,
}

impl Rprop {
    /// Creates a new `Rprop` optimizer.
    ///
    /// # Arguments
    /// * `step_sizes` - The initial step size, one per parameter.
    /// * `growth` - The factor applied to a step size when the gradient keeps its sign.
    /// * `shrink` - The factor applied to a step size when the gradient changes its sign.
    ///
    /// # Returns
    /// A new `Rprop` instance.
    pub fn new(step_sizes: &[f64], growth: f64, shrink: f64) -> Self {
        Self {
            growth,
            shrink,
            states: step_sizes.iter().copied().map(RpropState::new).collect(),
        }
    }

    /// Returns the current state of every parameter.
    pub fn states(&self) -> &[RpropState] {
        &self.states
    }

    /// Adapts the state of every parameter without touching the parameters.
    ///
    /// # Returns
    /// An error if `grad` doesn't hold one value per parameter.
    pub fn adapt(&mut self, grad: &[f64]) -> Result<()> {
        if grad.len() != self.states.len() {
            return Err(RnnErr::SizeMismatch {
                what: "rprop gradient",
                got: grad.len(),
                expected: self.states.len(),
            });
        }

        let Self { growth, shrink, .. } = *self;

        for (state, &g) in self.states.iter_mut().zip(grad) {
            *state = rprop_step(g, *state, growth, shrink);
        }

        Ok(())
    }
}

impl Optimizer for Rprop {
    fn update_params(&mut self, grad: &[f64], params: &mut [f64]) -> Result<()> {
        if params.len() != self.states.len() {
            return Err(RnnErr::SizeMismatch {
                what: "rprop params",
                got: params.len(),
                expected: self.states.len(),
            });
        }

        self.adapt(grad)?;

        for (p, state) in params.iter_mut().zip(self.states.iter()) {
            *p -= state.prev_sign.as_f64() * state.step_size;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROWTH: f64 = 1.2;
    const SHRINK: f64 = 0.5;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * b.abs().max(1.0)
    }

    #[test]
    fn sign_of_gradients() {
        assert_eq!(Sign::of(3.5), Sign::Positive);
        assert_eq!(Sign::of(-1e-300), Sign::Negative);
        assert_eq!(Sign::of(0.0), Sign::Zero);
        assert_eq!(Sign::of(-0.0), Sign::Zero);
        assert_eq!(Sign::of(f64::NAN), Sign::Zero);
        assert_eq!(Sign::of(f64::NEG_INFINITY), Sign::Negative);
    }

    #[test]
    fn repeated_sign_grows_the_step_geometrically() {
        let init = 0.001;
        let mut state = RpropState {
            step_size: init,
            prev_sign: Sign::Positive,
        };

        for k in 1..=20 {
            state = rprop_step(10.0 * k as f64, state, GROWTH, SHRINK);
            assert!(close(state.step_size, init * GROWTH.powi(k)));
        }
    }

    #[test]
    fn alternating_sign_shrinks_the_step_geometrically() {
        let init = 0.25;
        let mut state = RpropState {
            step_size: init,
            prev_sign: Sign::Positive,
        };

        for k in 1..=20 {
            let grad = if k % 2 == 0 { 1.0 } else { -1.0 };
            state = rprop_step(grad, state, GROWTH, SHRINK);
            assert!(close(state.step_size, init * SHRINK.powi(k)));
            assert!(state.step_size > 0.0);
        }
    }

    #[test]
    fn first_non_zero_gradient_shrinks_the_step() {
        let state = rprop_step(2.0, RpropState::new(1.0), GROWTH, SHRINK);

        assert_eq!(state.step_size, SHRINK);
        assert_eq!(state.prev_sign, Sign::Positive);
    }

    #[test]
    fn zero_gradient_after_zero_grows_the_step() {
        let state = rprop_step(0.0, RpropState::new(1.0), GROWTH, SHRINK);

        assert_eq!(state.step_size, GROWTH);
        assert_eq!(state.prev_sign, Sign::Zero);
    }

    #[test]
    fn update_ignores_the_gradient_magnitude() {
        let mut small = Rprop::new(&[0.1, 0.1], GROWTH, SHRINK);
        let mut large = Rprop::new(&[0.1, 0.1], GROWTH, SHRINK);
        let mut p_small = [1.0, 1.0];
        let mut p_large = [1.0, 1.0];

        small.update_params(&[1e-9, -1e-9], &mut p_small).unwrap();
        large.update_params(&[1e9, -1e9], &mut p_large).unwrap();

        assert_eq!(p_small, p_large);
        assert_eq!(p_small, [1.0 - 0.05, 1.0 + 0.05]);
    }

    #[test]
    fn zero_gradient_leaves_the_parameter_in_place() {
        let mut rprop = Rprop::new(&[0.1], GROWTH, SHRINK);
        let mut params = [4.0];

        rprop.update_params(&[0.0], &mut params).unwrap();

        assert_eq!(params, [4.0]);
        assert_eq!(rprop.states()[0].step_size, 0.1 * GROWTH);
    }

    #[test]
    fn update_with_mismatched_sizes_fails() {
        let mut rprop = Rprop::new(&[0.1, 0.1], GROWTH, SHRINK);
        let mut params = [0.0, 0.0];

        assert!(rprop.update_params(&[1.0], &mut params).is_err());
        assert!(rprop.update_params(&[1.0, 1.0], &mut [0.0]).is_err());
        assert_eq!(rprop.states()[0], RpropState::new(0.1));
    }
}
