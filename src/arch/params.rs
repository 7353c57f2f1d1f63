use serde::{Deserialize, Serialize};

/// The two scalars shared by every timestep of the unrolled recurrence.
///
/// The same type is used for the gradient with respect to each parameter. As a flat array,
/// index `0` is the input weight and index `1` is the recurrence weight.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub input_weight: f64,
    pub recurrence_weight: f64,
}

impl Params {
    /// The amount of scalar parameters in the model.
    pub const LEN: usize = 2;

    /// Creates a new `Params`.
    ///
    /// # Arguments
    /// * `input_weight` - The weight applied to the input symbol at each timestep.
    /// * `recurrence_weight` - The weight applied to the previous state at each timestep.
    pub fn new(input_weight: f64, recurrence_weight: f64) -> Self {
        Self {
            input_weight,
            recurrence_weight,
        }
    }

    /// Returns `true` if both values are finite.
    pub fn is_finite(&self) -> bool {
        self.input_weight.is_finite() && self.recurrence_weight.is_finite()
    }
}

impl From<[f64; 2]> for Params {
    fn from([input_weight, recurrence_weight]: [f64; 2]) -> Self {
        Self::new(input_weight, recurrence_weight)
    }
}

impl From<Params> for [f64; 2] {
    fn from(params: Params) -> Self {
        [params.input_weight, params.recurrence_weight]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_ordering_is_input_then_recurrence() {
        let params = Params::new(0.5, -2.0);
        let raw: [f64; 2] = params.into();

        assert_eq!(raw, [0.5, -2.0]);
        assert_eq!(Params::from(raw), params);
    }

    #[test]
    fn non_finite_values_are_detected() {
        assert!(Params::new(1.0, 1.0).is_finite());
        assert!(!Params::new(f64::NAN, 1.0).is_finite());
        assert!(!Params::new(1.0, f64::INFINITY).is_finite());
    }
}
