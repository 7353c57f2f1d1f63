use std::{fs, path::Path};

use log::info;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{arch::Params, dataset::Dataset, Result, RnnErr};

/// Where the training sequences come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DatasetConfig {
    /// Sequences written down in the config itself.
    Inline { rows: Vec<Vec<f64>> },
    /// Uniformly random binary sequences.
    Random {
        num_samples: usize,
        seq_len: usize,
        seed: Option<u64>,
    },
}

impl DatasetConfig {
    /// Builds the counting dataset described by this config.
    pub fn build(&self) -> Result<Dataset> {
        match self {
            DatasetConfig::Inline { rows } => Dataset::from_rows(rows),
            DatasetConfig::Random {
                num_samples,
                seq_len,
                seed,
            } => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(*seed),
                    None => StdRng::from_os_rng(),
                };

                Dataset::random(*num_samples, *seq_len, &mut rng)
            }
        }
    }
}

/// Every hyperparameter of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub init_params: Params,
    pub init_step_sizes: [f64; 2],
    pub growth: f64,
    pub shrink: f64,
    pub iterations: usize,
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub eval: Vec<Vec<f64>>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        let seq = vec![0., 1., 1., 0., 0., 0., 0., 1., 0., 0., 1., 1.];

        Self {
            init_params: Params::new(-1.5, 2.0),
            init_step_sizes: [0.001, 0.001],
            growth: 1.2,
            shrink: 0.5,
            iterations: 500,
            dataset: DatasetConfig::Random {
                num_samples: 20,
                seq_len: 10,
                seed: Some(0),
            },
            eval: vec![seq],
        }
    }
}

impl TrainingConfig {
    /// Reads a config from a json file and validates it.
    ///
    /// # Arguments
    /// * `path` - The path to the json file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("loading config from {}", path.display());

        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parses a config from a json string and validates it.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the hyperparameters make sense for Rprop.
    pub fn validate(&self) -> Result<()> {
        if !(self.growth > 1.0) {
            return Err(RnnErr::InvalidConfig(format!(
                "growth must be greater than 1, got {}",
                self.growth
            )));
        }

        if !(self.shrink > 0.0 && self.shrink < 1.0) {
            return Err(RnnErr::InvalidConfig(format!(
                "shrink must be in (0, 1), got {}",
                self.shrink
            )));
        }

        if let Some(step) = self.init_step_sizes.iter().find(|&&s| !(s > 0.0)) {
            return Err(RnnErr::InvalidConfig(format!(
                "step sizes must be positive, got {step}"
            )));
        }

        if self.iterations == 0 {
            return Err(RnnErr::InvalidConfig(
                "iterations must be at least 1".to_string(),
            ));
        }

        if !self.init_params.is_finite() {
            return Err(RnnErr::InvalidConfig(format!(
                "initial params must be finite, got {:?}",
                self.init_params
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TrainingConfig::default().validate().is_ok());
    }

    #[test]
    fn parses_a_random_dataset_config() {
        let raw = r#"{
            "init_params": { "input_weight": 0.5, "recurrence_weight": 0.5 },
            "init_step_sizes": [0.01, 0.01],
            "growth": 1.2,
            "shrink": 0.5,
            "iterations": 100,
            "dataset": { "kind": "random", "num_samples": 20, "seq_len": 10, "seed": 3 }
        }"#;

        let config = TrainingConfig::from_json(raw).unwrap();
        let dataset = config.dataset.build().unwrap();

        assert!(config.eval.is_empty());
        assert_eq!(dataset.x().dim(), (20, 10));
    }

    #[test]
    fn serialized_default_parses_back() {
        let config = TrainingConfig::default();
        let raw = serde_json::to_string(&config).unwrap();

        assert_eq!(TrainingConfig::from_json(&raw).unwrap(), config);
    }

    #[test]
    fn invalid_hyperparameters_are_rejected() {
        let mut config = TrainingConfig::default();
        config.growth = 1.0;
        assert!(matches!(config.validate(), Err(RnnErr::InvalidConfig(_))));

        let mut config = TrainingConfig::default();
        config.shrink = 1.5;
        assert!(matches!(config.validate(), Err(RnnErr::InvalidConfig(_))));

        let mut config = TrainingConfig::default();
        config.init_step_sizes = [0.001, 0.0];
        assert!(matches!(config.validate(), Err(RnnErr::InvalidConfig(_))));

        let mut config = TrainingConfig::default();
        config.iterations = 0;
        assert!(matches!(config.validate(), Err(RnnErr::InvalidConfig(_))));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            TrainingConfig::from_json("{ not json"),
            Err(RnnErr::Json(_))
        ));
    }
}
