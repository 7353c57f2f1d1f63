use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;

use crate::{Result, RnnErr};

/// A batch of sequences and the target of each one.
///
/// The batch is never mutated once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The sequences, one per row.
    /// * `y` - The target of each sequence.
    ///
    /// # Returns
    /// The dataset, or an error if the batch is empty or `x` and `y` have a different
    /// amount of samples.
    pub fn new(x: Array2<f64>, y: Array1<f64>) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(RnnErr::EmptyBatch);
        }

        if x.nrows() != y.len() {
            return Err(RnnErr::SizeMismatch {
                what: "targets",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        Ok(Self { x, y })
    }

    /// Creates a counting dataset, the target of each sequence is its amount of ones.
    ///
    /// # Returns
    /// The dataset, or an error if the batch is empty or any value isn't `0` or `1`.
    pub fn counting(x: Array2<f64>) -> Result<Self> {
        if let Some(((row, col), &value)) = x
            .indexed_iter()
            .find(|&(_, &v)| v != 0.0 && v != 1.0)
        {
            return Err(RnnErr::NonBinary { row, col, value });
        }

        let y = x.sum_axis(Axis(1));
        Self::new(x, y)
    }

    /// Creates a counting dataset from a list of equally long sequences.
    ///
    /// # Returns
    /// The dataset, or an error if the rows aren't equally long or `counting` fails.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let seq_len = rows.first().map_or(0, Vec::len);

        if let Some(row) = rows.iter().find(|row| row.len() != seq_len) {
            return Err(RnnErr::SizeMismatch {
                what: "sequence length",
                got: row.len(),
                expected: seq_len,
            });
        }

        let x = Array2::from_shape_fn((rows.len(), seq_len), |(i, j)| rows[i][j]);
        Self::counting(x)
    }

    /// Draws a counting dataset of uniformly random binary sequences.
    ///
    /// # Arguments
    /// * `num_samples` - The amount of sequences.
    /// * `seq_len` - The length of every sequence.
    /// * `rng` - The source of randomness.
    pub fn random<R: Rng>(num_samples: usize, seq_len: usize, rng: &mut R) -> Result<Self> {
        let x = Array2::from_shape_simple_fn((num_samples, seq_len), || {
            if rng.random_bool(0.5) {
                1.0
            } else {
                0.0
            }
        });

        Self::counting(x)
    }

    /// Returns the sequences.
    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    /// Returns the targets.
    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    /// Returns the amount of samples.
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    /// Always `false`, empty datasets can't be built.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the length of every sequence.
    pub fn seq_len(&self) -> usize {
        self.x.ncols()
    }
}
