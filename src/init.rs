use ndarray::{Array1, Array2};
use rand::Rng;
use rand_distr::{Distribution, Uniform, uniform::Error as UniformError};

/// Half width of the range biases are drawn from.
pub const BIAS_RANGE: f64 = 0.1;

/// A weight generator that follows a certain probabilistic distribution.
#[derive(Debug, Clone)]
pub struct RandWeightGen<D: Distribution<f64>> {
    distribution: D,
}

impl<D: Distribution<f64>> RandWeightGen<D> {
    /// Creates a new `RandWeightGen` weight generator.
    ///
    /// # Arguments
    /// * `distribution` - The distribution to sample the random numbers from.
    pub fn new(distribution: D) -> Self {
        Self { distribution }
    }

    /// Samples `n` values.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `n` - The amount of values to sample.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.distribution.sample(rng)).collect()
    }

    /// Samples a full weight matrix of shape `dim`, filled row by row.
    pub fn matrix<R: Rng + ?Sized>(&self, rng: &mut R, dim: (usize, usize)) -> Array2<f64> {
        Array2::from_shape_simple_fn(dim, || self.distribution.sample(rng))
    }

    /// Samples a vector of `len` values.
    pub fn vector<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> Array1<f64> {
        Array1::from_vec(self.sample(rng, len))
    }
}

impl RandWeightGen<Uniform<f64>> {
    /// Creates a new `RandWeightGen` weight generator with an inclusive uniform distribution.
    ///
    /// # Arguments
    /// * `low` - The inclusive lower limit.
    /// * `high` - The inclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low > high or not finite).
    pub fn uniform_inclusive(low: f64, high: f64) -> Result<Self, UniformError> {
        Ok(Self::new(Uniform::new_inclusive(low, high)?))
    }

    /// Creates a new `RandWeightGen` weight generator using Xavier uniform initialization, that
    /// is, sampling from `[-sqrt(6 / (fan_in + fan_out)), sqrt(6 / (fan_in + fan_out))]`.
    ///
    /// # Arguments
    /// * `fan_in` - The number of input units in the weight matrix.
    /// * `fan_out` - The number of output units in the weight matrix.
    ///
    /// # Returns
    /// An error if the calculated range is invalid.
    pub fn xavier_uniform(fan_in: usize, fan_out: usize) -> Result<Self, UniformError> {
        let range = xavier_limit(fan_in, fan_out);
        Self::uniform_inclusive(-range, range)
    }

    /// Creates a new `RandWeightGen` weight generator for biases, sampling from
    /// `[-BIAS_RANGE, BIAS_RANGE]`.
    pub fn bias() -> Result<Self, UniformError> {
        Self::uniform_inclusive(-BIAS_RANGE, BIAS_RANGE)
    }
}

/// The Xavier/Glorot bound for a weight matrix connecting `fan_in` to `fan_out` units.
pub fn xavier_limit(fan_in: usize, fan_out: usize) -> f64 {
    (6. / (fan_in + fan_out) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn xavier_limit_matches_the_glorot_bound() {
        assert_eq!(xavier_limit(2, 4), 1.0);
        assert_eq!(xavier_limit(3, 3), 1.0);
        assert!((xavier_limit(9, 15) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn xavier_samples_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let weight_gen = RandWeightGen::xavier_uniform(10, 5).unwrap();
        let limit = xavier_limit(10, 5);

        let w = weight_gen.matrix(&mut rng, (10, 5));
        assert_eq!(w.dim(), (10, 5));
        assert!(w.iter().all(|v| (-limit..=limit).contains(v)));
    }

    #[test]
    fn bias_samples_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let bias_gen = RandWeightGen::bias().unwrap();

        let b = bias_gen.vector(&mut rng, 1000);
        assert_eq!(b.len(), 1000);
        assert!(b.iter().all(|v| (-BIAS_RANGE..=BIAS_RANGE).contains(v)));
        assert!(b.iter().any(|&v| v < 0.) && b.iter().any(|&v| v > 0.));
    }

    #[test]
    fn same_seed_same_samples() {
        let weight_gen = RandWeightGen::uniform_inclusive(-1., 1.).unwrap();
        let a = weight_gen.sample(&mut StdRng::seed_from_u64(3), 16);
        let b = weight_gen.sample(&mut StdRng::seed_from_u64(3), 16);
        assert_eq!(a, b);
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        assert!(RandWeightGen::uniform_inclusive(1., -1.).is_err());
    }
}
