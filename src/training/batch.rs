use log::{debug, trace};
use rand::Rng;

use super::Dataset;
use crate::{MlErr, Result, arch::Network, config::TrainConfig};

impl Network {
    /// Trains the network for several epochs over a dataset.
    ///
    /// Every sample is still trained online, one update per sample. `batch_size` only changes
    /// how the per epoch error is aggregated: with `0` (or a size covering the whole dataset) it
    /// is the mean error over every sample, otherwise it is the mean over chunks of the mean
    /// error of each chunk.
    ///
    /// # Arguments
    /// * `dataset` - The samples to train on, every one validated before the first update.
    /// * `epochs` - The amount of full passes over the dataset.
    /// * `batch_size` - The chunk size used when averaging errors.
    /// * `shuffle` - Whether to visit the samples in a fresh random order every epoch.
    /// * `rng` - The source of randomness for shuffling.
    ///
    /// # Returns
    /// One aggregated error per epoch, in order, or `MlErr::EmptyDataset` if there's nothing to
    /// train on.
    pub fn train_batch<R: Rng + ?Sized>(
        &mut self,
        dataset: &Dataset,
        epochs: usize,
        batch_size: usize,
        shuffle: bool,
        rng: &mut R,
    ) -> Result<Vec<f64>> {
        if dataset.is_empty() {
            return Err(MlErr::EmptyDataset);
        }

        dataset.validate(self.input_size(), self.output_size())?;

        let whole = batch_size == 0 || batch_size >= dataset.len();
        let mut errors = Vec::with_capacity(epochs);

        for epoch in 0..epochs {
            let order = dataset.order(shuffle, rng);

            let error = if whole {
                self.train_chunk(dataset, &order)?
            } else {
                let mut total = 0.;
                let mut chunks = 0;

                for chunk in order.chunks(batch_size) {
                    total += self.train_chunk(dataset, chunk)?;
                    chunks += 1;
                }

                total / chunks as f64
            };

            trace!(epoch = epoch, error = error; "epoch done");
            errors.push(error);
        }

        if let Some(&last) = errors.last() {
            debug!(
                epochs = epochs, samples = dataset.len(), error = last;
                "trained {} network",
                self.architecture()
            );
        }

        Ok(errors)
    }

    /// Same as `train_batch`, with the parameters taken from a `TrainConfig`.
    pub fn train_with<R: Rng + ?Sized>(
        &mut self,
        dataset: &Dataset,
        config: &TrainConfig,
        rng: &mut R,
    ) -> Result<Vec<f64>> {
        self.train_batch(
            dataset,
            config.epochs,
            config.batch_size,
            config.shuffle,
            rng,
        )
    }

    /// Trains on the samples at `indices`, in that order, returning their mean error.
    fn train_chunk(&mut self, dataset: &Dataset, indices: &[usize]) -> Result<f64> {
        let mut total = 0.;

        for sample in indices.iter().filter_map(|&i| dataset.get(i)) {
            total += self.train(&sample.inputs, &sample.targets)?;
        }

        Ok(total / indices.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{arch::activations::ActFn, training::Sample};

    fn xor() -> Dataset {
        vec![
            (vec![0., 0.], vec![0.]),
            (vec![0., 1.], vec![1.]),
            (vec![1., 0.], vec![1.]),
            (vec![1., 1.], vec![0.]),
        ]
        .into()
    }

    fn network() -> Network {
        Network::new(
            vec![2, 4, 1],
            ActFn::sigmoid(),
            0.1,
            &mut StdRng::seed_from_u64(5),
        )
        .unwrap()
    }

    #[test]
    fn returns_one_error_per_epoch() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut net = network();

        let errors = net.train_batch(&xor(), 7, 0, true, &mut rng).unwrap();
        assert_eq!(errors.len(), 7);
        assert!(errors.iter().all(|e| e.is_finite() && *e >= 0.));
    }

    #[test]
    fn zero_epochs_leave_the_network_untouched() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut net = network();
        let before = net.clone();

        let errors = net.train_batch(&xor(), 0, 0, true, &mut rng).unwrap();
        assert!(errors.is_empty());
        assert_eq!(net, before);
    }

    #[test]
    fn empty_datasets_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let res = network().train_batch(&Dataset::default(), 10, 0, true, &mut rng);
        assert!(matches!(res, Err(MlErr::EmptyDataset)));
    }

    #[test]
    fn bad_samples_are_rejected_before_any_update() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut net = network();
        let before = net.clone();

        let mut samples = xor().samples().to_vec();
        samples.push(Sample::new(vec![1.], vec![0.]));

        let res = net.train_batch(&samples.into(), 10, 0, false, &mut rng);
        assert!(matches!(
            res,
            Err(MlErr::InputSizeMismatch { got: 1, expected: 2 })
        ));
        assert_eq!(net, before);
    }

    #[test]
    fn full_epoch_error_is_the_mean_of_sample_errors() {
        let mut rng = StdRng::seed_from_u64(0);
        let data = xor();

        let mut manual = network();
        let expected = data
            .samples()
            .iter()
            .map(|s| manual.train(&s.inputs, &s.targets).unwrap())
            .sum::<f64>()
            / data.len() as f64;

        let mut net = network();
        let errors = net.train_batch(&data, 1, 0, false, &mut rng).unwrap();

        assert!((errors[0] - expected).abs() < 1e-12);
        assert_eq!(net, manual);
    }

    #[test]
    fn batch_sizes_covering_the_dataset_behave_like_zero() {
        let data = xor();

        let mut a = network();
        let mut b = network();
        let ea = a
            .train_batch(&data, 3, 0, false, &mut StdRng::seed_from_u64(0))
            .unwrap();
        let eb = b
            .train_batch(&data, 3, 10, false, &mut StdRng::seed_from_u64(0))
            .unwrap();

        assert_eq!(ea, eb);
        assert_eq!(a, b);
    }

    #[test]
    fn chunked_error_is_the_mean_of_chunk_means() {
        let mut rng = StdRng::seed_from_u64(0);
        let data = xor();

        let mut manual = network();
        let errs: Vec<f64> = data
            .samples()
            .iter()
            .map(|s| manual.train(&s.inputs, &s.targets).unwrap())
            .collect();
        // Chunks of 3 over 4 samples: [0, 1, 2] and [3].
        let expected = ((errs[0] + errs[1] + errs[2]) / 3. + errs[3]) / 2.;

        let mut net = network();
        let errors = net.train_batch(&data, 1, 3, false, &mut rng).unwrap();

        assert!((errors[0] - expected).abs() < 1e-12);
        // Updates are still applied after every sample.
        assert_eq!(net, manual);
    }

    #[test]
    fn shuffling_is_reproducible_with_a_seed() {
        let data = xor();

        let mut a = network();
        let mut b = network();
        let ea = a
            .train_batch(&data, 20, 0, true, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let eb = b
            .train_batch(&data, 20, 0, true, &mut StdRng::seed_from_u64(9))
            .unwrap();

        assert_eq!(ea, eb);
        assert_eq!(a, b);
    }

    #[test]
    fn train_with_reads_the_config() {
        let config = TrainConfig {
            epochs: 4,
            batch_size: 2,
            shuffle: false,
            seed: None,
        };

        let mut a = network();
        let mut b = network();
        let ea = a
            .train_with(&xor(), &config, &mut StdRng::seed_from_u64(1))
            .unwrap();
        let eb = b
            .train_batch(&xor(), 4, 2, false, &mut StdRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(ea, eb);
        assert_eq!(a, b);
    }
}
