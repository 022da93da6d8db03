use std::env;

use log::info;

use neural_engine::{
    ActFn, MlErr, Network, NetworkConfig, Result, TrainConfig, datasets, generate_rng,
    report::{ConfusionMatrix, arg_max, plot_errors, progress_bar},
};

const XOR_EPOCHS: usize = 10_000;
const DIGIT_EPOCHS: usize = 10_000;

/// A five with its middle right pixel switched off.
const NOISY_FIVE: [f64; 9] = [1., 1., 1., 1., 0., 0., 1., 1., 1.];

fn main() -> Result<()> {
    env_logger::init();

    let seed = env::args()
        .nth(1)
        .map(|arg| {
            arg.parse::<u64>()
                .map_err(|e| MlErr::InvalidConfig(format!("invalid seed '{arg}': {e}")))
        })
        .transpose()?;

    info!("running demos with seed {seed:?}");

    xor(seed)?;
    println!();
    digits(seed)?;

    Ok(())
}

fn xor(seed: Option<u64>) -> Result<()> {
    println!("=== XOR ===");

    let config = NetworkConfig::new(2, vec![4], 1, ActFn::sigmoid(), 0.1);
    let mut rng = generate_rng(seed);
    let mut net = Network::from_config(&config, &mut rng)?;
    let data = datasets::xor();

    let errors = net.train_with(&data, &TrainConfig::new(XOR_EPOCHS), &mut rng)?;
    print_training(&net, &errors);

    for sample in data.samples() {
        let output = net.predict(&sample.inputs)?;
        println!(
            "{:?} -> {:.4} (expected {})",
            sample.inputs, output[0], sample.targets[0]
        );
    }

    let restored = Network::from_json(&net.to_json()?)?;
    let same = data.samples().iter().all(|s| {
        match (net.predict(&s.inputs), restored.predict(&s.inputs)) {
            (Ok(a), Ok(b)) => a.iter().zip(&b).all(|(x, y)| (x - y).abs() < 1e-9),
            _ => false,
        }
    });
    println!("\nRestored from JSON, predictions match: {same}");

    Ok(())
}

fn digits(seed: Option<u64>) -> Result<()> {
    println!("=== Digit recognition ===");

    let config = NetworkConfig::new(9, vec![15], 10, ActFn::sigmoid(), 0.1);
    let mut rng = generate_rng(seed);
    let mut net = Network::from_config(&config, &mut rng)?;
    let data = datasets::digits();

    let errors = net.train_with(&data, &TrainConfig::new(DIGIT_EPOCHS), &mut rng)?;
    print_training(&net, &errors);

    let mut predictions = Vec::with_capacity(data.len());
    for (digit, sample) in data.samples().iter().enumerate() {
        let output = net.predict(&sample.inputs)?;
        if let Some(predicted) = arg_max(&output) {
            println!(
                "Input: digit {digit}, Predicted: {predicted} (confidence: {:.4})",
                output[predicted]
            );
        }
        predictions.push(output);
    }

    let targets: Vec<_> = data.samples().iter().map(|s| s.targets.clone()).collect();
    let labels: Vec<_> = (0..10).map(|d| d.to_string()).collect();
    println!(
        "\n{}",
        ConfusionMatrix::new(&predictions, &targets, &labels)?
    );

    let output = net.predict(&NOISY_FIVE)?;
    if let Some(predicted) = arg_max(&output) {
        println!(
            "\nInput: noisy 5, Predicted: {predicted} (confidence: {:.4})",
            output[predicted]
        );
    }

    for (digit, confidence) in output.iter().enumerate() {
        println!("Digit {digit}: {}", progress_bar(*confidence, 20));
    }

    Ok(())
}

fn print_training(net: &Network, errors: &[f64]) {
    println!(
        "Trained a {net} network ({} parameters) for {} epochs",
        net.num_params(),
        errors.len()
    );

    if let Some(last) = errors.last() {
        println!("Final error: {last:.6}");
    }

    println!("\n{}\n", plot_errors(errors, 60, 15));
}
