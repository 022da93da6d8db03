//! Small built in datasets, handy for demos and smoke tests.

use crate::training::{Dataset, Sample};

/// 3x3 pixel renderings of the digits `0` to `9`, row major.
pub const DIGITS: [[f64; 9]; 10] = [
    [1., 1., 1., 1., 0., 1., 1., 1., 1.],
    [0., 1., 0., 0., 1., 0., 0., 1., 0.],
    [1., 1., 1., 0., 1., 0., 1., 1., 1.],
    [1., 1., 1., 0., 1., 1., 1., 1., 1.],
    [1., 0., 1., 1., 1., 1., 0., 0., 1.],
    [1., 1., 1., 1., 1., 0., 1., 1., 1.],
    [1., 0., 0., 1., 1., 1., 1., 1., 1.],
    [1., 1., 1., 0., 0., 1., 0., 0., 1.],
    [1., 1., 1., 1., 1., 1., 1., 1., 1.],
    [1., 1., 1., 1., 1., 1., 0., 0., 1.],
];

/// A vector of `len` zeros with a single one at `index`.
pub fn one_hot(index: usize, len: usize) -> Vec<f64> {
    let mut encoded = vec![0.; len];

    if let Some(v) = encoded.get_mut(index) {
        *v = 1.;
    }

    encoded
}

/// The four rows of the XOR truth table.
pub fn xor() -> Dataset {
    vec![
        (vec![0., 0.], vec![0.]),
        (vec![0., 1.], vec![1.]),
        (vec![1., 0.], vec![1.]),
        (vec![1., 1.], vec![0.]),
    ]
    .into()
}

/// Every digit in `DIGITS` paired with its one hot encoded label.
pub fn digits() -> Dataset {
    DIGITS
        .iter()
        .enumerate()
        .map(|(digit, pixels)| Sample::new(pixels.to_vec(), one_hot(digit, DIGITS.len())))
        .collect()
}
