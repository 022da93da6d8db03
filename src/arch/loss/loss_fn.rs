use ndarray::{Array1, ArrayView1};

pub trait LossFn {
    /// Measures how far a single prediction is from its target.
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> f64;

    /// The per output error signal that seeds the backward pass, `y - y_pred`.
    fn error(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64>;
}
