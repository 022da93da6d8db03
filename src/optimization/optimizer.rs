use ndarray::{ArrayView, ArrayViewMut, Dimension};

pub trait Optimizer {
    /// Applies one step of the optimization algorithm onto `params` given their `grad`.
    fn update_params<D: Dimension>(
        &mut self,
        params: ArrayViewMut<f64, D>,
        grad: ArrayView<f64, D>,
    );
}
