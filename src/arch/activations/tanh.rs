/// The hyperbolic tangent, squashes any input into `(-1, 1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tanh;

impl Tanh {
    pub fn f(&self, z: f64) -> f64 {
        z.tanh()
    }

    pub fn df(&self, z: f64) -> f64 {
        1. - z.tanh().powi(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tanh_values() {
        assert_eq!(Tanh.f(0.), 0.);
        assert_eq!(Tanh.df(0.), 1.);
        assert!((Tanh.f(1.) - 0.761_594_155_955_764_9).abs() < 1e-12);
        assert!((Tanh.df(1.) - 0.419_974_341_614_026_1).abs() < 1e-12);
    }
}
