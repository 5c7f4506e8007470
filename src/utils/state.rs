use nalgebra::{RealField, SMatrix, SVector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianState<T: RealField, const D: usize> {
    /// State Vector
    pub x: SVector<T, D>,
    /// Covariance Matrix
    pub cov: SMatrix<T, D, D>,
}

impl<T: RealField + Copy, const D: usize> GaussianState<T, D> {
    pub fn new(x: SVector<T, D>, cov: SMatrix<T, D, D>) -> GaussianState<T, D> {
        GaussianState { x, cov }
    }

    /// Zero mean with `variance * I` covariance
    pub fn isotropic(variance: T) -> GaussianState<T, D> {
        GaussianState {
            x: SVector::zeros(),
            cov: SMatrix::identity() * variance,
        }
    }

    /// P <- (P + P^T) / 2
    pub fn symmetrize(&mut self) {
        let two = T::one() + T::one();
        self.cov = (self.cov + self.cov.transpose()) / two;
    }

    pub fn uncertainty(&self) -> T {
        self.cov.trace()
    }
}
