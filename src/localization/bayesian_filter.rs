use nalgebra::{RealField, SVector};

use crate::error::LocalizationError;
use crate::utils::state::GaussianState;

/// S : State Size, Z: Observation Size, U: Input Size
///
/// Filter whose measurements carry the id of the landmark they refer to.
pub trait BayesianFilterKnownCorrespondences<
    T: RealField,
    const S: usize,
    const Z: usize,
    const U: usize,
>
{
    /// Predict with `control` over `dt` when present, then fuse every
    /// measurement. Returns the measurements that had to be skipped.
    fn update_estimate(
        &mut self,
        control: Option<SVector<T, U>>,
        measurements: Option<Vec<(u32, SVector<T, Z>)>>,
        dt: T,
    ) -> Vec<LocalizationError>;

    fn gaussian_estimate(&self) -> GaussianState<T, S>;

    fn set_gaussian_estimate(&mut self, state: GaussianState<T, S>);
}
