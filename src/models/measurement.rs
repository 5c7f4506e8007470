use nalgebra::{Matrix3, RealField, SMatrix, SVector, Vector3};

use crate::utils::pose::{compose, invert, normalize_angle, Pose};

pub trait MeasurementModel<T: RealField, const S: usize, const Z: usize> {
    fn prediction(&self, x: &SVector<T, S>, landmark: Option<&SVector<T, S>>) -> SVector<T, Z>;
    fn jacobian(&self, x: &SVector<T, S>, landmark: Option<&SVector<T, S>>) -> SMatrix<T, Z, S>;

    /// Difference between an observed and a predicted measurement
    fn innovation(&self, z: &SVector<T, Z>, z_pred: &SVector<T, Z>) -> SVector<T, Z> {
        z - z_pred
    }
}

/// A fiducial marker of known global pose, observed with its full pose in
/// the robot frame, pins down the robot pose directly:
///
/// robot_world = marker_world * (marker_robot)^-1
///
/// The measurement therefore lives in state space, `h(x) = x` and `H = I`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerPoseModel;

impl MarkerPoseModel {
    /// Robot pose in the map frame implied by one marker sighting
    pub fn inferred_pose(landmark: &Pose, relative_pose: &Pose) -> Pose {
        compose(landmark, &invert(relative_pose))
    }
}

impl MeasurementModel<f64, 3, 3> for MarkerPoseModel {
    fn prediction(&self, x: &Vector3<f64>, _landmark: Option<&Vector3<f64>>) -> Vector3<f64> {
        *x
    }

    fn jacobian(&self, _x: &Vector3<f64>, _landmark: Option<&Vector3<f64>>) -> Matrix3<f64> {
        Matrix3::identity()
    }

    fn innovation(&self, z: &Vector3<f64>, z_pred: &Vector3<f64>) -> Vector3<f64> {
        let mut y = z - z_pred;
        y[2] = normalize_angle(y[2]);
        y
    }
}
