use nalgebra::{Matrix2, Matrix3, Matrix3x2, RealField, SMatrix, SVector, Vector2, Vector3};

use crate::utils::pose::normalize_angle;

pub trait MotionModel<T: RealField, const S: usize, const U: usize> {
    fn prediction(&self, x: &SVector<T, S>, u: &SVector<T, U>, dt: T) -> SVector<T, S>;
    fn jacobian_wrt_state(&self, x: &SVector<T, S>, u: &SVector<T, U>, dt: T) -> SMatrix<T, S, S>;
    fn jacobian_wrt_input(&self, x: &SVector<T, S>, u: &SVector<T, U>, dt: T) -> SMatrix<T, S, U>;
    fn cov_noise_control_space(&self, u: &SVector<T, U>) -> SMatrix<T, U, U>;
}

/// Unicycle driven by the commanded forward speed, with the gyroscope rate
/// taken as the turn rate.
///
/// state `[x, y, theta]`, control `[v, omega]`
///
/// x_{t+1} = x_t + v * dt * cos(theta)
///
/// y_{t+1} = y_t + v * dt * sin(theta)
///
/// theta_{t+1} = theta_t + omega * dt
///
/// so
///
/// dx/dtheta = -v * dt * sin(theta)
///
/// dy/dtheta = v * dt * cos(theta)
///
/// dx/dv = dt * cos(theta), dy/dv = dt * sin(theta), dtheta/domega = dt
#[derive(Debug, Clone, Copy)]
pub struct GyroUnicycle {
    /// Covariance of `[v, omega]`
    control_noise: Matrix2<f64>,
}

impl GyroUnicycle {
    pub fn new(control_noise: Matrix2<f64>) -> GyroUnicycle {
        GyroUnicycle { control_noise }
    }
}

impl Default for GyroUnicycle {
    fn default() -> Self {
        GyroUnicycle::new(Matrix2::identity())
    }
}

impl MotionModel<f64, 3, 2> for GyroUnicycle {
    fn prediction(&self, x: &Vector3<f64>, u: &Vector2<f64>, dt: f64) -> Vector3<f64> {
        let theta = x[2];
        let v = u[0];
        let w = u[1];
        Vector3::new(
            x[0] + v * theta.cos() * dt,
            x[1] + v * theta.sin() * dt,
            normalize_angle(theta + w * dt),
        )
    }

    fn jacobian_wrt_state(&self, x: &Vector3<f64>, u: &Vector2<f64>, dt: f64) -> Matrix3<f64> {
        let theta = x[2];
        let v = u[0];
        #[rustfmt::skip]
        let jacobian = Matrix3::new(
            1., 0., -v * theta.sin() * dt,
            0., 1.,  v * theta.cos() * dt,
            0., 0., 1.,
        );
        jacobian
    }

    fn jacobian_wrt_input(&self, x: &Vector3<f64>, _u: &Vector2<f64>, dt: f64) -> Matrix3x2<f64> {
        let theta = x[2];
        #[rustfmt::skip]
        let jacobian = Matrix3x2::new(
            theta.cos() * dt, 0.,
            theta.sin() * dt, 0.,
            0., dt,
        );
        jacobian
    }

    fn cov_noise_control_space(&self, _u: &Vector2<f64>) -> Matrix2<f64> {
        self.control_noise
    }
}
