use log::{debug, warn};
use nalgebra::{Matrix3, Vector2, Vector3};

use crate::config::FilterConfig;
use crate::error::{LocalizationError, Result};
use crate::localization::bayesian_filter::BayesianFilterKnownCorrespondences;
use crate::localization::inputs::Observation;
use crate::localization::landmark_map::LandmarkMap;
use crate::models::measurement::{MarkerPoseModel, MeasurementModel};
use crate::models::motion::{GyroUnicycle, MotionModel};
use crate::utils::pose::{normalize_angle, Pose};
use crate::utils::state::GaussianState;

/// EKF over the planar pose `[x, y, theta]`, control `[v, omega]`, and
/// marker sightings turned into robot poses (3 dims).
pub struct ExtendedKalmanFilterKnownCorrespondences {
    r: Matrix3<f64>,
    landmarks: LandmarkMap,
    measurement_model: MarkerPoseModel,
    motion_model: Box<dyn MotionModel<f64, 3, 2>>,
    state: GaussianState<f64, 3>,
    symmetrize: bool,
}

impl ExtendedKalmanFilterKnownCorrespondences {
    pub fn new(
        r: Matrix3<f64>,
        landmarks: LandmarkMap,
        motion_model: Box<dyn MotionModel<f64, 3, 2>>,
        initial_state: GaussianState<f64, 3>,
    ) -> ExtendedKalmanFilterKnownCorrespondences {
        ExtendedKalmanFilterKnownCorrespondences {
            r,
            landmarks,
            measurement_model: MarkerPoseModel,
            motion_model,
            state: initial_state,
            symmetrize: true,
        }
    }

    pub fn from_config(
        landmarks: LandmarkMap,
        config: &FilterConfig,
    ) -> ExtendedKalmanFilterKnownCorrespondences {
        let motion_model = GyroUnicycle::new(config.control_noise_matrix());
        let mut ekf = ExtendedKalmanFilterKnownCorrespondences::new(
            config.observation_noise_matrix(),
            landmarks,
            Box::new(motion_model),
            GaussianState::isotropic(config.initial_variance),
        );
        ekf.symmetrize = config.symmetrize;
        ekf
    }

    pub fn landmarks(&self) -> &LandmarkMap {
        &self.landmarks
    }

    pub fn state(&self) -> &GaussianState<f64, 3> {
        &self.state
    }

    pub fn pose(&self) -> Pose {
        Pose::from_vector(&self.state.x)
    }

    /// Prior from the control `u = [v, omega]` applied for `dt` seconds.
    /// Leaves the belief untouched when `dt` is not a positive duration or
    /// the control is not finite.
    pub fn predict(&mut self, u: &Vector2<f64>, dt: f64) {
        if dt <= 0.0 || !dt.is_finite() {
            debug!("skipping prediction for dt = {dt}");
            return;
        }
        if u.iter().any(|v| !v.is_finite()) {
            debug!("skipping prediction for control ({}, {})", u[0], u[1]);
            return;
        }
        let x = &self.state.x;
        let f = self.motion_model.jacobian_wrt_state(x, u, dt);
        let g = self.motion_model.jacobian_wrt_input(x, u, dt);
        let q = self.motion_model.cov_noise_control_space(u);

        self.state.x = self.motion_model.prediction(x, u, dt);
        self.state.cov = f * self.state.cov * f.transpose() + g * q * g.transpose();
        if self.symmetrize {
            self.state.symmetrize();
        }
    }

    /// Posterior after fusing a single marker sighting. On error the belief
    /// is left untouched.
    pub fn update(&mut self, observation: &Observation) -> Result<()> {
        let landmark = self.landmarks.lookup(observation.id)?;
        let z = MarkerPoseModel::inferred_pose(landmark, &observation.relative_pose).to_vector();

        let x = &self.state.x;
        let p = &self.state.cov;
        let z_pred = self.measurement_model.prediction(x, None);
        let h = self.measurement_model.jacobian(x, None);
        let y = self.measurement_model.innovation(&z, &z_pred);

        let s = h * p * h.transpose() + self.r;
        let s_inv = s
            .try_inverse()
            .filter(|m| m.iter().all(|v| v.is_finite()))
            .ok_or(LocalizationError::SingularInnovationCovariance(observation.id))?;
        let k = p * h.transpose() * s_inv;

        let mut new_x = x + k * y;
        new_x[2] = normalize_angle(new_x[2]);
        let new_cov = (Matrix3::identity() - k * h) * p;

        self.state.x = new_x;
        self.state.cov = new_cov;
        if self.symmetrize {
            self.state.symmetrize();
        }
        Ok(())
    }

    /// Sequential fusion in ascending landmark id (stable for repeated ids).
    /// A rejected sighting is skipped and the rest of the batch still runs.
    pub fn update_all(&mut self, observations: &[Observation]) -> Vec<LocalizationError> {
        let mut ordered: Vec<&Observation> = observations.iter().collect();
        ordered.sort_by_key(|obs| obs.id);

        let mut rejected = Vec::new();
        for obs in ordered {
            if let Err(e) = self.update(obs) {
                warn!("skipping observation of landmark {}: {e}", obs.id);
                rejected.push(e);
            }
        }
        rejected
    }
}

impl BayesianFilterKnownCorrespondences<f64, 3, 3, 2> for ExtendedKalmanFilterKnownCorrespondences {
    fn update_estimate(
        &mut self,
        control: Option<Vector2<f64>>,
        measurements: Option<Vec<(u32, Vector3<f64>)>>,
        dt: f64,
    ) -> Vec<LocalizationError> {
        if let Some(u) = control {
            self.predict(&u, dt);
        }

        match measurements {
            Some(measurements) => {
                // headings arrive wrapped, so rebuilding the poses leaves them as sent
                let observations: Vec<Observation> = measurements
                    .iter()
                    .map(|(id, z)| Observation::from_vector(*id, z))
                    .collect();
                self.update_all(&observations)
            }
            None => Vec::new(),
        }
    }

    fn gaussian_estimate(&self) -> GaussianState<f64, 3> {
        self.state
    }

    fn set_gaussian_estimate(&mut self, state: GaussianState<f64, 3>) {
        self.state = state;
    }
}
