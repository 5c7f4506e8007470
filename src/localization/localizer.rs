use log::{debug, trace};
use nalgebra::{Matrix3, Vector2, Vector3};

use crate::config::FilterConfig;
use crate::error::{LocalizationError, Result};
use crate::localization::bayesian_filter::BayesianFilterKnownCorrespondences;
use crate::localization::extended_kalman_filter::ExtendedKalmanFilterKnownCorrespondences;
use crate::localization::inputs::{MotionInput, Observation};
use crate::localization::landmark_map::LandmarkMap;
use crate::utils::pose::Pose;
use crate::utils::state::GaussianState;

/// Per-tick entry point of the localization filter.
///
/// Tracks the time of the last inertial sample used for a prediction; the
/// first sample only starts the clock. Meant to be driven from a single
/// control loop, callers on several threads must serialize `step`.
pub struct FiducialLocalizer<F = ExtendedKalmanFilterKnownCorrespondences> {
    filter: F,
    initial_state: GaussianState<f64, 3>,
    last_timestamp: Option<f64>,
    last_rejections: Vec<LocalizationError>,
}

impl FiducialLocalizer<ExtendedKalmanFilterKnownCorrespondences> {
    /// Un-tuned filter over the `(x, y, theta, id)` marker map
    pub fn new(markers: &[(f64, f64, f64, u32)]) -> Result<Self> {
        FiducialLocalizer::from_config(markers, &FilterConfig::default())
    }

    pub fn from_config(markers: &[(f64, f64, f64, u32)], config: &FilterConfig) -> Result<Self> {
        config.validate()?;
        let landmarks = LandmarkMap::from_markers(markers)?;
        let ekf = ExtendedKalmanFilterKnownCorrespondences::from_config(landmarks, config);
        Ok(FiducialLocalizer::with_filter(ekf))
    }
}

impl<F> FiducialLocalizer<F>
where
    F: BayesianFilterKnownCorrespondences<f64, 3, 3, 2>,
{
    pub fn with_filter(filter: F) -> Self {
        let initial_state = filter.gaussian_estimate();
        FiducialLocalizer {
            filter,
            initial_state,
            last_timestamp: None,
            last_rejections: Vec::new(),
        }
    }

    /// Runs one filter cycle and returns the resulting pose estimate.
    ///
    /// * `motion`: commanded speed and gyro sample, predicts when the clock
    ///   is running and time moved forward.
    /// * `observations`: marker sightings, fused in ascending id order.
    ///
    /// Sightings that cannot be fused are skipped and reported by
    /// [`FiducialLocalizer::last_rejections`].
    pub fn step(&mut self, motion: Option<MotionInput>, observations: Option<&[Observation]>) -> Pose {
        let prediction = motion.and_then(|m| self.elapsed(&m).map(|dt| (m, dt)));

        let measurements = observations.filter(|obs| !obs.is_empty()).map(|obs| {
            obs.iter()
                .map(|o| (o.id, o.relative_pose.to_vector()))
                .collect::<Vec<(u32, Vector3<f64>)>>()
        });
        let fused = measurements.as_ref().map_or(0, |m| m.len());

        let (control, dt) = match prediction {
            Some((m, dt)) => (Some(Vector2::new(m.v, m.imu.omega)), dt),
            None => (None, 0.0),
        };
        self.last_rejections = self.filter.update_estimate(control, measurements, dt);
        if let Some((m, _)) = prediction {
            self.last_timestamp = Some(m.imu.timestamp);
        }

        let pose = self.pose();
        trace!(
            "tick: predicted={} observations={} rejected={} pose=({:.3}, {:.3}, {:.3})",
            prediction.is_some(),
            fused,
            self.last_rejections.len(),
            pose.x,
            pose.y,
            pose.theta
        );
        pose
    }

    /// Time since the last prediction, or `None` when no prediction should run.
    fn elapsed(&mut self, motion: &MotionInput) -> Option<f64> {
        let timestamp = motion.imu.timestamp;
        if !timestamp.is_finite() {
            debug!("ignoring inertial sample with timestamp {timestamp}");
            return None;
        }
        if !(motion.v.is_finite() && motion.imu.omega.is_finite()) {
            debug!(
                "ignoring motion input v = {}, omega = {} at t = {timestamp}",
                motion.v, motion.imu.omega
            );
            return None;
        }
        match self.last_timestamp {
            None => {
                debug!("first inertial sample at t = {timestamp}, starting the clock");
                self.last_timestamp = Some(timestamp);
                None
            }
            Some(last) => {
                let dt = timestamp - last;
                if dt > 0.0 {
                    Some(dt)
                } else {
                    debug!("inertial sample at t = {timestamp} is not after t = {last}, no prediction");
                    None
                }
            }
        }
    }

    pub fn current(&self) -> GaussianState<f64, 3> {
        self.filter.gaussian_estimate()
    }

    pub fn pose(&self) -> Pose {
        Pose::from_vector(&self.filter.gaussian_estimate().x)
    }

    pub fn covariance(&self) -> Matrix3<f64> {
        self.filter.gaussian_estimate().cov
    }

    /// True once an inertial sample has started the clock
    pub fn is_initialized(&self) -> bool {
        self.last_timestamp.is_some()
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    /// Sightings skipped during the last `step`
    pub fn last_rejections(&self) -> &[LocalizationError] {
        &self.last_rejections
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Back to the initial belief with the clock stopped; the map is kept.
    pub fn reset(&mut self) {
        self.filter.set_gaussian_estimate(self.initial_state);
        self.last_timestamp = None;
        self.last_rejections.clear();
    }
}
