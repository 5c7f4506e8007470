mod bayesian_filter;
mod extended_kalman_filter;
mod inputs;
mod landmark_map;
mod localizer;

pub use bayesian_filter::BayesianFilterKnownCorrespondences;
pub use extended_kalman_filter::ExtendedKalmanFilterKnownCorrespondences;
pub use inputs::{InertialSample, MotionInput, Observation};
pub use landmark_map::{Landmark, LandmarkMap};
pub use localizer::FiducialLocalizer;
