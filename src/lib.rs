//! Planar pose estimation of a mobile robot with an Extended Kalman Filter
//! fusing commanded speed, gyroscope rate and sightings of fiducial markers
//! whose poses in the map are known.

pub mod config;
pub mod error;
pub mod localization;
pub mod models;
pub mod utils;

pub use config::FilterConfig;
pub use error::{LocalizationError, Result};
pub use localization::FiducialLocalizer;
