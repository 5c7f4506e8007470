//! Filter tuning.
//!
//! Every field has a default, so an empty TOML document gives an un-tuned
//! filter: identity noise covariances and a `1000 * I` initial covariance.
//!
//! ```toml
//! control_noise = [[0.01, 0.0], [0.0, 0.0025]]
//! observation_noise = [[0.04, 0.0, 0.0], [0.0, 0.04, 0.0], [0.0, 0.0, 0.01]]
//! initial_variance = 1000.0
//! symmetrize = true
//! ```

use std::path::Path;

use nalgebra::{Matrix2, Matrix3, SMatrix};
use serde::{Deserialize, Serialize};

use crate::error::{LocalizationError, Result};

const SYMMETRY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Q: covariance of the control `[v, omega]`
    pub control_noise: [[f64; 2]; 2],
    /// R: covariance of a robot pose inferred from one marker
    pub observation_noise: [[f64; 3]; 3],
    /// Diagonal of the initial pose covariance
    pub initial_variance: f64,
    /// Re-symmetrize the covariance after every prediction and correction
    pub symmetrize: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            control_noise: [[1.0, 0.0], [0.0, 1.0]],
            observation_noise: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            initial_variance: 1000.0,
            symmetrize: true,
        }
    }
}

impl FilterConfig {
    pub fn from_toml_str(s: &str) -> Result<FilterConfig> {
        let config: FilterConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FilterConfig> {
        let s = std::fs::read_to_string(path)?;
        FilterConfig::from_toml_str(&s)
    }

    pub fn control_noise_matrix(&self) -> Matrix2<f64> {
        Matrix2::from_fn(|i, j| self.control_noise[i][j])
    }

    pub fn observation_noise_matrix(&self) -> Matrix3<f64> {
        Matrix3::from_fn(|i, j| self.observation_noise[i][j])
    }

    pub fn validate(&self) -> Result<()> {
        check_covariance("control_noise", &self.control_noise_matrix())?;
        check_covariance("observation_noise", &self.observation_noise_matrix())?;
        if !(self.initial_variance.is_finite() && self.initial_variance > 0.0) {
            return Err(LocalizationError::Config(format!(
                "initial_variance must be positive, got {}",
                self.initial_variance
            )));
        }
        Ok(())
    }
}

fn check_covariance<const D: usize>(name: &str, m: &SMatrix<f64, D, D>) -> Result<()> {
    if m.iter().any(|v| !v.is_finite()) {
        return Err(LocalizationError::Config(format!("{name} has non-finite entries")));
    }
    if (m - m.transpose()).abs().max() > SYMMETRY_TOLERANCE {
        return Err(LocalizationError::Config(format!("{name} is not symmetric")));
    }
    if m.diagonal().iter().any(|v| *v < 0.0) {
        return Err(LocalizationError::Config(format!("{name} has a negative variance")));
    }
    Ok(())
}
