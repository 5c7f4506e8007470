use nalgebra::Vector3;

use crate::utils::pose::Pose;

/// A decoded marker sighting: the marker pose in the robot frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub id: u32,
    pub relative_pose: Pose,
}

impl Observation {
    pub fn new(id: u32, x: f64, y: f64, theta: f64) -> Observation {
        Observation {
            id,
            relative_pose: Pose::new(x, y, theta),
        }
    }

    pub fn from_vector(id: u32, relative_pose: &Vector3<f64>) -> Observation {
        Observation {
            id,
            relative_pose: Pose::from_vector(relative_pose),
        }
    }
}

/// Gyroscope reading; the accelerometer is not used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertialSample {
    /// angular rate around the vertical axis, rad/s
    pub omega: f64,
    /// seconds
    pub timestamp: f64,
}

impl InertialSample {
    pub fn new(omega: f64, timestamp: f64) -> InertialSample {
        InertialSample { omega, timestamp }
    }

    /// From a raw IMU row `[acc_x, acc_y, acc_z, omega, time]`
    pub fn from_imu_measurement(row: &[f64; 5]) -> InertialSample {
        let [_, _, _, omega, timestamp] = *row;
        InertialSample { omega, timestamp }
    }
}

/// Proprioceptive input of one tick: commanded forward speed and the gyro.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionInput {
    /// m/s
    pub v: f64,
    pub imu: InertialSample,
}

impl MotionInput {
    pub fn new(v: f64, imu: InertialSample) -> MotionInput {
        MotionInput { v, imu }
    }
}
