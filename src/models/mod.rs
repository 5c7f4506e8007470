pub mod measurement;
pub mod motion;
