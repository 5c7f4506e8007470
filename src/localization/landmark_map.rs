use rustc_hash::FxHashMap;

use crate::error::{LocalizationError, Result};
use crate::utils::pose::Pose;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub id: u32,
    pub pose: Pose,
}

impl Landmark {
    pub fn new(x: f64, y: f64, theta: f64, id: u32) -> Landmark {
        Landmark {
            id,
            pose: Pose::new(x, y, theta),
        }
    }
}

impl From<(f64, f64, f64, u32)> for Landmark {
    fn from((x, y, theta, id): (f64, f64, f64, u32)) -> Self {
        Landmark::new(x, y, theta, id)
    }
}

/// Fixed map from marker id to the marker's global pose.
#[derive(Debug, Clone, Default)]
pub struct LandmarkMap {
    landmarks: FxHashMap<u32, Pose>,
}

impl LandmarkMap {
    pub fn new<I>(landmarks: I) -> Result<LandmarkMap>
    where
        I: IntoIterator<Item = Landmark>,
    {
        let mut map = FxHashMap::default();
        for lm in landmarks {
            if map.insert(lm.id, lm.pose).is_some() {
                return Err(LocalizationError::DuplicateLandmarkId(lm.id));
            }
        }
        Ok(LandmarkMap { landmarks: map })
    }

    /// From `(x, y, theta, id)` rows
    pub fn from_markers(markers: &[(f64, f64, f64, u32)]) -> Result<LandmarkMap> {
        LandmarkMap::new(markers.iter().copied().map(Landmark::from))
    }

    pub fn lookup(&self, id: u32) -> Result<&Pose> {
        self.landmarks
            .get(&id)
            .ok_or(LocalizationError::UnknownLandmark(id))
    }

    pub fn contains(&self, id: u32) -> bool {
        self.landmarks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Landmarks sorted by id
    pub fn landmarks(&self) -> Vec<Landmark> {
        let mut out: Vec<Landmark> = self
            .landmarks
            .iter()
            .map(|(id, pose)| Landmark { id: *id, pose: *pose })
            .collect();
        out.sort_by_key(|lm| lm.id);
        out
    }
}
