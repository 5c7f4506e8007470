use std::f64::consts::{PI, TAU};

use nalgebra::{Isometry2, Translation2, UnitComplex, Vector3};

/// Wraps any angle into (-pi, pi].
pub fn normalize_angle(theta: f64) -> f64 {
    if theta > -PI && theta <= PI {
        return theta;
    }
    let wrapped = theta.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// 2D rigid-body pose `(x, y, theta)`, also used as a rigid transform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    /// Heading in radians, kept in (-pi, pi]
    pub theta: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, theta: f64) -> Pose {
        Pose {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// `other` is expressed in the frame of `self`; the result is `other`
    /// expressed in the parent frame of `self`.
    pub fn compose(&self, other: &Pose) -> Pose {
        let (sin, cos) = self.theta.sin_cos();
        Pose::new(
            self.x + cos * other.x - sin * other.y,
            self.y + sin * other.x + cos * other.y,
            self.theta + other.theta,
        )
    }

    pub fn inverse(&self) -> Pose {
        let (sin, cos) = self.theta.sin_cos();
        Pose::new(
            -(cos * self.x + sin * self.y),
            sin * self.x - cos * self.y,
            -self.theta,
        )
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.theta)
    }

    pub fn from_vector(v: &Vector3<f64>) -> Pose {
        Pose::new(v.x, v.y, v.z)
    }

    pub fn to_isometry(&self) -> Isometry2<f64> {
        Isometry2::from_parts(
            Translation2::new(self.x, self.y),
            UnitComplex::from_angle(self.theta),
        )
    }

    pub fn from_isometry(iso: &Isometry2<f64>) -> Pose {
        Pose::new(iso.translation.x, iso.translation.y, iso.rotation.angle())
    }
}

impl From<Vector3<f64>> for Pose {
    fn from(v: Vector3<f64>) -> Self {
        Pose::from_vector(&v)
    }
}

impl From<Pose> for Vector3<f64> {
    fn from(p: Pose) -> Self {
        p.to_vector()
    }
}

pub fn compose(a: &Pose, b: &Pose) -> Pose {
    a.compose(b)
}

pub fn invert(a: &Pose) -> Pose {
    a.inverse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{deg2rad, rad2deg};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn normalize_angle_range() {
        approx::assert_abs_diff_eq!(normalize_angle(0.0), 0.0);
        approx::assert_abs_diff_eq!(normalize_angle(PI), PI);
        approx::assert_abs_diff_eq!(normalize_angle(-PI), PI);
        approx::assert_abs_diff_eq!(normalize_angle(3.0 * PI).abs(), PI, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(normalize_angle(TAU + 0.5), 0.5, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(normalize_angle(-TAU - 0.5), -0.5, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(normalize_angle(deg2rad(270.0)), -FRAC_PI_2, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(rad2deg(normalize_angle(deg2rad(190.0))), -170.0, epsilon = 1e-9);
        for i in -100..100 {
            let theta = normalize_angle(i as f64 * 0.37);
            assert!(theta > -PI && theta <= PI, "{theta}");
        }
    }

    #[test]
    fn wrapped_angle_is_left_bit_exact() {
        for theta in [-3.1, -2.0e-17, -0.5, 0.0, 1.0, PI] {
            assert_eq!(normalize_angle(theta).to_bits(), theta.to_bits());
            assert_eq!(normalize_angle(normalize_angle(theta + 7.0)), normalize_angle(theta + 7.0));
        }
    }

    #[test]
    fn short_way_around() {
        // heading 3.0 observed while the estimate sits at -3.0
        let diff = normalize_angle(3.0 - -3.0);
        approx::assert_abs_diff_eq!(diff, 6.0 - TAU, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(diff, -0.283, epsilon = 1e-3);
    }

    #[test]
    fn compose_rotates_then_translates() {
        let a = Pose::new(1.0, 2.0, FRAC_PI_2);
        let b = Pose::new(1.0, 0.0, FRAC_PI_2);
        let c = compose(&a, &b);
        approx::assert_abs_diff_eq!(c.to_vector(), Vector3::new(1.0, 3.0, PI), epsilon = 1e-12);

        // not commutative
        let d = compose(&b, &a);
        approx::assert_abs_diff_eq!(d.to_vector(), Vector3::new(-1.0, 1.0, PI), epsilon = 1e-12);
    }

    #[test]
    fn invert_undoes_compose() {
        let a = Pose::new(-3.2, 0.7, 2.9);
        let b = Pose::new(0.4, -1.1, -2.5);
        let back = compose(&invert(&a), &compose(&a, &b));
        approx::assert_abs_diff_eq!(back.to_vector(), b.to_vector(), epsilon = 1e-12);
        let id = compose(&a, &invert(&a));
        approx::assert_abs_diff_eq!(id.to_vector(), Vector3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn matches_isometry_product() {
        let a = Pose::new(2.0, -1.0, 0.3);
        let b = Pose::new(-0.5, 4.0, 2.8);
        let expected = Pose::from_isometry(&(a.to_isometry() * b.to_isometry()));
        approx::assert_abs_diff_eq!(compose(&a, &b).to_vector(), expected.to_vector(), epsilon = 1e-12);
        let expected = Pose::from_isometry(&a.to_isometry().inverse());
        approx::assert_abs_diff_eq!(invert(&a).to_vector(), expected.to_vector(), epsilon = 1e-12);
    }
}
