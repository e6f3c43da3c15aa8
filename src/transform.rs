//! Poses and the externally observable transform model.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One of the three transform axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl Axis {
    /// All axes in component order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Read this axis' component of `v`.
    #[must_use]
    pub fn get(self, v: Vec3) -> f32 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
            Self::Z => v.z,
        }
    }

    /// Write this axis' component of `v`.
    pub fn set(self, v: &mut Vec3, value: f32) {
        match self {
            Self::X => v.x = value,
            Self::Y => v.y = value,
            Self::Z => v.z = value,
        }
    }

    /// Lowercase label used by control panels.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

/// Linear interpolation between two values.
///
/// Written as `start * (1 - t) + end * t` so both endpoints are reproduced
/// exactly at `t = 0` and `t = 1`.
#[inline]
#[must_use]
pub fn lerp(t: f32, start: f32, end: f32) -> f32 {
    start * (1.0 - t) + end * t
}

/// Component-wise [`lerp`] between two `Vec3`s.
#[inline]
#[must_use]
pub fn lerp_vec3(t: f32, start: Vec3, end: Vec3) -> Vec3 {
    start * (1.0 - t) + end * t
}

/// A complete position/rotation/scale snapshot.
///
/// Rotation is XYZ Euler angles in radians. Poses are the endpoints of
/// every transition and never change once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World-space position.
    pub position: Vec3,
    /// Euler rotation in radians.
    pub rotation: Vec3,
    /// Uniform scale factor.
    pub scale: f32,
}

impl Pose {
    /// Pose from raw components (rotation in radians).
    #[must_use]
    pub const fn new(position: Vec3, rotation: Vec3, scale: f32) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Pose with its rotation given in degrees.
    #[must_use]
    pub fn from_degrees(position: Vec3, rotation_deg: Vec3, scale: f32) -> Self {
        Self {
            position,
            rotation: Vec3::new(
                rotation_deg.x.to_radians(),
                rotation_deg.y.to_radians(),
                rotation_deg.z.to_radians(),
            ),
            scale,
        }
    }

    /// Rotation converted to degrees, for display.
    #[must_use]
    pub fn rotation_degrees(&self) -> Vec3 {
        Vec3::new(
            self.rotation.x.to_degrees(),
            self.rotation.y.to_degrees(),
            self.rotation.z.to_degrees(),
        )
    }

    /// Finite components and a strictly positive scale.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.position.is_finite()
            && self.rotation.is_finite()
            && self.scale.is_finite()
            && self.scale > 0.0
    }

    /// Per-axis linear interpolation of position, rotation and scale.
    ///
    /// Rotation is interpolated in raw radians; no shortest-path wrapping.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: lerp_vec3(t, self.position, other.position),
            rotation: lerp_vec3(t, self.rotation, other.rotation),
            scale: lerp(t, self.scale, other.scale),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, 1.0)
    }
}

/// The transform the host reads each frame.
///
/// Written by the manual controls while no transition runs and by the
/// animator (composed with hover tilt) otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformModel {
    /// World-space position.
    pub position: Vec3,
    /// Euler rotation in radians.
    pub rotation: Vec3,
    /// Uniform scale factor.
    pub scale: f32,
    /// Hover tilt sensitivity multiplier.
    pub sensitivity: f32,
}

impl TransformModel {
    /// Model initialised from a pose.
    #[must_use]
    pub fn from_pose(pose: &Pose, sensitivity: f32) -> Self {
        Self {
            position: pose.position,
            rotation: pose.rotation,
            scale: pose.scale,
            sensitivity,
        }
    }

    /// Current position/rotation/scale as a pose.
    #[must_use]
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation, self.scale)
    }

    /// Overwrite position/rotation/scale, keeping sensitivity.
    pub fn apply_pose(&mut self, pose: &Pose) {
        self.position = pose.position;
        self.rotation = pose.rotation;
        self.scale = pose.scale;
    }

    /// Flatten to `[px, py, pz, rx, ry, rz, scale]` for host bridges.
    #[must_use]
    pub fn to_array(&self) -> [f32; 7] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
            self.scale,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose_a() -> Pose {
        Pose::new(Vec3::new(0.1, -1.9, 9.7), Vec3::new(0.3, 2.0, -0.7), 3.0)
    }

    fn pose_b() -> Pose {
        Pose::new(Vec3::new(-2.5, 0.7, 1.3), Vec3::new(-1.1, 0.2, 0.9), 0.7)
    }

    #[test]
    fn lerp_reproduces_endpoints_exactly() {
        let a = pose_a();
        let b = pose_b();
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    fn lerp_midpoint() {
        let a = Pose::new(Vec3::ZERO, Vec3::ZERO, 1.0);
        let b = Pose::new(Vec3::splat(2.0), Vec3::splat(1.0), 3.0);
        let mid = a.lerp(&b, 0.5);
        assert!((mid.position - Vec3::ONE).length() < 1e-6);
        assert!((mid.rotation - Vec3::splat(0.5)).length() < 1e-6);
        assert!((mid.scale - 2.0).abs() < 1e-6);
    }

    #[test]
    fn degrees_round_trip() {
        let pose = Pose::from_degrees(Vec3::ZERO, Vec3::new(51.0, 117.0, 13.0), 1.0);
        let deg = pose.rotation_degrees();
        assert!((deg - Vec3::new(51.0, 117.0, 13.0)).length() < 1e-3);
    }

    #[test]
    fn validity_rejects_bad_scale_and_nan() {
        assert!(pose_a().is_valid());
        assert!(!Pose::new(Vec3::ZERO, Vec3::ZERO, 0.0).is_valid());
        assert!(!Pose::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::ZERO, 1.0).is_valid());
    }

    #[test]
    fn axis_get_set() {
        let mut v = Vec3::ZERO;
        Axis::Y.set(&mut v, 4.0);
        assert_eq!(Axis::Y.get(v), 4.0);
        assert_eq!(v.x, 0.0);
        assert_eq!(Axis::Z.label(), "z");
    }

    #[test]
    fn model_keeps_sensitivity_when_pose_applied() {
        let mut model = TransformModel::from_pose(&pose_a(), 1.5);
        model.apply_pose(&pose_b());
        assert_eq!(model.pose(), pose_b());
        assert_eq!(model.sensitivity, 1.5);
        assert_eq!(model.to_array()[6], 0.7);
    }
}
