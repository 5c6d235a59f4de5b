use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Rigid-body transform: rotation followed by translation.
///
/// Used for the camera and for every wall placement. There is no scale
/// component; panel sizes travel separately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Pure translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Pure rotation about a principal axis, angle in degrees.
    pub fn from_axis_degrees(axis: Axis, degrees: f32) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::from_axis_angle(axis.unit(), degrees.to_radians()),
        }
    }

    /// Rotation about Y (yaw), degrees.
    pub fn from_yaw_degrees(degrees: f32) -> Self {
        Self::from_axis_degrees(Axis::Y, degrees)
    }

    /// World-space origin of this frame.
    pub fn position(&self) -> Vec3 {
        self.translation
    }

    /// Local +Y expressed in world space. For a wall this is its normal.
    pub fn up_axis(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Local -Z expressed in world space (camera viewing direction).
    pub fn forward_axis(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            translation: -(rotation * self.translation),
            rotation,
        }
    }

    /// Map a point from this frame's local coordinates into the parent frame.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * point
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    /// Approximate equality on both components.
    ///
    /// Rotations compare as orientations, so `q` and `-q` are equal.
    pub fn abs_diff_eq(&self, other: &Pose, max_abs_diff: f32) -> bool {
        self.translation
            .abs_diff_eq(other.translation, max_abs_diff)
            && (self.rotation.abs_diff_eq(other.rotation, max_abs_diff)
                || self.rotation.abs_diff_eq(-other.rotation, max_abs_diff))
    }
}

impl Mul for Pose {
    type Output = Pose;

    fn mul(self, rhs: Pose) -> Pose {
        Pose {
            translation: self.transform_point(rhs.translation),
            rotation: (self.rotation * rhs.rotation).normalize(),
        }
    }
}

impl Mul<&Pose> for &Pose {
    type Output = Pose;

    fn mul(self, rhs: &Pose) -> Pose {
        *self * *rhs
    }
}

/// Principal axis, used by the wall tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_rgba(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

/// The two shading programs the user can flip between with `f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShaderProgram {
    /// Two-light diffuse shading.
    #[default]
    Diffuse,
    /// Flat, unlit color.
    Solid,
}

impl ShaderProgram {
    pub fn toggled(self) -> Self {
        match self {
            ShaderProgram::Diffuse => ShaderProgram::Solid,
            ShaderProgram::Solid => ShaderProgram::Diffuse,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderProgram::Diffuse => "diffuse",
            ShaderProgram::Solid => "solid",
        }
    }
}
