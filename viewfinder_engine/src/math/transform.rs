/// Transform: translation, rotation and scale of a scene object.
///
/// Axis convention: local +X is forward (view direction / capture depth),
/// +Y is right and +Z is up.
///
/// Composition follows the parent/child rule: a child transform expressed
/// relative to its parent becomes `parent.mul_transform(child)` in world space.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Transform with only a translation
    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, ..Self::IDENTITY }
    }

    /// Transform with translation and rotation, unit scale
    pub fn from_translation_rotation(translation: Vec3, rotation: Quat) -> Self {
        Self { translation, rotation, scale: Vec3::ONE }
    }

    /// Builder: replace the scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Same location and rotation, unit scale
    pub fn no_scale(&self) -> Self {
        Self { scale: Vec3::ONE, ..*self }
    }

    /// Local +X in world space
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Local +Y in world space
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Local +Z in world space
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Affine matrix (scale, then rotation, then translation)
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Transform a point from local to parent space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * (self.scale * point)
    }

    /// Compose: `child` is expressed relative to `self`, the result is in `self`'s parent space.
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            translation: self.transform_point(child.translation),
            rotation: (self.rotation * child.rotation).normalize(),
            scale: self.scale * child.scale,
        }
    }

    /// Express `self` relative to `parent` (inverse of `parent.mul_transform`).
    ///
    /// Exact for uniform parent scale; with non-uniform parent scale the
    /// rotation is kept and the scale divided per axis.
    pub fn relative_to(&self, parent: &Transform) -> Transform {
        let inv_rotation = parent.rotation.inverse();
        let inv_scale = safe_recip(parent.scale);
        Transform {
            translation: inv_scale * (inv_rotation * (self.translation - parent.translation)),
            rotation: (inv_rotation * self.rotation).normalize(),
            scale: self.scale * inv_scale,
        }
    }

    /// Rotate by `angle_degrees` about this transform's own forward axis.
    ///
    /// The rotation is applied in world space: `new = axis_rotation * current`.
    pub fn rotated_about_forward(&self, angle_degrees: f32) -> Transform {
        let axis_rotation = Quat::from_axis_angle(self.forward(), angle_degrees.to_radians());
        Transform {
            rotation: (axis_rotation * self.rotation).normalize(),
            ..*self
        }
    }

    /// Approximate equality on every component
    pub fn abs_diff_eq(&self, other: &Transform, tolerance: f32) -> bool {
        self.translation.abs_diff_eq(other.translation, tolerance)
            && self.scale.abs_diff_eq(other.scale, tolerance)
            && self.rotation.dot(other.rotation).abs() >= 1.0 - tolerance
    }
}

fn safe_recip(v: Vec3) -> Vec3 {
    Vec3::new(
        if v.x.abs() > f32::EPSILON { 1.0 / v.x } else { 0.0 },
        if v.y.abs() > f32::EPSILON { 1.0 / v.y } else { 0.0 },
        if v.z.abs() > f32::EPSILON { 1.0 / v.z } else { 0.0 },
    )
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
