//! Quaternion for 3D rotations

use super::Vec3;

/// Unit quaternion describing a rotation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create from axis-angle representation
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let len = axis.length();
        if len < 1e-6 {
            return Self::IDENTITY;
        }

        let (s, c) = (angle * 0.5).sin_cos();
        let inv_len = 1.0 / len;
        Self {
            x: axis.x * inv_len * s,
            y: axis.y * inv_len * s,
            z: axis.z * inv_len * s,
            w: c,
        }
    }

    /// Hamilton product `self * other`: applies `other` first, then `self`
    pub fn mul(&self, other: &Self) -> Self {
        Self {
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
        }
    }

    /// Rotate a vector by this quaternion
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        // q * v * q^-1 expanded
        let ix = self.w * v.x + self.y * v.z - self.z * v.y;
        let iy = self.w * v.y + self.z * v.x - self.x * v.z;
        let iz = self.w * v.z + self.x * v.y - self.y * v.x;
        let iw = -self.x * v.x - self.y * v.y - self.z * v.z;

        Vec3::new(
            ix * self.w + iw * -self.x + iy * -self.z - iz * -self.y,
            iy * self.w + iw * -self.y + iz * -self.x - ix * -self.z,
            iz * self.w + iw * -self.z + ix * -self.y - iy * -self.x,
        )
    }

    /// Compare two rotations within `epsilon`, treating `q` and `-q` as equal
    pub fn approx_eq(&self, other: &Quat, epsilon: f32) -> bool {
        let same = (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.z - other.z).abs() <= epsilon
            && (self.w - other.w).abs() <= epsilon;
        let flipped = (self.x + other.x).abs() <= epsilon
            && (self.y + other.y).abs() <= epsilon
            && (self.z + other.z).abs() <= epsilon
            && (self.w + other.w).abs() <= epsilon;
        same || flipped
    }
}

impl std::ops::Mul for Quat {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Quat::mul(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(Quat::IDENTITY.rotate_vec3(v).approx_eq(v, 1e-6));
    }

    #[test]
    fn test_from_axis_angle() {
        // 90 degrees around Y takes +X to -Z
        let q = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let rotated = q.rotate_vec3(Vec3::X);
        assert!(rotated.approx_eq(Vec3::new(0.0, 0.0, -1.0), 1e-5), "{rotated:?}");
    }

    #[test]
    fn test_composition_order() {
        // (qy * qx) applies qx first: +Y -> +Z (about X) -> +X (about Y)
        let qx = Quat::from_axis_angle(Vec3::X, FRAC_PI_2);
        let qy = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let composed = qy * qx;
        let v = composed.rotate_vec3(Vec3::Y);
        let stepwise = qy.rotate_vec3(qx.rotate_vec3(Vec3::Y));
        assert!(v.approx_eq(stepwise, 1e-5));
        assert!(v.approx_eq(Vec3::X, 1e-5), "{v:?}");
    }

    #[test]
    fn test_degenerate_axis_is_identity() {
        assert_eq!(Quat::from_axis_angle(Vec3::ZERO, 1.0), Quat::IDENTITY);
    }
}
