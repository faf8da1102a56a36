//! # Matrix Module
//!
//! 3×3 homogeneous matrices for 2D affine (and tolerated projective) maps.
//!
//! Coefficients are exposed in row-major order:
//! ```text
//! | a  c  e |
//! | b  d  f |
//! | g  h  i |
//! ```
//! so that CSS `matrix(a, b, c, d, e, f)` maps to `[a, c, e, b, d, f, 0, 0, 1]`.
//! Storage is a `glam::DMat3`.

use crate::errors::GeometryError;
use crate::types::Point2D;
use glam::{DMat3, DVec2, DVec3};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMatrix {
    m: DMat3,
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineMatrix {
    pub const IDENTITY: Self = Self { m: DMat3::IDENTITY };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Builds a matrix from nine row-major coefficients.
    pub fn from_row_major(m: [f64; 9]) -> Self {
        Self {
            m: DMat3::from_cols_array(&m).transpose(),
        }
    }

    pub fn to_row_major(&self) -> [f64; 9] {
        self.m.transpose().to_cols_array()
    }

    /// The CSS `matrix(a, b, c, d, e, f)` function.
    pub fn from_css(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self::from_row_major([a, c, e, b, d, f, 0.0, 0.0, 1.0])
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self {
            m: DMat3::from_translation(DVec2::new(tx, ty)),
        }
    }

    pub fn scale(s: f64) -> Self {
        Self::scale_xy(s, s)
    }

    pub fn scale_xy(sx: f64, sy: f64) -> Self {
        Self {
            m: DMat3::from_scale(DVec2::new(sx, sy)),
        }
    }

    pub fn rotate(angle_rad: f64) -> Self {
        Self {
            m: DMat3::from_angle(angle_rad),
        }
    }

    /// `self · other`: `other` is applied to a point first, then `self`.
    pub fn multiply(&self, other: &AffineMatrix) -> AffineMatrix {
        Self { m: self.m * other.m }
    }

    pub fn determinant(&self) -> f64 {
        self.m.determinant()
    }

    /// Closed-form inverse.
    ///
    /// Only an exact zero determinant is rejected; near-singular matrices
    /// invert to very large coefficients.
    pub fn invert(&self) -> Result<AffineMatrix, GeometryError> {
        if self.determinant() == 0.0 {
            return Err(GeometryError::SingularMatrix);
        }
        Ok(Self {
            m: self.m.inverse(),
        })
    }

    /// Homogeneous point transform.
    ///
    /// The result keeps the produced weight; when it is neither 0 nor 1 the
    /// caller must normalize with [`Point2D::to_euclidean`].
    pub fn apply_to_point(&self, p: Point2D) -> Point2D {
        let v = self.m.mul_vec3(DVec3::new(p.x, p.y, p.w));
        Point2D::with_weight(v.x, v.y, v.z)
    }

    /// Transforms a direction vector: the linear part only, no translation.
    pub fn transform_vector(&self, v: kurbo::Vec2) -> kurbo::Vec2 {
        let r = self.to_row_major();
        kurbo::Vec2::new(r[0] * v.x + r[1] * v.y, r[3] * v.x + r[4] * v.y)
    }

    /// The translation column `(e, f)`.
    pub fn translation(&self) -> kurbo::Vec2 {
        let r = self.to_row_major();
        kurbo::Vec2::new(r[2], r[5])
    }

    pub fn is_identity(&self) -> bool {
        self.m == DMat3::IDENTITY
    }

    /// Whether the last row is exactly `[0, 0, 1]`.
    pub fn is_affine(&self) -> bool {
        let r = self.to_row_major();
        r[6] == 0.0 && r[7] == 0.0 && r[8] == 1.0
    }

    pub fn abs_diff_eq(&self, other: &AffineMatrix, max_abs_diff: f64) -> bool {
        self.m.abs_diff_eq(other.m, max_abs_diff)
    }

    /// Converts to a `kurbo::Affine`; `None` when the last row is projective.
    pub fn to_affine(&self) -> Option<kurbo::Affine> {
        if !self.is_affine() {
            return None;
        }
        let r = self.to_row_major();
        Some(kurbo::Affine::new([r[0], r[3], r[1], r[4], r[2], r[5]]))
    }
}

impl Mul for AffineMatrix {
    type Output = AffineMatrix;

    fn mul(self, rhs: AffineMatrix) -> AffineMatrix {
        self.multiply(&rhs)
    }
}

impl From<kurbo::Affine> for AffineMatrix {
    fn from(affine: kurbo::Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        Self::from_css(a, b, c, d, e, f)
    }
}
