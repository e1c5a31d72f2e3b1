//! Recovering how an atlas sprite was packed.
//!
//! Atlases store the same sprite rotated by quarter turns and/or mirrored.
//! The sprite is cut out as the UV bounding box, turned upright, and placed
//! with an affine matrix fitted from its oriented corners onto the shape's
//! XY corners. Of the eight candidate orientations the one leaving the least
//! rotation/skew and no flip in the matrix wins.

use crate::types::source::{UvPoint, XyPoint};
use crate::types::xfl::Matrix;

const SCORE_EPSILON: f64 = 1e-6;
const DET_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Orientation {
    /// Clockwise quarter turns applied to the cropped sprite.
    pub quarter_turns: u8,
    /// Horizontal mirror, applied after the rotation.
    pub mirror: bool,
}

impl Orientation {
    /// Candidates in preference order: unmirrored first, then by rotation.
    pub const CANDIDATES: [Orientation; 8] = [
        Orientation::new(0, false),
        Orientation::new(1, false),
        Orientation::new(2, false),
        Orientation::new(3, false),
        Orientation::new(0, true),
        Orientation::new(1, true),
        Orientation::new(2, true),
        Orientation::new(3, true),
    ];

    pub const fn new(quarter_turns: u8, mirror: bool) -> Self {
        Self {
            quarter_turns,
            mirror,
        }
    }

    pub fn degrees(self) -> u32 {
        u32::from(self.quarter_turns % 4) * 90
    }

    /// Map a point of a `width` x `height` crop into the oriented sprite.
    fn apply(self, (x, y): (f64, f64), width: f64, height: f64) -> (f64, f64) {
        let (rx, ry, rotated_width) = match self.quarter_turns % 4 {
            1 => (height - y, x, height),
            2 => (width - x, height - y, width),
            3 => (y, width - x, height),
            _ => (x, y, width),
        };
        if self.mirror {
            (rotated_width - rx, ry)
        } else {
            (rx, ry)
        }
    }
}

/// Axis-aligned UV bounding box of a quad, in texture pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SpriteRect {
    pub fn from_uv(uv: &[UvPoint]) -> Self {
        let min_u = uv.iter().map(|p| p.u).min().unwrap_or(0);
        let min_v = uv.iter().map(|p| p.v).min().unwrap_or(0);
        let max_u = uv.iter().map(|p| p.u).max().unwrap_or(0);
        let max_v = uv.iter().map(|p| p.v).max().unwrap_or(0);
        Self {
            x: u32::from(min_u),
            y: u32::from(min_v),
            width: u32::from(max_u - min_u).max(1),
            height: u32::from(max_v - min_v).max(1),
        }
    }
}

/// Where and how a UV quad's sprite sits: crop rect, orientation and the
/// quad's corners in oriented-sprite pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub rect: SpriteRect,
    pub orientation: Orientation,
    pub corners: Vec<(f64, f64)>,
}

impl Placement {
    /// Best-fit orientation and matrix for the first occurrence of a quad.
    pub fn fit(uv: &[UvPoint], xy: &[XyPoint]) -> (Placement, Matrix) {
        let rect = SpriteRect::from_uv(uv);
        let crop_corners: Vec<(f64, f64)> = uv
            .iter()
            .map(|p| {
                (
                    f64::from(u32::from(p.u) - rect.x),
                    f64::from(u32::from(p.v) - rect.y),
                )
            })
            .collect();

        let mut best: Option<(f64, Placement, Matrix)> = None;
        for orientation in Orientation::CANDIDATES {
            let corners: Vec<(f64, f64)> = crop_corners
                .iter()
                .map(|&p| orientation.apply(p, f64::from(rect.width), f64::from(rect.height)))
                .collect();
            let matrix = fit_affine(&corners, xy);
            let score = orientation_score(&matrix);

            let better = match &best {
                Some((best_score, _, _)) => score < *best_score - SCORE_EPSILON,
                None => true,
            };
            if better {
                best = Some((
                    score,
                    Placement {
                        rect,
                        orientation,
                        corners,
                    },
                    matrix,
                ));
            }
        }

        let (_, placement, matrix) = best.unwrap_or_else(|| {
            let placement = Placement {
                rect,
                orientation: Orientation::default(),
                corners: crop_corners.clone(),
            };
            let matrix = fit_affine(&placement.corners, xy);
            (0.0, placement, matrix)
        });
        (placement, matrix)
    }

    /// Matrix for a repeat occurrence: same sprite, new XY corners.
    pub fn matrix_for(&self, xy: &[XyPoint]) -> Matrix {
        fit_affine(&self.corners, xy)
    }
}

/// Rotation/skew plus any flip left in the matrix; 0 for a pure scale.
fn orientation_score(m: &Matrix) -> f64 {
    m.b.abs() + m.c.abs() + (-m.a).max(0.0) + (-m.d).max(0.0)
}

/// Least-squares affine map from `from` onto `to`. Degenerate (collinear)
/// inputs fall back to a pure translation between the centroids.
pub fn fit_affine(from: &[(f64, f64)], to: &[XyPoint]) -> Matrix {
    let n = from.len().min(to.len());
    if n == 0 {
        return Matrix::IDENTITY;
    }
    let count = n as f64;

    let (mut px, mut py, mut qx, mut qy) = (0.0, 0.0, 0.0, 0.0);
    for i in 0..n {
        px += from[i].0;
        py += from[i].1;
        qx += f64::from(to[i].x);
        qy += f64::from(to[i].y);
    }
    let (px, py, qx, qy) = (px / count, py / count, qx / count, qy / count);

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    let (mut qxpx, mut qxpy, mut qypx, mut qypy) = (0.0, 0.0, 0.0, 0.0);
    for i in 0..n {
        let dx = from[i].0 - px;
        let dy = from[i].1 - py;
        let ex = f64::from(to[i].x) - qx;
        let ey = f64::from(to[i].y) - qy;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
        qxpx += ex * dx;
        qxpy += ex * dy;
        qypx += ey * dx;
        qypy += ey * dy;
    }

    let det = sxx * syy - sxy * sxy;
    if det.abs() < DET_EPSILON {
        return Matrix::new(1.0, 0.0, 0.0, 1.0, qx - px, qy - py);
    }

    let a = (qxpx * syy - qxpy * sxy) / det;
    let c = (qxpy * sxx - qxpx * sxy) / det;
    let b = (qypx * syy - qypy * sxy) / det;
    let d = (qypy * sxx - qypx * sxy) / det;
    Matrix::new(a, b, c, d, qx - a * px - c * py, qy - b * px - d * py)
}

#[cfg(test)]
#[path = "tests/placement_tests.rs"]
mod tests;
