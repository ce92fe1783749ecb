/// Frustum: the world-space view pyramid used by overlap queries.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing unit normal
/// - D is the signed distance
/// - A point P is inside the pyramid if dot(plane, P_homogeneous) >= 0 for all planes
///
/// The pyramid is the unit view pyramid (see `primitives::view_pyramid`)
/// placed by a scaled transform: four side planes meet at the apex, the
/// fifth plane closes the base at the capture distance.

use glam::{Vec3, Vec4};
use crate::math::Transform;
use super::aabb::AABB;
use super::primitives::{PYRAMID_DEPTH, PYRAMID_HALF_EXTENT};

/// Result of a 3-way frustum/AABB classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// AABB is entirely outside the pyramid
    Outside,
    /// AABB is entirely inside the pyramid
    Inside,
    /// AABB partially overlaps the pyramid
    Partial,
}

/// Index of the base plane in `planes` (the four side planes come first)
pub const PLANE_BASE: usize = 4;

/// Index of the apex in `corners`
pub const CORNER_APEX: usize = 0;

#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// bottom, right, top, left, base
    pub planes: [Vec4; 5],
    /// apex followed by the four base corners
    pub corners: [Vec3; 5],
}

impl Frustum {
    /// Place the unit view pyramid with a (scaled) world transform
    pub fn from_transform(transform: &Transform) -> Self {
        let d = PYRAMID_DEPTH;
        let h = PYRAMID_HALF_EXTENT;
        let corners = [
            transform.transform_point(Vec3::ZERO),
            transform.transform_point(Vec3::new(d, -h, -h)),
            transform.transform_point(Vec3::new(d, h, -h)),
            transform.transform_point(Vec3::new(d, h, h)),
            transform.transform_point(Vec3::new(d, -h, h)),
        ];
        let centroid = corners.iter().copied().sum::<Vec3>() / 5.0;
        let apex = corners[CORNER_APEX];

        let faces = [
            [apex, corners[1], corners[2]],
            [apex, corners[2], corners[3]],
            [apex, corners[3], corners[4]],
            [apex, corners[4], corners[1]],
            [corners[1], corners[2], corners[3]],
        ];

        let planes = faces.map(|[a, b, c]| plane_facing(a, b, c, centroid));

        Self { planes, corners }
    }

    pub fn apex(&self) -> Vec3 {
        self.corners[CORNER_APEX]
    }

    pub fn bounds(&self) -> AABB {
        let mut aabb = AABB { min: self.corners[0], max: self.corners[0] };
        for c in &self.corners[1..] {
            aabb.min = aabb.min.min(*c);
            aabb.max = aabb.max.max(*c);
        }
        aabb
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(point) + plane.w >= 0.0)
    }

    /// Test if an AABB intersects this pyramid.
    ///
    /// Uses the "positive vertex" test: for each plane, find the AABB corner
    /// most in the direction of the plane normal. If that corner is outside,
    /// the AABB is fully outside.
    ///
    /// May return false positives (conservative), never false negatives.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        for plane in &self.planes {
            let normal = plane.truncate();

            let p_vertex = Vec3::new(
                if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );

            if normal.dot(p_vertex) + plane.w < 0.0 {
                return false;
            }
        }

        true
    }

    /// Classify an AABB against the pyramid (3-way test).
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        let mut all_inside = true;

        for plane in &self.planes {
            let normal = plane.truncate();

            let p_vertex = Vec3::new(
                if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );

            if normal.dot(p_vertex) + plane.w < 0.0 {
                return FrustumTest::Outside;
            }

            let n_vertex = Vec3::new(
                if normal.x >= 0.0 { aabb.min.x } else { aabb.max.x },
                if normal.y >= 0.0 { aabb.min.y } else { aabb.max.y },
                if normal.z >= 0.0 { aabb.min.z } else { aabb.max.z },
            );

            if normal.dot(n_vertex) + plane.w < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }

    /// Exact AABB/pyramid overlap (separating axis theorem).
    ///
    /// Candidate axes: the pyramid face normals, the three box axes and the
    /// cross products of box axes with every pyramid edge. Touching counts
    /// as overlapping.
    pub fn overlaps_aabb(&self, aabb: &AABB) -> bool {
        match self.classify_aabb(aabb) {
            FrustumTest::Outside => return false,
            FrustumTest::Inside => return true,
            FrustumTest::Partial => {}
        }

        let apex = self.apex();
        let base = &self.corners[1..];
        let edges = [
            base[0] - apex,
            base[1] - apex,
            base[2] - apex,
            base[3] - apex,
            base[1] - base[0],
            base[2] - base[1],
        ];

        let mut axes: Vec<Vec3> = Vec::with_capacity(26);
        axes.extend(self.planes.iter().map(|p| p.truncate()));
        axes.extend([Vec3::X, Vec3::Y, Vec3::Z]);
        for box_axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            for edge in &edges {
                axes.push(box_axis.cross(*edge));
            }
        }

        let center = aabb.center();
        let half = aabb.half_extents();

        for axis in axes {
            if axis.length_squared() <= f32::EPSILON {
                continue;
            }
            let box_center = axis.dot(center);
            let box_radius = half.dot(axis.abs());

            let (mut lo, mut hi) = (f32::INFINITY, f32::NEG_INFINITY);
            for c in &self.corners {
                let d = axis.dot(*c);
                lo = lo.min(d);
                hi = hi.max(d);
            }

            if box_center + box_radius < lo || box_center - box_radius > hi {
                return false;
            }
        }

        true
    }
}

/// Plane through (a, b, c) with its unit normal turned toward `inside`
fn plane_facing(a: Vec3, b: Vec3, c: Vec3, inside: Vec3) -> Vec4 {
    let mut normal = (b - a).cross(c - a).normalize_or_zero();
    if normal.dot(inside - a) < 0.0 {
        normal = -normal;
    }
    normal.extend(-normal.dot(a))
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
