//! Primitive solid builders
//!
//! The two solids every scanned entity is approximated with: a rectangular
//! prism with optionally rounded vertical edges, and a Y-axis aligned
//! cylinder. Both are centered at the origin; placements position them.
//!
//! Builders never fail: negative sizes clamp to zero (degenerate but valid)
//! and the corner radius clamps to half the smaller footprint extent.

use crate::mesh::Mesh;
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Arc samples per rounded corner
const CORNER_SEGMENTS: u32 = 4;

/// Radial samples around a cylinder
const RADIAL_SEGMENTS: u32 = 24;

/// Create a rounded prism with the given full extents and edge radius
pub fn rounded_box(width: f32, height: f32, depth: f32, corner_radius: f32) -> Primitive {
    let width = width.max(0.0);
    let height = height.max(0.0);
    let depth = depth.max(0.0);
    let corner_radius = corner_radius.max(0.0).min(width.min(depth) * 0.5);
    Primitive::RoundedBox {
        width,
        height,
        depth,
        corner_radius,
    }
}

/// Create a Y-axis aligned cylinder with the given radius and height
pub fn cylinder(radius: f32, height: f32) -> Primitive {
    Primitive::Cylinder {
        radius: radius.max(0.0),
        height: height.max(0.0),
    }
}

/// A single geometric primitive, origin-centered
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    RoundedBox {
        width: f32,
        height: f32,
        depth: f32,
        corner_radius: f32,
    },
    Cylinder {
        radius: f32,
        height: f32,
    },
}

impl Primitive {
    /// Full axis-aligned extents (width, height, depth)
    pub fn bounding_size(&self) -> Vec3 {
        match *self {
            Self::RoundedBox {
                width,
                height,
                depth,
                ..
            } => Vec3::new(width, height, depth),
            Self::Cylinder { radius, height } => Vec3::new(radius * 2.0, height, radius * 2.0),
        }
    }

    /// Tessellate to a triangle mesh
    ///
    /// Deterministic: fixed segment counts, no randomness.
    pub fn to_mesh(&self) -> Mesh {
        match *self {
            Self::RoundedBox {
                width,
                height,
                depth,
                corner_radius,
            } => {
                let profile = rounded_rect_profile(width, depth, corner_radius);
                extrude_flat(&profile, width, height, depth)
            }
            Self::Cylinder { radius, height } => cylinder_mesh(radius, height),
        }
    }
}

/// Footprint outline of a rounded box in the XZ plane
///
/// Points run clockwise in XZ so the extruded sides and +Y cap wind
/// counter-clockwise when seen from outside.
fn rounded_rect_profile(width: f32, depth: f32, corner_radius: f32) -> Vec<Vec2> {
    let hw = width * 0.5;
    let hd = depth * 0.5;
    let r = corner_radius;

    let mut points = Vec::new();
    if r <= f32::EPSILON {
        points.extend([
            Vec2::new(hw, hd),
            Vec2::new(hw, -hd),
            Vec2::new(-hw, -hd),
            Vec2::new(-hw, hd),
        ]);
    } else {
        // Corner arc centers, visited (+x,+z) -> (+x,-z) -> (-x,-z) -> (-x,+z)
        let centers = [
            Vec2::new(hw - r, hd - r),
            Vec2::new(hw - r, -(hd - r)),
            Vec2::new(-(hw - r), -(hd - r)),
            Vec2::new(-(hw - r), hd - r),
        ];
        for (i, center) in centers.iter().enumerate() {
            let start = FRAC_PI_2 - i as f32 * FRAC_PI_2;
            for s in 0..=CORNER_SEGMENTS {
                let theta = start - FRAC_PI_2 * s as f32 / CORNER_SEGMENTS as f32;
                points.push(*center + r * Vec2::new(theta.cos(), theta.sin()));
            }
        }
    }

    points
}

/// Extrude a closed XZ loop along Y with flat side shading and fan caps
fn extrude_flat(profile: &[Vec2], width: f32, height: f32, depth: f32) -> Mesh {
    let mut mesh = Mesh::new();
    let half_h = height * 0.5;

    let perimeter: f32 = (0..profile.len())
        .map(|i| profile[i].distance(profile[(i + 1) % profile.len()]))
        .sum();
    let perimeter = perimeter.max(f32::EPSILON);

    let mut walked = 0.0;
    for i in 0..profile.len() {
        let p = profile[i];
        let q = profile[(i + 1) % profile.len()];
        let d = q - p;
        let len = d.length();
        if len < 1e-9 {
            continue;
        }
        // Outward normal of the clockwise-in-XZ loop
        let n2 = Vec2::new(-d.y, d.x) / len;
        let n = Vec3::new(n2.x, 0.0, n2.y);

        let u0 = walked / perimeter;
        walked += len;
        let u1 = walked / perimeter;

        let bp = Vec3::new(p.x, -half_h, p.y);
        let bq = Vec3::new(q.x, -half_h, q.y);
        let tp = Vec3::new(p.x, half_h, p.y);
        let tq = Vec3::new(q.x, half_h, q.y);

        mesh.push_triangle(
            [bp, bq, tq],
            n,
            [Vec2::new(u0, 0.0), Vec2::new(u1, 0.0), Vec2::new(u1, 1.0)],
        );
        mesh.push_triangle(
            [bp, tq, tp],
            n,
            [Vec2::new(u0, 0.0), Vec2::new(u1, 1.0), Vec2::new(u0, 1.0)],
        );
    }

    add_caps(&mut mesh, profile, half_h, width, depth);
    mesh
}

/// Triangle-fan top and bottom caps for a closed XZ loop
fn add_caps(mesh: &mut Mesh, profile: &[Vec2], half_h: f32, width: f32, depth: f32) {
    let uv_of = |p: Vec2| {
        Vec2::new(
            p.x / width.max(f32::EPSILON) + 0.5,
            p.y / depth.max(f32::EPSILON) + 0.5,
        )
    };
    let center_uv = Vec2::splat(0.5);

    for i in 0..profile.len() {
        let p = profile[i];
        let q = profile[(i + 1) % profile.len()];
        let pp = Vec3::new(p.x, half_h, p.y);
        let qq = Vec3::new(q.x, half_h, q.y);

        // Top cap faces +Y, bottom faces -Y
        mesh.push_triangle(
            [Vec3::new(0.0, half_h, 0.0), pp, qq],
            Vec3::Y,
            [center_uv, uv_of(p), uv_of(q)],
        );
        let bp = Vec3::new(p.x, -half_h, p.y);
        let bq = Vec3::new(q.x, -half_h, q.y);
        mesh.push_triangle(
            [Vec3::new(0.0, -half_h, 0.0), bq, bp],
            Vec3::NEG_Y,
            [center_uv, uv_of(q), uv_of(p)],
        );
    }
}

/// Lathe a cylinder with smooth side normals and fan caps
fn cylinder_mesh(radius: f32, height: f32) -> Mesh {
    let mut mesh = Mesh::new();
    let half_h = height * 0.5;

    let ring: Vec<Vec2> = (0..RADIAL_SEGMENTS)
        .map(|k| {
            let theta = -(k as f32) * TAU / RADIAL_SEGMENTS as f32;
            radius * Vec2::new(theta.cos(), theta.sin())
        })
        .collect();

    // Side: two shared rings with radial normals
    let base = mesh.vertices.len() as u32;
    for (k, p) in ring.iter().enumerate() {
        let n = if radius > 0.0 { *p / radius } else { Vec2::X };
        let normal = Vec3::new(n.x, 0.0, n.y);
        let u = k as f32 / RADIAL_SEGMENTS as f32;
        mesh.vertices.push(crate::mesh::Vertex::new(
            Vec3::new(p.x, -half_h, p.y),
            normal,
            Vec2::new(u, 0.0),
        ));
        mesh.vertices.push(crate::mesh::Vertex::new(
            Vec3::new(p.x, half_h, p.y),
            normal,
            Vec2::new(u, 1.0),
        ));
    }
    for k in 0..RADIAL_SEGMENTS {
        let next = (k + 1) % RADIAL_SEGMENTS;
        let (b0, t0) = (base + 2 * k, base + 2 * k + 1);
        let (b1, t1) = (base + 2 * next, base + 2 * next + 1);
        mesh.indices.extend([b0, b1, t1]);
        mesh.indices.extend([b0, t1, t0]);
    }

    add_caps(&mut mesh, &ring, half_h, radius * 2.0, radius * 2.0);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn negative_inputs_clamp_to_zero() {
        let p = rounded_box(-1.0, 2.0, -3.0, 0.1);
        assert_eq!(p.bounding_size(), Vec3::new(0.0, 2.0, 0.0));

        let c = cylinder(-0.5, -1.0);
        assert_eq!(c.bounding_size(), Vec3::ZERO);
    }

    #[test]
    fn corner_radius_clamps_to_half_footprint() {
        let p = rounded_box(1.0, 1.0, 0.4, 10.0);
        match p {
            Primitive::RoundedBox { corner_radius, .. } => {
                assert_relative_eq!(corner_radius, 0.2);
            }
            Primitive::Cylinder { .. } => panic!("expected a box"),
        }
    }

    #[test]
    fn plain_box_mesh_fills_its_bounds() {
        let mesh = rounded_box(2.0, 1.0, 0.5, 0.0).to_mesh();
        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.x, -1.0);
        assert_relative_eq!(max.x, 1.0);
        assert_relative_eq!(min.y, -0.5);
        assert_relative_eq!(max.y, 0.5);
        assert_relative_eq!(min.z, -0.25);
        assert_relative_eq!(max.z, 0.25);
    }

    #[test]
    fn rounded_box_mesh_stays_inside_bounds() {
        let prim = rounded_box(1.0, 1.0, 1.0, 0.2);
        let mesh = prim.to_mesh();
        let (min, max) = mesh.bounds();
        let half = prim.bounding_size() * 0.5;
        assert!(min.cmpge(-half - Vec3::splat(1e-5)).all());
        assert!(max.cmple(half + Vec3::splat(1e-5)).all());
        // Corners are actually cut back: no vertex reaches both extremes
        for v in &mesh.vertices {
            assert!(
                v.position[0].abs() < 0.45 || v.position[2].abs() < 0.45,
                "square corner survived at {:?}",
                v.position
            );
        }
        assert!(mesh.triangle_count() > 12);
    }

    #[test]
    fn cylinder_mesh_radius_and_height() {
        let mesh = cylinder(0.5, 2.0).to_mesh();
        let (min, max) = mesh.bounds();
        assert_relative_eq!(max.y, 1.0);
        assert_relative_eq!(min.y, -1.0);
        assert_relative_eq!(max.x, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn side_normals_are_unit_length() {
        for prim in [rounded_box(1.0, 2.0, 3.0, 0.1), cylinder(0.7, 1.2)] {
            let mesh = prim.to_mesh();
            for v in &mesh.vertices {
                let n = Vec3::from_array(v.normal);
                assert_relative_eq!(n.length(), 1.0, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn tessellation_is_deterministic() {
        let a = rounded_box(1.0, 1.0, 1.0, 0.1).to_mesh();
        let b = rounded_box(1.0, 1.0, 1.0, 0.1).to_mesh();
        assert_eq!(a.indices, b.indices);
        assert_eq!(a.vertices.len(), b.vertices.len());
        for (va, vb) in a.vertices.iter().zip(&b.vertices) {
            assert_eq!(va.position, vb.position);
        }
    }
}
