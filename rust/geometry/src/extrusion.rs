// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion of rectangular footprints into closed box meshes

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::transform::apply_transform;
use nalgebra::{Matrix4, Point2, Point3, Vector3};

/// Extrude an axis-aligned rectangle centered on the origin along +Z.
///
/// The footprint spans `size_x` along X and `size_y` along Y; the bottom face
/// lies at z = 0 and the top face at z = `height`. Every face gets its own
/// vertices so normals stay flat: 24 vertices and 12 triangles in total.
pub fn extrude_rectangle(
    size_x: f64,
    size_y: f64,
    height: f64,
    transform: Option<Matrix4<f64>>,
) -> Result<Mesh> {
    for (name, value) in [("size_x", size_x), ("size_y", size_y), ("height", height)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(Error::InvalidDimensions(format!(
                "{} must be a positive finite number, got {}",
                name, value
            )));
        }
    }

    let half_x = size_x / 2.0;
    let half_y = size_y / 2.0;

    // Counter-clockwise when viewed from above
    let outer = [
        Point2::new(-half_x, -half_y),
        Point2::new(half_x, -half_y),
        Point2::new(half_x, half_y),
        Point2::new(-half_x, half_y),
    ];

    let mut mesh = Mesh::with_capacity(24, 36);

    create_cap(&outer, 0.0, Vector3::new(0.0, 0.0, -1.0), &mut mesh);
    create_cap(&outer, height, Vector3::new(0.0, 0.0, 1.0), &mut mesh);
    create_side_walls(&outer, height, &mut mesh);

    if let Some(mat) = transform {
        apply_transform(&mut mesh, &mat);
    }

    Ok(mesh)
}

/// Quad cap at height `z`; the bottom cap is wound the other way so both face outwards
fn create_cap(outer: &[Point2<f64>; 4], z: f64, normal: Vector3<f64>, mesh: &mut Mesh) {
    let base = mesh.vertex_count() as u32;

    for point in outer {
        mesh.add_vertex(Point3::new(point.x, point.y, z), normal);
    }

    if normal.z < 0.0 {
        mesh.add_triangle(base, base + 2, base + 1);
        mesh.add_triangle(base, base + 3, base + 2);
    } else {
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }
}

fn create_side_walls(boundary: &[Point2<f64>], height: f64, mesh: &mut Mesh) {
    for i in 0..boundary.len() {
        let j = (i + 1) % boundary.len();

        let p0 = &boundary[i];
        let p1 = &boundary[j];

        // Outward normal of a counter-clockwise boundary edge
        let edge = Vector3::new(p1.x - p0.x, p1.y - p0.y, 0.0);
        let normal = match Vector3::new(edge.y, -edge.x, 0.0).try_normalize(1e-10) {
            Some(n) => n,
            None => continue,
        };

        let idx = mesh.vertex_count() as u32;
        mesh.add_vertex(Point3::new(p0.x, p0.y, 0.0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, 0.0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, height), normal);
        mesh.add_vertex(Point3::new(p0.x, p0.y, height), normal);

        mesh.add_triangle(idx, idx + 1, idx + 2);
        mesh.add_triangle(idx, idx + 2, idx + 3);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Normal of triangle `t` computed from its winding
    fn winding_normal(mesh: &Mesh, t: usize) -> Vector3<f32> {
        let vertex = |i: u32| {
            let i = i as usize * 3;
            Vector3::new(
                mesh.positions[i],
                mesh.positions[i + 1],
                mesh.positions[i + 2],
            )
        };
        let a = vertex(mesh.indices[t * 3]);
        let b = vertex(mesh.indices[t * 3 + 1]);
        let c = vertex(mesh.indices[t * 3 + 2]);
        (b - a).cross(&(c - a))
    }

    #[test]
    fn test_extrude_rectangle() {
        let mesh = extrude_rectangle(2.0, 0.2, 3.0, None).unwrap();

        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);

        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.x, -1.0);
        assert_relative_eq!(max.x, 1.0);
        assert_relative_eq!(min.y, -0.1);
        assert_relative_eq!(max.y, 0.1);
        assert_relative_eq!(min.z, 0.0);
        assert_relative_eq!(max.z, 3.0);
    }

    #[test]
    fn test_winding_matches_normals() {
        let mesh = extrude_rectangle(2.0, 1.0, 1.0, None).unwrap();

        for t in 0..mesh.triangle_count() {
            let stored = {
                let i = mesh.indices[t * 3] as usize * 3;
                Vector3::new(mesh.normals[i], mesh.normals[i + 1], mesh.normals[i + 2])
            };
            assert!(
                winding_normal(&mesh, t).dot(&stored) > 0.0,
                "triangle {} is wound against its normal",
                t
            );
        }
    }

    #[test]
    fn test_extrude_with_transform() {
        let transform = Matrix4::new_translation(&Vector3::new(10.0, 20.0, 30.0));
        let mesh = extrude_rectangle(2.0, 1.0, 4.0, Some(transform)).unwrap();

        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.x, 9.0);
        assert_relative_eq!(max.x, 11.0);
        assert_relative_eq!(min.y, 19.5);
        assert_relative_eq!(max.y, 20.5);
        assert_relative_eq!(min.z, 30.0);
        assert_relative_eq!(max.z, 34.0);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(extrude_rectangle(0.0, 1.0, 1.0, None).is_err());
        assert!(extrude_rectangle(1.0, -1.0, 1.0, None).is_err());
        assert!(extrude_rectangle(1.0, 1.0, f64::NAN, None).is_err());
    }
}
