// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Instance transforms for placing copies of a primitive mesh

use crate::mesh::Mesh;
use nalgebra::{Matrix4, Point3, Vector3};

/// Build the matrix `T * Rz(yaw) * S`: scale in the primitive's local frame,
/// then turn about the vertical axis, then move to `translation`.
pub fn instance_transform(
    translation: &Vector3<f64>,
    yaw: f64,
    scale: &Vector3<f64>,
) -> Matrix4<f64> {
    let rotation = Matrix4::from_axis_angle(&Vector3::z_axis(), yaw);
    Matrix4::new_translation(translation) * rotation * Matrix4::new_nonuniform_scaling(scale)
}

/// Transform positions and normals of `mesh` in place
pub fn apply_transform(mesh: &mut Mesh, transform: &Matrix4<f64>) {
    mesh.positions.chunks_exact_mut(3).for_each(|chunk| {
        let point = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = transform.transform_point(&point);
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });

    // Normals take the inverse transpose so non-uniform scaling keeps them perpendicular
    let normal_matrix = transform.try_inverse().unwrap_or(*transform).transpose();

    mesh.normals.chunks_exact_mut(3).for_each(|chunk| {
        let normal = Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = (normal_matrix * normal.to_homogeneous())
            .xyz()
            .try_normalize(1e-12)
            .unwrap_or(normal);
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });
}
