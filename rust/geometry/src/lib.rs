// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! wallkit geometry
//!
//! Mesh container, box extrusion for panel primitives, instance transforms
//! built with nalgebra, and Wavefront OBJ export.

pub mod error;
pub mod extrusion;
pub mod mesh;
pub mod obj;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};

pub use error::{Error, Result};
pub use extrusion::extrude_rectangle;
pub use mesh::Mesh;
pub use obj::{save_obj, write_obj};
pub use transform::{apply_transform, instance_transform};
