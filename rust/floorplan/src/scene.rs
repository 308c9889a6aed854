// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene assembly from panel placements

use crate::error::Result;
use crate::types::{FloorLayout, LengthAxis, PanelDimensions, PanelPlacement};
use nalgebra::Vector3;
use std::path::Path;
use tracing::debug;
use wallkit_geometry::{apply_transform, extrude_rectangle, instance_transform, save_obj, Mesh};

/// Object name written to exported model files
pub const OBJECT_NAME: &str = "walls";

/// Sink for panel instances
///
/// Implementations instantiate the panel primitive once per placement and can
/// persist the combined model.
pub trait SceneBuilder {
    /// Add one panel instance with the given transform
    fn instantiate(&mut self, placement: &PanelPlacement) -> Result<()>;

    /// Write the combined model to `path`
    fn export(&self, path: &Path) -> Result<()>;
}

/// Feed every placement of `layout` into `scene`, in order
pub fn build_scene<S: SceneBuilder + ?Sized>(layout: &FloorLayout, scene: &mut S) -> Result<()> {
    for placement in &layout.placements {
        scene.instantiate(placement)?;
    }
    debug!(panels = layout.panel_count(), "Instantiated panels");
    Ok(())
}

/// Joins every panel instance into one triangle mesh
///
/// The primitive is a box sized by [`PanelDimensions`], centered on the
/// origin in X and Y with its base at z = 0.
#[derive(Debug, Clone)]
pub struct MeshScene {
    primitive: Mesh,
    mesh: Mesh,
    panels: usize,
}

impl MeshScene {
    pub fn new(panel: &PanelDimensions) -> Result<Self> {
        let (size_x, size_y) = panel.footprint();
        let primitive = extrude_rectangle(size_x, size_y, panel.height, None)?;
        Ok(Self {
            primitive,
            mesh: Mesh::new(),
            panels: 0,
        })
    }

    /// Combined mesh of all instances so far
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn panel_count(&self) -> usize {
        self.panels
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }
}

impl SceneBuilder for MeshScene {
    fn instantiate(&mut self, placement: &PanelPlacement) -> Result<()> {
        let scale = match placement.length_axis {
            LengthAxis::X => Vector3::new(placement.scale, 1.0, 1.0),
            LengthAxis::Y => Vector3::new(1.0, placement.scale, 1.0),
        };
        let transform = instance_transform(
            &placement.position.coords,
            placement.rotation.yaw_radians(),
            &scale,
        );

        let mut instance = self.primitive.clone();
        apply_transform(&mut instance, &transform);
        self.mesh.merge(&instance);
        self.panels += 1;
        Ok(())
    }

    fn export(&self, path: &Path) -> Result<()> {
        save_obj(path, &self.mesh, OBJECT_NAME)?;
        debug!(
            path = %path.display(),
            vertices = self.mesh.vertex_count(),
            triangles = self.mesh.triangle_count(),
            "Exported scene"
        );
        Ok(())
    }
}
