// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront OBJ export
//!
//! Meshes are built Z-up. OBJ consumers expect Y-up, so positions and normals
//! are rotated on the way out:
//!
//! - OBJ X =  source X
//! - OBJ Y =  source Z (height)
//! - OBJ Z = -source Y
//!
//! The mapping is a proper rotation, so triangle winding is kept as is.

use crate::error::Result;
use crate::mesh::Mesh;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write `mesh` as a single OBJ object called `name`
pub fn write_obj<W: Write>(out: &mut W, mesh: &Mesh, name: &str) -> io::Result<()> {
    writeln!(out, "# Generated by wallkit")?;
    writeln!(
        out,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;
    writeln!(out, "# Coordinate system: Y-up (OBJ convention)")?;
    writeln!(out, "o {}", name)?;

    for v in mesh.positions.chunks_exact(3) {
        writeln!(out, "v {:.6} {:.6} {:.6}", v[0], v[2], -v[1])?;
    }

    for n in mesh.normals.chunks_exact(3) {
        writeln!(out, "vn {:.6} {:.6} {:.6}", n[0], n[2], -n[1])?;
    }

    // OBJ indices are 1-based; normals share the vertex index
    for t in mesh.indices.chunks_exact(3) {
        let (i0, i1, i2) = (t[0] + 1, t[1] + 1, t[2] + 1);
        writeln!(out, "f {}//{} {}//{} {}//{}", i0, i0, i1, i1, i2, i2)?;
    }

    Ok(())
}

/// Create (or truncate) `path` and write `mesh` into it
pub fn save_obj(path: &Path, mesh: &Mesh, name: &str) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_obj(&mut writer, mesh, name)?;
    writer.flush()?;
    Ok(())
}
