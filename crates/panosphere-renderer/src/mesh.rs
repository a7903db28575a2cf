//! Sphere Mesh Generation
//!
//! Builds the UV sphere an equirectangular video frame is mapped onto from
//! the inside: latitude/longitude rings at a fixed angular step, one vertex
//! per ring intersection, triangles over each quad cell with single-triangle
//! caps at the poles.

use crate::{RendererError, RendererResult};

/// Largest vertex count addressable by the 16-bit index buffer.
const MAX_VERTICES: usize = 1 << 16;

/// Static sphere geometry in upload layout: tightly packed positions
/// (xyz triples), texture coordinates (uv pairs), and a triangle list of
/// 16-bit indices. Vertex order is generation order and matches the index
/// buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<f32>,
    uvs: Vec<f32>,
    indices: Vec<u16>,
}

impl Mesh {
    /// Generate the sphere. Deterministic pure function of its parameters.
    ///
    /// Latitude sweeps [-90, 90] and longitude [0, 360], both inclusive in
    /// `step`-degree increments. The shared seam column at 360° carries
    /// `u = 1.0` against `u = 0.0` at 0°, which is what makes the
    /// equirectangular frame wrap cleanly.
    ///
    /// Fails fast on non-positive `radius` or `step`, or when the vertex
    /// count would overflow the 16-bit index range.
    pub fn generate(radius: f32, step: f32) -> RendererResult<Self> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(RendererError::InvalidRadius(radius));
        }
        if !(step > 0.0) || !step.is_finite() {
            return Err(RendererError::InvalidStep(step));
        }

        // Inclusive sweeps: one trailing sample past the last full step.
        let cols = (360.0 / step).floor() as usize + 1;
        let rows = (180.0 / step).floor() as usize + 1;
        let vertex_count = cols * rows;
        if vertex_count > MAX_VERTICES {
            return Err(RendererError::VertexCountOverflow(vertex_count));
        }

        let mut positions = Vec::with_capacity(vertex_count * 3);
        let mut uvs = Vec::with_capacity(vertex_count * 2);
        for row in 0..rows {
            let lat = -90.0 + row as f32 * step;
            let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
            for col in 0..cols {
                let lon = col as f32 * step;
                let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
                positions.push(radius * cos_lat * cos_lon);
                positions.push(radius * sin_lat);
                positions.push(radius * cos_lat * sin_lon);
                uvs.push(lon / 360.0);
                uvs.push(lat / 180.0 + 0.5);
            }
        }

        let lon_bands = cols - 1;
        let lat_bands = rows - 1;
        let mut indices = Vec::with_capacity(lon_bands * lat_bands * 6);
        for i in 0..lon_bands {
            for j in 0..lat_bands {
                let ring = j * cols + i;
                let next_ring = (j + 1) * cols + i;
                if j == 0 {
                    // pole band: the ring collapses toward the pole, one
                    // triangle per cell
                    indices.extend([ring as u16, (next_ring + 1) as u16, next_ring as u16]);
                } else if j + 1 == lat_bands {
                    // opposite pole, opposite winding; both matter for
                    // back-face culling inside the sphere
                    indices.extend([ring as u16, (ring + 1) as u16, (next_ring + 1) as u16]);
                } else {
                    indices.extend([ring as u16, (ring + 1) as u16, (next_ring + 1) as u16]);
                    indices.extend([ring as u16, (next_ring + 1) as u16, next_ring as u16]);
                }
            }
        }

        Ok(Self {
            positions,
            uvs,
            indices,
        })
    }

    /// Vertex positions, xyz per vertex.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Texture coordinates, uv per vertex, each in [0, 1].
    pub fn uvs(&self) -> &[f32] {
        &self.uvs
    }

    /// Triangle list, three indices per triangle.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Lazily generated mesh cache.
///
/// The host-side buffers are only needed until GPU upload; [`clear`] drops
/// them and the next [`get`] regenerates. A failed generation leaves any
/// previously cached mesh untouched.
///
/// [`clear`]: Self::clear
/// [`get`]: Self::get
#[derive(Debug)]
pub struct MeshCache {
    radius: f32,
    step: f32,
    cached: Option<Mesh>,
}

impl MeshCache {
    /// Parameters are validated on first [`get`](Self::get), not here, so a
    /// cache can be constructed before the render thread exists.
    pub fn new(radius: f32, step: f32) -> Self {
        Self {
            radius,
            step,
            cached: None,
        }
    }

    /// The cached mesh, generated on first access and after [`clear`].
    ///
    /// [`clear`]: Self::clear
    pub fn get(&mut self) -> RendererResult<&Mesh> {
        match &mut self.cached {
            Some(mesh) => Ok(mesh),
            slot => {
                let mesh = Mesh::generate(self.radius, self.step)?;
                Ok(slot.insert(mesh))
            }
        }
    }

    /// Drop the host-side buffers, typically right after GPU upload when the
    /// GPU copy becomes the sole reference.
    pub fn clear(&mut self) {
        self.cached = None;
    }

    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }
}

impl Default for MeshCache {
    fn default() -> Self {
        let geometry = crate::session::GeometryConfig::default();
        Self::new(geometry.radius, geometry.step_degrees)
    }
}
