//! Unit plane template shared by every media plane.

/// A `1 x 1` plane in the XY plane centred on the origin, tessellated into
/// `segments x segments` quads. The template is never mutated; per-entity
/// geometry is derived from it with [`PlaneGeometry::scale_into`].
#[derive(Clone, Debug)]
pub struct PlaneGeometry {
    segments: u32,
    positions: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u16>,
}

impl PlaneGeometry {
    pub fn new(segments: u32) -> Self {
        let segments = segments.clamp(1, 180);
        let n = segments as f32;
        let row = segments + 1;
        let mut positions = Vec::with_capacity((row * row) as usize);
        let mut uvs = Vec::with_capacity((row * row) as usize);
        // Rows run top to bottom so v = 0 is the top of the image.
        for iy in 0..row {
            for ix in 0..row {
                let u = ix as f32 / n;
                let v = iy as f32 / n;
                positions.push([u - 0.5, 0.5 - v, 0.0]);
                uvs.push([u, v]);
            }
        }
        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
        for iy in 0..segments {
            for ix in 0..segments {
                let a = (iy * row + ix) as u16;
                let b = a + 1;
                let c = a + row as u16;
                let d = c + 1;
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }
        Self {
            segments,
            positions,
            uvs,
            indices,
        }
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }
    pub fn template(&self) -> &[[f32; 3]] {
        &self.positions
    }
    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Write the template scaled to `width x height` into `out`.
    pub fn scale_into(&self, width: f32, height: f32, out: &mut Vec<[f32; 3]>) {
        out.clear();
        out.extend(
            self.positions
                .iter()
                .map(|p| [p[0] * width, p[1] * height, p[2]]),
        );
    }
}
