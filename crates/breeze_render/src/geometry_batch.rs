use wgpu::{Buffer, BufferDescriptor, BufferUsages, Device, IndexFormat, Queue, RenderPass};

use crate::vertex::Vertex;

/// A batch of geometry (vertices + indices) that can be drawn in a single GPU call
///
/// Tracks CPU vertex/index data, lazily uploads GPU buffers and prevents overflowing `u16` indices
pub struct GeometryBatch {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
    vertex_buffer: Option<Buffer>,
    index_buffer: Option<Buffer>,
    vertices_dirty: bool,
    indices_dirty: bool,
}

impl Default for GeometryBatch {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            vertex_buffer: None,
            index_buffer: None,
            vertices_dirty: false,
            indices_dirty: false,
        }
    }
}

impl GeometryBatch {
    pub const MAX_VERTICES: usize = u16::MAX as usize;
    pub const MAX_INDICES: usize = Self::MAX_VERTICES * 6;

    // true if adding verts/indices would exceed what u16 indices can address
    fn would_overflow(&self, vert_count: usize, idx_count: usize) -> bool {
        self.vertices.len() + vert_count > Self::MAX_VERTICES
            || self.indices.len() + idx_count > Self::MAX_INDICES
    }

    /// Adds vertices/indices, returns false if it would overflow
    ///
    /// `indices` are relative to `verts`; they're rebased onto the batch here
    pub fn push(&mut self, verts: &[Vertex], indices: &[u16]) -> bool {
        if self.would_overflow(verts.len(), indices.len()) {
            return false;
        }

        let idx_offset = self.vertices.len() as u16;
        self.vertices.extend_from_slice(verts);
        self.indices.extend(indices.iter().map(|i| *i + idx_offset));

        self.vertices_dirty = true;
        self.indices_dirty = true;

        true
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.vertices_dirty = true;
        self.indices_dirty = true;
    }

    pub(crate) fn upload(&mut self, device: &Device, queue: &Queue) {
        if self.is_empty() || (!self.vertices_dirty && !self.indices_dirty) {
            return;
        }

        let vertex_buffer = self.vertex_buffer.get_or_insert_with(|| {
            device.create_buffer(&BufferDescriptor {
                label: Some("GeometryBatch Vertex Buffer"),
                size: (Self::MAX_VERTICES * std::mem::size_of::<Vertex>()) as u64,
                usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });
        if self.vertices_dirty {
            queue.write_buffer(vertex_buffer, 0, bytemuck::cast_slice(&self.vertices));
            self.vertices_dirty = false;
        }

        let index_buffer = self.index_buffer.get_or_insert_with(|| {
            device.create_buffer(&BufferDescriptor {
                label: Some("GeometryBatch Index Buffer"),
                size: (Self::MAX_INDICES * std::mem::size_of::<u16>()) as u64,
                usage: BufferUsages::INDEX | BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });
        if self.indices_dirty {
            // writes must be a multiple of COPY_BUFFER_ALIGNMENT
            let mut bytes: Vec<u8> = bytemuck::cast_slice(&self.indices).to_vec();
            let remainder = bytes.len() % wgpu::COPY_BUFFER_ALIGNMENT as usize;
            if remainder != 0 {
                bytes.resize(bytes.len() + wgpu::COPY_BUFFER_ALIGNMENT as usize - remainder, 0);
            }
            queue.write_buffer(index_buffer, 0, &bytes);
            self.indices_dirty = false;
        }
    }

    pub(crate) fn draw(&self, r_pass: &mut RenderPass) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&self.vertex_buffer, &self.index_buffer)
        else {
            return;
        };
        if self.is_empty() {
            return;
        }

        r_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        r_pass.set_index_buffer(index_buffer.slice(..), IndexFormat::Uint16);
        r_pass.draw_indexed(0..self.indices.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> [Vertex; 3] {
        [
            Vertex::new([0.0, 0.0], [1.0; 4]),
            Vertex::new([1.0, 0.0], [1.0; 4]),
            Vertex::new([0.0, 1.0], [1.0; 4]),
        ]
    }

    #[test]
    fn push_rebases_indices() {
        let mut batch = GeometryBatch::default();
        assert!(batch.is_empty());
        assert!(batch.push(&triangle(), &[0, 1, 2]));
        assert!(batch.push(&triangle(), &[0, 1, 2]));
        assert_eq!(batch.indices(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(batch.vertices().len(), 6);
    }

    #[test]
    fn rejects_geometry_past_u16_range() {
        let mut batch = GeometryBatch::default();
        let big = vec![Vertex::new([0.0; 2], [0.0; 4]); GeometryBatch::MAX_VERTICES - 1];
        assert!(batch.push(&big, &[0, 1, 2]));
        assert!(!batch.push(&triangle(), &[0, 1, 2]));
        assert_eq!(batch.vertices().len(), GeometryBatch::MAX_VERTICES - 1);
    }

    #[test]
    fn clear_empties_the_batch() {
        let mut batch = GeometryBatch::default();
        batch.push(&triangle(), &[0, 1, 2]);
        batch.clear();
        assert!(batch.is_empty());
    }
}
