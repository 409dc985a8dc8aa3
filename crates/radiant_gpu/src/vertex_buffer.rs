//! Vertex buffer building

use bytemuck::Pod;

use crate::host_buffer::{BufferView, HostBuffer};

/// Non-indexed vertex data living in a [`HostBuffer`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexBuffer {
    pub view: BufferView,
    pub vertex_count: u32,
}

/// Accumulates vertices before they are copied into a transient buffer
#[derive(Clone, Debug)]
pub struct VertexBufferBuilder<V> {
    vertices: Vec<V>,
}

impl<V> Default for VertexBufferBuilder<V> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }
}

impl<V: Pod> VertexBufferBuilder<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_vertex(&mut self, vertex: V) {
        self.vertices.push(vertex);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Copy the accumulated vertices into `buffer`
    pub fn create_vertex_buffer(&self, buffer: &mut HostBuffer) -> VertexBuffer {
        VertexBuffer {
            view: buffer.emplace_vertices(&self.vertices),
            vertex_count: self.vertices.len() as u32,
        }
    }
}
