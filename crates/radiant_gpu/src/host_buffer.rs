//! Transient per-frame buffer
//!
//! Uniform blocks and vertex data for a frame are packed into one growable
//! host allocation. Each emplacement returns a [`BufferView`] naming its byte
//! range; the whole buffer is uploaded once and then reset at the frame
//! boundary.

use std::ops::Range;

use bytemuck::Pod;
use wgpu::util::DeviceExt;

/// A byte range inside a [`HostBuffer`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferView {
    pub offset: usize,
    pub length: usize,
}

impl BufferView {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.length
    }
}

/// Growable host buffer for per-frame uniforms and vertices
#[derive(Debug)]
pub struct HostBuffer {
    data: Vec<u8>,
    uniform_alignment: usize,
}

impl Default for HostBuffer {
    fn default() -> Self {
        Self::new(256)
    }
}

impl HostBuffer {
    /// Create an empty buffer whose uniforms start on `uniform_alignment`
    /// byte boundaries (must be a power of two)
    pub fn new(uniform_alignment: usize) -> Self {
        Self {
            data: Vec::new(),
            uniform_alignment: uniform_alignment.max(1),
        }
    }

    fn emplace_bytes(&mut self, bytes: &[u8], alignment: usize) -> BufferView {
        let offset = self.data.len().next_multiple_of(alignment);
        self.data.resize(offset, 0);
        self.data.extend_from_slice(bytes);
        BufferView {
            offset,
            length: bytes.len(),
        }
    }

    /// Copy a uniform block into the buffer at the next aligned offset
    pub fn emplace_uniform<T: Pod>(&mut self, uniform: &T) -> BufferView {
        self.emplace_bytes(bytemuck::bytes_of(uniform), self.uniform_alignment)
    }

    /// Copy vertex data into the buffer
    pub fn emplace_vertices<T: Pod>(&mut self, vertices: &[T]) -> BufferView {
        self.emplace_bytes(
            bytemuck::cast_slice(vertices),
            std::mem::align_of::<T>().max(4),
        )
    }

    /// Bytes covered by `view`, if it lies inside this buffer
    pub fn bytes(&self, view: &BufferView) -> Option<&[u8]> {
        self.data.get(view.range())
    }

    /// Read back a value previously emplaced at `view`
    pub fn read<T: Pod>(&self, view: &BufferView) -> Option<T> {
        let bytes = self.bytes(view)?;
        (bytes.len() == std::mem::size_of::<T>()).then(|| bytemuck::pod_read_unaligned(bytes))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Release all emplaced data, keeping the allocation for the next frame
    pub fn reset(&mut self) {
        self.data.clear();
    }

    /// Upload the buffer's contents into a new GPU buffer
    pub fn create_buffer(&self, device: &wgpu::Device, usage: wgpu::BufferUsages) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Transients Buffer"),
            contents: &self.data,
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniforms_are_aligned() {
        let mut buffer = HostBuffer::new(256);
        let a = buffer.emplace_uniform(&[1.0f32; 3]);
        let b = buffer.emplace_uniform(&7u32);

        assert_eq!(a, BufferView { offset: 0, length: 12 });
        assert_eq!(b.offset, 256);
        assert_eq!(buffer.read::<u32>(&b), Some(7));
        assert_eq!(buffer.read::<[f32; 3]>(&a), Some([1.0; 3]));
    }

    #[test]
    fn test_vertices_are_packed() {
        let mut buffer = HostBuffer::new(256);
        buffer.emplace_uniform(&1u32);
        let view = buffer.emplace_vertices(&[[1.0f32, 2.0], [3.0, 4.0]]);

        assert_eq!(view.offset, 4);
        assert_eq!(view.length, 16);
        let floats: &[f32] = bytemuck::cast_slice(buffer.bytes(&view).unwrap());
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_read_with_wrong_size() {
        let mut buffer = HostBuffer::default();
        let view = buffer.emplace_uniform(&1u32);
        assert_eq!(buffer.read::<u64>(&view), None);
    }

    #[test]
    fn test_reset() {
        let mut buffer = HostBuffer::default();
        let view = buffer.emplace_uniform(&[0u8; 64]);
        assert_eq!(buffer.len(), 64);

        buffer.reset();
        assert!(buffer.is_empty());
        assert_eq!(buffer.bytes(&view), None);
    }
}
