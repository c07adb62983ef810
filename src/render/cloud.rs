use crate::render::color::Rgb;
use glam::Vec3;
use std::mem;

/// One point of an orbital cloud as uploaded to the GPU.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CloudVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub alpha: f32,
}

impl CloudVertex {
    pub const STRIDE: usize = mem::size_of::<CloudVertex>();

    pub fn new(position: Vec3, color: Rgb, alpha: f32) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
            alpha,
        }
    }
}

/// CPU-side staging for a point buffer that grows in powers of two, so a
/// renderer only reallocates its GPU buffer when `capacity` changes.
#[derive(Debug)]
pub struct CloudBuffer {
    vertices: Vec<CloudVertex>,
    capacity: usize,
}

impl Default for CloudBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CloudBuffer {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            capacity: 1,
        }
    }

    /// Replaces the staged points. Returns true when the backing allocation
    /// had to grow.
    pub fn write_points(&mut self, samples: &[CloudVertex]) -> bool {
        self.vertices.clear();
        self.vertices.extend_from_slice(samples);

        if samples.len() > self.capacity {
            self.capacity = next_capacity(samples.len());
            return true;
        }
        false
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn size_in_bytes(&self) -> usize {
        self.capacity * CloudVertex::STRIDE
    }
}

fn next_capacity(current: usize) -> usize {
    let mut capacity = 1usize;
    while capacity < current {
        capacity *= 2;
    }
    capacity
}
