use thiserror::Error;

use crate::paint::Color;

/// Opaque handle to a vertex buffer owned by a backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BufferHandle(pub u32);

/// Shader input location of a vertex attribute.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AttribLocation(pub u32);

/// Bind group / binding pair of a uniform.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformSlot {
    pub group: u32,
    pub binding: u32,
}

/// How an attribute reads f32 components out of its vertex buffer.
///
/// `stride == 0` means tightly packed (`components * 4` bytes per vertex).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexLayout {
    pub components: u8,
    pub normalized: bool,
    pub stride: u64,
    pub offset: u64,
}

impl VertexLayout {
    /// Two floats per vertex, tightly packed, starting at byte 0.
    pub const FLOAT2: VertexLayout = VertexLayout {
        components: 2,
        normalized: false,
        stride: 0,
        offset: 0,
    };

    /// Distance in bytes between consecutive vertices.
    #[inline]
    pub fn effective_stride(&self) -> u64 {
        if self.stride == 0 {
            u64::from(self.components) * std::mem::size_of::<f32>() as u64
        } else {
            self.stride
        }
    }
}

/// A WGSL module holding both stages of a program.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ShaderProgram {
    pub label: &'static str,
    pub source: &'static str,
    pub vertex_entry: &'static str,
    pub fragment_entry: &'static str,
}

/// Failure reported by a backend operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Graphics operations the model renderer is written against.
///
/// Operations mirror a classic immediate-mode API: buffers and a program are
/// created and linked once, then each frame uploads a uniform, clears and
/// draws triangles. Clear and draw calls are recorded; when they reach the GPU
/// is up to the backend.
pub trait RenderBackend {
    /// Allocates an empty vertex buffer.
    fn create_vertex_buffer(&mut self) -> Result<BufferHandle, BackendError>;

    /// Compiles `program` and makes it current.
    fn build_program(&mut self, program: &ShaderProgram) -> Result<(), BackendError>;

    /// Looks up a vertex input of the current program by name.
    fn attribute_location(&self, name: &str) -> Option<AttribLocation>;

    /// Looks up a uniform of the current program by name.
    fn uniform_location(&self, name: &str) -> Option<UniformSlot>;

    /// Links the current program against one vertex input and one matrix
    /// uniform. Draws are only valid after a successful link.
    fn link(&mut self, location: AttribLocation, layout: VertexLayout, uniform: UniformSlot) -> Result<(), BackendError>;

    /// Replaces the contents of `buffer` with `data` (write-once, GPU resident).
    fn write_vertices(&mut self, buffer: BufferHandle, data: &[f32]);

    /// Feeds attribute `location` from `buffer` using `layout`.
    ///
    /// `location` and `layout` must match what the program was linked with.
    fn bind_attribute(&mut self, buffer: BufferHandle, location: AttribLocation, layout: VertexLayout);

    /// Uploads a 4x4 matrix given as 16 consecutive values.
    fn write_uniform_mat4(&mut self, slot: UniformSlot, elements: &[f32; 16]);

    /// Clears the color target.
    fn clear(&mut self, color: Color);

    /// Draws `count` vertices starting at `first` as a triangle list.
    fn draw_triangles(&mut self, first: u32, count: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float2_is_tightly_packed() {
        assert_eq!(VertexLayout::FLOAT2.effective_stride(), 8);
        assert_eq!(VertexLayout::FLOAT2.offset, 0);
        assert!(!VertexLayout::FLOAT2.normalized);
    }

    #[test]
    fn explicit_stride_is_kept() {
        let layout = VertexLayout { stride: 16, ..VertexLayout::FLOAT2 };
        assert_eq!(layout.effective_stride(), 16);
    }
}
