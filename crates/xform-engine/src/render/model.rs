use thiserror::Error;

use crate::paint::Color;

use super::backend::{
    AttribLocation, BackendError, BufferHandle, RenderBackend, ShaderProgram, UniformSlot,
    VertexLayout,
};

/// Vertex input carrying the 2D position.
pub const POSITION_ATTRIBUTE: &str = "a_position";

/// Uniform holding the 4x4 model matrix.
pub const MODEL_MATRIX_UNIFORM: &str = "u_model_matrix";

/// Two floats per vertex, tightly packed.
const POSITION_LAYOUT: VertexLayout = VertexLayout::FLOAT2;

/// Fixed program used by [`ModelRenderer`].
pub const MODEL_SHADER: ShaderProgram = ShaderProgram {
    label: "xform model shader",
    source: include_str!("shaders/model.wgsl"),
    vertex_entry: "vs_main",
    fragment_entry: "fs_main",
};

/// Something the model renderer can draw: 2D vertices plus a model matrix.
pub trait Drawable {
    fn vertices(&self) -> &[[f32; 2]];

    /// The 16 matrix values, uploaded as-is.
    fn transform_elements(&self) -> [f32; 16];

    fn num_vertices(&self) -> u32 {
        self.vertices().len() as u32
    }
}

/// Why [`ModelRenderer::initialize`] gave up.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("failed to create the vertex buffer: {0}")]
    Buffer(#[source] BackendError),

    #[error("failed to build the shader program: {0}")]
    Shader(#[source] BackendError),

    #[error("failed to get the storage location of `{0}`")]
    MissingAttribute(&'static str),

    #[error("failed to get the storage location of `{0}`")]
    MissingUniform(&'static str),

    #[error("failed to link the shader program: {0}")]
    Link(#[source] BackendError),
}

#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("draw called before any vertices were uploaded")]
    VerticesNotUploaded,
}

/// What a successful [`ModelRenderer::draw`] submitted.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawReport {
    /// Matrix uploaded for this draw, in element order.
    pub matrix: [f32; 16],
    pub vertex_count: u32,
}

/// Draws a [`Drawable`] through the fixed model shader.
///
/// A renderer only exists once setup fully succeeded, so every method may
/// assume a valid buffer, program and bindings.
pub struct ModelRenderer<B: RenderBackend> {
    backend: B,
    vertex_buffer: BufferHandle,
    position: AttribLocation,
    transform: UniformSlot,
    uploaded: bool,
}

impl<B: RenderBackend> ModelRenderer<B> {
    /// One-time setup: buffer, program, attribute and uniform lookups, link.
    ///
    /// Any failure is final; nothing is retried.
    pub fn initialize(mut backend: B) -> Result<Self, SetupError> {
        let vertex_buffer = backend.create_vertex_buffer().map_err(SetupError::Buffer)?;
        backend.build_program(&MODEL_SHADER).map_err(SetupError::Shader)?;

        let position = backend
            .attribute_location(POSITION_ATTRIBUTE)
            .ok_or(SetupError::MissingAttribute(POSITION_ATTRIBUTE))?;

        let transform = backend
            .uniform_location(MODEL_MATRIX_UNIFORM)
            .ok_or(SetupError::MissingUniform(MODEL_MATRIX_UNIFORM))?;

        backend
            .link(position, POSITION_LAYOUT, transform)
            .map_err(SetupError::Link)?;

        log::debug!(
            "model renderer ready: {POSITION_ATTRIBUTE} at location {}, {MODEL_MATRIX_UNIFORM} at group {} binding {}",
            position.0,
            transform.group,
            transform.binding
        );

        Ok(Self {
            backend,
            vertex_buffer,
            position,
            transform,
            uploaded: false,
        })
    }

    /// Uploads the shape's vertices and wires them to the position attribute.
    ///
    /// Returns the number of vertices uploaded; an empty shape yields 0.
    pub fn upload_vertices(&mut self, shape: &impl Drawable) -> u32 {
        let packed: &[f32] = bytemuck::cast_slice(shape.vertices());

        self.backend.write_vertices(self.vertex_buffer, packed);
        self.backend
            .bind_attribute(self.vertex_buffer, self.position, POSITION_LAYOUT);
        self.uploaded = true;

        let count = shape.num_vertices();
        if count == 0 {
            log::warn!("uploaded a shape without vertices; draws will be empty");
        }
        count
    }

    /// Uploads the shape's matrix, clears to opaque black and draws its vertices.
    pub fn draw(&mut self, shape: &impl Drawable) -> Result<DrawReport, DrawError> {
        if !self.uploaded {
            return Err(DrawError::VerticesNotUploaded);
        }

        let matrix = shape.transform_elements();
        let vertex_count = shape.num_vertices();

        self.backend.write_uniform_mat4(self.transform, &matrix);
        self.backend.clear(Color::BLACK);
        self.backend.draw_triangles(0, vertex_count);

        Ok(DrawReport {
            matrix,
            vertex_count,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
