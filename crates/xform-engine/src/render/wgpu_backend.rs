use wgpu::util::DeviceExt;

use crate::paint::Color;

use super::backend::{
    AttribLocation, BackendError, BufferHandle, RenderBackend, ShaderProgram, UniformSlot,
    VertexLayout,
};
use super::reflect::{ShaderInterface, Stage};
use super::RenderTarget;

/// [`RenderBackend`] on top of wgpu.
///
/// Clear and draw calls are recorded and replayed into a render pass by
/// [`WgpuBackend::encode`]. Buffer and uniform writes go through the queue
/// right away, so they land before the next submitted frame.
///
/// Shader modules and the pipeline are created inside a validation error
/// scope: a program that fails to compile or link comes back as a
/// [`BackendError`] from `build_program` / `link`.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_format: wgpu::TextureFormat,

    program: Option<Program>,
    linked: Option<Linked>,
    // Indexed by `BufferHandle`; `None` until data is written.
    buffers: Vec<Option<wgpu::Buffer>>,
    // Buffer feeding the linked attribute.
    vertex_buffer: Option<BufferHandle>,

    pending: PendingPass,
}

struct Program {
    label: &'static str,
    interface: ShaderInterface,
    module: wgpu::ShaderModule,
    vertex_entry: &'static str,
    fragment_entry: &'static str,
}

struct Linked {
    location: AttribLocation,
    layout: VertexLayout,
    uniform: UniformSlot,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    pipeline: wgpu::RenderPipeline,
}

#[derive(Default)]
struct PendingPass {
    clear: Option<Color>,
    draws: Vec<(u32, u32)>,
}

const MAT4_SIZE: u64 = (16 * std::mem::size_of::<f32>()) as u64;

impl WgpuBackend {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, surface_format: wgpu::TextureFormat) -> Self {
        Self {
            device: device.clone(),
            queue: queue.clone(),
            surface_format,
            program: None,
            linked: None,
            buffers: Vec::new(),
            vertex_buffer: None,
            pending: PendingPass::default(),
        }
    }

    /// Replays recorded clear/draw calls into one render pass on `target`.
    ///
    /// Without a recorded clear the pass loads existing contents. Does nothing
    /// when nothing was recorded since the last call.
    pub fn encode(&mut self, target: &mut RenderTarget<'_>) {
        let pending = std::mem::take(&mut self.pending);
        if pending.clear.is_none() && pending.draws.is_empty() {
            return;
        }

        let load = match pending.clear {
            Some(c) => wgpu::LoadOp::Clear(c.to_wgpu()),
            None => wgpu::LoadOp::Load,
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("xform model pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let Some(linked) = self.linked.as_ref() else { return };
        let Some(vbo) = self.vertex_buffer.and_then(|h| self.buffer(h)) else { return };

        rpass.set_pipeline(&linked.pipeline);
        rpass.set_bind_group(linked.uniform.group, &linked.bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));

        for (first, count) in pending.draws {
            if count > 0 {
                rpass.draw(first..first + count, 0..1);
            }
        }
    }

    fn buffer(&self, handle: BufferHandle) -> Option<&wgpu::Buffer> {
        self.buffers.get(handle.0 as usize).and_then(Option::as_ref)
    }

    /// Runs `create` inside a validation error scope.
    fn validated<T>(&self, what: &str, create: impl FnOnce(&wgpu::Device) -> T) -> Result<T, BackendError> {
        let scope = self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let value = create(&self.device);
        match pollster::block_on(scope.pop()) {
            Some(err) => Err(BackendError::new(format!("{what}: {err}"))),
            None => Ok(value),
        }
    }

    fn create_linked(
        &self,
        program: &Program,
        location: AttribLocation,
        layout: VertexLayout,
        uniform: UniformSlot,
    ) -> Result<Linked, BackendError> {
        let format = vertex_format(layout.components).ok_or_else(|| {
            BackendError::new(format!("unsupported attribute width: {} components", layout.components))
        })?;

        let attributes = [wgpu::VertexAttribute {
            format,
            offset: layout.offset,
            shader_location: location.0,
        }];

        self.validated(program.label, |device| {
            let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("xform model matrix ubo"),
                size: MAT4_SIZE,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("xform model bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: uniform.binding,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(MAT4_SIZE),
                    },
                    count: None,
                }],
            });

            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("xform model bind group"),
                layout: &bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: uniform.binding,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });

            let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("xform model pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

            let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("xform model pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &program.module,
                    entry_point: Some(program.vertex_entry),
                    compilation_options: Default::default(),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: layout.effective_stride(),
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &attributes,
                    }],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &program.module,
                    entry_point: Some(program.fragment_entry),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

            Linked {
                location,
                layout,
                uniform,
                uniform_buffer,
                bind_group,
                pipeline,
            }
        })
    }
}

impl RenderBackend for WgpuBackend {
    fn create_vertex_buffer(&mut self) -> Result<BufferHandle, BackendError> {
        let index = u32::try_from(self.buffers.len())
            .map_err(|_| BackendError::new("vertex buffer handles exhausted"))?;
        // wgpu buffers are sized at creation; allocation happens on first write.
        self.buffers.push(None);
        Ok(BufferHandle(index))
    }

    fn build_program(&mut self, program: &ShaderProgram) -> Result<(), BackendError> {
        let interface = ShaderInterface::parse(program.source)
            .map_err(|err| BackendError::new(format!("{}: {err}", program.label)))?;

        if !interface.has_entry_point(Stage::Vertex, program.vertex_entry) {
            return Err(BackendError::new(format!(
                "{}: vertex entry point `{}` not found",
                program.label, program.vertex_entry
            )));
        }
        if !interface.has_entry_point(Stage::Fragment, program.fragment_entry) {
            return Err(BackendError::new(format!(
                "{}: fragment entry point `{}` not found",
                program.label, program.fragment_entry
            )));
        }

        let module = self.validated(program.label, |device| {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(program.label),
                source: wgpu::ShaderSource::Wgsl(program.source.into()),
            })
        })?;

        self.program = Some(Program {
            label: program.label,
            interface,
            module,
            vertex_entry: program.vertex_entry,
            fragment_entry: program.fragment_entry,
        });
        self.linked = None;
        Ok(())
    }

    fn attribute_location(&self, name: &str) -> Option<AttribLocation> {
        let program = self.program.as_ref()?;
        program.interface.attribute_location(name).map(AttribLocation)
    }

    fn uniform_location(&self, name: &str) -> Option<UniformSlot> {
        let program = self.program.as_ref()?;
        let slot = program.interface.uniform_slot(name)?;
        if slot.group != 0 {
            log::warn!("uniform `{name}` is in group {}; only group 0 is bound", slot.group);
            return None;
        }
        Some(slot)
    }

    fn link(&mut self, location: AttribLocation, layout: VertexLayout, uniform: UniformSlot) -> Result<(), BackendError> {
        let program = self
            .program
            .as_ref()
            .ok_or_else(|| BackendError::new("no program to link"))?;

        let linked = self.create_linked(program, location, layout, uniform)?;
        log::debug!("{} linked for {} vertex components", program.label, layout.components);
        self.linked = Some(linked);
        Ok(())
    }

    fn write_vertices(&mut self, buffer: BufferHandle, data: &[f32]) {
        let Some(entry) = self.buffers.get_mut(buffer.0 as usize) else {
            log::warn!("write to unknown vertex buffer {buffer:?}");
            return;
        };

        *entry = (!data.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("xform model vbo"),
                    contents: bytemuck::cast_slice(data),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });
        log::debug!("vertex buffer {} holds {} floats", buffer.0, data.len());
    }

    fn bind_attribute(&mut self, buffer: BufferHandle, location: AttribLocation, layout: VertexLayout) {
        match self.linked.as_ref() {
            Some(linked) if linked.location == location && linked.layout == layout => {
                self.vertex_buffer = Some(buffer);
            }
            Some(_) => log::error!("attribute {location:?} {layout:?} does not match the linked pipeline"),
            None => log::warn!("attribute bound before the program was linked"),
        }
    }

    fn write_uniform_mat4(&mut self, slot: UniformSlot, elements: &[f32; 16]) {
        match self.linked.as_ref() {
            Some(linked) if linked.uniform == slot => {
                self.queue
                    .write_buffer(&linked.uniform_buffer, 0, bytemuck::cast_slice(elements));
            }
            _ => log::warn!("uniform {slot:?} is not part of the linked pipeline"),
        }
    }

    fn clear(&mut self, color: Color) {
        self.pending.clear = Some(color);
    }

    fn draw_triangles(&mut self, first: u32, count: u32) {
        self.pending.draws.push((first, count));
    }
}

fn vertex_format(components: u8) -> Option<wgpu::VertexFormat> {
    match components {
        1 => Some(wgpu::VertexFormat::Float32),
        2 => Some(wgpu::VertexFormat::Float32x2),
        3 => Some(wgpu::VertexFormat::Float32x3),
        4 => Some(wgpu::VertexFormat::Float32x4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ModelRenderer, MODEL_SHADER};

    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    const BROKEN: ShaderProgram = ShaderProgram {
        label: "broken",
        source: "@vertex fn vs_main() -> @builtin(position) vec4<f32> { return this is not wgsl; }\n\
                 @fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }",
        vertex_entry: "vs_main",
        fragment_entry: "fs_main",
    };

    // Parses fine; fails wgpu validation (vec2 returned as the position).
    const INVALID: ShaderProgram = ShaderProgram {
        label: "invalid",
        source: "@vertex fn vs_main() -> @builtin(position) vec4<f32> { return vec2<f32>(0.0, 1.0); }\n\
                 @fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }",
        vertex_entry: "vs_main",
        fragment_entry: "fs_main",
    };

    const MATRIX: UniformSlot = UniformSlot { group: 0, binding: 0 };

    fn backend() -> WgpuBackend {
        let (device, queue) = wgpu::Device::noop(&wgpu::DeviceDescriptor::default());
        WgpuBackend::new(&device, &queue, FORMAT)
    }

    #[test]
    fn float_widths_map_to_vertex_formats() {
        assert_eq!(vertex_format(2), Some(wgpu::VertexFormat::Float32x2));
        assert_eq!(vertex_format(0), None);
        assert_eq!(vertex_format(5), None);
    }

    #[test]
    fn shader_syntax_error_is_returned() {
        let mut b = backend();
        let err = b.build_program(&BROKEN).unwrap_err();
        assert!(err.0.starts_with("broken:"), "{err}");
        assert!(b.attribute_location("a_position").is_none());
    }

    #[test]
    fn shader_validation_error_is_returned() {
        let mut b = backend();
        let err = b.build_program(&INVALID).unwrap_err();
        assert!(err.0.starts_with("invalid:"), "{err}");
    }

    #[test]
    fn missing_entry_point_is_returned() {
        let mut b = backend();
        let program = ShaderProgram { vertex_entry: "main", ..MODEL_SHADER };
        let err = b.build_program(&program).unwrap_err();
        assert!(err.0.contains("vertex entry point `main`"), "{err}");
    }

    #[test]
    fn model_shader_builds_and_links() {
        let mut b = backend();
        b.build_program(&MODEL_SHADER).unwrap();
        let location = b.attribute_location("a_position").unwrap();
        let slot = b.uniform_location("u_model_matrix").unwrap();
        b.link(location, VertexLayout::FLOAT2, slot).unwrap();
        assert!(b.linked.is_some());
    }

    #[test]
    fn link_failure_is_returned() {
        let mut b = backend();
        b.build_program(&MODEL_SHADER).unwrap();

        // The shader reads location 0, which this layout never feeds.
        let err = b.link(AttribLocation(1), VertexLayout::FLOAT2, MATRIX).unwrap_err();
        assert!(err.0.starts_with(MODEL_SHADER.label), "{err}");
        assert!(b.linked.is_none());

        let err = b.link(AttribLocation(0), VertexLayout { components: 7, ..VertexLayout::FLOAT2 }, MATRIX);
        assert!(err.is_err());
    }

    #[test]
    fn link_without_program_fails() {
        let mut b = backend();
        assert!(b.link(AttribLocation(0), VertexLayout::FLOAT2, MATRIX).is_err());
    }

    #[test]
    fn model_renderer_initializes_on_wgpu() {
        let mut r = ModelRenderer::initialize(backend()).unwrap();
        let triangle = Triangle;
        assert_eq!(r.upload_vertices(&triangle), 3);
        assert_eq!(r.backend().vertex_buffer, Some(BufferHandle(0)));
        assert!(r.draw(&triangle).is_ok());
    }

    #[test]
    fn mismatched_attribute_is_not_bound() {
        let mut b = backend();
        b.build_program(&MODEL_SHADER).unwrap();
        b.link(AttribLocation(0), VertexLayout::FLOAT2, MATRIX).unwrap();
        let vbo = b.create_vertex_buffer().unwrap();

        b.bind_attribute(vbo, AttribLocation(0), VertexLayout { stride: 16, ..VertexLayout::FLOAT2 });
        assert_eq!(b.vertex_buffer, None);

        b.bind_attribute(vbo, AttribLocation(0), VertexLayout::FLOAT2);
        assert_eq!(b.vertex_buffer, Some(vbo));
    }

    struct Triangle;

    impl crate::render::Drawable for Triangle {
        fn vertices(&self) -> &[[f32; 2]] {
            &[[0.0, 0.075], [-0.075, -0.075], [0.075, -0.075]]
        }

        fn transform_elements(&self) -> [f32; 16] {
            std::array::from_fn(|i| if i % 5 == 0 { 1.0 } else { 0.0 })
        }
    }
}
