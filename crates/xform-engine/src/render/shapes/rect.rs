use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Viewport};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::{premul_alpha_blend, TRIANGLE_CORNERS};

/// A rectangle filled with a solid premultiplied color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FilledRect {
    pub rect: Rect,
    pub color: Color,
}

/// Solid rectangle renderer for UI overlays.
///
/// Rectangles are given in logical pixels and expanded on the CPU into two
/// triangles each, already in NDC. Draws over what the target holds.
#[derive(Default)]
pub struct RectRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct RectVertex {
    ndc: [f32; 2],
    color: [f32; 4],
}

impl RectVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // ndc
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

fn tessellate(viewport: Viewport, rects: &[FilledRect]) -> Vec<RectVertex> {
    rects
        .iter()
        .filter(|r| !r.rect.is_empty())
        .flat_map(|r| {
            let corners = r.rect.corners();
            let color = r.color.to_array();
            TRIANGLE_CORNERS.map(|i| RectVertex {
                ndc: viewport.to_ndc(corners[i]),
                color,
            })
        })
        .collect()
}

impl RectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `rects` into `target`; later rects paint over earlier ones.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, rects: &[FilledRect]) {
        if !ctx.viewport.is_valid() {
            return;
        }
        let vertices = tessellate(ctx.viewport, rects);
        if vertices.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_capacity(ctx, vertices.len());

        let (Some(pipeline), Some(vbo)) = (self.pipeline.as_ref(), self.vbo.as_ref()) else {
            return;
        };
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&vertices));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("xform rect pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..vertices.len() as u32, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("xform rect shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/rect.wgsl").into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("xform rect pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("xform rect pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[RectVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_capacity(&mut self, ctx: &RenderCtx<'_>, vertices: usize) {
        if vertices <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }

        // Four buttons need 24 vertices; round up so resizes stay rare.
        let capacity = vertices.next_power_of_two().max(32);
        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("xform rect vbo"),
            size: (capacity * std::mem::size_of::<RectVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = capacity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(100.0, 100.0);

    #[test]
    fn each_rect_becomes_two_triangles() {
        let red = Color::from_premul(1.0, 0.0, 0.0, 1.0);
        let rects = [FilledRect { rect: Rect::new(0.0, 0.0, 50.0, 100.0), color: red }];
        let v = tessellate(VP, &rects);

        assert_eq!(v.len(), 6);
        let ndc: Vec<[f32; 2]> = v.iter().map(|v| v.ndc).collect();
        assert_eq!(
            ndc,
            vec![[-1.0, 1.0], [0.0, 1.0], [0.0, -1.0], [-1.0, 1.0], [0.0, -1.0], [-1.0, -1.0]]
        );
        assert!(v.iter().all(|v| v.color == [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn empty_rects_are_skipped() {
        let rects = [
            FilledRect { rect: Rect::new(0.0, 0.0, 0.0, 10.0), color: Color::BLACK },
            FilledRect { rect: Rect::new(10.0, 10.0, 5.0, 5.0), color: Color::BLACK },
        ];
        assert_eq!(tessellate(VP, &rects).len(), 6);
    }
}
