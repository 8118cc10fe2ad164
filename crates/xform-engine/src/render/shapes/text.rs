use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::coords::{Rect, Vec2, Viewport};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::text::{FontId, FontSystem};

use super::{premul_alpha_blend, TRIANGLE_CORNERS};

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1;

/// Text laid out from `origin` (top-left, logical pixels). `\n` starts a
/// new line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub font: FontId,
    pub origin: Vec2,
    pub size: f32,
    pub color: Color,
}

/// Glyph renderer for panel labels and the matrix readout.
///
/// Glyphs are rasterized with fontdue on first use and cached in a single
/// R8 coverage atlas for the renderer's lifetime. Quads are expanded on the
/// CPU into NDC triangles, like [`super::rect::RectRenderer`].
pub struct TextRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,

    atlas: Option<wgpu::Texture>,
    packer: ShelfPacker,
    glyphs: HashMap<GlyphRasterConfig, AtlasRegion>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,

    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            atlas: None,
            packer: ShelfPacker::new(ATLAS_SIZE),
            glyphs: HashMap::new(),
            vbo: None,
            vbo_capacity: 0,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct GlyphVertex {
    ndc: [f32; 2],
    uv: [f32; 2],
    color: [f32; 4],
}

impl GlyphVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // ndc
        1 => Float32x2, // uv
        2 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Texture coordinates of a cached glyph.
#[derive(Debug, Copy, Clone, PartialEq)]
struct AtlasRegion {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

impl AtlasRegion {
    fn new(x: u32, y: u32, w: u32, h: u32, atlas_size: u32) -> Self {
        let s = atlas_size as f32;
        Self {
            uv_min: [x as f32 / s, y as f32 / s],
            uv_max: [(x + w) as f32 / s, (y + h) as f32 / s],
        }
    }

    /// UVs matching `Rect::corners` order.
    fn corners(self) -> [[f32; 2]; 4] {
        let ([u0, v0], [u1, v1]) = (self.uv_min, self.uv_max);
        [[u0, v0], [u1, v0], [u1, v1], [u0, v1]]
    }
}

/// Row-by-row ("shelf") allocator for the glyph atlas.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
        }
    }

    /// Reserves a `w` x `h` region and returns its top-left corner.
    ///
    /// Once a glyph fails to fit the packer stays full.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size || self.cursor_y + h + GLYPH_PADDING > self.size {
            log::warn!("glyph atlas is full ({0}x{0}); some glyphs will not be drawn", self.size);
            self.full = true;
            return None;
        }

        let at = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(at)
    }
}

fn glyph_vertices(viewport: Viewport, dst: Rect, region: AtlasRegion, color: [f32; 4]) -> [GlyphVertex; 6] {
    let corners = dst.corners();
    let uvs = region.corners();
    TRIANGLE_CORNERS.map(|i| GlyphVertex {
        ndc: viewport.to_ndc(corners[i]),
        uv: uvs[i],
        color,
    })
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `items` into `target` over its current contents.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        fonts: &FontSystem,
        items: &[TextItem],
    ) {
        if !ctx.viewport.is_valid() || items.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_atlas(ctx);

        let mut vertices: Vec<GlyphVertex> = Vec::new();
        for item in items {
            let Some(font) = fonts.get(item.font) else {
                log::warn!("unknown font {:?}; skipping text", item.font);
                continue;
            };

            self.layout.reset(&LayoutSettings {
                x: item.origin.x,
                y: item.origin.y,
                ..LayoutSettings::default()
            });
            self.layout.append(&[font], &TextStyle::new(&item.text, item.size, 0));

            // Copy positions out so the layout borrow ends before glyphs are cached.
            let placed: Vec<(GlyphRasterConfig, Rect)> = self
                .layout
                .glyphs()
                .iter()
                .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
                .map(|g| (g.key, Rect::new(g.x, g.y, g.width as f32, g.height as f32)))
                .collect();

            let color = item.color.to_array();
            for (key, dst) in placed {
                if let Some(region) = self.glyph_region(ctx, font, key) {
                    vertices.extend(glyph_vertices(ctx.viewport, dst, region, color));
                }
            }
        }

        if vertices.is_empty() {
            return;
        }

        self.ensure_bind_group(ctx);
        self.ensure_capacity(ctx, vertices.len());

        let (Some(pipeline), Some(bind_group), Some(vbo)) =
            (self.pipeline.as_ref(), self.bind_group.as_ref(), self.vbo.as_ref())
        else {
            return;
        };
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&vertices));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("xform text pass"),
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
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..vertices.len() as u32, 0..1);
    }

    /// Atlas region for `key`, rasterizing and uploading it on first use.
    fn glyph_region(&mut self, ctx: &RenderCtx<'_>, font: &fontdue::Font, key: GlyphRasterConfig) -> Option<AtlasRegion> {
        if let Some(region) = self.glyphs.get(&key) {
            return Some(*region);
        }

        let (metrics, bitmap) = font.rasterize_config(key);
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }
        let (w, h) = (metrics.width as u32, metrics.height as u32);

        let atlas = self.atlas.as_ref()?;
        let (x, y) = self.packer.place(w, h)?;

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );

        let region = AtlasRegion::new(x, y, w, h, ATLAS_SIZE);
        self.glyphs.insert(key, region);
        Some(region)
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bind_group_layout = self.bind_group_layout.get_or_insert_with(|| {
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("xform text bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            })
        });

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("xform text shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("xform text pipeline layout"),
            bind_group_layouts: &[bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("xform text pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[GlyphVertex::layout()],
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

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas.is_some() {
            return;
        }

        self.atlas = Some(ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("xform glyph atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        }));
    }

    fn ensure_bind_group(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() {
            return;
        }
        let (Some(layout), Some(atlas)) = (self.bind_group_layout.as_ref(), self.atlas.as_ref()) else {
            return;
        };

        let view = atlas.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("xform glyph sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("xform text bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        }));
    }

    fn ensure_capacity(&mut self, ctx: &RenderCtx<'_>, vertices: usize) {
        if vertices <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }

        let capacity = vertices.next_power_of_two().max(256);
        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("xform text vbo"),
            size: (capacity * std::mem::size_of::<GlyphVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = capacity;
    }
}
