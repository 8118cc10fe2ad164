//! Overlay renderers drawn on top of the model.

pub mod rect;
pub mod text;

/// Corner order for the two triangles of a quad given clockwise corners.
const TRIANGLE_CORNERS: [usize; 6] = [0, 1, 2, 0, 2, 3];

fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}
