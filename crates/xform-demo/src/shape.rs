use glam::{Mat4, Vec4};
use xform_engine::render::Drawable;

/// Vertices of the demo triangle, `(x, y)` in clip space.
pub const TRIANGLE: [[f32; 2]; 3] = [[0.0, 0.075], [-0.075, -0.075], [0.075, -0.075]];

/// A fixed vertex list plus the matrix currently applied to it.
///
/// The matrix's 16 values are addressed in storage order: `elements()[i * 4 + j]`
/// is what the matrix text shows at row `i`, column `j`, and the same array is
/// uploaded to the GPU untransposed.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    vertices: Vec<[f32; 2]>,
    transform: Mat4,
}

impl Shape {
    pub fn new(vertices: Vec<[f32; 2]>) -> Self {
        Self {
            vertices,
            transform: Mat4::IDENTITY,
        }
    }

    pub fn triangle() -> Self {
        Self::new(TRIANGLE.to_vec())
    }

    pub fn elements(&self) -> [f32; 16] {
        self.transform.to_cols_array()
    }

    /// Replaces the whole matrix.
    pub fn set_elements(&mut self, elements: [f32; 16]) {
        self.transform = Mat4::from_cols_array(&elements);
    }

    /// Positions the vertex shader produces for each vertex.
    pub fn transformed_vertices(&self) -> Vec<Vec4> {
        self.vertices
            .iter()
            .map(|&[x, y]| self.transform * Vec4::new(x, y, 0.0, 1.0))
            .collect()
    }
}

impl Drawable for Shape {
    fn vertices(&self) -> &[[f32; 2]] {
        &self.vertices
    }

    fn transform_elements(&self) -> [f32; 16] {
        self.elements()
    }
}

/// RGB the fragment shader outputs at transformed depth `z`.
///
/// Linear from red at 0 to blue at 10; values outside extrapolate.
pub fn depth_color(z: f32) -> [f32; 3] {
    let t = z / 10.0;
    [1.0 - t, 0.0, t]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_starts_untransformed() {
        let shape = Shape::triangle();
        assert_eq!(shape.num_vertices(), 3);
        assert_eq!(shape.elements(), Mat4::IDENTITY.to_cols_array());
        let expected: Vec<Vec4> = TRIANGLE
            .iter()
            .map(|&[x, y]| Vec4::new(x, y, 0.0, 1.0))
            .collect();
        assert_eq!(shape.transformed_vertices(), expected);
    }

    #[test]
    fn elements_round_trip_in_storage_order() {
        let mut shape = Shape::triangle();
        let elements: [f32; 16] = std::array::from_fn(|i| i as f32);
        shape.set_elements(elements);
        assert_eq!(shape.elements(), elements);
        assert_eq!(shape.transform_elements(), elements);
    }

    #[test]
    fn transform_matches_shader_multiplication() {
        // Element 7 lands in column 1, row 3: w picks up 8 * y.
        let mut shape = Shape::new(vec![[0.5, 0.25]]);
        shape.set_elements([
            2.0, 0.0, 0.0, 0.0,
            0.0, 3.0, 0.0, 8.0,
            0.0, 0.0, 5.0, 4.0,
            0.0, 0.0, 0.0, 1.0,
        ]);
        assert_eq!(shape.transformed_vertices(), vec![Vec4::new(1.0, 0.75, 0.0, 3.0)]);
    }

    #[test]
    fn empty_shape_has_no_vertices() {
        let shape = Shape::new(Vec::new());
        assert_eq!(shape.num_vertices(), 0);
        assert!(shape.transformed_vertices().is_empty());
    }

    #[test]
    fn depth_color_spans_red_to_blue() {
        assert_eq!(depth_color(0.0), [1.0, 0.0, 0.0]);
        assert_eq!(depth_color(10.0), [0.0, 0.0, 1.0]);
        assert_eq!(depth_color(5.0), [0.5, 0.0, 0.5]);
        // Outside [0, 10] the mix extrapolates.
        assert_eq!(depth_color(20.0), [-1.0, 0.0, 2.0]);
    }
}
