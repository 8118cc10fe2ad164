//! Name lookups in WGSL programs.
//!
//! wgpu has no runtime query for attribute or uniform locations, so backends
//! parse the program with naga and read bindings off the module.

use wgpu::naga;

use super::{BackendError, UniformSlot};

/// Shader stage of an entry point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    fn naga(self) -> naga::ShaderStage {
        match self {
            Stage::Vertex => naga::ShaderStage::Vertex,
            Stage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

/// A parsed WGSL module.
#[derive(Debug)]
pub struct ShaderInterface {
    module: naga::Module,
}

impl ShaderInterface {
    /// Parses `source`. The error carries naga's rendered diagnostic.
    pub fn parse(source: &str) -> Result<Self, BackendError> {
        naga::front::wgsl::parse_str(source)
            .map(|module| Self { module })
            .map_err(|err| BackendError::new(err.emit_to_string(source)))
    }

    /// Returns the `@location` of the entry point argument or struct member
    /// named `name`.
    pub fn attribute_location(&self, name: &str) -> Option<u32> {
        let arguments = self
            .module
            .entry_points
            .iter()
            .flat_map(|ep| &ep.function.arguments)
            .map(|arg| (arg.name.as_deref(), arg.binding.as_ref()));

        let members = self
            .module
            .types
            .iter()
            .filter_map(|(_, ty)| match &ty.inner {
                naga::TypeInner::Struct { members, .. } => Some(members),
                _ => None,
            })
            .flatten()
            .map(|member| (member.name.as_deref(), member.binding.as_ref()));

        arguments.chain(members).find_map(|(decl, binding)| match binding {
            Some(naga::Binding::Location { location, .. }) if decl == Some(name) => Some(*location),
            _ => None,
        })
    }

    /// Returns the group/binding of the uniform variable named `name`.
    pub fn uniform_slot(&self, name: &str) -> Option<UniformSlot> {
        self.module.global_variables.iter().find_map(|(_, var)| {
            if var.name.as_deref() != Some(name) || !matches!(var.space, naga::AddressSpace::Uniform) {
                return None;
            }
            let binding = var.binding.as_ref()?;
            Some(UniformSlot {
                group: binding.group,
                binding: binding.binding,
            })
        })
    }

    /// Returns `true` if `name` is an entry point of `stage`.
    pub fn has_entry_point(&self, stage: Stage, name: &str) -> bool {
        self.module
            .entry_points
            .iter()
            .any(|ep| ep.stage == stage.naga() && ep.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MODEL_SHADER;

    const SAMPLE: &str = "
        // @location(7) a_position: vec2<f32> (commented out)
        @group(1) @binding(3)
        var<uniform> u_model_matrix: mat4x4<f32>;

        @group(0) @binding(0)
        var<storage, read> u_palette: array<vec4<f32>>;

        struct Out {
            @builtin(position) clip: vec4<f32>,
            @location(2) v_color: vec4<f32>,
        };

        /* @vertex fn fake_main() -> @builtin(position) vec4<f32> { return vec4<f32>(); } */
        @vertex
        fn vs_main(@location(5) a_position: vec2<f32>) -> Out {
            var out: Out;
            out.clip = u_model_matrix * vec4<f32>(a_position, 0.0, 1.0);
            out.v_color = u_palette[0];
            return out;
        }

        @fragment fn fs_main(in: Out) -> @location(0) vec4<f32> { return in.v_color; }
    ";

    fn sample() -> ShaderInterface {
        ShaderInterface::parse(SAMPLE).unwrap()
    }

    #[test]
    fn finds_parameter_location() {
        assert_eq!(sample().attribute_location("a_position"), Some(5));
    }

    #[test]
    fn finds_struct_member_location() {
        assert_eq!(sample().attribute_location("v_color"), Some(2));
    }

    #[test]
    fn missing_attribute_is_none() {
        let s = sample();
        assert_eq!(s.attribute_location("a_normal"), None);
        assert_eq!(s.attribute_location("a_pos"), None);
        // Builtins have no location.
        assert_eq!(s.attribute_location("clip"), None);
    }

    #[test]
    fn finds_uniform_slot() {
        let s = sample();
        assert_eq!(
            s.uniform_slot("u_model_matrix"),
            Some(UniformSlot { group: 1, binding: 3 })
        );
        assert_eq!(s.uniform_slot("u_view_matrix"), None);
    }

    #[test]
    fn only_uniform_variables_are_uniforms() {
        let s = sample();
        assert_eq!(s.uniform_slot("a_position"), None);
        assert_eq!(s.uniform_slot("u_palette"), None);
    }

    #[test]
    fn entry_points_respect_stage_and_comments() {
        let s = sample();
        assert!(s.has_entry_point(Stage::Vertex, "vs_main"));
        assert!(s.has_entry_point(Stage::Fragment, "fs_main"));
        assert!(!s.has_entry_point(Stage::Fragment, "vs_main"));
        assert!(!s.has_entry_point(Stage::Vertex, "fake_main"));
    }

    #[test]
    fn declaration_layout_does_not_matter() {
        let s = ShaderInterface::parse(
            "@binding(4)\n@group(0) var<uniform>\n  u_m : mat4x4<f32>;\n\
             @vertex fn main(@builtin(vertex_index) i: u32,\n @location( 3 )\n p: vec2<f32>) \
             -> @builtin(position) vec4<f32> { return u_m * vec4<f32>(p, f32(i), 1.0); }",
        )
        .unwrap();
        assert_eq!(s.uniform_slot("u_m"), Some(UniformSlot { group: 0, binding: 4 }));
        assert_eq!(s.attribute_location("p"), Some(3));
    }

    #[test]
    fn parse_errors_name_the_problem() {
        let err = ShaderInterface::parse("fn broken() { return this is not wgsl; }").unwrap_err();
        assert!(err.to_string().contains("expected"), "{err}");
    }

    #[test]
    fn model_shader_interface() {
        let s = ShaderInterface::parse(MODEL_SHADER.source).unwrap();
        assert_eq!(s.attribute_location("a_position"), Some(0));
        assert_eq!(
            s.uniform_slot("u_model_matrix"),
            Some(UniformSlot { group: 0, binding: 0 })
        );
        assert!(s.has_entry_point(Stage::Vertex, MODEL_SHADER.vertex_entry));
        assert!(s.has_entry_point(Stage::Fragment, MODEL_SHADER.fragment_entry));
    }
}
