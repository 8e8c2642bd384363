use std::sync::LazyLock;

use itertools::Itertools;
use regex::{Captures, Regex};

/// GLSL vector and matrix type names and their HLSL equivalents.
pub const GLSL_TO_HLSL_TYPES: &[(&str, &str)] = &[
    ("vec2", "float2"),
    ("vec3", "float3"),
    ("vec4", "float4"),
    ("ivec2", "int2"),
    ("ivec3", "int3"),
    ("ivec4", "int4"),
    ("uvec2", "uint2"),
    ("uvec3", "uint3"),
    ("uvec4", "uint4"),
    ("bvec2", "bool2"),
    ("bvec3", "bool3"),
    ("bvec4", "bool4"),
    ("dvec2", "double2"),
    ("dvec3", "double3"),
    ("dvec4", "double4"),
    ("mat2", "float2x2"),
    ("mat3", "float3x3"),
    ("mat4", "float4x4"),
];

/// Matches any GLSL type name of [`GLSL_TO_HLSL_TYPES`] as a whole word.
static GLSL_TYPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let names = GLSL_TO_HLSL_TYPES
        .iter()
        .map(|(glsl, _)| regex::escape(glsl))
        .join("|");

    Regex::new(&format!(r"\b(?:{names})\b")).expect("GLSL type pattern")
});

/// Get the HLSL type name for a GLSL vector or matrix type name.
pub fn hlsl_type_for(glsl_type: &str) -> Option<&'static str> {
    GLSL_TO_HLSL_TYPES
        .iter()
        .find(|(glsl, _)| *glsl == glsl_type)
        .map(|(_, hlsl)| *hlsl)
}

/// Replace GLSL vector and matrix type names in `code` with HLSL ones, e.g. `vec3` to `float3`.
///
/// Only whole tokens are replaced, identifiers such as `vec345` or `my_vec3` are left
/// untouched.
pub fn convert_glsl_types_to_hlsl(code: &str) -> String {
    GLSL_TYPE_PATTERN
        .replace_all(code, |caps: &Captures| {
            hlsl_type_for(&caps[0]).unwrap_or(&caps[0]).to_string()
        })
        .into_owned()
}
