use assert_matches::assert_matches;
use combined_shader_language::{
    CombinedShaderParser, Error, ErrorKind, IncludeOptions, ShaderDialect,
};

use crate::common::given;

const FRAGMENT_SHADER: &str = "\
#include \"bindings.glsl\"

#additional_push_constants
{
    uint materialIndex;
}

#hlsl float4 main(float4 position : SV_Position) : SV_Target
#glsl{
layout(location = 0) out vec4 outColor;
void main()
}
{
    vec4 color = vec4(1.0);
#hlsl return color;
#glsl outColor = color;
}
";

const BINDINGS: &str = "\
#glsl
{
layout(push_constant) uniform PushConstants
{
    mat4 viewProjection;
} constants;
}
";

fn parser() -> CombinedShaderParser {
    CombinedShaderParser::new(IncludeOptions::default().additional_push_constants(true))
}

#[test]
fn test_combined_shader_parser_parse_glsl_should_expand_and_filter() {
    let dir = given::temp_dir();
    dir.file("bindings.glsl", BINDINGS);
    let path = dir.file("mesh.frag.glsl", FRAGMENT_SHADER);

    let source = parser().parse_glsl(&path);

    assert_matches!(
        source,
        Ok(source) if source == "\
layout(push_constant) uniform PushConstants
{
    mat4 viewProjection;
    uint materialIndex;
} constants;


layout(location = 0) out vec4 outColor;
void main()
{
    vec4 color = vec4(1.0);
outColor = color;
}
"
    );
}

#[test]
fn test_combined_shader_parser_parse_hlsl_should_expand_filter_and_translate_types() {
    let dir = given::temp_dir();
    dir.file("bindings.glsl", BINDINGS);
    let path = dir.file("mesh.frag.glsl", FRAGMENT_SHADER);

    let source = parser().parse_hlsl(&path);

    assert_matches!(
        source,
        Ok(source) if source == "\n\nfloat4 main(float4 position : SV_Position) : SV_Target\n\
            {\n\
            \x20   float4 color = float4(1.0);\n\
            return color;\n\
            }\n"
    );
}

#[test]
fn test_combined_shader_parser_parse_should_match_named_entry_points() {
    let dir = given::temp_dir();
    dir.file("bindings.glsl", BINDINGS);
    let path = dir.file("mesh.frag.glsl", FRAGMENT_SHADER);
    let parser = parser();

    assert_eq!(
        parser.parse(&path, ShaderDialect::Hlsl),
        parser.parse_hlsl(&path)
    );
    assert_eq!(
        parser.parse(&path, ShaderDialect::Glsl),
        parser.parse_glsl(&path)
    );
}

#[test]
fn test_combined_shader_parser_parse_when_include_fails_should_return_include_error() {
    let dir = given::temp_dir();
    let path = dir.file("main.glsl", "#hlsl float x;\n#include \"missing.glsl\"\n");

    let hlsl = parser().parse_hlsl(&path);
    let glsl = parser().parse_glsl(&path);

    assert_eq!(hlsl, glsl);
    assert_matches!(
        hlsl,
        Err(Error { kind: ErrorKind::FileNotFound, path: error_path })
            if error_path == dir.path().join("missing.glsl")
    );
}

#[test]
fn test_combined_shader_parser_parse_when_block_spans_included_file_should_return_error() {
    let dir = given::temp_dir();
    dir.file("open.glsl", "#glsl{\nvec3 a;\n");
    let path = dir.file("main.glsl", "#include \"open.glsl\"\n");

    let source = parser().parse_glsl(&path);

    // The block is only checked once includes are expanded, so the error points at the
    // requested file.
    assert_matches!(
        source,
        Err(Error { kind: ErrorKind::MissingClosingCurlyBracket { .. }, path: error_path })
            if error_path == path
    );
}

#[test]
fn test_combined_shader_parser_default_should_not_process_push_constants() {
    let dir = given::temp_dir();
    let path = dir.file("main.glsl", "#additional_push_constants\n{\n}\n");

    let source = CombinedShaderParser::default().parse_glsl(&path);

    assert_matches!(source, Ok(source) if source == "#additional_push_constants\n{\n}\n");
    assert!(
        !CombinedShaderParser::default()
            .includer()
            .options()
            .additional_push_constants
    );
}

#[test]
fn test_combined_shader_parser_parse_when_called_concurrently_should_match_sequential() {
    let dir = given::temp_dir();
    dir.file("bindings.glsl", BINDINGS);
    let path = dir.file("mesh.frag.glsl", FRAGMENT_SHADER);
    let parser = parser();

    let (hlsl, glsl) = std::thread::scope(|scope| {
        let hlsl = scope.spawn(|| parser.parse_hlsl(&path));
        let glsl = scope.spawn(|| parser.parse_glsl(&path));

        (
            hlsl.join().expect("HLSL thread"),
            glsl.join().expect("GLSL thread"),
        )
    });

    assert_eq!(hlsl, parser.parse_hlsl(&path));
    assert_eq!(glsl, parser.parse_glsl(&path));
}
