//! This example parses a combined shader file and prints the source for one dialect.
//!
//! Run with:
//!
//! ```sh
//! cargo run --example preprocess -- "path/to/shader.glsl" hlsl
//! ```

use combined_shader_language::{CombinedShaderParser, IncludeOptions, ShaderDialect};

fn main() {
    let mut args = std::env::args().skip(1);

    let shader_path = args
        .next()
        .unwrap_or_else(|| "demos/shader.glsl".to_string());

    let dialect = args
        .next()
        .map(|dialect| dialect.parse::<ShaderDialect>().expect("dialect"))
        .unwrap_or(ShaderDialect::Hlsl);

    let parser = CombinedShaderParser::new(
        IncludeOptions::default().additional_push_constants(true),
    );

    println!("Parsing {shader_path} as {dialect}");

    match parser.parse(&shader_path, dialect) {
        Ok(source) => println!("{source}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
