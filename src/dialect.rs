/// The shader dialects a combined shader source can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderDialect {
    /// HLSL, tagged by `#hlsl`.
    ///
    /// Retained code has its GLSL vector and matrix type names translated,
    /// see [`convert_glsl_types_to_hlsl`](crate::convert_glsl_types_to_hlsl).
    Hlsl,

    /// GLSL (Vulkan flavored), tagged by `#glsl`.
    Glsl,
}

impl ShaderDialect {
    /// Get the keyword that tags a code line or block of this dialect.
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Hlsl => "#hlsl",
            Self::Glsl => "#glsl",
        }
    }

    /// Get the other dialect.
    pub const fn other(&self) -> Self {
        match self {
            Self::Hlsl => Self::Glsl,
            Self::Glsl => Self::Hlsl,
        }
    }

    /// Get the human readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Hlsl => "HLSL",
            Self::Glsl => "GLSL",
        }
    }
}

impl std::fmt::Display for ShaderDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ShaderDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hlsl" => Ok(Self::Hlsl),
            "glsl" => Ok(Self::Glsl),
            _ => Err(format!("unknown shader dialect: {s}")),
        }
    }
}
