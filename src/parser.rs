use std::path::Path;

use crate::{
    Error, ErrorKind, IncludeOptions, ShaderDialect, ShaderIncluder, convert_glsl_types_to_hlsl,
};

/// The form of a keyword code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeywordBlockForm<'a> {
    /// `#keyword CODE`, the code is the whole body.
    SingleLine(&'a str),

    /// `#keyword{` followed by body lines and a `}` line.
    InlineBrace,

    /// `#keyword` followed by a `{` line, body lines and a `}` line.
    NextLineBrace,
}

impl<'a> KeywordBlockForm<'a> {
    /// Recognize the block form of `line` for `keyword`.
    ///
    /// Returns [`None`] if `line` does not start a block of `keyword`.
    fn recognize(line: &'a str, keyword: &str) -> Option<Self> {
        let after_keyword = line.strip_prefix(keyword)?;

        match after_keyword.trim() {
            "" => return Some(Self::NextLineBrace),
            "{" => return Some(Self::InlineBrace),
            _ => {}
        }

        match after_keyword.strip_prefix(' ') {
            Some(code) => Some(Self::SingleLine(code)),
            None => {
                log::warn!("Treating \"{line}\" as shared code, expected a space after {keyword}");
                None
            }
        }
    }
}

/// Parser of combined shader sources.
///
/// A combined shader source is a shader file with includes (see [`ShaderIncluder`]) where
/// code only meant for one dialect is tagged with the dialect keyword:
///
/// ```glsl
/// #hlsl float4 main() : SV_Target   // single line
///
/// #glsl{                            // curly bracket on the same line
///     layout(location = 0) out vec4 color;
/// }
///
/// #glsl                             // curly bracket on the next line
/// {
///     void main()
/// }
/// ```
///
/// Untagged code is shared by both dialects. Parsing for HLSL additionally replaces GLSL
/// vector and matrix type names with HLSL ones.
#[derive(Debug, Default, Clone)]
pub struct CombinedShaderParser {
    includer: ShaderIncluder,
}

impl CombinedShaderParser {
    /// Create a new parser.
    pub fn new(options: IncludeOptions) -> Self {
        Self {
            includer: ShaderIncluder::new(options),
        }
    }

    /// Get the includer.
    pub fn includer(&self) -> &ShaderIncluder {
        &self.includer
    }

    /// Parse the file at `path` as HLSL, `#glsl` code is removed.
    pub fn parse_hlsl(&self, path: impl AsRef<Path>) -> Result<String, Error> {
        self.parse(path, ShaderDialect::Hlsl)
    }

    /// Parse the file at `path` as GLSL, `#hlsl` code is removed.
    pub fn parse_glsl(&self, path: impl AsRef<Path>) -> Result<String, Error> {
        self.parse(path, ShaderDialect::Glsl)
    }

    /// Parse the file at `path` as `dialect`.
    ///
    /// Includes are expanded first, then the combined source is filtered by
    /// [`CombinedShaderParser::filter`].
    pub fn parse(&self, path: impl AsRef<Path>, dialect: ShaderDialect) -> Result<String, Error> {
        let path = path.as_ref();

        let source = self.includer.expand(path)?;
        let parsed = Self::filter(&source, dialect, path)?;

        log::info!("Parsed {} as {dialect}", path.display());

        Ok(parsed)
    }

    /// Filter the already expanded `source` for `dialect`.
    ///
    /// `path` is only used for errors.
    pub fn filter(
        source: &str,
        dialect: ShaderDialect,
        path: impl AsRef<Path>,
    ) -> Result<String, Error> {
        let path = path.as_ref();
        let mut output = String::new();
        let mut lines = source.lines();

        while let Some(line) = lines.next() {
            if let Some(form) = KeywordBlockForm::recognize(line, dialect.keyword()) {
                Self::process_keyword_block(form, dialect, &mut lines, path, |code| {
                    output.push_str(code);
                    output.push('\n');
                })?;
                continue;
            }

            if let Some(form) = KeywordBlockForm::recognize(line, dialect.other().keyword()) {
                Self::process_keyword_block(form, dialect.other(), &mut lines, path, |_| {})?;
                continue;
            }

            output.push_str(line);
            output.push('\n');
        }

        Ok(match dialect {
            ShaderDialect::Hlsl => convert_glsl_types_to_hlsl(&output),
            ShaderDialect::Glsl => output,
        })
    }

    /// Pass the body of a keyword block to `process_content` line by line.
    ///
    /// `lines` is advanced past the end of the block.
    fn process_keyword_block<'a>(
        form: KeywordBlockForm<'_>,
        dialect: ShaderDialect,
        lines: &mut impl Iterator<Item = &'a str>,
        path: &Path,
        mut process_content: impl FnMut(&str),
    ) -> Result<(), Error> {
        let keyword = dialect.keyword();

        match form {
            KeywordBlockForm::SingleLine(code) => {
                process_content(code);
                return Ok(());
            }
            KeywordBlockForm::InlineBrace => {}
            KeywordBlockForm::NextLineBrace => {
                if lines.next().map(str::trim) != Some("{") {
                    return Err(Error::new(
                        ErrorKind::MissingStartingCurlyBracketAfterKeyword {
                            keyword: keyword.to_string(),
                        },
                        path,
                    ));
                }
            }
        }

        log::debug!("Processing {dialect} block in {}", path.display());

        for line in lines.by_ref() {
            if line.trim_end() == "}" {
                return Ok(());
            }

            process_content(line);
        }

        Err(Error::new(
            ErrorKind::MissingClosingCurlyBracket {
                keyword: keyword.to_string(),
            },
            path,
        ))
    }
}
