use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use itertools::Itertools;

use crate::{Error, ErrorKind};

/// How the closing `}` of the push constants struct is located when splicing
/// additional push constants.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SpliceScan {
    /// The first `}` after the `layout(push_constant)` anchor.
    ///
    /// Nested braces inside the struct body move the splice point to the inner `}`.
    #[default]
    FirstClosingBrace,

    /// The `}` that brings the brace depth counted from the anchor back to zero.
    BraceDepth,
}

/// The options of [`ShaderIncluder`].
#[derive(Debug, Default, Clone)]
pub struct IncludeOptions {
    /// Whether `#additional_push_constants` blocks are collected and spliced into the
    /// `layout(push_constant)` struct.
    ///
    /// When disabled, the keyword has no meaning and such lines are kept as is.
    pub additional_push_constants: bool,

    /// How the push constants struct's closing brace is located.
    pub splice_scan: SpliceScan,
}

impl IncludeOptions {
    /// Enable or disable the `#additional_push_constants` keyword.
    pub fn additional_push_constants(mut self, enabled: bool) -> Self {
        self.additional_push_constants = enabled;
        self
    }

    /// Set the [`SpliceScan`].
    pub fn splice_scan(mut self, splice_scan: SpliceScan) -> Self {
        self.splice_scan = splice_scan;
        self
    }
}

/// State of the `#additional_push_constants` block while reading a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PushConstantsState {
    Idle,
    ExpectingOpeningBracket,
    Collecting,
}

/// Expands `#include "relative/path"` directives of a shader source file recursively.
///
/// Each file is read line by line:
/// - A line containing `#include` is replaced by the expanded content of the included
///   file, whose path is relative to the including file's directory.
/// - If enabled in [`IncludeOptions`], lines of an `#additional_push_constants` block are
///   removed and inserted into the `layout(push_constant)` struct once the file is read.
/// - Any other line is copied followed by a newline.
///
/// Included files are not cached, a file included twice is expanded twice. A file that
/// includes itself, directly or through other files, results in
/// [`ErrorKind::CyclicInclude`].
#[derive(Debug, Default, Clone)]
pub struct ShaderIncluder {
    options: IncludeOptions,
}

impl ShaderIncluder {
    /// The include directive keyword.
    pub const INCLUDE_KEYWORD: &'static str = "#include";

    /// The keyword of a block of fields to append to the push constants struct.
    pub const ADDITIONAL_PUSH_CONSTANTS_KEYWORD: &'static str = "#additional_push_constants";

    /// The token marking the start of the push constants struct.
    pub const PUSH_CONSTANTS_ANCHOR: &'static str = "layout(push_constant)";

    /// Create a new includer.
    pub fn new(options: IncludeOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &IncludeOptions {
        &self.options
    }

    /// Expand the file at `path` with all of its includes.
    pub fn expand(&self, path: impl AsRef<Path>) -> Result<String, Error> {
        let mut in_progress = Vec::new();
        self.expand_file(path.as_ref(), &mut in_progress)
    }

    /// Expand a single file.
    ///
    /// `in_progress` holds the canonical paths of the files currently being expanded,
    /// from the top-level file down to the includer of `path`.
    fn expand_file(&self, path: &Path, in_progress: &mut Vec<PathBuf>) -> Result<String, Error> {
        if !path.exists() {
            return Err(Error::new(ErrorKind::FileNotFound, path));
        }

        if path.is_dir() {
            return Err(Error::new(ErrorKind::PathIsNotAFile, path));
        }

        let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) else {
            return Err(Error::new(ErrorKind::PathHasNoParentPath, path));
        };

        let canonical_path = path
            .canonicalize()
            .map_err(|e| Error::new(ErrorKind::CantOpenFile(e.to_string()), path))?;

        if in_progress.contains(&canonical_path) {
            return Err(Error::new(ErrorKind::CyclicInclude, path));
        }

        let file =
            File::open(path).map_err(|e| Error::new(ErrorKind::CantOpenFile(e.to_string()), path))?;

        log::debug!("Expanding includes of {}", path.display());

        in_progress.push(canonical_path);
        let result = self.expand_lines(path, parent, BufReader::new(file), in_progress);
        in_progress.pop();

        result
    }

    fn expand_lines(
        &self,
        path: &Path,
        parent: &Path,
        reader: impl BufRead,
        in_progress: &mut Vec<PathBuf>,
    ) -> Result<String, Error> {
        let mut source = String::new();
        let mut push_constants = Vec::new();
        let mut state = PushConstantsState::Idle;

        for line in reader.lines() {
            let line =
                line.map_err(|e| Error::new(ErrorKind::CantReadFile(e.to_string()), path))?;

            if self.options.additional_push_constants {
                match state {
                    PushConstantsState::Idle
                        if line.starts_with(Self::ADDITIONAL_PUSH_CONSTANTS_KEYWORD) =>
                    {
                        state = PushConstantsState::ExpectingOpeningBracket;
                        continue;
                    }
                    PushConstantsState::Idle => {}
                    PushConstantsState::ExpectingOpeningBracket => {
                        if !line.starts_with('{') {
                            return Err(Self::missing_opening_bracket_error(path));
                        }

                        state = PushConstantsState::Collecting;
                        continue;
                    }
                    PushConstantsState::Collecting => {
                        if line.starts_with('}') {
                            state = PushConstantsState::Idle;
                        } else {
                            push_constants.push(line);
                        }
                        continue;
                    }
                }
            }

            let Some(keyword_pos) = line.find(Self::INCLUDE_KEYWORD) else {
                source.push_str(&line);
                source.push('\n');
                continue;
            };

            let relative_path =
                Self::parse_include_path(&line[keyword_pos + Self::INCLUDE_KEYWORD.len()..])
                    .map_err(|kind| Error::new(kind, path))?;

            source.push_str(&self.expand_file(&parent.join(relative_path), in_progress)?);
        }

        match state {
            PushConstantsState::Idle => {}
            PushConstantsState::ExpectingOpeningBracket => {
                return Err(Self::missing_opening_bracket_error(path));
            }
            PushConstantsState::Collecting => {
                return Err(Error::new(ErrorKind::UnclosedAdditionalPushConstants, path));
            }
        }

        if !push_constants.is_empty() {
            log::debug!(
                "Inserting {} additional push constants of {}",
                push_constants.len(),
                path.display()
            );

            Self::insert_push_constants(&mut source, &push_constants, self.options.splice_scan)
                .map_err(|kind| Error::new(kind, path))?;
        }

        Ok(source)
    }

    /// Parse the text after the include keyword, which must be ` "relative/path"`.
    fn parse_include_path(after_keyword: &str) -> Result<&str, ErrorKind> {
        if after_keyword.len() < 2 {
            return Err(ErrorKind::NothingAfterInclude);
        }

        let Some(quoted) = after_keyword.strip_prefix(' ') else {
            return Err(ErrorKind::NoSpaceAfterKeyword);
        };

        quoted
            .strip_prefix('"')
            .and_then(|path| path.strip_suffix('"'))
            .ok_or(ErrorKind::MissingQuotes)
    }

    /// Insert `push_constants` right before the closing `}` of the push constants struct.
    fn insert_push_constants(
        source: &mut String,
        push_constants: &[String],
        splice_scan: SpliceScan,
    ) -> Result<(), ErrorKind> {
        let anchor_pos = source
            .find(Self::PUSH_CONSTANTS_ANCHOR)
            .ok_or(ErrorKind::NoPushConstantsStruct)?;

        let struct_source = &source[anchor_pos..];
        let closing_pos = match splice_scan {
            SpliceScan::FirstClosingBrace => struct_source.find('}'),
            SpliceScan::BraceDepth => find_depth_closing_brace(struct_source),
        }
        .ok_or(ErrorKind::NoClosingBracketOnPushConstants)?;

        let fields = push_constants
            .iter()
            .map(|field| {
                if field.ends_with('\n') {
                    field.clone()
                } else {
                    format!("{field}\n")
                }
            })
            .join("");

        source.insert_str(anchor_pos + closing_pos, &fields);

        Ok(())
    }

    fn missing_opening_bracket_error(path: &Path) -> Error {
        Error::new(
            ErrorKind::MissingStartingCurlyBracketAfterKeyword {
                keyword: Self::ADDITIONAL_PUSH_CONSTANTS_KEYWORD.to_string(),
            },
            path,
        )
    }
}

/// Find the `}` closing the first `{` in `text`.
///
/// A `}` before any `{` is returned as is.
fn find_depth_closing_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;

    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' if depth <= 1 => return Some(i),
            '}' => depth -= 1,
            _ => {}
        }
    }

    None
}
