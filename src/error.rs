use std::path::{Path, PathBuf};

use thiserror::Error;

/// The error type for [`ShaderIncluder`](crate::ShaderIncluder) and
/// [`CombinedShaderParser`](crate::CombinedShaderParser).
///
/// The path is the file where the error originated, which may be a file included
/// (directly or transitively) by the one that was requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (file: {})", .path.display())]
pub struct Error {
    pub kind: ErrorKind,
    pub path: PathBuf,
}

impl Error {
    /// Create a new error for the file at `path`.
    pub fn new(kind: ErrorKind, path: impl AsRef<Path>) -> Self {
        Self {
            kind,
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// The kind of [`Error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("file does not exist")]
    FileNotFound,
    #[error("path is a directory, not a file")]
    PathIsNotAFile,
    #[error("path has no parent directory")]
    PathHasNoParentPath,
    #[error("failed to open file: {0}")]
    CantOpenFile(String),
    #[error("failed to read file: {0}")]
    CantReadFile(String),
    #[error("expected a quoted path after `#include`")]
    NothingAfterInclude,
    #[error("expected a space after `#include`")]
    NoSpaceAfterKeyword,
    #[error("include path is not enclosed in double quotes")]
    MissingQuotes,
    #[error("expected `{{` on the line after `{keyword}`")]
    MissingStartingCurlyBracketAfterKeyword { keyword: String },
    #[error("additional push constants were declared but no `layout(push_constant)` struct was found")]
    NoPushConstantsStruct,
    #[error("no closing `}}` found after `layout(push_constant)`")]
    NoClosingBracketOnPushConstants,
    #[error("`{keyword}` block is missing its closing `}}` line")]
    MissingClosingCurlyBracket { keyword: String },
    #[error("`#additional_push_constants` block is missing its closing `}}` line")]
    UnclosedAdditionalPushConstants,
    #[error("file includes itself (directly or through other includes)")]
    CyclicInclude,
}
