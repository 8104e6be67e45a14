//! Error types for the text codec

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("cannot read source {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create sink {}: {source}", .path.display())]
    SinkUncreatable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed codebook line {line}: {content:?}")]
    MalformedCodebook { line: usize, content: String },

    #[error("codebook delimiter line not found")]
    MissingDelimiter,

    #[error("code token {token:?} at position {position} has no codebook entry")]
    UnmatchedToken { position: usize, token: String },

    #[error("prefix-code tree does not hold exactly one path to {ch:?}")]
    BrokenTree { ch: char },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
