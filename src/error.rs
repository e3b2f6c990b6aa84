use std::path::PathBuf;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error("no usable font pair found, searched: {}", display_paths(.searched))]
    /// None of the candidate font files exist
    FontNotFound { searched: Vec<PathBuf> },

    #[error("PDF object reference {0} was never allocated")]
    /// An object was written before the object it refers to
    MissingReference(&'static str),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
