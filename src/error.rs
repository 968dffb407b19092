use std::fmt;

use crate::postscript::PostScriptError;

#[derive(Debug)]
pub enum ParseError {
    /// A `Domain` or `Range` that isn't a non-empty list of `[min max]` pairs
    InvalidInterval {
        key: &'static str,
        found: Vec<f32>,
    },
    MismatchedInputCount {
        expected: usize,
        found: usize,
    },

    /// The program left fewer values on the stack than the function has outputs
    TooFewOutputs {
        expected: usize,
        found: usize,
    },
    UnrecognizedVariant {
        found: String,
        ty: &'static str,
    },
    PostScriptError(PostScriptError),
}

impl From<PostScriptError> for ParseError {
    fn from(err: PostScriptError) -> Self {
        Self::PostScriptError(err)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInterval { key, found } => {
                write!(f, "invalid value for /{}: {:?}", key, found)
            }
            Self::MismatchedInputCount { expected, found } => {
                write!(f, "expected {} inputs, found {}", expected, found)
            }
            Self::TooFewOutputs { expected, found } => write!(
                f,
                "expected {} outputs on the stack, found {}",
                expected, found
            ),
            Self::UnrecognizedVariant { found, ty } => {
                write!(f, "unrecognized variant {:?} for {}", found, ty)
            }
            Self::PostScriptError(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ParseError {}

pub type PdfResult<T> = anyhow::Result<T>;
