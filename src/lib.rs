pub use crate::{
    error::{ParseError, PdfResult},
    filter::FilterKind,
    function::PostScriptCalculatorFunction,
    postscript::{PostScriptEngine, PostScriptError},
};

pub mod filter;
pub mod function;
pub mod lex;
pub mod postscript;

mod error;
