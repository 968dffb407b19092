use std::fmt;

pub type PostScriptResult<T> = Result<T, PostScriptError>;

/// Structural failures of a calculator program.
///
/// Numeric problems (division by zero, stack underflow, out of range indices)
/// never surface here; operators degrade to a safe value instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostScriptError {
    /// The program did not start with `{`
    MissingProcedureStart,

    /// Input ended before the matching `}`
    UnterminatedProcedure,

    /// Procedures nested too deep
    ExecStackOverflow,

    /// `if` not immediately preceded by a procedure
    IfWithoutProcedure,

    /// `ifelse` not immediately preceded by two procedures
    IfElseWithoutProcedures,
}

impl fmt::Display for PostScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingProcedureStart => "calculator program must begin with `{`",
            Self::UnterminatedProcedure => "unterminated procedure",
            Self::ExecStackOverflow => "procedures nested too deep",
            Self::IfWithoutProcedure => "`if` is not preceded by a procedure",
            Self::IfElseWithoutProcedures => "`ifelse` is not preceded by two procedures",
        })
    }
}

impl std::error::Error for PostScriptError {}
