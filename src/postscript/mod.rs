//! The restricted PostScript dialect used by type 4 functions: numbers, a
//! fixed set of operators, and procedures that only appear as the bodies of
//! `if` and `ifelse`

pub use self::{
    engine::PostScriptEngine,
    error::{PostScriptError, PostScriptResult},
    operator::{OpCode, PostScriptFunctionOperator},
    procedure::{Operation, Procedure, MAX_DEPTH},
    stack::{OperandStack, STACK_CAPACITY},
};

mod engine;
mod error;
mod interpreter;
mod operator;
mod procedure;
mod stack;
