use crate::lex::{WordLexer, WordSource};

use super::{
    error::PostScriptResult, operator::PostScriptFunctionOperator, procedure::Procedure,
    stack::OperandStack,
};

/// Evaluates a type 4 function program.
///
/// A program is parsed once and may then be executed any number of times.
/// Inputs are pushed before each [`PostScriptEngine::execute`] and outputs
/// popped afterwards; the parsed program is never modified by execution
#[derive(Debug, Clone, Default)]
pub struct PostScriptEngine {
    main_proc: Procedure,
    stack: OperandStack,
}

impl PostScriptEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current program with the one in `buffer`. On failure the
    /// engine is left with an empty program
    pub fn parse(&mut self, buffer: &[u8]) -> PostScriptResult<()> {
        self.parse_words(&mut WordLexer::new(buffer))
    }

    pub fn parse_words<'a>(&mut self, words: &mut impl WordSource<'a>) -> PostScriptResult<()> {
        self.main_proc = Procedure::new();

        match Procedure::from_words(words) {
            Ok(proc) => {
                log::debug!("parsed calculator program with {} operations", proc.len());
                self.main_proc = proc;

                Ok(())
            }
            Err(err) => {
                log::warn!("failed to parse calculator program: {}", err);

                Err(err)
            }
        }
    }

    /// Runs the program once against the current stack
    pub fn execute(&mut self) -> PostScriptResult<()> {
        self.main_proc.execute(&mut self.stack).map_err(|err| {
            log::warn!("failed to execute calculator program: {}", err);
            err
        })
    }

    pub fn do_operator(&mut self, op: PostScriptFunctionOperator) {
        self.stack.do_operator(op);
    }

    /// Silently dropped if the stack is full
    pub fn push(&mut self, value: f32) {
        self.stack.push(value);
    }

    /// `0.0` if the stack is empty
    pub fn pop(&mut self) -> f32 {
        self.stack.pop()
    }

    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    pub fn stack(&self) -> &OperandStack {
        &self.stack
    }

    /// Clears the stack, keeping the parsed program
    pub fn reset(&mut self) {
        self.stack.clear();
    }

    pub fn program(&self) -> &Procedure {
        &self.main_proc
    }
}
