use crate::lex::{parse_number_lossy, WordLexer, WordSource};

use super::{
    error::{PostScriptError, PostScriptResult},
    interpreter::to_int,
    operator::{OpCode, PostScriptFunctionOperator},
    stack::OperandStack,
};

/// How deeply procedures may nest below the outermost one
pub const MAX_DEPTH: usize = 128;

/// A single node of a parsed calculator program
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Operator(PostScriptFunctionOperator),
    Constant(f32),

    /// Only ever run as the body of an `if` or `ifelse` immediately after it
    Procedure(Procedure),
}

impl Default for Operation {
    fn default() -> Self {
        Self::Procedure(Procedure::new())
    }
}

impl Operation {
    pub fn op_code(&self) -> OpCode {
        match self {
            Self::Operator(op) => OpCode::Operator(*op),
            Self::Constant(..) => OpCode::Constant,
            Self::Procedure(..) => OpCode::Procedure,
        }
    }

    /// `0.0` for anything but a constant
    pub fn float_value(&self) -> f32 {
        match self {
            Self::Constant(n) => *n,
            _ => 0.0,
        }
    }

    pub fn procedure(&self) -> Option<&Procedure> {
        match self {
            Self::Procedure(proc) => Some(proc),
            _ => None,
        }
    }
}

/// A brace delimited sequence of operations, in program order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Procedure {
    operations: Vec<Operation>,
}

impl Procedure {
    pub const fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    /// Parses a whole program, which must be wrapped in a single outer
    /// procedure. Anything after the outer procedure's `}` is ignored
    pub fn parse_program(buffer: &[u8]) -> PostScriptResult<Self> {
        Self::from_words(&mut WordLexer::new(buffer))
    }

    pub fn from_words<'a>(words: &mut impl WordSource<'a>) -> PostScriptResult<Self> {
        if words.next_word() != b"{" {
            return Err(PostScriptError::MissingProcedureStart);
        }

        let mut proc = Self::new();
        proc.parse(words, 0)?;

        Ok(proc)
    }

    /// Parses operations until the `}` closing this procedure, assuming its `{`
    /// has already been consumed
    pub fn parse<'a>(
        &mut self,
        words: &mut impl WordSource<'a>,
        depth: usize,
    ) -> PostScriptResult<()> {
        if depth > MAX_DEPTH {
            return Err(PostScriptError::ExecStackOverflow);
        }

        loop {
            match words.next_word() {
                b"" => return Err(PostScriptError::UnterminatedProcedure),
                b"}" => return Ok(()),
                b"{" => {
                    let mut proc = Procedure::new();
                    proc.parse(words, depth + 1)?;

                    self.operations.push(Operation::Procedure(proc));
                }
                word => self.operations.push(
                    match PostScriptFunctionOperator::from_keyword(word) {
                        Some(op) => Operation::Operator(op),
                        None => Operation::Constant(parse_number_lossy(word)),
                    },
                ),
            }
        }
    }

    /// Runs the procedure against `stack`.
    ///
    /// Fails only when an `if` or `ifelse` in this procedure is missing the
    /// procedures it needs directly before it. Nothing is checked ahead of
    /// time, so operations before the malformed conditional will already have
    /// run. A branch that fails stops early but does not fail its parent
    pub fn execute(&self, stack: &mut OperandStack) -> PostScriptResult<()> {
        for (i, operation) in self.operations.iter().enumerate() {
            match operation {
                Operation::Procedure(..) => {}
                Operation::Constant(n) => stack.push(*n),
                Operation::Operator(PostScriptFunctionOperator::If) => {
                    let [.., Operation::Procedure(proc)] = &self.operations[..i] else {
                        return Err(PostScriptError::IfWithoutProcedure);
                    };

                    if to_int(stack.pop()) != 0 {
                        proc.execute_branch(stack);
                    }
                }
                Operation::Operator(PostScriptFunctionOperator::IfElse) => {
                    let [.., Operation::Procedure(proc_one), Operation::Procedure(proc_two)] =
                        &self.operations[..i]
                    else {
                        return Err(PostScriptError::IfElseWithoutProcedures);
                    };

                    let proc = if to_int(stack.pop()) != 0 {
                        proc_one
                    } else {
                        proc_two
                    };

                    proc.execute_branch(stack);
                }
                Operation::Operator(op) => stack.do_operator(*op),
            }
        }

        Ok(())
    }

    fn execute_branch(&self, stack: &mut OperandStack) {
        if let Err(err) = self.execute(stack) {
            log::warn!("conditional branch stopped early: {}", err);
        }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
