use calculator_macro::keyword_enum;

/// The operators available to a type 4 function. This is a strict subset of
/// the PostScript language; anything outside of it is not an operator
#[keyword_enum]
pub enum PostScriptFunctionOperator {
    // Arithmetic
    /// num1 num2 `add` sum
    Add = "add",

    /// returns the result of subtracting num2 from num1
    ///
    /// num1 num2 `sub` difference
    Sub = "sub",

    /// num1 num2 `mul` product
    Mul = "mul",

    /// divides num1 by num2, producing a real result
    ///
    /// num1 num2 `div` quotient
    Div = "div",

    /// divides int1 by int2 and returns the integer part of the quotient, with
    /// any fractional part discarded
    ///
    /// int1 int2 `idiv` quotient
    Idiv = "idiv",

    /// returns the remainder that results from dividing int1 by int2. The sign
    /// of the result is the same as the sign of the dividend int1
    ///
    /// int1 int2 `mod` remainder
    Mod = "mod",

    Neg = "neg",
    Abs = "abs",
    Ceiling = "ceiling",
    Floor = "floor",

    /// returns the integer value nearest to num1. If num1 is equally close to
    /// its two nearest integers, the one further from zero is returned
    Round = "round",

    Truncate = "truncate",
    Sqrt = "sqrt",

    /// angle is in degrees
    Sin = "sin",

    /// angle is in degrees
    Cos = "cos",

    /// returns the angle (in degrees between 0 and 360) whose tangent is
    /// num/den
    ///
    /// num den `atan` angle
    Atan = "atan",

    /// raises base to the exponent power
    ///
    /// base exponent `exp` real
    Exp = "exp",

    /// natural logarithm
    Ln = "ln",

    /// base 10 logarithm
    Log = "log",

    Cvi = "cvi",
    Cvr = "cvr",

    // Relational, boolean, and bitwise
    Eq = "eq",
    Ne = "ne",

    /// any1 any2 `gt` bool
    Gt = "gt",
    Ge = "ge",
    Lt = "lt",
    Le = "le",
    And = "and",
    Or = "or",
    Xor = "xor",
    Not = "not",

    /// shifts the binary representation of int1 left by shift bits and
    /// returns the result. Bits shifted out are lost; bits shifted in are 0.
    /// If shift is negative, a right shift by −shift bits is performed
    ///
    /// int1 shift `bitshift` int2
    Bitshift = "bitshift",

    True = "true",
    False = "false",

    // Conditional
    /// bool proc `if` –
    If = "if",

    /// bool proc1 proc2 `ifelse` –
    IfElse = "ifelse",

    // Stack
    Pop = "pop",
    Exch = "exch",
    Dup = "dup",

    /// performs two entirely different functions, depending on the type of the
    /// topmost operand. In a type 4 function only the first form exists: when
    /// the top element on the operand stack is a nonnegative integer n, copy
    /// pops n and then duplicates the top n elements on the stack
    ///
    /// any1 … anyn n `copy` any1 … anyn any1 … anyn
    Copy = "copy",

    /// removes the nonnegative integer n from the operand stack, counts down to
    /// the nth element from the top of the stack, and pushes a copy of that
    /// element on the stack
    ///
    /// anyn … any0 n `index` anyn … any0 anyn
    Index = "index",

    /// performs a circular shift of the objects anyn−1 through any0 on the
    /// operand stack by the amount j. Positive j indicates upward motion on
    /// the stack, whereas negative j indicates downward motion
    ///
    /// anyn−1 … any0 n j `roll` any(j−1) mod n … any0 anyn−1 … anyj mod n
    Roll = "roll",
}

/// The operation code of a node in a parsed calculator program.
///
/// `Constant` and `Procedure` are structural markers only. They can never be
/// dispatched, because dispatch accepts a [`PostScriptFunctionOperator`]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum OpCode {
    Operator(PostScriptFunctionOperator),
    Constant,
    Procedure,
}

impl From<PostScriptFunctionOperator> for OpCode {
    fn from(op: PostScriptFunctionOperator) -> Self {
        Self::Operator(op)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_keyword_round_trips() {
        for &op in PostScriptFunctionOperator::ALL {
            assert_eq!(
                PostScriptFunctionOperator::from_keyword(op.keyword().as_bytes()),
                Some(op)
            );
        }
    }

    #[test]
    fn vocabulary_size() {
        assert_eq!(PostScriptFunctionOperator::ALL.len(), 42);
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(
            PostScriptFunctionOperator::from_keyword(b"add"),
            Some(PostScriptFunctionOperator::Add)
        );
        assert_eq!(PostScriptFunctionOperator::from_keyword(b"Add"), None);
        assert_eq!(PostScriptFunctionOperator::from_keyword(b"ADD"), None);
        assert_eq!(PostScriptFunctionOperator::from_keyword(b"ifelse "), None);
        assert_eq!(PostScriptFunctionOperator::from_keyword(b""), None);
    }

    #[test]
    fn display_is_keyword() {
        assert_eq!(PostScriptFunctionOperator::IfElse.to_string(), "ifelse");
        assert_eq!(PostScriptFunctionOperator::Bitshift.to_string(), "bitshift");
    }
}
