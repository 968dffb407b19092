use std::ops::{Add, Div, Mul, Neg, Sub};

use super::{operator::PostScriptFunctionOperator, stack::OperandStack};

/// Converts an operand to an integer: truncated toward zero, saturating at the
/// bounds of `i32`, with NaN becoming 0
pub(crate) fn to_int(n: f32) -> i32 {
    n as i32
}

/// Done in single precision, so `180 sin` is the sine of `f32` pi rather than
/// exactly zero
fn degrees_to_radians(n: f32) -> f32 {
    n * std::f32::consts::PI / 180.0
}

fn bool_to_real(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Operator methods
impl OperandStack {
    /// Runs a single operator against the stack. Every operator is total: bad
    /// operands produce `0` or leave the stack untouched, they never fail
    pub fn do_operator(&mut self, op: PostScriptFunctionOperator) {
        log::trace!("executing `{}` with {} operands", op, self.len());

        match op {
            PostScriptFunctionOperator::Add => self.arith(f32::add),
            PostScriptFunctionOperator::Sub => self.arith(f32::sub),
            PostScriptFunctionOperator::Mul => self.arith(f32::mul),
            PostScriptFunctionOperator::Div => self.arith(f32::div),
            PostScriptFunctionOperator::Idiv => self.int_arith(i32::checked_div),
            PostScriptFunctionOperator::Mod => self.int_arith(i32::checked_rem),
            PostScriptFunctionOperator::Neg => self.float_op(f32::neg),
            PostScriptFunctionOperator::Abs => self.float_op(f32::abs),
            PostScriptFunctionOperator::Ceiling => self.float_op(f32::ceil),
            PostScriptFunctionOperator::Floor => self.float_op(f32::floor),
            PostScriptFunctionOperator::Round => self.float_op(|n| to_int(n.round()) as f32),
            PostScriptFunctionOperator::Truncate | PostScriptFunctionOperator::Cvi => {
                self.float_op(|n| to_int(n) as f32)
            }
            PostScriptFunctionOperator::Sqrt => self.float_op(f32::sqrt),
            PostScriptFunctionOperator::Sin => {
                self.float_op(|n| f64::from(degrees_to_radians(n)).sin() as f32)
            }
            PostScriptFunctionOperator::Cos => {
                self.float_op(|n| f64::from(degrees_to_radians(n)).cos() as f32)
            }
            PostScriptFunctionOperator::Atan => self.atan(),
            PostScriptFunctionOperator::Exp => self.arith(f32::powf),
            PostScriptFunctionOperator::Ln => self.float_op(f32::ln),
            PostScriptFunctionOperator::Log => self.float_op(f32::log10),
            PostScriptFunctionOperator::Cvr => {}
            PostScriptFunctionOperator::Eq => self.cmp(|a, b| a == b),
            PostScriptFunctionOperator::Ne => self.cmp(|a, b| a != b),
            PostScriptFunctionOperator::Gt => self.cmp(|a, b| a > b),
            PostScriptFunctionOperator::Ge => self.cmp(|a, b| a >= b),
            PostScriptFunctionOperator::Lt => self.cmp(|a, b| a < b),
            PostScriptFunctionOperator::Le => self.cmp(|a, b| a <= b),
            PostScriptFunctionOperator::And => self.bitwise(|a, b| a & b),
            PostScriptFunctionOperator::Or => self.bitwise(|a, b| a | b),
            PostScriptFunctionOperator::Xor => self.bitwise(|a, b| a ^ b),
            PostScriptFunctionOperator::Not => {
                let i = to_int(self.pop());
                self.push(bool_to_real(i == 0));
            }
            PostScriptFunctionOperator::Bitshift => self.bitshift(),
            PostScriptFunctionOperator::True => self.push(1.0),
            PostScriptFunctionOperator::False => self.push(0.0),
            PostScriptFunctionOperator::Pop => {
                self.pop();
            }
            PostScriptFunctionOperator::Exch => self.exch(),
            PostScriptFunctionOperator::Dup => self.dup(),
            PostScriptFunctionOperator::Copy => self.copy(),
            PostScriptFunctionOperator::Index => self.index(),
            PostScriptFunctionOperator::Roll => self.roll(),
            // the procedure walk handles these, since only it can see the
            // procedures preceding them
            PostScriptFunctionOperator::If | PostScriptFunctionOperator::IfElse => {}
        }
    }

    fn arith(&mut self, real: impl Fn(f32, f32) -> f32) {
        let n2 = self.pop();
        let n1 = self.pop();

        self.push(real(n1, n2));
    }

    /// `0` on a zero divisor or a quotient that doesn't fit, e.g. `i32::MIN / -1`
    fn int_arith(&mut self, checked: impl Fn(i32, i32) -> Option<i32>) {
        let i2 = to_int(self.pop());
        let i1 = to_int(self.pop());

        self.push(checked(i1, i2).unwrap_or(0) as f32);
    }

    fn float_op(&mut self, func: impl Fn(f32) -> f32) {
        let n = self.pop();

        self.push(func(n));
    }

    fn cmp(&mut self, cmp: impl Fn(f32, f32) -> bool) {
        let n2 = self.pop();
        let n1 = self.pop();

        self.push(bool_to_real(cmp(n1, n2)));
    }

    fn bitwise(&mut self, op: impl Fn(i32, i32) -> i32) {
        let i2 = to_int(self.pop());
        let i1 = to_int(self.pop());

        self.push(op(i1, i2) as f32);
    }

    fn atan(&mut self) {
        let den = self.pop();
        let num = self.pop();

        let mut angle = f64::from(num).atan2(f64::from(den)).to_degrees() as f32;

        if angle < 0.0 {
            angle += 360.0;
        }

        self.push(angle);
    }

    fn bitshift(&mut self) {
        let shift = to_int(self.pop());
        let value = to_int(self.pop());

        let result = if shift > 0 {
            shift_left(value, shift)
        } else {
            // negating i32::MIN would overflow; treat it as no shift at all
            let amount = shift.checked_neg().unwrap_or(0);

            u32::try_from(amount)
                .ok()
                .and_then(|amount| value.checked_shr(amount))
        };

        self.push(result.unwrap_or(0) as f32);
    }

    fn exch(&mut self) {
        let n2 = self.pop();
        let n1 = self.pop();

        self.push(n2);
        self.push(n1);
    }

    fn dup(&mut self) {
        let n = self.pop();

        self.push(n);
        self.push(n);
    }

    fn copy(&mut self) {
        let n = to_int(self.pop());

        if let Ok(n) = usize::try_from(n) {
            self.copy_top(n);
        }
    }

    fn index(&mut self) {
        let n = to_int(self.pop());

        if let Some(value) = usize::try_from(n)
            .ok()
            .and_then(|n| self.peek_from_top(n))
        {
            self.push(value);
        }
    }

    fn roll(&mut self) {
        let j = to_int(self.pop());
        let n = to_int(self.pop());

        if j == 0 || n <= 0 {
            return;
        }

        let Ok(count) = usize::try_from(n) else {
            return;
        };

        if count > self.len() {
            return;
        }

        // `rem_euclid` is never negative for a positive divisor
        let shift = j.rem_euclid(n) as usize;

        self.roll_top(count, shift);
    }
}

/// Negative values and results that don't fit in an `i32` produce `None`
fn shift_left(value: i32, shift: i32) -> Option<i32> {
    if value < 0 || shift >= 32 {
        return None;
    }

    i32::try_from(i64::from(value) << shift).ok()
}
