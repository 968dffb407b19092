use crate::{
    error::{ParseError, PdfResult},
    filter::{decode_stream, FilterKind},
    postscript::{OperandStack, Procedure},
};

use super::{clip, validate_intervals};

/// A type 4 function (PDF 1.3), also called a PostScript calculator function, shall be
/// represented as a stream containing code written in a small subset of the PostScript language
///
/// The program is parsed once. Evaluation only reads it, so a single function
/// may be evaluated from many threads at once
#[derive(Debug, Clone)]
pub struct PostScriptCalculatorFunction {
    /// An array of 2 * m numbers, where m shall be the number of input values.
    /// Input values outside the declared domain shall be clipped to the nearest boundary
    /// value.
    domain: Vec<f32>,

    /// An array of 2 * n numbers, where n shall be the number of output values.
    /// Output values outside the declared range shall be clipped to the nearest
    /// boundary value.
    range: Vec<f32>,

    program: Procedure,
}

impl PostScriptCalculatorFunction {
    pub fn new(domain: Vec<f32>, range: Vec<f32>, source: &[u8]) -> PdfResult<Self> {
        validate_intervals("Domain", &domain)?;
        validate_intervals("Range", &range)?;

        let program = Procedure::parse_program(source).map_err(ParseError::from)?;

        log::debug!(
            "parsed type 4 function with {} inputs and {} outputs",
            domain.len() / 2,
            range.len() / 2
        );

        Ok(Self {
            domain,
            range,
            program,
        })
    }

    /// Builds the function from an encoded stream body, decoding it with
    /// `filters` first
    pub fn from_stream(
        domain: Vec<f32>,
        range: Vec<f32>,
        stream: &[u8],
        filters: &[FilterKind],
    ) -> PdfResult<Self> {
        let buffer = decode_stream(stream, filters)?;

        Self::new(domain, range, &buffer)
    }

    pub fn input_count(&self) -> usize {
        self.domain.len() / 2
    }

    pub fn output_count(&self) -> usize {
        self.range.len() / 2
    }

    pub fn program(&self) -> &Procedure {
        &self.program
    }

    /// Clips `inputs` to the domain, runs the program on them, and returns the
    /// top `n` values of the stack clipped to the range, in the order they
    /// were pushed
    pub fn evaluate(&self, inputs: &[f32]) -> PdfResult<Vec<f32>> {
        if inputs.len() != self.input_count() {
            anyhow::bail!(ParseError::MismatchedInputCount {
                expected: self.input_count(),
                found: inputs.len(),
            });
        }

        let mut stack = OperandStack::new();

        for (&input, interval) in inputs.iter().zip(self.domain.chunks_exact(2)) {
            stack.push(clip(input, interval));
        }

        self.program
            .execute(&mut stack)
            .map_err(ParseError::from)?;

        if stack.len() < self.output_count() {
            anyhow::bail!(ParseError::TooFewOutputs {
                expected: self.output_count(),
                found: stack.len(),
            });
        }

        let mut outputs = vec![0.0; self.output_count()];

        for (output, interval) in outputs
            .iter_mut()
            .zip(self.range.chunks_exact(2))
            .rev()
        {
            *output = clip(stack.pop(), interval);
        }

        Ok(outputs)
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use flate2::{write::ZlibEncoder, Compression};

    use crate::postscript::PostScriptError;

    use super::*;

    fn unit(n: usize) -> Vec<f32> {
        [0.0, 1.0].repeat(n)
    }

    fn assert_close(found: &[f32], expected: &[f32]) {
        assert_eq!(found.len(), expected.len());

        for (found, expected) in found.iter().zip(expected) {
            assert!(
                (found - expected).abs() < 1e-5,
                "expected {:?}, found {:?}",
                expected,
                found
            );
        }
    }

    #[test]
    fn gamma_curve() {
        let function =
            PostScriptCalculatorFunction::new(unit(1), unit(1), b"{ 2.2 exp }").unwrap();

        assert_close(&function.evaluate(&[0.0]).unwrap(), &[0.0]);
        assert_close(&function.evaluate(&[0.5]).unwrap(), &[0.5_f32.powf(2.2)]);
        assert_close(&function.evaluate(&[1.0]).unwrap(), &[1.0]);
    }

    #[test]
    fn outputs_are_in_push_order() {
        // cmyk from rgb, without undercolor removal
        let function = PostScriptCalculatorFunction::new(
            unit(3),
            unit(4),
            b"{ 1 exch sub 3 1 roll 1 exch sub 3 1 roll 1 exch sub 3 1 roll 0 }",
        )
        .unwrap();

        assert_close(
            &function.evaluate(&[1.0, 0.25, 0.0]).unwrap(),
            &[0.0, 0.75, 1.0, 0.0],
        );
    }

    #[test]
    fn inputs_are_clipped_to_domain() {
        let function =
            PostScriptCalculatorFunction::new(vec![0.0, 10.0], vec![-100.0, 100.0], b"{ }")
                .unwrap();

        assert_eq!(function.evaluate(&[-5.0]).unwrap(), vec![0.0]);
        assert_eq!(function.evaluate(&[50.0]).unwrap(), vec![10.0]);
        assert_eq!(function.evaluate(&[3.0]).unwrap(), vec![3.0]);
    }

    #[test]
    fn outputs_are_clipped_to_range() {
        let function =
            PostScriptCalculatorFunction::new(unit(1), vec![0.0, 1.0, 2.0, 3.0], b"{ 10 mul dup }")
                .unwrap();

        assert_eq!(function.evaluate(&[0.5]).unwrap(), vec![1.0, 3.0]);
        assert_eq!(function.evaluate(&[0.25]).unwrap(), vec![1.0, 2.5]);
    }

    #[test]
    fn extra_stack_values_are_ignored() {
        let function =
            PostScriptCalculatorFunction::new(unit(1), unit(1), b"{ 0.1 0.2 }").unwrap();

        assert_close(&function.evaluate(&[0.7]).unwrap(), &[0.2]);
    }

    #[test]
    fn wrong_input_count() {
        let function = PostScriptCalculatorFunction::new(unit(2), unit(1), b"{ add }").unwrap();

        let err = function.evaluate(&[0.5]).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::MismatchedInputCount {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn too_few_outputs() {
        let function = PostScriptCalculatorFunction::new(unit(1), unit(3), b"{ dup }").unwrap();

        let err = function.evaluate(&[0.5]).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::TooFewOutputs {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn malformed_program() {
        let err = PostScriptCalculatorFunction::new(unit(1), unit(1), b"{ 1 add").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::PostScriptError(
                PostScriptError::UnterminatedProcedure
            ))
        ));
    }

    #[test]
    fn malformed_conditional() {
        let function = PostScriptCalculatorFunction::new(unit(1), unit(1), b"{ if }").unwrap();

        let err = function.evaluate(&[0.5]).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::PostScriptError(
                PostScriptError::IfWithoutProcedure
            ))
        ));
    }

    #[test]
    fn invalid_domain() {
        let err = PostScriptCalculatorFunction::new(vec![0.0], unit(1), b"{ }").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::InvalidInterval { key: "Domain", .. })
        ));
    }

    #[test]
    fn from_flate_stream() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"{ 0.5 mul }").unwrap();
        let stream = encoder.finish().unwrap();

        let function = PostScriptCalculatorFunction::from_stream(
            unit(1),
            unit(1),
            &stream,
            &[FilterKind::Flate],
        )
        .unwrap();

        assert_eq!(function.evaluate(&[0.5]).unwrap(), vec![0.25]);
    }

    #[test]
    fn evaluate_from_many_threads() {
        let function = PostScriptCalculatorFunction::new(
            unit(1),
            unit(1),
            b"{ dup 0.5 lt { 2 mul } { 1 exch sub 2 mul } ifelse }",
        )
        .unwrap();

        let samples = (0..=64).map(|i| i as f32 / 64.0).collect::<Vec<_>>();

        let expected = samples
            .iter()
            .map(|&sample| function.evaluate(&[sample]).unwrap()[0])
            .collect::<Vec<_>>();

        let found = std::thread::scope(|scope| {
            let handles = samples
                .chunks(16)
                .map(|chunk| {
                    let function = &function;

                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|&sample| function.evaluate(&[sample]).unwrap()[0])
                            .collect::<Vec<_>>()
                    })
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap())
                .collect::<Vec<_>>()
        });

        assert_eq!(found, expected);
        assert_eq!(found[16], 0.5);
        assert_eq!(found[32], 1.0);
        assert_eq!(found[48], 0.5);
    }
}
