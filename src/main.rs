use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use calculator::{
    filter::decode_stream, FilterKind, PdfResult, PostScriptCalculatorFunction, PostScriptEngine,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "type4", version)]
struct Cli {
    /// File containing the calculator program, or `-` to read it from stdin.
    program: PathBuf,

    /// Input values, pushed onto the stack in order before the program runs.
    #[arg(allow_negative_numbers = true)]
    inputs: Vec<f32>,

    /// Filter the program was encoded with. May be repeated; filters are applied in order.
    #[arg(long = "filter", value_parser = parse_filter)]
    filters: Vec<FilterKind>,

    /// Comma separated `min,max` pairs, one per input. Inputs are clipped to these.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    domain: Vec<f32>,

    /// Comma separated `min,max` pairs, one per output. Outputs are clipped to these.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    range: Vec<f32>,
}

fn parse_filter(name: &str) -> Result<FilterKind, String> {
    FilterKind::from_name(name).map_err(|err| err.to_string())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let stream = read_program(&cli.program)?;

    let outputs = if cli.domain.is_empty() && cli.range.is_empty() {
        run_engine(&stream, &cli.filters, &cli.inputs)?
    } else {
        let function =
            PostScriptCalculatorFunction::from_stream(cli.domain, cli.range, &stream, &cli.filters)
                .context("build type 4 function")?;

        function
            .evaluate(&cli.inputs)
            .context("evaluate type 4 function")?
    };

    println!(
        "{}",
        outputs
            .iter()
            .map(f32::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    );

    Ok(())
}

fn read_program(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("read program from stdin")?;

        return Ok(buffer);
    }

    std::fs::read(path).with_context(|| format!("read program '{}'", path.display()))
}

/// Runs the program without a domain or range, returning the whole stack
/// bottom first
fn run_engine(stream: &[u8], filters: &[FilterKind], inputs: &[f32]) -> PdfResult<Vec<f32>> {
    let buffer = decode_stream(stream, filters)?;

    let mut engine = PostScriptEngine::new();
    engine.parse(&buffer).context("parse program")?;

    for &input in inputs {
        engine.push(input);
    }

    engine.execute().context("execute program")?;

    Ok(engine.stack().as_slice().to_vec())
}
