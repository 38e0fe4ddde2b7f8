use clap::{Args, Parser, Subcommand};
use ep_core::Measurement;

mod calc;
mod demo;
mod error;

use calc::{Format, Operand, Operator};
use error::CliResult;

#[derive(Parser)]
#[command(name = "ep-cli")]
#[command(about = "Measurements with error bars and units", long_about = None)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OutputArgs {
    /// Digits after the decimal point
    #[arg(long, global = true, default_value_t = ep_core::measurement::DEFAULT_PRECISION)]
    precision: usize,
    /// Print "<value> <error>" instead of the display form
    #[arg(long, global = true, conflicts_with = "json")]
    data: bool,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

impl OutputArgs {
    fn format(&self) -> Format {
        if self.json {
            Format::Json
        } else if self.data {
            Format::DataFile
        } else {
            Format::Display {
                precision: self.precision,
            }
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through construction, comparison and arithmetic on sample values
    Demo,
    /// Evaluate a single binary expression
    Calc {
        /// Left operand, e.g. "3.0 +- 0.4 MeV"
        #[arg(allow_hyphen_values = true)]
        lhs: String,
        /// One of + - * / == != < > <= >=
        op: String,
        /// Right operand: a measurement, or a bare number for * and /
        #[arg(allow_hyphen_values = true)]
        rhs: String,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing; stdout is reserved for results
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let format = cli.output.format();

    match cli.command {
        Commands::Demo => cmd_demo(format),
        Commands::Calc { lhs, op, rhs } => cmd_calc(&lhs, &op, &rhs, format),
    }
}

fn cmd_calc(lhs: &str, op: &str, rhs: &str, format: Format) -> CliResult<()> {
    let lhs: Measurement = lhs.parse()?;
    let op = Operator::parse(op)?;
    let rhs = Operand::parse(rhs)?;
    let outcome = calc::evaluate(&lhs, op, &rhs)?;
    println!("{}", calc::render(&outcome, format)?);
    Ok(())
}

fn cmd_demo(format: Format) -> CliResult<()> {
    for line in demo::run(format)? {
        println!("{line}");
    }
    Ok(())
}
