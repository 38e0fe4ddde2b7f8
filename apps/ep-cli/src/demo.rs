//! Sample session for the `demo` subcommand.

use ep_core::{MeasResult, Measurement};
use serde::Serialize;

use crate::calc::{self, Format, Outcome};
use crate::error::CliResult;

#[derive(Serialize)]
struct Step<'a> {
    step: &'a str,
    result: &'a Outcome,
}

/// Build the sample values, exercise every operator on them and return one
/// rendered line per step. Steps that fail on a unit mismatch are logged
/// and left out.
pub fn run(format: Format) -> CliResult<Vec<String>> {
    let mut lines = Vec::new();
    let mut emit = |label: &str, outcome: Outcome| -> CliResult<()> {
        let line = match format {
            Format::Json => serde_json::to_string(&Step {
                step: label,
                result: &outcome,
            })?,
            _ => format!("{label}: {}", calc::render(&outcome, format)?),
        };
        lines.push(line);
        Ok(())
    };

    let mut var = Measurement::new(123.45, 0.6789, "keV/MeV");
    let var1 = Measurement::new(123.45, 0.0987, "keV/MeV");
    let var2 = Measurement::new(123.45, 0.6789, "MeV");
    let var3 = Measurement::new(123.45, 3465.84, "keV/MeV");

    emit("var", Outcome::Value(var.clone()))?;
    var.set_value(987.65);
    var.set_units("hbar/c/G");
    emit("var (updated)", Outcome::Value(var))?;

    emit("var1", Outcome::Value(var1.clone()))?;
    for (name, rhs) in [("var2", &var2), ("var3", &var3)] {
        emit(name, Outcome::Value(rhs.clone()))?;

        let label = format!("var1 == {name}");
        if let Some(eq) = report(&label, var1.try_eq(rhs)) {
            emit(&label, Outcome::Truth(eq))?;
        }
        let label = format!("var1 + {name}");
        if let Some(sum) = report(&label, var1.try_add(rhs)) {
            emit(&label, Outcome::Value(sum))?;
        }
        let label = format!("var1 - {name}");
        if let Some(diff) = report(&label, var1.try_sub(rhs)) {
            emit(&label, Outcome::Value(diff))?;
        }
        emit(&format!("var1 * {name}"), Outcome::Value(&var1 * rhs))?;
        emit(&format!("var1 / {name}"), Outcome::Value(&var1 / rhs))?;
    }
    emit("var1 * 5", Outcome::Value(&var1 * 5))?;
    emit("var1 / 5", Outcome::Value(&var1 / 5))?;

    Ok(lines)
}

fn report<T>(step: &str, result: MeasResult<T>) -> Option<T> {
    result
        .inspect_err(|err| tracing::warn!(step, "skipped: {err}"))
        .ok()
}
