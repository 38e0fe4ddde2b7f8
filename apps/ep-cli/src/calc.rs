//! Expression evaluation for the `calc` subcommand.

use ep_core::{Measurement, Real};
use serde::Serialize;

use crate::error::{CliError, CliResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl Operator {
    pub fn parse(token: &str) -> CliResult<Self> {
        Ok(match token {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" | "x" => Self::Mul,
            "/" => Self::Div,
            "==" => Self::Eq,
            "!=" => Self::Ne,
            "<" => Self::Lt,
            ">" => Self::Gt,
            "<=" => Self::Le,
            ">=" => Self::Ge,
            other => return Err(CliError::UnknownOperator(other.to_string())),
        })
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
        }
    }
}

/// Right-hand operand: another measurement or a dimensionless number.
#[derive(Clone, Debug)]
pub enum Operand {
    Measurement(Measurement),
    Scalar(Real),
}

impl Operand {
    pub fn parse(text: &str) -> CliResult<Self> {
        if let Ok(s) = text.trim().parse::<Real>() {
            return Ok(Self::Scalar(s));
        }
        Ok(Self::Measurement(text.parse()?))
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Value(Measurement),
    Truth(bool),
}

pub fn evaluate(lhs: &Measurement, op: Operator, rhs: &Operand) -> CliResult<Outcome> {
    let rhs = match rhs {
        Operand::Scalar(s) => {
            return match op {
                Operator::Mul => Ok(Outcome::Value(lhs * *s)),
                Operator::Div => Ok(Outcome::Value(lhs / *s)),
                _ => Err(CliError::ScalarNotAllowed { op: op.symbol() }),
            };
        }
        Operand::Measurement(m) => m,
    };

    tracing::debug!(lhs = %lhs, op = op.symbol(), rhs = %rhs, "evaluating");
    let outcome = match op {
        Operator::Add => Outcome::Value(lhs.try_add(rhs)?),
        Operator::Sub => Outcome::Value(lhs.try_sub(rhs)?),
        Operator::Mul => Outcome::Value(lhs * rhs),
        Operator::Div => Outcome::Value(lhs / rhs),
        Operator::Eq => Outcome::Truth(lhs.try_eq(rhs)?),
        Operator::Ne => Outcome::Truth(lhs.try_ne(rhs)?),
        Operator::Lt => Outcome::Truth(lhs.try_lt(rhs)?),
        Operator::Gt => Outcome::Truth(lhs.try_gt(rhs)?),
        Operator::Le => Outcome::Truth(lhs.try_le(rhs)?),
        Operator::Ge => Outcome::Truth(lhs.try_ge(rhs)?),
    };
    Ok(outcome)
}

/// How results are rendered on stdout.
#[derive(Clone, Copy, Debug)]
pub enum Format {
    Display { precision: usize },
    DataFile,
    Json,
}

pub fn render(outcome: &Outcome, format: Format) -> CliResult<String> {
    Ok(match (outcome, format) {
        (_, Format::Json) => serde_json::to_string(outcome)?,
        (Outcome::Truth(t), _) => t.to_string(),
        (Outcome::Value(m), Format::DataFile) => m.output_for_data_file(),
        (Outcome::Value(m), Format::Display { precision }) => m.output_with_precision(precision),
    })
}
