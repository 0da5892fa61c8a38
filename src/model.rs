/*!
Variable assignments produced by a solver.

Two on-disk formats are understood, and the caller always names the one
to use:

- [`ModelFormat::KeyValue`]: one `<variable> : <value>` pair per line with
  `<value>` either `0` or `1`. This is what the solver writes out.
- [`ModelFormat::LiteralList`]: a single line of whitespace separated
  tokens. The first two and the last two tokens are header and footer
  tokens and are skipped without being inspected; every token in between
  is a non-zero signed literal whose sign is the variable's value.
*/

use std::{
    collections::BTreeMap,
    fmt::Display,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::formula::{Literal, Variable, VariableParseError};
use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("I/O error occurred while reading model file '{}'", path.display()))]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Expected '<variable> : <value>' on line {}, found '{}'", line, content))]
    MalformedAssignment { line: usize, content: String },
    #[snafu(display("Invalid variable on line {}", line))]
    MalformedVariable {
        line: usize,
        source: VariableParseError,
    },
    #[snafu(display("Value must be 0 or 1 on line {}, found '{}'", line, value))]
    MalformedValue { line: usize, value: String },
    #[snafu(display(
        "Literal list needs two header and two footer tokens, found only {} tokens",
        found
    ))]
    MissingSentinels { found: usize },
    #[snafu(display("Invalid literal '{}' in literal list", token))]
    MalformedLiteral {
        token: String,
        source: VariableParseError,
    },
    #[snafu(display("Variable {} is assigned both true and false", variable))]
    ConflictingAssignment { variable: Variable },
    #[snafu(display(
        "Unknown model format '{}' (expected 'key-value' or 'literal-list')",
        name
    ))]
    UnknownFormat { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    KeyValue,
    LiteralList,
}

impl Default for ModelFormat {
    fn default() -> Self {
        ModelFormat::KeyValue
    }
}

impl FromStr for ModelFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "key-value" => Ok(ModelFormat::KeyValue),
            "literal-list" => Ok(ModelFormat::LiteralList),
            _ => UnknownFormat { name: s }.fail(),
        }
    }
}

impl Display for ModelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelFormat::KeyValue => write!(f, "key-value"),
            ModelFormat::LiteralList => write!(f, "literal-list"),
        }
    }
}

/// Truth values for the variables mentioned in a model file.
/// Variables that were not mentioned have no value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    assignment: BTreeMap<Variable, bool>,
}

impl Model {
    pub fn get(&self, variable: Variable) -> Option<bool> {
        self.assignment.get(&variable).copied()
    }

    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.assignment.iter().map(|(&var, &val)| (var, val))
    }

    fn assign(&mut self, variable: Variable, value: bool) -> Result<(), Error> {
        let previous = *self.assignment.entry(variable).or_insert(value);
        ensure!(previous == value, ConflictingAssignment { variable });
        Ok(())
    }
}

impl std::iter::FromIterator<(Variable, bool)> for Model {
    fn from_iter<T: IntoIterator<Item = (Variable, bool)>>(iter: T) -> Self {
        Model {
            assignment: iter.into_iter().collect(),
        }
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (variable, value) in self.iter() {
            writeln!(f, "{} : {}", variable, value as u8)?;
        }
        Ok(())
    }
}

fn parse_key_value(input: &str) -> Result<Model, Error> {
    let mut model = Model::default();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (variable, value) = match trimmed.split_once(':') {
            Some((variable, value)) => (variable.trim(), value.trim()),
            None => {
                return MalformedAssignment {
                    line: line_no,
                    content: trimmed,
                }
                .fail()
            }
        };

        let variable = variable
            .parse::<Variable>()
            .context(MalformedVariable { line: line_no })?;
        let value = match value {
            "1" => true,
            "0" => false,
            _ => return MalformedValue { line: line_no, value }.fail(),
        };

        model.assign(variable, value)?;
    }

    Ok(model)
}

fn parse_literal_list(input: &str) -> Result<Model, Error> {
    let tokens = input
        .lines()
        .next()
        .unwrap_or("")
        .split_whitespace()
        .collect::<Vec<_>>();

    ensure!(
        tokens.len() >= 4,
        MissingSentinels {
            found: tokens.len()
        }
    );

    let mut model = Model::default();
    for token in &tokens[2..tokens.len() - 2] {
        let literal = token
            .parse::<Literal>()
            .context(MalformedLiteral { token: *token })?;
        model.assign(literal.variable(), literal.positive())?;
    }

    Ok(model)
}

/// Parses a model in the given format.
pub fn parse_str(input: &str, format: ModelFormat) -> Result<Model, Error> {
    let model = match format {
        ModelFormat::KeyValue => parse_key_value(input)?,
        ModelFormat::LiteralList => parse_literal_list(input)?,
    };
    debug!("Parsed {} assignments ({} format)", model.len(), format);

    Ok(model)
}

/// Parses a model from a file
pub fn parse_file(path: impl AsRef<Path>, format: ModelFormat) -> Result<Model, Error> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).context(IoError {
        path: path.to_owned(),
    })?;

    info!("Parsing model file '{}'", path.display());
    parse_str(&content, format)
}
