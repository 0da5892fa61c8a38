/*!
A module to represent conjunctive normal form formula.
*/

use std::{convert::TryFrom, fmt::Display, num::NonZeroU32, str::FromStr};

use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum VariableParseError {
    #[snafu(display("Failed to parse '{}' as a variable ID", input))]
    ParseIntError {
        input: String,
        source: std::num::ParseIntError,
    },
    #[snafu(display("Variable ID 0 is reserved as the clause terminator"))]
    ZeroVariable,
    #[snafu(display("Unexpected sign in variable ID '{}'", input))]
    UnexpectedSign { input: String },
}

/// Newtype wrapper for variable ID.
/// Invariant: 0 < ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(NonZeroU32);

impl Variable {
    /// Creates a variable from its DIMACS ID.
    /// Returns `None` for 0.
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Variable)
    }

    pub fn id(&self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for Variable {
    type Error = VariableParseError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Variable::new(id).context(ZeroVariable)
    }
}

impl FromStr for Variable {
    type Err = VariableParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `u32::from_str` accepts a leading '+'; the sign belongs to the literal
        ensure!(
            !s.starts_with('+') && !s.starts_with('-'),
            UnexpectedSign { input: s }
        );
        let id = s
            .parse::<u32>()
            .context(ParseIntError { input: s.to_owned() })?;
        Variable::try_from(id)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A variable together with its polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    id: Variable,
    positive: bool,
}

impl Literal {
    pub fn variable(&self) -> Variable {
        self.id
    }

    pub fn positive(&self) -> bool {
        self.positive
    }

    /// Whether this literal is true when its variable takes `value`.
    pub fn is_satisfied_by(&self, value: bool) -> bool {
        (self.positive && value) || (!self.positive && !value)
    }
}

impl FromStr for Literal {
    type Err = VariableParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (positive, id) = if let Some(rest) = s.strip_prefix('-') {
            (false, rest.parse()?)
        } else {
            (true, s.parse()?)
        };

        Ok(Literal { id, positive })
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", if self.positive { "" } else { "-" }, self.id)
    }
}

/// Disjunction of literals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }
}

/// Printed in DIMACS form, e.g. `1 -2 0`.
impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for literal in &self.literals {
            write!(f, "{} ", literal)?;
        }
        write!(f, "0")
    }
}

/// Values declared by a `p cnf <num_variables> <num_clauses>` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemLine {
    pub num_variables: usize,
    pub num_clauses: usize,
}

/// Formula representation in Conjunctive Normal Form
#[derive(Debug, Clone, Default)]
pub struct Cnf {
    problem: Option<ProblemLine>,
    clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new(problem: Option<ProblemLine>, clauses: Vec<Clause>) -> Self {
        Cnf { problem, clauses }
    }

    pub fn problem(&self) -> Option<ProblemLine> {
        self.problem
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Largest variable ID referenced by any clause, 0 if there is none.
    pub fn max_variable(&self) -> u32 {
        self.clauses
            .iter()
            .flat_map(Clause::iter)
            .map(|literal| literal.variable().id())
            .max()
            .unwrap_or(0)
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CNF with {} clauses (", self.clauses.len())?;

        let mut iter = self.clauses.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for clause in iter {
            write!(f, ", {}", clause)?;
        }

        write!(f, ")")
    }
}
