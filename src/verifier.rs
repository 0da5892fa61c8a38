use crate::{
    formula::{Clause, Cnf, Variable},
    model::Model,
    prelude::*,
};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display(
        "Model has no assignment for variable {} used in clause '{}'",
        variable,
        clause
    ))]
    MissingAssignment { variable: Variable, clause: Clause },
}

/// Outcome of checking a model against a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Satisfied,
    /// `clause` is the first clause with no true literal; `index` is its 0-based position.
    Unsatisfied { index: usize, clause: Clause },
}

impl Verdict {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Verdict::Satisfied)
    }
}

/// Evaluates a single clause. Every literal is looked up, so an incomplete
/// model is reported even when an earlier literal already satisfies the clause.
pub fn evaluate_clause(clause: &Clause, model: &Model) -> Result<bool, Error> {
    let mut satisfied = false;
    for literal in clause.iter() {
        let value = model
            .get(literal.variable())
            .with_context(|| MissingAssignment {
                variable: literal.variable(),
                clause: clause.clone(),
            })?;
        satisfied |= literal.is_satisfied_by(value);
    }
    Ok(satisfied)
}

/// Checks that every clause of `formula` has a literal made true by `model`.
///
/// Clauses are scanned in order and the scan stops at the first clause that
/// is not satisfied. An empty clause is never satisfied; a formula with no
/// clauses always is.
pub fn verify(formula: &Cnf, model: &Model) -> Result<Verdict, Error> {
    for (index, clause) in formula.clauses().iter().enumerate() {
        if !evaluate_clause(clause, model)? {
            debug!("Clause #{} '{}' is not satisfied", index, clause);
            return Ok(Verdict::Unsatisfied {
                index,
                clause: clause.clone(),
            });
        }
    }

    info!("All {} clauses are satisfied", formula.clauses().len());
    Ok(Verdict::Satisfied)
}
