use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::formula::{Clause, Cnf, Literal, ProblemLine, VariableParseError};
use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("I/O error occurred while reading CNF file '{}'", path.display()))]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Invalid literal '{}' on line {}", token, line))]
    MalformedLiteral {
        line: usize,
        token: String,
        source: VariableParseError,
    },
    #[snafu(display(
        "The last clause ({} literals) is not terminated by '0'",
        num_literals
    ))]
    UnterminatedClause { num_literals: usize },
}

/// Parses `p cnf <num_variables> <num_clauses>`.
fn parse_problem_line(line: &str) -> Option<ProblemLine> {
    let splitted = line.split_whitespace().collect::<Vec<_>>();
    match splitted.as_slice() {
        ["p", "cnf", num_variables, num_clauses] => Some(ProblemLine {
            num_variables: num_variables.parse().ok()?,
            num_clauses: num_clauses.parse().ok()?,
        }),
        _ => None,
    }
}

fn check_problem_line(cnf: &Cnf) {
    let problem = match cnf.problem() {
        Some(problem) => problem,
        None => return,
    };

    if problem.num_clauses != cnf.clauses().len() {
        warn!(
            "Problem line declares {} clauses, found {}",
            problem.num_clauses,
            cnf.clauses().len()
        );
    }
    if cnf.max_variable() as usize > problem.num_variables {
        warn!(
            "Problem line declares {} variables, but variable {} is used",
            problem.num_variables,
            cnf.max_variable()
        );
    }
}

/// Parses a CNF formula in DIMACS format.
///
/// Lines starting with `c` or `p` never contribute literals, and a line
/// starting with `%` ends the formula. A clause may span several lines and
/// ends only at a `0` token.
pub fn parse_str(input: &str) -> Result<Cnf, Error> {
    let mut problem = None;
    let mut clauses = Vec::new();
    let mut current = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }
        if trimmed.starts_with('p') {
            problem = parse_problem_line(trimmed);
            if problem.is_none() {
                debug!("Ignoring malformed problem line '{}'", trimmed);
            }
            continue;
        }
        if trimmed.starts_with('%') {
            debug!("End of formula marker on line {}", idx + 1);
            break;
        }

        for token in trimmed.split_whitespace() {
            if token == "0" {
                clauses.push(Clause::new(std::mem::take(&mut current)));
            } else {
                current.push(token.parse::<Literal>().with_context(|| MalformedLiteral {
                    line: idx + 1,
                    token: token.to_owned(),
                })?);
            }
        }
    }

    ensure!(
        current.is_empty(),
        UnterminatedClause {
            num_literals: current.len(),
        }
    );

    let cnf = Cnf::new(problem, clauses);
    check_problem_line(&cnf);
    debug!("Parsed {}", cnf);

    Ok(cnf)
}

/// Parses CNF formula from a file
pub fn parse_file(path: impl AsRef<Path>) -> Result<Cnf, Error> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).context(IoError {
        path: path.to_owned(),
    })?;

    info!("Parsing CNF file '{}'", path.display());
    parse_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(cnf: &Cnf) -> Vec<Vec<String>> {
        cnf.clauses()
            .iter()
            .map(|clause| clause.iter().map(|lit| lit.to_string()).collect())
            .collect()
    }

    #[test]
    fn clause_boundaries() {
        let cnf = parse_str("1 2 0 -1 3 0").unwrap();
        assert_eq!(ids(&cnf), vec![vec!["1", "2"], vec!["-1", "3"]]);
    }

    #[test]
    fn clause_spanning_lines() {
        let cnf = parse_str("p cnf 3 2\n1\n-2 0 3\n0\n").unwrap();
        assert_eq!(ids(&cnf), vec![vec!["1", "-2"], vec!["3"]]);
    }

    #[test]
    fn comments_and_header_contribute_nothing() {
        let cnf = parse_str("c 1 2 0\np cnf 2 1\nc -1 0\n  \n-1 2 0\n").unwrap();
        assert_eq!(ids(&cnf), vec![vec!["-1", "2"]]);
        assert_eq!(
            cnf.problem(),
            Some(ProblemLine {
                num_variables: 2,
                num_clauses: 1
            })
        );
    }

    #[test]
    fn malformed_header_is_ignored() {
        let cnf = parse_str("p dnf x\n1 0\n").unwrap();
        assert_eq!(cnf.problem(), None);
        assert_eq!(cnf.clauses().len(), 1);
    }

    #[test]
    fn percent_truncates() {
        let cnf = parse_str("p cnf 2 1\n1 -2 0\n%\n0\n2 2 0\ngarbage\n").unwrap();
        assert_eq!(ids(&cnf), vec![vec!["1", "-2"]]);
    }

    #[test]
    fn empty_clause_is_kept() {
        let cnf = parse_str("1 0 0\n").unwrap();
        assert_eq!(cnf.clauses().len(), 2);
        assert!(cnf.clauses()[1].is_empty());
    }

    #[test]
    fn no_clauses() {
        let cnf = parse_str("c nothing here\np cnf 0 0\n").unwrap();
        assert!(cnf.clauses().is_empty());
    }

    #[test]
    fn unterminated_clause_is_an_error() {
        let err = parse_str("1 2 0\n3 4\n").unwrap_err();
        assert!(matches!(err, Error::UnterminatedClause { num_literals: 2 }));
    }

    #[test]
    fn malformed_literal_reports_line() {
        let err = parse_str("p cnf 2 2\n1 2 0\n1 x 0\n").unwrap_err();
        match err {
            Error::MalformedLiteral { line, token, .. } => {
                assert_eq!(line, 3);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn signed_plus_is_malformed() {
        let err = parse_str("+1 -+2 0\n").unwrap_err();
        match err {
            Error::MalformedLiteral { line, token, .. } => {
                assert_eq!(line, 1);
                assert_eq!(token, "+1");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(parse_str("1 -+2 0\n").is_err());
    }

    #[test]
    fn missing_file() {
        let err = parse_file("testcases/does/not/exist.cnf").unwrap_err();
        assert!(matches!(err, Error::IoError { .. }));
    }
}
