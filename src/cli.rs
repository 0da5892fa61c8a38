/*!
Command line handling for the `cnfcheck` binary.
*/

use std::{env::args, path::Path};

use crate::{
    formula::Clause,
    model::{self, ModelFormat},
    parser,
    prelude::*,
    verifier::{self, Verdict},
};

pub fn usage_string() -> String {
    format!(
        "Usage: {} [--format <format>] <model_file> <dimacs_file>

Checks that the model in <model_file> satisfies the CNF formula in <dimacs_file>.

format:
    key-value     one '<variable> : <value>' per line, value is 0 or 1 (default)
    literal-list  one line '<h1> <h2> <lit>... <f1> <f2>'; the two leading and
                  two trailing tokens are skipped, each literal's sign is the
                  value of its variable",
        args().next().unwrap_or_else(|| "cnfcheck".to_owned())
    )
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Required argument does not exist\n\n{}", usage_string()))]
    MissingArgument,
    #[snafu(display("Unexpected argument '{}'\n\n{}", arg, usage_string()))]
    UnexpectedArgument { arg: String },
    #[snafu(display("Invalid model format\n\n{}", usage_string()))]
    InvalidFormat { source: model::Error },
    #[snafu(display("Failed to parse CNF"))]
    DimacsError { source: parser::Error },
    #[snafu(display("Failed to parse model"))]
    ModelError { source: model::Error },
    #[snafu(display("Model is incomplete"))]
    IncompleteModel { source: verifier::Error },
}

#[derive(Debug, PartialEq, Eq)]
pub struct Options {
    pub format: ModelFormat,
    pub model_path: String,
    pub dimacs_path: String,
}

/// Parses the arguments following the program name.
pub fn parse_options(args: Vec<String>) -> Result<Options, Error> {
    let mut format = ModelFormat::default();
    let mut positional = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--format" {
            let name = iter.next().context(MissingArgument)?;
            format = name.parse().context(InvalidFormat)?;
        } else if let Some(name) = arg.strip_prefix("--format=") {
            format = name.parse().context(InvalidFormat)?;
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let model_path = positional.next().context(MissingArgument)?;
    let dimacs_path = positional.next().context(MissingArgument)?;
    if let Some(arg) = positional.next() {
        return UnexpectedArgument { arg }.fail();
    }

    Ok(Options {
        format,
        model_path,
        dimacs_path,
    })
}

pub fn check_paths(
    model_path: &Path,
    dimacs_path: &Path,
    format: ModelFormat,
) -> Result<Verdict, Error> {
    let model = model::parse_file(model_path, format).context(ModelError)?;
    let formula = parser::parse_file(dimacs_path).context(DimacsError)?;
    verifier::verify(&formula, &model).context(IncompleteModel)
}

/// Diagnostic printed for an incorrect model. Clauses are numbered from 1.
pub fn failure_message(dimacs_path: &str, index: usize, clause: &Clause) -> String {
    format!(
        "Clause #{}: {}\nIncorrect model for {}",
        index + 1,
        clause,
        dimacs_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(args: &[&str]) -> Result<Options, Error> {
        parse_options(args.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn positional_only() {
        let options = options(&["model.txt", "formula.cnf"]).unwrap();
        assert_eq!(
            options,
            Options {
                format: ModelFormat::KeyValue,
                model_path: "model.txt".to_owned(),
                dimacs_path: "formula.cnf".to_owned(),
            }
        );
    }

    #[test]
    fn format_flag() {
        let separate = options(&["--format", "literal-list", "m", "f"]).unwrap();
        assert_eq!(separate.format, ModelFormat::LiteralList);
        assert_eq!(separate.model_path, "m");
        assert_eq!(separate.dimacs_path, "f");

        let joined = options(&["m", "--format=literal-list", "f"]).unwrap();
        assert_eq!(joined.format, ModelFormat::LiteralList);
        assert_eq!(joined.model_path, "m");
        assert_eq!(joined.dimacs_path, "f");

        let explicit = options(&["m", "f", "--format", "key-value"]).unwrap();
        assert_eq!(explicit.format, ModelFormat::KeyValue);
    }

    #[test]
    fn unknown_format() {
        let err = options(&["--format", "json", "m", "f"]).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));

        let err = options(&["--format=", "m", "f"]).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));
    }

    #[test]
    fn missing_arguments() {
        assert!(matches!(options(&["m"]), Err(Error::MissingArgument)));
        assert!(matches!(options(&[]), Err(Error::MissingArgument)));
        // the flag value is missing
        assert!(matches!(
            options(&["m", "f", "--format"]),
            Err(Error::MissingArgument)
        ));
    }

    #[test]
    fn extra_argument() {
        match options(&["m", "f", "extra"]) {
            Err(Error::UnexpectedArgument { arg }) => assert_eq!(arg, "extra"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn check_paths_errors() {
        let err = check_paths(
            "testcases/model/simple_correct.txt".as_ref(),
            "testcases/cnf/missing.cnf".as_ref(),
            ModelFormat::KeyValue,
        )
        .unwrap_err();
        assert!(matches!(err, Error::DimacsError { .. }));

        let err = check_paths(
            "testcases/model/simple_incomplete.txt".as_ref(),
            "testcases/cnf/simple.cnf".as_ref(),
            ModelFormat::KeyValue,
        )
        .unwrap_err();
        assert!(matches!(err, Error::IncompleteModel { .. }));

        let err = check_paths(
            "testcases/model/simple_correct.txt".as_ref(),
            "testcases/cnf/simple.cnf".as_ref(),
            ModelFormat::LiteralList,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ModelError { .. }));
    }

    #[test]
    fn failure_message_numbers_from_one() {
        let verdict = check_paths(
            "testcases/model/uf3_incorrect.txt".as_ref(),
            "testcases/cnf/uf3.cnf".as_ref(),
            ModelFormat::KeyValue,
        )
        .unwrap();
        match verdict {
            Verdict::Unsatisfied { index, clause } => assert_eq!(
                failure_message("uf3.cnf", index, &clause),
                "Clause #4: -4 -1 0\nIncorrect model for uf3.cnf"
            ),
            Verdict::Satisfied => panic!("model should not satisfy the formula"),
        }
    }

    #[test]
    fn check_paths_verdict() {
        let verdict = check_paths(
            "testcases/model/simple_correct.txt".as_ref(),
            "testcases/cnf/simple.cnf".as_ref(),
            ModelFormat::KeyValue,
        )
        .unwrap();
        assert!(verdict.is_satisfied());
    }
}
