use std::{env::args, process};

use cnfcheck::{
    cli::{check_paths, failure_message, parse_options, usage_string},
    report::Report,
    verifier::Verdict,
};
use pretty_env_logger::formatted_builder;

fn init_logger() {
    let mut builder = formatted_builder();

    if let Ok(s) = ::std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else if cfg!(debug_assertions) {
        builder.parse_filters("cnfcheck=debug");
    } else {
        builder.parse_filters("cnfcheck=warn");
    }

    builder.try_init().expect("Failed to initialize the logger");
}

fn main() -> Result<(), Report> {
    init_logger();

    // drop arg[0]
    let remaining: Vec<_> = args().skip(1).collect();
    if remaining.is_empty() {
        println!("{}", usage_string());
        return Ok(());
    }

    let options = parse_options(remaining)?;
    let verdict = check_paths(
        options.model_path.as_ref(),
        options.dimacs_path.as_ref(),
        options.format,
    )?;

    match verdict {
        Verdict::Satisfied => println!("Correct model for {}", options.dimacs_path),
        Verdict::Unsatisfied { index, clause } => {
            println!("{}", failure_message(&options.dimacs_path, index, &clause));
            process::exit(1);
        }
    }

    Ok(())
}
