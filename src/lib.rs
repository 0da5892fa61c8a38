#[macro_use]
extern crate log;

pub mod cli;
pub mod formula;
pub mod model;
pub mod parser;
pub mod prelude;
pub mod report;
pub mod verifier;
