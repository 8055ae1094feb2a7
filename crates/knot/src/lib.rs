#![doc = include_str!("../../../README.md")]

mod driver;
mod environment;
mod error;
mod eval;
mod lexer;
mod node;
mod operators;
mod output;
mod parser;
mod preprocessor;
mod repl;

pub use crate::driver::{DriverOutcome, run_program};
pub use crate::environment::Environment;
pub use crate::error::{ControlStatus, ErrorKind, EvalError, EvalResult};
pub use crate::eval::{EvalContext, evaluate};
pub use crate::node::{Node, Origin, ReleaseTemporary, release};
pub use crate::output::{CollectPrint, NoPrint, PrintSink, StdPrint};
pub use crate::parser::parse_program;
pub use crate::repl::{ReplProgress, ReplSession};
