pub use document::{Span, Spanned};
pub use error::Error;
pub use parser::{ParseError, SyntaxError};

pub mod checker;
mod document;
mod error;
pub mod fixer;
pub mod ir;
mod lexer;
mod parser;
pub mod pass;

/// Parses IR source text into a module.
pub fn parse<'src>(source: &'src str) -> Result<ir::Module, Vec<ParseError<'src>>> {
    let tokens = lexer::tokenize(source);
    parser::parse(tokens)
}

/// Like [`parse`], with the errors detached from `source`.
pub fn parse_module(source: &str) -> Result<ir::Module, Error> {
    parse(source).map_err(|errors| Error::Syntax(errors.into_iter().map(SyntaxError::from).collect()))
}

/// Parses `source` and runs the pass called `pass` over each of its procedures,
/// returning what the pass reported.
pub fn analyze(source: &str, pass: &str) -> Result<String, Error> {
    // An unknown pass is reported even for broken input.
    let info = pass::lookup(pass)?;
    let mut module = parse_module(source)?;
    let mut diagnostics = Vec::new();
    pass::run_pass(info, &mut module, &mut diagnostics)?;
    Ok(String::from_utf8_lossy(&diagnostics).into_owned())
}
