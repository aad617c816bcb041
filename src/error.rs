use thiserror::Error;

use crate::parser::SyntaxError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", render_syntax_errors(.0))]
    Syntax(Vec<SyntaxError>),

    #[error("Unknown pass: {name:?}")]
    UnknownPass { name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn render_syntax_errors(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(|error| format!("Syntax error: {error}"))
        .collect::<Vec<_>>()
        .join("\n")
}
