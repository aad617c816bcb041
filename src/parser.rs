use chumsky::{error::SimpleReason, prelude::*, Stream};
use thiserror::Error;

use crate::{
    document::{Span, Spanned},
    ir::{Block, Instruction, Module, Name, Operand, Procedure},
    lexer::Token,
};

pub type ParseError<'src> = Simple<Token<'src>, Span>;

/// A parse error detached from the source text it was produced from.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} at {span}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl From<ParseError<'_>> for SyntaxError {
    fn from(error: ParseError<'_>) -> Self {
        let message = match error.reason() {
            SimpleReason::Custom(message) => message.clone(),
            SimpleReason::Unclosed { delimiter, .. } => format!("unclosed delimiter {delimiter}"),
            SimpleReason::Unexpected => {
                let found = error
                    .found()
                    .map_or_else(|| "end of input".to_string(), |token| token.to_string());
                let mut expected: Vec<String> = error
                    .expected()
                    .map(|token| match token {
                        Some(token) => token.to_string(),
                        None => "end of input".to_string(),
                    })
                    .collect();
                expected.sort();
                if expected.is_empty() {
                    format!("unexpected {found}")
                } else {
                    format!("unexpected {found}, expected one of {}", expected.join(", "))
                }
            }
        };
        SyntaxError {
            message,
            span: error.span(),
        }
    }
}

pub fn parse<'src>(tokens: Vec<Spanned<Token<'src>>>) -> Result<Module, Vec<ParseError<'src>>> {
    let end_of_input = tokens
        .last()
        .map_or_else(|| Span::new(0, 0), |token| Span::new(token.span.end, token.span.end));
    let stream = Stream::from_iter(
        end_of_input,
        tokens
            .into_iter()
            .map(|Spanned { span, value }| (value, span)),
    );

    module_parser().parse(stream)
}

fn module_parser<'src>() -> impl Parser<Token<'src>, Module, Error = ParseError<'src>> {
    procedure_parser()
        .repeated()
        .then_ignore(end())
        .map(|procedures| Module { procedures })
        .labelled("module")
}

fn procedure_parser<'src>() -> impl Parser<Token<'src>, Procedure, Error = ParseError<'src>> {
    let name = select! {
        Token::Global(name) => Name::from(name),
    }
    .labelled("procedure name");

    // Instructions written before the first label form an unlabeled entry block.
    let entry = instruction_parser()
        .repeated()
        .at_least(1)
        .map(Block::unlabeled)
        .or_not();

    let body = entry
        .then(block_parser().repeated())
        .delimited_by(just(Token::LBrace), just(Token::RBrace))
        .map(|(entry, blocks)| entry.into_iter().chain(blocks).collect::<Vec<_>>());

    just(Token::Define)
        .ignore_then(name)
        .then(body)
        .map(|(name, blocks)| Procedure { name, blocks })
        .labelled("procedure")
}

fn block_parser<'src>() -> impl Parser<Token<'src>, Block, Error = ParseError<'src>> {
    let label = select! {
        Token::BlockLabel(label) => Name::from(label),
    }
    .labelled("block label");

    label
        .then(instruction_parser().repeated())
        .map(|(label, instructions)| Block {
            label: Some(label),
            instructions,
        })
        .labelled("block")
}

fn instruction_parser<'src>() -> impl Parser<Token<'src>, Instruction, Error = ParseError<'src>> + Clone {
    let result = select! {
        Token::Assign(name) => Name::from(name),
    }
    .or_not();

    let opcode = select! {
        Token::Ident(opcode) => opcode,
    }
    .labelled("opcode");

    let operands = operand_parser().separated_by(just(Token::Comma));

    result
        .then(opcode)
        .then(operands)
        .validate(|((result, opcode), operands), span: Span, emit| {
            // A malformed instruction is reported but kept as a generic one so
            // that parsing carries on and later errors are found too.
            Instruction::from_parts(result.clone(), opcode, operands.clone()).unwrap_or_else(|message| {
                emit(Simple::custom(span, message));
                Instruction::Generic {
                    result,
                    opcode: opcode.to_string(),
                    operands,
                }
            })
        })
        .labelled("instruction")
}

fn operand_parser<'src>() -> impl Parser<Token<'src>, Operand, Error = ParseError<'src>> + Clone {
    let value = select! {
        Token::Local(name) => Operand::Local(Name::from(name)),
        Token::Global(name) => Operand::Global(Name::from(name)),
        Token::Int(value) => Operand::Const(value),
    };

    let label = just(Token::Label)
        .ignore_then(select! {
            Token::Local(name) => Operand::Label(Name::from(name)),
        })
        .labelled("label reference");

    value.or(label).labelled("operand")
}
