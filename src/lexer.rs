//! Splits IR source text into tokens.
//!
//! Whitespace and `;` line comments are skipped. Characters that fit no token
//! are kept as `Invalid` tokens so that the parser can report them with a span.
//!
//! A `%name` followed by `=` is merged into a single `Assign` token. Operand
//! lists may end with a `%name`, so the parser can only tell where the next
//! instruction starts if its result is a token of its own.

use std::fmt;

use logos::{Lexer, Logos};

use crate::document::{Span, Spanned};

#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+|;[^\n]*")]
pub enum Token<'src> {
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,

    // Reserved keywords
    #[token("define")]
    Define,
    #[token("label")]
    Label,

    #[regex(r"-?[0-9]+", parse_int)]
    Int(i64),

    // `%name`, the name without the sigil.
    #[regex(r"%[A-Za-z0-9_.$]+", strip_sigil)]
    Local(&'src str),

    // `@name`, the name without the sigil.
    #[regex(r"@[A-Za-z0-9_.$]+", strip_sigil)]
    Global(&'src str),

    // `name:` opening a block, the name without the colon.
    #[regex(r"[A-Za-z_.$][A-Za-z0-9_.$]*:", strip_colon)]
    BlockLabel(&'src str),

    // An opcode such as `add` or `br`.
    #[regex(r"[A-Za-z_.$][A-Za-z0-9_.$]*", priority = 2)]
    Ident(&'src str),

    // `%name =`, the result of an instruction.
    Assign(&'src str),

    Invalid(&'src str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LBrace => f.write_str("`{`"),
            Token::RBrace => f.write_str("`}`"),
            Token::Comma => f.write_str("`,`"),
            Token::Eq => f.write_str("`=`"),
            Token::Define => f.write_str("`define`"),
            Token::Label => f.write_str("`label`"),
            Token::Int(value) => write!(f, "`{value}`"),
            Token::Local(name) => write!(f, "`%{name}`"),
            Token::Global(name) => write!(f, "`@{name}`"),
            Token::BlockLabel(name) => write!(f, "`{name}:`"),
            Token::Ident(name) => write!(f, "`{name}`"),
            Token::Assign(name) => write!(f, "`%{name} =`"),
            Token::Invalid(text) => write!(f, "invalid token `{text}`"),
        }
    }
}

/// Takes IR source text and splits it into a sequence of tokens.
pub fn tokenize(src: &str) -> Vec<Spanned<Token<'_>>> {
    let mut tokens: Vec<Spanned<Token>> = Vec::new();
    for (result, range) in Token::lexer(src).spanned() {
        let token = result.unwrap_or_else(|_| Token::Invalid(&src[range.clone()]));
        let span = Span::from(range);
        if token == Token::Eq {
            if let Some(last) = tokens.last_mut() {
                if let Token::Local(name) = last.value {
                    *last = Spanned::new(Token::Assign(name), last.span.to(span));
                    continue;
                }
            }
        }
        tokens.push(Spanned::new(token, span));
    }
    tokens
}

fn parse_int<'src>(lex: &mut Lexer<'src, Token<'src>>) -> Option<i64> {
    lex.slice().parse().ok()
}

fn strip_sigil<'src>(lex: &mut Lexer<'src, Token<'src>>) -> &'src str {
    &lex.slice()[1..]
}

fn strip_colon<'src>(lex: &mut Lexer<'src, Token<'src>>) -> &'src str {
    let slice = lex.slice();
    &slice[..slice.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn token(token: Token, start: usize, end: usize) -> Spanned<Token> {
        Spanned::new(token, Span::new(start, end))
    }

    #[test]
    fn empty() {
        let tokens = tokenize("");
        assert_eq!(tokens, vec![]);
    }

    #[test]
    fn whitespace_and_comments_only() {
        let src = " \t\n; nothing here\n  ;another";
        assert_eq!(tokenize(src), vec![]);
    }

    #[test]
    fn assignment() {
        let src = "%x = alloca";
        let expected = vec![
            token(Token::Assign("x"), 0, 4),
            token(Token::Ident("alloca"), 5, 11),
        ];
        assert_eq!(tokenize(src), expected);
    }

    #[test]
    fn result_after_operand() {
        let src = indoc! {"
            %v = load %x
            %w=add %v, 1
        "};
        let expected = vec![
            token(Token::Assign("v"), 0, 4),
            token(Token::Ident("load"), 5, 9),
            token(Token::Local("x"), 10, 12),
            token(Token::Assign("w"), 13, 16),
            token(Token::Ident("add"), 16, 19),
            token(Token::Local("v"), 20, 22),
            token(Token::Comma, 22, 23),
            token(Token::Int(1), 24, 25),
        ];
        assert_eq!(tokenize(src), expected);
    }

    #[test]
    fn stray_equals_sign() {
        let tokens: Vec<Token> = tokenize("ret = 1").into_iter().map(|t| t.value).collect();
        assert_eq!(tokens, vec![Token::Ident("ret"), Token::Eq, Token::Int(1)]);
    }

    #[test]
    fn store_with_negative_constant() {
        let src = "store -12, %0";
        let expected = vec![
            token(Token::Ident("store"), 0, 5),
            token(Token::Int(-12), 6, 9),
            token(Token::Comma, 9, 10),
            token(Token::Local("0"), 11, 13),
        ];
        assert_eq!(tokenize(src), expected);
    }

    #[test]
    fn procedure_header_and_blocks() {
        let src = indoc! {"
            define @main {
            entry:
              br label %exit
            }
        "};
        let expected = vec![
            token(Token::Define, 0, 6),
            token(Token::Global("main"), 7, 12),
            token(Token::LBrace, 13, 14),
            token(Token::BlockLabel("entry"), 15, 21),
            token(Token::Ident("br"), 24, 26),
            token(Token::Label, 27, 32),
            token(Token::Local("exit"), 33, 38),
            token(Token::RBrace, 39, 40),
        ];
        assert_eq!(tokenize(src), expected);
    }

    #[test]
    fn keywords_are_not_opcodes() {
        let tokens: Vec<Token> = tokenize("define label defined").into_iter().map(|t| t.value).collect();
        assert_eq!(tokens, vec![Token::Define, Token::Label, Token::Ident("defined")]);
    }

    #[test]
    fn invalid_characters() {
        let src = "%x # 1";
        let expected = vec![
            token(Token::Local("x"), 0, 2),
            token(Token::Invalid("#"), 3, 4),
            token(Token::Int(1), 5, 6),
        ];
        assert_eq!(tokenize(src), expected);
    }
}
