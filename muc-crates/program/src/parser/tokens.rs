use std::fmt::Display;
use std::fmt::Formatter;

use chumsky::error::Rich;
use chumsky::extra;
use chumsky::prelude::any;
use chumsky::prelude::choice;
use chumsky::prelude::just;
use chumsky::prelude::none_of;
use chumsky::span::SimpleSpan;
use chumsky::text::ascii::ident;
use chumsky::text::int;
use chumsky::IterParser;
use chumsky::Parser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Token<'src> {
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Comma,
    SemiColon,
    Period,
    DoublePeriod,
    /// `:-`
    If,
    /// An identifier starting with a lowercase letter or an underscore.
    Ident(&'src str),
    /// An identifier starting with an uppercase letter.
    Variable(&'src str),
    Integer(i64),
    /// The contents of a quoted string.
    String(&'src str),
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::OpenBrace => write!(f, "{{"),
            Token::CloseBrace => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::SemiColon => write!(f, ";"),
            Token::Period => write!(f, "."),
            Token::DoublePeriod => write!(f, ".."),
            Token::If => write!(f, ":-"),
            Token::Ident(name) | Token::Variable(name) => write!(f, "{name}"),
            Token::Integer(integer) => write!(f, "{integer}"),
            Token::String(string) => write!(f, "\"{string}\""),
        }
    }
}

type LexExtra<'src> = extra::Err<Rich<'src, char>>;

/// Splits the source into tokens and their spans, skipping whitespace and `%` comments.
///
/// The only custom error of the lexer is an integer literal which does not fit an `i64`.
pub(super) fn lex<'src>(
) -> impl Parser<'src, &'src str, Vec<(Token<'src>, SimpleSpan)>, LexExtra<'src>> {
    token()
        .padded_by(comment().repeated())
        .padded()
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(comment().repeated())
        .padded()
}

fn comment<'src>() -> impl Parser<'src, &'src str, (), LexExtra<'src>> {
    just("%")
        .then(any().and_is(just('\n').not()).repeated())
        .padded()
        .ignored()
}

fn token<'src>() -> impl Parser<'src, &'src str, (Token<'src>, SimpleSpan), LexExtra<'src>> {
    choice((
        // Punctuation
        just(":-").to(Token::If),
        just("..").to(Token::DoublePeriod),
        just(".").to(Token::Period),
        just(",").to(Token::Comma),
        just(";").to(Token::SemiColon),
        just("(").to(Token::OpenParen),
        just(")").to(Token::CloseParen),
        just("{").to(Token::OpenBrace),
        just("}").to(Token::CloseBrace),
        // Values
        int_literal().map(Token::Integer),
        string_literal().map(Token::String),
        // Identifiers (including `not`)
        ident().map(|name: &'src str| {
            if name.starts_with(|character: char| character.is_ascii_uppercase()) {
                Token::Variable(name)
            } else {
                Token::Ident(name)
            }
        }),
    ))
    .map_with(|token, extra| {
        let span: SimpleSpan = extra.span();
        (token, span)
    })
}

fn int_literal<'src>() -> impl Parser<'src, &'src str, i64, LexExtra<'src>> {
    just("-")
        .or_not()
        .ignore_then(int(10))
        .to_slice()
        .try_map(|literal: &str, span| {
            literal
                .parse()
                .map_err(|_| Rich::custom(span, format!("'{literal}' is not a valid integer")))
        })
}

fn string_literal<'src>() -> impl Parser<'src, &'src str, &'src str, LexExtra<'src>> {
    none_of("\"\n")
        .repeated()
        .to_slice()
        .delimited_by(just('"'), just('"'))
}

#[cfg(test)]
mod tests {
    use chumsky::Parser;

    use super::lex;
    use super::Token;

    fn tokens(source: &str) -> Vec<Token<'_>> {
        lex()
            .parse(source)
            .into_result()
            .expect("valid tokens")
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn punctuation_and_values_are_recognised() {
        assert_eq!(
            tokens(":- a(-1..20), not \"s t\"."),
            vec![
                Token::If,
                Token::Ident("a"),
                Token::OpenParen,
                Token::Integer(-1),
                Token::DoublePeriod,
                Token::Integer(20),
                Token::CloseParen,
                Token::Comma,
                Token::Ident("not"),
                Token::String("s t"),
                Token::Period,
            ]
        );
    }

    #[test]
    fn comments_and_whitespace_are_skipped() {
        assert_eq!(
            tokens("% leading\n  { b; X }. % trailing\n% only a comment"),
            vec![
                Token::OpenBrace,
                Token::Ident("b"),
                Token::SemiColon,
                Token::Variable("X"),
                Token::CloseBrace,
                Token::Period,
            ]
        );
        assert!(tokens("  % nothing else\n").is_empty());
    }

    #[test]
    fn spans_are_byte_offsets() {
        let spanned = lex().parse("a.\n  bc.").into_result().expect("valid tokens");

        let ranges = spanned
            .iter()
            .map(|(_, span)| span.start..span.end)
            .collect::<Vec<_>>();
        assert_eq!(ranges, vec![0..1, 1..2, 5..7, 7..8]);
    }
}
