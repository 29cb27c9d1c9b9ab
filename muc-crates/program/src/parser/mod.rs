//! A parser for variable-free programs consisting of facts, choices and integrity constraints.
//!
//! The source is first split into [`Token`]s, which are then parsed into statements. Parsing stops
//! at the first error; the error carries the 1-based line and column at which it was detected.

mod tokens;

use chumsky::error::Rich;
use chumsky::error::RichReason;
use chumsky::extra;
use chumsky::input::Input;
use chumsky::input::ValueInput;
use chumsky::prelude::choice;
use chumsky::prelude::just;
use chumsky::prelude::recursive;
use chumsky::select;
use chumsky::span::SimpleSpan;
use chumsky::IterParser;
use chumsky::Parser;
use thiserror::Error;
use tokens::Token;

use crate::ast::AtomPattern;
use crate::ast::BodyLiteral;
use crate::ast::Constraint;
use crate::ast::Location;
use crate::ast::Position;
use crate::ast::Program;
use crate::ast::Statement;
use crate::ast::TermPattern;

/// The largest number of atoms a single fact or choice element may stand for.
pub const MAX_INSTANCES: u64 = 1_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgramParseError {
    #[error("{position}: unexpected {found}")]
    UnexpectedCharacter { found: String, position: Position },

    #[error("{position}: '{literal}' is not a valid integer")]
    InvalidNumber { literal: String, position: Position },

    #[error("{position}: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: Position,
    },

    #[error("{position}: variables such as '{name}' are not supported")]
    Variable { name: String, position: Position },

    #[error("{position}: intervals are not allowed in the body of a constraint")]
    IntervalInConstraint { position: Position },

    #[error("{position}: '{atom}' stands for more than {limit} atoms")]
    TooManyInstances {
        atom: String,
        limit: u64,
        position: Position,
    },
}

/// Parses the text of a program.
///
/// The locations of the constraints have no source name, see [`Program::set_source_name`].
pub fn parse_program(source: &str) -> Result<Program, ProgramParseError> {
    let tokens = tokens::lex()
        .parse(source)
        .into_result()
        .map_err(|errors| lex_error(source, &errors[0]))?;

    let end_of_input = SimpleSpan::from(source.len()..source.len());
    let parser_input = tokens.map(end_of_input, |(token, span)| (token, span));

    let statements = statements()
        .parse(parser_input)
        .into_result()
        .map_err(|errors| parse_error(source, &errors[0]))?;

    let statements = statements
        .into_iter()
        .map(|(statement, span)| statement.lower(source, span))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Program { statements })
}

/// A statement as it is parsed; constraint bodies still have to be checked for intervals.
#[derive(Debug)]
enum ParsedStatement {
    Fact(AtomPattern),
    Choice(Vec<AtomPattern>),
    Constraint(Vec<ParsedLiteral>),
}

#[derive(Debug)]
struct ParsedLiteral {
    is_positive: bool,
    atom: AtomPattern,
    span: SimpleSpan,
}

impl ParsedStatement {
    fn lower(self, source: &str, span: SimpleSpan) -> Result<Statement, ProgramParseError> {
        let position = position_at(source, span.start);

        match self {
            ParsedStatement::Fact(atom) => {
                check_instances(&atom, position)?;
                Ok(Statement::Fact(atom))
            }
            ParsedStatement::Choice(atoms) => {
                for atom in &atoms {
                    check_instances(atom, position)?;
                }
                Ok(Statement::Choice(atoms))
            }
            ParsedStatement::Constraint(body) => {
                let body = body
                    .into_iter()
                    .map(|literal| {
                        let atom = literal.atom.as_symbol().ok_or_else(|| {
                            ProgramParseError::IntervalInConstraint {
                                position: position_at(source, literal.span.start),
                            }
                        })?;

                        Ok(BodyLiteral {
                            atom,
                            is_positive: literal.is_positive,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Statement::Constraint(Constraint {
                    body,
                    location: Some(Location {
                        source: None,
                        position,
                    }),
                }))
            }
        }
    }
}

fn check_instances(atom: &AtomPattern, position: Position) -> Result<(), ProgramParseError> {
    if atom.num_instances() > u128::from(MAX_INSTANCES) {
        return Err(ProgramParseError::TooManyInstances {
            atom: atom.to_string(),
            limit: MAX_INSTANCES,
            position,
        });
    }

    Ok(())
}

/// The position of the byte at `offset`; offsets past the end map to the end of the source.
fn position_at(source: &str, offset: usize) -> Position {
    let before = source.get(..offset).unwrap_or(source);
    let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);

    Position {
        line: before.matches('\n').count() + 1,
        column: before[line_start..].chars().count() + 1,
    }
}

fn describe_found(found: Option<impl std::fmt::Display>) -> String {
    found.map_or_else(
        || "the end of the input".to_owned(),
        |found| format!("'{found}'"),
    )
}

fn lex_error(source: &str, error: &Rich<'_, char>) -> ProgramParseError {
    let span = error.span();
    let position = position_at(source, span.start);

    match error.reason() {
        RichReason::Custom(_) => ProgramParseError::InvalidNumber {
            literal: source.get(span.start..span.end).unwrap_or_default().to_owned(),
            position,
        },
        _ => ProgramParseError::UnexpectedCharacter {
            found: describe_found(error.found()),
            position,
        },
    }
}

fn parse_error(source: &str, error: &Rich<'_, Token<'_>>) -> ProgramParseError {
    let position = position_at(source, error.span().start);

    if let Some(Token::Variable(name)) = error.found() {
        return ProgramParseError::Variable {
            name: (*name).to_owned(),
            position,
        };
    }

    let mut expected = error
        .expected()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    expected.sort();
    expected.dedup();

    ProgramParseError::UnexpectedToken {
        expected: if expected.is_empty() {
            "something else".to_owned()
        } else {
            expected.join(" or ")
        },
        found: describe_found(error.found()),
        position,
    }
}

/// The extra data attached to the chumsky parsers.
type ProgramExtra<'tokens, 'src> = extra::Err<Rich<'tokens, Token<'src>>>;

fn statements<'tokens, 'src: 'tokens, I>(
) -> impl Parser<'tokens, I, Vec<(ParsedStatement, SimpleSpan)>, ProgramExtra<'tokens, 'src>>
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = SimpleSpan>,
{
    statement().repeated().collect()
}

fn statement<'tokens, 'src: 'tokens, I>(
) -> impl Parser<'tokens, I, (ParsedStatement, SimpleSpan), ProgramExtra<'tokens, 'src>>
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = SimpleSpan>,
{
    choice((
        just(Token::If)
            .ignore_then(body())
            .map(ParsedStatement::Constraint),
        atom()
            .separated_by(just(Token::SemiColon))
            .collect::<Vec<_>>()
            .delimited_by(just(Token::OpenBrace), just(Token::CloseBrace))
            .map(ParsedStatement::Choice),
        atom().map(ParsedStatement::Fact),
    ))
    .then_ignore(just(Token::Period))
    .map_with(|statement, extra| {
        let span: SimpleSpan = extra.span();
        (statement, span)
    })
}

fn body<'tokens, 'src: 'tokens, I>(
) -> impl Parser<'tokens, I, Vec<ParsedLiteral>, ProgramExtra<'tokens, 'src>>
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = SimpleSpan>,
{
    // `not` followed by an atom negates it, on its own it is an atom.
    choice((
        just(Token::Ident("not"))
            .ignore_then(atom())
            .map(|atom| (false, atom)),
        atom().map(|atom| (true, atom)),
    ))
    .map_with(|(is_positive, atom), extra| ParsedLiteral {
        is_positive,
        atom,
        span: extra.span(),
    })
    .separated_by(just(Token::Comma))
    .at_least(1)
    .collect()
}

fn atom<'tokens, 'src: 'tokens, I>(
) -> impl Parser<'tokens, I, AtomPattern, ProgramExtra<'tokens, 'src>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = SimpleSpan>,
{
    recursive(|atom| {
        let term = choice((
            integer()
                .then_ignore(just(Token::DoublePeriod))
                .then(integer())
                .map(|(lower, upper)| TermPattern::Interval(lower, upper)),
            integer().map(TermPattern::Number),
            string().map(|string: &str| TermPattern::String(string.to_owned())),
            atom.map(|atom: AtomPattern| {
                if atom.arguments.is_empty() {
                    TermPattern::Constant(atom.name)
                } else {
                    TermPattern::Function(atom)
                }
            }),
        ));

        identifier()
            .then(
                term.separated_by(just(Token::Comma))
                    .at_least(1)
                    .collect::<Vec<_>>()
                    .delimited_by(just(Token::OpenParen), just(Token::CloseParen))
                    .or_not(),
            )
            .map(|(name, arguments)| AtomPattern {
                name: name.to_owned(),
                arguments: arguments.unwrap_or_default(),
            })
    })
}

fn identifier<'tokens, 'src: 'tokens, I>(
) -> impl Parser<'tokens, I, &'src str, ProgramExtra<'tokens, 'src>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = SimpleSpan>,
{
    select! {
        Token::Ident(name) => name,
    }
}

fn integer<'tokens, 'src: 'tokens, I>(
) -> impl Parser<'tokens, I, i64, ProgramExtra<'tokens, 'src>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = SimpleSpan>,
{
    select! {
        Token::Integer(integer) => integer,
    }
}

fn string<'tokens, 'src: 'tokens, I>(
) -> impl Parser<'tokens, I, &'src str, ProgramExtra<'tokens, 'src>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = SimpleSpan>,
{
    select! {
        Token::String(string) => string,
    }
}
