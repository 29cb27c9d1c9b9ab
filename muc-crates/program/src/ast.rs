//! The statements of a program as they are written, before intervals are expanded.

use std::fmt::Display;
use std::fmt::Formatter;

use itertools::Itertools;
use muc_core::Symbol;
use muc_core::Term;

/// A parsed program: a sequence of statements in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    /// `p(1..3).`: every instance of the atom is true.
    Fact(AtomPattern),
    /// `{ p(1); q }.`: every instance of the atoms is free to be true or false.
    Choice(Vec<AtomPattern>),
    /// `:- p(1), not q.`: the body literals may not hold together.
    Constraint(Constraint),
}

/// An integrity constraint together with the place it was written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constraint {
    pub body: Vec<BodyLiteral>,
    /// Absent for constraints which were not parsed from source text.
    pub location: Option<Location>,
}

/// A location in the source, both components start at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A [`Position`] in a named source, such as a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub source: Option<String>,
    pub position: Position,
}

/// An atom whose arguments may contain intervals, e.g. `a(1..5, x)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomPattern {
    pub name: String,
    pub arguments: Vec<TermPattern>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TermPattern {
    Number(i64),
    /// The integers from the first to the second bound, both inclusive.
    Interval(i64, i64),
    Constant(String),
    String(String),
    Function(AtomPattern),
}

/// A possibly negated atom in the body of a constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BodyLiteral {
    pub atom: Symbol,
    pub is_positive: bool,
}

impl Program {
    /// Attributes the locations of all constraints to the source called `name`.
    pub fn set_source_name(&mut self, name: &str) {
        for statement in &mut self.statements {
            if let Statement::Constraint(Constraint {
                location: Some(location),
                ..
            }) = statement
            {
                location.source = Some(name.to_owned());
            }
        }
    }

    /// The constraints of the program in source order.
    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> + '_ {
        self.statements.iter().filter_map(|statement| match statement {
            Statement::Constraint(constraint) => Some(constraint),
            _ => None,
        })
    }
}

impl AtomPattern {
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// The number of atoms the pattern stands for, saturating at `u128::MAX`.
    pub fn num_instances(&self) -> u128 {
        self.arguments
            .iter()
            .map(TermPattern::num_instances)
            .fold(1, u128::saturating_mul)
    }

    /// Expands the intervals in the arguments; the atom stands for every combination of argument
    /// values. An empty interval results in no atoms.
    ///
    /// The result holds [`AtomPattern::num_instances`] symbols, which the parser bounds by
    /// [`MAX_INSTANCES`](crate::MAX_INSTANCES).
    pub fn instances(&self) -> Vec<Symbol> {
        if self.arguments.is_empty() {
            return vec![Symbol::constant(self.name.as_str())];
        }

        self.arguments
            .iter()
            .map(TermPattern::instances)
            .multi_cartesian_product()
            .map(|arguments| Symbol::new(self.name.as_str(), arguments))
            .collect()
    }

    /// Returns the symbol of the atom if it does not contain any interval.
    pub fn as_symbol(&self) -> Option<Symbol> {
        let arguments = self
            .arguments
            .iter()
            .map(TermPattern::as_term)
            .collect::<Option<Vec<_>>>()?;

        Some(Symbol::new(self.name.as_str(), arguments))
    }
}

impl From<&Symbol> for AtomPattern {
    fn from(symbol: &Symbol) -> Self {
        AtomPattern {
            name: symbol.name().to_owned(),
            arguments: symbol.arguments().iter().map(TermPattern::from).collect(),
        }
    }
}

impl From<&Term> for TermPattern {
    fn from(term: &Term) -> Self {
        match term {
            Term::Number(number) => TermPattern::Number(*number),
            Term::Constant(constant) => TermPattern::Constant(constant.clone()),
            Term::String(string) => TermPattern::String(string.clone()),
            Term::Function(symbol) => TermPattern::Function(AtomPattern::from(symbol)),
        }
    }
}

impl TermPattern {
    fn num_instances(&self) -> u128 {
        match self {
            TermPattern::Interval(lower, upper) if lower > upper => 0,
            TermPattern::Interval(lower, upper) => {
                (i128::from(*upper) - i128::from(*lower)) as u128 + 1
            }
            TermPattern::Function(atom) => atom.num_instances(),
            TermPattern::Number(_) | TermPattern::Constant(_) | TermPattern::String(_) => 1,
        }
    }

    fn instances(&self) -> Vec<Term> {
        match self {
            TermPattern::Number(number) => vec![Term::Number(*number)],
            TermPattern::Interval(lower, upper) => (*lower..=*upper).map(Term::Number).collect(),
            TermPattern::Constant(constant) => vec![Term::Constant(constant.clone())],
            TermPattern::String(string) => vec![Term::String(string.clone())],
            TermPattern::Function(atom) => atom.instances().into_iter().map(Term::Function).collect(),
        }
    }

    fn as_term(&self) -> Option<Term> {
        match self {
            TermPattern::Number(number) => Some(Term::Number(*number)),
            TermPattern::Interval(_, _) => None,
            TermPattern::Constant(constant) => Some(Term::Constant(constant.clone())),
            TermPattern::String(string) => Some(Term::String(string.clone())),
            TermPattern::Function(atom) => atom.as_symbol().map(Term::Function),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{statement}")?;
        }

        Ok(())
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Fact(atom) => write!(f, "{atom}."),
            Statement::Choice(atoms) => write!(f, "{{ {} }}.", atoms.iter().join("; ")),
            Statement::Constraint(constraint) => write!(f, "{constraint}"),
        }
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, ":- {}.", self.body.iter().join(", "))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{source}:{}", self.position),
            None => write!(f, "{}", self.position),
        }
    }
}

impl Display for AtomPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.arguments.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}({})", self.name, self.arguments.iter().join(","))
        }
    }
}

impl Display for TermPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TermPattern::Number(number) => write!(f, "{number}"),
            TermPattern::Interval(lower, upper) => write!(f, "{lower}..{upper}"),
            TermPattern::Constant(constant) => write!(f, "{constant}"),
            TermPattern::String(string) => write!(f, "\"{string}\""),
            TermPattern::Function(atom) => write!(f, "{atom}"),
        }
    }
}

impl Display for BodyLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_positive {
            write!(f, "{}", self.atom)
        } else {
            write!(f, "not {}", self.atom)
        }
    }
}

#[cfg(test)]
mod tests {
    use muc_core::Symbol;
    use muc_core::Term;

    use super::AtomPattern;
    use super::BodyLiteral;
    use super::Constraint;
    use super::Location;
    use super::Position;
    use super::Program;
    use super::Statement;
    use super::TermPattern;

    fn pattern(arguments: Vec<TermPattern>) -> AtomPattern {
        AtomPattern {
            name: "a".to_owned(),
            arguments,
        }
    }

    #[test]
    fn intervals_expand_to_the_cartesian_product() {
        let atom = pattern(vec![
            TermPattern::Interval(1, 2),
            TermPattern::Constant("x".to_owned()),
            TermPattern::Interval(5, 6),
        ]);

        let instances = atom
            .instances()
            .into_iter()
            .map(|symbol| symbol.to_string())
            .collect::<Vec<_>>();

        assert_eq!(instances, vec!["a(1,x,5)", "a(1,x,6)", "a(2,x,5)", "a(2,x,6)"]);
        assert_eq!(atom.as_symbol(), None);
    }

    #[test]
    fn empty_intervals_have_no_instances() {
        assert!(pattern(vec![TermPattern::Interval(3, 1)]).instances().is_empty());
    }

    #[test]
    fn atoms_without_intervals_are_symbols() {
        let atom = pattern(vec![TermPattern::Number(4)]);

        assert_eq!(
            atom.as_symbol(),
            Some(Symbol::new("a", vec![Term::Number(4)]))
        );
        assert_eq!(atom.instances().len(), 1);
        assert_eq!(atom.to_string(), "a(4)");
    }

    #[test]
    fn instances_are_counted_without_expanding() {
        let atom = pattern(vec![
            TermPattern::Interval(1, 1000),
            TermPattern::Function(pattern(vec![TermPattern::Interval(-2, 2)])),
        ]);

        assert_eq!(atom.num_instances(), 5000);
        assert_eq!(pattern(vec![TermPattern::Interval(2, 1)]).num_instances(), 0);
        assert_eq!(pattern(vec![]).num_instances(), 1);
    }

    #[test]
    fn instance_counts_of_extreme_intervals_do_not_overflow() {
        let full_range = TermPattern::Interval(i64::MIN, i64::MAX);

        assert_eq!(
            pattern(vec![full_range.clone()]).num_instances(),
            1_u128 << 64
        );
        assert_eq!(
            pattern(vec![full_range.clone(), full_range.clone(), full_range]).num_instances(),
            u128::MAX
        );
    }

    #[test]
    fn symbols_convert_to_patterns() {
        let symbol = Symbol::new(
            "a",
            vec![
                Term::Number(-3),
                Term::Function(Symbol::new("f", vec![Term::String("s".to_owned())])),
            ],
        );

        let atom = AtomPattern::from(&symbol);

        assert_eq!(atom.to_string(), "a(-3,f(\"s\"))");
        assert_eq!(atom.as_symbol(), Some(symbol));
    }

    #[test]
    fn constraint_locations_are_attributed_to_a_source() {
        let located = Constraint {
            body: vec![BodyLiteral {
                atom: Symbol::constant("b"),
                is_positive: false,
            }],
            location: Some(Location {
                source: None,
                position: Position { line: 2, column: 1 },
            }),
        };
        let mut program = Program {
            statements: vec![
                Statement::Fact(pattern(vec![TermPattern::Number(1)])),
                Statement::Constraint(located),
            ],
        };

        program.set_source_name("example.lp");

        let constraints = program.constraints().collect::<Vec<_>>();
        assert_eq!(constraints.len(), 1);
        assert_eq!(constraints[0].to_string(), ":- not b.");
        let location = constraints[0].location.as_ref().expect("parsed constraint");
        assert_eq!(location.to_string(), "example.lp:2:1");
    }
}
