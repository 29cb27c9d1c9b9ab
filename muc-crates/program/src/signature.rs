use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static SIGNATURE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^([a-zA-Z_][a-zA-Z0-9_]*)/([0-9]+)$").expect("the signature pattern is valid")
});

/// The name and arity of an atom, written `name/arity`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature {
    name: String,
    arity: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureParseError {
    #[error("'{0}' is not a signature of the form name/arity")]
    Malformed(String),
    #[error("the arity of '{0}' is too large")]
    ArityOutOfRange(String),
}

impl Signature {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Signature {
            name: name.into(),
            arity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns true if an atom with `name` and `arity` has this signature.
    pub(crate) fn matches(&self, name: &str, arity: usize) -> bool {
        self.name == name && self.arity == arity
    }
}

impl FromStr for Signature {
    type Err = SignatureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = SIGNATURE_PATTERN
            .captures(s)
            .ok_or_else(|| SignatureParseError::Malformed(s.to_owned()))?;

        let arity = captures[2]
            .parse::<usize>()
            .map_err(|_| SignatureParseError::ArityOutOfRange(s.to_owned()))?;

        Ok(Signature::new(&captures[1], arity))
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

#[cfg(test)]
mod tests {
    use super::Signature;
    use super::SignatureParseError;

    #[test]
    fn signatures_are_parsed_from_name_and_arity() {
        let signature: Signature = "edge/2".parse().expect("valid signature");

        assert_eq!(signature, Signature::new("edge", 2));
        assert_eq!(signature.to_string(), "edge/2");
    }

    #[test]
    fn malformed_signatures_are_rejected() {
        for input in ["edge", "edge/", "/2", "edge/two", "1edge/2", "edge/2/3", " edge/2"] {
            assert_eq!(
                input.parse::<Signature>(),
                Err(SignatureParseError::Malformed(input.to_owned())),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn huge_arities_are_rejected() {
        let input = "a/99999999999999999999999";

        assert_eq!(
            input.parse::<Signature>(),
            Err(SignatureParseError::ArityOutOfRange(input.to_owned()))
        );
    }

    #[test]
    fn matching_considers_name_and_arity() {
        let signature = Signature::new("a", 1);

        assert!(signature.matches("a", 1));
        assert!(!signature.matches("a", 0));
        assert!(!signature.matches("b", 1));
    }
}
