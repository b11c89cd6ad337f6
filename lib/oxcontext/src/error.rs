//! Error types.

use oxrdf::NamedNode;

/// An error raised while parsing the compact axiom syntax.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: '{fragment}'")]
pub struct ParseError {
    kind: ParseErrorKind,
    fragment: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, fragment: impl Into<String>) -> Self {
        Self {
            kind,
            fragment: fragment.into(),
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// The part of the input the error is about.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unbalanced parentheses")]
    UnbalancedParens,
    #[error("invalid identifier")]
    BadIdentifier,
    #[error("wrong number of operands")]
    BadArity,
    #[error("missing '.' after the quantified role")]
    MissingQuantifierDot,
    #[error("unknown operator")]
    UnknownOperator,
    #[error("expression nested too deeply")]
    NestingTooDeep,
}

/// A rewrite met an axiom it has no rule for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no {operation} rule for {constructor} axioms: {axiom}")]
pub struct UnhandledConstructorError {
    operation: &'static str,
    constructor: &'static str,
    axiom: String,
}

impl UnhandledConstructorError {
    pub(crate) fn new(operation: &'static str, constructor: &'static str, axiom: String) -> Self {
        Self {
            operation,
            constructor,
            axiom,
        }
    }

    /// The constructor name of the rejected axiom, e.g. `TransitiveObjectProperty`.
    pub fn constructor(&self) -> &'static str {
        self.constructor
    }
}

/// An error raised while building or querying a [`ContextModel`](crate::ContextModel).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextModelError {
    #[error("the axiom {axiom} is defined by more than one naming concept")]
    MultipleDefinitions { axiom: String },
    #[error("the axiom {axiom} is defined by {value}, which is not a concept IRI")]
    NonIriDefinition { axiom: String, value: String },
    #[error("the axiom {axiom} is both addressed by a naming concept and global")]
    AddressedGlobalAxiom { axiom: String },
    #[error("{concept} cannot be used as a naming concept")]
    ReservedNamingConcept { concept: NamedNode },
    #[error("the naming concept {concept} defines more than one axiom")]
    DuplicateNamingConcept { concept: NamedNode },
    #[error("the axiom addressed by {concept} has no negation: {source}")]
    UndefinedNegation {
        concept: NamedNode,
        #[source]
        source: UnhandledConstructorError,
    },
    #[error("{concept} is not a registered naming concept")]
    UnregisteredNamingConcept { concept: NamedNode },
    #[error("{concept} is both positive and negative in the same type")]
    ConflictingPolarity { concept: NamedNode },
}
