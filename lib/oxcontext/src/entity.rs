//! Named entities of the object and meta levels (classes, roles, individuals).

use oxrdf::{BlankNode, NamedNode, NamedNodeRef, Term};
use std::fmt;

/// `owl:Thing`, written `⊤` in the compact syntax.
pub const THING: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Thing");
/// `owl:Nothing`, written `⊥` in the compact syntax.
pub const NOTHING: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Nothing");

/// Splits an IRI into its namespace and local name.
///
/// The local name is whatever follows the last `#` or `/`.
/// IRIs without such a separator have an empty namespace.
pub fn split_iri(iri: &str) -> (&str, &str) {
    match iri.rfind(['#', '/']) {
        Some(position) => iri.split_at(position + 1),
        None => ("", iri),
    }
}

/// An atomic concept.
///
/// Naming concepts are ordinary classes: they are only special in that an
/// object axiom is addressed through them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwlClass(NamedNode);

impl OwlClass {
    #[inline]
    pub fn new(iri: NamedNode) -> Self {
        Self(iri)
    }

    /// Creates a new class from an IRI string.
    #[inline]
    pub fn new_from_iri(iri: impl Into<String>) -> Result<Self, oxrdf::IriParseError> {
        Ok(Self(NamedNode::new(iri)?))
    }

    /// The top concept `⊤`.
    #[inline]
    pub fn thing() -> Self {
        Self(THING.into_owned())
    }

    /// The bottom concept `⊥`.
    #[inline]
    pub fn nothing() -> Self {
        Self(NOTHING.into_owned())
    }

    #[inline]
    pub fn iri(&self) -> &NamedNode {
        &self.0
    }

    #[inline]
    pub fn is_thing(&self) -> bool {
        self.0 == THING
    }

    #[inline]
    pub fn is_nothing(&self) -> bool {
        self.0 == NOTHING
    }

    /// The part of the IRI after the namespace.
    #[inline]
    pub fn local_name(&self) -> &str {
        split_iri(self.0.as_str()).1
    }

    #[inline]
    pub fn into_inner(self) -> NamedNode {
        self.0
    }
}

impl fmt::Display for OwlClass {
    /// Writes the compact syntax form: `⊤`, `⊥` or the local name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_thing() {
            f.write_str("⊤")
        } else if self.is_nothing() {
            f.write_str("⊥")
        } else {
            f.write_str(self.local_name())
        }
    }
}

impl From<NamedNode> for OwlClass {
    fn from(node: NamedNode) -> Self {
        Self(node)
    }
}

impl From<OwlClass> for NamedNode {
    fn from(class: OwlClass) -> Self {
        class.0
    }
}

impl From<OwlClass> for Term {
    fn from(class: OwlClass) -> Self {
        class.0.into()
    }
}

/// An atomic role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectProperty(NamedNode);

impl ObjectProperty {
    #[inline]
    pub fn new(iri: NamedNode) -> Self {
        Self(iri)
    }

    /// Creates a new role from an IRI string.
    #[inline]
    pub fn new_from_iri(iri: impl Into<String>) -> Result<Self, oxrdf::IriParseError> {
        Ok(Self(NamedNode::new(iri)?))
    }

    #[inline]
    pub fn iri(&self) -> &NamedNode {
        &self.0
    }

    #[inline]
    pub fn local_name(&self) -> &str {
        split_iri(self.0.as_str()).1
    }

    #[inline]
    pub fn into_inner(self) -> NamedNode {
        self.0
    }
}

impl fmt::Display for ObjectProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

impl From<NamedNode> for ObjectProperty {
    fn from(node: NamedNode) -> Self {
        Self(node)
    }
}

impl From<ObjectProperty> for NamedNode {
    fn from(property: ObjectProperty) -> Self {
        property.0
    }
}

/// A property used to annotate axioms and entities.
///
/// Annotations carry no logical meaning; the context layer reads them to
/// route axioms between the meta and object levels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationProperty(NamedNode);

impl AnnotationProperty {
    #[inline]
    pub fn new(iri: NamedNode) -> Self {
        Self(iri)
    }

    #[inline]
    pub fn iri(&self) -> &NamedNode {
        &self.0
    }
}

impl fmt::Display for AnnotationProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NamedNode> for AnnotationProperty {
    fn from(node: NamedNode) -> Self {
        Self(node)
    }
}

impl From<NamedNodeRef<'_>> for AnnotationProperty {
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self(node.into_owned())
    }
}

/// An individual, named or anonymous.
///
/// Anonymous individuals are introduced by the negation of a subsumption,
/// which asserts the existence of a counter-example.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Individual {
    Named(NamedNode),
    Anonymous(BlankNode),
}

impl Individual {
    /// Creates a fresh anonymous individual.
    #[inline]
    pub fn fresh() -> Self {
        Self::Anonymous(BlankNode::default())
    }

    #[inline]
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }

    #[inline]
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous(_))
    }

    #[inline]
    pub fn as_named(&self) -> Option<&NamedNode> {
        match self {
            Self::Named(n) => Some(n),
            Self::Anonymous(_) => None,
        }
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => f.write_str(split_iri(n.as_str()).1),
            Self::Anonymous(b) => write!(f, "{b}"),
        }
    }
}

impl From<NamedNode> for Individual {
    fn from(node: NamedNode) -> Self {
        Self::Named(node)
    }
}

impl From<BlankNode> for Individual {
    fn from(node: BlankNode) -> Self {
        Self::Anonymous(node)
    }
}

impl From<Individual> for Term {
    fn from(individual: Individual) -> Self {
        match individual {
            Individual::Named(n) => n.into(),
            Individual::Anonymous(b) => b.into(),
        }
    }
}
