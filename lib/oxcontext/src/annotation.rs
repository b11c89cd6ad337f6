//! Annotations routing axioms between the meta and object levels.
//!
//! Three annotation forms are recognized:
//! - `definedBy N` on an axiom: the axiom is the object axiom addressed by the
//!   naming concept `N`;
//! - `rdfs:label "objectGlobal"` on an axiom: the axiom belongs to every
//!   object ontology;
//! - `rdfs:label "rigid"` on an entity: the entity is shared across branches.

use crate::axiom::Axiom;
use crate::entity::{AnnotationProperty, OwlClass};
use oxrdf::{Literal, NamedNode};
use std::fmt;

pub mod vocab {
    //! Vocabulary of the contextual annotations.
    use oxrdf::NamedNodeRef;

    /// Namespace of the contextual vocabulary.
    pub const NAMESPACE: &str = "http://oxigraph.org/context#";

    /// Links an object axiom to its naming concept.
    pub const DEFINED_BY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://oxigraph.org/context#definedBy");

    /// `rdfs:label`, whose literal values mark global axioms and rigid entities.
    pub const LABEL: NamedNodeRef<'static> = oxrdf::vocab::rdfs::LABEL;

    pub const OBJECT_GLOBAL: &str = "objectGlobal";

    pub const RIGID: &str = "rigid";
}

/// The value of an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationValue {
    Iri(NamedNode),
    Literal(Literal),
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "{iri}"),
            Self::Literal(literal) => write!(f, "{literal}"),
        }
    }
}

/// An annotation: a property and its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    property: AnnotationProperty,
    value: AnnotationValue,
}

impl Annotation {
    pub fn new(property: impl Into<AnnotationProperty>, value: AnnotationValue) -> Self {
        Self {
            property: property.into(),
            value,
        }
    }

    /// `definedBy naming_concept`.
    pub fn defined_by(naming_concept: &OwlClass) -> Self {
        Self::new(
            vocab::DEFINED_BY,
            AnnotationValue::Iri(naming_concept.iri().clone()),
        )
    }

    /// `rdfs:label label`.
    pub fn label(label: impl Into<String>) -> Self {
        Self::new(
            vocab::LABEL,
            AnnotationValue::Literal(Literal::new_simple_literal(label)),
        )
    }

    /// `rdfs:label "objectGlobal"`.
    pub fn object_global() -> Self {
        Self::label(vocab::OBJECT_GLOBAL)
    }

    /// `rdfs:label "rigid"`.
    pub fn rigid() -> Self {
        Self::label(vocab::RIGID)
    }

    pub fn property(&self) -> &AnnotationProperty {
        &self.property
    }

    pub fn value(&self) -> &AnnotationValue {
        &self.value
    }

    pub fn is_defined_by(&self) -> bool {
        *self.property.iri() == vocab::DEFINED_BY
    }

    /// Checks if this is an `rdfs:label` with the given plain value.
    pub fn is_label(&self, label: &str) -> bool {
        *self.property.iri() == vocab::LABEL
            && matches!(&self.value, AnnotationValue::Literal(l) if l.value() == label)
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.property, self.value)
    }
}

/// An axiom together with its annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotatedAxiom {
    axiom: Axiom,
    annotations: Vec<Annotation>,
}

impl AnnotatedAxiom {
    pub fn new(axiom: Axiom) -> Self {
        Self {
            axiom,
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn axiom(&self) -> &Axiom {
        &self.axiom
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn into_axiom(self) -> Axiom {
        self.axiom
    }

    pub fn into_parts(self) -> (Axiom, Vec<Annotation>) {
        (self.axiom, self.annotations)
    }

    /// Values of the `definedBy` annotations, normally at most one.
    pub fn defined_by(&self) -> impl Iterator<Item = &AnnotationValue> {
        self.annotations
            .iter()
            .filter(|a| a.is_defined_by())
            .map(Annotation::value)
    }

    pub fn is_object_global(&self) -> bool {
        self.annotations
            .iter()
            .any(|a| a.is_label(vocab::OBJECT_GLOBAL))
    }

    /// Checks if the axiom is neither addressed nor global.
    pub fn is_meta(&self) -> bool {
        self.defined_by().next().is_none() && !self.is_object_global()
    }
}

impl From<Axiom> for AnnotatedAxiom {
    fn from(axiom: Axiom) -> Self {
        Self::new(axiom)
    }
}

impl fmt::Display for AnnotatedAxiom {
    /// Writes the axiom followed by its contextual tag, if any, in the
    /// compact syntax (`@ N` or `@ global`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.axiom)?;
        for value in self.defined_by() {
            match value {
                AnnotationValue::Iri(iri) => {
                    write!(f, " @ {}", crate::entity::split_iri(iri.as_str()).1)?;
                }
                AnnotationValue::Literal(literal) => write!(f, " @ {literal}")?,
            }
        }
        if self.is_object_global() {
            f.write_str(" @ global")?;
        }
        Ok(())
    }
}
