//! Contextualized description logic ontologies for Oxigraph.
//!
//! A contextualized ontology mixes meta level axioms with object level axioms
//! addressed by *naming concepts*. This crate provides:
//! - A data model for ALC axioms with qualified cardinalities and nominals
//! - A parser for a compact surface syntax (`C ⊑ D`, `r(a,b) @ N`, ...)
//! - Negation and dual rewriting of axioms
//! - The [`ContextModel`], which splits an ontology into its meta ontology and
//!   builds the object ontology of every branch described by a [`Type`]
//! - The [`Flexibilizer`], which duplicates flexible names for branch local
//!   reasoning
//!
//! # Example
//! ```
//! use oxcontext::{ContextModel, SyntaxParser, Type};
//!
//! let parser = SyntaxParser::new();
//! let ontology = parser.parse_ontology(
//!     "N ⊑ M\n\
//!      A ⊑ ⊥ @ N\n\
//!      B ⊑ C @ global",
//! )?;
//! let model = ContextModel::new(&ontology)?;
//! assert_eq!(model.meta_ontology().axiom_count(), 1);
//!
//! let n = model.naming_concepts().next().cloned().unwrap();
//! let positive = model.object_ontology(&Type::new([n.clone()], [])?)?;
//! assert_eq!(positive.len(), 2);
//! let negative = model.object_ontology(&Type::new([], [n])?)?;
//! assert!(negative.iter().any(|a| a.to_string().starts_with("A(")));
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

mod annotation;
mod axiom;
mod context;
mod dual;
mod entity;
mod error;
mod expression;
mod flexibilizer;
mod negation;
mod ontology;
mod syntax;

pub use annotation::{AnnotatedAxiom, Annotation, AnnotationValue, vocab};
pub use axiom::{Axiom, Signature};
pub use context::{ContextModel, ObjectOntology, Type};
pub use dual::{DUAL_PREFIX, DualRewriter, dual_class, is_dual_class};
pub use entity::{AnnotationProperty, Individual, NOTHING, ObjectProperty, OwlClass, THING};
pub use error::{ContextModelError, ParseError, ParseErrorKind, UnhandledConstructorError};
pub use expression::{ClassExpression, ObjectPropertyExpression};
pub use flexibilizer::{Flexibilizer, FlexibilizerConfig, RenameReport};
pub use negation::{conjunction, negate_axiom, negate_class_expression};
pub use ontology::Ontology;
pub use syntax::{ParserConfig, SyntaxParser};
