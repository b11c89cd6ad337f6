//! Dual rewriting of addressed naming concepts.
//!
//! Every occurrence of an addressed concept `C` is replaced by `¬DUAL.C`,
//! where `DUAL.C` lives in the namespace of `C`. The rewrite is purely
//! structural: the result is not simplified.
//!
//! A dual name `DUAL.C` counts as an occurrence of `C`, so rewriting twice
//! with the same set turns `C` into `¬¬DUAL.DUAL.C`.

use crate::axiom::Axiom;
use crate::entity::{OwlClass, split_iri};
use crate::expression::ClassExpression;
use oxrdf::NamedNode;
use rustc_hash::FxHashSet;

/// Prefix added to the local name of a concept to build its dual.
pub const DUAL_PREFIX: &str = "DUAL.";

/// Returns the dual name `DUAL.C` of a concept `C`.
pub fn dual_class(class: &OwlClass) -> OwlClass {
    let (namespace, local_name) = split_iri(class.iri().as_str());
    // A valid IRI stays valid with an unreserved prefix on its last segment.
    OwlClass::new(NamedNode::new_unchecked(format!(
        "{namespace}{DUAL_PREFIX}{local_name}"
    )))
}

/// Checks if the concept is itself a dual name.
pub fn is_dual_class(class: &OwlClass) -> bool {
    class.local_name().starts_with(DUAL_PREFIX)
}

/// The concept a dual name was derived from, with every `DUAL.` prefix removed.
fn base_class(class: &OwlClass) -> Option<OwlClass> {
    let (namespace, local_name) = split_iri(class.iri().as_str());
    let mut base = local_name.strip_prefix(DUAL_PREFIX)?;
    while let Some(rest) = base.strip_prefix(DUAL_PREFIX) {
        base = rest;
    }
    NamedNode::new(format!("{namespace}{base}"))
        .ok()
        .map(OwlClass::new)
}

/// Rewrites axioms and concepts with respect to a set of addressed concepts.
#[derive(Debug, Clone, Copy)]
pub struct DualRewriter<'a> {
    addressed: &'a FxHashSet<OwlClass>,
}

impl<'a> DualRewriter<'a> {
    pub fn new(addressed: &'a FxHashSet<OwlClass>) -> Self {
        Self { addressed }
    }

    pub fn rewrite_class_expression(&self, expression: &ClassExpression) -> ClassExpression {
        match expression {
            ClassExpression::Class(class) => {
                if self.is_addressed(class) {
                    ClassExpression::complement(ClassExpression::Class(dual_class(class)))
                } else {
                    expression.clone()
                }
            }
            ClassExpression::ObjectIntersectionOf(operands) => {
                ClassExpression::ObjectIntersectionOf(self.rewrite_all(operands))
            }
            ClassExpression::ObjectUnionOf(operands) => {
                ClassExpression::ObjectUnionOf(self.rewrite_all(operands))
            }
            ClassExpression::ObjectComplementOf(inner) => {
                ClassExpression::complement(self.rewrite_class_expression(inner))
            }
            ClassExpression::ObjectOneOf(_) => expression.clone(),
            ClassExpression::ObjectSomeValuesFrom { property, filler } => {
                ClassExpression::ObjectSomeValuesFrom {
                    property: property.clone(),
                    filler: Box::new(self.rewrite_class_expression(filler)),
                }
            }
            ClassExpression::ObjectAllValuesFrom { property, filler } => {
                ClassExpression::ObjectAllValuesFrom {
                    property: property.clone(),
                    filler: Box::new(self.rewrite_class_expression(filler)),
                }
            }
            ClassExpression::ObjectMinCardinality {
                cardinality,
                property,
                filler,
            } => ClassExpression::ObjectMinCardinality {
                cardinality: *cardinality,
                property: property.clone(),
                filler: Box::new(self.rewrite_class_expression(filler)),
            },
            ClassExpression::ObjectMaxCardinality {
                cardinality,
                property,
                filler,
            } => ClassExpression::ObjectMaxCardinality {
                cardinality: *cardinality,
                property: property.clone(),
                filler: Box::new(self.rewrite_class_expression(filler)),
            },
            ClassExpression::ObjectExactCardinality {
                cardinality,
                property,
                filler,
            } => ClassExpression::ObjectExactCardinality {
                cardinality: *cardinality,
                property: property.clone(),
                filler: Box::new(self.rewrite_class_expression(filler)),
            },
        }
    }

    /// Rewrites the concepts of an axiom.
    ///
    /// Role axioms, role assertions, individual axioms and declarations have
    /// no concept position and are returned unchanged.
    pub fn rewrite_axiom(&self, axiom: &Axiom) -> Axiom {
        match axiom {
            Axiom::SubClassOf {
                sub_class,
                super_class,
            } => Axiom::SubClassOf {
                sub_class: self.rewrite_class_expression(sub_class),
                super_class: self.rewrite_class_expression(super_class),
            },
            Axiom::EquivalentClasses(classes) => Axiom::EquivalentClasses(self.rewrite_all(classes)),
            Axiom::DisjointClasses(classes) => Axiom::DisjointClasses(self.rewrite_all(classes)),
            Axiom::ObjectPropertyDomain { property, domain } => Axiom::ObjectPropertyDomain {
                property: property.clone(),
                domain: self.rewrite_class_expression(domain),
            },
            Axiom::ObjectPropertyRange { property, range } => Axiom::ObjectPropertyRange {
                property: property.clone(),
                range: self.rewrite_class_expression(range),
            },
            Axiom::ClassAssertion { class, individual } => Axiom::ClassAssertion {
                class: self.rewrite_class_expression(class),
                individual: individual.clone(),
            },
            Axiom::HasKey {
                class,
                object_properties,
            } => Axiom::HasKey {
                class: self.rewrite_class_expression(class),
                object_properties: object_properties.clone(),
            },
            Axiom::SubObjectPropertyOf { .. }
            | Axiom::InverseObjectProperties(_, _)
            | Axiom::TransitiveObjectProperty(_)
            | Axiom::ObjectPropertyAssertion { .. }
            | Axiom::NegativeObjectPropertyAssertion { .. }
            | Axiom::SameIndividual(_)
            | Axiom::DifferentIndividuals(_)
            | Axiom::DeclareClass(_)
            | Axiom::DeclareObjectProperty(_)
            | Axiom::DeclareNamedIndividual(_) => axiom.clone(),
        }
    }

    fn is_addressed(&self, class: &OwlClass) -> bool {
        self.addressed.contains(class)
            || base_class(class).is_some_and(|base| self.addressed.contains(&base))
    }

    fn rewrite_all(&self, expressions: &[ClassExpression]) -> Vec<ClassExpression> {
        expressions
            .iter()
            .map(|e| self.rewrite_class_expression(e))
            .collect()
    }
}
