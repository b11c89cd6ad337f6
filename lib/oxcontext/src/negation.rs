//! Structural negation of concepts and axioms.

use crate::axiom::Axiom;
use crate::entity::Individual;
use crate::error::UnhandledConstructorError;
use crate::expression::ClassExpression;

/// Negates a concept.
///
/// `⊤` and `⊥` are swapped and a double negation is removed; every other
/// expression is wrapped in a complement. No De Morgan rewriting happens.
pub fn negate_class_expression(expression: &ClassExpression) -> ClassExpression {
    match expression {
        ClassExpression::Class(c) if c.is_thing() => ClassExpression::nothing(),
        ClassExpression::Class(c) if c.is_nothing() => ClassExpression::thing(),
        ClassExpression::ObjectComplementOf(inner) => inner.as_ref().clone(),
        _ => ClassExpression::complement(expression.clone()),
    }
}

/// Builds the conjunction of the operands.
///
/// Nested conjunctions are flattened, `⊤` and repeated operands are dropped,
/// a `⊥` operand makes the whole conjunction `⊥` and a single remaining
/// operand is returned as is.
pub fn conjunction(operands: Vec<ClassExpression>) -> ClassExpression {
    let mut flattened = Vec::with_capacity(operands.len());
    let mut stack = operands;
    stack.reverse();
    while let Some(operand) = stack.pop() {
        match operand {
            ClassExpression::ObjectIntersectionOf(inner) => {
                stack.extend(inner.into_iter().rev());
            }
            operand if operand.is_thing() => (),
            operand if operand.is_nothing() => return ClassExpression::nothing(),
            operand => {
                if !flattened.contains(&operand) {
                    flattened.push(operand);
                }
            }
        }
    }
    match flattened.len() {
        0 => ClassExpression::thing(),
        1 => flattened.swap_remove(0),
        _ => ClassExpression::ObjectIntersectionOf(flattened),
    }
}

/// Negates an axiom.
///
/// - `C(a)` becomes `(¬C)(a)`;
/// - `C ⊑ D` becomes `(C ⊓ ¬D)(x)` for a fresh anonymous individual `x`;
/// - `R(a, b)` and `¬R(a, b)` are swapped.
///
/// Any other axiom has no negation expressible as a single axiom and is
/// rejected.
pub fn negate_axiom(axiom: &Axiom) -> Result<Axiom, UnhandledConstructorError> {
    match axiom {
        Axiom::ClassAssertion { class, individual } => Ok(Axiom::ClassAssertion {
            class: negate_class_expression(class),
            individual: individual.clone(),
        }),
        Axiom::SubClassOf {
            sub_class,
            super_class,
        } => Ok(Axiom::ClassAssertion {
            class: conjunction(vec![
                sub_class.clone(),
                negate_class_expression(super_class),
            ]),
            individual: Individual::fresh(),
        }),
        Axiom::ObjectPropertyAssertion {
            property,
            source,
            target,
        } => Ok(Axiom::NegativeObjectPropertyAssertion {
            property: property.clone(),
            source: source.clone(),
            target: target.clone(),
        }),
        Axiom::NegativeObjectPropertyAssertion {
            property,
            source,
            target,
        } => Ok(Axiom::ObjectPropertyAssertion {
            property: property.clone(),
            source: source.clone(),
            target: target.clone(),
        }),
        Axiom::EquivalentClasses(_)
        | Axiom::DisjointClasses(_)
        | Axiom::SubObjectPropertyOf { .. }
        | Axiom::ObjectPropertyDomain { .. }
        | Axiom::ObjectPropertyRange { .. }
        | Axiom::InverseObjectProperties(_, _)
        | Axiom::TransitiveObjectProperty(_)
        | Axiom::SameIndividual(_)
        | Axiom::DifferentIndividuals(_)
        | Axiom::HasKey { .. }
        | Axiom::DeclareClass(_)
        | Axiom::DeclareObjectProperty(_)
        | Axiom::DeclareNamedIndividual(_) => Err(UnhandledConstructorError::new(
            "negation",
            axiom.kind(),
            axiom.to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ObjectProperty, OwlClass};
    use oxrdf::NamedNode;

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.org/{name}"))
    }

    fn class(name: &str) -> ClassExpression {
        ClassExpression::class(OwlClass::new(iri(name)))
    }

    #[test]
    fn test_negate_top_and_bottom() {
        assert_eq!(
            negate_class_expression(&ClassExpression::thing()),
            ClassExpression::nothing()
        );
        assert_eq!(
            negate_class_expression(&ClassExpression::nothing()),
            ClassExpression::thing()
        );
    }

    #[test]
    fn test_double_negation_elimination() {
        let negated = negate_class_expression(&class("A"));
        assert_eq!(negated, ClassExpression::complement(class("A")));
        assert_eq!(negate_class_expression(&negated), class("A"));
    }

    #[test]
    fn test_negation_is_not_de_morgan() {
        let union = ClassExpression::union(vec![class("A"), class("B")]);
        assert_eq!(
            negate_class_expression(&union),
            ClassExpression::complement(union)
        );
    }

    #[test]
    fn test_conjunction_simplification() {
        assert_eq!(
            conjunction(vec![class("A"), ClassExpression::thing()]),
            class("A")
        );
        assert_eq!(
            conjunction(vec![class("A"), ClassExpression::nothing(), class("B")]),
            ClassExpression::nothing()
        );
        assert_eq!(conjunction(Vec::new()), ClassExpression::thing());
        assert_eq!(
            conjunction(vec![
                class("A"),
                ClassExpression::intersection(vec![class("B"), class("A")]),
            ]),
            ClassExpression::intersection(vec![class("A"), class("B")])
        );
    }

    #[test]
    fn test_negate_class_assertion_twice() {
        let axiom = Axiom::class_assertion(class("A"), iri("a"));
        let negated = negate_axiom(&axiom).unwrap();
        assert_eq!(
            negated,
            Axiom::class_assertion(ClassExpression::complement(class("A")), iri("a"))
        );
        assert_eq!(negate_axiom(&negated).unwrap(), axiom);
    }

    #[test]
    fn test_negate_class_assertion_twice_simplifies() {
        let axiom = Axiom::class_assertion(
            ClassExpression::complement(ClassExpression::complement(class("A"))),
            iri("a"),
        );
        let twice = negate_axiom(&negate_axiom(&axiom).unwrap()).unwrap();
        assert_eq!(twice, Axiom::class_assertion(class("A"), iri("a")));
    }

    #[test]
    fn test_negate_subsumption() {
        let axiom = Axiom::subclass_of(class("A"), class("B"));
        let Axiom::ClassAssertion { class: c, individual } = negate_axiom(&axiom).unwrap() else {
            panic!("the negation of a subsumption is a concept assertion")
        };
        assert_eq!(
            c,
            ClassExpression::intersection(vec![
                class("A"),
                ClassExpression::complement(class("B"))
            ])
        );
        assert!(individual.is_anonymous());
    }

    #[test]
    fn test_negate_unsatisfiable_concept() {
        let axiom = Axiom::subclass_of(class("A"), ClassExpression::nothing());
        let Axiom::ClassAssertion { class: c, individual } = negate_axiom(&axiom).unwrap() else {
            panic!("the negation of a subsumption is a concept assertion")
        };
        assert_eq!(c, class("A"));
        assert!(individual.is_anonymous());
    }

    #[test]
    fn test_fresh_individuals_differ() {
        let axiom = Axiom::subclass_of(class("A"), class("B"));
        assert_ne!(negate_axiom(&axiom).unwrap(), negate_axiom(&axiom).unwrap());
    }

    #[test]
    fn test_negate_role_assertion() {
        let axiom =
            Axiom::object_property_assertion(ObjectProperty::new(iri("r")), iri("a"), iri("b"));
        let negated = negate_axiom(&axiom).unwrap();
        assert!(matches!(
            negated,
            Axiom::NegativeObjectPropertyAssertion { .. }
        ));
        assert_eq!(negate_axiom(&negated).unwrap(), axiom);
    }

    #[test]
    fn test_unhandled_axioms_are_rejected() {
        let axiom = Axiom::TransitiveObjectProperty(ObjectProperty::new(iri("r")));
        let error = negate_axiom(&axiom).unwrap_err();
        assert_eq!(error.constructor(), "TransitiveObjectProperty");
        assert!(negate_axiom(&Axiom::disjoint_classes(vec![class("A"), class("B")])).is_err());
    }
}
