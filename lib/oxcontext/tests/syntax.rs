//! Parser tests on the public API, including malformed input.

use oxcontext::{
    AnnotatedAxiom, Axiom, ClassExpression, ObjectProperty, ObjectPropertyExpression, OwlClass,
    ParseErrorKind, ParserConfig, SyntaxParser,
};
use oxrdf::NamedNode;

const BASE: &str = "http://example.com/";

fn parser() -> SyntaxParser {
    SyntaxParser::with_config(ParserConfig::new().with_base_iri(BASE))
}

fn class(name: &str) -> ClassExpression {
    ClassExpression::class(OwlClass::new(
        NamedNode::new(format!("{BASE}{name}")).unwrap(),
    ))
}

#[test]
fn test_parenthesised_axioms() {
    let parser = parser();
    let plain = parser.parse_axiom("C ⊑ D").unwrap();
    assert_eq!(parser.parse_axiom("(C) ⊑ ((D))").unwrap(), plain);
    assert_eq!(parser.parse_axiom("C⊑D").unwrap(), plain);
    assert_eq!(plain.axiom(), &Axiom::subclass_of(class("C"), class("D")));
}

#[test]
fn test_roles() {
    let r = ObjectProperty::new(NamedNode::new(format!("{BASE}r")).unwrap());
    assert_eq!(
        parser().parse_object_property_expression("(r^-1)").unwrap(),
        ObjectPropertyExpression::inverse(r.clone())
    );
    assert_eq!(
        parser().parse_object_property_expression("r").unwrap(),
        ObjectPropertyExpression::from(r)
    );
    assert_eq!(
        parser()
            .parse_object_property_expression("r ⊓ s")
            .unwrap_err()
            .kind(),
        ParseErrorKind::UnknownOperator
    );
}

#[test]
fn test_from_str() {
    let axiom: AnnotatedAxiom = "A ⊑ ¬B @ N".parse().unwrap();
    assert_eq!(axiom.defined_by().count(), 1);
    assert!("A ⊑".parse::<AnnotatedAxiom>().is_err());
    let expression: ClassExpression = "∃r.(A ⊔ B)".parse().unwrap();
    assert!(matches!(
        expression,
        ClassExpression::ObjectSomeValuesFrom { .. }
    ));
}

#[test]
fn test_malformed_input_is_rejected() {
    for input in [
        "",
        "⊑",
        "()",
        "(())(a)",
        "@",
        "@ N",
        "A ⊑ B @ global @ N",
        "{}",
        "∃.A",
        "≥ r.A",
        "r^-1(a)",
        "¬(a,b)",
        "A(a,)",
        "A((a))",
        "A ⊓ ⊔ B",
        "∀r.",
        "A ⊑ {a b}",
        "C ⊑ D ⊑",
        "((((",
        "A)(",
    ] {
        assert!(parser().parse_axiom(input).is_err(), "{input} was accepted");
    }
}

#[test]
fn test_error_fragments() {
    let error = parser().parse_axiom("A ⊑ B ⊔ C_D").unwrap_err();
    assert_eq!(error.kind(), ParseErrorKind::BadIdentifier);
    assert_eq!(error.fragment(), "C_D");
    assert_eq!(error.to_string(), "invalid identifier: 'C_D'");

    let error = parser().parse_axiom("A ⊑ ∀r B").unwrap_err();
    assert_eq!(error.kind(), ParseErrorKind::MissingQuantifierDot);
    assert_eq!(error.fragment(), "∀r B");
}

#[test]
fn test_deep_nesting() {
    let parser = parser();
    let nested = format!("{}A{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(parser.parse_class_expression(&nested).unwrap(), class("A"));

    let too_deep = format!("{}A{}", "(".repeat(10_000), ")".repeat(10_000));
    assert_eq!(
        parser
            .parse_class_expression(&too_deep)
            .unwrap_err()
            .kind(),
        ParseErrorKind::NestingTooDeep
    );
    let too_deep = format!("{}A", "∃r.".repeat(10_000));
    assert_eq!(
        parser.parse_axiom(&format!("{too_deep} ⊑ B")).unwrap_err().kind(),
        ParseErrorKind::NestingTooDeep
    );
}

#[test]
fn test_document_round_trip() {
    let parser = parser();
    let document = "A ⊑ B ⊔ ¬C\n\
                    (∃r^-1.A)(a) @ N\n\
                    s(a,b) @ global\n";
    let ontology = parser.parse_ontology(document).unwrap();
    let printed = ontology
        .annotated_axioms()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(parser.parse_ontology(&printed).unwrap(), ontology);
}
