//! Concept and role expressions.
//!
//! The concept grammar is closed: ALC constructors, qualified cardinality
//! restrictions and nominals. Every rewrite pass matches it exhaustively.

use crate::entity::{Individual, ObjectProperty, OwlClass};
use std::fmt;

/// A concept expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassExpression {
    /// An atomic concept, including `⊤` and `⊥`
    Class(OwlClass),

    /// C1 ⊓ ... ⊓ Cn
    ObjectIntersectionOf(Vec<ClassExpression>),

    /// C1 ⊔ ... ⊔ Cn
    ObjectUnionOf(Vec<ClassExpression>),

    /// ¬C
    ObjectComplementOf(Box<ClassExpression>),

    /// {a1, ..., an}
    ObjectOneOf(Vec<Individual>),

    /// ∃R.C
    ObjectSomeValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// ∀R.C
    ObjectAllValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// ≥n R.C
    ObjectMinCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// ≤n R.C
    ObjectMaxCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// =n R.C
    ObjectExactCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },
}

impl ClassExpression {
    pub fn class(c: impl Into<OwlClass>) -> Self {
        Self::Class(c.into())
    }

    pub fn thing() -> Self {
        Self::Class(OwlClass::thing())
    }

    pub fn nothing() -> Self {
        Self::Class(OwlClass::nothing())
    }

    pub fn intersection(classes: Vec<ClassExpression>) -> Self {
        Self::ObjectIntersectionOf(classes)
    }

    pub fn union(classes: Vec<ClassExpression>) -> Self {
        Self::ObjectUnionOf(classes)
    }

    /// Wraps the expression in a complement without any simplification.
    ///
    /// See [`negate_class_expression`](crate::negate_class_expression) for the
    /// simplifying variant.
    pub fn complement(c: ClassExpression) -> Self {
        Self::ObjectComplementOf(Box::new(c))
    }

    pub fn one_of(individuals: Vec<Individual>) -> Self {
        Self::ObjectOneOf(individuals)
    }

    pub fn some_values_from(
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectSomeValuesFrom {
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    pub fn all_values_from(
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectAllValuesFrom {
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    pub fn min_cardinality(
        cardinality: u32,
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectMinCardinality {
            cardinality,
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    pub fn max_cardinality(
        cardinality: u32,
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectMaxCardinality {
            cardinality,
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    pub fn exact_cardinality(
        cardinality: u32,
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectExactCardinality {
            cardinality,
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    /// Returns true if this is an atomic concept.
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Class(_))
    }

    pub fn is_thing(&self) -> bool {
        matches!(self, Self::Class(c) if c.is_thing())
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Class(c) if c.is_nothing())
    }

    /// Returns the atomic concept if this is one.
    pub fn as_class(&self) -> Option<&OwlClass> {
        match self {
            Self::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Binding strength in the compact syntax, loosest first.
    fn precedence(&self) -> u8 {
        match self {
            Self::ObjectIntersectionOf(_) => 0,
            Self::ObjectUnionOf(_) => 1,
            _ => 2,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        if self.precedence() < min_precedence {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for ClassExpression {
    /// Writes the expression in the compact syntax accepted by
    /// [`SyntaxParser`](crate::SyntaxParser).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(c) => write!(f, "{c}"),
            Self::ObjectIntersectionOf(operands) => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ⊓ ")?;
                    }
                    operand.fmt_operand(f, 1)?;
                }
                Ok(())
            }
            Self::ObjectUnionOf(operands) => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ⊔ ")?;
                    }
                    operand.fmt_operand(f, 2)?;
                }
                Ok(())
            }
            Self::ObjectComplementOf(inner) => {
                f.write_str("¬")?;
                inner.fmt_operand(f, 2)
            }
            Self::ObjectOneOf(individuals) => {
                f.write_str("{")?;
                for (i, individual) in individuals.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{individual}")?;
                }
                f.write_str("}")
            }
            Self::ObjectSomeValuesFrom { property, filler } => {
                write!(f, "∃{property}.")?;
                filler.fmt_operand(f, 2)
            }
            Self::ObjectAllValuesFrom { property, filler } => {
                write!(f, "∀{property}.")?;
                filler.fmt_operand(f, 2)
            }
            Self::ObjectMinCardinality {
                cardinality,
                property,
                filler,
            } => {
                write!(f, "≥{cardinality} {property}.")?;
                filler.fmt_operand(f, 2)
            }
            Self::ObjectMaxCardinality {
                cardinality,
                property,
                filler,
            } => {
                write!(f, "≤{cardinality} {property}.")?;
                filler.fmt_operand(f, 2)
            }
            Self::ObjectExactCardinality {
                cardinality,
                property,
                filler,
            } => {
                write!(f, "={cardinality} {property}.")?;
                filler.fmt_operand(f, 2)
            }
        }
    }
}

impl From<OwlClass> for ClassExpression {
    fn from(c: OwlClass) -> Self {
        Self::Class(c)
    }
}

/// A role expression: an atomic role or its inverse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectPropertyExpression {
    ObjectProperty(ObjectProperty),

    /// R^-1
    ObjectInverseOf(ObjectProperty),
}

impl ObjectPropertyExpression {
    pub fn inverse(property: ObjectProperty) -> Self {
        Self::ObjectInverseOf(property)
    }

    /// Returns the inverse of this expression, removing a double inversion.
    #[must_use]
    pub fn inverted(self) -> Self {
        match self {
            Self::ObjectProperty(p) => Self::ObjectInverseOf(p),
            Self::ObjectInverseOf(p) => Self::ObjectProperty(p),
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Self::ObjectProperty(_))
    }

    /// Returns the atomic role, removing the inverse if present.
    pub fn base_property(&self) -> &ObjectProperty {
        match self {
            Self::ObjectProperty(p) | Self::ObjectInverseOf(p) => p,
        }
    }
}

impl fmt::Display for ObjectPropertyExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ObjectProperty(p) => write!(f, "{p}"),
            Self::ObjectInverseOf(p) => write!(f, "{p}^-1"),
        }
    }
}

impl From<ObjectProperty> for ObjectPropertyExpression {
    fn from(p: ObjectProperty) -> Self {
        Self::ObjectProperty(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::NamedNode;

    fn class(name: &str) -> ClassExpression {
        ClassExpression::class(OwlClass::new(NamedNode::new_unchecked(format!(
            "http://example.org/{name}"
        ))))
    }

    fn role(name: &str) -> ObjectProperty {
        ObjectProperty::new(NamedNode::new_unchecked(format!(
            "http://example.org/{name}"
        )))
    }

    #[test]
    fn test_display_parenthesizes_looser_operands() {
        let expression = ClassExpression::intersection(vec![
            ClassExpression::union(vec![class("A"), class("B")]),
            ClassExpression::complement(ClassExpression::intersection(vec![
                class("C"),
                class("D"),
            ])),
        ]);
        assert_eq!(expression.to_string(), "A ⊔ B ⊓ ¬(C ⊓ D)");

        let expression =
            ClassExpression::union(vec![class("A"), ClassExpression::intersection(vec![
                class("B"),
                class("C"),
            ])]);
        assert_eq!(expression.to_string(), "A ⊔ (B ⊓ C)");
    }

    #[test]
    fn test_display_restrictions() {
        let expression = ClassExpression::some_values_from(
            ObjectPropertyExpression::inverse(role("r")),
            ClassExpression::all_values_from(role("s"), ClassExpression::nothing()),
        );
        assert_eq!(expression.to_string(), "∃r^-1.∀s.⊥");

        let expression = ClassExpression::min_cardinality(2, role("r"), ClassExpression::thing());
        assert_eq!(expression.to_string(), "≥2 r.⊤");
    }

    #[test]
    fn test_inverted_removes_double_inversion() {
        let r = ObjectPropertyExpression::from(role("r"));
        assert_eq!(r.clone().inverted().inverted(), r);
        assert!(!r.clone().inverted().is_named());
        assert_eq!(r.inverted().base_property(), &role("r"));
    }

    #[test]
    fn test_top_bottom_predicates() {
        assert!(ClassExpression::thing().is_thing());
        assert!(ClassExpression::nothing().is_nothing());
        assert!(!class("A").is_thing());
        assert!(class("A").is_named());
        assert!(class("A").as_class().is_some());
    }
}
