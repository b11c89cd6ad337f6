//! Axioms and their signatures.

use crate::entity::{Individual, ObjectProperty, OwlClass};
use crate::expression::{ClassExpression, ObjectPropertyExpression};
use oxrdf::NamedNode;
use rustc_hash::FxHashSet;
use std::fmt;

/// An axiom of the object or meta level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Axiom {
    // === Concept axioms ===
    /// C ⊑ D
    SubClassOf {
        sub_class: ClassExpression,
        super_class: ClassExpression,
    },

    /// C1 ≡ ... ≡ Cn
    EquivalentClasses(Vec<ClassExpression>),

    /// The concepts are pairwise disjoint
    DisjointClasses(Vec<ClassExpression>),

    // === Role axioms ===
    /// R ⊑ S
    SubObjectPropertyOf {
        sub_property: ObjectPropertyExpression,
        super_property: ObjectPropertyExpression,
    },

    /// ∃R.⊤ ⊑ C
    ObjectPropertyDomain {
        property: ObjectPropertyExpression,
        domain: ClassExpression,
    },

    /// ⊤ ⊑ ∀R.C
    ObjectPropertyRange {
        property: ObjectPropertyExpression,
        range: ClassExpression,
    },

    /// R ≡ S^-1
    InverseObjectProperties(ObjectProperty, ObjectProperty),

    TransitiveObjectProperty(ObjectProperty),

    // === Assertions ===
    /// C(a)
    ClassAssertion {
        class: ClassExpression,
        individual: Individual,
    },

    /// R(a, b)
    ObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        source: Individual,
        target: Individual,
    },

    /// ¬R(a, b)
    NegativeObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        source: Individual,
        target: Individual,
    },

    SameIndividual(Vec<Individual>),

    DifferentIndividuals(Vec<Individual>),

    /// HasKey(C, (R1...Rn))
    HasKey {
        class: ClassExpression,
        object_properties: Vec<ObjectPropertyExpression>,
    },

    // === Declarations ===
    DeclareClass(OwlClass),

    DeclareObjectProperty(ObjectProperty),

    DeclareNamedIndividual(Individual),
}

impl Axiom {
    /// Creates a subsumption axiom.
    pub fn subclass_of(sub: impl Into<ClassExpression>, sup: impl Into<ClassExpression>) -> Self {
        Self::SubClassOf {
            sub_class: sub.into(),
            super_class: sup.into(),
        }
    }

    /// Creates a concept assertion.
    pub fn class_assertion(
        class: impl Into<ClassExpression>,
        individual: impl Into<Individual>,
    ) -> Self {
        Self::ClassAssertion {
            class: class.into(),
            individual: individual.into(),
        }
    }

    /// Creates a role assertion.
    pub fn object_property_assertion(
        property: impl Into<ObjectPropertyExpression>,
        source: impl Into<Individual>,
        target: impl Into<Individual>,
    ) -> Self {
        Self::ObjectPropertyAssertion {
            property: property.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn equivalent_classes(classes: Vec<ClassExpression>) -> Self {
        Self::EquivalentClasses(classes)
    }

    pub fn disjoint_classes(classes: Vec<ClassExpression>) -> Self {
        Self::DisjointClasses(classes)
    }

    /// The constructor name, used in error reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SubClassOf { .. } => "SubClassOf",
            Self::EquivalentClasses(_) => "EquivalentClasses",
            Self::DisjointClasses(_) => "DisjointClasses",
            Self::SubObjectPropertyOf { .. } => "SubObjectPropertyOf",
            Self::ObjectPropertyDomain { .. } => "ObjectPropertyDomain",
            Self::ObjectPropertyRange { .. } => "ObjectPropertyRange",
            Self::InverseObjectProperties(_, _) => "InverseObjectProperties",
            Self::TransitiveObjectProperty(_) => "TransitiveObjectProperty",
            Self::ClassAssertion { .. } => "ClassAssertion",
            Self::ObjectPropertyAssertion { .. } => "ObjectPropertyAssertion",
            Self::NegativeObjectPropertyAssertion { .. } => "NegativeObjectPropertyAssertion",
            Self::SameIndividual(_) => "SameIndividual",
            Self::DifferentIndividuals(_) => "DifferentIndividuals",
            Self::HasKey { .. } => "HasKey",
            Self::DeclareClass(_) => "DeclareClass",
            Self::DeclareObjectProperty(_) => "DeclareObjectProperty",
            Self::DeclareNamedIndividual(_) => "DeclareNamedIndividual",
        }
    }

    /// Declarations are the only non-logical axioms.
    pub fn is_logical(&self) -> bool {
        !matches!(
            self,
            Self::DeclareClass(_) | Self::DeclareObjectProperty(_) | Self::DeclareNamedIndividual(_)
        )
    }

    /// Collects the entities this axiom mentions.
    pub fn signature(&self) -> Signature {
        let mut signature = Signature::default();
        signature.add_axiom(self);
        signature
    }
}

fn fmt_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn fmt_head(f: &mut fmt::Formatter<'_>, class: &ClassExpression) -> fmt::Result {
    if class.is_named() {
        write!(f, "{class}")
    } else {
        write!(f, "({class})")
    }
}

fn fmt_role_head(f: &mut fmt::Formatter<'_>, property: &ObjectPropertyExpression) -> fmt::Result {
    if property.is_named() {
        write!(f, "{property}")
    } else {
        write!(f, "({property})")
    }
}

impl fmt::Display for Axiom {
    /// Subsumptions and assertions are written in the compact syntax, the
    /// other axioms in a functional style.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubClassOf {
                sub_class,
                super_class,
            } => write!(f, "{sub_class} ⊑ {super_class}"),
            Self::EquivalentClasses(classes) => {
                f.write_str("EquivalentClasses(")?;
                fmt_list(f, classes)?;
                f.write_str(")")
            }
            Self::DisjointClasses(classes) => {
                f.write_str("DisjointClasses(")?;
                fmt_list(f, classes)?;
                f.write_str(")")
            }
            Self::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => write!(f, "{sub_property} ⊑ {super_property}"),
            Self::ObjectPropertyDomain { property, domain } => {
                write!(f, "Domain({property}, {domain})")
            }
            Self::ObjectPropertyRange { property, range } => {
                write!(f, "Range({property}, {range})")
            }
            Self::InverseObjectProperties(first, second) => {
                write!(f, "InverseObjectProperties({first}, {second})")
            }
            Self::TransitiveObjectProperty(property) => write!(f, "Transitive({property})"),
            Self::ClassAssertion { class, individual } => {
                fmt_head(f, class)?;
                write!(f, "({individual})")
            }
            Self::ObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                fmt_role_head(f, property)?;
                write!(f, "({source},{target})")
            }
            Self::NegativeObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                f.write_str("¬")?;
                fmt_role_head(f, property)?;
                write!(f, "({source},{target})")
            }
            Self::SameIndividual(individuals) => {
                f.write_str("SameIndividual(")?;
                fmt_list(f, individuals)?;
                f.write_str(")")
            }
            Self::DifferentIndividuals(individuals) => {
                f.write_str("DifferentIndividuals(")?;
                fmt_list(f, individuals)?;
                f.write_str(")")
            }
            Self::HasKey {
                class,
                object_properties,
            } => {
                write!(f, "HasKey({class}, (")?;
                fmt_list(f, object_properties)?;
                f.write_str("))")
            }
            Self::DeclareClass(class) => write!(f, "Declaration(Class({class}))"),
            Self::DeclareObjectProperty(property) => {
                write!(f, "Declaration(ObjectProperty({property}))")
            }
            Self::DeclareNamedIndividual(individual) => {
                write!(f, "Declaration(NamedIndividual({individual}))")
            }
        }
    }
}

/// The entities mentioned by a set of axioms.
///
/// `⊤` and `⊥` are never part of a signature and anonymous individuals are
/// left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    classes: FxHashSet<OwlClass>,
    object_properties: FxHashSet<ObjectProperty>,
    individuals: FxHashSet<NamedNode>,
}

impl Signature {
    pub fn classes(&self) -> impl Iterator<Item = &OwlClass> {
        self.classes.iter()
    }

    pub fn object_properties(&self) -> impl Iterator<Item = &ObjectProperty> {
        self.object_properties.iter()
    }

    pub fn individuals(&self) -> impl Iterator<Item = &NamedNode> {
        self.individuals.iter()
    }

    pub fn contains_class(&self, class: &OwlClass) -> bool {
        self.classes.contains(class)
    }

    pub fn contains_object_property(&self, property: &ObjectProperty) -> bool {
        self.object_properties.contains(property)
    }

    /// Checks if any entity, whatever its kind, has this IRI.
    pub fn contains_iri(&self, iri: &NamedNode) -> bool {
        self.classes.contains(&OwlClass::new(iri.clone()))
            || self
                .object_properties
                .contains(&ObjectProperty::new(iri.clone()))
            || self.individuals.contains(iri)
    }

    /// Checks if the signature shares at least one IRI with `names`.
    pub fn mentions_any(&self, names: &FxHashSet<NamedNode>) -> bool {
        self.classes.iter().any(|c| names.contains(c.iri()))
            || self.object_properties.iter().any(|p| names.contains(p.iri()))
            || self.individuals.iter().any(|i| names.contains(i))
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.object_properties.is_empty() && self.individuals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.classes.len() + self.object_properties.len() + self.individuals.len()
    }

    pub fn extend(&mut self, other: &Signature) {
        self.classes.extend(other.classes.iter().cloned());
        self.object_properties
            .extend(other.object_properties.iter().cloned());
        self.individuals.extend(other.individuals.iter().cloned());
    }

    pub fn add_axiom(&mut self, axiom: &Axiom) {
        match axiom {
            Axiom::SubClassOf {
                sub_class,
                super_class,
            } => {
                self.add_class_expression(sub_class);
                self.add_class_expression(super_class);
            }
            Axiom::EquivalentClasses(classes) | Axiom::DisjointClasses(classes) => {
                for class in classes {
                    self.add_class_expression(class);
                }
            }
            Axiom::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => {
                self.add_property_expression(sub_property);
                self.add_property_expression(super_property);
            }
            Axiom::ObjectPropertyDomain {
                property,
                domain: class,
            }
            | Axiom::ObjectPropertyRange {
                property,
                range: class,
            } => {
                self.add_property_expression(property);
                self.add_class_expression(class);
            }
            Axiom::InverseObjectProperties(first, second) => {
                self.object_properties.insert(first.clone());
                self.object_properties.insert(second.clone());
            }
            Axiom::TransitiveObjectProperty(property) | Axiom::DeclareObjectProperty(property) => {
                self.object_properties.insert(property.clone());
            }
            Axiom::ClassAssertion { class, individual } => {
                self.add_class_expression(class);
                self.add_individual(individual);
            }
            Axiom::ObjectPropertyAssertion {
                property,
                source,
                target,
            }
            | Axiom::NegativeObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                self.add_property_expression(property);
                self.add_individual(source);
                self.add_individual(target);
            }
            Axiom::SameIndividual(individuals) | Axiom::DifferentIndividuals(individuals) => {
                for individual in individuals {
                    self.add_individual(individual);
                }
            }
            Axiom::HasKey {
                class,
                object_properties,
            } => {
                self.add_class_expression(class);
                for property in object_properties {
                    self.add_property_expression(property);
                }
            }
            Axiom::DeclareClass(class) => self.add_class(class),
            Axiom::DeclareNamedIndividual(individual) => self.add_individual(individual),
        }
    }

    pub fn add_class_expression(&mut self, expression: &ClassExpression) {
        match expression {
            ClassExpression::Class(class) => self.add_class(class),
            ClassExpression::ObjectIntersectionOf(operands)
            | ClassExpression::ObjectUnionOf(operands) => {
                for operand in operands {
                    self.add_class_expression(operand);
                }
            }
            ClassExpression::ObjectComplementOf(inner) => self.add_class_expression(inner),
            ClassExpression::ObjectOneOf(individuals) => {
                for individual in individuals {
                    self.add_individual(individual);
                }
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler }
            | ClassExpression::ObjectAllValuesFrom { property, filler }
            | ClassExpression::ObjectMinCardinality {
                property, filler, ..
            }
            | ClassExpression::ObjectMaxCardinality {
                property, filler, ..
            }
            | ClassExpression::ObjectExactCardinality {
                property, filler, ..
            } => {
                self.add_property_expression(property);
                self.add_class_expression(filler);
            }
        }
    }

    pub fn add_property_expression(&mut self, property: &ObjectPropertyExpression) {
        self.object_properties
            .insert(property.base_property().clone());
    }

    fn add_class(&mut self, class: &OwlClass) {
        if !class.is_thing() && !class.is_nothing() {
            self.classes.insert(class.clone());
        }
    }

    fn add_individual(&mut self, individual: &Individual) {
        if let Individual::Named(iri) = individual {
            self.individuals.insert(iri.clone());
        }
    }
}
