//! Duplication of flexible names for branch local reasoning.

use crate::annotation::AnnotatedAxiom;
use crate::axiom::{Axiom, Signature};
use crate::entity::{Individual, ObjectProperty, OwlClass};
use crate::expression::{ClassExpression, ObjectPropertyExpression};
use crate::ontology::Ontology;
use oxrdf::{IriParseError, NamedNode};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

/// Configuration of the [`Flexibilizer`].
#[derive(Debug, Clone)]
pub struct FlexibilizerConfig {
    /// Size of a dedicated thread pool. `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Inserted between a flexible IRI and the copy index.
    pub suffix_separator: String,
}

impl Default for FlexibilizerConfig {
    fn default() -> Self {
        Self {
            threads: None,
            suffix_separator: "_".into(),
        }
    }
}

impl FlexibilizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    #[must_use]
    pub fn with_suffix_separator(mut self, separator: impl Into<String>) -> Self {
        self.suffix_separator = separator.into();
        self
    }
}

/// Outcome of [`Flexibilizer::rename`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameReport {
    /// Copies added to the ontology.
    pub merged_copies: usize,
    /// Copies dropped because one of their names was not a valid IRI or
    /// already existed in the ontology.
    pub skipped_copies: usize,
    /// Original axioms mentioning a flexible name that were removed.
    pub removed_axioms: usize,
    /// Renamed axioms added over all merged copies.
    pub added_axioms: usize,
    /// Axioms mentioning a flexible name that were left in place because a
    /// naming concept addresses them.
    pub addressed_axioms: usize,
}

/// A copy that could not be built.
#[derive(Debug, thiserror::Error)]
enum RenameError {
    #[error("the name {iri} cannot be renamed for copy {copy}: {source}")]
    InvalidIri {
        iri: String,
        copy: usize,
        #[source]
        source: IriParseError,
    },
    #[error("copy {copy} of {iri} is named {renamed}, which is already used in the ontology")]
    Collision {
        iri: NamedNode,
        renamed: NamedNode,
        copy: usize,
    },
}

impl RenameError {
    fn copy(&self) -> usize {
        match self {
            Self::InvalidIri { copy, .. } | Self::Collision { copy, .. } => *copy,
        }
    }
}

/// Renames flexible names so that each branch gets its own copy of them.
///
/// Copy `i` of a flexible IRI `X` is `X{separator}i`, `i` starting at 1.
/// Rigid names are never part of the renamed set and stay shared by all
/// copies.
///
/// The flexibilizer works on materialized object ontologies such as
/// [`ObjectOntology::to_ontology`](crate::ObjectOntology::to_ontology).
/// Axioms addressed by a naming concept through `definedBy` are left
/// untouched: a renamed copy would otherwise turn into a meta level axiom.
///
/// ```
/// use oxcontext::{Flexibilizer, SyntaxParser};
/// use oxrdf::NamedNode;
///
/// let parser = SyntaxParser::new();
/// let mut ontology = parser.parse_ontology("r(a, b)\nA ⊑ B")?;
/// let r = NamedNode::new("http://oxigraph.org/context/default#r")?;
///
/// let report = Flexibilizer::default().rename(&mut ontology, &[r].into_iter().collect(), 2);
/// assert_eq!(report.merged_copies, 2);
/// assert_eq!(ontology.axiom_count(), 3);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Default)]
pub struct Flexibilizer {
    config: FlexibilizerConfig,
    pool: Option<ThreadPool>,
}

impl Flexibilizer {
    pub fn new(config: FlexibilizerConfig) -> Result<Self, ThreadPoolBuildError> {
        let pool = config
            .threads
            .map(|threads| {
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("Oxcontext flexibilizer thread {i}"))
                    .build()
            })
            .transpose()?;
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &FlexibilizerConfig {
        &self.config
    }

    /// The name of copy `copy` of a flexible IRI.
    pub fn copy_name(&self, iri: &NamedNode, copy: usize) -> Result<NamedNode, IriParseError> {
        NamedNode::new(format!(
            "{}{}{copy}",
            iri.as_str(),
            self.config.suffix_separator
        ))
    }

    /// Adds `copies` renamed copies of every axiom mentioning a name of
    /// `names`, then removes the original axioms.
    ///
    /// The copies are built in parallel from a snapshot of the original
    /// axioms and merged in copy order. A copy that fails, because a name is
    /// not a valid IRI or already occurs in the ontology, is logged and
    /// skipped. If every copy fails the original axioms are kept.
    pub fn rename(
        &self,
        ontology: &mut Ontology,
        names: &FxHashSet<NamedNode>,
        copies: usize,
    ) -> RenameReport {
        let mut report = RenameReport::default();
        if copies == 0 || names.is_empty() {
            return report;
        }

        let touched: Vec<bool> = ontology
            .annotated_axioms()
            .iter()
            .map(|a| {
                if !a.axiom().signature().mentions_any(names) {
                    return false;
                }
                if a.defined_by().next().is_some() {
                    report.addressed_axioms += 1;
                    return false;
                }
                true
            })
            .collect();
        if report.addressed_axioms > 0 {
            warn!(
                axioms = report.addressed_axioms,
                "leaving axioms addressed by a naming concept unrenamed"
            );
        }
        let existing = ontology.signature();
        let snapshot: Vec<&AnnotatedAxiom> = ontology
            .annotated_axioms()
            .iter()
            .zip(&touched)
            .filter_map(|(a, touched)| touched.then_some(a))
            .collect();
        debug!(
            copies,
            flexible_names = names.len(),
            axioms = snapshot.len(),
            "renaming flexible names"
        );

        let build = || {
            (1..=copies)
                .into_par_iter()
                .map(|copy| {
                    let renamer = CopyRenamer {
                        flexibilizer: self,
                        names,
                        existing: &existing,
                        copy,
                    };
                    snapshot
                        .iter()
                        .map(|a| renamer.annotated_axiom(a))
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Vec<_>>()
        };
        let results = match &self.pool {
            Some(pool) => pool.install(build),
            None => build(),
        };

        for result in results {
            match result {
                Ok(axioms) => {
                    report.merged_copies += 1;
                    report.added_axioms += axioms.len();
                    ontology.extend(axioms);
                }
                Err(error) => {
                    warn!(copy = error.copy(), "skipping copy: {error}");
                    report.skipped_copies += 1;
                }
            }
        }

        if report.merged_copies == 0 {
            warn!("no copy could be built, keeping the original axioms");
            return report;
        }
        let mut index = 0;
        report.removed_axioms = ontology.retain_axioms(|_| {
            let keep = !touched.get(index).copied().unwrap_or(false);
            index += 1;
            keep
        });
        debug!(?report, "renamed flexible names");
        report
    }
}

/// Renames the flexible names of one copy.
struct CopyRenamer<'a> {
    flexibilizer: &'a Flexibilizer,
    names: &'a FxHashSet<NamedNode>,
    existing: &'a Signature,
    copy: usize,
}

impl CopyRenamer<'_> {
    fn iri(&self, iri: &NamedNode) -> Result<NamedNode, RenameError> {
        if !self.names.contains(iri) {
            return Ok(iri.clone());
        }
        let renamed = self
            .flexibilizer
            .copy_name(iri, self.copy)
            .map_err(|source| RenameError::InvalidIri {
                iri: iri.as_str().into(),
                copy: self.copy,
                source,
            })?;
        if self.existing.contains_iri(&renamed) {
            return Err(RenameError::Collision {
                iri: iri.clone(),
                renamed,
                copy: self.copy,
            });
        }
        Ok(renamed)
    }

    fn class(&self, class: &OwlClass) -> Result<OwlClass, RenameError> {
        if class.is_thing() || class.is_nothing() {
            return Ok(class.clone());
        }
        Ok(OwlClass::new(self.iri(class.iri())?))
    }

    fn property(&self, property: &ObjectProperty) -> Result<ObjectProperty, RenameError> {
        Ok(ObjectProperty::new(self.iri(property.iri())?))
    }

    fn property_expression(
        &self,
        property: &ObjectPropertyExpression,
    ) -> Result<ObjectPropertyExpression, RenameError> {
        Ok(match property {
            ObjectPropertyExpression::ObjectProperty(p) => {
                ObjectPropertyExpression::ObjectProperty(self.property(p)?)
            }
            ObjectPropertyExpression::ObjectInverseOf(p) => {
                ObjectPropertyExpression::ObjectInverseOf(self.property(p)?)
            }
        })
    }

    fn individual(&self, individual: &Individual) -> Result<Individual, RenameError> {
        Ok(match individual {
            Individual::Named(iri) => Individual::Named(self.iri(iri)?),
            Individual::Anonymous(_) => individual.clone(),
        })
    }

    fn individuals(&self, individuals: &[Individual]) -> Result<Vec<Individual>, RenameError> {
        individuals.iter().map(|i| self.individual(i)).collect()
    }

    fn class_expressions(
        &self,
        expressions: &[ClassExpression],
    ) -> Result<Vec<ClassExpression>, RenameError> {
        expressions
            .iter()
            .map(|e| self.class_expression(e))
            .collect()
    }

    fn filler(&self, filler: &ClassExpression) -> Result<Box<ClassExpression>, RenameError> {
        Ok(Box::new(self.class_expression(filler)?))
    }

    fn class_expression(
        &self,
        expression: &ClassExpression,
    ) -> Result<ClassExpression, RenameError> {
        Ok(match expression {
            ClassExpression::Class(c) => ClassExpression::Class(self.class(c)?),
            ClassExpression::ObjectIntersectionOf(operands) => {
                ClassExpression::ObjectIntersectionOf(self.class_expressions(operands)?)
            }
            ClassExpression::ObjectUnionOf(operands) => {
                ClassExpression::ObjectUnionOf(self.class_expressions(operands)?)
            }
            ClassExpression::ObjectComplementOf(inner) => {
                ClassExpression::ObjectComplementOf(self.filler(inner)?)
            }
            ClassExpression::ObjectOneOf(individuals) => {
                ClassExpression::ObjectOneOf(self.individuals(individuals)?)
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler } => {
                ClassExpression::ObjectSomeValuesFrom {
                    property: self.property_expression(property)?,
                    filler: self.filler(filler)?,
                }
            }
            ClassExpression::ObjectAllValuesFrom { property, filler } => {
                ClassExpression::ObjectAllValuesFrom {
                    property: self.property_expression(property)?,
                    filler: self.filler(filler)?,
                }
            }
            ClassExpression::ObjectMinCardinality {
                cardinality,
                property,
                filler,
            } => ClassExpression::ObjectMinCardinality {
                cardinality: *cardinality,
                property: self.property_expression(property)?,
                filler: self.filler(filler)?,
            },
            ClassExpression::ObjectMaxCardinality {
                cardinality,
                property,
                filler,
            } => ClassExpression::ObjectMaxCardinality {
                cardinality: *cardinality,
                property: self.property_expression(property)?,
                filler: self.filler(filler)?,
            },
            ClassExpression::ObjectExactCardinality {
                cardinality,
                property,
                filler,
            } => ClassExpression::ObjectExactCardinality {
                cardinality: *cardinality,
                property: self.property_expression(property)?,
                filler: self.filler(filler)?,
            },
        })
    }

    fn axiom(&self, axiom: &Axiom) -> Result<Axiom, RenameError> {
        Ok(match axiom {
            Axiom::SubClassOf {
                sub_class,
                super_class,
            } => Axiom::SubClassOf {
                sub_class: self.class_expression(sub_class)?,
                super_class: self.class_expression(super_class)?,
            },
            Axiom::EquivalentClasses(classes) => {
                Axiom::EquivalentClasses(self.class_expressions(classes)?)
            }
            Axiom::DisjointClasses(classes) => {
                Axiom::DisjointClasses(self.class_expressions(classes)?)
            }
            Axiom::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => Axiom::SubObjectPropertyOf {
                sub_property: self.property_expression(sub_property)?,
                super_property: self.property_expression(super_property)?,
            },
            Axiom::ObjectPropertyDomain { property, domain } => Axiom::ObjectPropertyDomain {
                property: self.property_expression(property)?,
                domain: self.class_expression(domain)?,
            },
            Axiom::ObjectPropertyRange { property, range } => Axiom::ObjectPropertyRange {
                property: self.property_expression(property)?,
                range: self.class_expression(range)?,
            },
            Axiom::InverseObjectProperties(first, second) => {
                Axiom::InverseObjectProperties(self.property(first)?, self.property(second)?)
            }
            Axiom::TransitiveObjectProperty(property) => {
                Axiom::TransitiveObjectProperty(self.property(property)?)
            }
            Axiom::ClassAssertion { class, individual } => Axiom::ClassAssertion {
                class: self.class_expression(class)?,
                individual: self.individual(individual)?,
            },
            Axiom::ObjectPropertyAssertion {
                property,
                source,
                target,
            } => Axiom::ObjectPropertyAssertion {
                property: self.property_expression(property)?,
                source: self.individual(source)?,
                target: self.individual(target)?,
            },
            Axiom::NegativeObjectPropertyAssertion {
                property,
                source,
                target,
            } => Axiom::NegativeObjectPropertyAssertion {
                property: self.property_expression(property)?,
                source: self.individual(source)?,
                target: self.individual(target)?,
            },
            Axiom::SameIndividual(individuals) => {
                Axiom::SameIndividual(self.individuals(individuals)?)
            }
            Axiom::DifferentIndividuals(individuals) => {
                Axiom::DifferentIndividuals(self.individuals(individuals)?)
            }
            Axiom::HasKey {
                class,
                object_properties,
            } => Axiom::HasKey {
                class: self.class_expression(class)?,
                object_properties: object_properties
                    .iter()
                    .map(|p| self.property_expression(p))
                    .collect::<Result<_, _>>()?,
            },
            Axiom::DeclareClass(class) => Axiom::DeclareClass(self.class(class)?),
            Axiom::DeclareObjectProperty(property) => {
                Axiom::DeclareObjectProperty(self.property(property)?)
            }
            Axiom::DeclareNamedIndividual(individual) => {
                Axiom::DeclareNamedIndividual(self.individual(individual)?)
            }
        })
    }

    fn annotated_axiom(&self, axiom: &AnnotatedAxiom) -> Result<AnnotatedAxiom, RenameError> {
        let mut copy = AnnotatedAxiom::new(self.axiom(axiom.axiom())?);
        for annotation in axiom.annotations() {
            copy = copy.with_annotation(annotation.clone());
        }
        Ok(copy)
    }
}
