//! Ontology document: annotated axioms and entity annotations.

use crate::annotation::{AnnotatedAxiom, Annotation, vocab};
use crate::axiom::{Axiom, Signature};
use oxrdf::NamedNode;
use rustc_hash::FxHashMap;
use std::fmt;

/// An ontology document.
///
/// Axioms keep their insertion order and their annotations. Entities may
/// carry annotations too, the only one with a meaning here being the `rigid`
/// label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ontology {
    /// The ontology IRI (optional)
    iri: Option<NamedNode>,

    axioms: Vec<AnnotatedAxiom>,

    entity_annotations: FxHashMap<NamedNode, Vec<Annotation>>,
}

impl Ontology {
    /// Creates a new empty ontology.
    pub fn new(iri: Option<NamedNode>) -> Self {
        Self {
            iri,
            axioms: Vec::new(),
            entity_annotations: FxHashMap::default(),
        }
    }

    /// Creates a new ontology with the given IRI string.
    pub fn with_iri(iri: impl Into<String>) -> Result<Self, oxrdf::IriParseError> {
        Ok(Self::new(Some(NamedNode::new(iri)?)))
    }

    pub fn iri(&self) -> Option<&NamedNode> {
        self.iri.as_ref()
    }

    pub fn set_iri(&mut self, iri: Option<NamedNode>) {
        self.iri = iri;
    }

    /// Adds an axiom without annotations.
    pub fn add_axiom(&mut self, axiom: Axiom) {
        self.axioms.push(AnnotatedAxiom::new(axiom));
    }

    pub fn add_annotated_axiom(&mut self, axiom: AnnotatedAxiom) {
        self.axioms.push(axiom);
    }

    /// Annotates an entity, identified by its IRI whatever its kind.
    pub fn annotate_entity(&mut self, entity: NamedNode, annotation: Annotation) {
        let annotations = self.entity_annotations.entry(entity).or_default();
        if !annotations.contains(&annotation) {
            annotations.push(annotation);
        }
    }

    /// Labels an entity as rigid.
    pub fn mark_rigid(&mut self, entity: NamedNode) {
        self.annotate_entity(entity, Annotation::rigid());
    }

    pub fn entity_annotations(&self, entity: &NamedNode) -> &[Annotation] {
        self.entity_annotations
            .get(entity)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_rigid(&self, entity: &NamedNode) -> bool {
        self.entity_annotations(entity)
            .iter()
            .any(|a| a.is_label(vocab::RIGID))
    }

    /// IRIs of all entities labeled rigid.
    pub fn rigid_entities(&self) -> impl Iterator<Item = &NamedNode> {
        self.entity_annotations
            .iter()
            .filter(|(_, annotations)| annotations.iter().any(|a| a.is_label(vocab::RIGID)))
            .map(|(entity, _)| entity)
    }

    /// Returns the axioms, without their annotations.
    pub fn axioms(&self) -> impl Iterator<Item = &Axiom> {
        self.axioms.iter().map(AnnotatedAxiom::axiom)
    }

    pub fn annotated_axioms(&self) -> &[AnnotatedAxiom] {
        &self.axioms
    }

    pub fn axiom_count(&self) -> usize {
        self.axioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    /// Checks if the axiom is present, whatever its annotations.
    pub fn contains_axiom(&self, axiom: &Axiom) -> bool {
        self.axioms().any(|a| a == axiom)
    }

    /// Keeps only the axioms matching the predicate and returns how many
    /// were removed.
    pub fn retain_axioms(&mut self, mut keep: impl FnMut(&AnnotatedAxiom) -> bool) -> usize {
        let before = self.axioms.len();
        self.axioms.retain(|a| keep(a));
        before - self.axioms.len()
    }

    /// Entities mentioned by the axioms.
    pub fn signature(&self) -> Signature {
        let mut signature = Signature::default();
        for axiom in self.axioms() {
            signature.add_axiom(axiom);
        }
        signature
    }

    /// Merges another ontology into this one.
    pub fn merge(&mut self, other: Ontology) {
        self.axioms.extend(other.axioms);
        for (entity, annotations) in other.entity_annotations {
            for annotation in annotations {
                self.annotate_entity(entity.clone(), annotation);
            }
        }
    }
}

impl Extend<AnnotatedAxiom> for Ontology {
    fn extend<I: IntoIterator<Item = AnnotatedAxiom>>(&mut self, iter: I) {
        self.axioms.extend(iter);
    }
}

impl FromIterator<Axiom> for Ontology {
    fn from_iter<I: IntoIterator<Item = Axiom>>(iter: I) -> Self {
        let mut ontology = Self::default();
        for axiom in iter {
            ontology.add_axiom(axiom);
        }
        ontology
    }
}

impl fmt::Display for Ontology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(iri) = &self.iri {
            writeln!(f, "Ontology({iri})")?;
        } else {
            writeln!(f, "Ontology(anonymous)")?;
        }
        for axiom in &self.axioms {
            writeln!(f, "  {axiom}")?;
        }
        Ok(())
    }
}
