//! Context model: splits a contextualized ontology into its meta level and
//! the object ontologies of each branch.

use crate::annotation::AnnotationValue;
use crate::axiom::{Axiom, Signature};
use crate::dual::{dual_class, is_dual_class};
use crate::entity::{ObjectProperty, OwlClass};
use crate::error::ContextModelError;
use crate::negation::negate_axiom;
use crate::ontology::Ontology;
use oxrdf::NamedNode;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

/// An assignment of polarities to naming concepts.
///
/// Concepts in neither set are left open. A concept cannot be both positive
/// and negative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Type {
    positive: FxHashSet<OwlClass>,
    negative: FxHashSet<OwlClass>,
}

impl Type {
    pub fn new(
        positive: impl IntoIterator<Item = OwlClass>,
        negative: impl IntoIterator<Item = OwlClass>,
    ) -> Result<Self, ContextModelError> {
        let positive: FxHashSet<_> = positive.into_iter().collect();
        let negative: FxHashSet<_> = negative.into_iter().collect();
        if let Some(concept) = positive.intersection(&negative).next() {
            return Err(ContextModelError::ConflictingPolarity {
                concept: concept.iri().clone(),
            });
        }
        Ok(Self { positive, negative })
    }

    pub fn positive(&self) -> &FxHashSet<OwlClass> {
        &self.positive
    }

    pub fn negative(&self) -> &FxHashSet<OwlClass> {
        &self.negative
    }

    /// Number of concepts with a fixed polarity.
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// `Some(true)` if the concept is positive, `Some(false)` if negative.
    pub fn polarity(&self, concept: &OwlClass) -> Option<bool> {
        if self.positive.contains(concept) {
            Some(true)
        } else if self.negative.contains(concept) {
            Some(false)
        } else {
            None
        }
    }
}

/// The meta ontology, naming concept registry and global object axioms of a
/// contextualized ontology.
///
/// Axioms annotated `definedBy N` are registered under the naming concept
/// `N`, and their negation under `DUAL.N`. Axioms labeled `objectGlobal` are
/// part of every object ontology. The remaining logical axioms form the meta
/// ontology.
///
/// The model is immutable once built and may be queried from many threads.
#[derive(Debug, Clone)]
pub struct ContextModel {
    meta: Ontology,
    /// Naming concept or dual name -> axiom
    registry: FxHashMap<OwlClass, Axiom>,
    /// Naming concept -> dual name
    duals: FxHashMap<OwlClass, OwlClass>,
    /// Naming concepts in definition order
    naming_concepts: Vec<OwlClass>,
    global: Vec<Axiom>,
    global_set: FxHashSet<Axiom>,
    meta_signature: Signature,
    object_signature: Signature,
    rigid: FxHashSet<NamedNode>,
}

impl ContextModel {
    pub fn new(ontology: &Ontology) -> Result<Self, ContextModelError> {
        let mut meta = Ontology::new(ontology.iri().cloned());
        let mut registry = FxHashMap::default();
        let mut duals = FxHashMap::default();
        let mut naming_concepts = Vec::new();
        let mut global = Vec::new();
        let mut global_set = FxHashSet::default();

        for annotated in ontology.annotated_axioms() {
            let axiom = annotated.axiom();
            if !axiom.is_logical() {
                trace!("skipping non-logical axiom {axiom}");
                continue;
            }
            let mut definitions = Vec::new();
            for value in annotated.defined_by() {
                if !definitions.contains(&value) {
                    definitions.push(value);
                }
            }
            if !definitions.is_empty() && annotated.is_object_global() {
                return Err(ContextModelError::AddressedGlobalAxiom {
                    axiom: axiom.to_string(),
                });
            }
            match definitions.as_slice() {
                [] if annotated.is_object_global() => {
                    if global_set.insert(axiom.clone()) {
                        global.push(axiom.clone());
                    }
                }
                [] => meta.add_axiom(axiom.clone()),
                [AnnotationValue::Iri(iri)] => {
                    let concept = OwlClass::new(iri.clone());
                    if concept.is_thing() || concept.is_nothing() || is_dual_class(&concept) {
                        return Err(ContextModelError::ReservedNamingConcept {
                            concept: concept.into_inner(),
                        });
                    }
                    if duals.contains_key(&concept) {
                        return Err(ContextModelError::DuplicateNamingConcept {
                            concept: concept.into_inner(),
                        });
                    }
                    let negation = negate_axiom(axiom).map_err(|source| {
                        ContextModelError::UndefinedNegation {
                            concept: concept.iri().clone(),
                            source,
                        }
                    })?;
                    let dual = dual_class(&concept);
                    trace!("registering {concept} and {dual}");
                    registry.insert(concept.clone(), axiom.clone());
                    registry.insert(dual.clone(), negation);
                    duals.insert(concept.clone(), dual);
                    naming_concepts.push(concept);
                }
                [AnnotationValue::Literal(literal)] => {
                    return Err(ContextModelError::NonIriDefinition {
                        axiom: axiom.to_string(),
                        value: literal.to_string(),
                    });
                }
                _ => {
                    return Err(ContextModelError::MultipleDefinitions {
                        axiom: axiom.to_string(),
                    });
                }
            }
        }

        let rigid: FxHashSet<NamedNode> = ontology.rigid_entities().cloned().collect();
        for entity in &rigid {
            meta.mark_rigid(entity.clone());
        }
        let meta_signature = meta.signature();
        let mut object_signature = Signature::default();
        for axiom in global.iter().chain(registry.values()) {
            object_signature.add_axiom(axiom);
        }

        debug!(
            meta_axioms = meta.axiom_count(),
            naming_concepts = naming_concepts.len(),
            global_axioms = global.len(),
            rigid_entities = rigid.len(),
            "built context model"
        );
        Ok(Self {
            meta,
            registry,
            duals,
            naming_concepts,
            global,
            global_set,
            meta_signature,
            object_signature,
            rigid,
        })
    }

    /// The logical axioms carrying neither a naming concept nor the global
    /// label, without their annotations.
    pub fn meta_ontology(&self) -> &Ontology {
        &self.meta
    }

    /// Object ontology of the branch described by `t`.
    ///
    /// It contains the global axioms, the axiom of every positive concept and
    /// the negation of the axiom of every negative concept.
    pub fn object_ontology(&self, t: &Type) -> Result<ObjectOntology<'_>, ContextModelError> {
        let mut selected = Vec::with_capacity(t.len());
        let mut seen = FxHashSet::default();
        let positives = t.positive().iter().map(|c| (c, self.registry.get(c)));
        let negatives = t.negative().iter().map(|c| {
            (
                c,
                self.duals.get(c).and_then(|dual| self.registry.get(dual)),
            )
        });
        for (concept, axiom) in positives.chain(negatives) {
            let axiom = axiom.ok_or_else(|| ContextModelError::UnregisteredNamingConcept {
                concept: concept.iri().clone(),
            })?;
            if !self.global_set.contains(axiom) && seen.insert(axiom) {
                selected.push(axiom);
            }
        }
        Ok(ObjectOntology {
            model: self,
            selected,
        })
    }

    /// Naming concepts in definition order.
    pub fn naming_concepts(&self) -> impl ExactSizeIterator<Item = &OwlClass> {
        self.naming_concepts.iter()
    }

    pub fn is_naming_concept(&self, concept: &OwlClass) -> bool {
        self.duals.contains_key(concept)
    }

    /// The `DUAL.` name the negation of the axiom addressed by `concept` is
    /// registered under.
    pub fn dual_name(&self, concept: &OwlClass) -> Result<&OwlClass, ContextModelError> {
        self.duals
            .get(concept)
            .ok_or_else(|| ContextModelError::UnregisteredNamingConcept {
                concept: concept.iri().clone(),
            })
    }

    /// The axiom registered under a naming concept or a dual name.
    pub fn definition(&self, name: &OwlClass) -> Option<&Axiom> {
        self.registry.get(name)
    }

    /// Axioms part of every object ontology.
    pub fn global_axioms(&self) -> &[Axiom] {
        &self.global
    }

    pub fn meta_signature(&self) -> &Signature {
        &self.meta_signature
    }

    /// Entities of the global and registered axioms, negations included.
    pub fn object_signature(&self) -> &Signature {
        &self.object_signature
    }

    /// Classes of the meta and object levels.
    pub fn classes_in_signature(&self) -> FxHashSet<&OwlClass> {
        self.meta_signature
            .classes()
            .chain(self.object_signature.classes())
            .collect()
    }

    /// Object properties of the meta and object levels.
    pub fn object_properties_in_signature(&self) -> FxHashSet<&ObjectProperty> {
        self.meta_signature
            .object_properties()
            .chain(self.object_signature.object_properties())
            .collect()
    }

    /// Object level classes labeled rigid.
    pub fn rigid_classes(&self) -> FxHashSet<&OwlClass> {
        self.object_signature
            .classes()
            .filter(|c| self.rigid.contains(c.iri()))
            .collect()
    }

    /// Object level properties labeled rigid.
    pub fn rigid_object_properties(&self) -> FxHashSet<&ObjectProperty> {
        self.object_signature
            .object_properties()
            .filter(|p| self.rigid.contains(p.iri()))
            .collect()
    }

    /// Object level classes not labeled rigid.
    pub fn flexible_classes(&self) -> FxHashSet<&OwlClass> {
        self.object_signature
            .classes()
            .filter(|c| !self.rigid.contains(c.iri()))
            .collect()
    }

    /// Object level properties not labeled rigid.
    pub fn flexible_object_properties(&self) -> FxHashSet<&ObjectProperty> {
        self.object_signature
            .object_properties()
            .filter(|p| !self.rigid.contains(p.iri()))
            .collect()
    }

    /// IRIs of the flexible classes and properties, as expected by
    /// [`Flexibilizer::rename`](crate::Flexibilizer::rename).
    ///
    /// Named individuals are never part of it: they are constants shared by
    /// every branch, rigid or not.
    pub fn flexible_names(&self) -> FxHashSet<NamedNode> {
        self.flexible_classes()
            .into_iter()
            .map(|c| c.iri().clone())
            .chain(
                self.flexible_object_properties()
                    .into_iter()
                    .map(|p| p.iri().clone()),
            )
            .collect()
    }

    /// Checks if the object level mentions a rigid class or property.
    pub fn contains_rigid_names(&self) -> bool {
        self.object_signature
            .classes()
            .any(|c| self.rigid.contains(c.iri()))
            || self
                .object_signature
                .object_properties()
                .any(|p| self.rigid.contains(p.iri()))
    }
}

/// The object ontology of a branch, borrowed from its [`ContextModel`].
#[derive(Debug, Clone)]
pub struct ObjectOntology<'a> {
    model: &'a ContextModel,
    selected: Vec<&'a Axiom>,
}

impl<'a> ObjectOntology<'a> {
    /// Global axioms first, then the branch axioms.
    pub fn iter(&self) -> impl Iterator<Item = &'a Axiom> + '_ {
        self.model
            .global
            .iter()
            .chain(self.selected.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.model.global.len() + self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, axiom: &Axiom) -> bool {
        self.model.global_set.contains(axiom) || self.selected.contains(&axiom)
    }

    pub fn signature(&self) -> Signature {
        let mut signature = Signature::default();
        for axiom in self.iter() {
            signature.add_axiom(axiom);
        }
        signature
    }

    /// Copies the axioms into an owned ontology, keeping the rigid labels of
    /// the entities it mentions.
    pub fn to_ontology(&self) -> Ontology {
        let mut ontology: Ontology = self.iter().cloned().collect();
        let signature = ontology.signature();
        for entity in &self.model.rigid {
            if signature.contains_iri(entity) {
                ontology.mark_rigid(entity.clone());
            }
        }
        ontology
    }
}

impl PartialEq<Ontology> for ObjectOntology<'_> {
    /// Compares the axiom sets, ignoring order and annotations.
    fn eq(&self, other: &Ontology) -> bool {
        let other: FxHashSet<&Axiom> = other.axioms().collect();
        let this: FxHashSet<&Axiom> = self.iter().collect();
        this == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{AnnotatedAxiom, Annotation};
    use crate::expression::ClassExpression;

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    fn class(name: &str) -> OwlClass {
        OwlClass::new(iri(name))
    }

    fn subclass(sub: &str, sup: &str) -> Axiom {
        Axiom::subclass_of(class(sub), class(sup))
    }

    fn addressed(axiom: Axiom, concept: &str) -> AnnotatedAxiom {
        AnnotatedAxiom::new(axiom).with_annotation(Annotation::defined_by(&class(concept)))
    }

    #[test]
    fn test_type_rejects_conflicting_polarity() {
        let error = Type::new([class("N")], [class("N"), class("M")]).unwrap_err();
        assert_eq!(
            error,
            ContextModelError::ConflictingPolarity {
                concept: iri("N")
            }
        );
    }

    #[test]
    fn test_type_accessors() {
        let t = Type::new([class("N1"), class("N2")], [class("N3")]).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.polarity(&class("N1")), Some(true));
        assert_eq!(t.polarity(&class("N3")), Some(false));
        assert_eq!(t.polarity(&class("N4")), None);
        assert!(Type::default().is_empty());
    }

    #[test]
    fn test_split() {
        let mut ontology = Ontology::default();
        ontology.add_axiom(subclass("N", "M"));
        ontology.add_axiom(Axiom::DeclareClass(class("N")));
        ontology.add_annotated_axiom(addressed(subclass("A", "B"), "N"));
        ontology.add_annotated_axiom(
            AnnotatedAxiom::new(subclass("B", "C")).with_annotation(Annotation::object_global()),
        );
        let model = ContextModel::new(&ontology).unwrap();

        assert_eq!(model.meta_ontology().axiom_count(), 1);
        assert!(model.meta_ontology().contains_axiom(&subclass("N", "M")));
        assert_eq!(model.global_axioms(), &[subclass("B", "C")]);
        assert_eq!(model.naming_concepts().collect::<Vec<_>>(), vec![&class("N")]);
        assert!(model.is_naming_concept(&class("N")));
        assert_eq!(model.dual_name(&class("N")).unwrap(), &class("DUAL.N"));
        assert_eq!(model.definition(&class("N")), Some(&subclass("A", "B")));
        assert!(matches!(
            model.definition(&class("DUAL.N")),
            Some(Axiom::ClassAssertion { .. })
        ));
    }

    #[test]
    fn test_global_axiom_is_not_repeated() {
        let mut ontology = Ontology::default();
        ontology.add_annotated_axiom(
            AnnotatedAxiom::new(subclass("A", "B")).with_annotation(Annotation::object_global()),
        );
        ontology.add_annotated_axiom(addressed(subclass("A", "B"), "N"));
        let model = ContextModel::new(&ontology).unwrap();
        let t = Type::new([class("N")], []).unwrap();
        let object = model.object_ontology(&t).unwrap();
        assert_eq!(object.len(), 1);
        assert!(object.contains(&subclass("A", "B")));
    }

    #[test]
    fn test_rigid_and_flexible_names() {
        let mut ontology = Ontology::default();
        let r = ObjectProperty::new(iri("r"));
        let s = ObjectProperty::new(iri("s"));
        ontology.add_annotated_axiom(addressed(
            Axiom::subclass_of(
                class("A"),
                ClassExpression::some_values_from(r.clone(), class("B").into()),
            ),
            "N",
        ));
        ontology.add_annotated_axiom(
            AnnotatedAxiom::new(Axiom::object_property_assertion(s.clone(), iri("a"), iri("b")))
                .with_annotation(Annotation::object_global()),
        );
        ontology.add_axiom(subclass("N", "M"));
        ontology.mark_rigid(iri("r"));
        ontology.mark_rigid(iri("M"));
        let model = ContextModel::new(&ontology).unwrap();

        assert!(model.contains_rigid_names());
        assert_eq!(
            model.rigid_object_properties(),
            [&r].into_iter().collect::<FxHashSet<_>>()
        );
        assert!(model.rigid_classes().is_empty());
        assert_eq!(
            model.flexible_object_properties(),
            [&s].into_iter().collect::<FxHashSet<_>>()
        );
        assert_eq!(
            model.flexible_names(),
            [iri("A"), iri("B"), iri("s")]
                .into_iter()
                .collect::<FxHashSet<_>>()
        );
        assert!(model.object_signature().contains_iri(&iri("a")));
        assert!(!model.flexible_names().contains(&iri("a")));
        assert_eq!(model.classes_in_signature().len(), 4);
        assert!(!model.object_signature().contains_iri(&iri("N")));
        assert!(model.meta_signature().contains_iri(&iri("N")));
        assert!(model.meta_ontology().is_rigid(&iri("M")));
    }

    #[test]
    fn test_object_ontology_keeps_rigid_labels() {
        let mut ontology = Ontology::default();
        ontology.add_annotated_axiom(addressed(subclass("A", "B"), "N"));
        ontology.mark_rigid(iri("A"));
        ontology.mark_rigid(iri("Z"));
        let model = ContextModel::new(&ontology).unwrap();
        let object = model
            .object_ontology(&Type::new([class("N")], []).unwrap())
            .unwrap()
            .to_ontology();
        assert!(object.is_rigid(&iri("A")));
        assert!(!object.is_rigid(&iri("Z")));
    }
}
