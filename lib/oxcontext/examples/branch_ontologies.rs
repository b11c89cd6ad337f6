//! Builds the object ontology of every branch of a small contextualized
//! ontology, then duplicates its flexible names.
//!
//! Run with: RUST_LOG=debug cargo run -p oxcontext --example branch_ontologies

use oxcontext::{ContextModel, Flexibilizer, FlexibilizerConfig, SyntaxParser, Type};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DOCUMENT: &str = "
# Meta level: Compliant contexts are the ones where Audited holds
Compliant ⊑ Audited

# Object level axioms addressed by naming concepts
Employee ⊑ ∃worksFor.Company @ Audited
Contractor ⊑ ¬Employee @ Compliant

# Shared by every branch
worksFor(alice, acme) @ global
rigid worksFor
";

/// Number of polarity assignments of `concepts` naming concepts.
fn branch_count(concepts: usize) -> Option<u32> {
    1_u32.checked_shl(u32::try_from(concepts).ok()?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let ontology = SyntaxParser::new().parse_ontology(DOCUMENT)?;
    let model = ContextModel::new(&ontology)?;
    info!("meta ontology:\n{}", model.meta_ontology());

    // One branch per polarity assignment of the naming concepts
    let concepts = model.naming_concepts().cloned().collect::<Vec<_>>();
    let branches = branch_count(concepts.len())
        .ok_or("too many naming concepts to enumerate every branch")?;
    for assignment in 0..branches {
        let (positive, negative): (Vec<_>, Vec<_>) = concepts
            .iter()
            .cloned()
            .enumerate()
            .partition(|(i, _)| assignment & (1 << *i) != 0);
        let t = Type::new(
            positive.into_iter().map(|(_, c)| c),
            negative.into_iter().map(|(_, c)| c),
        )?;
        let object = model.object_ontology(&t)?;
        info!(
            positive = ?t.positive().iter().map(ToString::to_string).collect::<Vec<_>>(),
            axioms = object.len(),
            "branch"
        );
        for axiom in object.iter() {
            info!("  {axiom}");
        }
    }

    let flexible = model.flexible_names();
    let t = Type::new(concepts, [])?;
    let mut object = model.object_ontology(&t)?.to_ontology();
    let flexibilizer = Flexibilizer::new(FlexibilizerConfig::new().with_threads(2))?;
    let report = flexibilizer.rename(&mut object, &flexible, 2);
    info!(?report, "duplicated {} flexible names", flexible.len());
    info!("renamed object ontology:\n{object}");
    Ok(())
}
