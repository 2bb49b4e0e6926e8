use std::collections::HashSet;

use crate::descriptor::Descriptor;
use crate::model::PropertyMetadata;
use crate::types::TypeIdentity;

/// Structural role of a step, as projected from its descriptor and parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepRoles {
    /// Distinct, in first-declared order
    pub required_context: Vec<TypeIdentity>,
    /// Distinct, in first-declared order
    pub provided_context: Vec<TypeIdentity>,
    pub is_block_container: bool,
    pub has_single_required_parameter: bool,
}

/// Projects descriptor flags into [`StepRoles`]. Pure, never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleClassifier;

impl RoleClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, descriptor: &Descriptor, properties: &[PropertyMetadata]) -> StepRoles {
        let has_single_required_parameter = has_single_required_parameter(properties);

        match descriptor {
            Descriptor::Native(d) => StepRoles {
                required_context: distinct(&d.required_context),
                provided_context: distinct(&d.provided_context),
                is_block_container: d.takes_implicit_block,
                has_single_required_parameter,
            },
            // Wrapped actions never run inside a block and declare no contexts
            Descriptor::Meta(_) => StepRoles {
                has_single_required_parameter,
                ..StepRoles::default()
            },
        }
    }
}

/// True iff exactly one property is required
pub fn has_single_required_parameter(properties: &[PropertyMetadata]) -> bool {
    properties.iter().filter(|p| p.is_required).count() == 1
}

fn distinct(types: &[TypeIdentity]) -> Vec<TypeIdentity> {
    let mut seen = HashSet::with_capacity(types.len());
    types.iter().filter(|t| seen.insert(*t)).cloned().collect()
}
