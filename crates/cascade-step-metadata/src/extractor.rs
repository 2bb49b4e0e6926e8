//! Derives property metadata from the declared parameters of a step type.

use crate::error::IntrospectionError;
use crate::model::PropertyMetadata;
use crate::registry::{IntrospectionModelProvider, StepRegistry};
use crate::types::{ParameterDeclaration, TypeIdentity, TypeRef};

/// Turns introspection declarations into [`PropertyMetadata`]
pub struct ParameterExtractor<'a> {
    model: &'a dyn IntrospectionModelProvider,
    registry: &'a dyn StepRegistry,
}

impl<'a> ParameterExtractor<'a> {
    pub fn new(model: &'a dyn IntrospectionModelProvider, registry: &'a dyn StepRegistry) -> Self {
        Self { model, registry }
    }

    /// Extract every declared parameter of `type_identity`, in declaration order.
    ///
    /// Fails with [`IntrospectionError::NotIntrospectable`] when the type has
    /// no usable parameter contract.
    pub fn extract_parameters(&self, type_identity: &TypeIdentity) -> Result<Vec<PropertyMetadata>, IntrospectionError> {
        let declarations = self.model.describe(type_identity)?;
        Ok(declarations.iter().map(|decl| self.property_from_declaration(decl)).collect())
    }

    fn property_from_declaration(&self, decl: &ParameterDeclaration) -> PropertyMetadata {
        PropertyMetadata {
            name: decl.name.clone(),
            display_name: decl.display_name(),
            property_type: decl.erased_type.clone(),
            is_required: decl.required,
            collection_element_types: collection_element_types(&decl.declared_type),
            descriptor_url: self.registry.find_descriptor_url(&decl.erased_type),
        }
    }
}

/// Direct, concrete type arguments of a declared type.
///
/// Nested parameterized arguments and wildcards are skipped.
pub fn collection_element_types(declared_type: &TypeRef) -> Vec<TypeIdentity> {
    declared_type
        .type_arguments()
        .iter()
        .filter_map(TypeRef::as_concrete)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeRegistry;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collection_element_types_keeps_only_concrete_arguments() {
        let declared = TypeRef::parameterized(
            "java.util.Map",
            vec![
                TypeRef::concrete("java.lang.String"),
                TypeRef::parameterized("java.util.List", vec![TypeRef::concrete("java.lang.Integer")]),
                TypeRef::wildcard(),
                TypeRef::concrete("java.lang.Long"),
            ],
        );

        assert_eq!(
            collection_element_types(&declared),
            vec![TypeIdentity::from("java.lang.String"), TypeIdentity::from("java.lang.Long")]
        );
    }

    #[test]
    fn test_scalar_types_have_no_element_types() {
        assert!(collection_element_types(&TypeRef::concrete("int")).is_empty());
        assert!(collection_element_types(&TypeRef::wildcard()).is_empty());
        assert!(collection_element_types(&TypeRef::parameterized("java.util.List", vec![])).is_empty());
    }

    #[test]
    fn test_extract_parameters_in_declaration_order() {
        let registry = FakeRegistry::new()
            .with_type(
                "a.GitStep",
                vec![
                    ParameterDeclaration::new("url", "java.lang.String", true),
                    ParameterDeclaration::new("branches", "java.util.List", false).with_declared_type(
                        TypeRef::parameterized("java.util.List", vec![TypeRef::concrete("a.BranchSpec")]),
                    ),
                    ParameterDeclaration::new("extension", "a.GitExtension", false),
                ],
            )
            .with_nested_descriptor("a.GitExtension", "/descriptorByName/a.GitExtension");

        let extractor = ParameterExtractor::new(&registry, &registry);
        let props = extractor.extract_parameters(&TypeIdentity::from("a.GitStep")).unwrap();

        let names: Vec<&str> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["url", "branches", "extension"]);

        assert_eq!(props[0].display_name, "Url");
        assert!(props[0].is_required);
        assert!(props[0].collection_element_types.is_empty());
        assert_eq!(props[0].descriptor_url, None);

        assert_eq!(props[1].property_type.as_str(), "java.util.List");
        assert_eq!(props[1].collection_element_types, vec![TypeIdentity::from("a.BranchSpec")]);

        assert_eq!(props[2].descriptor_url.as_deref(), Some("/descriptorByName/a.GitExtension"));
    }

    #[test]
    fn test_unknown_type_is_not_introspectable() {
        let registry = FakeRegistry::new();
        let extractor = ParameterExtractor::new(&registry, &registry);

        let err = extractor.extract_parameters(&TypeIdentity::from("a.Missing")).unwrap_err();
        assert_eq!(err, IntrospectionError::NotIntrospectable(TypeIdentity::from("a.Missing")));
    }
}
