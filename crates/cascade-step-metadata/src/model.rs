use serde::{Deserialize, Serialize};

use crate::types::TypeIdentity;

/// Metadata for one parameter of a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMetadata {
    /// Wire identifier of the parameter
    pub name: String,

    /// Human-readable label
    pub display_name: String,

    /// Erased value type
    #[serde(rename = "type")]
    pub property_type: TypeIdentity,

    /// Whether the parameter must be supplied
    pub is_required: bool,

    /// Concrete type arguments of a parameterized declared type
    #[serde(default)]
    pub collection_element_types: Vec<TypeIdentity>,

    /// Locator of the nested type's descriptor, if the type is itself introspectable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptor_url: Option<String>,
}

impl PropertyMetadata {
    /// Create a scalar property with a capitalized display name
    pub fn new(name: impl Into<String>, property_type: impl Into<TypeIdentity>, is_required: bool) -> Self {
        let name = name.into();
        Self {
            display_name: crate::types::capitalize(&name),
            name,
            property_type: property_type.into(),
            is_required,
            collection_element_types: Vec::new(),
            descriptor_url: None,
        }
    }
}

/// Identity and structural role of a step.
///
/// Decorators see the header read-only, so none of these fields can change
/// once base extraction is done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepHeader {
    /// Human-readable label
    pub display_name: String,

    /// Stable identifier callers use to invoke the step
    pub function_name: String,

    /// Fully-qualified type implementing the step
    #[serde(rename = "type")]
    pub step_type: TypeIdentity,

    /// Locator for further detail, supplied by the registry
    pub descriptor_url: String,

    /// Capabilities required from the execution environment
    #[serde(default)]
    pub required_context: Vec<TypeIdentity>,

    /// Capabilities provided to nested steps
    #[serde(default)]
    pub provided_context: Vec<TypeIdentity>,

    /// Whether the step hosts a nested block of steps
    pub is_block_container: bool,

    /// Whether exactly one property is required
    pub has_single_required_parameter: bool,

    /// Snippet generator URL for steps invokable through it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation_url: Option<String>,
}

/// A catalog record describing one step type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepMetadata {
    #[serde(flatten)]
    pub header: StepHeader,

    /// Parameters of the step, in presentation order
    #[serde(default)]
    pub properties: Vec<PropertyMetadata>,
}

impl StepMetadata {
    /// Stable identifier of the step
    pub fn function_name(&self) -> &str {
        &self.header.function_name
    }

    /// Fully-qualified type of the step
    pub fn step_type(&self) -> &TypeIdentity {
        &self.header.step_type
    }

    /// Look up a property by wire name
    pub fn property(&self, name: &str) -> Option<&PropertyMetadata> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> StepMetadata {
        StepMetadata {
            header: StepHeader {
                display_name: "Sleep".to_string(),
                function_name: "sleep".to_string(),
                step_type: TypeIdentity::from("a.SleepStep"),
                descriptor_url: "/descriptorByName/a.SleepStep".to_string(),
                required_context: vec![],
                provided_context: vec![],
                is_block_container: false,
                has_single_required_parameter: true,
                invocation_url: None,
            },
            properties: vec![PropertyMetadata::new("time", "int", true)],
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "displayName": "Sleep",
                "functionName": "sleep",
                "type": "a.SleepStep",
                "descriptorUrl": "/descriptorByName/a.SleepStep",
                "requiredContext": [],
                "providedContext": [],
                "isBlockContainer": false,
                "hasSingleRequiredParameter": true,
                "properties": [{
                    "name": "time",
                    "displayName": "Time",
                    "type": "int",
                    "isRequired": true,
                    "collectionElementTypes": []
                }]
            })
        );
    }

    #[test]
    fn test_optional_urls_are_emitted_when_present() {
        let mut step = sample();
        step.header.invocation_url = Some("/pipeline-syntax/generateSnippet?$class=a.SleepStep".to_string());
        step.properties[0].descriptor_url = Some("/descriptorByName/int".to_string());

        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["invocationUrl"], "/pipeline-syntax/generateSnippet?$class=a.SleepStep");
        assert_eq!(value["properties"][0]["descriptorUrl"], "/descriptorByName/int");
    }

    #[test]
    fn test_property_lookup() {
        let step = sample();
        assert!(step.property("time").is_some());
        assert!(step.property("unit").is_none());
    }
}
