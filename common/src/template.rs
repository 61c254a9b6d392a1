mod intrinsic;
pub mod query;
mod resource;
pub mod sanitize;

pub use intrinsic::Intrinsic;
pub use resource::{
    AliasProperties, Definition, DependsOn, IntegrationProperties, MethodIntegration,
    MethodProperties, PermissionProperties, Resource, ResourceType, VersionProperties,
};

use eyre::{eyre, WrapErr};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

const RESOURCES: &str = "Resources";

/// Compiled CloudFormation template
///
/// Resources are typed and kept in their original order. All other top-level sections
/// (Outputs, Parameters, etc.) are carried as is, so the document is written back the
/// same way it was read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Template {
    resources: IndexMap<String, Resource>,

    /// Top-level sections, the Resources key only marks its position
    sections: Map<String, Value>,
}

impl Template {
    pub fn from_value(value: Value) -> eyre::Result<Self> {
        let Value::Object(mut sections) = value else {
            return Err(eyre!("Template is not an object"));
        };

        let mut resources = IndexMap::new();

        match sections.insert(RESOURCES.to_string(), Value::Null) {
            Some(Value::Object(raw)) => {
                for (name, resource) in raw {
                    let resource = Resource::try_from(resource)
                        .wrap_err(format!("Failed to read resource {name}"))?;

                    resources.insert(name, resource);
                }
            }

            None | Some(Value::Null) => {}
            Some(_) => return Err(eyre!("{RESOURCES} section is not an object")),
        }

        Ok(Template {
            resources,
            sections,
        })
    }

    pub fn from_json(json: &str) -> eyre::Result<Self> {
        let value: Value = serde_json::from_str(json).wrap_err("Failed to parse template JSON")?;
        Self::from_value(value)
    }

    pub fn to_value(&self) -> eyre::Result<Value> {
        serde_json::to_value(self).wrap_err("Failed to serialize template")
    }

    pub fn to_json_pretty(&self) -> eyre::Result<String> {
        serde_json::to_string_pretty(self).wrap_err("Failed to serialize template")
    }

    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    /// All resources in template order
    pub fn resources(&self) -> impl Iterator<Item = (&str, &Resource)> {
        self.resources
            .iter()
            .map(|(name, resource)| (name.as_str(), resource))
    }

    pub(crate) fn resources_mut(&mut self) -> impl Iterator<Item = (&str, &mut Resource)> {
        self.resources
            .iter_mut()
            .map(|(name, resource)| (name.as_str(), resource))
    }

    /// Add a resource, replacing the one with the same logical name if any
    pub fn add_resource(&mut self, name: impl Into<String>, resource: Resource) {
        self.resources.insert(name.into(), resource);
    }

    pub fn add_resources(&mut self, resources: impl IntoIterator<Item = (String, Resource)>) {
        self.resources.extend(resources);
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Serialize for Template {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.sections.len().max(1)))?;
        let mut resources_written = false;

        for (key, value) in self.sections.iter() {
            if key == RESOURCES {
                map.serialize_entry(RESOURCES, &self.resources)?;
                resources_written = true;
            } else {
                map.serialize_entry(key, value)?;
            }
        }

        // Template built in code, e.g. with Default
        if !resources_written {
            map.serialize_entry(RESOURCES, &self.resources)?;
        }

        map.end()
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?;
        write!(f, "{json}")
    }
}
