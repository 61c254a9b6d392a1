use super::intrinsic::Intrinsic;
use eyre::{eyre, WrapErr};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Resource types the alias wiring knows the shape of
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Function,
    Version,
    Alias,
    Permission,

    /// REST API method, its proxy integration URI is built with Fn::Join
    Method,

    /// HTTP API integration, its URI is a Fn::GetAtt
    Integration,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Function => "AWS::Lambda::Function",
            ResourceType::Version => "AWS::Lambda::Version",
            ResourceType::Alias => "AWS::Lambda::Alias",
            ResourceType::Permission => "AWS::Lambda::Permission",
            ResourceType::Method => "AWS::ApiGateway::Method",
            ResourceType::Integration => "AWS::ApiGatewayV2::Integration",
        }
    }

    pub fn from_type(type_name: &str) -> Option<Self> {
        [
            ResourceType::Function,
            ResourceType::Version,
            ResourceType::Alias,
            ResourceType::Permission,
            ResourceType::Method,
            ResourceType::Integration,
        ]
        .into_iter()
        .find(|resource_type| resource_type.as_str() == type_name)
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything a resource declares besides its Type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Definition<P> {
    pub properties: P,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<DependsOn>,

    /// Condition, DeletionPolicy, Metadata and the like
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl<P> Definition<P> {
    pub fn new(properties: P) -> Self {
        Definition {
            properties,
            depends_on: None,
            attributes: Map::new(),
        }
    }
}

/// DependsOn is either a single name or a list of names, written back in the same form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependsOn {
    One(String),
    Many(Vec<String>),
}

impl DependsOn {
    pub fn names(&self) -> &[String] {
        match self {
            DependsOn::One(name) => std::slice::from_ref(name),
            DependsOn::Many(names) => names,
        }
    }
}

impl<P> Definition<P> {
    pub fn depends_on(&self) -> &[String] {
        match &self.depends_on {
            Some(depends_on) => depends_on.names(),
            None => &[],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersionProperties {
    pub function_name: Intrinsic,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AliasProperties {
    pub name: Intrinsic,
    pub function_name: Intrinsic,
    pub function_version: Intrinsic,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionProperties {
    /// A GetAtt/Ref for functions of the same stack, a literal ARN for external ones
    pub function_name: Intrinsic,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MethodProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration: Option<MethodIntegration>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MethodIntegration {
    /// Usually a literal, but may come from a parameter
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub integration_type: Option<Intrinsic>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<Intrinsic>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IntegrationProperties {
    pub integration_type: Intrinsic,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_uri: Option<Intrinsic>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// A single entry of the template's Resources section
#[derive(Clone, Debug, PartialEq)]
pub enum Resource {
    Function(Definition<Map<String, Value>>),
    Version(Definition<VersionProperties>),
    Alias(Definition<AliasProperties>),
    Permission(Definition<PermissionProperties>),
    Method(Definition<MethodProperties>),
    Integration(Definition<IntegrationProperties>),

    /// Any other type, kept untouched including its Type field
    Other(Map<String, Value>),
}

impl Resource {
    /// None for resources the wiring does not look into
    pub fn resource_type(&self) -> Option<ResourceType> {
        match self {
            Resource::Function(_) => Some(ResourceType::Function),
            Resource::Version(_) => Some(ResourceType::Version),
            Resource::Alias(_) => Some(ResourceType::Alias),
            Resource::Permission(_) => Some(ResourceType::Permission),
            Resource::Method(_) => Some(ResourceType::Method),
            Resource::Integration(_) => Some(ResourceType::Integration),
            Resource::Other(_) => None,
        }
    }

    /// Type field as written in the template
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Resource::Other(object) => object.get("Type").and_then(Value::as_str),
            _ => self.resource_type().map(|resource_type| resource_type.as_str()),
        }
    }

    pub fn depends_on(&self) -> &[String] {
        match self {
            Resource::Function(definition) => definition.depends_on(),
            Resource::Version(definition) => definition.depends_on(),
            Resource::Alias(definition) => definition.depends_on(),
            Resource::Permission(definition) => definition.depends_on(),
            Resource::Method(definition) => definition.depends_on(),
            Resource::Integration(definition) => definition.depends_on(),
            Resource::Other(_) => &[],
        }
    }
}

fn definition<P: DeserializeOwned>(
    value: Value,
    resource_type: ResourceType,
) -> eyre::Result<Definition<P>> {
    serde_json::from_value(value).wrap_err(format!("Malformed {resource_type} resource"))
}

impl TryFrom<Value> for Resource {
    type Error = eyre::Report;

    fn try_from(value: Value) -> eyre::Result<Self> {
        let Value::Object(mut object) = value else {
            return Err(eyre!("Resource is not an object"));
        };

        let Some(resource_type) = object
            .get("Type")
            .and_then(Value::as_str)
            .and_then(ResourceType::from_type)
        else {
            return Ok(Resource::Other(object));
        };

        object.remove("Type");
        let value = Value::Object(object);

        Ok(match resource_type {
            ResourceType::Function => Resource::Function(definition(value, resource_type)?),
            ResourceType::Version => Resource::Version(definition(value, resource_type)?),
            ResourceType::Alias => Resource::Alias(definition(value, resource_type)?),
            ResourceType::Permission => Resource::Permission(definition(value, resource_type)?),
            ResourceType::Method => Resource::Method(definition(value, resource_type)?),
            ResourceType::Integration => Resource::Integration(definition(value, resource_type)?),
        })
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Resource::try_from(value).map_err(|e| serde::de::Error::custom(format!("{e:#}")))
    }
}

/// Puts the Type field back in front of the definition
#[derive(Serialize)]
struct Typed<'a, P> {
    #[serde(rename = "Type")]
    resource_type: &'static str,

    #[serde(flatten)]
    definition: &'a Definition<P>,
}

impl Serialize for Resource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        fn typed<P: Serialize, S: Serializer>(
            resource_type: ResourceType,
            definition: &Definition<P>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            Typed {
                resource_type: resource_type.as_str(),
                definition,
            }
            .serialize(serializer)
        }

        match self {
            Resource::Function(definition) => typed(ResourceType::Function, definition, serializer),
            Resource::Version(definition) => typed(ResourceType::Version, definition, serializer),
            Resource::Alias(definition) => typed(ResourceType::Alias, definition, serializer),
            Resource::Permission(definition) => {
                typed(ResourceType::Permission, definition, serializer)
            }
            Resource::Method(definition) => typed(ResourceType::Method, definition, serializer),
            Resource::Integration(definition) => {
                typed(ResourceType::Integration, definition, serializer)
            }
            Resource::Other(object) => object.serialize(serializer),
        }
    }
}
