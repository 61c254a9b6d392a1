use crate::template::query::{find_version_for, select_by_type};
use crate::template::sanitize;
use crate::template::{
    AliasProperties, Definition, DependsOn, Intrinsic, Resource, ResourceType, Template,
};
use indexmap::IndexMap;
use serde_json::Map;

/// Logical name of an alias resource
///
/// The active alias is the one routing points to, so its name is predictable.
/// Other aliases are numbered by their position in the configured list.
pub fn alias_logical_name(
    function_name: &str,
    alias_name: &str,
    index: usize,
    active_alias_name: &str,
) -> String {
    if alias_name == active_alias_name {
        format!("{function_name}Alias")
    } else {
        format!("{function_name}Alias{index}")
    }
}

/// Alias resources for every function with a published version
///
/// Returns new resources only, the template itself is not modified.
pub fn generate_aliases<S: AsRef<str>>(
    alias_names: &[S],
    template: &Template,
    active_alias_name: &str,
) -> IndexMap<String, Resource> {
    let versions = select_by_type(template, ResourceType::Version).collect::<Vec<_>>();

    select_by_type(template, ResourceType::Function)
        .filter_map(|(function_name, _)| {
            let Some((version_name, _)) = find_version_for(function_name, versions.iter().copied())
            else {
                log::debug!("No version published for {function_name}, skipping its aliases");
                return None;
            };

            Some(
                alias_names
                    .iter()
                    .enumerate()
                    .map(move |(index, alias_name)| {
                        let alias_name: &str = alias_name.as_ref();

                        (
                            alias_logical_name(function_name, alias_name, index, active_alias_name),
                            alias(function_name, version_name, alias_name),
                        )
                    }),
            )
        })
        .flatten()
        .collect()
}

/// Functions which get no aliases because nothing publishes a version of them
pub fn unversioned_functions(template: &Template) -> Vec<&str> {
    let versions = select_by_type(template, ResourceType::Version).collect::<Vec<_>>();

    select_by_type(template, ResourceType::Function)
        .map(|(function_name, _)| function_name)
        .filter(|function_name| find_version_for(function_name, versions.iter().copied()).is_none())
        .collect()
}

fn alias(function_name: &str, version_name: &str, alias_name: &str) -> Resource {
    Resource::Alias(Definition {
        properties: AliasProperties {
            name: Intrinsic::Literal(sanitize::alias_name(alias_name)),
            function_name: Intrinsic::get_att(function_name, "Arn"),
            function_version: Intrinsic::get_att(version_name, "Version"),
            rest: Map::new(),
        },
        depends_on: Some(DependsOn::Many(vec![function_name.to_string()])),
        attributes: Map::new(),
    })
}
