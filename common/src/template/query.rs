use super::resource::{Resource, ResourceType};
use super::Template;

/// Resources of a given type, in template order
pub fn select_by_type(
    template: &Template,
    resource_type: ResourceType,
) -> impl Iterator<Item = (&str, &Resource)> {
    template
        .resources()
        .filter(move |(_, resource)| resource.resource_type() == Some(resource_type))
}

/// First version published for the function with the given logical name
pub fn find_version_for<'a>(
    function_name: &str,
    versions: impl IntoIterator<Item = (&'a str, &'a Resource)>,
) -> Option<(&'a str, &'a Resource)> {
    versions.into_iter().find(|(_, resource)| match resource {
        Resource::Version(version) => {
            version.properties.function_name.ref_target() == Some(function_name)
        }
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template() -> Template {
        Template::from_value(json!({
            "Resources": {
                "Fn1": {"Type": "AWS::Lambda::Function", "Properties": {}},
                "Bucket": {"Type": "AWS::S3::Bucket"},
                "Fn2": {"Type": "AWS::Lambda::Function", "Properties": {}},
                "Fn2Version": {
                    "Type": "AWS::Lambda::Version",
                    "Properties": {"FunctionName": {"Ref": "Fn2"}}
                },
                "Fn2VersionOld": {
                    "Type": "AWS::Lambda::Version",
                    "Properties": {"FunctionName": {"Ref": "Fn2"}}
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn selects_in_template_order() {
        let template = template();

        let names = select_by_type(&template, ResourceType::Function)
            .map(|(name, _)| name)
            .collect::<Vec<_>>();

        assert_eq!(names, ["Fn1", "Fn2"]);
        assert_eq!(select_by_type(&template, ResourceType::Alias).count(), 0);
    }

    #[test]
    fn finds_first_matching_version() {
        let template = template();
        let versions = select_by_type(&template, ResourceType::Version).collect::<Vec<_>>();

        let (name, _) = find_version_for("Fn2", versions.iter().copied()).unwrap();
        assert_eq!(name, "Fn2Version");
        assert!(find_version_for("Fn1", versions).is_none());
    }
}
