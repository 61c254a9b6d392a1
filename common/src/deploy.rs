use crate::alias::{generate_aliases, unversioned_functions};
use crate::routing::add_api_gateway_config;
use crate::template::{sanitize, Resource, Template};
use indexmap::IndexMap;
use eyre::eyre;
use serde::Serialize;
use std::collections::HashMap;

/// Aliases to create for every function, and the one receiving live traffic
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aliases {
    names: Vec<String>,
    active: String,
}

impl Aliases {
    pub fn new(names: Vec<String>, active: &str) -> eyre::Result<Self> {
        if names.is_empty() {
            return Err(eyre!("No aliases configured"));
        }

        if !names.iter().any(|name| name == active) {
            return Err(eyre!(
                "Active alias {active} is not one of the configured aliases: {}",
                names.join(", ")
            ));
        }

        // Two names turning into the same alias would collide in Lambda
        {
            let mut seen: HashMap<String, &str> = HashMap::new();

            for name in names.iter() {
                let sanitized = sanitize::alias_name(name);

                if let Some(previous) = seen.insert(sanitized.clone(), name) {
                    return Err(eyre!(
                        "Aliases {previous} and {name} both resolve to alias name {sanitized}"
                    ));
                }
            }
        }

        Ok(Aliases {
            names,
            active: active.to_string(),
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn active(&self) -> &str {
        &self.active
    }
}

/// Summary of what the wiring did (or would do) to a template
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Logical names of generated alias resources
    pub aliases: Vec<String>,

    /// Functions left without aliases, as no version is published for them
    pub skipped: Vec<String>,

    pub active: String,
}

impl Report {
    fn new(generated: &IndexMap<String, Resource>, template: &Template, aliases: &Aliases) -> Self {
        Report {
            aliases: generated.keys().cloned().collect(),
            skipped: unversioned_functions(template)
                .into_iter()
                .map(String::from)
                .collect(),
            active: aliases.active().to_string(),
        }
    }
}

/// Describe the aliases without touching the template
pub fn plan(template: &Template, aliases: &Aliases) -> Report {
    let generated = generate_aliases(aliases.names(), template, aliases.active());
    Report::new(&generated, template, aliases)
}

/// Add alias resources to the template and route all traffic through the active one
pub fn apply(template: &mut Template, aliases: &Aliases) -> eyre::Result<Report> {
    let generated = generate_aliases(aliases.names(), template, aliases.active());
    let report = Report::new(&generated, template, aliases);

    for function_name in report.skipped.iter() {
        log::warn!("Function {function_name} has no published version, no aliases created");
    }

    log::info!(
        "Adding {} alias resource(s), active alias is {}",
        generated.len(),
        aliases.active()
    );

    template.add_resources(generated);
    add_api_gateway_config(aliases.active(), template)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn active_must_be_configured() {
        assert!(Aliases::new(names(&["dev", "prod"]), "staging").is_err());
        assert!(Aliases::new(vec![], "prod").is_err());

        let aliases = Aliases::new(names(&["dev", "prod"]), "prod").unwrap();
        assert_eq!(aliases.active(), "prod");
        assert_eq!(aliases.names(), ["dev", "prod"]);
    }

    #[test]
    fn colliding_names_are_rejected() {
        let error = Aliases::new(names(&["feature/x", "feature.x"]), "feature/x").unwrap_err();
        assert!(error.to_string().contains("feature-x"));
    }

    #[test]
    fn apply_merges_and_rewrites() {
        let mut template = Template::from_value(json!({
            "Resources": {
                "Fn1": {"Type": "AWS::Lambda::Function", "Properties": {}},
                "Fn1Version": {
                    "Type": "AWS::Lambda::Version",
                    "Properties": {"FunctionName": {"Ref": "Fn1"}}
                },
                "Fn1Permission": {
                    "Type": "AWS::Lambda::Permission",
                    "Properties": {"FunctionName": {"Fn::GetAtt": ["Fn1", "Arn"]}}
                },
                "Worker": {"Type": "AWS::Lambda::Function", "Properties": {}}
            }
        }))
        .unwrap();

        let aliases = Aliases::new(names(&["dev", "prod"]), "prod").unwrap();
        let report = apply(&mut template, &aliases).unwrap();

        assert_eq!(report.aliases, ["Fn1Alias0", "Fn1Alias"]);
        assert_eq!(report.skipped, ["Worker"]);
        assert_eq!(template.len(), 6);

        let value = template.to_value().unwrap();
        assert_eq!(
            value["Resources"]["Fn1Permission"]["Properties"]["FunctionName"],
            json!({"Ref": "Fn1Alias"})
        );

        assert_eq!(
            value["Resources"]["Fn1Alias"]["Properties"]["Name"],
            json!("prod")
        );
    }

    #[test]
    fn apply_reports_what_plan_announced() {
        let mut template = Template::from_value(json!({
            "Resources": {
                "Fn1": {"Type": "AWS::Lambda::Function", "Properties": {}},
                "Fn1Version": {
                    "Type": "AWS::Lambda::Version",
                    "Properties": {"FunctionName": {"Ref": "Fn1"}}
                },
                "Cron": {"Type": "AWS::Lambda::Function", "Properties": {}}
            }
        }))
        .unwrap();

        let aliases = Aliases::new(names(&["dev", "feature/x", "prod"]), "prod").unwrap();
        let planned = plan(&template, &aliases);
        let applied = apply(&mut template, &aliases).unwrap();

        assert_eq!(applied, planned);
        assert_eq!(applied.aliases, ["Fn1Alias0", "Fn1Alias1", "Fn1Alias"]);
        assert_eq!(applied.skipped, ["Cron"]);
        assert_eq!(applied.active, "prod");

        for name in applied.aliases.iter() {
            assert!(template.get(name).is_some(), "{name} was not merged");
        }
    }

    #[test]
    fn plan_leaves_template_alone() {
        let template = Template::from_value(json!({
            "Resources": {"Fn1": {"Type": "AWS::Lambda::Function", "Properties": {}}}
        }))
        .unwrap();

        let aliases = Aliases::new(names(&["prod"]), "prod").unwrap();
        let report = plan(&template, &aliases);

        assert!(report.aliases.is_empty());
        assert_eq!(report.skipped, ["Fn1"]);
        assert_eq!(template.len(), 1);
    }
}
