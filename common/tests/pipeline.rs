use lambda_alias_common::{add_api_gateway_config, apply, generate_aliases, Aliases, Template};
use serde_json::{json, Value};

fn stack() -> Template {
    Template::from_json(include_str!("fixtures/stack.json")).unwrap()
}

fn resource(template: &Template, name: &str) -> Value {
    template.to_value().unwrap()["Resources"][name].clone()
}

#[test]
fn generates_aliases_for_published_functions() {
    let aliases = generate_aliases(&["dev", "prod"], &stack(), "prod");
    let names = aliases.keys().cloned().collect::<Vec<_>>();

    // Cron has no version, so it gets nothing
    assert_eq!(names, ["Fn1Alias0", "Fn1Alias"]);

    assert_eq!(
        serde_json::to_value(&aliases["Fn1Alias0"]).unwrap(),
        json!({
            "Type": "AWS::Lambda::Alias",
            "Properties": {
                "Name": "dev",
                "FunctionName": {"Fn::GetAtt": ["Fn1", "Arn"]},
                "FunctionVersion": {"Fn::GetAtt": ["Fn1VersionAbc123", "Version"]}
            },
            "DependsOn": ["Fn1"]
        })
    );
}

#[test]
fn routes_traffic_through_active_alias() {
    let mut template = stack();
    let aliases = Aliases::new(vec!["dev".into(), "prod".into()], "prod").unwrap();
    let report = apply(&mut template, &aliases).unwrap();

    assert_eq!(report.aliases, ["Fn1Alias0", "Fn1Alias"]);
    assert_eq!(report.skipped, ["Cron"]);

    let method = resource(&template, "ApiMethodGet");
    let uri = &method["Properties"]["Integration"]["Uri"]["Fn::Join"][1];
    assert_eq!(uri.as_array().unwrap().len(), 7);
    assert_eq!(uri[5], json!({"Fn::GetAtt": ["Fn1", "Arn"]}));
    assert_eq!(uri[6], json!(":prod/invocations"));

    assert_eq!(
        resource(&template, "HttpApiIntegration")["Properties"]["IntegrationUri"],
        json!({"Fn::GetAtt": ["Fn1Alias", "AliasArn"]})
    );

    let permission = resource(&template, "Fn1ApiPermission");
    assert_eq!(permission["Properties"]["FunctionName"], json!({"Ref": "Fn1Alias"}));
    assert_eq!(permission["DependsOn"], json!(["Fn1Alias"]));

    assert_eq!(
        resource(&template, "ExternalPermission"),
        resource(&stack(), "ExternalPermission")
    );
}

#[test]
fn untouched_parts_survive() {
    let mut template = stack();
    let aliases = Aliases::new(vec!["prod".into()], "prod").unwrap();
    apply(&mut template, &aliases).unwrap();

    let value = template.to_value().unwrap();
    assert_eq!(value["Description"], json!("Orders service"));
    assert_eq!(value["Outputs"]["ServiceEndpoint"]["Value"], json!("https://api.example.com"));
    assert_eq!(value["Resources"]["Fn1"]["DependsOn"], json!("Fn1Role"));
    assert_eq!(value["Resources"]["Fn1VersionAbc123"]["DeletionPolicy"], json!("Retain"));

    let last = value["Resources"].as_object().unwrap().keys().last().cloned();
    assert_eq!(last.as_deref(), Some("Fn1Alias"));
}

#[test]
fn rewriting_twice_is_stable() {
    let mut template = stack();
    add_api_gateway_config("prod", &mut template).unwrap();
    let once = template.clone();

    add_api_gateway_config("prod", &mut template).unwrap();
    assert_eq!(template, once);
}
