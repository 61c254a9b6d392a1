use crate::template::{
    Definition, DependsOn, IntegrationProperties, Intrinsic, MethodProperties,
    PermissionProperties, Resource, Template,
};
use eyre::{eyre, ContextCompat};
use serde_json::Value;

/// Integration type of API Gateway resources which invoke a Lambda directly
const PROXY_INTEGRATION: &str = "AWS_PROXY";

/// Present in every logical name produced by the alias generator
const ALIAS_MARKER: &str = "Alias";

/// Point API Gateway routes and Lambda permissions to the active alias
///
/// The template is changed in place. A proxy route without the expected URI shape stops
/// the pass with an error, resources handled before it stay rewritten.
pub fn add_api_gateway_config<'a>(
    active_alias_name: &str,
    template: &'a mut Template,
) -> eyre::Result<&'a mut Template> {
    for (name, resource) in template.resources_mut() {
        match resource {
            Resource::Method(method) => method_uri(name, method, active_alias_name)?,
            Resource::Integration(integration) => integration_uri(name, integration)?,
            Resource::Permission(permission) => permission_target(name, permission),
            Resource::Function(_)
            | Resource::Version(_)
            | Resource::Alias(_)
            | Resource::Other(_) => {}
        }
    }

    Ok(template)
}

/// REST API method: the invocation URI is joined from segments, the last one names the target
fn method_uri(
    name: &str,
    method: &mut Definition<MethodProperties>,
    active_alias_name: &str,
) -> eyre::Result<()> {
    let Some(integration) = method.properties.integration.as_mut() else {
        return Ok(());
    };

    let integration_type = integration.integration_type.as_ref().and_then(Intrinsic::literal);

    if integration_type != Some(PROXY_INTEGRATION) {
        return Ok(());
    }

    let Some(Intrinsic::Join {
        join: (_, segments),
    }) = integration.uri.as_mut()
    else {
        return Err(eyre!(
            "Method {name} has no Fn::Join expression in Properties.Integration.Uri"
        ));
    };

    let last = segments
        .last_mut()
        .wrap_err(format!("Method {name} has an empty Properties.Integration.Uri"))?;

    *last = Value::String(format!(":{active_alias_name}/invocations"));
    Ok(())
}

/// HTTP API integration: swap the function ARN for the alias ARN
fn integration_uri(
    name: &str,
    integration: &mut Definition<IntegrationProperties>,
) -> eyre::Result<()> {
    if integration.properties.integration_type.literal() != Some(PROXY_INTEGRATION) {
        return Ok(());
    }

    let Some(Intrinsic::GetAtt {
        target: (logical_id, attribute),
    }) = integration.properties.integration_uri.as_mut()
    else {
        return Err(eyre!(
            "Integration {name} has no Fn::GetAtt expression in Properties.IntegrationUri"
        ));
    };

    if logical_id.contains(ALIAS_MARKER) {
        log::debug!("Integration {name} already targets {logical_id}");
        return Ok(());
    }

    logical_id.push_str(ALIAS_MARKER);
    *attribute = "AliasArn".to_string();
    Ok(())
}

fn permission_target(name: &str, permission: &mut Definition<PermissionProperties>) {
    let Some((target, _)) = permission.properties.function_name.get_att_target() else {
        log::debug!("Permission {name} is for a function outside of the template");
        return;
    };

    if target.contains(ALIAS_MARKER) {
        log::debug!("Permission {name} already targets {target}");
        return;
    }

    let alias = format!("{target}{ALIAS_MARKER}");
    permission.properties.function_name = Intrinsic::reference(&alias);
    permission.depends_on = Some(DependsOn::Many(vec![alias]));
}
