use eyre::WrapErr;
use lambda_alias_common::Template;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Serialization format of a template file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Format {
    Json,

    /// Long form intrinsics only ("Fn::GetAtt:"), short form tags like !Ref are not supported
    Yaml,
}

impl Format {
    /// Derived from the file extension, JSON unless it's .yaml/.yml
    pub(crate) fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some("yaml") | Some("yml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

pub(crate) fn parse(text: &str, format: Format) -> eyre::Result<Template> {
    let value: Value = match format {
        Format::Json => serde_json::from_str(text).wrap_err("Failed to parse template JSON")?,
        Format::Yaml => serde_saphyr::from_str(text).wrap_err("Failed to parse template YAML")?,
    };

    Template::from_value(value)
}

pub(crate) fn render(template: &Template, format: Format) -> eyre::Result<String> {
    Ok(match format {
        Format::Json => format!("{}\n", template.to_json_pretty()?),
        Format::Yaml => serde_saphyr::to_string(&template.to_value()?)
            .wrap_err("Failed to serialize template YAML")?,
    })
}

pub(crate) fn read(path: &Path) -> eyre::Result<Template> {
    let text = fs::read_to_string(path).wrap_err(format!("Failed to read template {path:?}"))?;
    parse(&text, Format::from_path(path)).wrap_err(format!("Invalid template {path:?}"))
}

pub(crate) fn write(template: &Template, path: &Path) -> eyre::Result<()> {
    let text = render(template, Format::from_path(path))?;
    fs::write(path, text).wrap_err(format!("Failed to write template {path:?}"))
}
