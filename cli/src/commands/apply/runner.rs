use crate::commands::apply::ApplyCommand;
use crate::document::{self, Format};
use crate::error::Error;
use crate::runner::Runner;
use crate::writer::Writer;
use lambda_alias_common::deploy::{self, Report};
use lambda_alias_common::Template;
use serde_json::{json, Value};

pub(crate) struct ApplyRunner<'a> {
    pub(crate) command: ApplyCommand,
    pub(crate) writer: &'a Writer,
}

/// Structured output when the template goes to stdout together with the report
fn structured(report: &Report, template: &Template) -> eyre::Result<Value> {
    Ok(json!({"report": report, "template": template.to_value()?}))
}

impl Runner for ApplyRunner<'_> {
    /// Wire aliases into the template and write it out
    fn run(&mut self) -> Result<(), Error> {
        let mut template = self.template(&self.command.args.template)?;
        let aliases = self.aliases(&self.command.args)?;

        let report = deploy::apply(&mut template, &aliases).map_err(|e| {
            self.error(
                Some("Failed to wire aliases"),
                Some(&format!("{e:#}")),
                None,
            )
        })?;

        for function_name in report.skipped.iter() {
            self.writer.error(&format!(
                "{} {function_name} has no published version, skipped\n",
                console::style("Warning").yellow().bold()
            ))?;
        }

        let Some(output) = &self.command.output else {
            if self.writer.is_structured() {
                return self.writer.json(structured(&report, &template)?);
            }

            return self.writer.raw(&document::render(&template, Format::Json)?);
        };

        document::write(&template, output)?;

        self.writer.text(&format!(
            "{} {} alias resource(s) to {}, active alias is {}\n",
            console::style("Added").green().bold(),
            report.aliases.len(),
            output.display(),
            console::style(&report.active).bold(),
        ))?;

        self.writer
            .json(json!({"report": report, "output": output.display().to_string()}))
    }
}
