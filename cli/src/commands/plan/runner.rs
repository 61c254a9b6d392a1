use crate::commands::plan::PlanCommand;
use crate::error::Error;
use crate::runner::Runner;
use crate::writer::Writer;
use eyre::WrapErr;
use lambda_alias_common::deploy::{self, Report};

pub(crate) struct PlanRunner<'a> {
    pub(crate) command: PlanCommand,
    pub(crate) writer: &'a Writer,
}

impl Runner for PlanRunner<'_> {
    /// Print the aliases a subsequent apply would create
    fn run(&mut self) -> Result<(), Error> {
        let template = self.template(&self.command.args.template)?;
        let aliases = self.aliases(&self.command.args)?;
        let report = deploy::plan(&template, &aliases);

        self.writer.text(&summary(&report))?;

        self.writer
            .json(serde_json::to_value(&report).wrap_err("Failed to serialize the plan")?)
    }
}

fn summary(report: &Report) -> String {
    let mut lines = vec![format!(
        "{} {}",
        console::style("Active alias").green().bold(),
        report.active
    )];

    if report.aliases.is_empty() {
        lines.push(console::style("No aliases to create").dim().to_string());
    }

    lines.extend(report.aliases.iter().map(|name| format!("  + {name}")));

    if !report.skipped.is_empty() {
        lines.push(format!(
            "{}",
            console::style("Skipped, no published version").yellow().bold()
        ));

        lines.extend(report.skipped.iter().map(|name| format!("  - {name}")));
    }

    format!("{}\n", lines.join("\n"))
}
