mod runner;
use crate::commands::AliasArgs;
use crate::runner::{Runnable, Runner};
use crate::writer::Writer;
use runner::PlanRunner;

#[derive(clap::Args, Clone)]
pub(crate) struct PlanCommand {
    #[command(flatten)]
    pub(crate) args: AliasArgs,
}

impl Runnable for PlanCommand {
    fn runner<'a>(&self, writer: &'a Writer) -> impl Runner + 'a {
        PlanRunner {
            command: self.clone(),
            writer,
        }
    }
}
