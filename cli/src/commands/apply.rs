mod runner;
use crate::commands::AliasArgs;
use crate::runner::{Runnable, Runner};
use crate::writer::Writer;
use runner::ApplyRunner;
use std::path::PathBuf;

#[derive(clap::Args, Clone)]
pub(crate) struct ApplyCommand {
    #[command(flatten)]
    pub(crate) args: AliasArgs,

    /// Where to write the resulting template (stdout if not specified), format follows the extension
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,
}

impl Runnable for ApplyCommand {
    fn runner<'a>(&self, writer: &'a Writer) -> impl Runner + 'a {
        ApplyRunner {
            command: self.clone(),
            writer,
        }
    }
}
