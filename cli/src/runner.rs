use crate::commands::AliasArgs;
use crate::config::ConfigFile;
use crate::document;
use crate::error::Error;
use crate::writer::Writer;
use lambda_alias_common::{Aliases, Template};
use std::error::Error as StdError;
use std::path::Path;

pub(crate) trait Runner {
    /// Compiled template the command works on
    fn template(&self, path: &Path) -> Result<Template, Error> {
        document::read(path).map_err(|e| {
            self.error(
                Some("Invalid template"),
                Some(&format!("{e:#}")),
                None,
            )
        })
    }

    /// Aliases from lambda-alias.toml merged with command line arguments
    fn aliases(&self, args: &AliasArgs) -> Result<Aliases, Error> {
        ConfigFile::load(args.config.as_deref())
            .and_then(|config| config.aliases(&args.aliases, args.active.as_deref()))
            .map_err(|e| {
                self.error(
                    Some("Invalid alias configuration"),
                    Some(&format!("{e:#}")),
                    None,
                )
            })
    }

    /// Run the command
    ///
    /// Returns an error shown to the user in case of failure
    fn run(&mut self) -> Result<(), Error>;

    /// Construct an error shown to the user
    fn error(
        &self,
        title: Option<&str>,
        description: Option<&str>,
        origin: Option<Box<dyn StdError>>,
    ) -> Error {
        if let Some(origin) = origin {
            log::error!("{origin:?}");
        }

        if let Some(title) = title {
            Error::new(title, description)
        } else {
            Error::new(
                "Failed to run the command",
                Some("Run again with RUST_LOG=debug for details."),
            )
        }
    }
}

/// Return a runner for a command
pub(crate) trait Runnable {
    fn runner<'a>(&self, writer: &'a Writer) -> impl Runner + 'a;
}
