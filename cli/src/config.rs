use eyre::{eyre, WrapErr};
use lambda_alias_common::Aliases;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) const CONFIG_FILENAME: &str = "lambda-alias.toml";

/// ConfigFile is the structure of lambda-alias.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ConfigFile {
    /// [aliases]
    /// names = ["dev", "prod"]
    /// active = "prod"
    #[serde(default)]
    aliases: AliasesSection,

    #[serde(skip)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AliasesSection {
    #[serde(default)]
    names: Vec<String>,

    active: Option<String>,
}

impl ConfigFile {
    /// Read the config from an explicit path, or from the current dir
    ///
    /// An explicitly requested file must exist. Without one, a missing lambda-alias.toml
    /// results in an empty config and aliases have to come from the command line.
    pub(crate) fn load(path: Option<&Path>) -> eyre::Result<Self> {
        Self::load_in(Path::new("."), path)
    }

    /// Same as load(), with lambda-alias.toml looked up in a given dir
    fn load_in(dir: &Path, path: Option<&Path>) -> eyre::Result<Self> {
        match path {
            Some(path) => {
                let toml_string = fs::read_to_string(path)
                    .wrap_err(format!("Failed to read config {path:?}"))?;

                Self::parse(&toml_string, path)
            }

            None => {
                let path = dir.join(CONFIG_FILENAME);

                let Ok(toml_string) = fs::read_to_string(&path) else {
                    log::debug!("No {CONFIG_FILENAME} in {dir:?}, using defaults");
                    return Ok(Self::default());
                };

                Self::parse(&toml_string, &path)
            }
        }
    }

    fn parse(toml_string: &str, path: &Path) -> eyre::Result<Self> {
        let mut config: ConfigFile =
            toml::from_str(toml_string).wrap_err(format!("Failed to parse {path:?}"))?;

        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Aliases from the file, with command line values taking precedence
    ///
    /// The active alias can be omitted when only one alias is configured.
    pub(crate) fn aliases(&self, names: &[String], active: Option<&str>) -> eyre::Result<Aliases> {
        let names = if names.is_empty() {
            self.aliases.names.clone()
        } else {
            names.to_vec()
        };

        let active = match active.or(self.aliases.active.as_deref()) {
            Some(active) => active.to_string(),
            None if names.len() == 1 => names[0].clone(),
            None => return Err(eyre!("No active alias set, use --active or [aliases] active")),
        };

        if let Some(path) = &self.path {
            log::debug!("Aliases {names:?} (active {active}) with config {path:?}");
        }

        Aliases::new(names, &active)
    }
}
