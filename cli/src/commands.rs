pub mod apply;
pub mod plan;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Add alias resources to a template and route traffic through the active alias
    Apply(apply::ApplyCommand),

    /// Show which aliases would be created, without changing anything
    Plan(plan::PlanCommand),
}

/// Arguments shared by all commands
#[derive(clap::Args, Clone, Debug)]
pub(crate) struct AliasArgs {
    /// Compiled CloudFormation template, JSON or YAML (.yaml/.yml)
    #[arg(short, long)]
    pub(crate) template: PathBuf,

    /// Config file, lambda-alias.toml in the current dir by default
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Comma-separated list of alias names, overrides the config file
    #[arg(short, long, value_delimiter = ',')]
    pub(crate) aliases: Vec<String>,

    /// Alias receiving live traffic
    #[arg(long)]
    pub(crate) active: Option<String>,
}
