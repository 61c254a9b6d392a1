pub mod alias;
pub mod deploy;
pub mod routing;
pub mod template;

pub use alias::generate_aliases;
pub use deploy::{apply, plan, Aliases, Report};
pub use routing::add_api_gateway_config;
pub use template::{Resource, ResourceType, Template};
