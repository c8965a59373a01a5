pub mod collection;
pub mod config_root;
pub mod environment;
pub mod project;

pub use collection::{Collection, Inheriting};
pub use config_root::{ConfigRoot, Defaults, Environments, Projects};
pub use environment::{Environment, UserInfo, VersionControl};
pub use project::{FileSpec, Hook, Hooks, Project};
