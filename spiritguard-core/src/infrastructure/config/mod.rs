pub mod project;

pub use crate::domain::project::ProjectConfig;
pub use project::{
    load_config_file, load_explicit_config, load_project_config, load_project_config_with_env,
};
