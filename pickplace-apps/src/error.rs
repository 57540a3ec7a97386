use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("pickplace-apps: Failed to parse {:?} as toml ({}).", .0, .1)]
    TomlParseFailure(PathBuf, #[source] toml::de::Error),
    #[error("pickplace-apps: No File {:?} is found ({}).", .0, .1)]
    NoFile(PathBuf, #[source] std::io::Error),
    #[error("pickplace-apps: pickplace-client: {}", .0)]
    Client(#[from] pickplace_client::Error),
    #[error("pickplace-apps: pickplace-planner: {}", .0)]
    Planner(#[from] pickplace_planner::Error),
}
