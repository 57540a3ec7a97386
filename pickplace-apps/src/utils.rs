use std::path::PathBuf;

use tracing::warn;

const PICKPLACE_CONFIG_ENV_NAME: &str = "PICKPLACE_CONFIG_PATH";

/// Get config path from input or env PICKPLACE_CONFIG_PATH
pub fn get_config_path(config: Option<PathBuf>) -> Option<PathBuf> {
    if config.is_some() {
        config
    } else {
        std::env::var(PICKPLACE_CONFIG_ENV_NAME)
            .map(|s| {
                warn!("### ENV VAR {} is used ###", s);
                PathBuf::from(s)
            })
            .ok()
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default: info for the pickplace crates)
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            "pickplace_apps=info,pickplace_client=info,pickplace_planner=info".to_owned()
        }))
        .init();
}
