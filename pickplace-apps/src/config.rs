use std::path::Path;

use pickplace_client::PickPlaceClientConfig;
use pickplace_planner::{RegionDescriptor, RegionShape};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Error;

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PickPlaceConfig {
    // TOML format has a restriction that if a table itself contains tables,
    // all keys with non-table values must be emitted first.
    /// Joints of the arm, in the order of the trajectory controller
    #[serde(default = "default_joint_names")]
    pub joint_names: Vec<String>,
    /// Region used when no region is given on the command line
    #[serde(default = "default_region")]
    pub region: RegionDescriptor,
    #[serde(default)]
    pub client: PickPlaceClientConfig,
}

fn default_joint_names() -> Vec<String> {
    ["s0", "s1", "e0", "e1", "w0", "w1", "w2"]
        .iter()
        .map(|name| format!("left_{name}"))
        .collect()
}

fn default_region() -> RegionDescriptor {
    RegionDescriptor {
        shape: RegionShape::Disk,
        center: [50.0, 50.0],
        // radius of 20 cells
        extent: [400.0, 400.0],
    }
}

impl Default for PickPlaceConfig {
    fn default() -> Self {
        Self {
            joint_names: default_joint_names(),
            region: default_region(),
            client: PickPlaceClientConfig::default(),
        }
    }
}

impl PickPlaceConfig {
    pub fn try_new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_str(
            &std::fs::read_to_string(&path)
                .map_err(|e| Error::NoFile(path.as_ref().to_owned(), e))?,
            &path,
        )
    }

    pub fn from_str<P: AsRef<Path>>(s: &str, path: P) -> Result<Self, Error> {
        let config: PickPlaceConfig =
            toml::from_str(s).map_err(|e| Error::TomlParseFailure(path.as_ref().to_owned(), e))?;
        config.region.validate()?;
        debug!("{:?} is loaded", path.as_ref());
        Ok(config)
    }
}
