/*
Copyright 2017 Takashi Ogura

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/
use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::*;

use crate::{
    errors::*,
    grid::{OccupancyGrid, DEFAULT_GRID_SIZE},
};

/// Shape of an allowed region
#[derive(Clone, Copy, Serialize, Deserialize, Debug, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RegionShape {
    #[serde(alias = "square")]
    Rectangle,
    #[serde(alias = "circle")]
    Disk,
}

impl RegionShape {
    /// Shape code used by the region request message
    pub const SQUARE_CODE: u8 = 0;
    /// Shape code used by the region request message
    pub const CIRCLE_CODE: u8 = 1;
}

impl fmt::Display for RegionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionShape::Rectangle => write!(f, "rectangle"),
            RegionShape::Disk => write!(f, "disk"),
        }
    }
}

impl FromStr for RegionShape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rectangle" | "square" => Ok(RegionShape::Rectangle),
            "disk" | "circle" => Ok(RegionShape::Disk),
            _ => Err(Error::InvalidRegionShape(s.to_owned())),
        }
    }
}

impl TryFrom<u8> for RegionShape {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            Self::SQUARE_CODE => Ok(RegionShape::Rectangle),
            Self::CIRCLE_CODE => Ok(RegionShape::Disk),
            _ => Err(Error::InvalidRegionShape(code.to_string())),
        }
    }
}

/// Declarative 2D region, in grid cells
#[derive(Clone, Copy, Serialize, Deserialize, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RegionDescriptor {
    pub shape: RegionShape,
    /// (x, y) of the center [cell]
    pub center: [f64; 2],
    /// (x, y) extent [cell], see `rasterize` for how it is used
    pub extent: [f64; 2],
}

impl RegionDescriptor {
    pub fn new(shape: RegionShape, center: [f64; 2], extent: [f64; 2]) -> Result<Self> {
        let region = Self {
            shape,
            center,
            extent,
        };
        region.validate()?;
        Ok(region)
    }

    /// Create from a metric scale [m], converted into cells of `resolution` [m]
    ///
    /// The center is already expressed in cells.
    pub fn from_scale(
        shape: RegionShape,
        center: [f64; 2],
        scale: [f64; 2],
        resolution: f64,
    ) -> Result<Self> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "resolution must be positive: {resolution}"
            )));
        }
        Self::new(
            shape,
            center,
            [scale[0] / resolution, scale[1] / resolution],
        )
    }

    pub fn validate(&self) -> Result<()> {
        let [x, y] = self.extent;
        let valid = match self.shape {
            RegionShape::Rectangle => x.is_finite() && y.is_finite() && x >= 0.0 && y >= 0.0,
            // used as denominators
            RegionShape::Disk => x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0,
        };
        if valid && self.center.iter().all(|c| c.is_finite()) {
            Ok(())
        } else {
            Err(Error::InvalidRegionExtent {
                shape: self.shape.to_string(),
                x,
                y,
            })
        }
    }

    /// Whether the cell at column `x` and row `y` is inside the region
    ///
    /// - Rectangle: `|x - cx| <= extent_x / 2` and `|y - cy| <= extent_y`.
    ///   Only the x extent is halved.
    /// - Disk: `(x - cx)^2 / extent_x + (y - cy)^2 / extent_y <= 1`.
    ///   The extents are not squared.
    ///
    /// Both quirks are kept as is because the placement candidates downstream
    /// are tuned on these exact shapes.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let [cx, cy] = self.center;
        let [ex, ey] = self.extent;
        match self.shape {
            RegionShape::Rectangle => (x - cx).abs() <= ex / 2.0 && (y - cy).abs() <= ey,
            RegionShape::Disk => (x - cx) * (x - cx) / ex + (y - cy) * (y - cy) / ey <= 1.0,
        }
    }
}

/// Rasterize `region` into a `rows` x `cols` grid, 1 marks inside
pub fn rasterize(region: &RegionDescriptor, rows: usize, cols: usize) -> Result<OccupancyGrid> {
    region.validate()?;
    let grid = OccupancyGrid::from_fn(rows, cols, |y, x| {
        u8::from(region.contains(x as f64, y as f64))
    });
    debug!(
        "rasterized {} region {:?}: {} cells inside",
        region.shape,
        region.center,
        grid.iter().filter(|(_, _, v)| **v > 0).count()
    );
    Ok(grid)
}

#[derive(Clone, Serialize, Deserialize, Debug, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RegionRasterizerConfig {
    #[serde(default = "default_grid_size")]
    pub rows: usize,
    #[serde(default = "default_grid_size")]
    pub cols: usize,
}

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}

impl Default for RegionRasterizerConfig {
    fn default() -> Self {
        Self {
            rows: default_grid_size(),
            cols: default_grid_size(),
        }
    }
}

/// Rasterizer with a fixed grid size
#[derive(Clone, Debug)]
pub struct RegionRasterizer {
    rows: usize,
    cols: usize,
}

impl RegionRasterizer {
    pub fn new(config: &RegionRasterizerConfig) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
        }
    }

    pub fn rasterize(&self, region: &RegionDescriptor) -> Result<OccupancyGrid> {
        rasterize(region, self.rows, self.cols)
    }
}

impl Default for RegionRasterizer {
    fn default() -> Self {
        Self::new(&RegionRasterizerConfig::default())
    }
}
