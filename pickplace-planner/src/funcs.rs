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
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::*;

use crate::{errors::*, joint::JointConfiguration};

/// A point of a joint trajectory
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryPoint {
    pub positions: Vec<f64>,
    pub time_from_start: Duration,
}

impl TrajectoryPoint {
    pub fn new(positions: Vec<f64>, time_from_start: Duration) -> Self {
        Self {
            positions,
            time_from_start,
        }
    }
}

/// Straight joint-space path from a start to an end configuration
///
/// The end configuration itself is not included.
#[derive(Clone, Debug, PartialEq)]
pub struct InterpolatedPath {
    joint_names: Vec<String>,
    configurations: Vec<Vec<f64>>,
}

impl InterpolatedPath {
    /// Joints of the path, in the order of the start configuration
    pub fn joint_names(&self) -> &[String] {
        &self.joint_names
    }

    /// Positions of every step, ordered like `joint_names`
    pub fn positions(&self) -> &[Vec<f64>] {
        &self.configurations
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    /// The `i`-th step as a named configuration
    pub fn configuration(&self, i: usize) -> Option<JointConfiguration> {
        self.configurations.get(i).map(|positions| {
            self.joint_names
                .iter()
                .cloned()
                .zip(positions.iter().copied())
                .collect()
        })
    }

    pub fn configurations(&self) -> impl Iterator<Item = JointConfiguration> + '_ {
        (0..self.len()).filter_map(move |i| self.configuration(i))
    }

    /// Timestamp the `i`-th step at `i * step_duration`
    pub fn to_trajectory(&self, step_duration: Duration) -> Vec<TrajectoryPoint> {
        let mut time_from_start = Duration::ZERO;
        self.configurations
            .iter()
            .map(|positions| {
                let point = TrajectoryPoint::new(positions.clone(), time_from_start);
                time_from_start += step_duration;
                point
            })
            .collect()
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct JointPathInterpolatorConfig {
    /// Largest change of a joint between two steps [rad]
    #[serde(default = "default_max_step")]
    pub max_step: f64,
    /// Lower bound of the number of steps
    #[serde(default = "default_min_steps")]
    pub min_steps: usize,
    /// Paths needing more steps than this are rejected
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

fn default_max_step() -> f64 {
    0.01
}

fn default_min_steps() -> usize {
    2
}

fn default_max_steps() -> usize {
    10_000
}

impl Default for JointPathInterpolatorConfig {
    fn default() -> Self {
        Self {
            max_step: default_max_step(),
            min_steps: default_min_steps(),
            max_steps: default_max_steps(),
        }
    }
}

/// Linear interpolation between two joint configurations
#[derive(Clone, Debug)]
pub struct JointPathInterpolator {
    max_step: f64,
    min_steps: usize,
    max_steps: usize,
}

impl Default for JointPathInterpolator {
    fn default() -> Self {
        Self {
            max_step: default_max_step(),
            min_steps: default_min_steps(),
            max_steps: default_max_steps(),
        }
    }
}

impl JointPathInterpolator {
    pub fn new(config: &JointPathInterpolatorConfig) -> Result<Self> {
        if !(config.max_step.is_finite() && config.max_step > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "max_step must be positive: {}",
                config.max_step
            )));
        }
        if config.min_steps == 0 {
            return Err(Error::InvalidParameter(
                "min_steps must be at least 1".to_owned(),
            ));
        }
        if config.max_steps < config.min_steps {
            return Err(Error::InvalidParameter(format!(
                "max_steps {} is smaller than min_steps {}",
                config.max_steps, config.min_steps
            )));
        }
        Ok(Self {
            max_step: config.max_step,
            min_steps: config.min_steps,
            max_steps: config.max_steps,
        })
    }

    /// Interpolate the joints of `start` which are also in `end`
    ///
    /// The number of steps is the larger of `min_steps` and the count needed
    /// to keep every joint within `max_step` per step. Step `i` is at
    /// `t = i / steps`, so `t = 1` is never emitted. A path needing more than
    /// `max_steps` steps is an `InvalidParameter` error.
    pub fn interpolate(
        &self,
        start: &JointConfiguration,
        end: &JointConfiguration,
    ) -> Result<InterpolatedPath> {
        let shared = start
            .iter()
            .filter_map(|(name, from)| end.get(name).map(|to| (name, from, to)))
            .collect::<Vec<_>>();
        if shared.is_empty() {
            return Err(Error::EmptyJointSet);
        }
        if let Some((name, _, _)) = shared
            .iter()
            .find(|(_, from, to)| !(from.is_finite() && to.is_finite()))
        {
            return Err(Error::InvalidParameter(format!(
                "non finite position for {name}"
            )));
        }

        let largest = shared
            .iter()
            .map(|(_, from, to)| (to - from).abs())
            .fold(0.0, f64::max);
        // the difference of two finite positions can still overflow to inf
        let needed = (largest / self.max_step).ceil();
        if needed > self.max_steps as f64 {
            return Err(Error::InvalidParameter(format!(
                "{needed} steps are needed, more than max_steps {}",
                self.max_steps
            )));
        }
        let steps = self.min_steps.max(needed as usize);
        trace!("interpolate {} joints in {} steps", shared.len(), steps);

        let configurations = (0..steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                shared
                    .iter()
                    .map(|(_, from, to)| (1.0 - t) * from + t * to)
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        Ok(InterpolatedPath {
            joint_names: shared.iter().map(|(name, _, _)| name.to_string()).collect(),
            configurations,
        })
    }
}

/// Interpolate with the default step size
///
/// # Example
///
/// ```
/// use pickplace_planner::{interpolate, JointConfiguration};
///
/// let start = JointConfiguration::from_pairs([("s0", 0.0), ("e1", 0.0)]);
/// let end = JointConfiguration::from_pairs([("e1", 0.025), ("s0", 0.0)]);
/// let path = interpolate(&start, &end).unwrap();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.joint_names(), ["s0", "e1"]);
/// assert!((path.positions()[1][1] - 0.025 / 3.0).abs() < 1e-9);
/// ```
pub fn interpolate(start: &JointConfiguration, end: &JointConfiguration) -> Result<InterpolatedPath> {
    JointPathInterpolator::default().interpolate(start, end)
}
