use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use pickplace_planner::{
    JointConfiguration, JointDomain, JointPathInterpolator, JointPathInterpolatorConfig,
    PlacementCandidate, PlacementPlanner, PlacementPlannerConfig, RegionDescriptor,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::*;

use crate::{
    correct_grasps, repeat_grasps, CollisionBox, DetectedObject, Error, Grasp, GraspService,
    JointTrajectoryClient, ObjectBoxConfig, PickPlaceService, PickPlaceState,
    PickPlaceStateMachine, PlanningOutcome, Result, SceneSnapshot, WorkspaceBounds,
};

#[derive(Clone, Serialize, Deserialize, Debug, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PickPlaceClientConfig {
    // TOML format has a restriction that if a table itself contains tables,
    // all keys with non-table values must be emitted first.
    /// The corrected grasp list is sent this many times in a row
    #[serde(default = "default_grasp_repetitions")]
    pub grasp_repetitions: usize,
    /// Upper bound of place requests for one object
    #[serde(default = "default_max_place_attempts")]
    pub max_place_attempts: usize,
    /// Count `PlanningOutcome::UnsupportedInput` of a pick as a success
    #[serde(default = "default_unsupported_input_is_success")]
    pub unsupported_input_is_success: bool,
    /// Time between two points of the neutral trajectory [sec]
    #[serde(default = "default_step_duration_sec")]
    pub step_duration_sec: f64,
    /// Neutral joint positions, ordered like the trajectory client joints
    #[serde(default = "default_neutral_positions")]
    pub neutral_positions: Vec<f64>,
    #[serde(default)]
    pub workspace: WorkspaceBounds,
    #[serde(default)]
    pub object_box: ObjectBoxConfig,
    #[serde(default)]
    pub interpolator: JointPathInterpolatorConfig,
    #[serde(default)]
    pub placement: PlacementPlannerConfig,
}

fn default_grasp_repetitions() -> usize {
    10
}

fn default_max_place_attempts() -> usize {
    10
}

fn default_unsupported_input_is_success() -> bool {
    true
}

fn default_step_duration_sec() -> f64 {
    0.015
}

fn default_neutral_positions() -> Vec<f64> {
    vec![0.0, -0.55, 0.0, 0.75, 0.0, 1.26, 0.0]
}

impl Default for PickPlaceClientConfig {
    fn default() -> Self {
        Self {
            grasp_repetitions: default_grasp_repetitions(),
            max_place_attempts: default_max_place_attempts(),
            unsupported_input_is_success: default_unsupported_input_is_success(),
            step_duration_sec: default_step_duration_sec(),
            neutral_positions: default_neutral_positions(),
            workspace: WorkspaceBounds::default(),
            object_box: ObjectBoxConfig::default(),
            interpolator: JointPathInterpolatorConfig::default(),
            placement: PlacementPlannerConfig::default(),
        }
    }
}

/// Drives one arm through pick and place
///
/// Every attempt goes through the state machine, so detection batches and
/// new requests arriving while an attempt runs are rejected.
#[derive(Debug)]
pub struct PickPlaceClient<G, P, J>
where
    G: GraspService,
    P: PickPlaceService,
    J: JointTrajectoryClient,
{
    grasp_service: G,
    pick_place_service: P,
    trajectory_client: J,
    domain: JointDomain,
    neutral: JointConfiguration,
    interpolator: JointPathInterpolator,
    placement_planner: PlacementPlanner,
    step_duration: Duration,
    grasp_repetitions: usize,
    max_place_attempts: usize,
    unsupported_input_is_success: bool,
    workspace: WorkspaceBounds,
    object_box: ObjectBoxConfig,
    state: PickPlaceStateMachine,
    scene: Mutex<SceneSnapshot>,
}

impl<G, P, J> PickPlaceClient<G, P, J>
where
    G: GraspService,
    P: PickPlaceService,
    J: JointTrajectoryClient,
{
    pub fn try_new(
        config: &PickPlaceClientConfig,
        grasp_service: G,
        pick_place_service: P,
        trajectory_client: J,
    ) -> Result<Self> {
        let domain = JointDomain::new(trajectory_client.joint_names())?;
        let neutral = domain.configuration(&config.neutral_positions)?;
        if !(config.step_duration_sec.is_finite() && config.step_duration_sec > 0.0) {
            return Err(pickplace_planner::Error::InvalidParameter(format!(
                "step_duration_sec must be positive: {}",
                config.step_duration_sec
            ))
            .into());
        }
        Ok(Self {
            grasp_service,
            pick_place_service,
            trajectory_client,
            domain,
            neutral,
            interpolator: JointPathInterpolator::new(&config.interpolator)?,
            placement_planner: PlacementPlanner::new(&config.placement)?,
            step_duration: Duration::from_secs_f64(config.step_duration_sec),
            grasp_repetitions: config.grasp_repetitions,
            max_place_attempts: config.max_place_attempts,
            unsupported_input_is_success: config.unsupported_input_is_success,
            workspace: config.workspace.clone(),
            object_box: config.object_box.clone(),
            state: PickPlaceStateMachine::new(),
            scene: Mutex::new(SceneSnapshot::default()),
        })
    }

    fn scene(&self) -> MutexGuard<'_, SceneSnapshot> {
        self.scene.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> PickPlaceState {
        self.state.state()
    }

    pub fn joint_domain(&self) -> &JointDomain {
        &self.domain
    }

    pub fn grasp_service(&self) -> &G {
        &self.grasp_service
    }

    pub fn pick_place_service(&self) -> &P {
        &self.pick_place_service
    }

    pub fn trajectory_client(&self) -> &J {
        &self.trajectory_client
    }

    /// Move the arm from its current positions to the neutral positions
    pub fn move_to_neutral(&self) -> Result<()> {
        let current = self
            .domain
            .configuration(&self.trajectory_client.current_joint_positions()?)?;
        let path = self.interpolator.interpolate(&current, &self.neutral)?;
        let trajectory = path.to_trajectory(self.step_duration);
        info!("Moving to neutral ({} points)", trajectory.len());
        self.trajectory_client.send_joint_trajectory(trajectory)
    }

    /// Replace the detected objects with `batch`
    ///
    /// Returns false and keeps the previous snapshot while picking or placing.
    pub fn update_detections<I>(&self, batch: I) -> bool
    where
        I: IntoIterator<Item = DetectedObject>,
    {
        let state = self.state();
        if state != PickPlaceState::Idle {
            debug!("ignore detections while {}", state);
            return false;
        }
        let snapshot = SceneSnapshot::from_detections(batch, &self.workspace, &self.object_box);
        debug!("{} objects detected", snapshot.len());
        *self.scene() = snapshot;
        true
    }

    pub fn detected_objects(&self) -> Vec<DetectedObject> {
        self.scene().objects().cloned().collect()
    }

    pub fn collision_boxes(&self) -> Vec<CollisionBox> {
        self.scene().collision_boxes().cloned().collect()
    }

    /// Ordered placement candidates for `region`, possibly empty
    pub fn plan_placement(&self, region: &RegionDescriptor) -> Result<Vec<PlacementCandidate>> {
        Ok(self.placement_planner.plan(region)?)
    }

    fn detected_object(&self, object_id: &str) -> Result<DetectedObject> {
        let scene = self.scene();
        match scene.object(object_id) {
            Some(object) => Ok(object.clone()),
            None => {
                error!(
                    "Object {} is not in detected objects [{}]",
                    object_id,
                    scene.ids().collect::<Vec<_>>().join(", ")
                );
                Err(Error::UnknownObject(object_id.to_owned()))
            }
        }
    }

    fn request_grasps(&self, object_id: &str) -> Result<Vec<Grasp>> {
        info!("Getting grasp for object {}", object_id);
        let response = self.grasp_service.grasps(object_id)?;
        if !response.success || response.grasps.is_empty() {
            error!("No grasps were found for object {}", object_id);
            return Err(Error::NoGrasps(object_id.to_owned()));
        }
        Ok(response.grasps)
    }

    /// Runs while the state is `Picking`
    fn pick_object(&self, object: &DetectedObject, grasps: &[Grasp]) -> Result<()> {
        let corrected = correct_grasps(grasps, &object.pose);
        let repeated = repeat_grasps(&corrected, self.grasp_repetitions);
        info!(
            "Attempting to pick up object {} with {} grasps",
            object.id,
            repeated.len()
        );
        let outcome = self.pick_place_service.pick(&object.id, &repeated)?;
        if outcome == PlanningOutcome::UnsupportedInput {
            warn!("pick of {} returned {}", object.id, outcome);
        }
        if outcome.is_success(self.unsupported_input_is_success) {
            Ok(())
        } else {
            error!("Object pick up failed: {}", object.id);
            Err(Error::PickFailed(object.id.clone()))
        }
    }

    /// Runs while the state is `Placing`
    fn place_object(
        &self,
        object_id: &str,
        candidates: &[PlacementCandidate],
    ) -> Result<PlacementCandidate> {
        let mut attempts = 0;
        for candidate in candidates.iter().take(self.max_place_attempts) {
            attempts += 1;
            info!("Attempting to place object {} ({})", object_id, candidate.id);
            debug!("{:?}", candidate.pose);
            let outcome = self.pick_place_service.place(object_id, &candidate.pose)?;
            if outcome.is_success(false) {
                info!("Placed object {} at candidate {}", object_id, candidate.id);
                return Ok(candidate.clone());
            }
            debug!("place at {} {}", candidate.id, outcome);
        }
        error!("Failed to place object {}", object_id);
        Err(Error::NoPlacement {
            object: object_id.to_owned(),
            attempts,
        })
    }

    /// Pick up a detected object
    pub fn pick(&self, object_id: &str) -> Result<()> {
        let _attempt = self.state.begin(PickPlaceState::Picking)?;
        let object = self.detected_object(object_id)?;
        let grasps = self.request_grasps(object_id)?;
        self.pick_object(&object, &grasps)
    }

    /// Place the held object on the first candidate accepted by the service
    pub fn place_first(
        &self,
        object_id: &str,
        candidates: &[PlacementCandidate],
    ) -> Result<PlacementCandidate> {
        let _attempt = self.state.begin(PickPlaceState::Placing)?;
        self.place_object(object_id, candidates)
    }

    /// Pick up `object_id` and place it inside `region`
    ///
    /// The grasps and the placement candidates are checked before moving, so
    /// an object is never picked without somewhere to put it.
    pub fn pick_and_place(
        &self,
        object_id: &str,
        region: &RegionDescriptor,
    ) -> Result<PlacementCandidate> {
        let attempt = self
            .state
            .begin(PickPlaceState::Picking)
            .inspect_err(|e| warn!("pick and place of {} is rejected: {}", object_id, e))?;
        let object = self.detected_object(object_id)?;
        let grasps = self.request_grasps(object_id)?;

        info!("Finding a valid place pose");
        let candidates = self.plan_placement(region)?;
        if candidates.is_empty() {
            error!("Place region is invalid: {:?}", region);
            return Err(Error::NoPlacement {
                object: object_id.to_owned(),
                attempts: 0,
            });
        }

        self.pick_object(&object, &grasps)?;
        attempt.advance(PickPlaceState::Placing)?;
        self.place_object(object_id, &candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PickPlaceClientConfig::default();
        assert_eq!(config.grasp_repetitions, 10);
        assert_eq!(config.max_place_attempts, 10);
        assert!(config.unsupported_input_is_success);
        assert_eq!(config.neutral_positions.len(), 7);
    }
}
