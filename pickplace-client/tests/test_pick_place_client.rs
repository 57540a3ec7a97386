use std::sync::{Arc, Mutex, OnceLock, Weak};

use assert_approx_eq::assert_approx_eq;
use nalgebra as na;
use pickplace_client::*;
use pickplace_planner::{RegionDescriptor, RegionShape};

fn joint_names() -> Vec<String> {
    ["s0", "s1", "e0", "e1", "w0", "w1", "w2"]
        .iter()
        .map(|name| format!("left_{name}"))
        .collect()
}

fn grasps() -> Vec<Grasp> {
    vec![
        Grasp::new("top", na::Isometry3::translation(0.0, 0.0, 0.1), 0.4),
        Grasp::new("side", na::Isometry3::translation(-0.05, 0.0, 0.0), 0.8),
    ]
}

fn detections() -> Vec<DetectedObject> {
    vec![
        DetectedObject::new("spoon", na::Isometry3::translation(0.7, 0.2, 0.0)),
        DetectedObject::new("behind", na::Isometry3::translation(-0.2, 0.0, 0.0)),
    ]
}

fn disk() -> RegionDescriptor {
    RegionDescriptor::new(RegionShape::Disk, [50.0, 50.0], [400.0, 400.0]).unwrap()
}

type DummyClient =
    PickPlaceClient<DummyGraspService, DummyPickPlaceService, DummyJointTrajectoryClient>;

fn client(grasp_service: DummyGraspService, service: DummyPickPlaceService) -> DummyClient {
    PickPlaceClient::try_new(
        &PickPlaceClientConfig::default(),
        grasp_service,
        service,
        DummyJointTrajectoryClient::new(joint_names()),
    )
    .unwrap()
}

#[test]
fn test_invalid_config() {
    let config = PickPlaceClientConfig {
        neutral_positions: vec![0.0; 3],
        ..Default::default()
    };
    assert!(matches!(
        PickPlaceClient::try_new(
            &config,
            DummyGraspService::default(),
            DummyPickPlaceService::default(),
            DummyJointTrajectoryClient::new(joint_names()),
        ),
        Err(Error::Planner(pickplace_planner::Error::DofMismatch(3, 7)))
    ));
    assert!(matches!(
        PickPlaceClient::try_new(
            &PickPlaceClientConfig::default(),
            DummyGraspService::default(),
            DummyPickPlaceService::default(),
            DummyJointTrajectoryClient::new(vec![]),
        ),
        Err(Error::Planner(pickplace_planner::Error::EmptyJointSet))
    ));
    let config = PickPlaceClientConfig {
        step_duration_sec: 0.0,
        ..Default::default()
    };
    assert!(PickPlaceClient::try_new(
        &config,
        DummyGraspService::default(),
        DummyPickPlaceService::default(),
        DummyJointTrajectoryClient::new(joint_names()),
    )
    .is_err());
}

#[test]
fn test_move_to_neutral() {
    let client = client(DummyGraspService::default(), DummyPickPlaceService::default());
    client.move_to_neutral().unwrap();
    let trajectory = client.trajectory_client().last_trajectory();
    // 1.26 rad of the largest joint by 0.01 rad
    assert_eq!(trajectory.len(), 126);
    assert_eq!(trajectory[0].positions, vec![0.0; 7]);
    assert_approx_eq!(trajectory[1].time_from_start.as_secs_f64(), 0.015, 1e-6);
    assert_approx_eq!(
        trajectory.last().unwrap().time_from_start.as_secs_f64(),
        0.015 * 125.0,
        1e-6
    );
    let positions = client
        .trajectory_client()
        .current_joint_positions()
        .unwrap();
    assert_approx_eq!(positions[5], 1.26 * 125.0 / 126.0);
    assert_approx_eq!(positions[1], -0.55 * 125.0 / 126.0);

    // one step away, so the lower bound of steps applies
    client.move_to_neutral().unwrap();
    assert_eq!(client.trajectory_client().num_sent(), 2);
    assert_eq!(client.trajectory_client().last_trajectory().len(), 2);
}

#[test]
fn test_move_to_neutral_from_current_positions() {
    let mut start = vec![0.0; 7];
    start[1] = -0.55;
    start[3] = 0.255;
    start[5] = 1.26;
    let client = PickPlaceClient::try_new(
        &PickPlaceClientConfig::default(),
        DummyGraspService::default(),
        DummyPickPlaceService::default(),
        DummyJointTrajectoryClient::with_positions(joint_names(), start.clone()),
    )
    .unwrap();
    client.move_to_neutral().unwrap();
    let trajectory = client.trajectory_client().last_trajectory();
    // left_e1 moves 0.495 and is the largest change
    assert_eq!(trajectory.len(), 50);
    assert_eq!(trajectory[0].positions, start);
    assert_approx_eq!(trajectory[1].positions[3], 0.255 + 0.495 / 50.0);
    assert_approx_eq!(trajectory[1].positions[5], 1.26);
}

#[test]
fn test_update_detections() {
    let client = client(DummyGraspService::default(), DummyPickPlaceService::default());
    assert!(client.update_detections(detections()));
    let objects = client.detected_objects();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].id, "spoon");
    let boxes = client.collision_boxes();
    assert_approx_eq!(boxes[0].pose.translation.vector.z, 0.1);

    // a new batch replaces the previous one
    assert!(client.update_detections(vec![]));
    assert!(client.detected_objects().is_empty());
}

#[test]
fn test_pick_and_place() {
    let service = DummyPickPlaceService::new(
        PlanningOutcome::Succeeded,
        vec![PlanningOutcome::Failed, PlanningOutcome::Failed],
    );
    let client = client(DummyGraspService::new(grasps()), service);
    client.update_detections(detections());

    let placed = client.pick_and_place("spoon", &disk()).unwrap();
    assert_eq!(placed.id, 2);
    assert_eq!(client.state(), PickPlaceState::Idle);

    let picks = client_picks(&client);
    assert_eq!(picks.len(), 1);
    let (object, sent) = &picks[0];
    assert_eq!(object, "spoon");
    // 2 grasps x 10
    assert_eq!(sent.len(), 20);
    assert_eq!(sent[0].id, "0");
    assert_eq!(sent[3].id, "1");
    assert_approx_eq!(sent[0].pose.translation.vector.x, 0.7);
    assert_approx_eq!(sent[1].pose.translation.vector.x, 0.65);
    assert_approx_eq!(sent[0].pose.translation.vector.z, 0.1);
    assert_approx_eq!(sent[1].quality, 1.0);
}

fn client_picks(client: &DummyClient) -> Vec<(String, Vec<Grasp>)> {
    client.pick_place_service().picks.lock().unwrap().clone()
}

#[test]
fn test_unknown_object_and_no_grasps() {
    let client = client(DummyGraspService::failing(), DummyPickPlaceService::default());
    client.update_detections(detections());
    assert!(matches!(
        client.pick_and_place("behind", &disk()),
        Err(Error::UnknownObject(id)) if id == "behind"
    ));
    assert!(matches!(
        client.pick_and_place("spoon", &disk()),
        Err(Error::NoGrasps(_))
    ));
    assert_eq!(client.pick_place_service().num_picks(), 0);
    assert_eq!(client.state(), PickPlaceState::Idle);
}

#[test]
fn test_pick_outcome() {
    let client = client(
        DummyGraspService::new(grasps()),
        DummyPickPlaceService::new(PlanningOutcome::UnsupportedInput, vec![]),
    );
    client.update_detections(detections());
    client.pick("spoon").unwrap();

    let config = PickPlaceClientConfig {
        unsupported_input_is_success: false,
        ..Default::default()
    };
    let strict = PickPlaceClient::try_new(
        &config,
        DummyGraspService::new(grasps()),
        DummyPickPlaceService::new(PlanningOutcome::UnsupportedInput, vec![]),
        DummyJointTrajectoryClient::new(joint_names()),
    )
    .unwrap();
    strict.update_detections(detections());
    assert!(matches!(
        strict.pick_and_place("spoon", &disk()),
        Err(Error::PickFailed(_))
    ));
    assert!(strict.pick_place_service().place_poses().is_empty());
    assert_eq!(strict.state(), PickPlaceState::Idle);
}

#[test]
fn test_place_attempts_are_bounded() {
    let client = client(
        DummyGraspService::new(grasps()),
        DummyPickPlaceService::new(PlanningOutcome::Succeeded, vec![PlanningOutcome::Failed; 20]),
    );
    let candidates = client.plan_placement(&disk()).unwrap();
    assert!(candidates.len() > 10);
    let frame = PickPlaceClientConfig::default().placement.cell_placement.frame;
    for candidate in &candidates {
        let p = candidate.position();
        let cell = frame.cell_at(p[0], p[1], 100, 100).unwrap();
        assert!(disk().contains(cell.x as f64, cell.y as f64));
    }
    assert!(matches!(
        client.place_first("spoon", &candidates),
        Err(Error::NoPlacement { attempts: 10, .. })
    ));
    assert_eq!(client.pick_place_service().place_poses().len(), 10);
    assert_eq!(
        client.pick_place_service().place_poses()[3],
        candidates[3].pose
    );
}

#[test]
fn test_empty_region_is_rejected_before_picking() {
    let client = client(
        DummyGraspService::new(grasps()),
        DummyPickPlaceService::default(),
    );
    client.update_detections(detections());
    // a single cell, the margin leaves nothing of it
    let region = RegionDescriptor::new(RegionShape::Rectangle, [50.0, 50.0], [0.0, 0.0]).unwrap();
    assert!(matches!(
        client.pick_and_place("spoon", &region),
        Err(Error::NoPlacement { attempts: 0, .. })
    ));
    assert_eq!(client.pick_place_service().num_picks(), 0);
}

type ReentrantClient = PickPlaceClient<DummyGraspService, Arc<ReentrantService>, DummyJointTrajectoryClient>;

/// Calls back into the client while it is picking
#[derive(Debug, Default)]
struct ReentrantService {
    client: OnceLock<Weak<ReentrantClient>>,
    observed: Mutex<Vec<(PickPlaceState, bool, bool)>>,
}

impl ReentrantService {
    fn observe(&self) {
        if let Some(client) = self.client.get().and_then(Weak::upgrade) {
            let applied = client.update_detections(vec![]);
            let busy = matches!(client.pick("spoon"), Err(Error::Busy { .. }));
            self.observed
                .lock()
                .unwrap()
                .push((client.state(), applied, busy));
        }
    }
}

impl PickPlaceService for ReentrantService {
    fn pick(&self, _object_id: &str, _grasps: &[Grasp]) -> Result<PlanningOutcome, Error> {
        self.observe();
        Ok(PlanningOutcome::Succeeded)
    }

    fn place(
        &self,
        _object_id: &str,
        _pose: &na::Isometry3<f64>,
    ) -> Result<PlanningOutcome, Error> {
        self.observe();
        Ok(PlanningOutcome::Succeeded)
    }
}

#[test]
fn test_requests_while_busy_are_rejected() {
    let service = Arc::new(ReentrantService::default());
    let client = Arc::new(
        PickPlaceClient::try_new(
            &PickPlaceClientConfig::default(),
            DummyGraspService::new(grasps()),
            service.clone(),
            DummyJointTrajectoryClient::new(joint_names()),
        )
        .unwrap(),
    );
    service.client.set(Arc::downgrade(&client)).unwrap();
    client.update_detections(detections());

    client.pick_and_place("spoon", &disk()).unwrap();
    let observed = service.observed.lock().unwrap().clone();
    assert_eq!(
        observed,
        vec![
            (PickPlaceState::Picking, false, true),
            (PickPlaceState::Placing, false, true),
        ]
    );
    // the snapshot survived the ignored batches
    assert_eq!(client.detected_objects().len(), 1);
    assert_eq!(client.state(), PickPlaceState::Idle);
}
