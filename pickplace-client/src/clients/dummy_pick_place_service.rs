use std::{collections::VecDeque, sync::Mutex};

use nalgebra as na;

use crate::{
    error::Error,
    traits::{Grasp, PickPlaceService, PlanningOutcome},
};

/// Dummy PickPlaceService for debug or tests.
///
/// Picks answer `pick_outcome`. Places answer the queued outcomes in order
/// and `Succeeded` once the queue is empty.
#[derive(Debug)]
pub struct DummyPickPlaceService {
    pub pick_outcome: PlanningOutcome,
    pub place_outcomes: Mutex<VecDeque<PlanningOutcome>>,
    pub picks: Mutex<Vec<(String, Vec<Grasp>)>>,
    pub places: Mutex<Vec<(String, na::Isometry3<f64>)>>,
}

impl Default for DummyPickPlaceService {
    fn default() -> Self {
        Self::new(PlanningOutcome::Succeeded, vec![])
    }
}

impl DummyPickPlaceService {
    pub fn new(pick_outcome: PlanningOutcome, place_outcomes: Vec<PlanningOutcome>) -> Self {
        Self {
            pick_outcome,
            place_outcomes: Mutex::new(place_outcomes.into()),
            picks: Mutex::default(),
            places: Mutex::default(),
        }
    }

    pub fn num_picks(&self) -> usize {
        self.picks.lock().unwrap().len()
    }

    pub fn place_poses(&self) -> Vec<na::Isometry3<f64>> {
        self.places
            .lock()
            .unwrap()
            .iter()
            .map(|(_, pose)| *pose)
            .collect()
    }
}

impl PickPlaceService for DummyPickPlaceService {
    fn pick(&self, object_id: &str, grasps: &[Grasp]) -> Result<PlanningOutcome, Error> {
        self.picks
            .lock()
            .unwrap()
            .push((object_id.to_owned(), grasps.to_vec()));
        Ok(self.pick_outcome)
    }

    fn place(&self, object_id: &str, pose: &na::Isometry3<f64>) -> Result<PlanningOutcome, Error> {
        self.places
            .lock()
            .unwrap()
            .push((object_id.to_owned(), *pose));
        Ok(self
            .place_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(PlanningOutcome::Succeeded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcomes() {
        let service = DummyPickPlaceService::new(
            PlanningOutcome::UnsupportedInput,
            vec![PlanningOutcome::Failed],
        );
        assert_eq!(
            service.pick("cup", &[]).unwrap(),
            PlanningOutcome::UnsupportedInput
        );
        let pose = na::Isometry3::translation(0.7, 0.0, 0.05);
        assert_eq!(service.place("cup", &pose).unwrap(), PlanningOutcome::Failed);
        assert_eq!(service.place("cup", &pose).unwrap(), PlanningOutcome::Succeeded);
        assert_eq!(service.num_picks(), 1);
        assert_eq!(service.place_poses(), vec![pose, pose]);
    }
}
