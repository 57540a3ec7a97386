use std::sync::Mutex;

use crate::{
    error::Error,
    traits::{JointTrajectoryClient, TrajectoryPoint},
};

/// Dummy JointTrajectoryClient for debug or tests.
///
/// The arm jumps to the last point of every trajectory it is sent.
#[derive(Debug)]
pub struct DummyJointTrajectoryClient {
    pub joint_names: Vec<String>,
    pub positions: Mutex<Vec<f64>>,
    pub sent: Mutex<Vec<Vec<TrajectoryPoint>>>,
}

impl DummyJointTrajectoryClient {
    /// All the joints start at 0
    pub fn new(joint_names: Vec<String>) -> Self {
        let zeros = vec![0.0; joint_names.len()];
        Self::with_positions(joint_names, zeros)
    }

    pub fn with_positions(joint_names: Vec<String>, positions: Vec<f64>) -> Self {
        Self {
            joint_names,
            positions: Mutex::new(positions),
            sent: Mutex::default(),
        }
    }

    /// Empty if nothing was sent yet
    pub fn last_trajectory(&self) -> Vec<TrajectoryPoint> {
        self.sent.lock().unwrap().last().cloned().unwrap_or_default()
    }

    pub fn num_sent(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl JointTrajectoryClient for DummyJointTrajectoryClient {
    fn joint_names(&self) -> Vec<String> {
        self.joint_names.clone()
    }

    fn current_joint_positions(&self) -> Result<Vec<f64>, Error> {
        Ok(self.positions.lock().unwrap().to_vec())
    }

    fn send_joint_trajectory(&self, trajectory: Vec<TrajectoryPoint>) -> Result<(), Error> {
        if let Some(point) = trajectory.last() {
            self.positions.lock().unwrap().clone_from(&point.positions);
        }
        self.sent.lock().unwrap().push(trajectory);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_follows_sent_trajectories() {
        let client = DummyJointTrajectoryClient::with_positions(
            vec!["left_w1".to_owned(), "left_w2".to_owned()],
            vec![0.5, 0.0],
        );
        assert!(client.last_trajectory().is_empty());
        assert_eq!(client.current_joint_positions().unwrap(), [0.5, 0.0]);

        let step = Duration::from_millis(15);
        client
            .send_joint_trajectory(vec![
                TrajectoryPoint::new(vec![0.5, 0.0], Duration::ZERO),
                TrajectoryPoint::new(vec![0.75, 0.1], step),
            ])
            .unwrap();
        // an empty trajectory does not move the arm
        client.send_joint_trajectory(vec![]).unwrap();

        assert_eq!(client.num_sent(), 2);
        assert!(client.last_trajectory().is_empty());
        assert_eq!(client.current_joint_positions().unwrap(), [0.75, 0.1]);
        assert_eq!(client.sent.lock().unwrap()[0][1].time_from_start, step);
    }
}
