use auto_impl::auto_impl;
pub use pickplace_planner::TrajectoryPoint;

use crate::error::Error;

#[auto_impl(Box, Arc)]
pub trait JointTrajectoryClient: Send + Sync {
    /// Returns names of joints that this client handles.
    fn joint_names(&self) -> Vec<String>;

    /// Returns the current joint positions, ordered like `joint_names`.
    fn current_joint_positions(&self) -> Result<Vec<f64>, Error>;

    /// Sends the trajectory and blocks until the move is complete.
    fn send_joint_trajectory(&self, trajectory: Vec<TrajectoryPoint>) -> Result<(), Error>;
}
