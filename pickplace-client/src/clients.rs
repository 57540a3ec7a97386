mod dummy_grasp_service;
mod dummy_joint_trajectory_client;
mod dummy_pick_place_service;

pub use dummy_grasp_service::*;
pub use dummy_joint_trajectory_client::*;
pub use dummy_pick_place_service::*;
