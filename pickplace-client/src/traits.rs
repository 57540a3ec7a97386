mod grasp_service;
mod joint_trajectory_client;
mod pick_place_service;

pub use grasp_service::*;
pub use joint_trajectory_client::*;
pub use pick_place_service::*;
