//! Pick and place orchestration
//!
//! [`PickPlaceClient`] drives the collaborators behind the traits of this
//! crate: it keeps the latest detections, picks an object with corrected
//! grasps and places it on the first accepted candidate of the placement
//! planner.

mod clients;
mod error;
mod grasp;
mod pick_place_client;
mod scene;
mod state;
mod traits;

pub use crate::{
    clients::*, error::*, grasp::*, pick_place_client::*, scene::*, state::*, traits::*,
};
