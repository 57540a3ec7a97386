use nalgebra as na;
use tracing::debug;

use crate::traits::Grasp;

/// Move object-relative grasps to the object position
///
/// Each grasp gets its index as id and a quality of 1.0. Only the position is
/// offset, the orientation of the grasps is kept.
pub fn correct_grasps(grasps: &[Grasp], object_pose: &na::Isometry3<f64>) -> Vec<Grasp> {
    let offset = object_pose.translation.vector;
    let corrected = grasps
        .iter()
        .enumerate()
        .map(|(index, grasp)| {
            let mut pose = grasp.pose;
            pose.translation.vector += offset;
            Grasp::new(index.to_string(), pose, 1.0)
        })
        .collect::<Vec<_>>();
    debug!("corrected grasps: {:?}", corrected);
    corrected
}

/// The whole list repeated `times` times, so the planner tries every grasp
/// more than once
pub fn repeat_grasps(grasps: &[Grasp], times: usize) -> Vec<Grasp> {
    let mut repeated = Vec::with_capacity(grasps.len() * times);
    for _ in 0..times {
        repeated.extend_from_slice(grasps);
    }
    repeated
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    fn grasp(id: &str, x: f64, quality: f64) -> Grasp {
        Grasp::new(
            id,
            na::Isometry3::from_parts(
                na::Translation3::new(x, 0.0, 0.1),
                na::UnitQuaternion::from_euler_angles(0.0, std::f64::consts::FRAC_PI_2, 0.0),
            ),
            quality,
        )
    }

    #[test]
    fn test_correct_grasps() {
        let object_pose = na::Isometry3::from_parts(
            na::Translation3::new(0.7, 0.2, -0.05),
            na::UnitQuaternion::from_euler_angles(0.0, 0.0, 1.0),
        );
        let grasps = vec![grasp("a", 0.0, 0.3), grasp("b", 0.05, 0.9)];
        let corrected = correct_grasps(&grasps, &object_pose);
        assert_eq!(corrected.len(), 2);
        assert_eq!(corrected[0].id, "0");
        assert_eq!(corrected[1].id, "1");
        assert_approx_eq!(corrected[1].pose.translation.vector.x, 0.75);
        assert_approx_eq!(corrected[1].pose.translation.vector.y, 0.2);
        assert_approx_eq!(corrected[1].pose.translation.vector.z, 0.05);
        assert_approx_eq!(corrected[0].quality, 1.0);
        assert_eq!(corrected[0].pose.rotation, grasps[0].pose.rotation);
    }

    #[test]
    fn test_repeat_grasps() {
        let grasps = vec![grasp("a", 0.0, 1.0), grasp("b", 0.1, 1.0)];
        let repeated = repeat_grasps(&grasps, 3);
        assert_eq!(repeated.len(), 6);
        assert_eq!(repeated[2], grasps[0]);
        assert_eq!(repeated[5], grasps[1]);
        assert!(repeat_grasps(&grasps, 0).is_empty());
    }
}
