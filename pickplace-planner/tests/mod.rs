use assert_approx_eq::assert_approx_eq;
use pickplace_planner::*;

fn disk_region() -> RegionDescriptor {
    RegionDescriptor::new(RegionShape::Disk, [50.0, 50.0], [10.0, 10.0]).unwrap()
}

#[test]
fn test_disk_pipeline() {
    let grid = rasterize(&disk_region(), DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE).unwrap();
    assert_eq!(grid.get(50, 50), Some(&1));

    let field = solve_field(&grid, 3.0).unwrap();
    assert!(!is_eligible(*field.get(50, 50).unwrap()));
    assert!(!is_eligible(*field.get(50, 55).unwrap()));
    assert!(is_eligible(*field.get(50, 56).unwrap()));
    assert!(is_eligible(*field.get(0, 0).unwrap()));
    for (_, _, v) in field.iter() {
        assert!((0.0..=1.0).contains(v));
    }

    let candidates = generate_candidates(&PlacementStrategy::FreeCells {
        field: &field,
        placement: CellPlacement::default(),
    });
    assert_eq!(candidates.len(), free_cells(&field).len());
    // row-major: the first free cell is (0, 0)
    assert_approx_eq!(candidates[0].position()[0], 0.005);
    assert_approx_eq!(candidates[0].position()[1], 0.005);
    for (i, candidate) in candidates.iter().enumerate() {
        assert_eq!(candidate.id, i);
        let p = candidate.position();
        let cell = GridFrame::default()
            .cell_at(p[0], p[1], field.rows(), field.cols())
            .unwrap();
        assert!(is_eligible(*field.get(cell.y, cell.x).unwrap()));
    }
}

#[test]
fn test_planner_matches_functions() {
    let planner = PlacementPlanner::new(&PlacementPlannerConfig::default()).unwrap();
    let outside = rasterize(&disk_region(), 100, 100).unwrap().inverted();
    assert_eq!(
        planner.solve(&disk_region()).unwrap(),
        solve_field(&outside, 3.0).unwrap()
    );

    let mut obstacles = OccupancyGrid::new(100, 100, 0);
    obstacles.set(10, 90, 1);
    assert_eq!(
        planner.solve_with_obstacles(&disk_region(), &obstacles).unwrap(),
        solve_field(&outside.union(&obstacles).unwrap(), 3.0).unwrap()
    );
}

#[test]
fn test_planned_candidates_stay_in_region() {
    let planner = PlacementPlanner::new(&PlacementPlannerConfig::default()).unwrap();
    let region = RegionDescriptor::new(RegionShape::Disk, [40.0, 40.0], [225.0, 225.0]).unwrap();
    let candidates = planner.plan(&region).unwrap();
    assert!(!candidates.is_empty());
    for candidate in &candidates {
        let p = candidate.position();
        let cell = GridFrame::default().cell_at(p[0], p[1], 100, 100).unwrap();
        assert!(region.contains(cell.x as f64, cell.y as f64));
        // 15 cells of radius shrunk by the 3 cell margin
        let (dx, dy) = (cell.x as f64 - 40.0, cell.y as f64 - 40.0);
        assert!(dx.hypot(dy) <= 13.0, "{cell:?}");
    }
}

#[test]
fn test_all_occupied_has_no_candidate() {
    let region = RegionDescriptor::new(RegionShape::Rectangle, [5.0, 5.0], [20.0, 10.0]).unwrap();
    let grid = rasterize(&region, 10, 10).unwrap();
    let field = solve_field(&grid, 1.0).unwrap();
    assert!(free_cells(&field).is_empty());
    assert!(generate_candidates(&PlacementStrategy::FreeCells {
        field: &field,
        placement: CellPlacement::default(),
    })
    .is_empty());
}

#[test]
fn test_ring_sweep_yaws() {
    let candidates = generate_candidates(&PlacementStrategy::RingSweep(RingSweep::default()));
    assert_eq!(candidates.len(), 36);
    let step = 2.0 * std::f64::consts::PI / 36.0;
    for pair in candidates.windows(2) {
        let angle = pair[0].pose.rotation.angle_to(&pair[1].pose.rotation);
        assert_approx_eq!(angle, step, 1e-6);
    }
}

#[test]
fn test_interpolation_to_trajectory() {
    let domain = JointDomain::new(
        ["left_s0", "left_s1", "left_e0"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    )
    .unwrap();
    let start = domain.configuration(&[0.0, -0.55, 0.0]).unwrap();
    let end = domain.configuration(&[0.08, -0.55, -0.035]).unwrap();
    let path = interpolate(&start, &end).unwrap();
    // 0.08 / 0.01 rounded up
    assert_eq!(path.len(), 8);
    assert_eq!(path.joint_names(), domain.names());
    for (i, config) in path.configurations().enumerate() {
        let t = i as f64 / 8.0;
        assert!(t < 1.0);
        assert_approx_eq!(config.get("left_s0").unwrap(), 0.08 * t);
        assert_approx_eq!(config.get("left_s1").unwrap(), -0.55);
    }
    let trajectory = path.to_trajectory(std::time::Duration::from_millis(15));
    assert_eq!(
        trajectory.last().unwrap().time_from_start,
        std::time::Duration::from_millis(105)
    );
    assert_eq!(
        domain.positions(&path.configuration(0).unwrap()).unwrap(),
        vec![0.0, -0.55, 0.0]
    );
}
