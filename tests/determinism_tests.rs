//! Repeatability of cuts across runs and between the serial and parallel paths.
//! A tiny grain size makes the parallel path split even small grids.

mod support;

use gridcut::{DataArray, Plane, PlaneCutter, PointData, config};
use nalgebra::{Point3, Vector3};
use proptest::prelude::*;
use support::*;

const GRAIN: usize = 7;

fn small_grain() {
    config::set_grain_size(GRAIN);
}

fn with_scalars(grid: gridcut::UnstructuredGrid) -> gridcut::UnstructuredGrid {
    let values: Vec<f32> = (0..grid.num_points()).map(|id| (id % 17) as f32 * 0.5).collect();
    let mut point_data = PointData::new();
    point_data.add_array(DataArray::new("scalars", 1, values).unwrap());
    grid.with_point_data(point_data)
}

#[test]
fn grain_size_is_configurable() {
    small_grain();
    assert_eq!(config::grain_size(), GRAIN);
}

#[test]
fn repeated_runs_are_identical() {
    small_grain();
    let grid = with_scalars(tet_block(6));
    let plane = Plane::new(Point3::new(3.1, 2.9, 3.05), Vector3::new(0.4, -0.3, 1.0));
    for merge in [false, true] {
        let cutter = PlaneCutter::new(plane.clone()).with_merge_points(merge);
        let first = cutter.cut(&grid).unwrap();
        for _ in 0..5 {
            assert_eq!(cutter.cut(&grid).unwrap(), first);
        }
    }
}

#[test]
fn serial_and_parallel_agree() {
    small_grain();
    let grid = with_scalars(hex_block(6));
    let plane = Plane::new(Point3::new(3.0, 3.0, 3.0), Vector3::new(1.0, 2.0, 3.0));
    for merge in [false, true] {
        let cutter = PlaneCutter::new(plane.clone())
            .with_merge_points(merge)
            .with_compute_normals(true);
        let (parallel, parallel_report) = cutter.cut_with_report(&grid).unwrap();
        let (serial, serial_report) = cutter
            .clone()
            .with_sequential_processing(true)
            .cut_with_report(&grid)
            .unwrap();
        assert_eq!(parallel, serial);
        assert_eq!(serial_report.threads_used, 1);
        assert!(parallel_report.threads_used >= 1);
        assert_eq!(parallel_report.num_triangles, serial_report.num_triangles);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn merged_points_never_exceed_raw_edges(
        ox in 0.0f64..3.0, oy in 0.0f64..3.0, oz in 0.0f64..3.0,
        nx in -1.0f64..1.0, ny in -1.0f64..1.0, nz in -1.0f64..1.0,
    ) {
        small_grain();
        let normal = Vector3::new(nx, ny, nz);
        prop_assume!(normal.norm() > 0.1);
        let grid = tet_block(3);
        let cutter = PlaneCutter::new(Plane::new(Point3::new(ox, oy, oz), normal));

        let raw = cutter.cut(&grid).unwrap();
        let merged = cutter.clone().with_merge_points(true).cut(&grid).unwrap();
        prop_assert_eq!(raw.num_polys(), merged.num_polys());
        prop_assert_eq!(raw.num_points(), 3 * raw.num_polys());
        prop_assert!(merged.num_points() <= raw.num_points());
        for cell in merged.polys.iter() {
            prop_assert!(cell[0] != cell[1] && cell[1] != cell[2] && cell[0] != cell[2]);
            prop_assert!(cell.iter().all(|&id| id < merged.num_points()));
        }
    }

    #[test]
    fn serial_matches_parallel_for_any_plane(
        oz in 0.0f64..3.0,
        nx in -1.0f64..1.0, ny in -1.0f64..1.0,
        merge in any::<bool>(),
    ) {
        small_grain();
        let grid = with_scalars(hex_block(3));
        let plane = Plane::new(Point3::new(1.5, 1.5, oz), Vector3::new(nx, ny, 1.0));
        let cutter = PlaneCutter::new(plane).with_merge_points(merge);
        let parallel = cutter.cut(&grid).unwrap();
        let serial = cutter.with_sequential_processing(true).cut(&grid).unwrap();
        prop_assert_eq!(parallel, serial);
    }
}
