mod support;

use gridcut::{
    CellType, CutError, DataObject, DataType, MultiBlockDataSet, PlaneCutter, PolyData,
    UnstructuredGrid,
};
use support::*;

fn nested_blocks() -> MultiBlockDataSet {
    let inner = MultiBlockDataSet::new(vec![Some(unit_voxel().into()), None]);
    MultiBlockDataSet::new(vec![
        Some(unit_tetra().into()),
        None,
        Some(PolyData::empty(DataType::Float32).into()),
        Some(inner.into()),
    ])
}

#[test]
fn grid_becomes_poly_data() {
    let cutter = PlaneCutter::new(z_plane(0.5));
    let output = cutter.cut_data_object(&unit_tetra().into()).unwrap();
    let poly = output.as_poly_data().unwrap();
    assert_eq!(poly.num_polys(), 1);
}

#[test]
fn multiblock_keeps_its_structure() {
    let cutter = PlaneCutter::new(z_plane(0.5));
    let output = cutter.cut_data_object(&nested_blocks().into()).unwrap();
    let blocks = output.as_multi_block().unwrap();
    assert_eq!(blocks.len(), 4);

    let first = blocks.blocks[0].as_ref().and_then(DataObject::as_poly_data).unwrap();
    assert_eq!(first.num_polys(), 1);
    assert!(blocks.blocks[1].is_none());
    // Only grids are cut; other leaves are dropped
    assert!(blocks.blocks[2].is_none());

    let inner = blocks.blocks[3].as_ref().and_then(DataObject::as_multi_block).unwrap();
    assert_eq!(inner.len(), 2);
    let voxel = inner.blocks[0].as_ref().and_then(DataObject::as_poly_data).unwrap();
    assert_eq!(voxel.num_polys(), 2);
    assert!(inner.blocks[1].is_none());

    assert_eq!(blocks.leaves().len(), 2);
}

#[test]
fn failed_pieces_leave_empty_surfaces() {
    let points = gridcut::Points::from_xyz(vec![[0u8, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]]);
    let cells: gridcut::CellArray = std::iter::once(&[0usize, 1, 2, 3][..]).collect();
    let bad = UnstructuredGrid::new(points, cells, vec![CellType::Tetra]).unwrap();
    let blocks = MultiBlockDataSet::new(vec![Some(bad.into()), Some(unit_tetra().into())]);

    let output = PlaneCutter::new(z_plane(0.5)).cut_data_object(&blocks.into()).unwrap();
    let blocks = output.as_multi_block().unwrap();
    assert!(blocks.blocks[0].as_ref().and_then(DataObject::as_poly_data).unwrap().is_empty());
    let second = blocks.blocks[1].as_ref().and_then(DataObject::as_poly_data).unwrap();
    assert_eq!(second.num_polys(), 1);
}

#[test]
fn poly_data_cannot_be_cut() {
    let input: DataObject = PolyData::empty(DataType::Float64).into();
    let err = PlaneCutter::default().cut_data_object(&input).unwrap_err();
    assert_eq!(err, CutError::UnsupportedDataObject("poly data"));
}

#[test]
fn can_fully_process() {
    assert!(PlaneCutter::can_fully_process(&tet_block(2).into()));
    assert!(PlaneCutter::can_fully_process(&unit_pyramid().into()));
    assert!(!PlaneCutter::can_fully_process(&PolyData::empty(DataType::Float32).into()));

    let triangle = UnstructuredGrid::single_cell(
        CellType::Triangle,
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    )
    .unwrap();
    assert!(!PlaneCutter::can_fully_process(&triangle.clone().into()));

    let grids =
        MultiBlockDataSet::new(vec![Some(unit_wedge().into()), None, Some(hex_block(1).into())]);
    assert!(PlaneCutter::can_fully_process(&grids.into()));

    let mixed = MultiBlockDataSet::new(vec![Some(unit_wedge().into()), Some(triangle.into())]);
    assert!(!PlaneCutter::can_fully_process(&mixed.into()));

    // A poly data leaf cannot be processed either
    assert!(!PlaneCutter::can_fully_process(&nested_blocks().into()));
}
