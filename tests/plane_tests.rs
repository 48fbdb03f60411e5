use gridcut::{
    Plane,
    plane::{ABOVE, BELOW, ON},
};
use nalgebra::{Point3, Vector3};

#[test]
fn flip() {
    let mut plane = Plane::new(Point3::new(0.0, 2.0, 0.0), Vector3::y());
    plane.flip();
    assert_eq!(plane.normal, Vector3::new(0.0, -1.0, 0.0));
    assert_eq!(plane.origin, Point3::new(0.0, 2.0, 0.0));
    assert_eq!(plane.flipped(), Plane::new(Point3::new(0.0, 2.0, 0.0), Vector3::y()));
}

#[test]
fn push_moves_along_the_unit_normal() {
    let mut plane = Plane::new(Point3::new(0.0, 0.0, 0.25), Vector3::new(0.0, 0.0, 4.0));
    plane.push(0.25);
    assert_eq!(plane.origin, Point3::new(0.0, 0.0, 0.5));
    assert_eq!(plane.normal, Vector3::new(0.0, 0.0, 4.0));
    plane.push(-1.0);
    assert_eq!(plane.origin.z, -0.5);
}

#[test]
fn from_points_follows_the_right_hand_rule() {
    let plane = Plane::from_points(
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    );
    assert_eq!(plane.normal, Vector3::z());
    assert_eq!(plane.classify(&[5.0, 5.0, 2.0]), ABOVE);
    assert_eq!(plane.classify(&[5.0, 5.0, 0.0]), BELOW);
    assert_eq!(plane.classify(&[5.0, -3.0, 1.0]), ON);

    // Collinear points
    let degenerate = Plane::from_points(
        Point3::origin(),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(2.0, 2.0, 2.0),
    );
    assert_eq!(degenerate.normal, Vector3::z());
}

#[test]
fn evaluate_uses_the_normal_as_given() {
    let plane = Plane::new(Point3::new(1.0, 0.0, 0.0), Vector3::new(3.0, 0.0, 0.0));
    assert_eq!(plane.evaluate(&[2.0, 7.0, -7.0]), 3.0);
    assert_eq!(plane.unit_normal(), Vector3::x());
}
