use phys2d::error::PhysicsError;
use phys2d::math::{self, Aabb, Vector2};
use phys2d::shapes::{moment_for_box, Polygon, Segment};
use approx::assert_relative_eq;
use std::f64::consts::PI;

#[test]
fn test_vector_operations() {
    let a = Vector2::new(1.0, 2.0);
    let b = Vector2::new(3.0, -4.0);

    assert_eq!(a + b, Vector2::new(4.0, -2.0));
    assert_eq!(a - b, Vector2::new(-2.0, 6.0));
    assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
    assert_eq!(2.0 * a, Vector2::new(2.0, 4.0));
    assert_eq!(-a, Vector2::new(-1.0, -2.0));

    assert_relative_eq!(a.dot(&b), -5.0);
    assert_relative_eq!(a.cross(&b), -10.0);
    assert_relative_eq!(b.length(), 5.0);
    assert_relative_eq!(b.normalize().length(), 1.0);

    // The zero vector normalizes to itself
    assert!(Vector2::zero().normalize().is_zero());
}

#[test]
fn test_cross_scalar_and_perpendicular() {
    let v = Vector2::new(2.0, 1.0);

    // w x v for a counter-clockwise spin
    assert_eq!(Vector2::cross_scalar(3.0, &v), Vector2::new(-3.0, 6.0));

    let p = v.perpendicular();
    assert_relative_eq!(p.dot(&v), 0.0);
    assert_relative_eq!(v.cross(&p), v.length_squared());
}

#[test]
fn test_vector_rotation() {
    let v = Vector2::unit_x();

    assert_relative_eq!(v.rotate(PI / 2.0), Vector2::unit_y(), epsilon = 1e-12);
    assert_relative_eq!(v.rotate(PI), -Vector2::unit_x(), epsilon = 1e-12);
    assert_relative_eq!(Vector2::from_angle(PI / 4.0).length(), 1.0);

    // Rotation preserves length
    let w = Vector2::new(3.0, 4.0);
    assert_relative_eq!(w.rotate(1.234).length(), 5.0, epsilon = 1e-12);
}

#[test]
fn test_vector_interpolation_and_distance() {
    let a = Vector2::new(0.0, 0.0);
    let b = Vector2::new(10.0, -10.0);

    assert_eq!(a.lerp(&b, 0.5), Vector2::new(5.0, -5.0));
    assert_relative_eq!(a.distance(&b), 200.0_f64.sqrt());
}

#[test]
fn test_nalgebra_conversion() {
    let v = Vector2::new(1.5, -2.5);
    let n: nalgebra::Vector2<f64> = v.into();

    assert_relative_eq!(n.x, 1.5);
    assert_relative_eq!(n.y, -2.5);
    assert_eq!(Vector2::from(n), v);
    assert_eq!(Vector2::from_nalgebra(&v.to_nalgebra()), v);

    let array: [f64; 2] = v.into();
    assert_eq!(Vector2::from(array), v);
}

#[test]
fn test_screen_angle_conversion() {
    // Body angle zero points along +x, which is 90 degrees on screen
    assert_relative_eq!(math::to_screen_angle(0.0), 90.0);
    assert_relative_eq!(math::to_screen_angle(PI / 2.0), 180.0);
    assert_relative_eq!(math::to_screen_angle(-PI / 2.0), 0.0);

    for radians in [-2.0, -0.3, 0.0, 0.7, 3.0] {
        assert_relative_eq!(math::to_radians(math::to_screen_angle(radians)), radians, epsilon = 1e-12);
    }
}

#[test]
fn test_aabb() {
    let points = [Vector2::new(1.0, 5.0), Vector2::new(-2.0, 3.0), Vector2::new(4.0, -1.0)];
    let aabb = Aabb::from_points(&points).unwrap();

    assert_eq!(aabb.min, Vector2::new(-2.0, -1.0));
    assert_eq!(aabb.max, Vector2::new(4.0, 5.0));
    assert!(aabb.contains_point(Vector2::new(0.0, 0.0)));
    assert!(!aabb.contains_point(Vector2::new(5.0, 0.0)));
    assert_eq!(aabb.center(), Vector2::new(1.0, 2.0));
    assert!(Aabb::from_points(&[]).is_none());

    let other = Aabb::new(Vector2::new(4.0, 5.0), Vector2::new(6.0, 6.0));
    assert!(aabb.intersects(&other));
    assert!(!aabb.intersects(&Aabb::new(Vector2::new(4.5, 0.0), Vector2::new(6.0, 1.0))));
    assert!(aabb.expanded(0.5).intersects(&Aabb::new(Vector2::new(4.5, 0.0), Vector2::new(6.0, 1.0))));
}

#[test]
fn test_polygon_validation() {
    // Clockwise input is accepted and rewound
    let square = Polygon::square(10.0).unwrap();
    assert_relative_eq!(square.area(), 400.0);
    assert_eq!(square.get_vertices().len(), 4);

    let triangle = Polygon::new(vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(0.0, 1.0),
        Vector2::new(1.0, 0.0),
    ])
    .unwrap();
    assert_relative_eq!(triangle.area(), 0.5);

    assert!(Polygon::new(vec![Vector2::zero(), Vector2::unit_x()]).is_err());
    assert!(Polygon::new(vec![Vector2::zero(), Vector2::unit_x(), Vector2::new(2.0, 0.0)]).is_err());
    assert!(Polygon::square(0.0).is_err());
    assert!(Polygon::new(vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(f64::NAN, 1.0),
        Vector2::new(1.0, 0.0),
    ])
    .is_err());

    // An arrow head is not convex
    let concave = Polygon::new(vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(2.0, 1.0),
        Vector2::new(0.0, 2.0),
        Vector2::new(1.0, 1.0),
    ]);
    assert!(concave.is_err());

    // A repeated vertex leaves a zero-length edge
    let repeated = Polygon::new(vec![
        Vector2::new(-10.0, 10.0),
        Vector2::new(10.0, 10.0),
        Vector2::new(10.0, 10.0),
        Vector2::new(10.0, -10.0),
        Vector2::new(-10.0, -10.0),
    ]);
    assert!(matches!(repeated, Err(PhysicsError::InvalidGeometry(_))));

    // A midpoint on a straight edge
    let collinear = Polygon::new(vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(2.0, 0.0),
        Vector2::new(2.0, 2.0),
        Vector2::new(0.0, 2.0),
    ]);
    assert!(matches!(collinear, Err(PhysicsError::InvalidGeometry(_))));
}

#[test]
fn test_segment_validation() {
    let segment = Segment::new(Vector2::zero(), Vector2::new(3.0, 4.0), 1.0).unwrap();
    assert_relative_eq!(segment.length(), 5.0);
    assert_relative_eq!(segment.get_radius(), 1.0);

    assert!(Segment::new(Vector2::zero(), Vector2::zero(), 1.0).is_err());
    assert!(Segment::new(Vector2::zero(), Vector2::unit_x(), -1.0).is_err());
    assert!(Segment::new(Vector2::zero(), Vector2::new(f64::INFINITY, 0.0), 1.0).is_err());
}

#[test]
fn test_moment_for_box() {
    assert_relative_eq!(moment_for_box(12.0, 2.0, 4.0), 20.0);
}
