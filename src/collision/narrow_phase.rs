use crate::bodies::RigidBody;
use crate::math::{Aabb, Vector2};
use crate::shapes::{ShapeGeometry, ShapeKind};

/// Vertices within this distance of a support face count as touching it
const FACE_TOLERANCE: f64 = 0.05;

/// A contact produced by the narrow phase
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first shape to the second
    pub normal: Vector2,

    /// Penetration depth along the normal
    pub depth: f64,

    /// Contact points in world space (one or two)
    pub points: Vec<Vector2>,
}

/// A shape transformed into world space, ready for the separating-axis test
#[derive(Debug, Clone)]
pub struct ConvexView {
    kind: ShapeKind,
    points: Vec<Vector2>,
    normals: Vec<Vector2>,
    radius: f64,
}

impl ConvexView {
    /// Transforms a shape's geometry by its body
    pub fn new(geometry: &ShapeGeometry, body: &RigidBody) -> Self {
        let points = geometry.world_points(body);
        let normals = match geometry {
            ShapeGeometry::Segment(_) => {
                let n = (points[1] - points[0]).perpendicular().normalize();
                vec![n, -n]
            }
            ShapeGeometry::Polygon(_) => {
                let count = points.len();
                (0..count)
                    .map(|i| {
                        let edge = points[(i + 1) % count] - points[i];
                        Vector2::new(edge.y, -edge.x).normalize()
                    })
                    .collect()
            }
        };

        Self {
            kind: geometry.kind(),
            points,
            normals,
            radius: geometry.radius(),
        }
    }

    /// Returns the kind of the underlying shape
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Returns the world-space outline points
    pub fn points(&self) -> &[Vector2] {
        &self.points
    }

    /// Returns the world-space bounding box, including the radius
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.points)
            .unwrap_or_else(|| Aabb::new(Vector2::zero(), Vector2::zero()))
            .expanded(self.radius)
    }

    fn project(&self, axis: Vector2) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in &self.points {
            let d = p.dot(&axis);
            min = min.min(d);
            max = max.max(d);
        }
        (min - self.radius, max + self.radius)
    }
}

type CollideFn = fn(&ConvexView, &ConvexView) -> Option<Contact>;

/// Looks up the collision routine for a pair of shape kinds
///
/// Segments only ever belong to static bodies, so segment pairs never collide.
fn collider_for(a: ShapeKind, b: ShapeKind) -> Option<CollideFn> {
    match (a, b) {
        (ShapeKind::Segment, ShapeKind::Segment) => None,
        (ShapeKind::Segment, ShapeKind::Polygon)
        | (ShapeKind::Polygon, ShapeKind::Segment)
        | (ShapeKind::Polygon, ShapeKind::Polygon) => Some(separating_axis),
    }
}

/// Tests two world-space views for overlap
pub fn collide(a: &ConvexView, b: &ConvexView) -> Option<Contact> {
    let collide = collider_for(a.kind, b.kind)?;
    collide(a, b)
}

/// Tests two shapes, each placed by its body, for overlap
pub fn intersect(
    shape_a: &ShapeGeometry,
    body_a: &RigidBody,
    shape_b: &ShapeGeometry,
    body_b: &RigidBody,
) -> Option<Contact> {
    collide(&ConvexView::new(shape_a, body_a), &ConvexView::new(shape_b, body_b))
}

/// The axis of least penetration found by the separating-axis test
struct Penetration {
    normal: Vector2,
    depth: f64,
    reference_is_a: bool,
}

fn least_penetration(a: &ConvexView, b: &ConvexView) -> Option<Penetration> {
    let mut best: Option<Penetration> = None;

    let axes = a.normals.iter().map(|n| (*n, true))
        .chain(b.normals.iter().map(|n| (*n, false)));

    for (axis, from_a) in axes {
        let (min_a, max_a) = a.project(axis);
        let (min_b, max_b) = b.project(axis);

        // Overlap when pushing b along +axis and along -axis
        let forward = max_a - min_b;
        let backward = max_b - min_a;
        let depth = forward.min(backward);
        if depth <= 0.0 {
            return None;
        }

        if best.as_ref().map_or(true, |p| depth < p.depth) {
            let normal = if forward <= backward { axis } else { -axis };
            best = Some(Penetration {
                normal,
                depth,
                reference_is_a: from_a,
            });
        }
    }

    best
}

/// Points of `view` lying within tolerance of its extreme projection on `axis`
fn support_points(view: &ConvexView, axis: Vector2) -> Vec<Vector2> {
    let max = view.points.iter()
        .map(|p| p.dot(&axis))
        .fold(f64::NEG_INFINITY, f64::max);
    view.points.iter()
        .copied()
        .filter(|p| p.dot(&axis) >= max - FACE_TOLERANCE)
        .collect()
}

fn separating_axis(a: &ConvexView, b: &ConvexView) -> Option<Contact> {
    let Penetration { normal, depth, reference_is_a } = least_penetration(a, b)?;
    let tangent = normal.perpendicular();

    // The incident feature is the one reaching deepest into the reference shape
    let (reference_face, incident, incident_shift) = if reference_is_a {
        (support_points(a, normal), support_points(b, -normal), -normal * b.radius)
    } else {
        (support_points(b, -normal), support_points(a, normal), normal * a.radius)
    };

    let (face_min, face_max) = reference_face.iter()
        .map(|p| p.dot(&tangent))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| (lo.min(s), hi.max(s)));
    if !(face_min <= face_max) {
        return None;
    }

    // Keep the two extreme incident points along the face, clipped to its extent
    let mut sorted: Vec<(f64, Vector2)> = incident.iter()
        .map(|p| (p.dot(&tangent), *p + incident_shift))
        .collect();
    sorted.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut points: Vec<Vector2> = Vec::with_capacity(2);
    let extremes = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) if sorted.len() > 1 => vec![*first, *last],
        (Some(first), _) => vec![*first],
        _ => Vec::new(),
    };
    for (s, p) in extremes {
        let clipped = p + tangent * (s.clamp(face_min, face_max) - s);
        if points.iter().all(|q| q.distance(&clipped) > FACE_TOLERANCE) {
            points.push(clipped);
        }
    }

    if points.is_empty() {
        return None;
    }

    Some(Contact {
        normal,
        depth,
        points,
    })
}
