#![allow(clippy::unwrap_used)]

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use approx::assert_abs_diff_eq;
use lumisweep::math::polygon_2d::triangle_signed_area;
use lumisweep::math::Point2;
use lumisweep::{
    compute_visibility, Boundary, BuildSegmentSet, LightState, Obstacle, SceneConfig, SegmentSet,
    SweepConfig, Sweeper, VisibilityPolygon,
};

fn arena(obstacles: &[Obstacle]) -> SegmentSet {
    BuildSegmentSet::new(
        obstacles,
        Boundary::new(Point2::new(-100.0, -100.0), Point2::new(100.0, 100.0)),
    )
    .execute()
    .unwrap()
}

fn square(cx: f64, cy: f64, side: f64) -> Obstacle {
    let h = side / 2.0;
    Obstacle::new(vec![
        Point2::new(cx - h, cy - h),
        Point2::new(cx + h, cy - h),
        Point2::new(cx + h, cy + h),
        Point2::new(cx - h, cy + h),
    ])
}

fn has_vertex(polygon: &VisibilityPolygon, p: Point2) -> bool {
    polygon.points().any(|v| v == p)
}

fn assert_angles_ascending(polygon: &VisibilityPolygon) {
    for pair in polygon.vertices().windows(2) {
        assert!(
            pair[0].angle < pair[1].angle,
            "{:?} then {:?}",
            pair[0].point,
            pair[1].point
        );
    }
}

/// Every fan triangle turns counter-clockwise around the light.
fn assert_fan_ccw(polygon: &VisibilityPolygon, light: &LightState) {
    for [apex, a, b] in polygon.triangles(light.position) {
        assert!(triangle_signed_area(&apex, &a, &b) > 0.0, "{a:?} -> {b:?}");
    }
}

#[test]
fn empty_arena_yields_its_four_corners() {
    let light = LightState::new(Point2::origin());
    let polygon = compute_visibility(&light, &arena(&[]), &SweepConfig::default());
    let points: Vec<Point2> = polygon.points().collect();
    assert_eq!(
        points,
        vec![
            Point2::new(-100.0, -100.0),
            Point2::new(100.0, -100.0),
            Point2::new(100.0, 100.0),
            Point2::new(-100.0, 100.0),
        ]
    );
    assert!(polygon.is_closed());
}

#[test]
fn off_centre_light_in_empty_arena_sees_only_the_corners() {
    let light = LightState::new(Point2::new(-37.5, 61.25));
    let polygon = compute_visibility(&light, &arena(&[]), &SweepConfig::default());
    let points: Vec<Point2> = polygon.points().collect();
    assert_eq!(
        points,
        Boundary::new(Point2::new(-100.0, -100.0), Point2::new(100.0, 100.0))
            .corners()
            .to_vec()
    );
    assert_abs_diff_eq!(polygon.area(light.position), 40_000.0, epsilon = 1e-6);
}

#[test]
fn large_default_scene_yields_its_four_corners() {
    let config = SceneConfig::default();
    let segments = BuildSegmentSet::new(&[], config.boundary()).execute().unwrap();
    let light = config.light_at(Point2::new(500.0, 500.0));
    let polygon = compute_visibility(&light, &segments, &config.sweep);
    let points: Vec<Point2> = polygon.points().collect();
    assert_eq!(points, config.boundary().corners().to_vec());
}

/// Light at the origin, square of `side` centred at `(side * 2.5, 0)` inside a
/// `±side * 5` arena: the exact fan is both arena corners on each side, the two
/// shadow-edge points on the east wall and the two facing corners.
fn assert_square_scene_fan(side: f64) {
    let h = side * 5.0;
    let segments = BuildSegmentSet::new(
        &[square(side * 2.5, 0.0, side)],
        Boundary::new(Point2::new(-h, -h), Point2::new(h, h)),
    )
    .execute()
    .unwrap();
    let light = LightState::new(Point2::origin());
    let polygon = compute_visibility(&light, &segments, &SweepConfig::default());
    let points: Vec<Point2> = polygon.points().collect();
    assert_eq!(points.len(), 8, "{points:?}");

    let face = side * 2.0;
    let exact = [
        (0, Point2::new(-h, -h)),
        (1, Point2::new(h, -h)),
        (3, Point2::new(face, -side / 2.0)),
        (4, Point2::new(face, side / 2.0)),
        (6, Point2::new(h, h)),
        (7, Point2::new(-h, h)),
    ];
    for (i, expected) in exact {
        assert_eq!(points[i], expected);
    }
    // Shadow edges graze the facing corners just outside the square.
    for (i, sign) in [(2, -1.0), (5, 1.0)] {
        assert_abs_diff_eq!(points[i].x, h, epsilon = 1e-9);
        assert_abs_diff_eq!(points[i].y, sign * side * 1.250_531, epsilon = side * 1e-6);
    }

    assert_angles_ascending(&polygon);
    assert_fan_ccw(&polygon, &light);
}

#[test]
fn square_obstacle_shows_only_its_facing_corners() {
    assert_square_scene_fan(20.0);
}

#[test]
fn scaled_square_obstacle_adds_no_mid_face_vertices() {
    assert_square_scene_fan(200.0);
}

#[test]
fn visible_convex_vertices_are_exact() {
    let hexagon = Obstacle::new(
        (0..6)
            .map(|k| {
                let a = f64::from(k) * TAU / 6.0;
                Point2::new(30.0 + 8.0 * a.cos(), -20.0 + 8.0 * a.sin())
            })
            .collect(),
    );
    let light = LightState::new(Point2::new(-40.0, 10.0));
    let polygon = compute_visibility(&light, &arena(&[hexagon.clone()]), &SweepConfig::default());

    let centre = Point2::new(30.0, -20.0);
    for (i, v) in hexagon.vertices.iter().enumerate() {
        let n = hexagon.vertices.len();
        let prev = hexagon.vertices[(i + n - 1) % n];
        let next = hexagon.vertices[(i + 1) % n];
        // A vertex is visible when at least one incident edge faces the light.
        let faces = |a: Point2, b: Point2| {
            let outward = Point2::from((a.coords + b.coords) / 2.0) - centre;
            outward.dot(&(light.position - a)) > 0.0
        };
        if faces(prev, *v) || faces(*v, next) {
            assert!(has_vertex(&polygon, *v), "visible vertex {v:?} missing");
        }
    }
}

#[test]
fn identical_inputs_give_identical_polygons() {
    let segments = arena(&[square(50.0, 0.0, 20.0), square(-30.0, 40.0, 15.0)]);
    let light = LightState::new(Point2::new(5.0, -7.0));
    let config = SweepConfig::default();

    let first = compute_visibility(&light, &segments, &config);
    let second = compute_visibility(&light, &segments, &config);
    assert_eq!(first, second);

    let mut sweeper = Sweeper::new(config);
    let _ = sweeper.compute(&LightState::new(Point2::new(-80.0, 80.0)), &segments);
    assert_eq!(sweeper.compute(&light, &segments), first);
}

#[test]
fn hit_and_ray_angles_strictly_increase() {
    let segments = arena(&[
        square(50.0, 0.0, 20.0),
        square(-30.0, 40.0, 15.0),
        square(-20.0, -60.0, 10.0),
    ]);
    let light = LightState::new(Point2::new(2.0, 3.0));
    let mut sweeper = Sweeper::default();
    let polygon = sweeper.compute(&light, &segments);

    assert_angles_ascending(&polygon);
    assert_fan_ccw(&polygon, &light);
    for pair in sweeper.rays().windows(2) {
        assert!(pair[0].angle < pair[1].angle);
    }
    let first = polygon.vertices().first().unwrap().angle;
    let last = polygon.vertices().last().unwrap().angle;
    assert!(last - first < TAU);
}

#[test]
fn quarter_cone_stays_inside_its_wedge() {
    let light = LightState::new(Point2::origin()).with_cone(FRAC_PI_2, 0.0);
    let segments = arena(&[square(50.0, 0.0, 20.0)]);
    let polygon = compute_visibility(&light, &segments, &SweepConfig::default());

    assert!(!polygon.is_closed());
    assert!(!polygon.is_empty());
    for hit in polygon.vertices() {
        assert!(hit.angle >= -FRAC_PI_4 - 1e-12 && hit.angle <= FRAC_PI_4 + 1e-12);
        let direction = hit.point.y.atan2(hit.point.x);
        assert!(direction.abs() <= FRAC_PI_4 + 1e-9, "{:?}", hit.point);
    }
    assert!(has_vertex(&polygon, Point2::new(40.0, 10.0)));
    assert!(has_vertex(&polygon, Point2::new(100.0, -100.0)));
    assert!(has_vertex(&polygon, Point2::new(100.0, 100.0)));
    assert_angles_ascending(&polygon);
}

#[test]
fn empty_quarter_cone_is_bounded_by_its_closing_rays() {
    let light = LightState::new(Point2::origin()).with_cone(FRAC_PI_2, 0.0);
    let polygon = compute_visibility(&light, &arena(&[]), &SweepConfig::default());
    let points: Vec<Point2> = polygon.points().collect();
    assert_eq!(points, vec![Point2::new(100.0, -100.0), Point2::new(100.0, 100.0)]);
}

#[test]
fn ray_through_collinear_vertices_stays_ordered() {
    // (30, 30), (55, 55) and the arena corner all lie on the 45° ray.
    let sliver = Obstacle::new(vec![
        Point2::new(30.0, 30.0),
        Point2::new(20.0, 15.0),
        Point2::new(35.0, 20.0),
    ]);
    let light = LightState::new(Point2::origin());
    let polygon = compute_visibility(
        &light,
        &arena(&[sliver, square(60.0, 60.0, 10.0)]),
        &SweepConfig::default(),
    );

    assert!(has_vertex(&polygon, Point2::new(30.0, 30.0)));
    assert!(!has_vertex(&polygon, Point2::new(55.0, 55.0)));
    assert!(!has_vertex(&polygon, Point2::new(100.0, 100.0)));
    assert_angles_ascending(&polygon);
    assert_fan_ccw(&polygon, &light);
}

#[test]
fn vertex_on_the_seam_angle_is_resolved() {
    // (-50, 0) sits exactly at angle π from the light.
    let wedge = Obstacle::new(vec![
        Point2::new(-50.0, 0.0),
        Point2::new(-60.0, 10.0),
        Point2::new(-60.0, -10.0),
    ]);
    let light = LightState::new(Point2::origin());
    let polygon = compute_visibility(&light, &arena(&[wedge]), &SweepConfig::default());

    assert!(has_vertex(&polygon, Point2::new(-50.0, 0.0)));
    assert_angles_ascending(&polygon);
    assert_fan_ccw(&polygon, &light);
}

#[test]
fn range_limited_light_stays_within_range() {
    let light = LightState::new(Point2::new(10.0, 0.0)).with_max_range(45.0);
    let segments = arena(&[square(50.0, 0.0, 20.0)]);
    let polygon = compute_visibility(&light, &segments, &SweepConfig::default());

    assert!(polygon.len() > 32);
    for hit in polygon.vertices() {
        assert!(hit.distance <= 45.0 + 1e-9);
        assert!((hit.point - light.position).norm() <= 45.0 + 1e-9);
    }
    assert!(has_vertex(&polygon, Point2::new(40.0, 10.0)));
    assert!(has_vertex(&polygon, Point2::new(40.0, -10.0)));
    assert_fan_ccw(&polygon, &light);
}

#[test]
fn frame_sweeps_lights_independently() {
    let segments = arena(&[square(50.0, 0.0, 20.0)]);
    let lights = [
        LightState::new(Point2::origin()),
        LightState::new(Point2::new(-50.0, 50.0)).with_cone(1.0, -FRAC_PI_4),
        LightState::new(Point2::new(80.0, 0.0)).with_max_range(30.0),
    ];
    let config = SweepConfig::default();
    let frame = Sweeper::new(config).compute_frame(&lights, &segments);
    assert_eq!(frame.len(), lights.len());
    for (light, polygon) in lights.iter().zip(&frame) {
        assert_eq!(polygon, &compute_visibility(light, &segments, &config));
    }
}

#[test]
fn scene_from_toml_config() {
    let config = SceneConfig::from_toml_str(
        r"
        width = 400.0
        height = 300.0
        lights_count = 2

        [sweep]
        distance_epsilon = 0.01
        ",
    )
    .unwrap();
    let segments = BuildSegmentSet::new(&[square(200.0, 150.0, 40.0)], config.boundary())
        .execute()
        .unwrap();
    let lights: Vec<LightState> = [Point2::new(50.0, 150.0), Point2::new(350.0, 150.0)]
        .into_iter()
        .take(config.lights_count)
        .map(|p| config.light_at(p))
        .collect();
    let polygons = Sweeper::new(config.sweep).compute_frame(&lights, &segments);
    assert_eq!(polygons.len(), 2);
    // Each light sees the square face nearest to it.
    assert!(has_vertex(&polygons[0], Point2::new(180.0, 130.0)));
    assert!(has_vertex(&polygons[0], Point2::new(180.0, 170.0)));
    assert!(has_vertex(&polygons[1], Point2::new(220.0, 130.0)));
    assert!(has_vertex(&polygons[1], Point2::new(220.0, 170.0)));
}
