use triad_cluster::resolver::point;
use triad_cluster::{
    Point, PointInbox, ResolverConfig, TriadPipeline, TriadResolver, TriangleEvent,
};

/// Points of a triangle inscribed in a circle, spaced by the given arc weights.
fn triad(center: Point, radius: f64, weights: [f64; 3], rotation: f64) -> Vec<Point> {
    let total: f64 = weights.iter().sum();
    let mut angle = rotation;
    weights
        .iter()
        .map(|w| {
            angle += w / total * 360.0;
            let rad = angle.to_radians();
            point(center.x + radius * rad.cos(), center.y + radius * rad.sin())
        })
        .collect()
}

fn summarize(events: &[TriangleEvent]) -> Vec<(&'static str, u32)> {
    events
        .iter()
        .map(|e| {
            let kind = match e {
                TriangleEvent::Down(_) => "down",
                TriangleEvent::Stay(_) => "stay",
                TriangleEvent::Up(_) => "up",
            };
            (kind, e.label())
        })
        .collect()
}

#[test]
fn test_basic_tracking() {
    let inbox = PointInbox::new();
    let mut pipeline = TriadPipeline::with_default_config(inbox.clone()).unwrap();
    let mut events: Vec<TriangleEvent> = Vec::new();

    // Frame 1: A [90, 60, 30] triad appears
    inbox.publish(triad(point(300.0, 300.0), 100.0, [90.0, 60.0, 30.0], 0.0));
    pipeline.tick(1, &mut events).unwrap();
    assert_eq!(summarize(&events), [("down", 1), ("stay", 1)]);

    // Frame 2-3: It rotates and drifts; the identity persists
    for frame in 2..=3 {
        events.clear();
        let rotation = frame as f64 * 15.0;
        let center = point(300.0 + frame as f64, 300.0);
        inbox.publish(triad(center, 100.0, [90.0, 60.0, 30.0], rotation));
        pipeline.tick(frame, &mut events).unwrap();
        assert_eq!(summarize(&events), [("stay", 1)]);
    }
    let tracked = pipeline.tracker().get(1).unwrap();
    assert_eq!(tracked.start_cycle, 1);
    assert_eq!(tracked.last_seen, 3);
    assert!((tracked.pose.center.x - 303.0).abs() < 1e-6);

    // Frame 4+: Contacts lifted
    inbox.clear();
    events.clear();
    for frame in 4..=10 {
        pipeline.tick(frame, &mut events).unwrap();
    }
    // Default threshold is 2: stays on frames 4 and 5, released on frame 6.
    assert_eq!(summarize(&events), [("stay", 1), ("stay", 1), ("up", 1)]);
    match &events[2] {
        TriangleEvent::Up(t) => assert_eq!(t.last_seen, 3),
        other => panic!("expected Up, got {other:?}"),
    }
    assert!(pipeline.tracker().is_empty());
}

#[test]
fn test_orientation_follows_rotation() {
    let inbox = PointInbox::new();
    let mut pipeline = TriadPipeline::with_default_config(inbox.clone()).unwrap();

    let mut angles = Vec::new();
    for (frame, rotation) in [(1, 0.0), (2, 40.0), (3, 80.0)] {
        inbox.publish(triad(point(0.0, 0.0), 100.0, [110.0, 50.0, 20.0], rotation));
        pipeline.tick(frame, &mut Vec::<TriangleEvent>::new()).unwrap();
        angles.push(pipeline.tracker().get(3).unwrap().pose.orientation_degrees);
    }

    for pair in angles.windows(2) {
        let step = (pair[1] - pair[0]).rem_euclid(360.0);
        assert!((step - 40.0).abs() < 1e-6, "step {step}");
    }
}

#[test]
fn test_all_default_presets_at_once() {
    let inbox = PointInbox::new();
    let mut pipeline = TriadPipeline::with_default_config(inbox.clone()).unwrap();
    let mut events: Vec<TriangleEvent> = Vec::new();

    let mut points = triad(point(0.0, 0.0), 100.0, [90.0, 60.0, 30.0], 10.0);
    points.extend(triad(point(5000.0, 0.0), 80.0, [62.0, 60.0, 58.0], 200.0));
    points.extend(triad(point(0.0, 5000.0), 120.0, [110.0, 50.0, 20.0], 300.0));
    // Stray contact far from everything
    points.push(point(-4000.0, -4000.0));
    inbox.publish(points);

    let report = pipeline.tick(1, &mut events).unwrap();
    assert_eq!(report.stats.clusters, 3);
    assert_eq!(report.stats.candidates, 3);
    assert_eq!(report.tracked, 3);
    assert_eq!(
        summarize(&events),
        [("down", 1), ("down", 2), ("down", 3), ("stay", 1), ("stay", 2), ("stay", 3)]
    );
}

#[test]
fn test_frame_interval_reuses_last_matches() {
    let config = ResolverConfig {
        analyze_cycle_frame_interval: 3,
        ..Default::default()
    };
    let resolver = TriadResolver::with_default_presets(config).unwrap();
    let inbox = PointInbox::new();
    let mut pipeline = TriadPipeline::new(inbox.clone(), resolver);

    inbox.publish(triad(point(0.0, 0.0), 100.0, [62.0, 60.0, 58.0], 0.0));
    let mut resolved = Vec::new();
    let mut events: Vec<TriangleEvent> = Vec::new();
    for frame in 1..=6 {
        resolved.push(pipeline.tick(frame, &mut events).unwrap().resolved);
    }
    assert_eq!(resolved, [false, false, true, false, false, true]);
    assert_eq!(pipeline.tracker().get(2).unwrap().last_seen, 6);

    // Points vanish, but nothing changes until the next resolving frame.
    inbox.clear();
    events.clear();
    for frame in 7..=8 {
        pipeline.tick(frame, &mut events).unwrap();
    }
    assert_eq!(pipeline.tracker().get(2).unwrap().last_seen, 8);
}
