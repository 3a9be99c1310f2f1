use approx::assert_relative_eq;
use track_overlay::overlay::ScaleFactors;
use track_overlay::{
    ClassType, EventMetadata, GlobalConfig, LifecycleRecord, OverlaySettings, Rect, SceneInput,
    Shape, color_from_id, compute_scene, render,
};

fn config() -> GlobalConfig {
    serde_json::from_str(
        r#"{
            "model": {"colormap": {"car": [0, 0, 200]}},
            "cameras": {"front": {"zones": {"yard": {"coordinates": "0.1,0.1,0.9,0.1,0.9,0.9"}}}}
        }"#,
    )
    .unwrap()
}

fn scene_input<'a>(
    ids: &'a [String],
    time: f64,
    events: &'a [EventMetadata],
    timeline: &'a [LifecycleRecord],
    config: &'a GlobalConfig,
) -> SceneInput<'a> {
    SceneInput {
        camera: "front",
        selected_ids: ids,
        current_time: time,
        video_width: 1280.0,
        video_height: 720.0,
        show_bounding_boxes: true,
        annotation_offset: 0.0,
        events: Some(events),
        timeline: Some(timeline),
        config: Some(config),
    }
}

fn person() -> (Vec<String>, Vec<EventMetadata>, Vec<LifecycleRecord>) {
    let ids = vec!["obj-1".to_string()];
    let events = vec![EventMetadata::new("obj-1", "person", 100.0).with_path(vec![([0.5, 0.5], 100.2)])];
    let timeline = vec![
        LifecycleRecord::new("obj-1", 100.5, ClassType::Visible)
            .with_label("person")
            .with_box(Rect::new(0.4, 0.4, 0.1, 0.2)),
    ];
    (ids, events, timeline)
}

#[test]
fn test_example_scenario() {
    let (ids, events, timeline) = person();
    let cfg = config();
    let settings = OverlaySettings::default();

    let scene = compute_scene(&scene_input(&ids, 100.5, &events, &timeline, &cfg), &settings);
    assert_eq!(scene.objects.len(), 1);
    let object = &scene.objects[0];
    assert_eq!(object.label, "person");
    assert_eq!(object.color, color_from_id("obj-1"));
    assert_eq!(object.path_points.len(), 2);

    assert_eq!(object.path_points[0].timestamp, 100.2);
    assert!(object.path_points[0].lifecycle_item.is_none());

    let derived = &object.path_points[1];
    assert_eq!(derived.timestamp, 100.5);
    assert_relative_eq!(derived.position.x, 0.45, epsilon = 1e-9);
    assert_relative_eq!(derived.position.y, 0.6, epsilon = 1e-9);
    assert_eq!(object.current_box, Some(Rect::new(0.4, 0.4, 0.1, 0.2)));

    let scene = compute_scene(&scene_input(&ids, 99.9, &events, &timeline, &cfg), &settings);
    assert!(scene.is_empty());
    assert!(render(&scene).to_svg().is_empty());
}

#[test]
fn test_path_is_time_ordered() {
    let ids = vec!["obj-1".to_string()];
    let events = vec![EventMetadata::new("obj-1", "car", 0.0).with_path(vec![
        ([0.1, 0.1], 5.0),
        ([0.2, 0.2], 1.0),
        ([0.3, 0.3], 3.0),
    ])];
    let timeline: Vec<LifecycleRecord> = [4.0, 0.5, 2.0, 2.0]
        .into_iter()
        .map(|ts| {
            LifecycleRecord::new("obj-1", ts, ClassType::Active).with_box(Rect::new(0.1, 0.1, 0.1, 0.1))
        })
        .collect();
    let cfg = config();

    let scene = compute_scene(
        &scene_input(&ids, 10.0, &events, &timeline, &cfg),
        &OverlaySettings::default(),
    );
    let ts: Vec<f64> = scene.objects[0].path_points.iter().map(|p| p.timestamp).collect();
    assert_eq!(ts.len(), 7);
    assert!(ts.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_progressive_reveal_is_monotonic() {
    let (ids, events, mut timeline) = person();
    timeline.push(
        LifecycleRecord::new("obj-1", 101.0, ClassType::Stationary).with_box(Rect::new(0.5, 0.4, 0.1, 0.2)),
    );
    let cfg = config();
    let settings = OverlaySettings::default();

    let mut previous: Vec<f64> = Vec::new();
    for step in 0..30 {
        let time = 99.8 + step as f64 * 0.05;
        let scene = compute_scene(&scene_input(&ids, time, &events, &timeline, &cfg), &settings);
        let revealed: Vec<f64> = scene
            .objects
            .first()
            .map(|o| o.path_points.iter().map(|p| p.timestamp).collect())
            .unwrap_or_default();

        assert!(revealed.len() >= previous.len(), "time={time}");
        assert_eq!(&revealed[..previous.len()], &previous[..], "time={time}");
        previous = revealed;
    }
    assert_eq!(previous.len(), 3);
}

#[test]
fn test_tolerance_symmetry() {
    let ids = vec!["obj-1".to_string()];
    let events = vec![EventMetadata::new("obj-1", "person", 50.0).with_path(vec![([0.5, 0.5], 50.0)])];
    let cfg = config();
    let settings = OverlaySettings::default();

    for (ts, matched) in [(100.010, true), (99.990, true), (100.011, false), (99.989, false)] {
        let timeline = vec![
            LifecycleRecord::new("obj-1", ts, ClassType::Active).with_box(Rect::new(0.2, 0.2, 0.1, 0.1)),
        ];
        let scene = compute_scene(&scene_input(&ids, 100.0, &events, &timeline, &cfg), &settings);
        assert_eq!(scene.objects[0].current_box.is_some(), matched, "ts={ts}");
    }

    // a point 10ms ahead is revealed, 11ms ahead is not
    for (ts, revealed) in [(100.010, 2), (100.011, 1)] {
        let timeline = vec![
            LifecycleRecord::new("obj-1", ts, ClassType::Active).with_box(Rect::new(0.2, 0.2, 0.1, 0.1)),
        ];
        let scene = compute_scene(&scene_input(&ids, 100.0, &events, &timeline, &cfg), &settings);
        assert_eq!(scene.objects[0].path_points.len(), revealed, "ts={ts}");
    }

    // zone membership uses the same forward window
    for (ts, in_zone) in [(100.010, true), (100.011, false)] {
        let timeline = vec![LifecycleRecord::new("obj-1", ts, ClassType::EnteredZone).with_zones(["yard"])];
        let scene = compute_scene(&scene_input(&ids, 100.0, &events, &timeline, &cfg), &settings);
        assert_eq!(scene.objects[0].current_zones == ["yard"], in_zone, "ts={ts}");
        assert_eq!(scene.zones.len(), usize::from(in_zone), "ts={ts}");
    }
}

#[test]
fn test_nearest_box_policy() {
    let ids = vec!["obj-1".to_string()];
    let events = vec![EventMetadata::new("obj-1", "person", 50.0)];
    let timeline = vec![
        LifecycleRecord::new("obj-1", 99.992, ClassType::Active).with_box(Rect::new(0.1, 0.1, 0.1, 0.1)),
        LifecycleRecord::new("obj-1", 100.005, ClassType::Active).with_box(Rect::new(0.3, 0.3, 0.1, 0.1)),
    ];
    let cfg = config();

    let scene = compute_scene(
        &scene_input(&ids, 100.0, &events, &timeline, &cfg),
        &OverlaySettings::default(),
    );
    assert_eq!(scene.objects[0].current_box, Some(Rect::new(0.3, 0.3, 0.1, 0.1)));
}

#[test]
fn test_color_determinism() {
    assert_eq!(color_from_id("obj-1").to_string(), color_from_id("obj-1").to_string());
    assert_ne!(color_from_id("obj-1"), color_from_id("obj-2"));
}

#[test]
fn test_empty_path_excludes_object() {
    let ids = vec!["obj-1".to_string(), "obj-2".to_string()];
    let (_, mut events, mut timeline) = person();
    // obj-2 starts later; it has zones and a box at the playback time but
    // nothing revealed yet
    events.push(EventMetadata::new("obj-2", "car", 200.0));
    timeline.push(
        LifecycleRecord::new("obj-2", 100.5, ClassType::EnteredZone)
            .with_zones(["yard"])
            .with_box(Rect::new(0.2, 0.2, 0.1, 0.1)),
    );
    let cfg = config();

    let scene = compute_scene(
        &scene_input(&ids, 100.5, &events, &timeline, &cfg),
        &OverlaySettings::default(),
    );
    assert_eq!(scene.objects.len(), 1);
    assert_eq!(scene.objects[0].object_id, "obj-1");
    assert!(scene.object("obj-2").is_none());
    assert!(scene.zones.is_empty());
}

#[test]
fn test_scale_invariance() {
    let base = ScaleFactors::for_video(1280.0, 720.0, (1280.0, 720.0));
    let doubled = ScaleFactors::for_video(2560.0, 1440.0, (1280.0, 720.0));

    assert_relative_eq!(doubled.path_stroke, 2.0 * base.path_stroke, epsilon = 1e-9);
    assert_relative_eq!(doubled.point_radius, 2.0 * base.point_radius, epsilon = 1e-9);
    assert_relative_eq!(doubled.highlight_radius, 2.0 * base.highlight_radius, epsilon = 1e-9);
    assert_relative_eq!(doubled.zone_stroke, 2.0 * base.zone_stroke, epsilon = 1e-9);
    assert_relative_eq!(doubled.box_stroke, 2.0 * base.box_stroke, epsilon = 1e-9);
}

#[test]
fn test_rendered_overlay_contents() {
    let (ids, events, mut timeline) = person();
    timeline.push(
        LifecycleRecord::new("obj-1", 100.5, ClassType::EnteredZone)
            .with_label("person")
            .with_zones(["yard"]),
    );
    let cfg = config();

    let scene = compute_scene(
        &scene_input(&ids, 100.5, &events, &timeline, &cfg),
        &OverlaySettings::default(),
    );
    let overlay = render(&scene);

    let zones = overlay.shapes.iter().filter(|s| matches!(s, Shape::Zone { .. })).count();
    let paths = overlay.shapes.iter().filter(|s| matches!(s, Shape::Path { .. })).count();
    let boxes = overlay.shapes.iter().filter(|s| matches!(s, Shape::Box { .. })).count();
    assert_eq!((zones, paths, boxes), (1, 1, 1));
    // two path points plus the current-position highlight
    assert_eq!(overlay.markers().count(), 3);

    let svg = overlay.to_svg();
    assert!(svg.contains(r#"viewBox="0 0 1280 720""#));
    assert!(svg.contains("<polygon"));
}
