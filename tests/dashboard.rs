use netdash::{ContentMeasure, DASHBOARD_TCSS, Dashboard, renderable_width, stylesheet};
use tcss_layout::{Event, Frame, LayoutEngine, NodeId, Region, Tier};

fn engine() -> (LayoutEngine<ContentMeasure>, Dashboard) {
    let (tree, dashboard) = Dashboard::build().unwrap();
    let rules = stylesheet(DASHBOARD_TCSS).unwrap();
    let engine = LayoutEngine::new(tree, rules, Dashboard::content(), Dashboard::config());
    (engine, dashboard)
}

fn resized(width: i32, height: i32) -> (LayoutEngine<ContentMeasure>, Dashboard, Frame) {
    let (mut engine, dashboard) = engine();
    engine.post(Event::Resize { width, height });
    let frame = engine.frame().unwrap();
    (engine, dashboard, frame)
}

fn labels(engine: &LayoutEngine<ContentMeasure>, metric: NodeId) -> Vec<NodeId> {
    engine.tree().get(metric).unwrap().children().to_vec()
}

#[test]
fn test_full_width_layout() {
    let (_, dash, frame) = resized(120, 40);

    assert_eq!(frame.tier, Some(Tier::Lg));
    assert_eq!(frame.region(dash.app), Some(Region::new(0, 0, 120, 39)));
    assert_eq!(frame.region(dash.footer), Some(Region::new(0, 39, 120, 1)));
    assert_eq!(frame.region(dash.metrics_container), Some(Region::new(0, 0, 120, 5)));
    assert_eq!(frame.region(dash.table), Some(Region::new(0, 5, 120, 30)));
    assert_eq!(frame.region(dash.filter), Some(Region::new(0, 35, 120, 4)));
    assert_eq!(frame.region(dash.filter_input), Some(Region::new(1, 36, 118, 3)));
    assert_eq!(frame.region(dash.help_panel), None);
    // The address columns need 126 cells at their minimum widths.
    assert!(frame.overflows.iter().all(|o| o.node == dash.table));
}

#[test]
fn test_metric_strip_follows_the_grid() {
    let (engine, dash, frame) = resized(120, 40);

    // col-8 | col-2 | col-2 over 116 cells after margins.
    let widths: Vec<i32> = dash.metrics.iter().map(|m| frame.region(*m).unwrap().width).collect();
    assert_eq!(widths, vec![24, 24, 24, 19, 19]);
    assert_eq!(frame.region(dash.metrics[0]), Some(Region::new(1, 0, 24, 5)));
    assert_eq!(frame.region(dash.metrics[3]), Some(Region::new(79, 0, 19, 5)));

    let label_widths: Vec<i32> = labels(&engine, dash.metrics[0])
        .iter()
        .map(|l| frame.region(*l).unwrap().width)
        .collect();
    assert_eq!(label_widths, vec![4, 12, 8]);
}

#[test]
fn test_table_columns_share_what_fixed_columns_leave() {
    let (_, dash, frame) = resized(200, 40);

    // 200 - 52 fixed - 14 margin cells leaves 134 for three responsive columns.
    let widths: Vec<i32> = dash.columns.iter().map(|c| frame.region(*c).unwrap().width).collect();
    assert_eq!(widths, vec![10, 15, 15, 45, 45, 12, 44]);
    assert_eq!(frame.region(dash.columns[0]), Some(Region::new(1, 5, 10, 30)));
    assert!(frame.overflows.iter().all(|o| o.node != dash.table));
}

#[test]
fn test_responsive_columns_keep_their_minimum() {
    let (_, dash, frame) = resized(120, 40);

    let widths: Vec<i32> = dash.columns.iter().map(|c| frame.region(*c).unwrap().width).collect();
    assert_eq!(widths, vec![10, 15, 15, 20, 20, 12, 20]);
    let overflow = frame
        .overflows
        .iter()
        .find(|o| o.node == dash.table)
        .expect("table is wider than the screen");
    assert_eq!(overflow.condition.available, 120);
    assert_eq!(overflow.condition.required, 126);
}

#[test]
fn test_narrow_screen_shows_values_only() {
    let (engine, dash, frame) = resized(50, 20);
    assert_eq!(frame.tier, Some(Tier::Sm));

    for metric in dash.metrics {
        let metric_width = frame.region(metric).unwrap().width;
        let labels = labels(&engine, metric);
        let (value, hidden) = labels.split_last().unwrap();
        assert_eq!(frame.region(*value).unwrap().width, metric_width);
        for label in hidden {
            assert!(frame.region(*label).unwrap().is_empty());
        }
    }
}

#[test]
fn test_help_panel_takes_a_clamped_third() {
    let (mut engine, dash, _) = resized(120, 40);

    engine.toggle_visible(dash.help_panel).unwrap();
    let frame = engine.frame().unwrap();

    assert_eq!(frame.region(dash.help_panel), Some(Region::new(81, 0, 39, 39)));
    assert_eq!(frame.region(dash.app).map(|r| r.width), Some(81));
    assert_eq!(frame.tier, Some(Tier::Md));

    // The label column disappears at md.
    let metric_labels = labels(&engine, dash.metrics[0]);
    assert!(frame.region(metric_labels[1]).unwrap().is_empty());

    engine.toggle_visible(dash.help_panel).unwrap();
    let frame = engine.frame().unwrap();
    assert_eq!(frame.region(dash.help_panel), None);
    assert_eq!(frame.tier, Some(Tier::Lg));
}

#[test]
fn test_renderable_width_for_every_screen() {
    for width in [40, 61, 80, 90, 119, 120, 150, 181, 200, 250] {
        let (mut engine, dash, frame) = resized(width, 30);
        assert_eq!(frame.region(dash.app).map(|r| r.width), Some(renderable_width(width, false)));

        engine.toggle_visible(dash.help_panel).unwrap();
        let frame = engine.frame().unwrap();
        let app_width = renderable_width(width, true);
        assert_eq!(frame.region(dash.app).map(|r| r.width), Some(app_width), "screen {width}");
        assert_eq!(
            frame.tier,
            Some(Dashboard::config().breakpoints.tier_for(app_width)),
            "screen {width}"
        );
    }
}

#[test]
fn test_collapsing_the_filter_grows_the_table() {
    let (mut engine, dash, _) = resized(120, 40);

    engine.toggle_visible(dash.filter_input).unwrap();
    let frame = engine.frame().unwrap();

    assert_eq!(frame.region(dash.filter_input), None);
    assert_eq!(frame.region(dash.filter), Some(Region::new(0, 38, 120, 1)));
    assert_eq!(frame.region(dash.table).map(|r| r.height), Some(33));
}

#[test]
fn test_short_screen_reports_overflow() {
    let (_, dash, frame) = resized(120, 8);

    let overflow = frame
        .overflows
        .iter()
        .find(|o| o.node == dash.app)
        .expect("app column overflows");
    assert_eq!(overflow.condition.available, 7);
    assert_eq!(overflow.condition.required, 9);
    assert_eq!(frame.region(dash.table).map(|r| r.height), Some(0));
}

#[test]
fn test_resizes_between_frames_coalesce() {
    let (mut engine, dash, first) = resized(80, 24);
    engine.post(Event::Resize { width: 100, height: 30 });
    engine.post(Event::Resize { width: 130, height: 45 });

    let frame = engine.frame().unwrap();
    assert_eq!(frame.generation, first.generation + 1);
    assert_eq!(frame.region(dash.app), Some(Region::new(0, 0, 130, 44)));
    assert_eq!(frame.tier, Some(Tier::Lg));
}

#[test]
fn test_painter_tokens_pass_through() {
    let (_, dash, frame) = resized(120, 40);

    let tokens = frame.tokens_of(dash.metrics[0]);
    assert!(tokens.contains(&("border".to_string(), "round $primary".to_string())));
    assert!(tokens.contains(&("text-align".to_string(), "center".to_string())));
}

#[test]
fn test_broken_stylesheet_is_rejected() {
    assert!(stylesheet("#app_vertical > { width: 1fr; }").is_err());
    assert!(stylesheet("#app_vertical { width: 1fr; ").is_err());
}
