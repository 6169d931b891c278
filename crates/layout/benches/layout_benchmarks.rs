use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tcss::parser::StyleRule;
use tcss::{EffectiveStyle, NodeMeta, RuleStore};
use tcss_layout::{
    EngineConfig, Event, IntrinsicSize, LayoutChild, LayoutEngine, NoMeasure, Region, Size, UiTree,
    grid_rules, solve,
};

fn styles(count: usize) -> Vec<EffectiveStyle> {
    (0..count)
        .map(|i| {
            let declarations = match i % 4 {
                0 => "width: 1fr;",
                1 => "width: 10; margin: 0 1;",
                2 => "width: 2fr; min-width: 8;",
                _ => "width: 15%; max-width: 30;",
            };
            let rule = StyleRule::parse("Node", declarations).unwrap();
            tcss::resolve([&rule])
        })
        .collect()
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_horizontal");

    for count in [3, 12, 48] {
        let styles = styles(count);
        let children: Vec<LayoutChild<'_>> = styles
            .iter()
            .map(|style| LayoutChild {
                style,
                intrinsic: IntrinsicSize::default(),
            })
            .collect();
        let available = Region::new(0, 0, 200, 50);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("children", count), &children, |b, children| {
            b.iter(|| {
                solve(
                    tcss::types::Layout::Horizontal,
                    black_box(children),
                    black_box(available),
                    Size::new(200, 50),
                )
            })
        });
    }

    group.finish();
}

const CSS: &str = r#"
Screen { layout: horizontal; }
#app { width: 1fr; }
.strip { layout: horizontal; height: 5; }
.cell { height: 1fr; }
#table { height: 1fr; }
"#;

/// A grid-driven screen: `rows` strips of twelve responsive cells.
fn engine(rows: usize) -> LayoutEngine<NoMeasure> {
    let mut tree = UiTree::new(NodeMeta::new("Screen"));
    let root = tree.root();
    let app = tree.add_child(root, NodeMeta::new("Vertical").with_id("app")).unwrap();
    for _ in 0..rows {
        let strip = tree
            .add_child(app, NodeMeta::new("Horizontal").with_classes("strip"))
            .unwrap();
        for n in 0..12 {
            let classes = if n % 3 == 0 {
                "cell col col-lg-2 col-md-3 col-sm-6"
            } else {
                "cell col col-lg-1 col-md-1"
            };
            tree.add_child(strip, NodeMeta::new("Metric").with_classes(classes))
                .unwrap();
        }
    }
    tree.add_child(app, NodeMeta::new("DataTable").with_id("table"))
        .unwrap();

    let rules = grid_rules()
        .unwrap()
        .into_iter()
        .chain(tcss::parser::parse_stylesheet(CSS).unwrap().into_rules());
    let store = RuleStore::load(rules).unwrap();
    LayoutEngine::new(
        tree,
        store,
        NoMeasure,
        EngineConfig::default().with_breakpoint_host("app"),
    )
}

fn bench_relayout(c: &mut Criterion) {
    let mut group = c.benchmark_group("relayout");

    for rows in [1, 4, 16] {
        let mut engine = engine(rows);
        engine.post(Event::Resize { width: 120, height: 40 });
        engine.frame().unwrap();

        group.bench_function(BenchmarkId::new("clean", rows), |b| {
            b.iter(|| engine.frame().unwrap())
        });

        // Alternating across the md/lg threshold restyles the whole app.
        let mut wide = false;
        group.bench_function(BenchmarkId::new("resize_across_tier", rows), |b| {
            b.iter(|| {
                wide = !wide;
                let width = if wide { 140 } else { 100 };
                engine.post(Event::Resize { width, height: 40 });
                engine.frame().unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_solve, bench_relayout);
criterion_main!(benches);
