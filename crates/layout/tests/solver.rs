use tcss::EffectiveStyle;
use tcss::parser::StyleRule;
use tcss::types::Layout;
use tcss_layout::{IntrinsicSize, LayoutChild, Region, Size, solve};

fn style(declarations: &str) -> EffectiveStyle {
    let rule = StyleRule::parse("Static", declarations).unwrap();
    tcss::resolve([&rule])
}

fn widths(declarations: &[&str], width: i32) -> Vec<i32> {
    let styles: Vec<EffectiveStyle> = declarations.iter().map(|d| style(d)).collect();
    let children: Vec<LayoutChild<'_>> = styles
        .iter()
        .map(|style| LayoutChild {
            style,
            intrinsic: IntrinsicSize::default(),
        })
        .collect();
    let available = Region::new(0, 0, width, 10);
    solve(Layout::Horizontal, &children, available, Size::new(width, 10))
        .regions
        .iter()
        .map(|r| r.width)
        .collect()
}

#[test]
fn test_one_two_one_of_100() {
    assert_eq!(
        widths(&["width: 1fr;", "width: 2fr;", "width: 1fr;"], 100),
        vec![25, 50, 25]
    );
}

#[test]
fn test_thirds_of_97() {
    let result = widths(&["width: 1fr;", "width: 1fr;", "width: 1fr;"], 97);
    assert_eq!(result, vec![33, 32, 32]);
    assert_eq!(result.iter().sum::<i32>(), 97);
}

#[test]
fn test_unclamped_rows_fill_exactly() {
    let rows: [&[&str]; 4] = [
        &["width: 1fr;", "width: 3fr;"],
        &["width: 7;", "width: 1fr;", "width: 2fr;"],
        &["width: 25%;", "width: 1fr;", "width: 1fr;", "width: 1fr;"],
        &["width: 0.5fr;", "width: 1.5fr;", "width: 10%;"],
    ];
    for row in rows {
        for width in [13, 59, 60, 97, 119, 120, 211] {
            let total: i32 = widths(row, width).iter().sum();
            assert_eq!(total, width, "{row:?} in {width}");
        }
    }
}

#[test]
fn test_doubling_weights_changes_nothing() {
    let single = ["width: 1fr;", "width: 3fr;", "width: 10;", "width: 2fr; max-width: 20;"];
    let double = ["width: 2fr;", "width: 6fr;", "width: 10;", "width: 4fr; max-width: 20;"];
    for width in [17, 50, 83, 140] {
        assert_eq!(widths(&single, width), widths(&double, width), "at {width}");
    }
}

#[test]
fn test_percent_is_reserved_before_fractions() {
    assert_eq!(
        widths(&["width: 50%;", "width: 1fr;", "width: 1fr;"], 80),
        vec![40, 20, 20]
    );
}

#[test]
fn test_overflowing_reservations_starve_fractions() {
    let styles = [style("width: 70%;"), style("width: 1fr;"), style("width: 40;")];
    let children: Vec<LayoutChild<'_>> = styles
        .iter()
        .map(|style| LayoutChild {
            style,
            intrinsic: IntrinsicSize::default(),
        })
        .collect();

    let arrangement = solve(
        Layout::Horizontal,
        &children,
        Region::new(0, 0, 100, 5),
        Size::new(100, 5),
    );

    let overflow = arrangement.overflow.expect("reservations exceed the container");
    assert_eq!(overflow.available, 100);
    assert_eq!(overflow.required, 110);
    let result: Vec<i32> = arrangement.regions.iter().map(|r| r.width).collect();
    assert_eq!(result, vec![70, 0, 40]);
}

#[test]
fn test_all_zero_weights_get_nothing() {
    assert_eq!(widths(&["width: 0fr;", "width: 0fr;"], 40), vec![0, 0]);
}

#[test]
fn test_tiny_weights_keep_their_ratio() {
    let tiny = ["width: 0.0004fr;", "width: 0.0006fr;"];
    let doubled = ["width: 0.0008fr;", "width: 0.0012fr;"];
    assert_eq!(widths(&tiny, 100), vec![40, 60]);
    for width in [7, 100, 133] {
        assert_eq!(widths(&tiny, width), widths(&doubled, width), "at {width}");
    }
}

#[test]
fn test_huge_fixed_widths_overflow_without_wrapping() {
    for declarations in [
        ["width: 2000000000;", "width: 2000000000;", "width: 1;"],
        ["width: 3000000000;", "width: 3000000000;", "width: 1fr;"],
    ] {
        let styles: Vec<EffectiveStyle> = declarations.iter().map(|d| style(d)).collect();
        let children: Vec<LayoutChild<'_>> = styles
            .iter()
            .map(|style| LayoutChild {
                style,
                intrinsic: IntrinsicSize::default(),
            })
            .collect();

        let arrangement = solve(
            Layout::Horizontal,
            &children,
            Region::new(0, 0, 100, 5),
            Size::new(100, 5),
        );

        let overflow = arrangement.overflow.expect("reservations exceed the container");
        assert_eq!(overflow.required, i32::MAX, "{declarations:?}");
        assert_eq!(arrangement.regions[2].x, i32::MAX);
    }
}
