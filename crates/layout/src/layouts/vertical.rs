//! Vertical layout algorithm - stacks children top-to-bottom.

use crate::geometry::{Region, Size};

use super::{Arrangement, Axis, Layout, LayoutChild, arrange_along};

/// Vertical layout - stacks children top-to-bottom.
///
/// Heights are distributed down the column; widths fill the column unless
/// declared. This is the default layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerticalLayout;

impl Layout for VerticalLayout {
    fn arrange(&self, children: &[LayoutChild<'_>], available: Region, viewport: Size) -> Arrangement {
        let arrangement = arrange_along(Axis::Vertical, children, available, viewport);
        log::debug!(
            "vertical: {} children in {} (overflow: {:?})",
            children.len(),
            available,
            arrangement.overflow
        );
        arrangement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::IntrinsicSize;
    use tcss::EffectiveStyle;
    use tcss::parser::StyleRule;

    fn style(declarations: &str) -> EffectiveStyle {
        let rule = StyleRule::parse("Node", declarations).unwrap();
        tcss::resolve([&rule])
    }

    fn arrange(styles: &[EffectiveStyle], intrinsic: &[Option<i32>], available: Region) -> Arrangement {
        let children: Vec<LayoutChild<'_>> = styles
            .iter()
            .zip(intrinsic)
            .map(|(style, &height)| LayoutChild {
                style,
                intrinsic: IntrinsicSize::new(None, height),
            })
            .collect();
        VerticalLayout.arrange(&children, available, available.size())
    }

    #[test]
    fn test_dashboard_column() {
        // Metrics strip, table, filter bar.
        let styles = [style("height: 5;"), style("height: 1fr;"), style("height: auto;")];
        let arrangement = arrange(&styles, &[None, None, Some(3)], Region::new(0, 0, 80, 24));

        let heights: Vec<i32> = arrangement.regions.iter().map(|r| r.height).collect();
        assert_eq!(heights, vec![5, 16, 3]);
        let ys: Vec<i32> = arrangement.regions.iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![0, 5, 21]);
        assert!(arrangement.regions.iter().all(|r| r.width == 80));
    }

    #[test]
    fn test_97_split_three_ways() {
        let styles = [style("height: 1fr;"), style("height: 1fr;"), style("height: 1fr;")];
        let arrangement = arrange(&styles, &[None; 3], Region::new(0, 0, 10, 97));

        let heights: Vec<i32> = arrangement.regions.iter().map(|r| r.height).collect();
        assert_eq!(heights, vec![33, 32, 32]);
        assert_eq!(heights.iter().sum::<i32>(), 97);
    }

    #[test]
    fn test_declared_width_and_max_height() {
        let styles = [style("width: 50%; height: 2fr; max-height: 6;"), style("height: 1fr;")];
        let arrangement = arrange(&styles, &[None, None], Region::new(0, 2, 40, 30));

        assert_eq!(arrangement.regions[0], Region::new(0, 2, 20, 6));
        assert_eq!(arrangement.regions[1], Region::new(0, 8, 40, 24));
    }

    #[test]
    fn test_minmax_floor_on_fraction() {
        let styles = [style("height: minmax(10, 1fr);"), style("height: 3fr;")];
        let arrangement = arrange(&styles, &[None, None], Region::new(0, 0, 10, 20));

        // 1fr of 20 is 5, raised to 10; the other share pays for it.
        let heights: Vec<i32> = arrangement.regions.iter().map(|r| r.height).collect();
        assert_eq!(heights, vec![10, 10]);
    }
}
