//! The network-monitoring dashboard: its stylesheet and node tree.
//!
//! ```text
//! Screen
//! ├── Horizontal#screen_body
//! │   ├── Vertical#app_vertical            (breakpoint host)
//! │   │   ├── Container#metrics_container
//! │   │   │   └── Horizontal
//! │   │   │       ├── Horizontal.col-8
//! │   │   │       │   └── IconLabelMetric.metrics.col-4 ×3
//! │   │   │       └── IconMetric.metrics.col-2 ×2
//! │   │   ├── Horizontal#table_container
//! │   │   │   └── DataTable#table_connections
//! │   │   │       └── DataColumn#column_<key> ×7  (.responsive on addresses)
//! │   │   └── Collapsible#filter_collapsible
//! │   │       ├── CollapsibleTitle#filter_title
//! │   │       └── Input#filter_input
//! │   └── HelpPanel#help_panel             (hidden until toggled)
//! └── Footer
//! ```

use tcss::parser::parse_stylesheet;
use tcss::{NodeMeta, RuleStore};
use tcss_layout::{EngineConfig, NodeId, UiTree, grid_rules};

use crate::content::ContentMeasure;
use crate::error::Result;

pub const DASHBOARD_TCSS: &str = r#"
Screen {
    layout: vertical;
    background: $background;
}

#screen_body {
    layout: horizontal;
    height: 1fr;
}

#app_vertical {
    width: 1fr;
}

#metrics_container {
    height: 5;
}

#metrics_container Horizontal {
    layout: horizontal;
}

#metrics_container > Horizontal {
    height: 1fr;
}

.metrics {
    layout: horizontal;
    margin: 0 1;
    border: round $primary;
    text-align: center;
}

.metrics Label {
    text-overflow: ellipsis;
}

.icons {
    color: $secondary;
}

.metric_value {
    color: $accent;
    text-style: bold;
}

#table_container {
    layout: horizontal;
    height: 1fr;
}

#table_connections {
    layout: horizontal;
    width: 1fr;
    border: none;
}

DataColumn {
    margin: 0 1;
}

#column_pid {
    width: 10;
}

#column_name, #column_protocol {
    width: 15;
}

#column_status {
    width: 12;
}

.responsive {
    width: minmax(20, 1fr);
}

#filter_collapsible {
    height: auto;
    border-top: hkey $primary;
}

#filter_input {
    height: 3;
    margin: 0 1;
}

#help_panel {
    width: 33%;
    min-width: 30;
    max-width: 60;
    padding: 1 2;
    background: $panel;
    border-left: vkey $primary;
}

Footer {
    height: 1;
    color: $footer-foreground;
}
"#;

/// Element id of the node whose width picks the breakpoint tier.
pub const BREAKPOINT_HOST: &str = "app_vertical";

/// Metric widgets in display order: element id and whether it has a text
/// label next to its icon.
const METRICS: [(&str, bool); 5] = [
    ("metric_nb_connections", true),
    ("metric_nb_actives", true),
    ("metric_nb_listening", true),
    ("metric_bandwidth_in", false),
    ("metric_bandwidth_out", false),
];

/// Table columns in display order. Responsive columns split the space the
/// fixed ones leave, never going below their minimum.
const COLUMNS: [(&str, bool); 7] = [
    ("pid", false),
    ("name", false),
    ("protocol", false),
    ("laddr", true),
    ("raddr", true),
    ("status", false),
    ("ns", true),
];

const HELP: &str = "\
q  Quit
f  Filter connections
s  Sort by status
t  Sort by pid
y  Sort by name
u  Sort by protocol
i  Sort by local address
o  Sort by remote address
p  Sort by hostname
x  Show/Hide shortcuts
e  Show/Hide icons";

/// Handles to the nodes the application drives.
#[derive(Clone, Debug)]
pub struct Dashboard {
    pub screen_body: NodeId,
    pub app: NodeId,
    pub metrics_container: NodeId,
    pub metrics: [NodeId; 5],
    pub table: NodeId,
    /// One node per table column, in display order.
    pub columns: Vec<NodeId>,
    pub filter: NodeId,
    pub filter_input: NodeId,
    pub help_panel: NodeId,
    pub footer: NodeId,
}

impl Dashboard {
    /// Mounts the dashboard's nodes. The help panel starts hidden.
    pub fn build() -> Result<(UiTree, Dashboard)> {
        let mut tree = UiTree::new(NodeMeta::new("Screen"));
        let root = tree.root();

        let screen_body = tree.add_child(root, NodeMeta::new("Horizontal").with_id("screen_body"))?;
        let app = tree.add_child(screen_body, NodeMeta::new("Vertical").with_id(BREAKPOINT_HOST))?;

        let metrics_container =
            tree.add_child(app, NodeMeta::new("Container").with_id("metrics_container"))?;
        let strip = tree.add_child(metrics_container, NodeMeta::new("Horizontal"))?;
        let counters = tree.add_child(strip, NodeMeta::new("Horizontal").with_classes("col-8"))?;

        let mut metrics = Vec::with_capacity(METRICS.len());
        for (id, labelled) in METRICS {
            let (parent, type_name, classes) = if labelled {
                (counters, "IconLabelMetric", "metrics col-4")
            } else {
                (strip, "IconMetric", "metrics col-2")
            };
            let metric = tree.add_child(parent, NodeMeta::new(type_name).with_id(id).with_classes(classes))?;
            let labels: &[&str] = if labelled {
                &[
                    "col col-lg-2 col-md-4 icons",
                    "col col-lg-6 metric_label",
                    "col col-lg-4 col-md-8 col-sm-12 metric_value",
                ]
            } else {
                &[
                    "col col-lg-4 col-md-3 icons",
                    "col col-lg-8 col-md-9 col-sm-12 metric_value",
                ]
            };
            for classes in labels {
                tree.add_child(metric, NodeMeta::new("Label").with_classes(classes))?;
            }
            metrics.push(metric);
        }
        let metrics: [NodeId; 5] = [metrics[0], metrics[1], metrics[2], metrics[3], metrics[4]];

        let table_container = tree.add_child(app, NodeMeta::new("Horizontal").with_id("table_container"))?;
        let table = tree.add_child(
            table_container,
            NodeMeta::new("DataTable").with_id("table_connections"),
        )?;
        let mut columns = Vec::with_capacity(COLUMNS.len());
        for (key, responsive) in COLUMNS {
            let mut meta = NodeMeta::new("DataColumn").with_id(format!("column_{key}"));
            if responsive {
                meta = meta.with_classes("responsive");
            }
            columns.push(tree.add_child(table, meta)?);
        }

        let filter = tree.add_child(app, NodeMeta::new("Collapsible").with_id("filter_collapsible"))?;
        tree.add_child(filter, NodeMeta::new("CollapsibleTitle").with_id("filter_title"))?;
        let filter_input = tree.add_child(filter, NodeMeta::new("Input").with_id("filter_input"))?;

        let help_panel = tree.add_child(screen_body, NodeMeta::new("HelpPanel").with_id("help_panel"))?;
        tree.set_visible(help_panel, false)?;

        let footer = tree.add_child(root, NodeMeta::new("Footer"))?;

        let dashboard = Dashboard {
            screen_body,
            app,
            metrics_container,
            metrics,
            table,
            columns,
            filter,
            filter_input,
            help_panel,
            footer,
        };
        Ok((tree, dashboard))
    }

    /// Texts of the leaves whose size follows their content.
    pub fn content() -> ContentMeasure {
        ContentMeasure::new()
            .with_text("filter_title", "▼ Filter")
            .with_text("help_panel", HELP)
            .with_type_text("Footer", " q Quit  x Help  f Filter ")
    }

    pub fn config() -> EngineConfig {
        EngineConfig::default().with_breakpoint_host(BREAKPOINT_HOST)
    }
}

/// Loads `source` behind the 12-unit grid rules.
pub fn stylesheet(source: &str) -> Result<RuleStore> {
    let rules = grid_rules()?
        .into_iter()
        .chain(parse_stylesheet(source)?.into_rules());
    Ok(RuleStore::load(rules)?)
}

/// Width left for the application frame: the whole screen, minus the help
/// panel's `clamp(33%, 30, 60)` when it is open.
pub fn renderable_width(screen_width: i32, help_open: bool) -> i32 {
    if help_open {
        screen_width - (screen_width * 33 / 100).clamp(30, 60)
    } else {
        screen_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_stylesheet_loads() {
        let store = stylesheet(DASHBOARD_TCSS).unwrap();
        assert!(store.len() > grid_rules().unwrap().len());
    }

    #[test]
    fn tree_mirrors_the_widget_hierarchy() {
        let (tree, dashboard) = Dashboard::build().unwrap();

        assert_eq!(tree.find("app_vertical"), Some(dashboard.app));
        assert_eq!(tree.get(dashboard.metrics[0]).unwrap().children().len(), 3);
        assert_eq!(tree.get(dashboard.metrics[4]).unwrap().children().len(), 2);
        assert!(!tree.get(dashboard.help_panel).unwrap().is_visible());
        assert_eq!(tree.get(tree.root()).unwrap().children(), &[dashboard.screen_body, dashboard.footer]);
        assert_eq!(tree.get(dashboard.table).unwrap().children(), dashboard.columns.as_slice());
        assert!(tree.get(dashboard.columns[3]).unwrap().meta().has_class("responsive"));
        assert!(!tree.get(dashboard.columns[5]).unwrap().meta().has_class("responsive"));
    }

    #[test]
    fn renderable_width_matches_help_panel_clamp() {
        assert_eq!(renderable_width(120, false), 120);
        assert_eq!(renderable_width(120, true), 81);
        assert_eq!(renderable_width(80, true), 50);
        assert_eq!(renderable_width(200, true), 140);
    }
}
