use std::io::{Stdout, Write};
use std::time::Duration;

use crossterm::event::{Event as TermEvent, EventStream, KeyCode, KeyEventKind};
use crossterm::style::Print;
use crossterm::{cursor, execute, queue, terminal};
use futures::StreamExt;
use netdash::{ContentMeasure, DASHBOARD_TCSS, Dashboard, Result, stylesheet};
use tcss::NodeMeta;
use tcss_layout::{Event, Frame, LayoutEngine, UiTree, init_logger};

const TICK: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    if let Ok(path) = std::env::var("NETDASH_LOG") {
        init_logger(path)?;
    }

    // Stylesheet errors abort before the terminal is touched.
    let rules = match std::env::args().nth(1) {
        Some(path) => stylesheet(&std::fs::read_to_string(path)?)?,
        None => stylesheet(DASHBOARD_TCSS)?,
    };
    log::info!("netdash: {} style rules", rules.len());
    let (tree, dashboard) = Dashboard::build()?;
    let mut engine = LayoutEngine::new(tree, rules, Dashboard::content(), Dashboard::config());

    let mut stdout = std::io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut engine, &dashboard, &mut stdout).await;

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

async fn run(
    engine: &mut LayoutEngine<ContentMeasure>,
    dashboard: &Dashboard,
    stdout: &mut Stdout,
) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    engine.post(Event::Resize {
        width: i32::from(cols),
        height: i32::from(rows),
    });

    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK);

    loop {
        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => {
                                log::info!("netdash: quit after {} frames", engine.generation());
                                break;
                            }
                            KeyCode::Char('f') => engine.toggle_visible(dashboard.filter_input)?,
                            KeyCode::Char('x') => engine.toggle_visible(dashboard.help_panel)?,
                            _ => {}
                        }
                    }
                    Some(Ok(TermEvent::Resize(width, height))) => {
                        engine.post(Event::Resize {
                            width: i32::from(width),
                            height: i32::from(height),
                        });
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }

            _ = ticker.tick() => {
                if engine.has_pending() {
                    let frame = engine.frame()?;
                    paint(stdout, engine.tree(), &frame)?;
                }
            }
        }
    }

    Ok(())
}

/// Lists the committed geometry, one node per row.
fn paint(stdout: &mut Stdout, tree: &UiTree, frame: &Frame) -> Result<()> {
    let rows = usize::try_from(frame.viewport.height).unwrap_or(0);
    let tier = frame.tier.map_or_else(|| "-".to_string(), |t| t.to_string());

    queue!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0),
        Print(format!(
            "frame {}  {}x{}  tier {}  overflows {}",
            frame.generation,
            frame.viewport.width,
            frame.viewport.height,
            tier,
            frame.overflows.len()
        ))
    )?;

    for (row, (id, region)) in frame.geometry.iter().enumerate().take(rows.saturating_sub(1)) {
        let Some(node) = tree.get(*id) else {
            continue;
        };
        let depth = tree.ancestors(*id)?.len();
        let line = format!("{}{:<40} {}", "  ".repeat(depth), describe(node.meta()), region);
        queue!(stdout, cursor::MoveTo(0, (row + 1) as u16), Print(line))?;
    }

    stdout.flush()?;
    Ok(())
}

fn describe(meta: &NodeMeta) -> String {
    match (&meta.id, meta.classes.first()) {
        (Some(id), _) => format!("{}#{}", meta.type_name, id),
        (None, Some(class)) => format!("{}.{}", meta.type_name, class),
        (None, None) => meta.type_name.to_string(),
    }
}
