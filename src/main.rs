//! Rollover TestKit - keyboard and mouse tester
//!
//! A single-executable terminal tester for key rollover, gaming combos and
//! click capture, with exportable session reports.

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::{info, warn};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::border,
    widgets::{Block, Borders},
    Frame, Terminal,
};
use std::{fs::File, io::stdout, path::Path, time::Duration};

use rollover_testkit::{
    config::Config,
    ui::{
        App, AppState, AppView, CountersPanel, HelpPanel, HistoryPanel, KeyboardVisual,
        MouseSurface, ReportPanel, ResultsPanel, StatusBar, TabBar,
    },
    utils::plural,
};

/// Log to a file in the temp directory. Stderr would corrupt the TUI.
fn init_logging(path: &Path) {
    let Ok(file) = File::create(path) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn draw_keyboard(frame: &mut Frame, app: &App, area: Rect) {
    let kb_block = Block::default()
        .title(format!(" Keyboard ({}) ", app.layout.name()))
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(app.colors.dim));
    let kb_inner = kb_block.inner(area);
    frame.render_widget(kb_block, area);
    let kb_visual = KeyboardVisual::new(app.session.capture(), app.layout, app.colors)
        .show_numpad(app.show_numpad);
    frame.render_widget(kb_visual, kb_inner);
}

fn draw(frame: &mut Frame, app: &mut App) {
    let now = Local::now();
    let size = frame.area();
    app.mouse_surface = Rect::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    let tab_names: Vec<&str> = AppView::all().iter().map(|v| v.name()).collect();
    frame.render_widget(TabBar::new(&tab_names, app.view.index(), app.colors), chunks[0]);

    match app.view {
        AppView::Keyboard => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(8), Constraint::Min(6)])
                .split(chunks[1]);
            draw_keyboard(frame, app, rows[0]);

            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(30),
                    Constraint::Percentage(40),
                    Constraint::Percentage(30),
                ])
                .split(rows[1]);

            let stats = app.session.stats();
            let top_keys: Vec<_> = stats
                .keys_by_count()
                .into_iter()
                .take(app.session.config().report.summary_top_keys)
                .collect();
            frame.render_widget(
                CountersPanel {
                    total_presses: stats.total_presses(),
                    unique_keys: app.session.capture().tested_keys().len(),
                    max_simultaneous: stats.max_simultaneous(),
                    coverage: app.session.coverage(),
                    duration_secs: stats.duration_secs(now),
                    top_keys: &top_keys,
                    colors: app.colors,
                },
                cols[0],
            );

            let keys: Vec<_> = stats.history().cloned().collect();
            let clicks: Vec<_> = app.session.mouse().history().cloned().collect();
            frame.render_widget(
                HistoryPanel {
                    keys: &keys,
                    clicks: &clicks,
                    colors: app.colors,
                },
                cols[1],
            );

            frame.render_widget(
                MouseSurface {
                    last_click: app.session.mouse().last_click(),
                    total_clicks: app.session.mouse().total_clicks(),
                    recent_counts: app.session.mouse().recent_counts(),
                    colors: app.colors,
                },
                cols[2],
            );
            app.mouse_surface = MouseSurface::surface(cols[2]);
        }
        AppView::Gaming => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(8), Constraint::Min(6)])
                .split(chunks[1]);
            draw_keyboard(frame, app, rows[0]);

            let results = app.gaming_results(now);
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, results.len().max(1) as u32); results.len()])
                .split(rows[1]);
            for (live, area) in results.iter().zip(cols.iter()) {
                frame.render_widget(
                    ResultsPanel::new(&live.results, live.name, app.colors)
                        .description(live.description),
                    *area,
                );
            }
        }
        AppView::Report => {
            let text = app.report_text(now);
            frame.render_widget(
                ReportPanel {
                    text: &text,
                    scroll: app.report_scroll,
                    colors: app.colors,
                },
                chunks[1],
            );
        }
        AppView::Help => {
            frame.render_widget(HelpPanel { colors: app.colors }, chunks[1]);
        }
    }

    let mode = if app.session.gaming().is_active() {
        "GAMING"
    } else {
        "STANDARD"
    };
    let elapsed = app.elapsed_formatted();
    let status = StatusBar::new(
        mode,
        app.view.name(),
        &elapsed,
        app.session.stats().total_presses(),
        app.colors,
    )
    .message(app.get_status());
    frame.render_widget(status, chunks[2]);
}

fn main() -> Result<()> {
    init_logging(&std::env::temp_dir().join("rollover-testkit.log"));

    let config = Config::load().unwrap_or_else(|e| {
        warn!("using default config: {}", e);
        Config::default()
    });
    let tick_rate = config.refresh_interval();
    let mut app = App::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    app.release_events = supports_keyboard_enhancement().unwrap_or(false);
    if app.release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        )?;
    } else {
        app.set_status(
            "Terminal reports no key releases - rollover limited to 1".to_string(),
        );
    }
    info!("key release events: {}", app.release_events);

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    while app.state != AppState::Quitting {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if !event::poll(tick_rate)? {
            continue;
        }
        // Drain everything queued so held keys stay in delivery order
        loop {
            match event::read()? {
                Event::Key(key) => app.handle_key(&key, Local::now()),
                Event::Mouse(mouse) => app.handle_mouse(&mouse, Local::now()),
                _ => {}
            }
            if !event::poll(Duration::ZERO)? {
                break;
            }
        }
    }

    // Cleanup terminal
    if app.release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    let stats = app.session.stats();
    println!("\nRollover TestKit session complete.");
    println!(
        "{} key {}, {} unique, max {} at once.",
        stats.total_presses(),
        plural(stats.total_presses(), "press", "presses"),
        app.session.capture().tested_keys().len(),
        stats.max_simultaneous()
    );
    println!("Session duration: {}", app.elapsed_formatted());

    Ok(())
}
