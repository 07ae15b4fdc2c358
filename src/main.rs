//! An infinite-scroll terminal gallery of web fonts.
//!
//! Run the binary to browse the catalog.  Run with `--recommend <QUERY>` to
//! ask the text model for matching fonts and print them instead.

mod ai;
mod app;
mod config;
mod core;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, stdout, Stdout};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::ai::AiConfig;
use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    runtime::{self, AiUpdate},
    state::{ActiveView, AppState},
    visibility::poll_visibility,
};
use crate::core::catalog::Catalog;
use crate::core::session::SessionEvent;
use crate::core::vibe;
use crate::ui::{
    gallery::Gallery,
    header::HeaderBar,
    layout::{AppLayout, GridGeometry},
    popup,
    theme::Theme,
};

const TICK_RATE: Duration = Duration::from_millis(50);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    about = "Infinite-scroll gallery of web fonts with AI-picked sample text"
)]
struct Cli {
    /// JSON catalog (`[{"family", "category", "tags"}]`) instead of the built-in one.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Category or vibe to start with (see `--list-categories`).
    #[arg(long)]
    category: Option<String>,

    /// Preview size in px, overriding the config file.
    #[arg(long, value_parser = clap::value_parser!(u16).range(12..=120))]
    font_size: Option<u16>,

    /// Never touch the network.
    #[arg(long)]
    offline: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print AI font recommendations for a description and exit.
    #[arg(long, value_name = "QUERY")]
    recommend: Option<String>,

    /// Print the known categories and exit.
    #[arg(long)]
    list_categories: bool,
}

// ───────────────────────────────────────── logging ───────────

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // the gallery owns stdout
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area(), state.session.header_visible());
    let category_label = vibe::label_for(state.session.selected_category());

    if layout.header_area.height > 0 {
        frame.render_widget(
            HeaderBar {
                category_label,
                sample_text: state.session.sample_text(),
                font_size: state.font_size,
                status: state.session.status(),
                editing: state.active_view == ActiveView::EditText,
                tick: state.tick,
            },
            layout.header_area,
        );
    }

    frame.render_widget(
        Gallery {
            items: state.session.items(),
            loader: &state.loader,
            geometry: GridGeometry::new(layout.gallery_area, state.font_size),
            scroll_rows: state.scroll.offset(),
            selected: state.selected,
            sample_text: state.session.sample_text(),
            font_size: state.font_size,
            category_label,
            pages: state.session.pages(),
            tick: state.tick,
        },
        layout.gallery_area,
    );

    let hint = state.config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );

    match state.active_view {
        ActiveView::Gallery => {}
        ActiveView::CategoryPicker => frame.render_widget(
            popup::CategoryPickerPopup {
                selected: state.picker_selected,
                current: state.session.selected_category(),
            },
            frame.area(),
        ),
        ActiveView::EditText => frame.render_widget(
            popup::EditTextPopup {
                text: state.session.sample_text(),
            },
            frame.area(),
        ),
        ActiveView::SettingsMenu => {
            frame.render_widget(popup::SettingsPopup { state }, frame.area())
        }
        ActiveView::ControlsSubmenu => frame.render_widget(
            popup::ControlsPopup {
                config: &state.config,
                selected: state.controls_selected,
                awaiting_rebind: state.awaiting_rebind,
            },
            frame.area(),
        ),
    }
}

// ───────────────────────────────────────── event loop ────────

async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, state: &mut AppState) -> Result<()> {
    let mut events = spawn_event_reader(TICK_RATE);
    let (ai_tx, mut ai_rx) = mpsc::unbounded_channel::<AiUpdate>();

    let size = terminal.size()?;
    state.terminal_area = Rect::new(0, 0, size.width, size.height);

    loop {
        // Observers see the same geometry the frame is drawn with.
        poll_visibility(state);

        for request in std::mem::take(&mut state.pending_requests) {
            tracing::debug!(category = %request.category, vibe = %request.vibe, "requesting sample text");
            runtime::spawn_sample_text(ai_tx.clone(), state.ai_config(), request.category, request.vibe);
        }

        terminal.draw(|frame| draw(frame, state))?;

        tokio::select! {
            biased;

            event = events.recv() => {
                match event {
                    Some(AppEvent::Key(k)) => handler::handle_key(state, k),
                    Some(AppEvent::Mouse(m)) => handler::handle_mouse(state, m),
                    Some(AppEvent::Resize(w, h)) => state.terminal_area = Rect::new(0, 0, w, h),
                    Some(AppEvent::Tick) => state.on_tick(),
                    // The reader gave up on the terminal.
                    None => break,
                }
            }

            Some(update) = ai_rx.recv() => handler::handle_ai_update(state, update),
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    if cli.list_categories {
        for (group, categories) in vibe::CATEGORY_GROUPS {
            println!("{group}:");
            for category in categories.iter() {
                println!("  {:<12} {}", category.id, category.label);
            }
        }
        return Ok(());
    }

    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_json_file(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::builtin(),
    };
    if catalog.is_empty() {
        tracing::warn!("catalog has no fonts, the gallery will stay empty");
    }
    tracing::debug!(fonts = catalog.len(), "catalog loaded");

    let mut user_config = config::AppConfig::load();
    user_config.offline |= cli.offline;
    if let Some(size) = cli.font_size {
        user_config.font_size = size;
    }

    // ── recommendation mode ───────────────────────────────────
    if let Some(query) = cli.recommend.as_deref() {
        let ai_config = AiConfig::from_env(
            &user_config.model,
            Duration::from_secs(user_config.request_timeout_secs),
            user_config.offline,
        );
        let recommendation = ai::recommend(&ai_config, &catalog, query).await;
        println!("{}", recommendation.reasoning);
        for family in &recommendation.fonts {
            println!("  {family}");
        }
        return Ok(());
    }

    let mut state = AppState::new(Arc::new(catalog), user_config);
    if let Some(category) = cli.category {
        state.dispatch(SessionEvent::CategorySelected(category));
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
