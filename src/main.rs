mod app;
mod config;
mod game;
mod logging;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use crate::game::{GameController, GameEvent, TapOutcome};
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use tokio::sync::mpsc;
use tokio::time::Instant;

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let cfg = config::load_config()?;
    logging::init(&cfg.logging)?;
    tracing::info!("cardfan starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, cfg).await;

    restore_terminal()?;
    tracing::info!("cardfan exiting");

    if let Err(e) = result {
        tracing::error!("Fatal error: {:#}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let (game_tx, mut game_rx) = mpsc::unbounded_channel::<GameEvent>();

    let controller = GameController::new(cfg.animation.effective_time_scale(), game_tx);
    let mut state = AppState::new(cfg.clone());
    let size = terminal.size()?;
    state.viewport = Rect::new(0, 0, size.width, size.height);

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Forward game notifications into the main loop
    let notify_tx = event_tx.clone();
    tokio::spawn(async move {
        while let Some(event) = game_rx.recv().await {
            if notify_tx.send(AppEvent::Game(event)).is_err() {
                break;
            }
        }
    });

    // Spawn tick task
    let tick_tx = event_tx.clone();
    let tick_interval = cfg.ui.tick_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_interval);
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    state.system_message("Press Enter, Space or m to Match; q to quit.".to_string());

    // Initial render, then deal the fan now that the table is visible
    terminal.draw(|f| ui::render(f, &state, &controller.snapshot(Instant::now())))?;
    state.dirty = false;
    controller.appear();

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let actions = handler::handle_event(&mut state, event);

        for action in actions {
            match action {
                Action::PressButton => {
                    if let Some(TapOutcome::Ignored(game_state)) = controller.press_button() {
                        state.system_message(format!("Nothing to do while {}", game_state));
                    }
                }
                Action::Quit => {
                    state.should_quit = true;
                }
            }
        }

        if state.should_quit {
            controller.shutdown();
            break;
        }

        if controller.is_animating() {
            state.dirty = true;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            let view = controller.snapshot(Instant::now());
            terminal.draw(|f| ui::render(f, &state, &view))?;
            state.dirty = false;
        }
    }

    Ok(())
}
