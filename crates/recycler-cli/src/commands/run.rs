use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use tracing::info;

use recycler_core::AppConfig;
use recycler_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    widgets,
};

pub async fn run(config: AppConfig) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Fast polling while an animation runs, idle tick rate otherwise
    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.scroll.animation_fps);

    let mut app = App::new(config)?;
    info!(items = app.scroller.len(), "starting TUI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Recycler"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &keymap, &event_handler);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    keymap: &Keymap,
    event_handler: &EventHandler,
) -> Result<()> {
    let mut last_frame = Instant::now();
    let mut was_animating = false;

    loop {
        // Only time spent animating advances the animation
        let now = Instant::now();
        let dt = if was_animating {
            now.duration_since(last_frame)
        } else {
            Duration::ZERO
        };
        last_frame = now;
        app.on_tick(dt);

        terminal.draw(|frame| widgets::draw(frame, app))?;

        let event = if app.is_animating() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    app.handle_action(action);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                // The next draw measures the new list area
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }

        was_animating = app.is_animating();

        if app.should_quit {
            break;
        }
    }

    info!("leaving TUI");
    Ok(())
}
