//! The foreground render/input loop.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use tracing::{debug, info};

use crate::board::SharedViewport;
use crate::shutdown::Shutdown;

use super::input::Action;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Runs the dashboard UI until the user quits or `shutdown` fires.
///
/// Blocking: call from a dedicated thread (e.g. `spawn_blocking`), never
/// from inside an async task, since the viewport lock is taken with
/// `blocking_lock`.
pub struct BoardUi {
    viewport: SharedViewport,
    render_interval: Duration,
    shutdown: Shutdown,
}

impl BoardUi {
    pub fn new(viewport: SharedViewport, render_interval: Duration, shutdown: Shutdown) -> Self {
        Self {
            viewport,
            render_interval,
            shutdown,
        }
    }

    /// Take over the terminal, run the loop, and hand the terminal back.
    ///
    /// The terminal is restored even when the loop fails; the loop error
    /// wins over a restore error.
    pub fn run(self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(e);
        }

        let result = Terminal::new(CrosstermBackend::new(stdout))
            .and_then(|mut terminal| self.event_loop(&mut terminal).map(|()| terminal));

        let restored = restore_terminal();
        match result {
            Ok(mut terminal) => {
                restored?;
                terminal.show_cursor()
            }
            Err(e) => Err(e),
        }
    }

    fn event_loop(&self, terminal: &mut Term) -> io::Result<()> {
        info!("ui started");
        let mut next_tick = Instant::now();

        loop {
            if self.shutdown.is_triggered() {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                self.draw(terminal)?;
                next_tick = now + self.render_interval;
            }

            let timeout = next_tick.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                continue;
            }

            let Some(action) = Action::from_event(&event::read()?) else {
                continue;
            };
            debug!(?action, "input");

            match action {
                Action::Quit => {
                    self.shutdown.trigger();
                    break;
                }
                Action::ScrollUp => {
                    self.viewport.blocking_lock().scroll_up();
                    self.draw(terminal)?;
                }
                Action::ScrollDown => {
                    self.viewport.blocking_lock().scroll_down();
                    self.draw(terminal)?;
                }
                Action::Redraw => self.draw(terminal)?,
            }
        }

        info!("ui stopped");
        Ok(())
    }

    fn draw(&self, terminal: &mut Term) -> io::Result<()> {
        draw_viewport(terminal, &self.viewport)
    }
}

/// Paint the viewport into the next frame.
///
/// The lock is only held while the frame buffer is filled; the terminal
/// write and flush happen after it is released.
fn draw_viewport<B: Backend>(
    terminal: &mut Terminal<B>,
    viewport: &SharedViewport,
) -> io::Result<()> {
    terminal.draw(|frame| {
        let area = frame.area();
        let mut viewport = viewport.blocking_lock();
        viewport.resize(area.width, area.height);
        frame.render_widget(&*viewport, area);
    })?;
    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
}
