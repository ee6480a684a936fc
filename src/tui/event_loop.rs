use anyhow::Result;
use ratatui::crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::tui::state::{KeyOutcome, TuiApp};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const SPINNER_INTERVAL: Duration = Duration::from_millis(150);

impl TuiApp {
    pub fn run(&mut self) -> Result<()> {
        struct TuiGuard;
        impl Drop for TuiGuard {
            fn drop(&mut self) {
                let mut stdout = io::stdout();
                let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);
                let _ = terminal::disable_raw_mode();
            }
        }
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let _guard = TuiGuard;

        let mut term = Terminal::new(CrosstermBackend::new(stdout))?;
        term.clear()?;
        self.mount();
        self.event_loop(&mut term)
    }

    fn event_loop(&mut self, term: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let mut last_spinner_update = Instant::now();
        loop {
            if self.search().loading && last_spinner_update.elapsed() >= SPINNER_INTERVAL {
                self.spinner_state = self.spinner_state.wrapping_add(1);
                self.dirty = true;
                last_spinner_update = Instant::now();
            }

            if self.drain_inbox() {
                debug!(count = self.search().groups.len(), "results applied");
            }

            if self.dirty {
                term.draw(|f| self.view(f))?;
                self.dirty = false;
            }

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(key) == KeyOutcome::Quit {
                        info!("tui exit requested");
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => self.dirty = true,
                _ => {}
            }
        }
    }
}
