use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Stdout, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::{Phase, SessionState};
use crate::engine::{rank_predictions, ConfidenceTier};
use crate::error::Result;
use crate::services::PredictionController;

const REDRAW_INTERVAL: Duration = Duration::from_secs(1);

/// What a key press asks the dashboard to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    Retry,
    ToggleMode,
    Quit,
}

pub fn key_action(key: &KeyEvent) -> Option<DashboardAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(DashboardAction::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(DashboardAction::Quit)
        }
        KeyCode::Char('r') => Some(DashboardAction::Retry),
        KeyCode::Char('m') => Some(DashboardAction::ToggleMode),
        _ => None,
    }
}

/// Terminal dashboard over a running prediction controller
pub struct Dashboard {
    controller: Arc<PredictionController>,
}

impl Dashboard {
    pub fn new(controller: Arc<PredictionController>) -> Self {
        Self { controller }
    }

    /// Run until the user quits
    pub async fn run(&self) -> Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.run_loop(&mut stdout).await;
        restore_terminal()?;
        result
    }

    async fn run_loop(&self, stdout: &mut Stdout) -> Result<()> {
        let mut updates = self.controller.subscribe();
        let mut dirty = true;
        let mut last_render = Instant::now();

        loop {
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    match key_action(&key) {
                        Some(DashboardAction::Quit) => break,
                        Some(DashboardAction::Retry) => self.controller.retry(),
                        Some(DashboardAction::ToggleMode) => self.controller.toggle_mode(),
                        None => {}
                    }
                    dirty = true;
                }
            }

            if updates.has_changed().unwrap_or(false) {
                let _ = updates.borrow_and_update();
                dirty = true;
            }

            if dirty || last_render.elapsed() >= REDRAW_INTERVAL {
                let state = self.controller.snapshot();
                render(stdout, &state)?;
                dirty = false;
                last_render = Instant::now();
            }

            tokio::task::yield_now().await;
        }

        Ok(())
    }
}

/// Leave the alternate screen and raw mode.
pub fn restore_terminal() -> Result<()> {
    execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
    terminal::disable_raw_mode()?;
    Ok(())
}

fn render(stdout: &mut Stdout, state: &SessionState) -> Result<()> {
    execute!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    print_header(stdout, state)?;
    print_status(stdout, state)?;
    print_predictions(stdout, state)?;

    let (_, rows) = terminal::size()?;
    execute!(stdout, cursor::MoveTo(0, rows.saturating_sub(1)))?;
    execute!(
        stdout,
        SetForegroundColor(Color::DarkGrey),
        Print("[r] retry  [m] toggle live/sample  [q] quit"),
        ResetColor
    )?;

    stdout.flush()?;
    Ok(())
}

fn print_header(stdout: &mut Stdout, state: &SessionState) -> Result<()> {
    let (label, color) = if state.is_live_mode() {
        ("LIVE ODDS", Color::Green)
    } else {
        ("SAMPLE DATA", Color::Yellow)
    };

    execute!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print("COURTSIDE  NBA win predictions  "),
        SetForegroundColor(color),
        Print(format!("[{label}]\r\n")),
        ResetColor
    )?;
    Ok(())
}

fn print_status(stdout: &mut Stdout, state: &SessionState) -> Result<()> {
    let phase_color = match state.phase {
        Phase::Loading => Color::Yellow,
        Phase::Ready => Color::Green,
        Phase::Error => Color::Red,
    };

    execute!(
        stdout,
        Print("Status: "),
        SetForegroundColor(phase_color),
        Print(state.phase.as_str()),
        ResetColor
    )?;

    if state.retry_attempt > 0 {
        execute!(stdout, Print(format!("  retry #{}", state.retry_attempt)))?;
    }
    if let Some(updated) = state.last_updated {
        execute!(
            stdout,
            Print(format!("  updated {}", updated.format("%H:%M:%S UTC")))
        )?;
    }
    execute!(stdout, Print("\r\n"))?;

    if state.using_fallback && state.is_live_mode() {
        execute!(
            stdout,
            SetForegroundColor(Color::Yellow),
            Print("Live odds unavailable, showing sample data\r\n"),
            ResetColor
        )?;
    }

    if let Some(error) = &state.error {
        execute!(
            stdout,
            SetForegroundColor(Color::Red),
            Print(format!("{error}\r\n")),
            ResetColor
        )?;
    }

    execute!(stdout, Print("\r\n"))?;
    Ok(())
}

fn print_predictions(stdout: &mut Stdout, state: &SessionState) -> Result<()> {
    if state.predictions.is_empty() {
        let msg = match state.phase {
            Phase::Loading => "Loading predictions...",
            _ => "No upcoming games found",
        };
        execute!(stdout, Print(format!("{msg}\r\n")))?;
        return Ok(());
    }

    for record in rank_predictions(&state.predictions) {
        let tier = ConfidenceTier::from_confidence(record.confidence);
        let color = match tier {
            ConfidenceTier::High => Color::Green,
            ConfidenceTier::Medium => Color::Yellow,
            ConfidenceTier::Low => Color::White,
            ConfidenceTier::NoData => Color::DarkGrey,
        };

        execute!(
            stdout,
            Print(format!(
                "{:<12} {:<50} ",
                record.start_time.format("%a %H:%M"),
                record.matchup()
            )),
            SetForegroundColor(color),
            Print(format!(
                "{:<26} {:>8}\r\n",
                record.predicted_winner.as_deref().unwrap_or("-"),
                record.confidence_label()
            )),
            ResetColor
        )?;
    }
    Ok(())
}
