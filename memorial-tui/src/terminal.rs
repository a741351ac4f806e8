//! Terminal setup, teardown and frame output.

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use crate::render::{Line, Tone};
use crate::text::{display_width, truncate_to_width};

/// Raw-mode alternate screen, restored on drop and on panic.
pub struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        Ok(Self { stdout })
    }

    /// Current width in columns.
    pub fn width(&self) -> usize {
        terminal::size().map(|(w, _)| w as usize).unwrap_or(80)
    }

    /// Replaces the screen contents with `lines`, clipped to the terminal.
    pub fn draw(&mut self, lines: &[Line]) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        queue!(self.stdout, Clear(ClearType::All))?;

        for (y, line) in lines.iter().take(height as usize).enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16))?;
            let mut remaining = width as usize;
            for span in line {
                if remaining == 0 {
                    break;
                }
                let text = truncate_to_width(&span.text, remaining);
                remaining = remaining.saturating_sub(display_width(&text));
                self.print(&text, span.tone)?;
            }
        }

        self.stdout.flush()
    }

    fn print(&mut self, text: &str, tone: Tone) -> io::Result<()> {
        match tone {
            Tone::Plain => queue!(self.stdout, Print(text))?,
            Tone::Muted => queue!(self.stdout, SetForegroundColor(Color::DarkGrey), Print(text), ResetColor)?,
            Tone::Strong => queue!(
                self.stdout,
                SetAttribute(Attribute::Bold),
                Print(text),
                SetAttribute(Attribute::Reset)
            )?,
            Tone::Accent => queue!(self.stdout, SetForegroundColor(Color::Cyan), Print(text), ResetColor)?,
            Tone::Selected => queue!(
                self.stdout,
                SetAttribute(Attribute::Reverse),
                Print(text),
                SetAttribute(Attribute::Reset)
            )?,
            Tone::Success => queue!(self.stdout, SetForegroundColor(Color::Green), Print(text), ResetColor)?,
            Tone::Error => queue!(self.stdout, SetForegroundColor(Color::Red), Print(text), ResetColor)?,
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), cursor::Show, LeaveAlternateScreen)?;
    Ok(())
}
