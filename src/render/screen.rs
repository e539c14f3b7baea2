// Taking over and handing back an output target
//
// A backend that implements `Screen` knows how to prepare itself for
// whole-frame drawing and how to undo that. In-memory backends have
// nothing to do; crossterm writers switch screens and hide the cursor.

use crate::config::RenderConfig;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::{Backend, CrosstermBackend, TestBackend};
use std::io::{self, Write};

pub trait Screen: Backend {
    /// Prepare the target before the first frame
    fn acquire(&mut self, _options: &RenderConfig) -> io::Result<()> {
        Ok(())
    }

    /// Undo `acquire`
    fn release(&mut self, _options: &RenderConfig) -> io::Result<()> {
        Ok(())
    }
}

impl<W: Write> Screen for CrosstermBackend<W> {
    fn acquire(&mut self, options: &RenderConfig) -> io::Result<()> {
        if options.alternate_screen {
            execute!(self, EnterAlternateScreen)?;
        }
        if options.hide_cursor {
            execute!(self, Hide)?;
        }
        Ok(())
    }

    fn release(&mut self, options: &RenderConfig) -> io::Result<()> {
        if options.alternate_screen {
            execute!(self, LeaveAlternateScreen)?;
        }
        if options.hide_cursor {
            execute!(self, Show)?;
        }
        Ok(())
    }
}

impl Screen for TestBackend {}
