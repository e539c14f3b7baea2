//! Render sink - puts a display tree on a terminal
//!
//! A `Renderer` owns one output target for its whole life. It starts with an
//! empty list attached; every `render` detaches whatever is attached, attaches
//! the new tree and redraws the full frame. Diffing against the previous frame
//! is ratatui's business and never shows through: what is on screen after a
//! render is exactly the new tree.

mod paint;
mod screen;

pub use paint::resolve;
pub use screen::Screen;

use crate::config::RenderConfig;
use crate::display::{empty_list, Display};
use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Rect, Size};
use ratatui::{Terminal, TerminalOptions, Viewport};
use std::io::{self, Stdout, Write};

/// Frame size for writers that are not a terminal
pub const DEFAULT_OUTPUT_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Anything a display can be rendered to
///
/// Implemented by [`Renderer`] and by closures, so the reactive loop can be
/// pointed at a recording sink.
pub trait RenderSink {
    fn render(&mut self, display: &Display) -> Result<()>;
}

impl<F> RenderSink for F
where
    F: FnMut(&Display) -> Result<()>,
{
    fn render(&mut self, display: &Display) -> Result<()> {
        self(display)
    }
}

pub struct Renderer<B: Screen> {
    terminal: Terminal<B>,
    attached: Display,
    options: RenderConfig,
    released: bool,
}

impl<B: Screen> Renderer<B> {
    /// Attach to `backend` without touching the terminal's modes
    pub fn new(backend: B) -> Result<Self> {
        Self::with_options(backend, RenderConfig::headless())
    }

    pub fn with_options(backend: B, options: RenderConfig) -> Result<Self> {
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;
        Self::attach(terminal, options)
    }

    /// Attach to `backend` with a frame of exactly `size`, never asking the
    /// backend how big it is
    pub fn with_size(backend: B, size: Size, options: RenderConfig) -> Result<Self> {
        let terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Fixed(Rect::new(0, 0, size.width, size.height)),
            },
        )
        .context("Failed to create terminal")?;
        Self::attach(terminal, options)
    }

    fn attach(terminal: Terminal<B>, options: RenderConfig) -> Result<Self> {
        let mut renderer = Self {
            terminal,
            attached: empty_list(),
            options,
            released: true,
        };

        if renderer.options.raw_mode {
            enable_raw_mode().context("Failed to enable raw mode")?;
        }
        // From here on, dropping the renderer undoes the setup
        renderer.released = false;
        renderer
            .terminal
            .backend_mut()
            .acquire(&renderer.options)
            .context("Failed to set up output target")?;
        renderer
            .terminal
            .clear()
            .context("Failed to clear terminal")?;

        tracing::info!(options = ?renderer.options, "Renderer attached");
        Ok(renderer)
    }

    /// Redraw with `tree` in place of the attached one.
    ///
    /// The attached tree only changes once the frame is drawn.
    pub fn render(&mut self, tree: &Display) -> Result<()> {
        self.terminal
            .draw(|frame| frame.render_widget(tree, frame.area()))
            .context("Failed to draw terminal")?;

        let detached = std::mem::replace(&mut self.attached, tree.clone());
        tracing::debug!(
            detached = ?detached.kind(),
            attached = ?self.attached.kind(),
            "Replaced display tree"
        );
        Ok(())
    }

    /// Tree currently on screen
    pub fn attached(&self) -> &Display {
        &self.attached
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    /// Hand the output target back. Consuming the renderer makes a second
    /// close or a render after close impossible.
    pub fn close(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let screen = self
            .terminal
            .backend_mut()
            .release(&self.options)
            .context("Failed to restore output target");
        if self.options.raw_mode {
            disable_raw_mode().context("Failed to disable raw mode")?;
        }
        screen?;

        tracing::info!("Renderer released");
        Ok(())
    }
}

impl<B: Screen> RenderSink for Renderer<B> {
    fn render(&mut self, tree: &Display) -> Result<()> {
        Renderer::render(self, tree)
    }
}

impl<B: Screen> Drop for Renderer<B> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            tracing::warn!("Failed to release renderer: {:#}", err);
        }
    }
}

impl<W: Write> Renderer<CrosstermBackend<W>> {
    /// Render to any writer: alternate screen and hidden cursor, no raw mode
    /// (raw mode belongs to the process's terminal, not to the writer).
    ///
    /// The frame takes the size of the process's terminal when there is one,
    /// [`DEFAULT_OUTPUT_SIZE`] otherwise.
    pub fn with_output(output: W) -> Result<Self> {
        let backend = CrosstermBackend::new(output);
        let size = backend.size().unwrap_or_else(|err| {
            tracing::debug!("No terminal size ({}), using {:?}", err, DEFAULT_OUTPUT_SIZE);
            DEFAULT_OUTPUT_SIZE
        });
        Self::with_size(backend, size, Self::writer_options())
    }

    /// Render to any writer with a frame of exactly `width` x `height` cells
    pub fn with_output_size(output: W, width: u16, height: u16) -> Result<Self> {
        Self::with_size(
            CrosstermBackend::new(output),
            Size::new(width, height),
            Self::writer_options(),
        )
    }

    fn writer_options() -> RenderConfig {
        RenderConfig {
            raw_mode: false,
            ..RenderConfig::default()
        }
    }
}

impl Renderer<CrosstermBackend<Stdout>> {
    /// Take over the process's terminal. Raw mode keeps typed keys from
    /// echoing over the display; nothing reads them.
    pub fn stdout() -> Result<Self> {
        Self::from_config(&RenderConfig::default())
    }

    pub fn from_config(options: &RenderConfig) -> Result<Self> {
        Self::with_options(CrosstermBackend::new(io::stdout()), options.clone())
    }
}
