//! Flushes framebuffers to a terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is sent in full. After that only runs of glyphs that differ from the
//! previously presented frame are written.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Rgb, Style};

/// Horizontal span of changed glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Switches the terminal into game mode and restores it when dropped.
pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut out = io::stdout();
        out.queue(terminal::EnterAlternateScreen)?;
        out.queue(cursor::Hide)?;
        out.queue(terminal::DisableLineWrap)?;
        out.flush()?;
        Ok(Self { active: true })
    }

    /// Restore the terminal, reporting failures.
    pub fn restore(mut self) -> Result<()> {
        self.active = false;
        restore_terminal()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active {
            let _ = restore_terminal();
        }
    }
}

fn restore_terminal() -> Result<()> {
    let mut out = io::stdout();
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(terminal::EnableLineWrap)?;
    out.queue(cursor::Show)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    out.flush()?;
    terminal::disable_raw_mode().context("failed to disable raw mode")?;
    Ok(())
}

/// Diffing frame writer.
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    prev: Option<FrameBuffer>,
    buf: Vec<u8>,
    runs: Vec<Run>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            prev: None,
            buf: Vec::with_capacity(16 * 1024),
            runs: Vec::new(),
        }
    }

    /// Send the next full redraw regardless of what is on screen.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Present `frame`, writing only what changed. Returns the bytes written.
    pub fn present(&mut self, frame: &FrameBuffer) -> Result<usize> {
        self.buf.clear();
        match &self.prev {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                changed_runs(prev, frame, &mut self.runs);
                if self.runs.is_empty() {
                    return Ok(0);
                }
                encode_runs(frame, &self.runs, &mut self.buf)?;
            }
            _ => encode_full(frame, &mut self.buf)?,
        }

        self.out.write_all(&self.buf)?;
        self.out.flush()?;

        match &mut self.prev {
            Some(prev) => prev.clone_from(frame),
            None => self.prev = Some(frame.clone()),
        }
        Ok(self.buf.len())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full(frame: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let rows: Vec<Run> = (0..frame.height())
        .map(|y| Run {
            x: 0,
            y,
            len: frame.width(),
        })
        .collect();
    encode_runs(frame, &rows, out)
}

/// Encode the given runs of `frame` into `out`.
pub fn encode_runs(frame: &FrameBuffer, runs: &[Run], out: &mut Vec<u8>) -> Result<()> {
    let mut style: Option<Style> = None;
    for run in runs {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        let row = frame.row(run.y);
        let end = (run.x + run.len).min(row.len() as u16);
        for glyph in &row[run.x as usize..end as usize] {
            if style != Some(glyph.style) {
                queue_style(out, glyph.style)?;
                style = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn queue_style(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(term_color(style.fg)))?;
    out.queue(SetBackgroundColor(term_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Collect the runs of glyphs that differ between two equally sized frames.
pub fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer, runs: &mut Vec<Run>) {
    runs.clear();
    for y in 0..next.height() {
        let (before, after) = (prev.row(y), next.row(y));
        let mut x = 0;
        while x < after.len() {
            if before.get(x) == Some(&after[x]) {
                x += 1;
                continue;
            }
            let start = x;
            while x < after.len() && before.get(x) != Some(&after[x]) {
                x += 1;
            }
            runs.push(Run {
                x: start as u16,
                y,
                len: (x - start) as u16,
            });
        }
    }
}
