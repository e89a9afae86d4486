use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use livemark_config::Config;
use livemark_engine::{Document, EditError, EditorSession, SelectionRange, Span};

use crate::render;

/// Loaded when livemark starts without a file.
pub const DEMO_DOCUMENT: &str = "# Better Markdown Editor\n\n## Live Preview\n\nSymbols like **bold** hashes and *italic* stars are hidden until you click on them.\n\nTry clicking here -> **Reveal Me**\n\n> This quote mark is also hidden.";

pub struct App {
    pub session: EditorSession,
    pub path: PathBuf,
    /// Index of the first line on screen.
    pub scroll: usize,
    /// Rows available for document text.
    pub height: usize,
    pub scroll_margin: usize,
    pub dirty: bool,
    pub status: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(document: Document, path: PathBuf, config: &Config) -> Self {
        let session = EditorSession::with_kinds(document, config.marker_kinds());
        Self {
            session,
            path,
            scroll: 0,
            height: 0,
            scroll_margin: config.scroll_margin,
            dirty: false,
            status: String::from("Ready"),
            should_quit: false,
        }
    }

    pub fn text(&self) -> String {
        self.session.document().text()
    }

    pub fn caret(&self) -> usize {
        self.session.primary().head
    }

    pub fn lines(&self) -> Vec<Span> {
        render::line_spans(&self.text())
    }

    /// Set the number of text rows and publish the matching visible range.
    pub fn resize(&mut self, height: usize) {
        self.height = height.max(1);
        self.sync_viewport();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char('s') if ctrl => self.save()?,
            KeyCode::Left => self.move_horizontal(false, shift),
            KeyCode::Right => self.move_horizontal(true, shift),
            KeyCode::Up => self.move_vertical(-1, shift),
            KeyCode::Down => self.move_vertical(1, shift),
            KeyCode::PageUp => self.move_vertical(-(self.height.max(1) as isize), shift),
            KeyCode::PageDown => self.move_vertical(self.height.max(1) as isize, shift),
            KeyCode::Home => {
                let line = self.current_line();
                self.move_to(line.start, shift);
            }
            KeyCode::End => {
                let line = self.current_line();
                self.move_to(line.end, shift);
            }
            KeyCode::Enter => self.insert("\n"),
            KeyCode::Tab => self.insert("\t"),
            KeyCode::Backspace => self.delete(false),
            KeyCode::Delete => self.delete(true),
            KeyCode::Char(c) if !ctrl => {
                let mut buf = [0; 4];
                self.insert(c.encode_utf8(&mut buf));
            }
            _ => {}
        }

        self.sync_viewport();
        Ok(())
    }

    /// Put the caret under a click at `row`, `column` of the text area.
    pub fn click(&mut self, row: usize, column: usize) {
        let text = self.text();
        let lines = render::line_spans(&text);
        let line = lines[(self.scroll + row).min(lines.len() - 1)];
        let offset = render::offset_at_column(&text, line, column, self.session.masks());
        self.move_to(offset, false);
        self.sync_viewport();
    }

    pub fn save(&mut self) -> Result<()> {
        let bytes = self.session.document().to_bytes();
        write_file(&self.path, &bytes)?;
        self.dirty = false;
        self.status = format!("Saved {} bytes to {}", bytes.len(), self.path.display());
        log::info!("{}", self.status);
        Ok(())
    }

    fn current_line(&self) -> Span {
        let lines = self.lines();
        lines[render::line_of(&lines, self.caret())]
    }

    fn move_to(&mut self, offset: usize, extend: bool) {
        let primary = self.session.primary();
        let range = if extend {
            primary.extend_to(offset)
        } else {
            SelectionRange::caret(offset)
        };
        self.session.set_selection(vec![range]);
    }

    fn move_horizontal(&mut self, forward: bool, extend: bool) {
        let primary = self.session.primary();
        // Without shift, an arrow collapses a selection to its edge
        if !extend && !primary.is_caret() {
            let edge = if forward { primary.to() } else { primary.from() };
            self.move_to(edge, false);
            return;
        }

        let text = self.text();
        let lines = render::line_spans(&text);
        let caret = primary.head;
        let idx = render::line_of(&lines, caret);
        let line = lines[idx];

        let target = if forward {
            if caret >= line.end {
                lines.get(idx + 1).map_or(caret, |next| next.start)
            } else {
                next_boundary(&text, caret)
            }
        } else if caret <= line.start {
            idx.checked_sub(1).map_or(caret, |prev| lines[prev].end)
        } else {
            prev_boundary(&text, caret)
        };
        self.move_to(target, extend);
    }

    fn move_vertical(&mut self, delta: isize, extend: bool) {
        let text = self.text();
        let lines = render::line_spans(&text);
        let caret = self.caret();
        let idx = render::line_of(&lines, caret);
        let target_idx = idx
            .saturating_add_signed(delta)
            .min(lines.len().saturating_sub(1));
        if target_idx == idx {
            return;
        }

        let column = text[lines[idx].start..caret].chars().count();
        let target = lines[target_idx];
        let offset = text[target.range()]
            .char_indices()
            .nth(column)
            .map_or(target.end, |(i, _)| target.start + i);
        self.move_to(offset, extend);
    }

    fn insert(&mut self, text: &str) {
        let result = self.session.replace_selection(text);
        self.after_edit(result.map(|_| ()));
    }

    fn delete(&mut self, forward: bool) {
        let primary = self.session.primary();
        if !primary.is_caret() {
            let result = self.session.replace_selection("");
            self.after_edit(result.map(|_| ()));
            return;
        }

        let text = self.text();
        let lines = render::line_spans(&text);
        let caret = primary.head;
        let idx = render::line_of(&lines, caret);
        let line = lines[idx];

        // Line terminators are removed whole, `\r\n` included
        let range = if forward {
            match lines.get(idx + 1) {
                Some(next) if caret >= line.end => line.end..next.start,
                _ if caret < line.end => caret..next_boundary(&text, caret),
                _ => return,
            }
        } else if caret <= line.start {
            match idx.checked_sub(1) {
                Some(prev) => lines[prev].end..line.start,
                None => return,
            }
        } else {
            prev_boundary(&text, caret)..caret
        };

        self.session
            .set_selection(vec![SelectionRange::new(range.start, range.end)]);
        let result = self.session.replace_selection("");
        self.after_edit(result.map(|_| ()));
    }

    fn after_edit(&mut self, result: Result<(), EditError>) {
        match result {
            Ok(()) => self.dirty = true,
            Err(err) => self.status = format!("Edit rejected: {err}"),
        }
    }

    /// Keep the caret `scroll_margin` lines away from the screen edges and
    /// publish the rendered lines as the visible range.
    fn sync_viewport(&mut self) {
        if self.height == 0 {
            return;
        }
        let lines = self.lines();
        let caret_line = render::line_of(&lines, self.caret());
        let margin = self.scroll_margin.min(self.height.saturating_sub(1) / 2);

        if caret_line < self.scroll + margin {
            self.scroll = caret_line.saturating_sub(margin);
        } else if caret_line + margin >= self.scroll + self.height {
            self.scroll = caret_line + margin + 1 - self.height;
        }
        let max_scroll = lines.len().saturating_sub(self.height);
        self.scroll = self.scroll.min(max_scroll.max(caret_line.saturating_sub(margin)));

        let first = lines[self.scroll.min(lines.len() - 1)];
        let last_idx = (self.scroll + self.height).min(lines.len()) - 1;
        let visible = vec![Span::new(first.start, lines[last_idx].end)];
        if self.session.visible_ranges() != visible.as_slice() {
            self.session.set_visible_ranges(visible);
        }
    }
}

fn prev_boundary(text: &str, offset: usize) -> usize {
    text[..offset]
        .chars()
        .next_back()
        .map_or(offset, |c| offset - c.len_utf8())
}

fn next_boundary(text: &str, offset: usize) -> usize {
    text[offset..]
        .chars()
        .next()
        .map_or(offset, |c| offset + c.len_utf8())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
