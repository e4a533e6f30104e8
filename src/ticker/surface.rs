/// A text field the ticker overwrites.
pub trait DisplayField {
    /// Replace the field's text.
    fn write(&mut self, text: &str);
}

/// Append-only log the manual refresh writes to.
pub trait LogSurface {
    /// Append one line.
    fn append_line(&mut self, line: &str);
}

impl<T: DisplayField + ?Sized> DisplayField for Box<T> {
    fn write(&mut self, text: &str) {
        (**self).write(text);
    }
}

impl<T: LogSurface + ?Sized> LogSurface for Box<T> {
    fn append_line(&mut self, line: &str) {
        (**self).append_line(line);
    }
}

/// In-memory text field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryField {
    text: String,
    writes: usize,
}

impl MemoryField {
    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// How many times the field was written.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl DisplayField for MemoryField {
    fn write(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.writes += 1;
    }
}

/// In-memory log that keeps every line and scrolls its visible window to the tail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryLog {
    lines: Vec<String>,
    window: usize,
    scroll_top: usize,
}

impl MemoryLog {
    /// Log showing `window` lines at a time (at least one).
    pub fn new(window: usize) -> Self {
        Self {
            lines: Vec::new(),
            window: window.max(1),
            scroll_top: 0,
        }
    }

    /// Every line appended so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Index of the first visible line.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Lines currently in view.
    pub fn visible(&self) -> &[String] {
        let end = (self.scroll_top + self.window).min(self.lines.len());
        &self.lines[self.scroll_top..end]
    }
}

impl Default for MemoryLog {
    fn default() -> Self {
        Self::new(8)
    }
}

impl LogSurface for MemoryLog {
    fn append_line(&mut self, line: &str) {
        self.lines.push(line.to_owned());
        self.scroll_top = self.lines.len().saturating_sub(self.window);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ticker/surface.rs"]
mod tests;
