//! Indented line buffer shared by the backends.

/// One indentation unit.
const INDENT: &str = "    ";

/// Accumulates output lines, each prefixed with the indentation current at
/// the time it was appended.
#[derive(Debug, Default)]
pub struct LineBuffer {
    lines: Vec<String>,
    level: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new line at the current indentation.
    pub fn append_line(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", INDENT.repeat(self.level), line));
        }
    }

    /// Append text to the end of the last line, starting one if the buffer
    /// is empty.
    pub fn append(&mut self, text: &str) {
        match self.lines.last_mut() {
            Some(last) => last.push_str(text),
            None => self.append_line(text),
        }
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// No-op at level zero.
    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}
