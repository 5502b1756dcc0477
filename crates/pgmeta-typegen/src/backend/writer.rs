//! Indentation-aware text buffer shared by the emitters.

/// Line-oriented output buffer.
#[derive(Debug)]
pub struct CodeWriter {
    buf: String,
    depth: usize,
    unit: &'static str,
}

impl CodeWriter {
    /// Create a writer indenting with `unit` per level.
    pub fn new(unit: &'static str) -> Self {
        Self {
            buf: String::new(),
            depth: 0,
            unit,
        }
    }

    /// Write one indented line.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str(self.unit);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    /// Write an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Write `open`, then the body one level deeper, then `close`.
    pub fn block(&mut self, open: impl AsRef<str>, close: &str, body: impl FnOnce(&mut Self)) {
        self.line(open);
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self.line(close);
    }

    /// Increase indentation.
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decrease indentation.
    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Finish and return the text.
    pub fn finish(self) -> String {
        self.buf
    }
}
