//! Append-only output buffer with character offsets.

/// Output text plus a cursor measured in characters (Unicode scalar
/// values), shifted by a caller-supplied base offset.
#[derive(Debug, Default)]
pub struct OffsetWriter {
    buf: String,
    base: usize,
    written: usize,
    last_newline: bool,
    started: bool,
}

impl OffsetWriter {
    pub fn new(base: usize) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Append `text`. Empty writes change nothing.
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.buf.push_str(text);
        self.written += text.chars().count();
        self.last_newline = text.ends_with('\n');
        self.started = true;
    }

    /// Absolute offset of the next character to be written.
    pub fn position(&self) -> usize {
        self.base + self.written
    }

    /// Whether the last character written was a newline.
    pub fn ends_with_newline(&self) -> bool {
        self.last_newline
    }

    /// Whether anything has been written yet.
    pub fn started(&self) -> bool {
        self.started
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}
