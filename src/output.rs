//! Line-oriented shader output
//!
//! Append-only sink that prefixes each written line with the current
//! indentation depth in tabs.

/// Indentation-aware line buffer
#[derive(Debug, Default, Clone)]
pub struct ShaderOutput {
    lines: Vec<String>,
    indent: usize,
}

impl ShaderOutput {
    /// Empty output at depth 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line at the current depth
    pub fn write(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        let mut indented = String::with_capacity(self.indent + line.len());
        for _ in 0..self.indent {
            indented.push('\t');
        }
        indented.push_str(line);
        self.lines.push(indented);
    }

    /// Append one line exactly as given, ignoring the current depth
    pub fn write_verbatim(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append `suffix` to every line written from index `start` on
    pub fn terminate_since(&mut self, start: usize, suffix: &str) {
        for line in self.lines.iter_mut().skip(start) {
            line.push_str(suffix);
        }
    }

    /// Increase depth by `n` tabs
    pub fn push_indent(&mut self, n: usize) {
        self.indent += n;
    }

    /// Decrease depth by `n` tabs (saturating at 0)
    pub fn pop_indent(&mut self, n: usize) {
        self.indent = self.indent.saturating_sub(n);
    }

    /// Current depth
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Lines written so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines written
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing was written
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Take the written lines
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
