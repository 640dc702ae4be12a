//! # Source Writer
//!
//! Indentation-aware string builder plus the escaping helpers used whenever
//! user-provided text (labels, placeholders, titles) lands in generated TSX.

/// One indentation level of generated code.
pub const INDENT: &str = "  ";

/// Line-oriented builder that tracks the current nesting depth.
#[derive(Debug, Default, Clone)]
pub struct SourceWriter {
    buf: String,
    depth: usize,
}

impl SourceWriter {
    /// Creates an empty writer at depth 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one line at the current depth. Empty input writes a blank line.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
        self
    }

    /// Writes a multi-line block, shifting each of its lines to the current depth.
    pub fn lines(&mut self, block: &str) -> &mut Self {
        for line in block.lines() {
            self.line(line);
        }
        self
    }

    /// Writes a blank line.
    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Runs `body` one level deeper.
    pub fn nest(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self
    }

    /// Fallible variant of [`SourceWriter::nest`].
    pub fn try_nest<E>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<(), E>,
    ) -> Result<&mut Self, E> {
        self.depth += 1;
        let res = body(self);
        self.depth -= 1;
        res.map(|_| self)
    }

    /// Returns the accumulated text.
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Escapes text placed between JSX tags.
///
/// Brackets and quotes become character references so user text can never
/// unbalance the delimiters of the surrounding code.
pub fn jsx_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            '(' => out.push_str("&#40;"),
            ')' => out.push_str("&#41;"),
            '[' => out.push_str("&#91;"),
            ']' => out.push_str("&#93;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '`' => out.push_str("&#96;"),
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a value placed in a double-quoted JSX attribute.
pub fn jsx_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\\' => out.push_str("&#92;"),
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a TypeScript double-quoted string literal.
pub fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

/// Renders a number without a trailing `.0` for whole values.
pub fn js_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else if value.is_finite() {
        format!("{}", value)
    } else {
        "0".to_string()
    }
}
