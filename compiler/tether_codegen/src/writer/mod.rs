//! Indented text output for the renderers.

/// Output buffer with indentation tracking.
pub struct CodeWriter {
    /// Current indentation level.
    indent: usize,
    /// One level of indentation.
    unit: String,
    /// Generated code output.
    output: String,
    /// Counter for unique local names.
    temp_counter: u32,
}

impl CodeWriter {
    /// Create a writer indenting by `width` spaces per level.
    pub fn new(width: usize) -> Self {
        Self {
            indent: 0,
            unit: " ".repeat(width),
            output: String::with_capacity(4096),
            temp_counter: 0,
        }
    }

    /// Generate a unique local name with the given prefix.
    pub fn fresh_temp(&mut self, prefix: &str) -> String {
        let n = self.temp_counter;
        self.temp_counter += 1;
        format!("{prefix}{n}")
    }

    /// Restart local numbering, typically per generated function.
    pub fn reset_temps(&mut self) {
        self.temp_counter = 0;
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write indentation to output.
    pub fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str(&self.unit);
        }
    }

    /// Write a string to output.
    pub fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Write a line to output (with indentation and newline).
    ///
    /// Empty lines get no trailing indentation.
    pub fn writeln(&mut self, s: &str) {
        if !s.is_empty() {
            self.write_indent();
            self.output.push_str(s);
        }
        self.output.push('\n');
    }

    /// Write a newline.
    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// `header {` and indent.
    pub fn open_block(&mut self, header: &str) {
        if header.is_empty() {
            self.writeln("{");
        } else {
            self.writeln(&format!("{header} {{"));
        }
        self.indent();
    }

    /// Dedent and `}` followed by `suffix`.
    pub fn close_block(&mut self, suffix: &str) {
        self.dedent();
        self.writeln(&format!("}}{suffix}"));
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Take the generated output.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

#[cfg(test)]
mod tests;
