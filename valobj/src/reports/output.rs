//! Output trait for rendering reports to different formats.

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render.
pub trait Output {
    /// Render a title/header.
    fn title(&mut self, text: &str);

    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    /// Render an indented key-value pair.
    fn key_value_indented(&mut self, key: &str, value: &str);

    /// Render a numbered list item.
    fn numbered_item(&mut self, index: usize, text: &str);

    /// Render a bullet list item.
    fn list_item(&mut self, text: &str);

    /// Render an already formatted diagnostic.
    fn diagnostic(&mut self, rendered: &str);

    /// Render a block of preformatted text.
    fn preformatted(&mut self, text: &str);

    /// Render a blank line.
    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// Terminal output implementation.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn title(&mut self, text: &str) {
        println!("{}", text);
        println!("{}", "=".repeat(text.len()));
    }

    fn section(&mut self, name: &str) {
        println!("{}:", name);
    }

    fn key_value_indented(&mut self, key: &str, value: &str) {
        println!("  {}: {}", key, value);
    }

    fn numbered_item(&mut self, index: usize, text: &str) {
        println!("  {}. {}", index, text);
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {}", text);
    }

    fn diagnostic(&mut self, rendered: &str) {
        eprintln!("{}", rendered);
    }

    fn preformatted(&mut self, text: &str) {
        println!("{}", text);
    }

    fn newline(&mut self) {
        println!();
    }
}

/// Collects rendered lines, for tests.
#[cfg(test)]
#[derive(Default)]
pub struct BufferOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for BufferOutput {
    fn title(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn section(&mut self, name: &str) {
        self.lines.push(format!("{}:", name));
    }

    fn key_value_indented(&mut self, key: &str, value: &str) {
        self.lines.push(format!("  {}: {}", key, value));
    }

    fn numbered_item(&mut self, index: usize, text: &str) {
        self.lines.push(format!("  {}. {}", index, text));
    }

    fn list_item(&mut self, text: &str) {
        self.lines.push(format!("  - {}", text));
    }

    fn diagnostic(&mut self, rendered: &str) {
        self.lines.push(rendered.to_string());
    }

    fn preformatted(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn newline(&mut self) {
        self.lines.push(String::new());
    }
}
