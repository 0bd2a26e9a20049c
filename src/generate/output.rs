/// Output buffer that accumulates generated source one line at a time
pub struct Output {
    lines: Vec<String>,
    current_line: String,
}

impl Output {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            current_line: String::new(),
        }
    }

    /// Add text to the current line
    pub fn push(&mut self, text: &str) {
        self.current_line.push_str(text);
    }

    /// Add a tab-indented `//` comment line
    pub fn comment(&mut self, text: &str) {
        self.push("\t// ");
        self.push(text);
        self.newline();
    }

    /// Add a newline
    pub fn newline(&mut self) {
        self.current_line.push('\n');
        self.lines.push(std::mem::take(&mut self.current_line));
    }

    /// Finish and return the generated text
    pub fn finish(mut self) -> String {
        if !self.current_line.is_empty() {
            self.lines.push(std::mem::take(&mut self.current_line));
        }
        self.lines.concat()
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
