//! Statement-level Java code.

use std::fmt::Write as _;

/// One rendered line and its nesting depth within the block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    pub depth: usize,
    pub text: String,
}

/// An ordered list of lines with control-flow nesting.
///
/// ```
/// use moshigen_core::java::CodeBlock;
///
/// let mut block = CodeBlock::new();
/// block
///     .begin_control_flow("if (x == null)")
///     .add_statement("throw new IOException(\"x\")")
///     .end_control_flow();
///
/// assert_eq!(
///     block.render("  ", 0),
///     "if (x == null) {\n  throw new IOException(\"x\");\n}\n"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlock {
    lines: Vec<CodeLine>,
    depth: usize,
}

impl CodeBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line verbatim at the current depth
    pub fn add_line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(CodeLine {
            depth: self.depth,
            text: text.into(),
        });
        self
    }

    /// Add `statement;`
    pub fn add_statement(&mut self, statement: impl AsRef<str>) -> &mut Self {
        self.add_line(format!("{};", statement.as_ref()))
    }

    /// Open `header {`; an empty header opens a bare block
    pub fn begin_control_flow(&mut self, header: impl AsRef<str>) -> &mut Self {
        let header = header.as_ref();
        if header.is_empty() {
            self.add_line("{");
        } else {
            self.add_line(format!("{header} {{"));
        }
        self.depth += 1;
        self
    }

    /// Close the current flow and open `} header {`
    pub fn next_control_flow(&mut self, header: impl AsRef<str>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.add_line(format!("}} {} {{", header.as_ref()));
        self.depth += 1;
        self
    }

    pub fn end_control_flow(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.add_line("}")
    }

    /// Indent following lines without emitting a brace, as for `case` bodies
    pub fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub fn unindent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Append another block, nested at the current depth
    pub fn add_block(&mut self, other: &CodeBlock) -> &mut Self {
        let base = self.depth;
        self.lines.extend(other.lines.iter().map(|line| CodeLine {
            depth: base + line.depth,
            text: line.text.clone(),
        }));
        self
    }

    pub fn lines(&self) -> &[CodeLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether some line's text equals `text` exactly
    pub fn has_line(&self, text: &str) -> bool {
        self.lines.iter().any(|line| line.text == text)
    }

    /// Index of the first line whose text equals `text`
    pub fn position(&self, text: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.text == text)
    }

    /// Lines whose text starts with `prefix`
    pub fn lines_starting_with<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a CodeLine> {
        self.lines.iter().filter(move |line| line.text.starts_with(prefix))
    }

    /// Render every line, one per row, indented by `indent` repeated `base + depth` times
    pub fn render(&self, indent: &str, base: usize) -> String {
        let mut out = String::new();
        for line in &self.lines {
            for _ in 0..base + line.depth {
                out.push_str(indent);
            }
            let _ = writeln!(out, "{}", line.text);
        }
        out
    }
}
