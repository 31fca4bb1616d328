//! Indentation-aware text printer.

use crate::Node;

/// Renders [`Node`] trees using one tab per indentation level.
pub struct Printer {
    /// Current indentation level.
    indent: usize,
    /// Generated text.
    output: String,
}

impl Printer {
    pub fn new() -> Self {
        Self::with_indent(0)
    }

    /// Start at a given indentation level, e.g. 1 for class members.
    pub fn with_indent(indent: usize) -> Self {
        Self {
            indent,
            output: String::with_capacity(4096),
        }
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

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push('\t');
        }
    }

    /// Write a line to output (with indentation and newline).
    pub fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    /// Write a newline.
    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    pub fn print(&mut self, node: &Node) {
        match node {
            Node::Line(text) => self.writeln(text),
            Node::Blank => self.newline(),
            Node::Nested(children) => {
                self.indent();
                self.print_all(children);
                self.dedent();
            }
            Node::Block { arms, close } => {
                for (head, body) in arms {
                    self.writeln(head);
                    self.indent();
                    self.print_all(body);
                    self.dedent();
                }
                self.writeln(close);
            }
        }
    }

    pub fn print_all(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.print(node);
        }
    }

    /// Take the generated output.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}
