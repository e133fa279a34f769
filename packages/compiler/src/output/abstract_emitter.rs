//! Abstract Emitter Module
//!
//! Line-oriented text builder shared by the code emitter

use crate::error::{CompileError, Result};

#[derive(Debug, Clone)]
struct EmittedLine {
    parts: Vec<String>,
    indent: usize,
}

impl EmittedLine {
    fn new(indent: usize) -> Self {
        EmittedLine {
            parts: Vec::new(),
            indent,
        }
    }
}

pub struct EmitterVisitorContext {
    lines: Vec<EmittedLine>,
    indent: usize,
    indent_width: usize,
}

impl EmitterVisitorContext {
    pub fn create_root(indent_width: usize) -> Self {
        EmitterVisitorContext::new(0, indent_width)
    }

    pub fn new(indent: usize, indent_width: usize) -> Self {
        EmitterVisitorContext {
            lines: vec![EmittedLine::new(indent)],
            indent,
            indent_width,
        }
    }

    fn current_line_mut(&mut self) -> &mut EmittedLine {
        if self.lines.is_empty() {
            self.lines.push(EmittedLine::new(self.indent));
        }
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    pub fn line_is_empty(&self) -> bool {
        self.lines.last().map(|l| l.parts.is_empty()).unwrap_or(true)
    }

    pub fn println(&mut self, last_part: &str) {
        self.print(last_part, true);
    }

    /// An empty line, never indented.
    pub fn blank_line(&mut self) {
        self.print("", true);
    }

    pub fn print(&mut self, part: &str, new_line: bool) {
        if !part.is_empty() {
            self.current_line_mut().parts.push(part.to_string());
        }
        if new_line {
            self.lines.push(EmittedLine::new(self.indent));
        }
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
        if self.line_is_empty() {
            let indent = self.indent;
            self.current_line_mut().indent = indent;
        }
    }

    pub fn dec_indent(&mut self) -> Result<()> {
        self.indent = self
            .indent
            .checked_sub(1)
            .ok_or(CompileError::UnbalancedIndent)?;
        if self.line_is_empty() {
            let indent = self.indent;
            self.current_line_mut().indent = indent;
        }
        Ok(())
    }

    /// Open a `{` block on its own line.
    pub fn open_block(&mut self) {
        self.println("{");
        self.inc_indent();
    }

    /// Close a block with `closing` (`}` or `};`).
    pub fn close_block(&mut self, closing: &str) -> Result<()> {
        self.dec_indent()?;
        self.println(closing);
        Ok(())
    }

    /// Rendered text; every emitted line ends with a newline.
    pub fn to_source(&self) -> Result<String> {
        if self.indent != 0 {
            return Err(CompileError::UnbalancedIndent);
        }
        Ok(self
            .lines
            .iter()
            .map(|l| {
                if !l.parts.is_empty() {
                    format!("{}{}", create_indent(l.indent * self.indent_width), l.parts.join(""))
                } else {
                    String::new()
                }
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

fn create_indent(count: usize) -> String {
    " ".repeat(count)
}
