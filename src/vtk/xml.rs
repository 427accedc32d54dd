//! Minimal XML emission for the VTK XML family.
//!
//! Output is fully deterministic: fixed attribute order (caller-supplied),
//! two-space indentation, no timestamps. Writing the format by hand keeps the
//! byte stream under our control, which the idempotent-write guarantee
//! depends on.

use std::io::{self, Write};

/// Escape the five XML special characters in an attribute value.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Streaming XML element writer.
pub struct XmlWriter<'a, W: Write + ?Sized> {
    out: &'a mut W,
    stack: Vec<&'static str>,
}

impl<'a, W: Write + ?Sized> XmlWriter<'a, W> {
    /// Wrap an output stream.
    pub fn new(out: &'a mut W) -> Self {
        Self {
            out,
            stack: Vec::new(),
        }
    }

    fn indent(&mut self) -> io::Result<()> {
        for _ in 0..self.stack.len() {
            self.out.write_all(b"  ")?;
        }
        Ok(())
    }

    fn attrs(&mut self, attrs: &[(&str, &str)]) -> io::Result<()> {
        for (name, value) in attrs {
            write!(self.out, " {}=\"{}\"", name, escape(value))?;
        }
        Ok(())
    }

    /// Write the XML declaration.
    pub fn declaration(&mut self) -> io::Result<()> {
        writeln!(self.out, "<?xml version=\"1.0\"?>")
    }

    /// Open an element; must be paired with [`close`](Self::close).
    pub fn open(&mut self, tag: &'static str, attrs: &[(&str, &str)]) -> io::Result<()> {
        self.indent()?;
        write!(self.out, "<{}", tag)?;
        self.attrs(attrs)?;
        writeln!(self.out, ">")?;
        self.stack.push(tag);
        Ok(())
    }

    /// Write a self-closing element.
    pub fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) -> io::Result<()> {
        self.indent()?;
        write!(self.out, "<{}", tag)?;
        self.attrs(attrs)?;
        writeln!(self.out, "/>")
    }

    /// Write one indented line of element content.
    pub fn line(&mut self, content: &str) -> io::Result<()> {
        self.indent()?;
        writeln!(self.out, "{}", content)
    }

    /// Close the most recently opened element.
    pub fn close(&mut self) -> io::Result<()> {
        let tag = self
            .stack
            .pop()
            .expect("close() without matching open()");
        self.indent()?;
        writeln!(self.out, "</{}>", tag)
    }
}
