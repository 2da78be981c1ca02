use std::fmt::{self, Display, Write};

/// Writes one line at the current indentation.
macro_rules! fmt {
    ($f:expr) => {
        $f.line(format_args!(""))
    };
    ($f:expr, $($arg:tt)*) => {
        $f.line(format_args!($($arg)*))
    };
}

/// Line-oriented source writer.
pub(super) struct Formatter {
    dst: String,
    depth: usize,
}

/// Comma delimited
pub(super) struct Comma<L>(pub(super) L);

impl Formatter {
    pub(super) fn new() -> Formatter {
        Formatter {
            dst: String::new(),
            depth: 0,
        }
    }

    pub(super) fn line(&mut self, args: fmt::Arguments<'_>) {
        let start = self.dst.len();
        for _ in 0..self.depth {
            self.dst.push_str("    ");
        }
        // Writing into a String cannot fail
        let _ = self.dst.write_fmt(args);

        // Blank lines carry no indentation
        if self.dst[start..].trim().is_empty() {
            self.dst.truncate(start);
        }
        self.dst.push('\n');
    }

    /// Writes `header` followed by an opening brace, and indents.
    pub(super) fn open(&mut self, header: fmt::Arguments<'_>) {
        self.line(header);
        self.line(format_args!("{{"));
        self.depth += 1;
    }

    pub(super) fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line(format_args!("}}"));
    }

    pub(super) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(super) fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(super) fn finish(self) -> String {
        self.dst
    }
}

impl<L> Display for Comma<L>
where
    L: IntoIterator + Clone,
    L::Item: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = "";
        for item in self.0.clone() {
            write!(f, "{s}{item}")?;
            s = ", ";
        }
        Ok(())
    }
}
