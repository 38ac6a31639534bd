use color_eyre::Report;
use crossterm::{
    queue,
    style::{self, Stylize},
    terminal,
};
use ropebuf::{NodeKind, Rope};
use std::io::{self, Write};

/// Fallback width when stdout is not a terminal.
const DEFAULT_WIDTH: u16 = 80;

pub struct Display {
    width: u16,

    pub(crate) out: io::Stdout,
}

impl Display {
    pub fn new() -> Self {
        let width = terminal::size()
            .map(|(columns, _)| columns)
            .unwrap_or(DEFAULT_WIDTH);

        Self {
            width,
            out: io::stdout(),
        }
    }

    ///
    /// Prints one line per node, children indented under their parent
    ///
    pub fn render_tree(&mut self, rope: &Rope) -> Result<(), Report> {
        for (depth, kind) in rope.walk() {
            let indent = "  ".repeat(depth);

            match kind {
                NodeKind::Internal { weight, has_right } => {
                    let label = if has_right {
                        format!("node weight={}", weight)
                    } else {
                        format!("node weight={} (no right)", weight)
                    };

                    queue!(
                        self.out,
                        style::Print(&indent),
                        style::PrintStyledContent(style::style(label).dark_grey())
                    )?;
                }
                NodeKind::Leaf(bytes) => {
                    let label = format!("leaf[{}] ", bytes.len());
                    let budget = (self.width as usize)
                        .saturating_sub(indent.len() + label.len() + 2)
                        .max(8);

                    queue!(
                        self.out,
                        style::Print(&indent),
                        style::PrintStyledContent(style::style(label).green()),
                        style::Print(preview(bytes, budget))
                    )?;
                }
            }

            queue!(self.out, style::Print("\n"))?;
        }

        let stats = rope.stats();
        let summary = format!(
            "{} bytes, {} nodes, {} leaves, depth {}",
            stats.len, stats.nodes, stats.leaves, stats.depth
        );
        queue!(
            self.out,
            style::PrintStyledContent(style::style(summary).bold()),
            style::Print("\n")
        )?;

        self.out.flush()?;
        Ok(())
    }

    pub fn render_lookup(&mut self, pos: usize, byte: u8) -> Result<(), Report> {
        queue!(
            self.out,
            style::PrintStyledContent(style::style(format!("at {}: ", pos)).cyan()),
            style::Print(format!("0x{:02x} {:?}\n", byte, byte as char))
        )?;

        self.out.flush()?;
        Ok(())
    }

    pub fn render_text(&mut self, rope: &Rope) -> Result<(), Report> {
        for leaf in rope.leaves() {
            self.out.write_all(leaf)?;
        }

        self.out.flush()?;
        Ok(())
    }
}

/// Quoted, escaped and cut down to at most `budget` characters.
fn preview(bytes: &[u8], budget: usize) -> String {
    let escaped = String::from_utf8_lossy(bytes).escape_debug().to_string();

    if escaped.chars().count() <= budget {
        return format!("\"{}\"", escaped);
    }

    let cut = escaped.chars().take(budget.saturating_sub(1)).collect::<String>();
    format!("\"{}\u{2026}", cut)
}
