use clap::{Parser, Subcommand};
use color_eyre::Report;
use ropebuf::ChunkSize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod editor;
mod util;

use crate::editor::{EditOp, Editor};
use crate::util::Display;

#[derive(Parser)]
#[command(
    name = "ropebuf",
    version,
    about = "Inspect and edit files through a byte rope"
)]
struct Cli {
    /// Log construction and edits to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tree a file is stored as
    Show {
        file: PathBuf,

        /// Maximum leaf size: a byte count or "auto"
        #[arg(short, long, default_value_t = ChunkSize::Auto)]
        chunk_size: ChunkSize,
    },

    /// Apply edits to a file and print the result
    Edit {
        file: PathBuf,

        /// Maximum leaf size: a byte count or "auto"
        #[arg(short, long, default_value_t = ChunkSize::Auto)]
        chunk_size: ChunkSize,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the result back to FILE if anything changed
        #[arg(short, long, conflicts_with = "output")]
        in_place: bool,

        /// Print the tree after editing instead of the text
        #[arg(short, long)]
        tree: bool,

        /// insert:POS:TEXT, delete:POS:N, truncate:POS or at:POS, applied in order
        #[arg(allow_hyphen_values = true, value_parser = parse_edit_op)]
        ops: Vec<EditOp>,
    },
}

fn parse_edit_op(s: &str) -> Result<EditOp, String> {
    s.parse().map_err(|err: Report| format!("{:#}", err))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut display = Display::new();

    match cli.command {
        Command::Show { file, chunk_size } => {
            let mut editor = Editor::new(chunk_size);
            editor.load_file(&file)?;
            display.render_tree(&editor.rope)?;
        }

        Command::Edit {
            file,
            chunk_size,
            output,
            in_place,
            tree,
            ops,
        } => {
            let mut editor = Editor::new(chunk_size);
            editor.load_file(&file)?;

            for op in &ops {
                if let Some(byte) = editor.apply(op)? {
                    display.render_lookup(op.position(), byte)?;
                }
            }

            if let Some(output) = &output {
                editor.save_file(output)?;
            } else if in_place && editor.dirty {
                if let Some(filename) = editor.filename.clone() {
                    editor.save_file(&filename)?;
                }
            }

            if tree {
                display.render_tree(&editor.rope)?;
            } else if output.is_none() && !in_place {
                display.render_text(&editor.rope)?;
            }
        }
    }

    Ok(())
}
