use color_eyre::{eyre::WrapErr, Report};
use ropebuf::{ChunkSize, Rope};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use super::EditOp;

pub struct Editor {
    pub(crate) rope: Rope,
    pub(crate) chunk_size: ChunkSize,
    pub(crate) filename: Option<PathBuf>,
    pub(crate) dirty: bool,
}

impl Editor {
    pub fn new(chunk_size: ChunkSize) -> Self {
        Self {
            rope: Rope::default(),
            chunk_size,
            filename: None,
            dirty: false,
        }
    }

    pub fn load_file(&mut self, filename: &Path) -> Result<(), Report> {
        let bytes = fs::read(filename)
            .wrap_err_with(|| format!("Error opening file '{}'", filename.display()))?;

        info!(
            file = %filename.display(),
            len = bytes.len(),
            chunk_size = %self.chunk_size,
            "loaded"
        );
        self.rope = Rope::build(bytes, self.chunk_size);
        self.filename = Some(filename.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    pub fn save_file(&mut self, filename: &Path) -> Result<(), Report> {
        fs::write(filename, self.rope.to_bytes())
            .wrap_err_with(|| format!("Error writing file '{}'", filename.display()))?;

        info!(file = %filename.display(), len = self.rope.len(), "saved");
        self.dirty = false;
        Ok(())
    }

    ///
    /// Runs one edit against the buffer. Lookups return the byte they found.
    ///
    pub fn apply(&mut self, op: &EditOp) -> Result<Option<u8>, Report> {
        let context = || format!("Error applying '{}'", op);

        let result = match op {
            EditOp::Insert { pos, text } => self.rope.insert(*pos, text).map(|_| None),
            EditOp::Delete { pos, len } => self.rope.delete(*pos, *len).map(|_| None),
            EditOp::Truncate { pos } => self.rope.split(*pos).map(|dropped| {
                debug!(dropped = dropped.len(), "truncated");
                None
            }),
            EditOp::At { pos } => return self.rope.at(*pos).map(Some).wrap_err_with(context),
        };

        let found = result.wrap_err_with(context)?;
        self.dirty = true;
        Ok(found)
    }
}
