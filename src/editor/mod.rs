mod editor;
mod ops;

pub(crate) use self::ops::EditOp;

pub use self::editor::Editor;
