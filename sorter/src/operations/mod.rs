//! Operations over recorded history.
//!
//! Like sorting, these follow a plan-then-execute shape: a plan is built
//! from the history log and the filesystem without changing either, and a
//! separate step carries it out (or, in dry-run mode, only reports it).

pub mod undo;

pub use undo::{execute_undo, SkippedEntry, UndoOptions, UndoPlan, UndoResult};
