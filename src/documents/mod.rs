// Document sources: where submission texts come from before comparison.
//
// The engine only sees `Document`s. This module is the local stand-in for a
// drive download: it reads a folder of plain-text submissions and produces
// both the documents and the table metadata shown alongside their scores.

pub mod loader;

pub use loader::{load_directory, LoadedFile};
