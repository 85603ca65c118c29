// Copycat: near-duplicate submission detection for coursework folders.
//
// This is the library root. `engine` scores documents, `classify` turns the
// scores into views, and the remaining modules feed it and present it.

pub mod classify;
pub mod config;
pub mod documents;
pub mod engine;
pub mod models;
pub mod output;
