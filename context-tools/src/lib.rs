//! Best-effort search tools feeding context into prompts.
//!
//! Every tool follows the same policy: the public `search` method never fails.
//! Transport or lookup failures degrade into a human-readable sentence (or a
//! one-element list for the image tool) that lands in the prompt as ordinary
//! context, so the downstream generation step decides how to cope. Strict
//! `try_*` internals return `Result` and are what the tests exercise.

mod arxiv;
mod error;
mod nasa_images;
mod wikipedia;

pub use arxiv::ArxivSearch;
pub use error::ToolError;
pub use nasa_images::NasaImageSearch;
pub use wikipedia::WikipediaSearch;
