//! Plain-text scanning primitives shared by indexing and resolution.
//!
//! Source files are treated as opaque strings: these helpers know about
//! double-quoted literals and a handful of "trivial" line shapes, nothing more.

pub mod lines;
pub mod locate;
pub mod quote;

pub use lines::{is_trivial_file, is_trivial_line, line_of_offset, surrounding_window, window};
pub use locate::{
    Hit, Lines, Pattern, Quotes, find_unquoted, find_unquoted_word,
    find_unquoted_word_on_nontrivial_line,
};
pub use quote::is_quoted;
