/*!
# Rust Language Module

This Rust module turns EZC source text into a `Program` for the machine.
The machine only borrows its error type; any front end producing a
`Program` works.

*/

pub type Column = std::ops::Range<usize>;
pub type LineNumber = Option<usize>;

#[macro_use]
mod error;
mod compile;
mod lex;
pub mod token;

pub use compile::compile;
pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;

/// One-based line holding the first character of `column`.
pub fn line_number(source: &str, column: &Column) -> LineNumber {
    Some(
        source
            .chars()
            .take(column.start)
            .filter(|ch| *ch == '\n')
            .count()
            + 1,
    )
}
