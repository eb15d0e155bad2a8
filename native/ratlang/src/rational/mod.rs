//! Rational expressions: tree, numbering, local sets, parsing and export.

pub mod dot;
mod expr;
mod local;
mod numbering;
mod parse;

pub use expr::{Expr, Kind, Language, Position, Span, concat, star, union};
pub use local::{first, follow, follow_all, last, letter_at, nullable};
pub use numbering::number;
pub use parse::parse;
