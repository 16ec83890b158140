mod combinators;
mod error;
mod grammar;
mod section;
mod state;

pub use combinators::*;
pub use error::ParseError;
pub use grammar::{expression, parse, parse_sections};
pub use section::{sectionize, Section};
pub use state::{ParseResult, ParseState, Parser};
