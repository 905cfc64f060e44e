pub mod assembler;
pub mod error;
pub mod lexer;
pub mod listing;
pub mod literal;
pub mod msg;
mod pass1;
mod pass2;
pub mod symbol;

pub use assembler::{assemble, Assembler, Assembly, Record};
pub use error::Error;
pub use listing::{Entry, Listing};
