pub mod assemble;
pub mod error;
pub mod parser;
pub mod record;
pub mod reloc;
pub mod symbols;

pub use assemble::{assemble, Assembler, Program};
pub use error::{AsmError, Error};
