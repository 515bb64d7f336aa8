pub mod isa;
pub mod reg;
