use num_enum::{FromPrimitive, IntoPrimitive};
use strum::Display;

/// Architectural register ids. `RNONE` (0xF) fills the unused register
/// nibble of instructions that take fewer than two registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromPrimitive, IntoPrimitive, Display)]
#[repr(u8)]
#[strum(serialize_all = "lowercase")]
pub enum Reg {
    RAX,
    RCX,
    RDX,
    RBX,
    RSP,
    RBP,
    RSI,
    RDI,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    #[default]
    RNONE,
}

#[derive(Debug, Clone, Copy)]
pub struct RegEntry {
    pub name: &'static str,
    pub reg: Reg,
}

const fn entry(name: &'static str, reg: Reg) -> RegEntry {
    RegEntry { name, reg }
}

/// Register mnemonics, sigil included, in id order.
pub const REG_TABLE: &[RegEntry] = &[
    entry("%rax", Reg::RAX),
    entry("%rcx", Reg::RCX),
    entry("%rdx", Reg::RDX),
    entry("%rbx", Reg::RBX),
    entry("%rsp", Reg::RSP),
    entry("%rbp", Reg::RBP),
    entry("%rsi", Reg::RSI),
    entry("%rdi", Reg::RDI),
    entry("%r8", Reg::R8),
    entry("%r9", Reg::R9),
    entry("%r10", Reg::R10),
    entry("%r11", Reg::R11),
    entry("%r12", Reg::R12),
    entry("%r13", Reg::R13),
    entry("%r14", Reg::R14),
];

/// First table entry whose mnemonic is a literal prefix of `input`.
/// The caller advances its cursor by the returned entry's name length.
pub fn find_register(input: &str) -> Option<&'static RegEntry> {
    REG_TABLE.iter().find(|e| input.starts_with(e.name))
}
