//! Instruction set data: opcode nibbles, operand formats and the mnemonic
//! table driving the line parser.

/// High nibble of the first code byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Icode {
    Halt = 0x0,
    Nop = 0x1,
    Rrmovq = 0x2,
    Irmovq = 0x3,
    Rmmovq = 0x4,
    Mrmovq = 0x5,
    Alu = 0x6,
    Jmp = 0x7,
    Call = 0x8,
    Ret = 0x9,
    Pushq = 0xA,
    Popq = 0xB,
}

/// Condition codes, the low nibble of `cmovXX` and `jXX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Cond {
    Yes = 0x0,
    Le = 0x1,
    L = 0x2,
    E = 0x3,
    Ne = 0x4,
    Ge = 0x5,
    G = 0x6,
}

/// ALU functions, the low nibble of `OPq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Alu {
    Add = 0x0,
    Sub = 0x1,
    And = 0x2,
    Xor = 0x3,
}

/// Pack two nibbles into one code byte.
pub const fn pack(hi: u8, lo: u8) -> u8 {
    (hi << 4) | (lo & 0xF)
}

/// Operand shape a mnemonic expects; selects the per-format parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fmt {
    /// No operands (`nop`, `halt`, `ret`).
    None,
    /// `rA` only (`pushq`, `popq`); the rB nibble stays `RNONE`.
    Reg,
    /// `rA, rB` (`rrmovq`, `cmovXX`, `OPq`).
    RegReg,
    /// `$V|sym, rB` (`irmovq`); the rA nibble stays `RNONE`.
    ImmReg,
    /// `rA, D(rB)` (`rmmovq`).
    RegMem,
    /// `D(rB), rA` (`mrmovq`).
    MemReg,
    /// Jump or call target: immediate or symbol.
    Dest,
    /// `.byte`/`.word`/`.long`/`.quad`; width is the descriptor length.
    Data,
    /// `.pos`: absolute position.
    Pos,
    /// `.align`: power-of-two alignment.
    Align,
}

/// One mnemonic: its text, packed code byte, total encoded length and
/// operand format. Directives carry no code byte.
#[derive(Debug, Clone, Copy)]
pub struct Instr {
    pub name: &'static str,
    pub code: u8,
    pub len: u8,
    pub fmt: Fmt,
}

const fn instr(name: &'static str, code: u8, len: u8, fmt: Fmt) -> Instr {
    Instr { name, code, len, fmt }
}

/// Mnemonic table. Lookup is a prefix match in declaration order, and some
/// mnemonics are prefixes of others (`jle`/`jl`, `jge`/`jg`), so the order
/// below is load-bearing and must not be rearranged.
pub const INSTR_SET: &[Instr] = &[
    instr("nop", pack(Icode::Nop as u8, Cond::Yes as u8), 1, Fmt::None),
    instr("halt", pack(Icode::Halt as u8, Cond::Yes as u8), 1, Fmt::None),
    instr("rrmovq", pack(Icode::Rrmovq as u8, Cond::Yes as u8), 2, Fmt::RegReg),
    instr("cmovle", pack(Icode::Rrmovq as u8, Cond::Le as u8), 2, Fmt::RegReg),
    instr("cmovl", pack(Icode::Rrmovq as u8, Cond::L as u8), 2, Fmt::RegReg),
    instr("cmove", pack(Icode::Rrmovq as u8, Cond::E as u8), 2, Fmt::RegReg),
    instr("cmovne", pack(Icode::Rrmovq as u8, Cond::Ne as u8), 2, Fmt::RegReg),
    instr("cmovge", pack(Icode::Rrmovq as u8, Cond::Ge as u8), 2, Fmt::RegReg),
    instr("cmovg", pack(Icode::Rrmovq as u8, Cond::G as u8), 2, Fmt::RegReg),
    instr("irmovq", pack(Icode::Irmovq as u8, Cond::Yes as u8), 10, Fmt::ImmReg),
    instr("rmmovq", pack(Icode::Rmmovq as u8, Cond::Yes as u8), 10, Fmt::RegMem),
    instr("mrmovq", pack(Icode::Mrmovq as u8, Cond::Yes as u8), 10, Fmt::MemReg),
    instr("addq", pack(Icode::Alu as u8, Alu::Add as u8), 2, Fmt::RegReg),
    instr("subq", pack(Icode::Alu as u8, Alu::Sub as u8), 2, Fmt::RegReg),
    instr("andq", pack(Icode::Alu as u8, Alu::And as u8), 2, Fmt::RegReg),
    instr("xorq", pack(Icode::Alu as u8, Alu::Xor as u8), 2, Fmt::RegReg),
    instr("jmp", pack(Icode::Jmp as u8, Cond::Yes as u8), 9, Fmt::Dest),
    instr("jle", pack(Icode::Jmp as u8, Cond::Le as u8), 9, Fmt::Dest),
    instr("jl", pack(Icode::Jmp as u8, Cond::L as u8), 9, Fmt::Dest),
    instr("je", pack(Icode::Jmp as u8, Cond::E as u8), 9, Fmt::Dest),
    instr("jne", pack(Icode::Jmp as u8, Cond::Ne as u8), 9, Fmt::Dest),
    instr("jge", pack(Icode::Jmp as u8, Cond::Ge as u8), 9, Fmt::Dest),
    instr("jg", pack(Icode::Jmp as u8, Cond::G as u8), 9, Fmt::Dest),
    instr("call", pack(Icode::Call as u8, Cond::Yes as u8), 9, Fmt::Dest),
    instr("ret", pack(Icode::Ret as u8, Cond::Yes as u8), 1, Fmt::None),
    instr("pushq", pack(Icode::Pushq as u8, Cond::Yes as u8), 2, Fmt::Reg),
    instr("popq", pack(Icode::Popq as u8, Cond::Yes as u8), 2, Fmt::Reg),
    instr(".byte", 0, 1, Fmt::Data),
    instr(".word", 0, 2, Fmt::Data),
    instr(".long", 0, 4, Fmt::Data),
    instr(".quad", 0, 8, Fmt::Data),
    instr(".pos", 0, 0, Fmt::Pos),
    instr(".align", 0, 0, Fmt::Align),
];

/// First table entry whose mnemonic is a literal prefix of `input`.
pub fn find_instr(input: &str) -> Option<&'static Instr> {
    INSTR_SET.iter().find(|i| input.starts_with(i.name))
}
