//! The two-pass driver. Pass 1 walks the source lines, encodes each into a
//! record at the current program counter and queues unresolved symbol
//! references; pass 2 patches those sites once every label is known.

use std::io::{self, Write};

use arch::isa::{find_instr, pack, Fmt};
use arch::reg::Reg;

use crate::error::{AsmError, Error};
use crate::parser::{
    check_tail, parse_data, parse_delim, parse_digit, parse_imm, parse_label, parse_mem,
    parse_reg, skip_blank, Imm,
};
use crate::record::{fill_le, LineKind, Record};
use crate::reloc::Relocs;
use crate::symbols::Symbols;

/// Assemble a complete source text. Fail-fast: the first error aborts the
/// run and no output is produced.
pub fn assemble(source: &str) -> Result<Program, AsmError> {
    let mut session = Assembler::new();
    for raw in source.lines() {
        session.line(raw)?;
    }
    session.finish()
}

// ----------------------------------------------------------------------------
// Session

/// One assembly run: the program counter, the ordered record list and the
/// symbol and relocation tables. Feed lines with [`Assembler::line`], then
/// call [`Assembler::finish`] to resolve forward references.
#[derive(Debug, Default)]
pub struct Assembler {
    pc: u64,
    lineno: usize,
    records: Vec<Record>,
    symbols: Symbols,
    relocs: Relocs,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one source line (line terminator already stripped) and append
    /// its record.
    pub fn line(&mut self, raw: &str) -> Result<(), AsmError> {
        self.lineno += 1;
        let lineno = self.lineno;
        let mark = self.relocs.len();
        self.parse_line(raw).map_err(|e| {
            // A line can fail after queueing a patch (a bad tail behind a
            // symbol operand); that patch would target the empty error
            // record, so retract it.
            self.relocs.truncate(mark);
            self.push(raw, LineKind::Err, self.pc, Vec::new());
            e.at(lineno)
        })
    }

    /// Pass 2: patch every deferred reference, then hand the finished
    /// program over.
    pub fn finish(mut self) -> Result<Program, AsmError> {
        self.relocs
            .resolve_all(&self.symbols, &mut self.records)
            .map_err(Error::no_line)?;
        Ok(Program {
            records: self.records,
            symbols: self.symbols,
        })
    }

    fn push(&mut self, raw: &str, kind: LineKind, addr: u64, bytes: Vec<u8>) {
        self.records.push(Record {
            raw: raw.to_string(),
            kind,
            addr,
            bytes,
        });
    }

    /// Write an immediate-or-symbol at `offset..offset+width`. A symbol
    /// already in the table resolves now; otherwise the placeholder zeros
    /// stay and a relocation entry points at the site.
    fn put_imm(&mut self, bytes: &mut [u8], offset: usize, width: usize, imm: Imm) {
        match imm {
            Imm::Literal(value) => fill_le(&mut bytes[offset..offset + width], value),
            Imm::Symbol(name) => match self.symbols.get(&name) {
                Some(addr) => fill_le(&mut bytes[offset..offset + width], addr),
                None => self.relocs.push(name, self.records.len(), offset, width),
            },
        }
    }

    fn parse_line(&mut self, raw: &str) -> Result<(), Error> {
        let mut s = skip_blank(raw);

        // Blank line or pure comment.
        if s.is_empty() || s.starts_with('#') {
            self.push(raw, LineKind::Blank, self.pc, Vec::new());
            return Ok(());
        }

        // Optional label, defined at the current counter.
        let mut labeled = false;
        if let Some((rest, name)) = parse_label(s) {
            self.symbols.insert(&name, self.pc)?;
            s = rest;
            labeled = true;
        }

        // Optional instruction mnemonic. A line with neither is a syntax
        // error; a label alone is a zero-length record.
        let t = skip_blank(s);
        let inst = match find_instr(t) {
            Some(inst) => {
                s = &t[inst.name.len()..];
                inst
            }
            None => {
                if !labeled {
                    return Err(Error::InvalidOperand {
                        expected: "label or instruction",
                    });
                }
                check_tail(t)?;
                self.push(raw, LineKind::Code, self.pc, Vec::new());
                return Ok(());
            }
        };

        let mut bytes = vec![0u8; inst.len as usize];
        if let Some(first) = bytes.first_mut() {
            *first = inst.code;
        }
        let mut addr = self.pc;

        match inst.fmt {
            Fmt::None => {}
            Fmt::Reg => {
                let (rest, ra) = parse_reg(s)?;
                s = rest;
                bytes[1] = pack(ra.into(), Reg::RNONE.into());
            }
            Fmt::RegReg => {
                let (rest, ra) = parse_reg(s)?;
                let rest = parse_delim(rest, ',')?;
                let (rest, rb) = parse_reg(rest)?;
                s = rest;
                bytes[1] = pack(ra.into(), rb.into());
            }
            Fmt::ImmReg => {
                let (rest, imm) = parse_imm(s)?;
                let rest = parse_delim(rest, ',')?;
                let (rest, rb) = parse_reg(rest)?;
                s = rest;
                bytes[1] = pack(Reg::RNONE.into(), rb.into());
                self.put_imm(&mut bytes, 2, 8, imm);
            }
            Fmt::RegMem => {
                let (rest, ra) = parse_reg(s)?;
                let rest = parse_delim(rest, ',')?;
                let (rest, (disp, rb)) = parse_mem(rest)?;
                s = rest;
                bytes[1] = pack(ra.into(), rb.into());
                fill_le(&mut bytes[2..10], disp);
            }
            Fmt::MemReg => {
                let (rest, (disp, rb)) = parse_mem(s)?;
                let rest = parse_delim(rest, ',')?;
                let (rest, ra) = parse_reg(rest)?;
                s = rest;
                bytes[1] = pack(ra.into(), rb.into());
                fill_le(&mut bytes[2..10], disp);
            }
            Fmt::Dest => {
                let (rest, imm) = parse_imm(s)?;
                s = rest;
                self.put_imm(&mut bytes, 1, 8, imm);
            }
            Fmt::Data => {
                let (rest, imm) = parse_data(s)?;
                s = rest;
                let width = inst.len as usize;
                self.put_imm(&mut bytes, 0, width, imm);
            }
            Fmt::Pos => {
                let (rest, target) = parse_digit(s)?;
                s = rest;
                // The counter never moves backward over placed bytes.
                if target < self.pc {
                    return Err(Error::Overlap(target));
                }
                self.pc = target;
                addr = target;
            }
            Fmt::Align => {
                let (rest, align) = parse_digit(s)?;
                s = rest;
                if align == 0 || align & (align - 1) != 0 {
                    return Err(Error::InvalidAlignment(align));
                }
                self.pc = (self.pc + align - 1) & !(align - 1);
                addr = self.pc;
            }
        }

        check_tail(s)?;
        self.push(raw, LineKind::Code, addr, bytes);
        self.pc = addr + inst.len as u64;
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Program

/// A fully assembled and relocated program.
#[derive(Debug)]
pub struct Program {
    records: Vec<Record>,
    symbols: Symbols,
}

impl Program {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn symbol(&self, name: &str) -> Option<u64> {
        self.symbols.get(name)
    }

    /// Total image size: the highest `addr + len` over emitting records.
    pub fn image_len(&self) -> u64 {
        self.records
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| r.addr + r.len() as u64)
            .max()
            .unwrap_or(0)
    }

    /// Flat image over `[0, image_len)`: records in address order with the
    /// gaps between them zero-filled. Zero-length records contribute
    /// nothing.
    pub fn image(&self) -> Vec<u8> {
        let mut image = Vec::new();
        for rec in &self.records {
            if rec.is_empty() {
                continue;
            }
            image.resize(rec.addr as usize, 0);
            image.extend_from_slice(&rec.bytes);
        }
        image
    }

    /// Write the image to the output stream.
    pub fn emit<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.image())
    }
}
