use color_print::cformat;

/// What a source line turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Blank line or pure comment; contributes nothing to the image.
    Blank,
    /// Well-formed label, instruction or directive.
    Code,
    /// Parse failed; the record is kept for diagnostics only.
    Err,
}

/// One source line with its assigned address and encoding. Created when the
/// line is read, filled during pass 1, patched at most once during
/// relocation, never dropped until the run ends.
#[derive(Debug, Clone)]
pub struct Record {
    pub raw: String,
    pub kind: LineKind,
    /// Assigned during pass 1; immutable afterwards.
    pub addr: u64,
    /// Encoded bytes, sized to the instruction's declared length. Sites of
    /// unresolved symbols hold zero until relocation overwrites them.
    pub bytes: Vec<u8>,
}

impl Record {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// One listing row: `  0xHHH: <hex bytes> | <source>`. Blank and
    /// malformed lines keep the column layout with an empty left side.
    pub fn cformat(&self) -> String {
        match self.kind {
            LineKind::Code => {
                let hex: String = self.bytes.iter().map(|b| format!("{:02x}", b)).collect();
                cformat!(
                    "  <green>0x{:03x}</>: <yellow>{:<20}</> | {}",
                    self.addr,
                    hex,
                    self.raw
                )
            }
            _ => format!("{:<29} | {}", "", self.raw),
        }
    }
}

/// Little-endian store of the low `buf.len()` bytes of `value`.
pub fn fill_le(buf: &mut [u8], value: u64) {
    let n = buf.len();
    buf.copy_from_slice(&value.to_le_bytes()[..n]);
}
