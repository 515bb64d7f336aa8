use crate::error::Error;
use crate::record::{fill_le, Record};
use crate::symbols::Symbols;

/// A deferred patch: once `name` is defined, write its address as `width`
/// little-endian bytes into record `record` at `offset`.
#[derive(Debug, Clone)]
pub struct Reloc {
    pub name: String,
    pub record: usize,
    pub offset: usize,
    pub width: usize,
}

#[derive(Debug, Default)]
pub struct Relocs(Vec<Reloc>);

impl Relocs {
    pub fn new() -> Self {
        Self::default()
    }

    /// No validation here; the symbol may legitimately stay undefined until
    /// the end of pass 1 (a forward jump).
    pub fn push(&mut self, name: String, record: usize, offset: usize, width: usize) {
        self.0.push(Reloc { name, record, offset, width });
    }

    /// Patch every recorded site. Aborts on the first symbol still missing;
    /// earlier patches stay in place since the run has failed anyway.
    pub fn resolve_all(&self, symbols: &Symbols, records: &mut [Record]) -> Result<(), Error> {
        for reloc in &self.0 {
            let addr = symbols
                .get(&reloc.name)
                .ok_or_else(|| Error::UnknownSymbol(reloc.name.clone()))?;
            let site = &mut records[reloc.record].bytes[reloc.offset..reloc.offset + reloc.width];
            fill_le(site, addr);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Discard entries pushed after the `len` mark. Used to retract the
    /// patches of a line that failed partway through encoding.
    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }
}
