use indexmap::IndexMap;

use crate::error::Error;

/// Label definitions: name to the address at the point of definition.
/// Owns its name strings; lookup is exact match only.
#[derive(Debug, Default)]
pub struct Symbols(IndexMap<String, u64>);

impl Symbols {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails without touching the table when `name` is already defined.
    pub fn insert(&mut self, name: &str, addr: u64) -> Result<(), Error> {
        if self.0.contains_key(name) {
            return Err(Error::DuplicateSymbol(name.to_string()));
        }
        self.0.insert(name.to_string(), addr);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.0.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup() {
        let mut syms = Symbols::new();
        syms.insert("Main", 0).unwrap();
        syms.insert("Loop", 0x20).unwrap();
        assert_eq!(syms.get("Loop"), Some(0x20));
        assert_eq!(syms.get("Main"), Some(0));
        assert_eq!(syms.get("End"), None);
    }

    #[test]
    fn duplicate_definition_is_rejected() {
        let mut syms = Symbols::new();
        syms.insert("Loop", 4).unwrap();
        assert_eq!(
            syms.insert("Loop", 8),
            Err(Error::DuplicateSymbol("Loop".to_string()))
        );
        // The original definition survives.
        assert_eq!(syms.get("Loop"), Some(4));
    }

    #[test]
    fn exact_match_only() {
        let mut syms = Symbols::new();
        syms.insert("Loop", 4).unwrap();
        assert_eq!(syms.get("Loo"), None);
        assert_eq!(syms.get("Loop2"), None);
    }
}
