//! Read-only cell store interface and the in-memory implementation

use ahash::AHashMap;

use crate::address::CellAddress;
use crate::cell::CellContent;
use crate::error::{Error, Result};

/// The narrow read interface the dependency resolver consumes
///
/// A store exposes exactly one active sheet; every address is resolved
/// against it. Lookups are synchronous and side-effect free.
pub trait CellStore {
    /// Name of the active sheet all addresses resolve against
    fn sheet_name(&self) -> &str;

    /// Content of the cell at `addr`
    ///
    /// Returns [`Error::UnknownCell`] if the address does not exist on
    /// the active sheet.
    fn content(&self, addr: &CellAddress) -> Result<CellContent>;
}

/// In-memory single-sheet cell store
///
/// Backs the unit tests and the XLSX adapter.
#[derive(Debug, Clone, Default)]
pub struct SheetStore {
    name: String,
    cells: AHashMap<CellAddress, CellContent>,
}

impl SheetStore {
    /// Create an empty store for a named sheet
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: AHashMap::new(),
        }
    }

    /// Set a numeric literal at an A1-style address
    pub fn set_value(&mut self, address: &str, value: f64) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.cells.insert(addr, CellContent::Literal(Some(value)));
        Ok(())
    }

    /// Set a non-numeric literal (text or blank) at an A1-style address
    pub fn set_text(&mut self, address: &str) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.cells.insert(addr, CellContent::Literal(None));
        Ok(())
    }

    /// Set a formula at an A1-style address
    pub fn set_formula(&mut self, address: &str, formula: &str) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.cells
            .insert(addr, CellContent::Formula(formula.to_string()));
        Ok(())
    }

    /// Set content at an already-parsed address
    pub fn set_content_at(&mut self, addr: CellAddress, content: CellContent) {
        self.cells.insert(addr, content);
    }

    /// Number of cells in the store
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of formula cells in the store
    pub fn formula_count(&self) -> usize {
        self.cells.values().filter(|c| c.is_formula()).count()
    }

    /// Check if the store holds no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl CellStore for SheetStore {
    fn sheet_name(&self) -> &str {
        &self.name
    }

    fn content(&self, addr: &CellAddress) -> Result<CellContent> {
        self.cells
            .get(addr)
            .cloned()
            .ok_or_else(|| Error::UnknownCell(addr.to_a1_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_store_roundtrip() {
        let mut store = SheetStore::new("Sheet1");
        store.set_value("A1", 5.0).unwrap();
        store.set_formula("B1", "=A1*2").unwrap();
        store.set_text("C1").unwrap();

        assert_eq!(store.sheet_name(), "Sheet1");
        assert_eq!(store.cell_count(), 3);
        assert_eq!(store.formula_count(), 1);

        let a1 = CellAddress::parse("A1").unwrap();
        assert_eq!(store.content(&a1).unwrap(), CellContent::Literal(Some(5.0)));

        let b1 = CellAddress::parse("B1").unwrap();
        assert_eq!(
            store.content(&b1).unwrap(),
            CellContent::Formula("=A1*2".into())
        );

        let c1 = CellAddress::parse("C1").unwrap();
        assert_eq!(store.content(&c1).unwrap(), CellContent::Literal(None));
    }

    #[test]
    fn test_unknown_cell() {
        let store = SheetStore::new("Sheet1");
        let z99 = CellAddress::parse("Z99").unwrap();
        let err = store.content(&z99).unwrap_err();
        assert!(matches!(err, Error::UnknownCell(ref a) if a == "Z99"));
    }
}
