//! XLSX reader
//!
//! Reads just enough of an XLSX workbook to back dependency tracing: the
//! sheet list, and for the active (first) sheet every cell's formula text
//! or literal value. Styles and the shared strings table are skipped;
//! a string literal only matters as "present, not numeric".

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::debug;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use cellscope_core::{CellAddress, CellContent, SheetStore};

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read the active sheet of a workbook file into a [`SheetStore`]
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<SheetStore> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read the active sheet of a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<SheetStore> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        // Read workbook.xml to get sheet info
        let sheet_info = Self::read_workbook_xml(&mut archive)?;

        // Read workbook.xml.rels to get sheet paths
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        // The first listed sheet is the active one
        let (name, r_id) = sheet_info
            .first()
            .ok_or_else(|| XlsxError::InvalidFormat("Workbook has no sheets".into()))?;

        let path = sheet_paths
            .get(r_id)
            .ok_or_else(|| XlsxError::MissingPart(format!("worksheet part for sheet '{}'", name)))?;

        let mut store = SheetStore::new(name.clone());
        Self::read_worksheet(&mut archive, path, &mut store)?;
        debug!(
            "read sheet '{}': {} cells ({} formulas)",
            name,
            store.cell_count(),
            store.formula_count()
        );

        Ok(store)
    }

    /// Read workbook.xml to get sheet names and rIds
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    let mut name = None;
                    let mut r_id = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"name" => {
                                name = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"r:id" => {
                                r_id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    if let (Some(name), Some(r_id)) = (name, r_id) {
                        sheets.push((name, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get sheet file paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => {
                                id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Target" => {
                                target = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Type" => {
                                rel_type = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    // Only include worksheet relationships
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ folder
                            let full_path = if let Some(stripped) = target.strip_prefix('/') {
                                stripped.to_string()
                            } else {
                                format!("xl/{}", target)
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read a worksheet's cells into the store
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        store: &mut SheetStore,
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();

        // Current cell state
        let mut current_cell_ref: Option<String> = None;
        let mut current_cell_type: Option<String> = None;
        let mut current_value: Option<String> = None;
        let mut current_formula: Option<String> = None;
        let mut in_cell = false;
        let mut in_value = false;
        let mut in_formula = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"c" => {
                        in_cell = true;
                        current_cell_ref = None;
                        current_cell_type = None;
                        current_value = None;
                        current_formula = None;

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"r" => {
                                    current_cell_ref =
                                        attr.unescape_value().ok().map(|s| s.to_string());
                                }
                                b"t" => {
                                    current_cell_type =
                                        attr.unescape_value().ok().map(|s| s.to_string());
                                }
                                _ => {}
                            }
                        }
                    }
                    b"v" if in_cell => {
                        in_value = true;
                    }
                    b"f" if in_cell => {
                        in_formula = true;
                    }
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"c" => {
                    // A present-but-blank cell
                    let mut cell_ref = None;
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"r" {
                            cell_ref = attr.unescape_value().ok().map(|s| s.to_string());
                        }
                    }
                    if let Some(ref r) = cell_ref {
                        let addr = Self::parse_ref(r)?;
                        store.set_content_at(addr, CellContent::Literal(None));
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"c" => {
                        if let Some(ref cell_ref) = current_cell_ref {
                            Self::process_cell(
                                store,
                                cell_ref,
                                current_cell_type.as_deref(),
                                current_value.as_deref(),
                                current_formula.as_deref(),
                            )?;
                        }
                        in_cell = false;
                    }
                    b"v" => {
                        in_value = false;
                    }
                    b"f" => {
                        in_formula = false;
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if in_value {
                        if let Ok(text) = e.unescape() {
                            current_value = Some(text.to_string());
                        }
                    } else if in_formula {
                        if let Ok(text) = e.unescape() {
                            current_formula = Some(text.to_string());
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Decide a cell's content and add it to the store
    fn process_cell(
        store: &mut SheetStore,
        cell_ref: &str,
        cell_type: Option<&str>,
        value: Option<&str>,
        formula: Option<&str>,
    ) -> XlsxResult<()> {
        let addr = Self::parse_ref(cell_ref)?;

        let content = if let Some(f) = formula {
            // Ensure formula starts with '='
            let text = if f.starts_with('=') {
                f.to_string()
            } else {
                format!("={}", f)
            };
            CellContent::Formula(text)
        } else {
            let numeric = match cell_type {
                // Shared or inline strings are non-numeric literals
                Some("s") | Some("str") | Some("inlineStr") | Some("e") => None,
                // Booleans map to 0/1
                Some("b") => value.map(|v| {
                    if v == "1" || v.eq_ignore_ascii_case("true") {
                        1.0
                    } else {
                        0.0
                    }
                }),
                // Plain numbers
                None | Some("n") => value.and_then(|v| v.parse::<f64>().ok()),
                Some(_) => None,
            };
            CellContent::Literal(numeric)
        };

        store.set_content_at(addr, content);
        Ok(())
    }

    fn parse_ref(cell_ref: &str) -> XlsxResult<CellAddress> {
        CellAddress::parse(cell_ref).map_err(|e| {
            XlsxError::Parse(format!("Invalid cell reference '{}': {}", cell_ref, e))
        })
    }
}
