//! Reads a generated minimal workbook back into a cell store

use std::io::{Cursor, Seek, Write};

use pretty_assertions::assert_eq;

use cellscope_core::{CellAddress, CellContent, CellStore};
use cellscope_xlsx::{XlsxError, XlsxReader};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Data" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

const SHEET1: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
<row r="1">
<c r="A1"><v>5</v></c>
<c r="B1" t="s"><v>0</v></c>
<c r="C1"><f>A1+B1</f><v>15</v></c>
<c r="D1" t="b"><v>1</v></c>
<c r="E1"/>
</row>
<row r="2">
<c r="A2"><f>=SUM(A1:B1)</f></c>
</row>
</sheetData>
</worksheet>"#;

fn write_workbook<W: Write + Seek>(writer: W) -> zip::result::ZipResult<()> {
    let options = zip::write::SimpleFileOptions::default();
    let mut zip = zip::ZipWriter::new(writer);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;

    zip.start_file("xl/workbook.xml", options)?;
    zip.write_all(WORKBOOK.as_bytes())?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    zip.write_all(WORKBOOK_RELS.as_bytes())?;

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    zip.write_all(SHEET1.as_bytes())?;

    zip.finish()?;
    Ok(())
}

fn content(store: &impl CellStore, addr: &str) -> CellContent {
    store.content(&CellAddress::parse(addr).unwrap()).unwrap()
}

#[test]
fn reads_cells_from_generated_workbook() {
    let mut buf = Cursor::new(Vec::new());
    write_workbook(&mut buf).unwrap();
    buf.set_position(0);

    let store = XlsxReader::read(buf).unwrap();

    assert_eq!(store.sheet_name(), "Data");
    assert_eq!(store.cell_count(), 6);
    assert_eq!(store.formula_count(), 2);

    // Numeric literal
    assert_eq!(content(&store, "A1"), CellContent::Literal(Some(5.0)));

    // Shared string literal: present, not numeric
    assert_eq!(content(&store, "B1"), CellContent::Literal(None));

    // Formula text gains a leading '='; the cached <v> is ignored
    assert_eq!(
        content(&store, "C1"),
        CellContent::Formula("=A1+B1".into())
    );

    // Boolean maps to 0/1
    assert_eq!(content(&store, "D1"), CellContent::Literal(Some(1.0)));

    // Blank-but-present cell
    assert_eq!(content(&store, "E1"), CellContent::Literal(None));

    // Formula already carrying '=' is kept as-is
    assert_eq!(
        content(&store, "A2"),
        CellContent::Formula("=SUM(A1:B1)".into())
    );
}

#[test]
fn reads_from_file_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");
    let file = std::fs::File::create(&path).unwrap();
    write_workbook(file).unwrap();

    let store = XlsxReader::read_file(&path).unwrap();
    assert_eq!(store.sheet_name(), "Data");
    assert_eq!(content(&store, "A1"), CellContent::Literal(Some(5.0)));
}

#[test]
fn missing_address_is_unknown_cell() {
    let mut buf = Cursor::new(Vec::new());
    write_workbook(&mut buf).unwrap();
    buf.set_position(0);

    let store = XlsxReader::read(buf).unwrap();
    let z99 = CellAddress::parse("Z99").unwrap();
    assert!(store.content(&z99).is_err());
}

#[test]
fn rejects_non_xlsx_archive() {
    let mut buf = Cursor::new(Vec::new());
    {
        let options = zip::write::SimpleFileOptions::default();
        let mut zip = zip::ZipWriter::new(&mut buf);
        zip.start_file("not_a_workbook.txt", options).unwrap();
        zip.write_all(b"nope").unwrap();
        zip.finish().unwrap();
    }
    buf.set_position(0);

    let err = XlsxReader::read(buf).unwrap_err();
    assert!(matches!(err, XlsxError::InvalidFormat(_)));
}
