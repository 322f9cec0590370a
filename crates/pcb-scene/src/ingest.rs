//! Spreadsheet ingestion: converts a two-sheet .xlsx workbook into a Board.
//!
//! Sheet "Pcb_Data" carries the board name and dimensions in row 2; sheet
//! "Components" carries a header row followed by one row per component in a
//! fixed 16-column order. Purely a format adapter; the scene core only ever
//! sees the resulting Board.

use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};

use zip::ZipArchive;

use crate::error::SceneError;
use crate::model::{Board, Component, Dimensions};

const BOARD_SHEET: &str = "Pcb_Data";
const COMPONENT_SHEET: &str = "Components";

/// Convert workbook bytes into a Board.
pub fn workbook_to_board(data: &[u8]) -> Result<Board, SceneError> {
    let sheets = read_workbook(data)?;
    let pcb = sheets
        .get(BOARD_SHEET)
        .ok_or_else(|| SceneError::SheetMissing(BOARD_SHEET.to_string()))?;
    let comps = sheets
        .get(COMPONENT_SHEET)
        .ok_or_else(|| SceneError::SheetMissing(COMPONENT_SHEET.to_string()))?;

    // Metadata row is row 2: name, width, height, thickness.
    let dimensions = Dimensions {
        width: number(pcb, 1, 1)?,
        height: number(pcb, 1, 2)?,
        thickness: number(pcb, 1, 3)?,
    };

    let mut components = Vec::new();
    for row in 1..comps.row_count() {
        if comps.is_blank_row(row) {
            continue;
        }
        components.push(component_from_row(comps, row)?);
    }

    log::info!(
        "ingested workbook: board '{}', {} components",
        pcb.cell(1, 0),
        components.len()
    );
    Ok(Board {
        name: pcb.cell(1, 0).to_string(),
        dimensions,
        components,
    })
}

fn component_from_row(sheet: &Sheet, row: usize) -> Result<Component, SceneError> {
    Ok(Component {
        location: sheet.cell(row, 0).to_string(),
        kind: sheet.cell(row, 1).to_string(),
        x: number(sheet, row, 2)?,
        y: number(sheet, row, 3)?,
        z: number(sheet, row, 4)?,
        rotation: number(sheet, row, 5)? as i32,
        face: sheet.cell(row, 6).to_string(),
        kdtec_pn: sheet.cell(row, 7).to_string(),
        customer_pn: sheet.cell(row, 8).to_string(),
        maker_pn: sheet.cell(row, 9).to_string(),
        description: sheet.cell(row, 10).to_string(),
        maker_name: sheet.cell(row, 11).to_string(),
        process: sheet.cell(row, 12).to_string(),
        dimensions: Dimensions {
            width: number(sheet, row, 13)?,
            height: number(sheet, row, 14)?,
            thickness: number(sheet, row, 15)?,
        },
    })
}

fn number(sheet: &Sheet, row: usize, col: usize) -> Result<f64, SceneError> {
    let text = sheet.cell(row, col);
    text.trim().parse().map_err(|_| {
        SceneError::DocumentParse(format!(
            "cell {}{} is not a number: '{text}'",
            column_name(col),
            row + 1
        ))
    })
}

// ─── Worksheet grid ─────────────────────────────────────────────────

/// Dense row-major cell grid for one worksheet; absent cells read as "".
#[derive(Debug, Default)]
struct Sheet {
    rows: Vec<Vec<String>>,
}

impl Sheet {
    fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    fn set(&mut self, row: usize, col: usize, value: String) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let r = &mut self.rows[row];
        if r.len() <= col {
            r.resize(col + 1, String::new());
        }
        r[col] = value;
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn is_blank_row(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .map(|r| r.iter().all(|c| c.trim().is_empty()))
            .unwrap_or(true)
    }
}

// ─── Workbook container ─────────────────────────────────────────────

fn read_workbook(data: &[u8]) -> Result<HashMap<String, Sheet>, SceneError> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    let shared = if archive.file_names().any(|n| n == "xl/sharedStrings.xml") {
        parse_shared_strings(&read_entry(&mut archive, "xl/sharedStrings.xml")?)?
    } else {
        Vec::new()
    };

    let workbook_xml = read_entry(&mut archive, "xl/workbook.xml")?;
    let rels_xml = read_entry(&mut archive, "xl/_rels/workbook.xml.rels")?;

    let workbook = roxmltree::Document::parse(&workbook_xml)?;
    let rels = roxmltree::Document::parse(&rels_xml)?;
    let targets: HashMap<&str, &str> = rels
        .descendants()
        .filter(|n| n.tag_name().name() == "Relationship")
        .filter_map(|n| Some((n.attribute("Id")?, n.attribute("Target")?)))
        .collect();

    let mut entries: Vec<(String, String)> = Vec::new();
    for node in workbook
        .descendants()
        .filter(|n| n.tag_name().name() == "sheet")
    {
        let Some(name) = node.attribute("name") else {
            continue;
        };
        let Some(rid) = node.attributes().find(|a| a.name() == "id") else {
            continue;
        };
        let Some(target) = targets.get(rid.value()) else {
            continue;
        };
        let path = match target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("xl/{target}"),
        };
        entries.push((name.to_string(), path));
    }

    let mut sheets = HashMap::new();
    for (name, path) in entries {
        let xml = read_entry(&mut archive, &path)?;
        sheets.insert(name, parse_sheet(&xml, &shared)?);
    }
    Ok(sheets)
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String, SceneError> {
    let mut file = archive
        .by_name(name)
        .map_err(|_| SceneError::DocumentParse(format!("workbook entry '{name}' is missing")))?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(text)
}

fn parse_shared_strings(xml: &str) -> Result<Vec<String>, SceneError> {
    let doc = roxmltree::Document::parse(xml)?;
    Ok(doc
        .descendants()
        .filter(|n| n.tag_name().name() == "si")
        .map(|si| {
            si.descendants()
                .filter(|n| n.tag_name().name() == "t")
                .filter_map(|n| n.text())
                .collect::<String>()
        })
        .collect())
}

fn parse_sheet(xml: &str, shared: &[String]) -> Result<Sheet, SceneError> {
    let doc = roxmltree::Document::parse(xml)?;
    let mut sheet = Sheet::default();

    for cell in doc.descendants().filter(|n| n.tag_name().name() == "c") {
        let Some(reference) = cell.attribute("r") else {
            continue;
        };
        let Some((row, col)) = parse_cell_ref(reference) else {
            continue;
        };

        let value = match cell.attribute("t").unwrap_or("n") {
            "inlineStr" => cell
                .descendants()
                .filter(|n| n.tag_name().name() == "t")
                .filter_map(|n| n.text())
                .collect::<String>(),
            "s" => {
                let v = child_text(&cell, "v");
                let index: usize = v.trim().parse().map_err(|_| {
                    SceneError::DocumentParse(format!("bad shared string index '{v}'"))
                })?;
                shared.get(index).cloned().unwrap_or_default()
            }
            _ => child_text(&cell, "v"),
        };
        sheet.set(row, col, value);
    }
    Ok(sheet)
}

fn child_text(node: &roxmltree::Node, name: &str) -> String {
    node.children()
        .find(|n| n.tag_name().name() == name)
        .and_then(|n| n.text())
        .unwrap_or("")
        .to_string()
}

/// "B2" -> (row 1, col 1), zero-based.
fn parse_cell_ref(reference: &str) -> Option<(usize, usize)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    let mut col = 0usize;
    for ch in letters.chars() {
        let v = (ch.to_ascii_uppercase() as usize).checked_sub('A' as usize)?;
        if v >= 26 {
            return None;
        }
        col = col * 26 + v + 1;
    }
    let row: usize = digits.parse().ok()?;
    if col == 0 || row == 0 {
        return None;
    }
    Some((row - 1, col - 1))
}

fn column_name(mut col: usize) -> String {
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    name
}
