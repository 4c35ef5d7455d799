//! In-memory sheet grid and the calamine-backed loader

use std::path::Path;
use std::str::FromStr;

use calamine::{Data, Range, Reader, open_workbook_auto};
use serde::{Deserialize, Serialize};

use super::RosterError;

/// Which tab of a workbook to read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetSelector {
    /// Zero-based position in the workbook
    Index(usize),
    /// Tab name as shown in Excel
    Name(String),
}

impl FromStr for SheetSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<usize>() {
            Ok(index) => SheetSelector::Index(index),
            Err(_) => SheetSelector::Name(s.to_string()),
        })
    }
}

/// A fully loaded sheet, addressed absolutely from cell A1.
///
/// Blank cells are `None`; a cell holding only whitespace counts as blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Option<String>>>,
    column_count: usize,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<Option<String>>>) -> Self {
        let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, column_count }
    }

    /// Build a grid from a calamine range, padding the rows and columns the
    /// range skipped so that (0, 0) is always A1.
    pub fn from_range(range: &Range<Data>) -> Self {
        let (row_offset, col_offset) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows: Vec<Vec<Option<String>>> = vec![Vec::new(); row_offset];
        for row in range.rows() {
            let mut cells = vec![None; col_offset];
            cells.extend(row.iter().map(cell_text));
            rows.push(cells);
        }

        Self::from_rows(rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Cell text at (row, column), `None` when blank or outside the grid
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(s.clone()),
        // Phone numbers and postcodes come back as floats
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        other => Some(other.to_string()),
    }
}

/// Pick a tab name for `selector`.
///
/// A numeric selector matches a tab with that literal name before it is
/// taken as a position, so year-named tabs like "2024" stay reachable.
fn select_sheet(sheet_names: &[String], selector: Option<&SheetSelector>) -> Result<String, RosterError> {
    let by_name = |name: &str| sheet_names.iter().find(|n| *n == name).cloned();
    match selector {
        None => sheet_names.first().cloned().ok_or(RosterError::EmptyWorkbook),
        Some(SheetSelector::Index(i)) => by_name(&i.to_string())
            .or_else(|| sheet_names.get(*i).cloned())
            .ok_or_else(|| RosterError::SheetNotFound(format!("#{}", i))),
        Some(SheetSelector::Name(name)) => {
            by_name(name).ok_or_else(|| RosterError::SheetNotFound(name.clone()))
        }
    }
}

/// Load one sheet of a workbook (xlsx, xlsm, xls or ods) into a [`Grid`].
///
/// Without a selector the first sheet is read.
pub fn load_sheet<P: AsRef<Path>>(
    path: P,
    selector: Option<&SheetSelector>,
) -> Result<Grid, RosterError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let sheet_name = select_sheet(&sheet_names, selector)?;

    log::debug!("Reading sheet '{}' from {}", sheet_name, path.display());
    let range = workbook.worksheet_range(&sheet_name)?;
    let grid = Grid::from_range(&range);
    log::debug!(
        "Sheet '{}' has {} rows and {} columns",
        sheet_name,
        grid.row_count(),
        grid.column_count()
    );

    Ok(grid)
}

#[cfg(test)]
pub(crate) fn grid_from_strs(rows: &[&[&str]]) -> Grid {
    Grid::from_rows(
        rows.iter()
            .map(|r| {
                r.iter()
                    .map(|c| if c.is_empty() { None } else { Some(c.to_string()) })
                    .collect()
            })
            .collect(),
    )
}
