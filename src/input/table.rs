use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::input::InputError;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    pub name: &'static str,
    pub columns: Vec<String>,
    /// (1-based line number, fields)
    pub rows: Vec<(usize, Vec<String>)>,
}

/// Tab-separated table with a header row. Blank lines are skipped; short rows
/// are padded with empty cells.
pub fn read_table<R: BufRead>(name: &'static str, mut reader: R) -> Result<Table, InputError> {
    let mut buf = String::new();
    let read = reader.read_line(&mut buf)?;
    if read == 0 {
        return Err(InputError::Parse {
            table: name,
            line: 1,
            message: "file is empty".to_string(),
        });
    }
    let columns: Vec<String> = buf
        .trim_end_matches(['\r', '\n'])
        .trim_start_matches('\u{feff}')
        .split('\t')
        .map(|s| s.trim().to_ascii_lowercase())
        .collect();

    let mut rows = Vec::new();
    let mut line_no = 1usize;
    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        let mut fields: Vec<String> = line.split('\t').map(|s| s.trim().to_string()).collect();
        if fields.len() > columns.len() {
            tracing::warn!(
                table = name,
                line = line_no,
                "row has {} fields but header has {}; extra fields ignored",
                fields.len(),
                columns.len()
            );
            fields.truncate(columns.len());
        }
        fields.resize(columns.len(), String::new());
        rows.push((line_no, fields));
    }

    Ok(Table {
        name,
        columns,
        rows,
    })
}

impl Table {
    /// Index of the first column matching any alias; the first alias names the
    /// column in the error.
    pub fn require(&self, aliases: &[&'static str]) -> Result<usize, InputError> {
        self.optional(aliases).ok_or(InputError::MissingColumn {
            table: self.name,
            column: aliases[0],
        })
    }

    pub fn optional(&self, aliases: &[&str]) -> Option<usize> {
        aliases
            .iter()
            .find_map(|alias| self.columns.iter().position(|c| c == alias))
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|(line, fields)| Row {
            table: self.name,
            line: *line,
            columns: &self.columns,
            fields,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub table: &'static str,
    pub line: usize,
    columns: &'a [String],
    fields: &'a [String],
}

pub fn is_null(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "" | "null" | "nan" | "none" | "<na>"
    )
}

impl<'a> Row<'a> {
    pub fn text(&self, idx: usize) -> &'a str {
        self.fields[idx].as_str()
    }

    pub fn opt_text(&self, idx: Option<usize>) -> Option<String> {
        let raw = self.text(idx?);
        if is_null(raw) {
            None
        } else {
            Some(raw.to_string())
        }
    }

    /// Null cells count as zero.
    pub fn count(&self, idx: usize) -> Result<u64, InputError> {
        Ok(self.opt_count(Some(idx))?.unwrap_or(0))
    }

    pub fn opt_count(&self, idx: Option<usize>) -> Result<Option<u64>, InputError> {
        let Some(idx) = idx else {
            return Ok(None);
        };
        let raw = self.text(idx);
        if is_null(raw) {
            return Ok(None);
        }
        if let Ok(v) = raw.parse::<u64>() {
            return Ok(Some(v));
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => Ok(Some(v as u64)),
            _ => Err(self.error(idx, "a non-negative count")),
        }
    }

    pub fn int(&self, idx: usize) -> Result<i32, InputError> {
        self.opt_int(Some(idx))?
            .ok_or_else(|| self.error(idx, "an integer"))
    }

    pub fn opt_int(&self, idx: Option<usize>) -> Result<Option<i32>, InputError> {
        let Some(idx) = idx else {
            return Ok(None);
        };
        let raw = self.text(idx);
        if is_null(raw) {
            return Ok(None);
        }
        if let Ok(v) = raw.parse::<i32>() {
            return Ok(Some(v));
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() <= i32::MAX as f64 => {
                Ok(Some(v as i32))
            }
            _ => Err(self.error(idx, "an integer")),
        }
    }

    pub fn flag(&self, idx: Option<usize>) -> Result<bool, InputError> {
        let Some(idx) = idx else {
            return Ok(false);
        };
        match self.text(idx).to_ascii_lowercase().as_str() {
            "true" | "t" | "1" | "yes" | "y" => Ok(true),
            "false" | "f" | "0" | "no" | "n" | "" | "null" => Ok(false),
            _ => Err(self.error(idx, "a boolean")),
        }
    }

    fn error(&self, idx: usize, expected: &str) -> InputError {
        InputError::Parse {
            table: self.table,
            line: self.line,
            message: format!(
                "expected {expected} in column {}, got {:?}",
                self.columns[idx],
                self.text(idx)
            ),
        }
    }
}
