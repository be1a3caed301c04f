//! Pipe-delimited `column!TYPE:size` tables (versions, CDN lists, `.build.info`).

use crate::error::{FormatError, Result};

/// A parsed pipe-delimited table. Column names are taken from the header
/// line; everything after `!` in a column spec (type, size) is discarded,
/// as only the name is needed to look up values.
#[derive(Debug, Clone)]
pub struct BpsvTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    sequence_number: Option<u64>,
}

impl BpsvTable {
    pub fn parse(input: &str) -> Result<Self> {
        let mut lines = input.lines();
        let header = loop {
            match lines.next() {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
                None => return Err(FormatError::BadCsv("empty input".into())),
            }
        };

        let columns: Vec<String> = header
            .split('|')
            .map(|spec| spec.split('!').next().unwrap_or(spec).trim().to_string())
            .collect();
        if columns.is_empty() || columns.iter().any(String::is_empty) {
            return Err(FormatError::BadCsv("malformed header".into()));
        }

        let mut rows = Vec::new();
        let mut sequence_number = None;
        for line in lines {
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                if sequence_number.is_none()
                    && let Some(n) = parse_seqn_comment(comment)
                {
                    sequence_number = Some(n);
                }
                continue;
            }
            let fields: Vec<String> = line.split('|').map(str::to_string).collect();
            if fields.len() != columns.len() {
                return Err(FormatError::BadCsv(format!(
                    "row has {} fields, expected {}",
                    fields.len(),
                    columns.len()
                )));
            }
            rows.push(fields);
        }

        Ok(Self {
            columns,
            rows,
            sequence_number,
        })
    }

    pub fn sequence_number(&self) -> Option<u64> {
        self.sequence_number
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Fail with `BadCsv` unless every named column is present.
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        for name in names {
            if self.column_index(name).is_none() {
                return Err(FormatError::BadCsv(format!("missing column {name}")));
            }
        }
        Ok(())
    }

    pub fn get<'a>(&'a self, row: &'a [String], name: &str) -> Option<&'a str> {
        self.column_index(name).map(|i| row[i].as_str())
    }
}

fn parse_seqn_comment(comment: &str) -> Option<u64> {
    let rest = comment.trim().strip_prefix("seqn")?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('=').or_else(|| rest.strip_prefix(':'))?;
    rest.trim().parse().ok()
}
