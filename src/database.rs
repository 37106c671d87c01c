use crate::suspects::{Fingerprint, Suspect};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::collections::HashSet;
use std::error::Error;
use std::fmt;
use std::io::Read;

#[derive(Debug)]
pub enum DatabaseError {
    Csv(csv::Error),
    MissingHeader,
    NoMotifs,
    InvalidMotif { line: u64, motif: String },
    ColumnCount { line: u64, expected: u64, found: u64 },
    InvalidCount { line: u64, value: String },
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DatabaseError::Csv(err) => write!(f, "Malformed database: {err}"),
            DatabaseError::MissingHeader => write!(f, "Database has no header line"),
            DatabaseError::NoMotifs => write!(f, "Database header lists no motifs"),
            DatabaseError::InvalidMotif { line, motif } => {
                write!(f, "Line {line}: empty or duplicate motif '{motif}' in header")
            }
            DatabaseError::ColumnCount {
                line,
                expected,
                found,
            } => write!(f, "Line {line}: expected {expected} columns, found {found}"),
            DatabaseError::InvalidCount { line, value } => {
                write!(f, "Line {line}: '{value}' is not an integer repeat count")
            }
        }
    }
}

impl Error for DatabaseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DatabaseError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<csv::Error> for DatabaseError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::UnequalLengths {
                pos,
                expected_len,
                len,
            } => DatabaseError::ColumnCount {
                line: pos.as_ref().map_or(0, |p| p.line()),
                expected: *expected_len,
                found: *len,
            },
            _ => DatabaseError::Csv(err),
        }
    }
}

#[derive(Debug)]
pub struct Database {
    pub motifs: Vec<String>,
    pub suspects: Vec<Suspect>,
}

/// Parse a suspect database
/// The header is `name,<motif>,<motif>,...`, every other record `<name>,<count>,<count>,...`
/// Fields may be quoted, blank lines are skipped and suspects are returned in file order
pub fn parse_database<R: Read>(reader: R) -> Result<Database, DatabaseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(false)
        .from_reader(reader);

    let header = reader.headers()?.clone();
    if header.is_empty() {
        return Err(DatabaseError::MissingHeader);
    }
    let motifs = header
        .iter()
        .skip(1)
        .map(str::to_string)
        .collect::<Vec<String>>();
    if motifs.is_empty() {
        return Err(DatabaseError::NoMotifs);
    }
    let mut seen = HashSet::new();
    for motif in &motifs {
        if motif.is_empty() || !seen.insert(motif) {
            return Err(DatabaseError::InvalidMotif {
                line: header.position().map_or(1, |pos| pos.line()),
                motif: motif.clone(),
            });
        }
    }
    debug!("Database motifs: {}", motifs.join(","));

    let mut suspects = vec![];
    for result in reader.records() {
        let record = result?;
        let mut fingerprint = Fingerprint::with_capacity(motifs.len());
        for (motif, value) in motifs.iter().zip(record.iter().skip(1)) {
            let count = value
                .parse::<i64>()
                .map_err(|_| DatabaseError::InvalidCount {
                    line: line_of(&record),
                    value: value.to_string(),
                })?;
            fingerprint.insert(motif.clone(), count);
        }
        suspects.push(Suspect::new(&record[0], fingerprint));
    }
    debug!("Parsed {} suspects", suspects.len());
    Ok(Database { motifs, suspects })
}

// 1-based line the record starts on
fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |pos| pos.line())
}
