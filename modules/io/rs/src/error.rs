use derive_more::{Display, Error};

/// Input errors that abort a run. Both variants point at the file and line responsible.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RecordError {
    /// A line that can't be decoded into a record: too few columns, non-numeric coordinates or
    /// an unknown strand symbol.
    #[display("{file}:{line}: invalid {field} ({reason}) in record '{content}'")]
    Malformed {
        file: String,
        line: usize,
        field: &'static str,
        reason: String,
        content: String,
    },
    /// A record that sorts before its predecessor by (chromosome, position).
    #[display(
        "{file}:{line}: records must be sorted by chromosome (lexicographically) and position, \
         but {current} comes after {previous}"
    )]
    Unsorted {
        file: String,
        line: usize,
        previous: String,
        current: String,
    },
}

impl RecordError {
    pub fn file(&self) -> &str {
        match self {
            RecordError::Malformed { file, .. } | RecordError::Unsorted { file, .. } => file,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            RecordError::Malformed { line, .. } | RecordError::Unsorted { line, .. } => *line,
        }
    }
}
