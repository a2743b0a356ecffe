// Nucleosome dyad stream: whitespace-delimited, BED-like lines.
// Mandatory columns (0-based):
// 0. chromosome
// 1. dyad centre: integer
// Other columns are ignored.

mod reader;
mod record;

pub use reader::Reader;
pub use record::Record;
