// Canonical mutation stream: whitespace-delimited, BED-like lines.
// Mandatory columns (0-based):
// 0. chromosome
// 1. position: integer or half-integer (even-length sequence contexts)
// 5. strand: + or -
// Other columns (end, reference, alternative, ...) are ignored.

mod reader;
mod record;

pub use reader::Reader;
pub use record::Record;
