pub mod compression;
mod error;
mod lines;
pub mod mutation;
pub mod nucleosome;
mod sorted;
mod traits;

pub use error::RecordError;
pub use lines::Lines;
pub use sorted::Sorted;
pub use traits::{Located, Provenance, ReadRecord, WriteRecord};
