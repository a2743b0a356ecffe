pub use per_strand::PerStrand;
pub use position::Position;
pub use strand::Strand;

mod per_strand;
mod position;
mod strand;
