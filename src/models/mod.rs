pub mod adzuna;
pub mod francetravail;
pub mod job;
pub mod loaders;
pub mod vocabulary;

pub use adzuna::{AdzunaJob, AdzunaListing, AdzunaResponse};
pub use francetravail::{FranceTravailListing, OfferCard, OfferDetail};
pub use job::{Batch, Coordinates, JobRecord, RawRecord, SalaryPeriod, TargetField, CANONICAL_COLUMNS};
pub use loaders::{load_raw_records, write_rows};
pub use vocabulary::{Fallback, Vocabulary, UNKNOWN};
