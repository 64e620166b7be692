pub mod date_parser;
pub mod enrichment;
pub mod field_mapper;
pub mod merger;
pub mod record_ctx;
pub mod source_profile;
pub mod value_normalizer;

pub use date_parser::parse_relative_date;
pub use enrichment::{
    normalize_salary, salary_norm, Enricher, EnrichmentOptions, EnrichmentReport,
    EnrichmentServices,
};
pub use field_mapper::{map_batch, map_record};
pub use merger::{merge, write_csv, write_dataset};
pub use record_ctx::RecordCtx;
pub use source_profile::{SourceProfile, ADZUNA, FRANCE_TRAVAIL};
pub use value_normalizer::{normalize_field, normalize_record};
