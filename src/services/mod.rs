pub mod francetravail_parser;
pub mod region_resolver;
pub mod salary_extractor;
pub mod translator;
pub mod warn_writer;

pub use region_resolver::{Geocoder, NominatimGeocoder};
pub use salary_extractor::{LlmAnswerer, QuestionAnswerer};
pub use translator::{LlmTranslator, Translator};
pub use warn_writer::WarnWriter;
