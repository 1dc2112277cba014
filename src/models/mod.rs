pub mod product;
pub mod query;
pub mod quotation;
pub mod report;
pub mod result;

pub use product::{CatalogRow, Product};
pub use query::{BatchInput, Query};
pub use quotation::{Quotation, QuotationLine};
pub use report::{format_brl, QueryReport, SuggestionReport, NOT_FOUND_LABEL};
pub use result::{BatchOutcome, MatchResult, MatchSource, ScoredCandidate};
