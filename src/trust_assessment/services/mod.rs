mod assessment_rules;
mod constraint_parser;
mod exclusion_filter;
mod listing_parser;
mod report_aggregator;

pub use assessment_rules::AssessmentRules;
pub use constraint_parser::{ConstraintParseError, ConstraintParser, VersionConstraint};
pub use exclusion_filter::ExclusionFilter;
pub use listing_parser::{DependencyListing, ListingParser};
pub use report_aggregator::ReportAggregator;
