/// Domain layer - dependency trust assessment
///
/// Pure models and services with no I/O: value objects, the policy model,
/// listing and constraint parsing, the assessment rules and the report
/// aggregator.
pub mod domain;
pub mod services;
