/// Formatter adapters for rendering assessment reports
mod text_formatter;

pub use text_formatter::TextReportFormatter;
