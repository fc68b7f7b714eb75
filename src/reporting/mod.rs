mod reporter;

pub use reporter::SummaryReporter;
