pub mod controller;
pub mod report;

pub use controller::SheetController;
pub use report::GenerationReport;
