//! SmallSQL dialect.

mod generator;
mod importer;

pub use generator::SmallsqlGenerator;
pub use importer::SmallsqlImporter;
