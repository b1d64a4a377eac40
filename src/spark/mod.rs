//! Tecan Spark export handling
//!
//! Parsing of well labels, fragment sizes and concentration cells, the
//! ng/µL to nM conversion, and reading the exported spreadsheet.

pub mod concentration;
pub mod convert;
pub mod fragment;
pub mod sheet;
pub mod well;

pub use concentration::normalize_concentration;
pub use convert::ng_per_ul_to_nm;
pub use fragment::parse_fragment_size;
pub use sheet::{WellReading, read_spark_readings, readings_from_range};
pub use well::Well;
