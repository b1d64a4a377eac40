//! Operations module
//!
//! Coordinates the assignment run: locating the Spark file, matching wells to
//! samples, writing UDFs, and reporting the result

pub mod assign;
pub mod lookup;
pub mod report;
pub mod spark_file;

pub use assign::*;
pub use lookup::*;
pub use report::*;
pub use spark_file::*;
