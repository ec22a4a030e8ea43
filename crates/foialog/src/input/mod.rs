//! Input handling: parsing and data table representation.

mod parser;
mod source;
mod typing;

pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata, is_missing, MISSING};
pub use typing::{sketch_column_type, ColumnType};
