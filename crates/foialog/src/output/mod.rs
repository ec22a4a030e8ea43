//! Output handling: writing the normalized table.

mod writer;

pub use writer::Writer;
