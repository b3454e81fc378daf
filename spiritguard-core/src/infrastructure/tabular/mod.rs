// spiritguard-core/src/infrastructure/tabular/mod.rs

pub mod encoding;
pub mod reader;

pub use encoding::{TextEncoding, decode_text};
pub use reader::read_table;
