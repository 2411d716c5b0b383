// src/extractors/mod.rs
pub mod normalize;
pub mod statements;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use normalize::{Cell, NormalizedTable};
#[allow(unused_imports)]
pub use statements::{extract_statements, StatementTables};
