//! Text side of the pipeline: turning files into term sequences.
pub mod loader;
pub mod tokenizer;
