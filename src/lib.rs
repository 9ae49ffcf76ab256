pub mod bitstreams;
pub mod codec;
pub mod huffman;
pub mod properties;

use std::path::PathBuf;

use thiserror::Error;

pub use codec::{compress, decompress, Decoder};
pub use huffman::{count_frequencies, Code, CodeTable, FrequencyTable, HuffmanTree};

#[derive(Error, Debug)]
pub enum HuffmanError {
    #[error("the input contains no symbols, nothing to encode")]
    EmptyInput,
    #[error("could not find {}", .0.display())]
    MissingArtifact(PathBuf),
    #[error("byte {0:#04x} has no entry in the code table")]
    UnknownSymbol(u8),
    #[error("the compressed stream cannot be resolved against the code table")]
    CorruptStream,
    #[error("I/O failure: {0}")]
    IO(#[from] std::io::Error),
}
