//! # huffcoder
//!
//! Static Huffman compression.  The work is split into stages:
//! * `freq` counts symbols and adds the end-of-stream sentinel
//! * `tree` builds the prefix tree from the counts
//! * `codes` derives the bit code of every symbol from the tree
//! * `codec` encodes bytes to bits, and decodes bits back to bytes
//! * `container` reads and writes the frequency table header
//! * `huffman` sequences everything for whole streams
//! * `names` gives the conventional output file names
//!
//! The tree itself is never stored, only the frequency table.  Decompression
//! rebuilds the same tree because tree construction is deterministic.

mod tools;
pub mod freq;
pub mod tree;
pub mod codes;
pub mod codec;
pub mod container;
pub mod huffman;
pub mod names;

type DYNERR = Box<dyn std::error::Error>;

/// A unit of the coding alphabet, either a byte value or a sentinel
pub type Symbol = u16;

/// largest symbol that stands for an actual byte
pub const MAX_SYMBOL: Symbol = 255;
/// marks the end of the encoded stream, never produced by the input
pub const EOF_SYMBOL: Symbol = 256;
/// carried by internal tree nodes, never a real symbol
pub const INTERNAL: Symbol = 257;

/// Coding Errors
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("frequency table is empty")]
    EmptyAlphabet,
    #[error("symbol {0} has no code")]
    UnknownSymbol(Symbol),
    #[error("bit stream ended before end of data")]
    TruncatedStream,
    #[error("bit stream does not follow the code tree")]
    InvalidCode,
    #[error("header is not a valid frequency table")]
    MalformedHeader,
    #[error("expected extension .huf: {0}")]
    UnexpectedExtension(String)
}

/// Options controlling compression
#[derive(Clone)]
pub struct Options {
    /// starting position in the input file
    pub in_offset: u64,
    /// starting position in the output file
    pub out_offset: u64
}

pub const STD_OPTIONS: Options = Options {
    in_offset: 0,
    out_offset: 0
};
