//! # huffman_text_codec
//!
//! Huffman-style text codec. A single line of text becomes a plain-text
//! codebook followed by the line re-expressed as tab-terminated binary
//! codes, and the encoded document decodes back to the exact line.
//!
//! ```
//! use huffman_text_codec::{DecodeOptions, decode_from, encode};
//!
//! let encoded = encode("aabb")?;
//! assert_eq!(encoded.to_text(), "b\t0\na\t1\n---\n1\t1\t0\t0\t");
//!
//! let text = decode_from(encoded.to_text().as_bytes(), &DecodeOptions::default())?;
//! assert_eq!(text, "aabb");
//! # Ok::<(), huffman_text_codec::CodecError>(())
//! ```

pub mod codebook;
pub mod codec;
pub mod config;
pub mod error;
pub mod freq;
pub mod huffman;
pub mod priority;

pub use codebook::{Codebook, CodebookEntry, DELIMITER, FIELD_SEPARATOR};
pub use codec::{Encoded, decode, decode_file, decode_from, encode, encode_file, tokenize};
pub use config::{DecodeInvocation, DecodeOptions, EncodeInvocation, UnmatchedPolicy};
pub use error::{CodecError, Result};
pub use freq::FreqTable;
pub use huffman::{HuffmanTree, Node, build_huffman_tree};
