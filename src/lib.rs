//! Scytale - Composable Classical-Cipher Pipelines
//!
//! A toolkit for layering simple, deliberately weak transforms over text
//! or bytes. A pipeline starts with one source transform and wraps it in
//! any number of decorating transforms; the result is a single chain that
//! is applied as a whole.
//!
//! ## Transform Pipeline
//!
//! A chain is described leaf first, so the last stage listed runs last:
//!
//! ```text
//! Input → Shift (or Mask) → [Reverse | Remap]* → Output
//! ```
//!
//! - **Shift**: Caesar rotation over the 26-letter alphabet (text)
//! - **Mask**: XOR with a fixed byte (bytes)
//! - **Reverse**: flip element order after the wrapped stage
//! - **Remap**: fold each element into `base + (value mod modulus)`, lossy
//!
//! None of the transforms provide real secrecy. They exist to compose.
//!
//! ## Example
//!
//! ```
//! use scytale::pipeline::compose_text;
//!
//! let chain = compose_text(&"shift:3,reverse".parse().unwrap()).unwrap();
//! assert_eq!(chain.apply_str("Hello, Decorator!"), "!urwdurfhG ,roohK");
//! ```
//!
//! File payloads run through the same machinery via source and sink
//! handles:
//!
//! ```no_run
//! use scytale::pipeline::compose_bytes;
//! use scytale::transfer::{transfer, FileSink, FileSource};
//!
//! let chain = compose_bytes(&"mask:0x5a,reverse".parse().unwrap()).unwrap();
//! transfer(
//!     &mut FileSource::new("input.bin"),
//!     &chain,
//!     &mut FileSink::new("masked.bin"),
//! ).unwrap();
//! ```

pub mod cache;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod transfer;

pub use error::{Result, ScytaleError};
pub use pipeline::{compose_bytes, compose_text, Chain, PipelineDescriptor, Stage};
pub use transfer::{transfer, ByteSink, ByteSource};
