#![warn(missing_docs)]
//! A from-scratch SHA-1 style digest and a bounded brute-force search over it.
//!
//! The digest follows SHA-1 except for its padding, which writes a single 32-bit length
//! word and only adds a terminator bit to partial words holding whole bytes. For
//! byte-aligned messages shorter than 2^32 bits the output is plain SHA-1.
//!
//! The cracker walks every string over an alphabet, shortest first, up to
//! [`keyspace::MAX_LEN`] symbols, and stops on the first candidate whose digest matches.
//!
//! # Example
//! ```
//! use sha1crack::crack::crack;
//! use sha1crack::keyspace::LOWERCASE;
//! use sha1crack::sha1::{sha1, Digest};
//! use sha1crack::message::MessageBuffer;
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!   let target = sha1(MessageBuffer::from_text("dog"));
//!   println!("Digest: {}", target);
//!
//!   let outcome = crack(&target, &LOWERCASE)?;
//!   assert_eq!(outcome.plaintext(), Some("dog"));
//!
//!   let sample: Digest = "65caa18f6f33d5e89493dc608eb0055126c34997".parse()?;
//!   println!("Sample: {}", sample.to_hex());
//!
//!   Ok(())
//! }
//! ```
/// `compress` is the 80-round compression function applied to 512-bit chunks.
pub mod compress;
/// `crack` drives the brute-force search.
pub mod crack;
/// `keyspace` enumerates candidate strings over an alphabet.
pub mod keyspace;
/// `message` packs messages into words and pads them.
pub mod message;
/// `sha1` computes and compares digests.
pub mod sha1;
/// `sha1core` is a streaming core for the `digest` traits.
pub mod sha1core;
/// `wordlist` loads whitespace-delimited word lists.
pub mod wordlist;
