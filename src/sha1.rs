use std::fmt;
use std::str::FromStr;

use anyhow::{ensure, Result};
use byteorder::{BigEndian, ByteOrder};

use crate::compress::{self, INITIAL_STATE};
use crate::message::MessageBuffer;

/// The size in words of a digest.
pub const DIGEST_WORDS: usize = 5;

/// The size in bytes of a digest.
pub const DIGEST_SIZE: usize = DIGEST_WORDS * 4;

/// Digest is a 160-bit hash output made of five 32-bit words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Digest([u32; DIGEST_WORDS]);

impl Digest {
    pub fn from_words(words: [u32; DIGEST_WORDS]) -> Self {
        Digest(words)
    }

    pub fn words(&self) -> &[u32; DIGEST_WORDS] {
        &self.0
    }

    /// from_bytes reads five big-endian words. The slice must be exactly 20 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ensure!(
            bytes.len() == DIGEST_SIZE,
            "bad digest size: want {}, got {}",
            DIGEST_SIZE,
            bytes.len()
        );
        let mut words = [0u32; DIGEST_WORDS];
        BigEndian::read_u32_into(bytes, &mut words);
        Ok(Digest(words))
    }

    pub fn to_bytes(&self) -> [u8; DIGEST_SIZE] {
        let mut out = [0u8; DIGEST_SIZE];
        BigEndian::write_u32_into(&self.0, &mut out);
        out
    }

    /// to_hex renders the digest as 40 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ensure!(
            s.len() == DIGEST_SIZE * 2,
            "bad digest length: want {} hex characters, got {}",
            DIGEST_SIZE * 2,
            s.len()
        );
        Digest::from_bytes(&hex::decode(s)?)
    }
}

/// sha1 pads the message and runs it through the compression engine.
///
/// The buffer is consumed: it is superseded by its padded copy and dropped before the
/// digest is returned.
pub fn sha1(message: MessageBuffer) -> Digest {
    let padded = message.pad();
    drop(message);

    let mut state = INITIAL_STATE;
    compress::compress_words(&mut state, padded.words());
    Digest(state)
}

/// sha1_text hashes the bytes of a string.
pub fn sha1_text(text: &str) -> Digest {
    sha1(MessageBuffer::from_text(text))
}

/// digests_equal compares two digests word by word and stops at the first mismatch.
pub fn digests_equal(a: &Digest, b: &Digest) -> bool {
    for i in 0..DIGEST_WORDS {
        if a.0[i] != b.0[i] {
            return false;
        }
    }
    true
}
