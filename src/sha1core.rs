use digest::{
    block_buffer::Eager,
    core_api::{Buffer, BufferKindUser, CoreWrapper, FixedOutputCore, UpdateCore},
    crypto_common::{Block, BlockSizeUser},
    typenum::{U20, U64},
    HashMarker, Output, OutputSizeUser, Reset,
};

use byteorder::{BigEndian, ByteOrder};

use crate::compress::{self, INITIAL_STATE};
use crate::message::CHUNK_WORDS;
use crate::sha1::{Digest, DIGEST_WORDS};

/// Block size, in bytes, of the hash function.
pub const BLOCK_SIZE: usize = 64;

/// Sha1 is the streaming hasher built on [`Sha1Core`].
pub type Sha1 = CoreWrapper<Sha1Core>;

/// Sha1Core is a core implementation of the digest for incremental byte input.
///
/// Finalization pads exactly like [`crate::message::MessageBuffer::pad`] does for byte
/// input, so the output always equals the one-shot digest of the same bytes.
#[derive(Clone, Debug)]
pub struct Sha1Core {
    h: [u32; DIGEST_WORDS], // running accumulators
    blocks: u64,            // number of blocks compressed so far
}

impl Sha1Core {
    fn compress_block(&mut self, data: &[u8]) {
        let mut chunk = [0u32; CHUNK_WORDS];
        BigEndian::read_u32_into(data, &mut chunk);
        compress::compress(&mut self.h, &chunk);
    }
}

impl Default for Sha1Core {
    fn default() -> Self {
        Self {
            h: INITIAL_STATE,
            blocks: 0,
        }
    }
}

impl Reset for Sha1Core {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl HashMarker for Sha1Core {}

impl BlockSizeUser for Sha1Core {
    type BlockSize = U64;
}

impl BufferKindUser for Sha1Core {
    type BufferKind = Eager;
}

impl OutputSizeUser for Sha1Core {
    type OutputSize = U20;
}

impl FixedOutputCore for Sha1Core {
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let bitlen = (self.blocks * BLOCK_SIZE as u64 + buffer.get_pos() as u64) << 3;
        // upper word stays zero, the length field is 32 bits wide
        let mut tmp = [0u8; 8];
        BigEndian::write_u32(&mut tmp[4..], bitlen as u32);
        buffer.digest_pad(0x80, &tmp, |b| self.compress_block(b));

        BigEndian::write_u32_into(&self.h, out);
    }
}

impl UpdateCore for Sha1Core {
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        for b in blocks {
            self.blocks += 1;
            self.compress_block(b)
        }
    }
}

impl From<Output<Sha1Core>> for Digest {
    fn from(out: Output<Sha1Core>) -> Self {
        let mut words = [0u32; DIGEST_WORDS];
        BigEndian::read_u32_into(&out, &mut words);
        Digest::from_words(words)
    }
}

#[cfg(test)]
pub mod test {
    use std::io::Write;

    use super::*;
    use crate::message::MessageBuffer;
    use crate::sha1::sha1;
    use digest::{FixedOutput, Update};
    use sha3::{
        digest::{ExtendableOutput, XofReader},
        Shake256,
    };

    fn shake_input(seed: &str, len: usize) -> Vec<u8> {
        let mut input = vec![0; len];
        let mut v = Shake256::default();
        v.write_all(seed.as_bytes()).unwrap();
        v.finalize_xof().read(&mut input);
        input
    }

    #[test]
    fn empty_input() {
        let h = Sha1::default();
        let sum = hex::encode(h.finalize_fixed());
        assert_eq!(sum, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn matches_one_shot() {
        let input = shake_input("sha1crack input", 6000);

        for l in [1, 3, 55, 56, 63, 64, 65, 100, 128, 6000] {
            let mut h = Sha1::default();
            h.update(&input[..l]);
            let streamed = Digest::from(h.finalize_fixed());

            let one_shot = sha1(MessageBuffer::from_bytes(&input[..l]));
            assert_eq!(
                streamed, one_shot,
                "streaming and one-shot digests differ for {} bytes",
                l
            );
        }
    }

    #[test]
    fn split_updates() {
        let input = shake_input("sha1crack split", 1000);
        let want = sha1(MessageBuffer::from_bytes(&input));

        for step in [1, 7, 63, 64, 333] {
            let mut h = Sha1::default();
            input.chunks(step).for_each(|c| h.update(c));
            let sum = Digest::from(h.finalize_fixed());
            assert_eq!(sum, want, "got {}, want {}", sum, want);
        }
    }

    #[test]
    fn reset() {
        let mut h = Sha1::default();
        h.update(&shake_input("sha1crack", 6000));

        h.reset();
        h.update(b"abc");

        let sum = hex::encode(h.finalize_fixed());
        assert_eq!(sum, "a9993e364706816aba3e25717850c26c9cd0d89d");
    }
}
