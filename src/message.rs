use anyhow::{ensure, Result};
use byteorder::{BigEndian, ByteOrder};

/// Number of 32-bit words in one 512-bit chunk.
pub const CHUNK_WORDS: usize = 16;

/// The single set bit written into the boundary word after a word-aligned message.
const TERMINATOR: u32 = 0x8000_0000;

/// MessageBuffer holds a message as big-endian packed 32-bit words together with the
/// number of bits that are actually significant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageBuffer {
    words: Vec<u32>,
    used_bits: u64,
}

fn words_for_bits(bits: u64) -> u64 {
    (bits + 31) / 32
}

impl MessageBuffer {
    /// from_text packs the bytes of an ASCII string. No terminator byte is counted.
    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// from_bytes packs raw bytes, byte `i` landing in word `i/4` at bit offset `(3 - i%4)*8`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut words = Vec::with_capacity(words_for_bits(bytes.len() as u64 * 8) as usize);
        bytes.chunks(4).for_each(|chunk| {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            words.push(BigEndian::read_u32(&word));
        });

        MessageBuffer {
            words,
            used_bits: bytes.len() as u64 * 8,
        }
    }

    /// from_words builds a bit-level message. `used_bits` does not need to be byte-aligned
    /// but the word count must be exactly `ceil(used_bits / 32)`.
    pub fn from_words(words: Vec<u32>, used_bits: u64) -> Result<Self> {
        ensure!(
            words.len() as u64 == words_for_bits(used_bits),
            "{} used bits need {} words, got {}",
            used_bits,
            words_for_bits(used_bits),
            words.len()
        );
        Ok(MessageBuffer { words, used_bits })
    }

    /// used_bits returns the number of significant bits in the message.
    pub fn used_bits(&self) -> u64 {
        self.used_bits
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// pad returns a new buffer whose length is a multiple of 512 bits.
    ///
    /// The layout differs from textbook SHA-1 padding in three places:
    ///
    /// * a byte-aligned length is bumped by one bit before the sizes are rounded;
    /// * a partial boundary word only receives the terminator bit when the length is
    ///   byte-aligned, so an odd bit length gets no terminator at all;
    /// * the final word carries the bit length truncated to 32 bits, with no high word.
    ///
    /// For byte-aligned messages below 2^32 bits the result matches standard SHA-1.
    pub fn pad(&self) -> MessageBuffer {
        let used = self.used_bits;
        let mut ibs = used;
        if ibs % 8 == 0 {
            ibs += 1;
        }

        let input_words = words_for_bits(ibs);
        let mut rest = 512 - (ibs % 512);
        if rest < 64 {
            rest += 512;
        }
        let padded_words = (input_words + rest / 32) as usize;

        let mut words = vec![0u32; padded_words];
        let full = (used / 32) as usize;
        words[..full].copy_from_slice(&self.words[..full]);

        let partial = used % 32;
        if partial == 0 {
            words[full] = TERMINATOR;
        } else {
            words[full] = self.words[full];
            if used % 8 == 0 {
                words[full] |= 1 << (31 - partial);
            }
        }

        // 32-bit length field; longer messages are truncated.
        words[padded_words - 1] = used as u32;

        MessageBuffer {
            words,
            used_bits: padded_words as u64 * 32,
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn from_text_packs_big_endian() {
        let m = MessageBuffer::from_text("abcde");
        assert_eq!(m.used_bits(), 40);
        assert_eq!(m.words(), &[0x6162_6364, 0x6500_0000]);
    }

    #[test]
    fn from_text_empty() {
        let m = MessageBuffer::from_text("");
        assert_eq!(m.used_bits(), 0);
        assert_eq!(m.word_count(), 0);
    }

    #[test]
    fn from_words_checks_word_count() {
        assert!(MessageBuffer::from_words(vec![0; 2], 33).is_ok());
        assert!(MessageBuffer::from_words(vec![], 0).is_ok());
        assert!(MessageBuffer::from_words(vec![0; 1], 33).is_err());
        assert!(MessageBuffer::from_words(vec![0; 2], 32).is_err());
    }

    #[test]
    fn pad_empty() {
        let p = MessageBuffer::from_text("").pad();
        assert_eq!(p.word_count(), CHUNK_WORDS);
        assert_eq!(p.words()[0], TERMINATOR);
        assert!(p.words()[1..].iter().all(|w| *w == 0));
    }

    #[test]
    fn pad_abc() {
        let p = MessageBuffer::from_text("abc").pad();
        assert_eq!(p.word_count(), CHUNK_WORDS);
        assert_eq!(p.words()[0], 0x6162_6380);
        assert!(p.words()[1..15].iter().all(|w| *w == 0));
        assert_eq!(p.words()[15], 24);
    }

    #[test]
    fn pad_word_aligned() {
        let p = MessageBuffer::from_text("abcd").pad();
        assert_eq!(p.words()[0], 0x6162_6364);
        assert_eq!(p.words()[1], TERMINATOR);
        assert_eq!(p.words()[15], 32);
    }

    #[test]
    fn pad_spills_into_second_chunk() {
        for (len, chunks) in [(55, 1), (56, 2), (63, 2), (64, 2), (119, 2), (120, 3)] {
            let text = "x".repeat(len);
            let p = MessageBuffer::from_text(&text).pad();
            assert_eq!(
                p.word_count(),
                chunks * CHUNK_WORDS,
                "unexpected padded size for {} bytes",
                len
            );
            assert_eq!(p.words()[p.word_count() - 1], len as u32 * 8);
        }
    }

    #[test]
    fn pad_is_chunk_aligned_for_every_bit_length() {
        for bits in 0..2048u64 {
            let m = MessageBuffer::from_words(vec![0; words_for_bits(bits) as usize], bits).unwrap();
            let p = m.pad();
            assert_eq!(p.word_count() % CHUNK_WORDS, 0, "bits={}", bits);
            assert_eq!(p.words()[p.word_count() - 1], bits as u32, "bits={}", bits);
        }
    }

    #[test]
    fn pad_leaves_input_untouched() {
        let m = MessageBuffer::from_text("hello");
        let before = m.clone();
        let _ = m.pad();
        assert_eq!(m, before);
    }

    #[test]
    fn pad_byte_aligned_partial_word_gets_terminator() {
        let m = MessageBuffer::from_words(vec![0xAB00_0000], 8).unwrap();
        let p = m.pad();
        assert_eq!(p.words()[0], 0xAB80_0000);
        assert_eq!(p.words()[15], 8);
    }

    #[test]
    fn pad_unaligned_partial_word_gets_no_terminator() {
        let m = MessageBuffer::from_words(vec![0xA000_0000], 3).unwrap();
        let p = m.pad();
        assert_eq!(p.word_count(), CHUNK_WORDS);
        assert_eq!(p.words()[0], 0xA000_0000);
        assert!(p.words()[1..15].iter().all(|w| *w == 0));
        assert_eq!(p.words()[15], 3);
    }

    #[test]
    fn pad_full_words_get_terminator_word() {
        let m = MessageBuffer::from_words(vec![0xFFFF_FFFF, 0xFFFF_FFFF], 64).unwrap();
        let p = m.pad();
        assert_eq!(&p.words()[..3], &[0xFFFF_FFFF, 0xFFFF_FFFF, TERMINATOR]);
        assert_eq!(p.words()[15], 64);
    }
}
