use crate::{be::Be, DecodeError, Stream, HEADER_LEN};

/// Control bits, read MSB-first out of big-endian 32 bit words.
///
/// A set bit selects a literal byte, a clear bit a back-reference. Words
/// are fetched lazily, immediately before the first of their bits is needed.
#[derive(Debug)]
pub struct MaskBits<'a> {
    input: &'a [u8],
    pos: usize,
    word: u32,
    left: u32,
}

impl<'a> MaskBits<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::at(input, HEADER_LEN)
    }

    pub fn at(input: &'a [u8], pos: usize) -> Self {
        MaskBits{input, pos, word: 0, left: 0}
    }

    /// Offset of the next mask word to be fetched.
    pub fn pos(&self) -> usize { self.pos }

    pub fn next_bit(&mut self) -> Result<bool, DecodeError> {
        if self.left == 0 {
            self.word = self.input.get(self.pos..)
                .and_then(Be::<u32>::read)
                .ok_or(DecodeError::truncated(Stream::Mask, self.pos))?;
            self.pos += 4;
            self.left = 32;
        }

        let bit = self.word & 0x8000_0000 != 0;
        self.word <<= 1;
        self.left -= 1;
        Ok(bit)
    }
}
