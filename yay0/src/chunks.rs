use crate::{DecodeError, Stream};

/// The byte chunk stream: literal bytes and run length extensions,
/// interleaved in the order the decoder asks for them.
#[derive(Debug)]
pub struct ByteChunks<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> ByteChunks<'a> {
    pub fn at(input: &'a [u8], pos: usize) -> Self {
        ByteChunks{input, pos}
    }

    pub fn pos(&self) -> usize { self.pos }

    pub fn next_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.input.get(self.pos)
            .ok_or(DecodeError::truncated(Stream::Chunks, self.pos))?;
        self.pos += 1;
        Ok(byte)
    }
}
