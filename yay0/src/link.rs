use crate::{be::Be, chunks::ByteChunks, DecodeError, Stream};

/// A copy out of already decoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackRef {
    /// Bytes between the source and the last byte written, less one.
    pub distance: usize,
    pub len: usize,
}

impl BackRef {
    /// Unpacks a link code: 4 bits of length over 12 bits of distance. A zero
    /// length field means the length is in the next byte chunk, biased by 18.
    pub fn from_code(code: u16, chunks: &mut ByteChunks) -> Result<Self, DecodeError> {
        let distance = (code & 0xfff) as usize;
        let len = match code >> 12 {
            0 => chunks.next_byte()? as usize + 18,
            n => n as usize + 2,
        };
        Ok(BackRef{distance, len})
    }

    /// Appends `len` bytes to `out`, starting `distance + 1` bytes behind its end.
    ///
    /// The source may overlap the bytes being written, so that a short
    /// pattern repeats across the run; copying goes forward a byte at a time
    /// whenever that happens.
    pub fn copy_into(self, out: &mut Vec<u8>) -> Result<(), DecodeError> {
        let at = out.len();
        let start = at.checked_sub(self.distance + 1)
            .ok_or(DecodeError::InvalidBackReference{at, distance: self.distance})?;

        if self.len <= at - start {
            // source lies entirely behind the write position
            out.extend_from_within(start .. start + self.len);
        }
        else {
            for i in start .. start + self.len {
                let byte = out[i];
                out.push(byte);
            }
        }

        Ok(())
    }
}

/// Big-endian 16 bit link codes, one per back-reference.
#[derive(Debug)]
pub struct LinkTable<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> LinkTable<'a> {
    pub fn at(input: &'a [u8], pos: usize) -> Self {
        LinkTable{input, pos}
    }

    pub fn pos(&self) -> usize { self.pos }

    pub fn next_code(&mut self) -> Result<u16, DecodeError> {
        let code = self.input.get(self.pos..)
            .and_then(Be::<u16>::read)
            .ok_or(DecodeError::truncated(Stream::Link, self.pos))?;
        self.pos += 2;
        Ok(code)
    }

    /// Reads the next back-reference, taking its length extension from
    /// `chunks` if it has one.
    pub fn next_ref(&mut self, chunks: &mut ByteChunks) -> Result<BackRef, DecodeError> {
        let code = self.next_code()?;
        BackRef::from_code(code, chunks)
    }
}
