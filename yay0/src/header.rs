use {
    crate::{be::Be, DecodeError},
    bytemuck::{Pod, Zeroable, pod_read_unaligned as read},
};

pub const MAGIC: [u8; 4] = *b"Yay0";
pub const HEADER_LEN: usize = std::mem::size_of::<RawHeader>();

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct RawHeader {
    magic:        [u8; 4],
    decoded_size: Be<u32>,
    link_table:   Be<u32>,
    byte_chunks:  Be<u32>,
}

/// The fixed 16 byte preamble of a Yay0 container.
///
/// Offsets are absolute positions in the container. The mask words always
/// start right after the header, at [`HEADER_LEN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic:        [u8; 4],
    pub decoded_size: u32,
    pub link_table:   u32,
    pub byte_chunks:  u32,
}

impl Header {
    pub fn parse(input: &[u8]) -> Result<Self, DecodeError> {
        let raw = input.get(..HEADER_LEN)
            .ok_or(DecodeError::MalformedHeader{len: input.len()})?;
        let raw: RawHeader = read(raw);
        Ok(Header {
            magic:        raw.magic,
            decoded_size: raw.decoded_size.get(),
            link_table:   raw.link_table.get(),
            byte_chunks:  raw.byte_chunks.get(),
        })
    }

    pub fn has_magic(&self) -> bool {
        self.magic == MAGIC
    }
}
