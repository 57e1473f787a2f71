//! Decoder for Yay0, the LZSS-style container used by Nintendo 64 and
//! GameCube titles.
//!
//! A container is a 16 byte [`Header`] followed by three streams which are
//! consumed side by side: 32 bit mask words choosing between a literal and a
//! back-reference for each step, 16 bit link codes describing the
//! back-references, and byte chunks supplying literals and long run lengths.

use std::borrow::Cow;

pub mod be;
mod chunks;
mod error;
mod header;
mod link;
mod mask;

pub use {
    chunks::ByteChunks,
    error::{DecodeError, Stream},
    header::{Header, HEADER_LEN, MAGIC},
    link::{BackRef, LinkTable},
    mask::MaskBits,
};

/// What to do when the last back-reference runs past the declared size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overshoot {
    /// Fail with [`DecodeError::OutputSizeMismatch`].
    #[default]
    Reject,
    /// Cut the run short at the declared size.
    Truncate,
}

/// Whether `input` starts with a whole header carrying the Yay0 magic.
pub fn is_yay0(input: &[u8]) -> bool {
    Header::parse(input).is_ok_and(|header| header.has_magic())
}

/// Decodes `input` as a Yay0 container, rejecting streams that overshoot
/// the size given in the header.
pub fn decode(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    decode_with(input, Overshoot::default())
}

pub fn decode_with(input: &[u8], overshoot: Overshoot) -> Result<Vec<u8>, DecodeError> {
    let header = Header::parse(input)?;
    log::debug!("yay0 header: {header:x?}");

    let size = header.decoded_size as usize;
    let mut out = Vec::new();
    out.try_reserve_exact(size)
        .map_err(|_| DecodeError::AllocationFailure{size})?;

    let mut mask = MaskBits::new(input);
    let mut links = LinkTable::at(input, header.link_table as usize);
    let mut chunks = ByteChunks::at(input, header.byte_chunks as usize);

    while out.len() < size {
        if mask.next_bit()? {
            out.push(chunks.next_byte()?);
            continue;
        }

        let mut run = links.next_ref(&mut chunks)?;
        let room = size - out.len();
        if run.len > room {
            match overshoot {
                Overshoot::Reject => return Err(DecodeError::OutputSizeMismatch {
                    declared: size,
                    produced: out.len() + run.len,
                }),
                Overshoot::Truncate => {
                    log::debug!("truncating final run of {} to {room}", run.len);
                    run.len = room;
                }
            }
        }

        log::trace!("copy {} from -{} at {:#x}", run.len, run.distance + 1, out.len());
        run.copy_into(&mut out)?;
    }

    if out.len() != size {
        return Err(DecodeError::OutputSizeMismatch{declared: size, produced: out.len()});
    }

    log::debug!("yay0: {} -> {} bytes; mask {:#x}, links {:#x}, chunks {:#x}",
        input.len(), out.len(), mask.pos(), links.pos(), chunks.pos());

    Ok(out)
}

/// Decodes `input` if it carries the Yay0 magic, otherwise hands it back as is.
pub fn decode_if_compressed(input: &[u8]) -> Result<Cow<'_, [u8]>, DecodeError> {
    decode_if_compressed_with(input, Overshoot::default())
}

pub fn decode_if_compressed_with(input: &[u8], overshoot: Overshoot)
    -> Result<Cow<'_, [u8]>, DecodeError>
{
    if is_yay0(input) {
        decode_with(input, overshoot).map(Cow::Owned)
    }
    else {
        Ok(Cow::Borrowed(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lays out a container from its three streams.
    fn container(size: u32, mask: &[u32], links: &[u16], chunks: &[u8]) -> Vec<u8> {
        let link_table = (HEADER_LEN + mask.len() * 4) as u32;
        let byte_chunks = link_table + links.len() as u32 * 2;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&size.to_be_bytes());
        bytes.extend_from_slice(&link_table.to_be_bytes());
        bytes.extend_from_slice(&byte_chunks.to_be_bytes());
        mask.iter().for_each(|w| bytes.extend_from_slice(&w.to_be_bytes()));
        links.iter().for_each(|c| bytes.extend_from_slice(&c.to_be_bytes()));
        bytes.extend_from_slice(chunks);
        bytes
    }

    #[test]
    fn literals_only() {
        let bytes = container(4, &[0xf000_0000], &[], b"ABCD");
        assert_eq!(decode(&bytes).unwrap(), b"ABCD");
    }

    #[test]
    fn literals_then_back_reference() {
        // 1111 0 : four literals, then repeat the last one three times
        let bytes = container(7, &[0xf000_0000], &[0x1000], &[0xaa, 0xbb, 0xcc, 0xdd]);
        assert_eq!(decode(&bytes).unwrap(), [0xaa, 0xbb, 0xcc, 0xdd, 0xdd, 0xdd, 0xdd]);
    }

    #[test]
    fn overshooting_run() {
        let bytes = container(5, &[0xf000_0000], &[0x1000], &[0xaa, 0xbb, 0xcc, 0xdd]);
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::OutputSizeMismatch{declared: 5, produced: 7}));

        let out = decode_with(&bytes, Overshoot::Truncate).unwrap();
        assert_eq!(out, [0xaa, 0xbb, 0xcc, 0xdd, 0xdd]);
    }

    #[test]
    fn extended_run() {
        // literal 'x', then 0x0000 with extension 0 repeats it 18 times
        let bytes = container(19, &[0x8000_0000], &[0x0000], &[b'x', 0x00]);
        assert_eq!(decode(&bytes).unwrap(), [b'x'; 19]);
    }

    #[test]
    fn chunk_stream_interleaves_literals_and_extensions() {
        // 1 0 1 : 'a', run of 18 + 2 from distance 0, 'b'
        let bytes = container(22, &[0xa000_0000], &[0x0000], &[b'a', 2, b'b']);
        let mut want = vec![b'a'; 21];
        want.push(b'b');
        assert_eq!(decode(&bytes).unwrap(), want);
    }

    #[test]
    fn mask_spans_several_words() {
        let chunks = (0..40u8).collect::<Vec<_>>();
        let bytes = container(40, &[0xffff_ffff, 0xff00_0000], &[], &chunks);
        assert_eq!(decode(&bytes).unwrap(), chunks);
    }

    #[test]
    fn empty_output() {
        let bytes = container(0, &[], &[], &[]);
        assert!(decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn truncated_streams() {
        let bytes = container(4, &[0xf000_0000], &[], b"ABC");
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::TruncatedInput{stream: Stream::Chunks, ..}),
        ));

        let bytes = container(4, &[0x8000_0000], &[], b"A");
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::TruncatedInput{stream: Stream::Link, ..}),
        ));

        let mut bytes = container(1, &[], &[], &[]);
        bytes.extend_from_slice(&[0x80, 0x00]);
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::TruncatedInput{stream: Stream::Mask, offset: 16}),
        ));
    }

    #[test]
    fn back_reference_before_start() {
        let bytes = container(4, &[0x0000_0000], &[0x1000], &[]);
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::InvalidBackReference{at: 0, distance: 0}),
        ));
    }

    #[test]
    fn short_header() {
        assert!(matches!(decode(b"Yay0"), Err(DecodeError::MalformedHeader{len: 4})));
    }

    #[test]
    fn unallocatable_output() {
        let bytes = container(u32::MAX, &[], &[], &[]);
        match decode(&bytes) {
            // allocation may succeed lazily on some hosts; then the mask runs out
            Err(DecodeError::AllocationFailure{..}) => {}
            Err(DecodeError::TruncatedInput{stream: Stream::Mask, ..}) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn passthrough_without_magic() {
        let raw = b"plain old bytes";
        assert!(matches!(decode_if_compressed(raw).unwrap(), Cow::Borrowed(_)));

        let bytes = container(2, &[0xc000_0000], &[], b"hi");
        assert!(is_yay0(&bytes));
        assert_eq!(&*decode_if_compressed(&bytes).unwrap(), b"hi");
    }

    #[test]
    fn magic_needs_a_whole_header() {
        assert!(!is_yay0(b"Yay0"));
        assert!(!is_yay0(b"Yaz0\0\0\0\0\0\0\0\x10\0\0\0\x10"));
        assert!(is_yay0(b"Yay0\0\0\0\0\0\0\0\x10\0\0\0\x10"));
        assert!(matches!(decode_if_compressed(b"Yay0").unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn passthrough_honours_overshoot() {
        let bytes = container(5, &[0xf000_0000], &[0x1000], &[0xaa, 0xbb, 0xcc, 0xdd]);
        assert!(matches!(
            decode_if_compressed(&bytes),
            Err(DecodeError::OutputSizeMismatch{declared: 5, produced: 7}),
        ));
        let out = decode_if_compressed_with(&bytes, Overshoot::Truncate).unwrap();
        assert_eq!(&*out, [0xaa, 0xbb, 0xcc, 0xdd, 0xdd]);
    }
}
