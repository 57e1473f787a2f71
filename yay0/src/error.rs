use std::fmt;

/// Which of the three input cursors a read came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Mask,
    Link,
    Chunks,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stream::Mask   => "mask",
            Stream::Link   => "link table",
            Stream::Chunks => "byte chunk",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("input is {len} bytes, too short for the 16 byte header")]
    MalformedHeader { len: usize },

    #[error("{stream} read at offset {offset:#x} runs past the end of input")]
    TruncatedInput { stream: Stream, offset: usize },

    #[error("back-reference of distance {distance} at output {at:#x} reaches before the start of output")]
    InvalidBackReference { at: usize, distance: usize },

    #[error("header declares {declared} decoded bytes but stream produces {produced}")]
    OutputSizeMismatch { declared: usize, produced: usize },

    #[error("unable to allocate {size} bytes for decoded output")]
    AllocationFailure { size: usize },
}

impl DecodeError {
    pub(crate) fn truncated(stream: Stream, offset: usize) -> Self {
        DecodeError::TruncatedInput { stream, offset }
    }
}
