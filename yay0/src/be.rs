use bytemuck::{self as bm, Pod, Zeroable};

/// A big-endian `T` as it sits in the file.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Be<T>(T) where T: Pod;

// SAFETY: transparent over a Pod value
unsafe impl<T> Zeroable for Be<T> where T: Pod {}
unsafe impl<T> Pod for Be<T> where T: Pod {}

impl<T> std::fmt::Debug for Be<T> where T: Pod + std::fmt::Debug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} (be)", self.get())
    }
}

impl<T> Be<T> where T: Pod {
    pub fn get(self) -> T {
        let mut x = self.0;
        if cfg!(target_endian = "little") {
            bm::bytes_of_mut(&mut x).reverse();
        }
        x
    }

    /// Reads a `Be<T>` from the front of `bytes`, if there are enough of them.
    pub fn read(bytes: &[u8]) -> Option<T> {
        let bytes = bytes.get(..std::mem::size_of::<T>())?;
        Some(bm::pod_read_unaligned::<Self>(bytes).get())
    }
}
