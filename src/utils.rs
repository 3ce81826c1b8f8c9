use std::ops::{Deref, DerefMut};

/// Alignment guaranteed by [`AlignedBuffer`], in bytes.
///
/// Covers every aligned kernel of the crate (16 bytes for SSE, 32 bytes for AVX) and a
/// full cache line.
pub const BUFFER_ALIGNMENT: usize = 64;

const BLOCK_LEN: usize = BUFFER_ALIGNMENT / std::mem::size_of::<f32>();

#[derive(Copy, Clone)]
#[repr(C, align(64))]
struct Block([f32; BLOCK_LEN]);

/// Owned `f32` buffer whose first element is [`BUFFER_ALIGNMENT`]-byte aligned.
///
/// Storage is a vector of over-aligned blocks, so the buffer is allocated and freed with
/// the same layout by the global allocator. The slice view only exposes the first `len`
/// elements; the padding of the last block is never visible.
///
/// # Example
///
/// ```rust
/// use simdly_stats::utils::{AlignedBuffer, BUFFER_ALIGNMENT};
///
/// let buffer = AlignedBuffer::from_slice(&[1.0, 2.0, 3.0]);
/// assert_eq!(&buffer[..], &[1.0, 2.0, 3.0]);
/// assert_eq!(buffer.as_ptr() as usize % BUFFER_ALIGNMENT, 0);
/// ```
#[derive(Clone)]
pub struct AlignedBuffer {
    blocks: Vec<Block>,
    len: usize,
}

impl AlignedBuffer {
    /// Creates a buffer of `len` zeros.
    pub fn zeroed(len: usize) -> Self {
        let blocks = vec![Block([0.0; BLOCK_LEN]); len.div_ceil(BLOCK_LEN)];
        Self { blocks, len }
    }

    /// Creates a buffer holding a copy of `data`.
    pub fn from_slice(data: &[f32]) -> Self {
        let mut buffer = Self::zeroed(data.len());
        buffer.copy_from_slice(data);
        buffer
    }

    /// Number of visible elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Deref for AlignedBuffer {
    type Target = [f32];

    #[inline(always)]
    fn deref(&self) -> &[f32] {
        // SAFETY: blocks are `repr(C)` arrays of f32 laid out back to back, so the first
        // `len <= blocks.len() * BLOCK_LEN` floats are initialized and contiguous. An empty
        // vector still yields a non-null pointer aligned to `Block`.
        unsafe { std::slice::from_raw_parts(self.blocks.as_ptr() as *const f32, self.len) }
    }
}

impl DerefMut for AlignedBuffer {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut [f32] {
        // SAFETY: see `deref`; `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.blocks.as_mut_ptr() as *mut f32, self.len) }
    }
}

impl From<&[f32]> for AlignedBuffer {
    fn from(data: &[f32]) -> Self {
        Self::from_slice(data)
    }
}

impl std::fmt::Debug for AlignedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_for_many_lengths() {
        for len in [0usize, 1, 3, 15, 16, 17, 100, 1025] {
            let buffer = AlignedBuffer::zeroed(len);
            assert_eq!(buffer.len(), len);
            assert_eq!(
                buffer.as_ptr() as usize % BUFFER_ALIGNMENT,
                0,
                "buffer of len {len} is not aligned"
            );
        }
    }

    #[test]
    fn test_from_slice_copies_exactly() {
        let data: Vec<f32> = (0..37).map(|i| i as f32 * 0.5).collect();
        let buffer = AlignedBuffer::from_slice(&data);
        assert_eq!(&buffer[..], data.as_slice());
    }

    #[test]
    fn test_mutation_through_deref_mut() {
        let mut buffer = AlignedBuffer::zeroed(5);
        buffer[4] = 2.0;
        buffer[0] = -1.0;
        assert_eq!(&buffer[..], &[-1.0, 0.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = AlignedBuffer::from_slice(&[]);
        assert!(buffer.is_empty());
        assert!(buffer.iter().next().is_none());
    }
}
