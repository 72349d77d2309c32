//! Buffer module: Fixed-capacity FIFO ring buffer
//!
//! Prinsip desain:
//! - Inline storage: `[MaybeUninit<T>; N]`, kapasitas dari const generic
//! - No-Allocation: tidak ada alokasi setelah konstruksi
//! - O(1) addressing: dua index siklik + jumlah elemen

mod index;
mod iter;
mod ring_buffer;

pub use iter::{IntoIter, Iter};
pub use ring_buffer::{OnFull, RingBuffer};
