//! fixring - Fixed-Capacity FIFO Ring Buffer
//!
//! Arsitektur:
//! - Inline storage: N slot ditentukan saat type definition (const generic)
//! - No-Allocation: tidak ada alokasi di hot path
//! - Overflow policy per call: overwrite (evict tertua) atau silent drop
//!
//! ```
//! use fixring::RingBuffer;
//!
//! let mut window: RingBuffer<f64, 3> = RingBuffer::new();
//! window.extend([1.0, 2.0, 3.0, 4.0]);
//!
//! let avg = window.iter().sum::<f64>() / window.len() as f64;
//! assert_eq!(avg, 3.0);
//! ```

pub mod buffer;
pub mod error;

pub use buffer::{IntoIter, Iter, OnFull, RingBuffer};
pub use error::{PopError, PushError};
