//! Error types untuk varian API yang checked
//!
//! Push ke buffer penuh dengan `OnFull::Discard` BUKAN error (silent drop),
//! jadi tidak punya tipe di sini.

use thiserror::Error;

/// Gagal mengambil elemen dari buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PopError {
    /// Buffer kosong - tidak ada elemen untuk di-pop
    #[error("pop called on an empty ring buffer")]
    Empty,
}

/// Ditolak oleh `try_push` karena buffer penuh.
///
/// Value yang ditolak dikembalikan ke caller.
#[derive(Clone, PartialEq, Eq, Error)]
pub enum PushError<T> {
    #[error("ring buffer is full")]
    Full(T),
}

impl<T> PushError<T> {
    /// Ambil kembali value yang ditolak
    pub fn into_inner(self) -> T {
        match self {
            Self::Full(value) => value,
        }
    }
}

// Debug manual supaya PushError<T> tetap Debug walaupun T tidak
impl<T> std::fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full(_) => f.write_str("Full(..)"),
        }
    }
}
