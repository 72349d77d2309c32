//! Aritmetika index siklik untuk slot ring buffer
//!
//! Jika N power of 2, wraparound memakai bitmask `& (N - 1)`.
//! Selain itu memakai modulo. Branch-nya berdasarkan konstanta,
//! jadi compiler melipatnya saat monomorphization.

/// Membungkus `index` ke dalam `[0, N)`.
///
/// Caller menjamin `index < 2 * N`, cukup untuk `head + i` dengan `i < N`.
#[inline(always)]
pub(crate) const fn wrap<const N: usize>(index: usize) -> usize {
    if N.is_power_of_two() {
        index & (N - 1)
    } else {
        index % N
    }
}

/// Posisi slot berikutnya setelah `index`.
#[inline(always)]
pub(crate) const fn advance<const N: usize>(index: usize) -> usize {
    wrap::<N>(index + 1)
}

/// Posisi slot sebelum `index` (dipakai untuk `back()`).
#[inline(always)]
pub(crate) const fn retreat<const N: usize>(index: usize) -> usize {
    wrap::<N>(index + N - 1)
}
