//! Fixed-Capacity FIFO Ring Buffer
//!
//! Storage inline `[MaybeUninit<T>; N]`, tidak ada alokasi setelah konstruksi.
//! Semua mutasi lewat `&mut self`, jadi akses eksklusif dijamin borrow checker.
//! Untuk sharing antar thread, bungkus dengan lock di sisi caller.

use std::fmt;
use std::mem::MaybeUninit;
use std::ops::Shl;
use std::ptr;
use std::slice;

use tracing::{debug, trace};

use super::index::{advance, retreat, wrap};
use super::iter::{IntoIter, Iter};
use crate::error::{PopError, PushError};

/// Kebijakan saat push ke buffer yang sudah penuh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OnFull {
    /// Buang elemen tertua, lalu tulis yang baru (FIFO eviction)
    #[default]
    Overwrite,
    /// Buang value yang masuk, state tidak berubah (silent drop)
    Discard,
}

/// Ring buffer FIFO dengan kapasitas tetap N.
///
/// Elemen hidup menempati slot `(head + i) % N` untuk `i` di `[0, len)`,
/// dan `tail == (head + len) % N`. Slot di luar range itu belum diinisialisasi.
///
/// ```
/// use fixring::{OnFull, RingBuffer};
///
/// let mut rb: RingBuffer<u32, 4> = RingBuffer::new();
/// for i in 1..=5 {
///     rb.push(i);
/// }
/// rb.push_with(99, OnFull::Discard);
///
/// assert_eq!(rb.pop(), 2);
/// assert_eq!(rb.len(), 3);
/// ```
pub struct RingBuffer<T, const N: usize> {
    slots: [MaybeUninit<T>; N],
    // Index elemen tertua (yang berikutnya di-pop)
    head: usize,
    // Index slot kosong berikutnya untuk push
    tail: usize,
    len: usize,
}

impl<T, const N: usize> RingBuffer<T, N> {
    const NON_ZERO_CAPACITY: () = assert!(N > 0, "RingBuffer capacity N must be non-zero");

    /// Membuat ring buffer kosong.
    ///
    /// Kapasitas 0 ditolak saat compile time. Storage inline berukuran
    /// `N * size_of::<T>()`; `Box::new(RingBuffer::new())` tetap membangun
    /// value di stack sebelum dipindah ke heap, jadi pilih N sesuai ukuran stack.
    #[allow(clippy::let_unit_value)]
    pub const fn new() -> Self {
        let () = Self::NON_ZERO_CAPACITY;

        Self {
            // SAFETY: array of MaybeUninit tidak butuh inisialisasi
            slots: unsafe { MaybeUninit::<[MaybeUninit<T>; N]>::uninit().assume_init() },
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Push dengan kebijakan overwrite: jika penuh, elemen tertua di-drop.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.push_with(value, OnFull::Overwrite);
    }

    /// Push dengan kebijakan eksplisit untuk buffer penuh.
    ///
    /// `OnFull::Discard` ke buffer penuh adalah no-op yang disengaja,
    /// bukan error: `value` di-drop dan state tidak berubah.
    #[inline]
    pub fn push_with(&mut self, value: T, policy: OnFull) {
        if !self.is_full() {
            self.write_tail(value);
            return;
        }

        match policy {
            OnFull::Overwrite => {
                trace!(capacity = N, "ring buffer full, evicting oldest element");
                drop(self.replace_oldest(value));
            }
            OnFull::Discard => {
                trace!(capacity = N, "ring buffer full, discarding pushed element");
            }
        }
    }

    /// Push overwrite yang mengembalikan elemen yang ter-evict (jika ada).
    #[inline]
    pub fn push_evicting(&mut self, value: T) -> Option<T> {
        if self.is_full() {
            Some(self.replace_oldest(value))
        } else {
            self.write_tail(value);
            None
        }
    }

    /// Push checked: tidak pernah evict, value dikembalikan jika penuh.
    #[inline]
    pub fn try_push(&mut self, value: T) -> Result<(), PushError<T>> {
        if self.is_full() {
            return Err(PushError::Full(value));
        }
        self.write_tail(value);
        Ok(())
    }

    /// Ambil elemen tertua.
    ///
    /// # Panics
    /// Panic jika buffer kosong. Cek `is_empty()` dulu, atau pakai `try_pop`.
    #[inline]
    #[track_caller]
    pub fn pop(&mut self) -> T {
        match self.try_pop() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Ambil elemen tertua, `Err(PopError::Empty)` jika kosong.
    #[inline]
    pub fn try_pop(&mut self) -> Result<T, PopError> {
        if self.is_empty() {
            return Err(PopError::Empty);
        }

        // SAFETY: len > 0 jadi slot head berisi elemen hidup. Setelah head maju,
        // slot itu dianggap kosong dan tidak dibaca lagi.
        let value = unsafe { self.slots[self.head].assume_init_read() };
        self.head = advance::<N>(self.head);
        self.len -= 1;

        Ok(value)
    }

    /// Kembali ke state kosong awal (`head = tail = 0`).
    ///
    /// Storage tidak dialokasi ulang. Elemen yang masih hidup di-drop
    /// dengan urutan FIFO.
    pub fn reset(&mut self) {
        let dropped = self.len;
        while let Ok(value) = self.try_pop() {
            drop(value);
        }
        self.head = 0;
        self.tail = 0;

        debug!(capacity = N, dropped, "ring buffer reset");
    }

    /// Jumlah elemen hidup
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Alias `len()`
    #[inline(always)]
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Kapasitas buffer
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Alias `is_empty()`
    #[inline(always)]
    pub const fn empty(&self) -> bool {
        self.is_empty()
    }

    #[inline(always)]
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Alias `is_full()`
    #[inline(always)]
    pub const fn full(&self) -> bool {
        self.is_full()
    }

    /// Elemen tertua tanpa mengambilnya
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Elemen terbaru tanpa mengambilnya
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: buffer tidak kosong, slot sebelum tail berisi elemen terbaru
        Some(unsafe { self.slots[retreat::<N>(self.tail)].assume_init_ref() })
    }

    /// Elemen ke-`index` dihitung dari yang tertua
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: index < len, slot berada di range hidup
        Some(unsafe { self.slots[wrap::<N>(self.head + index)].assume_init_ref() })
    }

    /// Elemen hidup sebagai maksimal dua slice kontigu, urut tertua ke terbaru.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let first_len = self.len.min(N - self.head);
        let second_len = self.len - first_len;
        let base = self.slots.as_ptr() as *const T;

        // SAFETY: MaybeUninit<T> punya layout sama dengan T. Range
        // [head, head + first_len) dan [0, second_len) keduanya berisi elemen hidup.
        unsafe {
            (
                slice::from_raw_parts(base.add(self.head), first_len),
                slice::from_raw_parts(base, second_len),
            )
        }
    }

    /// Iterator borrowing, tertua ke terbaru
    pub fn iter(&self) -> Iter<'_, T> {
        let (front, back) = self.as_slices();
        Iter::new(front, back)
    }

    /// Tulis ke slot tail. Caller menjamin buffer belum penuh.
    #[inline(always)]
    fn write_tail(&mut self, value: T) {
        debug_assert!(self.len < N);
        self.slots[self.tail].write(value);
        self.tail = advance::<N>(self.tail);
        self.len += 1;
    }

    /// Evict elemen tertua dan tulis `value`. Caller menjamin buffer penuh.
    ///
    /// Saat penuh, `tail == head`, jadi value baru menempati slot yang baru dikosongkan.
    #[inline(always)]
    fn replace_oldest(&mut self, value: T) -> T {
        debug_assert!(self.len == N && self.head == self.tail);

        // SAFETY: buffer penuh, slot head berisi elemen hidup. Value lama
        // dipindah keluar sebelum slot ditimpa, jadi tidak ada double drop.
        let evicted = unsafe { self.slots[self.head].assume_init_read() };
        self.slots[self.tail].write(value);
        self.head = advance::<N>(self.head);
        self.tail = self.head;

        evicted
    }
}

impl<T, const N: usize> Drop for RingBuffer<T, N> {
    fn drop(&mut self) {
        let first_len = self.len.min(N - self.head);
        let second_len = self.len - first_len;
        let base = self.slots.as_mut_ptr() as *mut T;
        self.len = 0;

        // SAFETY: pointer berasal dari &mut self. Range [head, head + first_len)
        // dan [0, second_len) berisi elemen hidup, dan buffer tidak dipakai lagi.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(self.head), first_len));
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base, second_len));
        }
    }
}

impl<T, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for RingBuffer<T, N> {
    fn clone(&self) -> Self {
        let mut out = Self::new();
        out.clone_from(self);
        out
    }

    /// Hanya elemen hidup yang di-clone; posisi head/tail ikut disalin.
    fn clone_from(&mut self, source: &Self) {
        self.reset();
        self.head = source.head;
        self.tail = source.head;
        for value in source.iter() {
            self.write_tail(value.clone());
        }
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for RingBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for RingBuffer<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const N: usize> Eq for RingBuffer<T, N> {}

impl<T, const N: usize> Extend<T> for RingBuffer<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

/// Collect menyimpan N elemen terakhir dari iterator.
impl<T, const N: usize> FromIterator<T> for RingBuffer<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut rb = Self::new();
        rb.extend(iter);
        rb
    }
}

impl<T, const N: usize> IntoIterator for RingBuffer<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a RingBuffer<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Streaming insertion: `let _ = &mut rb << a << b;` sama dengan `push(a); push(b)`.
impl<'a, T, const N: usize> Shl<T> for &'a mut RingBuffer<T, N> {
    type Output = &'a mut RingBuffer<T, N>;

    #[inline]
    fn shl(self, value: T) -> Self::Output {
        self.push(value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_push_pop() {
        let mut rb: RingBuffer<u64, 16> = RingBuffer::new();

        assert!(rb.is_empty());
        assert!(!rb.is_full());

        rb.push(42);
        assert!(!rb.is_empty());
        assert_eq!(rb.len(), 1);

        assert_eq!(rb.pop(), 42);
        assert!(rb.is_empty());
    }

    #[test]
    fn test_overwrite_evicts_oldest() {
        let mut rb: RingBuffer<u64, 4> = RingBuffer::new();

        for i in 1..=5 {
            rb.push(i);
        }

        assert!(rb.is_full());
        assert_eq!(rb.pop(), 2);
        assert_eq!(rb.pop(), 3);
        assert_eq!(rb.pop(), 4);
        assert_eq!(rb.pop(), 5);
        assert!(rb.is_empty());
    }

    #[test]
    fn test_mixed_policies() {
        let mut rb: RingBuffer<f32, 4> = RingBuffer::new();

        rb.push(1.0);
        rb.push_with(2.0, OnFull::Overwrite);
        rb.push_with(88.0, OnFull::Discard);
        rb.push_with(-3.2, OnFull::Discard);
        rb.push_with(-0.2, OnFull::Discard); // penuh, di-drop
        rb.push_with(-0.3, OnFull::Overwrite); // evict 1.0

        assert_eq!(rb.pop(), 2.0);
        assert_eq!(rb.pop(), 88.0);
        assert_eq!(rb.pop(), -3.2);
        assert_eq!(rb.pop(), -0.3);
    }

    #[test]
    fn test_discard_keeps_state() {
        let mut rb: RingBuffer<u8, 3> = RingBuffer::new();
        rb.extend([1, 2, 3]);

        rb.push_with(4, OnFull::Discard);

        assert_eq!(rb.len(), 3);
        assert_eq!(rb.capacity(), 3);
        assert_eq!(rb.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "pop called on an empty ring buffer")]
    fn test_pop_empty_panics() {
        let mut rb: RingBuffer<i32, 3> = RingBuffer::new();
        rb.pop();
    }

    #[test]
    fn test_pop_after_wraparound() {
        let mut rb: RingBuffer<i32, 3> = RingBuffer::new();
        assert_eq!(rb.try_pop(), Err(PopError::Empty));

        rb.push(1);
        assert_eq!(rb.pop(), 1);

        for i in 0..5 {
            rb.push(i);
        }
        assert_eq!(rb.pop(), 2);
        assert_eq!(rb.pop(), 3);
        assert_eq!(rb.pop(), 4);
    }

    #[test]
    fn test_reset() {
        let mut rb: RingBuffer<i32, 4> = RingBuffer::new();
        rb.push(2);
        rb.push(4);
        rb.push(-9);

        rb.reset();
        assert!(rb.empty());
        assert_eq!(rb.try_pop(), Err(PopError::Empty));

        rb.push(1);
        assert_eq!(rb.pop(), 1);
        assert!(rb.try_pop().is_err());
    }

    #[test]
    fn test_size() {
        let mut rb: RingBuffer<i32, 3> = RingBuffer::new();
        assert_eq!(rb.size(), 0);
        rb.push(11);
        assert_eq!(rb.size(), 1);
        rb.push(9);
        assert_eq!(rb.size(), 2);
        rb.push(10);
        assert_eq!(rb.size(), 3);
        rb.push(1);
        assert_eq!(rb.size(), 3);
        rb.pop();
        assert_eq!(rb.size(), 2);
    }

    #[test]
    fn test_capacity_is_const() {
        static RB: RingBuffer<i16, 2> = RingBuffer::new();
        assert_eq!(RB.capacity(), 2);
        assert!(RB.is_empty());
    }

    #[test]
    fn test_full() {
        let mut rb: RingBuffer<char, 3> = RingBuffer::new();
        assert!(!rb.full());
        rb.push('a');
        assert!(!rb.full());
        rb.push('b');
        assert!(!rb.full());
        rb.push('c');
        assert!(rb.full());
        rb.pop();
        assert!(!rb.full());
        rb.push('d');
        assert!(rb.full());
        rb.push('e');
        assert!(rb.full());
    }

    #[test]
    fn test_try_push_and_evicting() {
        let mut rb: RingBuffer<&str, 2> = RingBuffer::new();

        assert!(rb.try_push("a").is_ok());
        assert_eq!(rb.push_evicting("b"), None);
        assert_eq!(rb.try_push("c").map_err(PushError::into_inner), Err("c"));
        assert_eq!(rb.push_evicting("d"), Some("a"));

        assert_eq!(rb.front(), Some(&"b"));
        assert_eq!(rb.back(), Some(&"d"));
    }

    #[test]
    fn test_peek_and_slices() {
        let mut rb: RingBuffer<u32, 4> = RingBuffer::new();
        assert_eq!(rb.front(), None);
        assert_eq!(rb.back(), None);
        assert_eq!(rb.as_slices(), (&[][..], &[][..]));

        rb.extend(0..6); // isi 2, 3, 4, 5 dengan head di index 2

        assert_eq!(rb.as_slices(), (&[2, 3][..], &[4, 5][..]));
        assert_eq!(rb.get(0), Some(&2));
        assert_eq!(rb.get(3), Some(&5));
        assert_eq!(rb.get(4), None);
        assert_eq!(rb.back(), Some(&5));
    }

    #[test]
    fn test_streaming_insertion() {
        let mut rb: RingBuffer<i32, 2> = RingBuffer::new();

        let _ = &mut rb << 1 << 2 << 3;

        assert_eq!(rb.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut rb: RingBuffer<String, 3> = RingBuffer::new();
        rb.extend(["x", "y", "z", "w"].map(String::from));

        let mut copy = rb.clone();
        assert_eq!(copy, rb);

        copy.push("v".to_string());
        assert_eq!(rb.pop(), "y");
        assert_eq!(copy.pop(), "z");
        assert_ne!(copy, rb);
    }

    #[test]
    fn test_drop_with_wrapped_heap_elements() {
        let mut rb: RingBuffer<String, 3> = RingBuffer::new();
        rb.push("a".into());
        rb.push("b".into());
        drop(rb);

        // Elemen hidup melintasi batas array: head dan tail di index 1
        let mut rb: RingBuffer<Vec<u8>, 3> = RingBuffer::new();
        for i in 0..4u8 {
            rb.push(vec![i; 8]);
        }
        assert_eq!(rb.as_slices().0.len(), 2);
        assert_eq!(rb.as_slices().1.len(), 1);
        drop(rb);
    }

    #[test]
    fn test_take_leaves_source_empty() {
        let mut rb: RingBuffer<Vec<u8>, 2> = RingBuffer::new();
        rb.push(vec![1]);
        rb.push(vec![2]);

        let mut moved = std::mem::take(&mut rb);
        assert!(rb.is_empty());
        assert_eq!(moved.pop(), vec![1]);
        assert_eq!(moved.pop(), vec![2]);
    }

    #[test]
    fn test_collect_keeps_last_n() {
        let rb: RingBuffer<i32, 3> = (1..=10).collect();
        assert_eq!(format!("{rb:?}"), "[8, 9, 10]");
        assert_eq!(rb.into_iter().collect::<Vec<_>>(), vec![8, 9, 10]);
    }

    #[test]
    fn test_wraparound() {
        let mut rb: RingBuffer<u64, 4> = RingBuffer::new();

        // Isi dan kuras berulang untuk menguji wraparound
        for round in 0..10 {
            for i in 0..3 {
                rb.push(round * 3 + i);
            }
            for i in 0..3 {
                assert_eq!(rb.pop(), round * 3 + i);
            }
        }
    }
}
