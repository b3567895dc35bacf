//! Conversions and standard trait implementations
//!
//! 转换与标准 trait 实现

use crate::circular::CircularVec;
use crate::ownership::Ownership;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};

impl<T, O: Ownership, const RELOCATABLE: bool> Default for CircularVec<T, O, RELOCATABLE> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, O: Ownership, const RELOCATABLE: bool> fmt::Debug
    for CircularVec<T, O, RELOCATABLE>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// ============================================================================
// Construction from other sequences
// 从其他序列构造
// ============================================================================

impl<T: Clone, O: Ownership, const RELOCATABLE: bool> From<Vec<T>>
    for CircularVec<T, O, RELOCATABLE>
{
    fn from(values: Vec<T>) -> Self {
        let mut out = Self::with_capacity(values.len());
        out.insert_many(0, values);
        out
    }
}

impl<T: Clone, O: Ownership, const RELOCATABLE: bool, const N: usize> From<[T; N]>
    for CircularVec<T, O, RELOCATABLE>
{
    fn from(values: [T; N]) -> Self {
        let mut out = Self::with_capacity(N);
        out.insert_many(0, values);
        out
    }
}

impl<T: Clone, O: Ownership, const RELOCATABLE: bool> From<&[T]>
    for CircularVec<T, O, RELOCATABLE>
{
    fn from(values: &[T]) -> Self {
        let mut out = Self::with_capacity(values.len());
        out.insert_many(0, values.iter().cloned());
        out
    }
}

impl<T: Clone, O: Ownership, const RELOCATABLE: bool> From<VecDeque<T>>
    for CircularVec<T, O, RELOCATABLE>
{
    fn from(values: VecDeque<T>) -> Self {
        let mut out = Self::with_capacity(values.len());
        out.insert_many(0, values);
        out
    }
}

impl<T: Clone, O: Ownership, const RELOCATABLE: bool> From<CircularVec<T, O, RELOCATABLE>>
    for Vec<T>
{
    fn from(values: CircularVec<T, O, RELOCATABLE>) -> Self {
        let mut out = Vec::with_capacity(values.len());
        out.extend(values);
        out
    }
}

impl<T: Clone, O: Ownership, const RELOCATABLE: bool> From<CircularVec<T, O, RELOCATABLE>>
    for VecDeque<T>
{
    fn from(values: CircularVec<T, O, RELOCATABLE>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Clone, O: Ownership, const RELOCATABLE: bool> FromIterator<T>
    for CircularVec<T, O, RELOCATABLE>
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

impl<T: Clone, O: Ownership, const RELOCATABLE: bool> Extend<T> for CircularVec<T, O, RELOCATABLE> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_iter(self.len(), iter);
    }
}

impl<'a, T: Clone + 'a, O: Ownership, const RELOCATABLE: bool> Extend<&'a T>
    for CircularVec<T, O, RELOCATABLE>
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.insert_iter(self.len(), iter.into_iter().cloned());
    }
}

// ============================================================================
// Comparison
// 比较
// ============================================================================

impl<T, U, O1, O2, const R1: bool, const R2: bool> PartialEq<CircularVec<U, O2, R2>>
    for CircularVec<T, O1, R1>
where
    T: PartialEq<U>,
    O1: Ownership,
    O2: Ownership,
{
    fn eq(&self, other: &CircularVec<U, O2, R2>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, O: Ownership, const RELOCATABLE: bool> Eq for CircularVec<T, O, RELOCATABLE> {}

macro_rules! impl_slice_eq {
    ($([$($generics:tt)*] $rhs:ty),+ $(,)?) => {
        $(
            impl<$($generics)* T, U, O: Ownership, const RELOCATABLE: bool> PartialEq<$rhs>
                for CircularVec<T, O, RELOCATABLE>
            where
                T: PartialEq<U>,
            {
                fn eq(&self, other: &$rhs) -> bool {
                    let (a, b) = self.as_slices();
                    let other: &[U] = &other[..];
                    other.len() == a.len() + b.len()
                        && a == &other[..a.len()]
                        && b == &other[a.len()..]
                }
            }
        )+
    };
}

impl_slice_eq! {
    [] Vec<U>,
    [] [U],
    ['b,] &'b [U],
    ['b,] &'b mut [U],
    [const N: usize,] [U; N],
    ['b, const N: usize,] &'b [U; N],
}

impl<T: PartialOrd, O: Ownership, const RELOCATABLE: bool> PartialOrd
    for CircularVec<T, O, RELOCATABLE>
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, O: Ownership, const RELOCATABLE: bool> Ord for CircularVec<T, O, RELOCATABLE> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, O: Ownership, const RELOCATABLE: bool> Hash for CircularVec<T, O, RELOCATABLE> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Same value as any other layout of the same elements
        state.write_usize(self.len());
        self.iter().for_each(|value| value.hash(state));
    }
}

/// Create a [`CircularVec`] holding the listed elements
///
/// 创建一个包含所列元素的 [`CircularVec`]
///
/// The result uses the default parameters ([`Shared`](crate::Shared) ownership,
/// bulk relocation). Convert with `.into()` or [`From`] for other variants.
///
/// 结果使用默认参数（[`Shared`](crate::Shared) 所有权、整体重定位）。
/// 其他变体请使用 `.into()` 或 [`From`] 转换。
///
/// # Examples
///
/// ```
/// use cowring::circular_vec;
///
/// let v = circular_vec![1, 2, 3];
/// assert_eq!(v.len(), 3);
/// assert_eq!(v.capacity(), 4);
///
/// let zeros = circular_vec![0u8; 5];
/// assert_eq!(zeros, [0, 0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! circular_vec {
    () => {
        <$crate::CircularVec<_>>::new()
    };
    ($elem:expr; $n:expr) => {
        <$crate::CircularVec<_>>::from_elem($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        <$crate::CircularVec<_>>::from([$($x),+])
    };
}
