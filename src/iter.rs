//! Iterators and cursors over a circular vector
//!
//! 环形向量的迭代器与游标
//!
//! Every iterator here walks the two physical runs of the logical range one after
//! the other, so no wrap-around arithmetic happens per element. `Cursor` is the
//! random-access position type: it only carries a logical index and resolves it
//! against the runs when dereferenced.
//!
//! 这里的迭代器依次遍历逻辑区间的两段物理内存，因此每个元素都无需环绕运算。
//! `Cursor` 是随机访问位置类型：它只携带逻辑索引，解引用时才映射到物理段。

use crate::core::RingStore;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::{mem, slice};

// ============================================================================
// Iter
// ============================================================================

/// Immutable iterator in logical order
///
/// 按逻辑顺序的不可变迭代器
pub struct Iter<'a, T> {
    front: slice::Iter<'a, T>,
    back: slice::Iter<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) fn new(first: &'a [T], second: &'a [T]) -> Self {
        Self {
            front: first.iter(),
            back: second.iter(),
        }
    }

    /// Remaining elements as two slices
    ///
    /// 以两个切片表示的剩余元素
    #[inline]
    pub fn as_slices(&self) -> (&'a [T], &'a [T]) {
        (self.front.as_slice(), self.back.as_slice())
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter")
            .field(&self.front.as_slice())
            .field(&self.back.as_slice())
            .finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        match self.front.next() {
            Some(value) => Some(value),
            None => {
                // The first run is exhausted, continue with the second one
                mem::swap(&mut self.front, &mut self.back);
                self.front.next()
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        let head = self.front.len();
        if n < head {
            return self.front.nth(n);
        }
        self.front = mem::take(&mut self.back);
        self.front.nth(n - head)
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }

    #[inline]
    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }

    fn fold<Acc, F>(self, init: Acc, mut f: F) -> Acc
    where
        F: FnMut(Acc, Self::Item) -> Acc,
    {
        let acc = self.front.fold(init, &mut f);
        self.back.fold(acc, &mut f)
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        match self.back.next_back() {
            Some(value) => Some(value),
            None => {
                mem::swap(&mut self.front, &mut self.back);
                self.back.next_back()
            }
        }
    }

    fn nth_back(&mut self, n: usize) -> Option<&'a T> {
        let tail = self.back.len();
        if n < tail {
            return self.back.nth_back(n);
        }
        self.back = mem::take(&mut self.front);
        self.back.nth_back(n - tail)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

// ============================================================================
// IterMut
// ============================================================================

/// Mutable iterator in logical order
///
/// 按逻辑顺序的可变迭代器
pub struct IterMut<'a, T> {
    front: slice::IterMut<'a, T>,
    back: slice::IterMut<'a, T>,
}

impl<'a, T> IterMut<'a, T> {
    #[inline]
    pub(crate) fn new(first: &'a mut [T], second: &'a mut [T]) -> Self {
        Self {
            front: first.iter_mut(),
            back: second.iter_mut(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut")
            .field(&self.front.as_slice())
            .field(&self.back.as_slice())
            .finish()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        match self.front.next() {
            Some(value) => Some(value),
            None => {
                mem::swap(&mut self.front, &mut self.back);
                self.front.next()
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<&'a mut T> {
        let head = self.front.len();
        if n < head {
            return self.front.nth(n);
        }
        self.front = mem::take(&mut self.back);
        self.front.nth(n - head)
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }

    fn fold<Acc, F>(self, init: Acc, mut f: F) -> Acc
    where
        F: FnMut(Acc, Self::Item) -> Acc,
    {
        let acc = self.front.fold(init, &mut f);
        self.back.fold(acc, &mut f)
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        match self.back.next_back() {
            Some(value) => Some(value),
            None => {
                mem::swap(&mut self.front, &mut self.back);
                self.back.next_back()
            }
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

// ============================================================================
// IntoIter
// ============================================================================

/// Owning iterator, produced by [`CircularVec::into_iter`](crate::CircularVec)
///
/// 拥有所有权的迭代器
///
/// Elements not yet yielded are dropped together with the iterator.
///
/// 尚未产出的元素会随迭代器一起被 drop。
pub struct IntoIter<T, const RELOCATABLE: bool = true> {
    store: RingStore<T, RELOCATABLE>,
}

impl<T, const RELOCATABLE: bool> IntoIter<T, RELOCATABLE> {
    #[inline]
    pub(crate) fn new(store: RingStore<T, RELOCATABLE>) -> Self {
        Self { store }
    }

    /// Remaining elements as two slices
    ///
    /// 以两个切片表示的剩余元素
    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        self.store.spans(0, self.store.len())
    }
}

impl<T: fmt::Debug, const RELOCATABLE: bool> fmt::Debug for IntoIter<T, RELOCATABLE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.as_slices();
        f.debug_tuple("IntoIter").field(&a).field(&b).finish()
    }
}

impl<T, const RELOCATABLE: bool> Iterator for IntoIter<T, RELOCATABLE> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.store.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.store.len();
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<T> {
        let skip = n.min(self.store.len());
        self.store.truncate_front(self.store.len() - skip);
        self.store.pop_front()
    }

    #[inline]
    fn count(self) -> usize {
        self.store.len()
    }
}

impl<T, const RELOCATABLE: bool> DoubleEndedIterator for IntoIter<T, RELOCATABLE> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.store.pop_back()
    }
}

impl<T, const RELOCATABLE: bool> ExactSizeIterator for IntoIter<T, RELOCATABLE> {
    #[inline]
    fn len(&self) -> usize {
        self.store.len()
    }
}

impl<T, const RELOCATABLE: bool> FusedIterator for IntoIter<T, RELOCATABLE> {}

// ============================================================================
// Cursor
// ============================================================================

/// Random-access position inside a circular vector
///
/// 环形向量内的随机访问位置
///
/// A cursor holds a logical index in `0..=len`. Moving it is plain integer
/// arithmetic on that index; translation to a physical slot only happens in
/// [`get`](Cursor::get). Cursors order by logical index, independently of where
/// the elements sit in memory. Comparing cursors of different containers is
/// meaningless but safe.
///
/// 游标持有 `0..=len` 范围内的逻辑索引。移动游标只是对该索引的整数运算；
/// 仅在 [`get`](Cursor::get) 时才转换为物理槽位。游标按逻辑索引排序，与元素在内存中的位置无关。
pub struct Cursor<'a, T> {
    first: &'a [T],
    second: &'a [T],
    index: usize,
}

impl<'a, T> Cursor<'a, T> {
    #[inline]
    pub(crate) fn new(first: &'a [T], second: &'a [T], index: usize) -> Self {
        Self {
            first,
            second,
            index,
        }
    }

    /// Logical index of the cursor
    ///
    /// 游标的逻辑索引
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Length of the container the cursor walks over
    #[inline]
    pub fn container_len(&self) -> usize {
        self.first.len() + self.second.len()
    }

    /// Whether the cursor sits one past the last element
    ///
    /// 游标是否位于最后一个元素之后
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index >= self.container_len()
    }

    /// Element under the cursor, `None` at or past the end
    ///
    /// 游标处的元素；位于末尾或之后时返回 `None`
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        let head = self.first.len();
        if self.index < head {
            self.first.get(self.index)
        } else {
            self.second.get(self.index - head)
        }
    }

    /// Cursor moved by `delta` positions
    ///
    /// 移动 `delta` 个位置后的游标
    ///
    /// # Panics
    /// Panics if the result would be negative.
    #[inline]
    pub fn offset(&self, delta: isize) -> Self {
        let index = self
            .index
            .checked_add_signed(delta)
            .expect("cursor moved before the first element");
        Self { index, ..*self }
    }

    /// Signed distance from `origin` to `self`
    ///
    /// 从 `origin` 到 `self` 的有符号距离
    #[inline]
    pub fn distance_from(&self, origin: &Self) -> isize {
        self.index as isize - origin.index as isize
    }

    #[inline]
    pub fn move_next(&mut self) {
        self.index += 1;
    }

    /// # Panics
    /// Panics when already at index 0.
    #[inline]
    pub fn move_prev(&mut self) {
        self.index = self
            .index
            .checked_sub(1)
            .expect("cursor moved before the first element");
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("current", &self.get())
            .finish()
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Cursor<'_, T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> Add<usize> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn add(mut self, rhs: usize) -> Self {
        self.index += rhs;
        self
    }
}

impl<T> AddAssign<usize> for Cursor<'_, T> {
    #[inline]
    fn add_assign(&mut self, rhs: usize) {
        self.index += rhs;
    }
}

impl<T> Sub<usize> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn sub(mut self, rhs: usize) -> Self {
        self -= rhs;
        self
    }
}

impl<T> SubAssign<usize> for Cursor<'_, T> {
    #[inline]
    fn sub_assign(&mut self, rhs: usize) {
        self.index = self
            .index
            .checked_sub(rhs)
            .expect("cursor moved before the first element");
    }
}

impl<'a, T> Sub for Cursor<'a, T> {
    type Output = isize;

    #[inline]
    fn sub(self, rhs: Self) -> isize {
        self.distance_from(&rhs)
    }
}
