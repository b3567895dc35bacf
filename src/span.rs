//! Span views over a circular vector
//!
//! 环形向量的区间视图
//!
//! A logical range of a circular vector covers at most two contiguous runs of
//! physical memory: the second one is empty unless the range wraps past the end
//! of the storage block. `Spans` and `SpansMut` expose those two runs as plain
//! slices so callers can bulk-copy, hash or serialize without dealing with
//! wrap-around themselves.
//!
//! 环形向量的一个逻辑区间至多覆盖两段连续的物理内存：除非区间越过存储块末尾，
//! 否则第二段为空。`Spans` 和 `SpansMut` 以普通切片的形式暴露这两段，
//! 调用者无需自行处理环绕即可批量拷贝、哈希或序列化。

use std::iter::Chain;
use std::slice;

/// Read-only view of a logical range as two slices
///
/// 以两个切片表示逻辑区间的只读视图
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Spans<'a, T> {
    first: &'a [T],
    second: &'a [T],
}

impl<T> Clone for Spans<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Spans<'_, T> {}

impl<'a, T> Spans<'a, T> {
    #[inline]
    pub(crate) fn new(first: &'a [T], second: &'a [T]) -> Self {
        Self { first, second }
    }

    /// First run, starting at the first element of the range
    ///
    /// 第一段，从区间的第一个元素开始
    #[inline]
    pub fn first(&self) -> &'a [T] {
        self.first
    }

    /// Second run, empty unless the range wraps
    ///
    /// 第二段，除非区间环绕否则为空
    #[inline]
    pub fn second(&self) -> &'a [T] {
        self.second
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.second.is_empty()
    }

    /// Whether the range is split across the end of the storage block
    ///
    /// 区间是否跨越存储块末尾
    #[inline]
    pub fn is_wrapped(&self) -> bool {
        !self.second.is_empty()
    }

    /// Both runs as a tuple
    #[inline]
    pub fn as_slices(&self) -> (&'a [T], &'a [T]) {
        (self.first, self.second)
    }

    #[inline]
    pub fn iter(&self) -> Chain<slice::Iter<'a, T>, slice::Iter<'a, T>> {
        self.first.iter().chain(self.second.iter())
    }

    /// Copy the range into the start of `dest`
    ///
    /// 将区间拷贝到 `dest` 的开头
    ///
    /// # Panics
    /// Panics if `dest` is shorter than the range.
    ///
    /// 若 `dest` 比区间短则 panic。
    pub fn copy_to_slice(&self, dest: &mut [T])
    where
        T: Copy,
    {
        assert!(dest.len() >= self.len(), "destination slice too short");
        let (head, tail) = dest.split_at_mut(self.first.len());
        head.copy_from_slice(self.first);
        tail[..self.second.len()].copy_from_slice(self.second);
    }
}

impl<'a, T> IntoIterator for Spans<'a, T> {
    type Item = &'a T;
    type IntoIter = Chain<slice::Iter<'a, T>, slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.first.iter().chain(self.second.iter())
    }
}

/// Mutable view of a logical range as two slices
///
/// 以两个切片表示逻辑区间的可变视图
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SpansMut<'a, T> {
    first: &'a mut [T],
    second: &'a mut [T],
}

impl<'a, T> SpansMut<'a, T> {
    #[inline]
    pub(crate) fn new(first: &'a mut [T], second: &'a mut [T]) -> Self {
        Self { first, second }
    }

    #[inline]
    pub fn first(&mut self) -> &mut [T] {
        &mut *self.first
    }

    #[inline]
    pub fn second(&mut self) -> &mut [T] {
        &mut *self.second
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.second.is_empty()
    }

    #[inline]
    pub fn is_wrapped(&self) -> bool {
        !self.second.is_empty()
    }

    /// Consume the view, returning both runs
    ///
    /// 消耗视图，返回两段切片
    #[inline]
    pub fn into_slices(self) -> (&'a mut [T], &'a mut [T]) {
        (self.first, self.second)
    }

    #[inline]
    pub fn iter_mut(&mut self) -> Chain<slice::IterMut<'_, T>, slice::IterMut<'_, T>> {
        self.first.iter_mut().chain(self.second.iter_mut())
    }

    /// Overwrite the range from the start of `src`
    ///
    /// 用 `src` 开头的元素覆盖区间
    ///
    /// # Panics
    /// Panics if `src` is shorter than the range.
    pub fn copy_from_slice(&mut self, src: &[T])
    where
        T: Copy,
    {
        assert!(src.len() >= self.len(), "source slice too short");
        let (head, tail) = src.split_at(self.first.len());
        self.first.copy_from_slice(head);
        self.second.copy_from_slice(&tail[..self.second.len()]);
    }

    /// Set every element of the range to clones of `value`
    ///
    /// 将区间内每个元素设为 `value` 的克隆
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.first.fill(value.clone());
        self.second.fill(value);
    }
}

impl<'a, T> IntoIterator for SpansMut<'a, T> {
    type Item = &'a mut T;
    type IntoIter = Chain<slice::IterMut<'a, T>, slice::IterMut<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.first.iter_mut().chain(self.second.iter_mut())
    }
}
