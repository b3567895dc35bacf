//! Growable circular vector with selectable ownership
//!
//! 可增长、所有权可选的环形向量
//!
//! `CircularVec` is the public container. It owns at most one handle to a ring
//! store and makes every policy decision:
//! - When to grow: any operation that needs more room than the current capacity
//!   first moves the elements into a store of `capacity_for_size(required)` slots
//! - When to detach: any mutation first makes the handle private, cloning a
//!   shared store if another container still observes it
//!
//! The store below does the mechanical part (shifting, relocation, spans).
//!
//! `CircularVec` 是公共容器。它至多拥有一个指向环形存储的句柄，并负责所有策略决策：
//! - 何时扩容：任何需要超过当前容量的操作都会先把元素移动到容量为
//!   `capacity_for_size(required)` 的新存储中
//! - 何时分离：任何修改都会先让句柄私有化，如果其他容器仍在观察共享存储则先克隆它
//!
//! 下层存储负责机械部分（移位、重定位、区间）。

use crate::core::{RingStore, capacity_for_size};
use crate::error::{CircularVecError, infallible};
use crate::iter::{Cursor, IntoIter, Iter, IterMut};
use crate::ownership::{DeepClone, Exclusive, Ownership, Shared, StoreHandle};
use crate::shim::log::{debug, trace};
use crate::span::{Spans, SpansMut};
use std::iter;
use std::mem;
use std::ops::{Bound, Index, IndexMut, RangeBounds};

/// Growable ring buffer with deque semantics
///
/// 具有双端队列语义的可增长环形缓冲区
///
/// # Type Parameters
/// - `T`: Element type
/// - `O`: Ownership discipline, [`Shared`] (copy-on-write, default) or [`Exclusive`]
/// - `RELOCATABLE`: Whether elements move in bulk (`true`, default) or one by one
///
/// # 类型参数
/// - `T`: 元素类型
/// - `O`: 所有权方式，[`Shared`]（写时复制，默认）或 [`Exclusive`]
/// - `RELOCATABLE`: 元素是整体移动（`true`，默认）还是逐个移动
///
/// # Features
///
/// - **Power-of-2 capacity**: Growth doubles, index translation is a mask
/// - **Shorter side moves**: Insert and erase shift whichever side of the position
///   holds fewer elements
/// - **Copy-on-write**: Cloning a shared vector is O(1); the first write clones the data
/// - **Panic safe**: A panicking `Clone`, closure or iterator leaves a valid vector
///
/// # 特性
///
/// - **2的幂次容量**: 扩容时翻倍，索引转换使用掩码
/// - **较短一侧移动**: 插入和删除时移动位置两侧中元素较少的一侧
/// - **写时复制**: 克隆共享向量为 O(1)；第一次写入时才复制数据
/// - **panic 安全**: `Clone`、闭包或迭代器 panic 后向量仍然有效
///
/// # Examples
///
/// ```
/// use cowring::CircularVec;
///
/// let mut v: CircularVec<i32> = CircularVec::new();
/// v.push_back(2);
/// v.push_back(3);
/// v.push_front(1);
/// assert_eq!(v, [1, 2, 3]);
///
/// // Copies share storage until one side writes
/// // 副本共享存储，直到某一方写入
/// let mut w = v.clone();
/// assert!(w.shares_storage_with(&v));
/// w.push_back(4);
/// assert!(!w.shares_storage_with(&v));
/// assert_eq!(v, [1, 2, 3]);
/// assert_eq!(w, [1, 2, 3, 4]);
/// ```
pub struct CircularVec<T, O: Ownership = Shared, const RELOCATABLE: bool = true> {
    /// `None` until the first allocation
    ///
    /// 首次分配前为 `None`
    handle: Option<O::Handle<RingStore<T, RELOCATABLE>>>,
}

/// Copy-on-write circular vector
///
/// 写时复制的环形向量
pub type SharedCircularVec<T> = CircularVec<T, Shared>;

/// Circular vector that deep-copies on clone
///
/// 克隆时深拷贝的环形向量
pub type ExclusiveCircularVec<T> = CircularVec<T, Exclusive>;

#[inline]
fn rounded_capacity(size: usize) -> Result<usize, CircularVecError> {
    capacity_for_size(size).ok_or(CircularVecError::CapacityOverflow)
}

/// Resolve a range against a length, panicking like slice indexing
///
/// 按切片索引的方式将区间解析为 `[first, last)`，非法时 panic
#[track_caller]
fn resolve_range<R: RangeBounds<usize>>(range: R, len: usize) -> (usize, usize) {
    let first = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start
            .checked_add(1)
            .unwrap_or_else(|| panic!("range start overflows usize")),
        Bound::Unbounded => 0,
    };
    let last = match range.end_bound() {
        Bound::Included(&end) => end
            .checked_add(1)
            .unwrap_or_else(|| panic!("range end overflows usize")),
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };
    assert!(first <= last, "range start {first} is greater than range end {last}");
    assert!(last <= len, "range end {last} out of bounds for length {len}");
    (first, last)
}

// ============================================================================
// Read-only operations (no `T: Clone` needed)
// 只读操作（无需 `T: Clone`）
// ============================================================================

impl<T, O: Ownership, const RELOCATABLE: bool> CircularVec<T, O, RELOCATABLE> {
    /// Create an empty vector without allocating
    ///
    /// 创建一个不分配内存的空向量
    #[inline]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Create an empty vector able to hold `capacity` elements without growing
    ///
    /// 创建一个无需扩容即可容纳 `capacity` 个元素的空向量
    ///
    /// Capacity will be rounded up to the next power of 2.
    ///
    /// 容量将向上取整到下一个 2 的幂次。
    ///
    /// # Examples
    ///
    /// ```
    /// use cowring::CircularVec;
    ///
    /// let v: CircularVec<u8> = CircularVec::with_capacity(10);
    /// assert_eq!(v.capacity(), 16);
    /// assert!(v.is_empty());
    /// ```
    #[track_caller]
    pub fn with_capacity(capacity: usize) -> Self {
        infallible(Self::try_with_capacity(capacity))
    }

    /// Fallible version of [`with_capacity`](Self::with_capacity)
    ///
    /// [`with_capacity`](Self::with_capacity) 的可失败版本
    pub fn try_with_capacity(capacity: usize) -> Result<Self, CircularVecError> {
        let capacity = rounded_capacity(capacity)?;
        if capacity == 0 {
            return Ok(Self::new());
        }
        Ok(Self::from_store(RingStore::try_new(capacity)?))
    }

    /// Create a vector holding `len` default values
    ///
    /// 创建一个包含 `len` 个默认值的向量
    #[track_caller]
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let capacity = infallible(rounded_capacity(len));
        if capacity == 0 {
            return Self::new();
        }
        Self::from_store(infallible(RingStore::try_filled_with(
            capacity,
            len,
            T::default,
        )))
    }

    /// Create a vector holding `len` clones of `value`
    ///
    /// 创建一个包含 `len` 个 `value` 克隆的向量
    #[track_caller]
    pub fn from_elem(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut out = Self::with_capacity(len);
        out.resize(len, value);
        out
    }

    #[inline]
    pub(crate) fn from_store(store: RingStore<T, RELOCATABLE>) -> Self {
        Self {
            handle: Some(StoreHandle::new(store)),
        }
    }

    #[inline]
    fn store(&self) -> Option<&RingStore<T, RELOCATABLE>> {
        self.handle.as_ref().map(|handle| handle.get())
    }

    /// Number of elements
    ///
    /// 元素数量
    #[inline]
    pub fn len(&self) -> usize {
        self.store().map_or(0, RingStore::len)
    }

    /// Check if the vector holds no elements
    ///
    /// 检查向量是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of elements the current storage holds without growing
    ///
    /// 当前存储无需扩容即可容纳的元素数量
    ///
    /// Always 0 or a power of 2.
    ///
    /// 始终为 0 或 2 的幂次。
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store().map_or(0, RingStore::capacity)
    }

    /// Whether another vector currently observes the same storage
    ///
    /// 是否有其他向量正在观察同一存储
    ///
    /// Always `false` for [`Exclusive`] vectors.
    ///
    /// 对 [`Exclusive`] 向量始终为 `false`。
    #[inline]
    pub fn is_shared(&self) -> bool {
        O::SHARES_STORAGE && self.handle.as_ref().is_some_and(|handle| !handle.is_unique())
    }

    /// Number of vectors observing this storage, 0 before the first allocation
    ///
    /// 观察此存储的向量数量；首次分配前为 0
    ///
    /// Always 0 or 1 for [`Exclusive`] vectors. For [`Shared`] vectors the value
    /// may already be stale when another thread clones or drops a copy.
    ///
    /// 对 [`Exclusive`] 向量始终为 0 或 1。对 [`Shared`] 向量而言，若其他线程正在克隆或
    /// drop 副本，返回值可能已经过时。
    ///
    /// # Examples
    ///
    /// ```
    /// use cowring::circular_vec;
    ///
    /// let a = circular_vec![1, 2, 3];
    /// assert_eq!(a.share_count(), 1);
    /// let b = a.clone();
    /// assert_eq!(a.share_count(), 2);
    /// drop(b);
    /// assert_eq!(a.share_count(), 1);
    /// ```
    #[inline]
    pub fn share_count(&self) -> usize {
        self.handle.as_ref().map_or(0, |handle| handle.ref_count())
    }

    /// Whether both vectors point at the same storage
    ///
    /// 两个向量是否指向同一存储
    #[inline]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        match (&self.handle, &other.handle) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Exchange the contents of two vectors without touching any element
    ///
    /// 交换两个向量的内容，不触及任何元素
    #[inline]
    pub fn swap_contents(&mut self, other: &mut Self) {
        mem::swap(&mut self.handle, &mut other.handle);
    }

    // ------------------------------------------------------------------
    // Element access
    // 元素访问
    // ------------------------------------------------------------------

    /// Element at logical `index`, `None` if out of bounds
    ///
    /// 逻辑索引 `index` 处的元素；越界时返回 `None`
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.store()?.get(index)
    }

    /// Checked access
    ///
    /// 带检查的访问
    ///
    /// # Errors
    /// `IndexOutOfBounds` if `index >= len`
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, CircularVecError> {
        let len = self.len();
        self.get(index)
            .ok_or(CircularVecError::IndexOutOfBounds { index, len })
    }

    /// Access an element without bounds checking
    ///
    /// 无边界检查地访问元素
    ///
    /// # Safety
    /// - `index < len`
    ///
    /// # 安全性
    /// - `index < len`
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        unsafe { self.store().unwrap_unchecked().get_unchecked(index) }
    }

    /// First element
    ///
    /// 首元素
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Last element
    ///
    /// 末尾元素
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.get(self.len().checked_sub(1)?)
    }

    // ------------------------------------------------------------------
    // Views
    // 视图
    // ------------------------------------------------------------------

    /// Front-to-back iterator
    ///
    /// 从前到后的迭代器
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        let (first, second) = self.as_slices();
        Iter::new(first, second)
    }

    /// The whole content as two slices, in logical order
    ///
    /// 按逻辑顺序以两个切片表示的全部内容
    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        match self.store() {
            Some(store) => store.spans(0, store.len()),
            None => (&[], &[]),
        }
    }

    /// Span view of a logical range
    ///
    /// 逻辑区间的区间视图
    ///
    /// # Panics
    /// Panics if the range is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use cowring::CircularVec;
    ///
    /// let mut v: CircularVec<i32> = CircularVec::with_capacity(4);
    /// v.extend([1, 2, 3]);
    /// v.pop_front();
    /// v.push_back(4);
    /// v.push_back(5);
    ///
    /// // [2, 3, 4, 5] now wraps around the end of the storage
    /// // [2, 3, 4, 5] 现在环绕存储末尾
    /// let spans = v.spans(..);
    /// assert_eq!(spans.first(), &[2, 3, 4]);
    /// assert_eq!(spans.second(), &[5]);
    /// ```
    #[track_caller]
    pub fn spans<R: RangeBounds<usize>>(&self, range: R) -> Spans<'_, T> {
        let (first, last) = resolve_range(range, self.len());
        match self.store() {
            Some(store) => {
                let (a, b) = store.spans(first, last);
                Spans::new(a, b)
            }
            None => Spans::new(&[], &[]),
        }
    }

    /// Call `f` on every element of a logical range, in order
    ///
    /// 按顺序对逻辑区间中的每个元素调用 `f`
    #[track_caller]
    pub fn for_each_in<R, F>(&self, range: R, f: F)
    where
        R: RangeBounds<usize>,
        F: FnMut(&T),
    {
        self.spans(range).iter().for_each(f);
    }

    /// Random-access cursor at logical `index`
    ///
    /// 位于逻辑索引 `index` 处的随机访问游标
    ///
    /// # Panics
    /// Panics if `index > len`.
    #[track_caller]
    pub fn cursor(&self, index: usize) -> Cursor<'_, T> {
        let len = self.len();
        assert!(index <= len, "cursor index (is {index}) should be <= len (is {len})");
        let (first, second) = self.as_slices();
        Cursor::new(first, second, index)
    }

    /// Cursor at the first element
    #[inline]
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        self.cursor(0)
    }

    /// Cursor one past the last element
    #[inline]
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        self.cursor(self.len())
    }
}

// ============================================================================
// Mutating operations
// 修改操作
// ============================================================================

impl<T: Clone, O: Ownership, const RELOCATABLE: bool> CircularVec<T, O, RELOCATABLE> {
    // ------------------------------------------------------------------
    // Policy
    // 策略
    // ------------------------------------------------------------------

    /// Make the handle private, cloning the store if it is shared
    ///
    /// 使句柄私有化；若存储被共享则先克隆
    fn try_detach(&mut self) -> Result<(), CircularVecError> {
        let Some(handle) = self.handle.as_mut() else {
            return Ok(());
        };
        if handle.is_unique() {
            return Ok(());
        }
        let copy = handle.get().try_deep_clone()?;
        debug!(
            len = copy.len(),
            capacity = copy.capacity(),
            "detached shared ring store"
        );
        *handle = StoreHandle::new(copy);
        Ok(())
    }

    /// Replace the store with one of `capacity` slots holding the same elements
    ///
    /// 用容量为 `capacity` 且元素相同的新存储替换当前存储
    ///
    /// A private store is relocated; a shared one is cloned straight into the new
    /// capacity, so growing a shared vector costs a single copy.
    ///
    /// 私有存储会被重定位；共享存储则直接克隆到新容量中，因此扩容共享向量只需一次复制。
    fn try_reallocate(&mut self, capacity: usize) -> Result<(), CircularVecError> {
        debug_assert!(capacity >= self.len());
        let fresh = match self.handle.as_mut() {
            Some(handle) if handle.is_unique() => {
                let mut fresh = RingStore::try_new(capacity)?;
                // SAFETY: uniqueness checked by the match guard
                unsafe { handle.get_mut_unchecked() }.relocate_into(&mut fresh);
                fresh
            }
            Some(handle) => {
                let fresh = handle.get().try_clone_with_capacity(capacity)?;
                trace!(
                    len = fresh.len(),
                    to_capacity = capacity,
                    "cloned shared ring store into new capacity"
                );
                fresh
            }
            None => RingStore::try_new(capacity)?,
        };
        self.handle = Some(StoreHandle::new(fresh));
        Ok(())
    }

    /// Private store able to hold `required` elements
    ///
    /// 可容纳 `required` 个元素的私有存储
    fn try_writable(
        &mut self,
        required: usize,
    ) -> Result<&mut RingStore<T, RELOCATABLE>, CircularVecError> {
        if required > self.capacity() {
            let capacity = rounded_capacity(required)?;
            self.try_reallocate(capacity)?;
        } else {
            self.try_detach()?;
        }
        let handle = self
            .handle
            .get_or_insert_with(|| StoreHandle::new(RingStore::empty()));
        debug_assert!(handle.is_unique());
        // SAFETY: the handle was just detached, reallocated or created
        Ok(unsafe { handle.get_mut_unchecked() })
    }

    #[inline]
    #[track_caller]
    fn store_for(&mut self, required: usize) -> &mut RingStore<T, RELOCATABLE> {
        infallible(self.try_writable(required))
    }

    #[inline]
    #[track_caller]
    fn store_mut(&mut self) -> &mut RingStore<T, RELOCATABLE> {
        self.store_for(0)
    }

    // ------------------------------------------------------------------
    // Capacity
    // 容量
    // ------------------------------------------------------------------

    /// Ensure the capacity is at least `capacity` (rounded up to a power of 2)
    ///
    /// 确保容量至少为 `capacity`（向上取整到 2 的幂次）
    ///
    /// Never shrinks, never changes the length.
    ///
    /// 从不缩小容量，也不改变长度。
    #[track_caller]
    pub fn reserve(&mut self, capacity: usize) {
        infallible(self.try_reserve(capacity))
    }

    /// Fallible version of [`reserve`](Self::reserve)
    ///
    /// # Errors
    /// `CapacityOverflow` or `AllocationFailed`; the vector is left untouched
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), CircularVecError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        let capacity = rounded_capacity(capacity)?;
        self.try_reallocate(capacity)
    }

    /// Reduce the capacity to `capacity_for_size(len)`
    ///
    /// 将容量缩减为 `capacity_for_size(len)`
    ///
    /// A second call in a row does nothing.
    ///
    /// 连续第二次调用不做任何事。
    #[track_caller]
    pub fn shrink_to_fit(&mut self) {
        let len = self.len();
        let Some(target) = capacity_for_size(len) else {
            return;
        };
        let current = self.capacity();
        if target >= current {
            return;
        }
        debug!(from_capacity = current, to_capacity = target, len, "shrinking ring store");
        if target == 0 {
            self.handle = None;
        } else {
            infallible(self.try_reallocate(target));
        }
    }

    /// Remove every element
    ///
    /// 移除所有元素
    ///
    /// A private store keeps its capacity. A shared store is released instead of
    /// being cloned, leaving this vector with no allocation.
    ///
    /// 私有存储保留其容量。共享存储会被释放而不是被克隆，此向量因此不再持有分配。
    pub fn clear(&mut self) {
        let unique = self.handle.as_ref().is_some_and(|handle| handle.is_unique());
        if unique {
            self.store_mut().clear();
        } else {
            self.handle = None;
        }
    }

    // ------------------------------------------------------------------
    // Mutable access
    // 可变访问
    // ------------------------------------------------------------------

    /// Mutable element at logical `index`, `None` if out of bounds
    ///
    /// 逻辑索引 `index` 处元素的可变引用；越界时返回 `None`
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len() {
            return None;
        }
        self.store_mut().get_mut(index)
    }

    /// Checked mutable access
    ///
    /// 带检查的可变访问
    ///
    /// # Errors
    /// `IndexOutOfBounds` if `index >= len`
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, CircularVecError> {
        let len = self.len();
        self.get_mut(index)
            .ok_or(CircularVecError::IndexOutOfBounds { index, len })
    }

    /// Mutable first element
    ///
    /// 首元素的可变引用
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Mutable last element
    ///
    /// 末尾元素的可变引用
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.len().checked_sub(1)?;
        self.get_mut(last)
    }

    /// Swap two elements
    ///
    /// 交换两个元素
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    #[track_caller]
    pub fn swap(&mut self, a: usize, b: usize) {
        let len = self.len();
        assert!(a < len && b < len, "swap indices ({a}, {b}) out of bounds for length {len}");
        if a != b {
            self.store_mut().swap(a, b);
        }
    }

    // ------------------------------------------------------------------
    // Ends
    // 两端
    // ------------------------------------------------------------------

    /// Append an element, growing if full
    ///
    /// 在末尾追加元素，满时扩容
    ///
    /// # Examples
    ///
    /// ```
    /// use cowring::CircularVec;
    ///
    /// let mut v: CircularVec<i32> = CircularVec::new();
    /// for i in 1..=4 {
    ///     v.push_back(i);
    /// }
    /// assert_eq!(v.capacity(), 4);
    /// v.push_back(5);
    /// assert_eq!(v.capacity(), 8);
    /// ```
    #[track_caller]
    pub fn push_back(&mut self, value: T) {
        infallible(self.try_push_back(value))
    }

    /// Fallible version of [`push_back`](Self::push_back)
    ///
    /// # Errors
    /// `CapacityOverflow` or `AllocationFailed`; `value` is dropped and the vector
    /// is left untouched
    pub fn try_push_back(&mut self, value: T) -> Result<(), CircularVecError> {
        let required = self.len() + 1;
        let store = self.try_writable(required)?;
        // SAFETY: try_writable made room for one more element
        unsafe { store.push_back_unchecked(value) };
        Ok(())
    }

    /// Prepend an element, growing if full
    ///
    /// 在前端插入元素，满时扩容
    #[track_caller]
    pub fn push_front(&mut self, value: T) {
        infallible(self.try_push_front(value))
    }

    /// Fallible version of [`push_front`](Self::push_front)
    pub fn try_push_front(&mut self, value: T) -> Result<(), CircularVecError> {
        let required = self.len() + 1;
        let store = self.try_writable(required)?;
        // SAFETY: try_writable made room for one more element
        unsafe { store.push_front_unchecked(value) };
        Ok(())
    }

    /// Remove and return the last element
    ///
    /// 移除并返回末尾元素
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.store_mut().pop_back()
    }

    /// Remove and return the first element
    ///
    /// 移除并返回首元素
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.store_mut().pop_front()
    }

    // ------------------------------------------------------------------
    // Positional insert / erase
    // 按位置插入 / 删除
    // ------------------------------------------------------------------

    /// Insert `value` at logical `pos`, shifting the shorter side
    ///
    /// 在逻辑位置 `pos` 插入 `value`，移动较短的一侧
    ///
    /// # Panics
    /// Panics if `pos > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cowring::circular_vec;
    ///
    /// let mut v = circular_vec![1, 2, 3];
    /// v.insert(1, 99);
    /// assert_eq!(v, [1, 99, 2, 3]);
    /// ```
    #[track_caller]
    pub fn insert(&mut self, pos: usize, value: T) -> &mut T {
        infallible(self.try_insert(pos, value))
    }

    /// Fallible version of [`insert`](Self::insert)
    #[track_caller]
    pub fn try_insert(&mut self, pos: usize, value: T) -> Result<&mut T, CircularVecError> {
        let len = self.len();
        assert!(pos <= len, "insertion index (is {pos}) should be <= len (is {len})");
        Ok(self.try_writable(len + 1)?.insert(pos, value))
    }

    /// Insert the element produced by `f` at logical `pos`
    ///
    /// 在逻辑位置 `pos` 插入由 `f` 生成的元素
    ///
    /// With `RELOCATABLE = true` the slot is opened before `f` runs; if `f`
    /// panics, the elements from `pos` on are dropped and the length becomes
    /// `pos`. With `RELOCATABLE = false`, `f` runs first and a panic leaves the
    /// elements untouched.
    ///
    /// 当 `RELOCATABLE = true` 时，先腾出槽位再执行 `f`；若 `f` panic，`pos` 及之后的元素
    /// 会被 drop，长度变为 `pos`。当 `RELOCATABLE = false` 时先执行 `f`，panic 时元素保持不变。
    #[track_caller]
    pub fn insert_with<F>(&mut self, pos: usize, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let len = self.len();
        assert!(pos <= len, "insertion index (is {pos}) should be <= len (is {len})");
        self.store_for(len + 1).insert_with(pos, f)
    }

    /// Insert every item of an exact-size iterator at logical `pos`
    ///
    /// 在逻辑位置 `pos` 插入精确大小迭代器的所有元素
    ///
    /// Grows once, opens one gap of `items.len()` slots by moving the shorter
    /// side, then fills it in order. If the iterator yields fewer items than it
    /// reported, or panics, the unfilled part of the gap is closed again.
    ///
    /// 只扩容一次，通过移动较短一侧腾出 `items.len()` 个槽位的空隙，然后按顺序填充。
    /// 如果迭代器产出的元素少于其报告的数量或发生 panic，未填充的部分会被重新关闭。
    #[track_caller]
    pub fn insert_many<I>(&mut self, pos: usize, items: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let len = self.len();
        assert!(pos <= len, "insertion index (is {pos}) should be <= len (is {len})");
        let mut items = items.into_iter();
        let count = items.len();
        if count == 0 {
            return;
        }
        self.store_for(len + count)
            .insert_exact(pos, count, &mut items);
    }

    /// Insert every item of any iterator at logical `pos`
    ///
    /// 在逻辑位置 `pos` 插入任意迭代器的所有元素
    ///
    /// Items are appended one by one and then rotated into place. If the
    /// iterator panics, the items produced so far stay at the back.
    ///
    /// 元素逐个追加到末尾，然后旋转到目标位置。若迭代器 panic，已产出的元素保留在末尾。
    #[track_caller]
    pub fn insert_iter<I>(&mut self, pos: usize, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let old_len = self.len();
        assert!(pos <= old_len, "insertion index (is {pos}) should be <= len (is {old_len})");
        let items = items.into_iter();
        let (lower, _) = items.size_hint();
        self.reserve(old_len.saturating_add(lower));
        for item in items {
            self.push_back(item);
        }
        let len = self.len();
        if len > old_len && pos < old_len {
            self.store_mut().rotate(pos, old_len, len);
        }
    }

    /// Insert `count` clones of `value` at logical `pos`
    ///
    /// 在逻辑位置 `pos` 插入 `count` 个 `value` 的克隆
    #[track_caller]
    pub fn insert_n(&mut self, pos: usize, count: usize, value: T) {
        self.insert_many(pos, iter::repeat_n(value, count));
    }

    /// Drop the element at logical `pos`
    ///
    /// drop 逻辑位置 `pos` 处的元素
    ///
    /// # Panics
    /// Panics if `pos >= len`.
    #[track_caller]
    pub fn erase(&mut self, pos: usize) {
        let len = self.len();
        assert!(pos < len, "removal index (is {pos}) should be < len (is {len})");
        self.store_mut().erase_range(pos, pos + 1);
    }

    /// Remove and return the element at logical `pos`, `None` if out of bounds
    ///
    /// 移除并返回逻辑位置 `pos` 处的元素；越界时返回 `None`
    pub fn remove(&mut self, pos: usize) -> Option<T> {
        if pos >= self.len() {
            return None;
        }
        Some(self.store_mut().remove(pos))
    }

    /// Drop a logical range, moving whichever side of it is shorter
    ///
    /// drop 一个逻辑区间，移动其两侧中较短的一侧
    ///
    /// # Panics
    /// Panics if the range is out of bounds.
    #[track_caller]
    pub fn erase_range<R: RangeBounds<usize>>(&mut self, range: R) {
        let (first, last) = resolve_range(range, self.len());
        if first == last {
            return;
        }
        self.store_mut().erase_range(first, last);
    }

    // ------------------------------------------------------------------
    // Bulk
    // 批量操作
    // ------------------------------------------------------------------

    /// Resize to `new_len`, cloning `value` into new back slots
    ///
    /// 调整长度为 `new_len`，新的末尾槽位填入 `value` 的克隆
    #[track_caller]
    pub fn resize(&mut self, new_len: usize, value: T) {
        let len = self.len();
        if new_len <= len {
            self.truncate(new_len);
            return;
        }
        let extra = new_len - len;
        self.store_for(new_len)
            .insert_exact(len, extra, &mut iter::repeat_n(value, extra));
    }

    /// Resize to `new_len`, filling new back slots with the results of `f`
    ///
    /// 调整长度为 `new_len`，新的末尾槽位填入 `f` 的结果
    #[track_caller]
    pub fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        let len = self.len();
        if new_len <= len {
            self.truncate(new_len);
            return;
        }
        self.store_for(new_len).extend_back_with(new_len - len, f);
    }

    /// Resize to `new_len` at the front, cloning `value` into new front slots
    ///
    /// 在前端调整长度为 `new_len`，新的前端槽位填入 `value` 的克隆
    ///
    /// Shrinking drops elements from the front.
    ///
    /// 缩小时从前端 drop 元素。
    #[track_caller]
    pub fn resize_front(&mut self, new_len: usize, value: T) {
        let len = self.len();
        if new_len <= len {
            self.truncate_front(new_len);
            return;
        }
        let extra = new_len - len;
        self.store_for(new_len)
            .insert_exact(0, extra, &mut iter::repeat_n(value, extra));
    }

    /// Resize to `new_len` at the front, filling new front slots with `f`
    ///
    /// 在前端调整长度为 `new_len`，新的前端槽位填入 `f` 的结果
    ///
    /// New elements appear in the order `f` produced them.
    ///
    /// 新元素按 `f` 生成的顺序排列。
    #[track_caller]
    pub fn resize_front_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        let len = self.len();
        if new_len <= len {
            self.truncate_front(new_len);
            return;
        }
        let extra = new_len - len;
        self.store_for(new_len)
            .insert_exact(0, extra, &mut iter::repeat_with(f));
    }

    /// Keep the first `len` elements
    ///
    /// 保留前 `len` 个元素
    pub fn truncate(&mut self, len: usize) {
        if len < self.len() {
            self.store_mut().truncate(len);
        }
    }

    /// Keep the last `len` elements
    ///
    /// 保留最后 `len` 个元素
    pub fn truncate_front(&mut self, len: usize) {
        if len < self.len() {
            self.store_mut().truncate_front(len);
        }
    }

    /// Replace the content with the items of an exact-size iterator
    ///
    /// 用精确大小迭代器的元素替换内容
    ///
    /// Grows at most once to the exact count, overwrites the existing elements
    /// in place and appends the rest.
    ///
    /// 至多扩容一次到精确数量，原地覆盖现有元素并追加其余元素。
    #[track_caller]
    pub fn assign_exact<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut items = items.into_iter();
        let count = items.len();
        if count == 0 {
            self.clear();
            return;
        }
        let store = self.store_for(count);
        store.truncate(count);

        let kept = store.len();
        let mut written = 0;
        let (a, b) = store.spans_mut(0, kept);
        for slot in a.iter_mut().chain(b.iter_mut()) {
            let Some(value) = items.next() else { break };
            *slot = value;
            written += 1;
        }
        if written < kept {
            store.truncate(written);
            return;
        }
        store.insert_exact(kept, count - kept, &mut items);
    }

    /// Replace the content with the items of any iterator
    ///
    /// 用任意迭代器的元素替换内容
    #[track_caller]
    pub fn assign_iter<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.clear();
        self.insert_iter(0, items);
    }

    /// Replace the content with `count` clones of `value`
    ///
    /// 用 `count` 个 `value` 的克隆替换内容
    #[track_caller]
    pub fn assign_n(&mut self, count: usize, value: T) {
        self.assign_exact(iter::repeat_n(value, count));
    }

    /// Copy of `len` elements starting at `start`, or up to the end for `None`
    ///
    /// 从 `start` 开始的 `len` 个元素的副本；`len` 为 `None` 时直到末尾
    ///
    /// Asking for the whole vector returns a clone, which shares storage for
    /// [`Shared`] vectors.
    ///
    /// 请求整个向量时返回克隆，对 [`Shared`] 向量而言会共享存储。
    ///
    /// # Panics
    /// Panics if the range is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use cowring::circular_vec;
    ///
    /// let v = circular_vec![1, 2, 3, 4, 5];
    /// assert_eq!(v.mid(1, Some(3)), [2, 3, 4]);
    /// assert_eq!(v.mid(3, None), [4, 5]);
    /// assert!(v.mid(0, None).shares_storage_with(&v));
    /// ```
    #[track_caller]
    pub fn mid(&self, start: usize, len: Option<usize>) -> Self {
        let total = self.len();
        assert!(start <= total, "mid start (is {start}) should be <= len (is {total})");
        let len = len.unwrap_or(total - start);
        assert!(
            len <= total - start,
            "mid range {start}..{} out of bounds for length {total}",
            start.saturating_add(len)
        );
        if start == 0 && len == total {
            return self.clone();
        }
        let Some(store) = self.store() else {
            return Self::new();
        };
        if len == 0 {
            return Self::new();
        }

        let mut out = infallible(RingStore::try_new(infallible(rounded_capacity(len))));
        let (a, b) = store.spans(start, start + len);
        out.insert_exact(0, len, &mut a.iter().chain(b).cloned());
        Self::from_store(out)
    }

    /// Append clones of every element of `other`
    ///
    /// 在末尾追加 `other` 所有元素的克隆
    #[track_caller]
    pub fn append(&mut self, other: &Self) {
        self.insert_many(self.len(), other.iter().cloned());
    }

    /// Rotate so that the element at `n` becomes the first one
    ///
    /// 旋转使位于 `n` 的元素成为第一个元素
    ///
    /// # Panics
    /// Panics if `n > len`.
    #[track_caller]
    pub fn rotate_left(&mut self, n: usize) {
        let len = self.len();
        assert!(n <= len, "rotation (is {n}) should be <= len (is {len})");
        if n == 0 || n == len {
            return;
        }
        self.store_mut().rotate(0, n, len);
    }

    /// Rotate so that the last `n` elements move to the front
    ///
    /// 旋转使最后 `n` 个元素移动到前端
    ///
    /// # Panics
    /// Panics if `n > len`.
    #[track_caller]
    pub fn rotate_right(&mut self, n: usize) {
        let len = self.len();
        assert!(n <= len, "rotation (is {n}) should be <= len (is {len})");
        if n == 0 || n == len {
            return;
        }
        self.store_mut().rotate(0, len - n, len);
    }

    // ------------------------------------------------------------------
    // Mutable views
    // 可变视图
    // ------------------------------------------------------------------

    /// Front-to-back mutable iterator
    ///
    /// 从前到后的可变迭代器
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (first, second) = self.as_mut_slices();
        IterMut::new(first, second)
    }

    /// The whole content as two mutable slices, in logical order
    ///
    /// 按逻辑顺序以两个可变切片表示的全部内容
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        self.spans_mut(..).into_slices()
    }

    /// Mutable span view of a logical range
    ///
    /// 逻辑区间的可变区间视图
    ///
    /// # Panics
    /// Panics if the range is out of bounds.
    #[track_caller]
    pub fn spans_mut<R: RangeBounds<usize>>(&mut self, range: R) -> SpansMut<'_, T> {
        let (first, last) = resolve_range(range, self.len());
        if first == last {
            return SpansMut::new(&mut [], &mut []);
        }
        let (a, b) = self.store_mut().spans_mut(first, last);
        SpansMut::new(a, b)
    }

    /// Call `f` on every element of a logical range, in order
    ///
    /// 按顺序对逻辑区间中的每个元素调用 `f`
    #[track_caller]
    pub fn for_each_in_mut<R, F>(&mut self, range: R, f: F)
    where
        R: RangeBounds<usize>,
        F: FnMut(&mut T),
    {
        self.spans_mut(range).into_iter().for_each(f);
    }

    // ------------------------------------------------------------------
    // Sharing / interchange
    // 共享 / 交换
    // ------------------------------------------------------------------

    /// Fallible clone
    ///
    /// 可失败的克隆
    ///
    /// For [`Shared`] vectors this only bumps a reference count and never fails.
    ///
    /// 对 [`Shared`] 向量而言只增加引用计数，永不失败。
    pub fn try_clone(&self) -> Result<Self, CircularVecError> {
        let handle = match &self.handle {
            Some(handle) => Some(handle.duplicate()?),
            None => None,
        };
        Ok(Self { handle })
    }

    /// Copy the content into any collection, in logical order
    ///
    /// 按逻辑顺序将内容复制到任意集合中
    ///
    /// # Examples
    ///
    /// ```
    /// use cowring::circular_vec;
    /// use std::collections::LinkedList;
    ///
    /// let v = circular_vec![1, 2, 3];
    /// let list: LinkedList<i32> = v.to_sequence();
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    pub fn to_sequence<C>(&self) -> C
    where
        C: FromIterator<T>,
    {
        self.iter().cloned().collect()
    }

    /// Move the content into any collection, leaving this vector empty
    ///
    /// 将内容移动到任意集合中，并使此向量为空
    ///
    /// Elements are moved when the storage is private and cloned otherwise.
    ///
    /// 存储私有时移动元素，否则克隆元素。
    pub fn move_to_sequence<C>(&mut self) -> C
    where
        C: FromIterator<T>,
    {
        mem::take(self).into_iter().collect()
    }

    /// Take the store out, cloning it if another vector observes it
    fn into_store(self) -> RingStore<T, RELOCATABLE> {
        match self.handle {
            None => RingStore::empty(),
            Some(handle) => match handle.try_unwrap() {
                Ok(store) => store,
                Err(shared) => infallible(shared.get().try_deep_clone()),
            },
        }
    }
}

impl<T: Clone, O: Ownership, const RELOCATABLE: bool> Clone for CircularVec<T, O, RELOCATABLE> {
    #[track_caller]
    fn clone(&self) -> Self {
        infallible(self.try_clone())
    }
}

impl<T, O: Ownership, const RELOCATABLE: bool> Index<usize> for CircularVec<T, O, RELOCATABLE> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "index out of bounds: the len is {} but the index is {index}",
                self.len()
            ),
        }
    }
}

impl<T: Clone, O: Ownership, const RELOCATABLE: bool> IndexMut<usize>
    for CircularVec<T, O, RELOCATABLE>
{
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("index out of bounds: the len is {len} but the index is {index}"),
        }
    }
}

impl<T: Clone, O: Ownership, const RELOCATABLE: bool> IntoIterator
    for CircularVec<T, O, RELOCATABLE>
{
    type Item = T;
    type IntoIter = IntoIter<T, RELOCATABLE>;

    /// Consume the vector; a shared store is cloned first
    ///
    /// 消耗向量；共享存储会先被克隆
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.into_store())
    }
}

impl<'a, T, O: Ownership, const RELOCATABLE: bool> IntoIterator
    for &'a CircularVec<T, O, RELOCATABLE>
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Clone, O: Ownership, const RELOCATABLE: bool> IntoIterator
    for &'a mut CircularVec<T, O, RELOCATABLE>
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
