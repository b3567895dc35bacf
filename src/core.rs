//! Core ring storage - Backing store for the circular vector
//!
//! 核心环形存储 - 环形向量的底层存储
//!
//! `RingStore` owns one fixed-capacity raw block and tracks the live logical range
//! inside it. It carries no policy: it never grows, never shares, and every
//! positional mutation assumes the caller already made room. The façade decides
//! when to reallocate or detach and delegates the mechanics here:
//! - Index masking on a power-of-two capacity
//! - Push/pop at both ends
//! - Gap opening/closing for insert and erase (shorter side moves)
//! - Relocation into a bigger or smaller store
//! - Two-run span extraction for wrap-around ranges
//!
//! `RingStore` 拥有一块定长原始内存并跟踪其中有效的逻辑区间。它不包含任何策略：
//! 从不扩容、从不共享，所有位置修改都假定调用者已经预留了空间。
//!
//! # Relocation modes
//!
//! The `RELOCATABLE` parameter selects how slots move:
//! - `true`: contiguous runs are moved with a single `ptr::copy` each, and
//!   `insert_with` opens the slot before running the element closure
//! - `false`: runs are moved one element at a time, and `insert_with` runs the
//!   element closure before anything moves
//!
//! `RELOCATABLE` 参数决定槽位的移动方式：
//! - `true`：每段连续区间使用一次 `ptr::copy` 整体移动，`insert_with` 先腾出槽位再执行闭包
//! - `false`：逐个元素移动，`insert_with` 先执行闭包再移动元素

use crate::error::CircularVecError;
use crate::ownership::DeepClone;
use crate::raw::RawBlock;
use crate::shim::log::trace;
use std::{mem, ptr, slice};

/// Core ring storage structure
///
/// 核心环形存储结构
///
/// # Invariants
/// - `capacity` is 0 or a power of 2 and never changes
/// - `begin < capacity` (or 0 when capacity is 0)
/// - `len <= capacity`
/// - Logical index `i < len` lives at physical slot `(begin + i) & (capacity - 1)`
///
/// # 不变量
/// - `capacity` 为 0 或 2 的幂次，且永不改变
/// - `begin < capacity`（容量为 0 时为 0）
/// - `len <= capacity`
/// - 逻辑索引 `i < len` 位于物理槽位 `(begin + i) & (capacity - 1)`
pub(crate) struct RingStore<T, const RELOCATABLE: bool> {
    /// Raw slots
    ///
    /// 原始槽位
    block: RawBlock<T>,

    /// Physical index of logical element 0
    ///
    /// 逻辑元素 0 的物理索引
    begin: usize,

    /// Number of live elements
    ///
    /// 有效元素数量
    len: usize,
}

impl<T, const RELOCATABLE: bool> RingStore<T, RELOCATABLE> {
    /// Create a store with no storage
    ///
    /// 创建一个没有存储空间的存储
    #[inline]
    pub const fn empty() -> Self {
        Self {
            block: RawBlock::empty(),
            begin: 0,
            len: 0,
        }
    }

    /// Create an empty store with the specified capacity
    ///
    /// 创建指定容量的空存储
    ///
    /// # Parameters
    /// - `capacity`: 0 or a power of 2
    ///
    /// # 参数
    /// - `capacity`: 0 或 2 的幂次
    pub fn try_new(capacity: usize) -> Result<Self, CircularVecError> {
        debug_assert!(capacity == 0 || capacity.is_power_of_two());
        Ok(Self {
            block: RawBlock::try_with_capacity(capacity)?,
            begin: 0,
            len: 0,
        })
    }

    /// Create a store holding `len` elements produced by `f`
    ///
    /// 创建一个包含 `len` 个由 `f` 生成元素的存储
    ///
    /// If `f` panics, the elements built so far are dropped and the block is
    /// released before the panic propagates.
    ///
    /// 如果 `f` panic，已构造的元素会被 drop，内存块会在 panic 传播前释放。
    pub fn try_filled_with<F>(capacity: usize, len: usize, f: F) -> Result<Self, CircularVecError>
    where
        F: FnMut() -> T,
    {
        debug_assert!(len <= capacity);
        let mut store = Self::try_new(capacity)?;
        store.extend_back_with(len, f);
        Ok(store)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.block.capacity()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Physical index of logical element 0
    ///
    /// 逻辑元素 0 的物理索引
    #[cfg(test)]
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Get the mask for fast modulo operation
    ///
    /// 获取快速取模运算的掩码
    #[inline]
    pub fn mask(&self) -> usize {
        self.capacity().wrapping_sub(1)
    }

    /// Translate a logical index into a physical slot
    ///
    /// 将逻辑索引转换为物理槽位
    #[inline(always)]
    fn phys(&self, index: usize) -> usize {
        self.begin.wrapping_add(index) & self.mask()
    }

    /// Pointer to the slot holding logical index `index`
    ///
    /// # Safety
    /// - `capacity` must be non-zero
    #[inline(always)]
    unsafe fn ptr_at(&self, index: usize) -> *mut T {
        unsafe { self.block.slot(self.phys(index)) }
    }

    // ------------------------------------------------------------------
    // Element access
    // 元素访问
    // ------------------------------------------------------------------

    /// Access a logical element without bounds checking
    ///
    /// 无边界检查地访问逻辑元素
    ///
    /// # Safety
    /// - `index < len`
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        unsafe { &*self.ptr_at(index) }
    }

    /// # Safety
    /// - `index < len`
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        unsafe { &mut *self.ptr_at(index) }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            // SAFETY: bounds checked above
            Some(unsafe { self.get_unchecked(index) })
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            // SAFETY: bounds checked above
            Some(unsafe { self.get_unchecked_mut(index) })
        } else {
            None
        }
    }

    /// Swap two logical elements
    ///
    /// 交换两个逻辑元素
    pub fn swap(&mut self, a: usize, b: usize) {
        assert!(a < self.len && b < self.len, "swap index out of bounds");
        // SAFETY: both indices are live; ptr::swap tolerates a == b
        unsafe { ptr::swap(self.ptr_at(a), self.ptr_at(b)) }
    }

    /// Reverse the logical range `[first, last)` in place
    ///
    /// 原地反转逻辑区间 `[first, last)`
    pub fn reverse(&mut self, first: usize, last: usize) {
        debug_assert!(first <= last && last <= self.len);
        let (mut lo, mut hi) = (first, last);
        while lo + 1 < hi {
            hi -= 1;
            self.swap(lo, hi);
            lo += 1;
        }
    }

    /// Rotate `[first, last)` so that the element at `mid` becomes the first one
    ///
    /// 旋转 `[first, last)`，使 `mid` 处的元素成为第一个元素
    pub fn rotate(&mut self, first: usize, mid: usize, last: usize) {
        debug_assert!(first <= mid && mid <= last && last <= self.len);
        if first == mid || mid == last {
            return;
        }
        if first == 0 && last == self.len && self.is_full() {
            // A full ring rotates by moving its start
            // 满环只需移动起点即可完成旋转
            self.begin = self.phys(mid);
            return;
        }
        self.reverse(first, mid);
        self.reverse(mid, last);
        self.reverse(first, last);
    }

    // ------------------------------------------------------------------
    // Span extraction
    // 区间提取
    // ------------------------------------------------------------------

    /// Physical `(start, len)` runs covering logical `[first, last)`
    ///
    /// 覆盖逻辑区间 `[first, last)` 的物理 `(起点, 长度)` 段
    ///
    /// The second run is empty unless the range wraps past the end of the block.
    ///
    /// 除非区间越过内存块末尾，否则第二段为空。
    #[inline]
    fn runs(&self, first: usize, last: usize) -> [(usize, usize); 2] {
        if first >= last {
            return [(0, 0), (0, 0)];
        }
        let start = self.phys(first);
        let count = last - first;
        let head = count.min(self.capacity() - start);
        [(start, head), (0, count - head)]
    }

    /// Raw slices over logical `[first, last)`, not limited to the live range
    ///
    /// # Safety
    /// - `last - first <= capacity`
    #[inline]
    unsafe fn raw_runs(&mut self, first: usize, last: usize) -> (*mut [T], *mut [T]) {
        let [(a, a_len), (b, b_len)] = self.runs(first, last);
        unsafe {
            (
                ptr::slice_from_raw_parts_mut(self.block.slot(a), a_len),
                ptr::slice_from_raw_parts_mut(self.block.slot(b), b_len),
            )
        }
    }

    /// Two contiguous slices covering logical `[first, last)`
    ///
    /// 覆盖逻辑区间 `[first, last)` 的两个连续切片
    pub fn spans(&self, first: usize, last: usize) -> (&[T], &[T]) {
        assert!(first <= last && last <= self.len, "span range out of bounds");
        let [(a, a_len), (b, b_len)] = self.runs(first, last);
        // SAFETY: both runs lie inside the live range
        unsafe {
            (
                slice::from_raw_parts(self.block.slot(a), a_len),
                slice::from_raw_parts(self.block.slot(b), b_len),
            )
        }
    }

    pub fn spans_mut(&mut self, first: usize, last: usize) -> (&mut [T], &mut [T]) {
        assert!(first <= last && last <= self.len, "span range out of bounds");
        // SAFETY: both runs lie inside the live range and never overlap
        unsafe {
            let (a, b) = self.raw_runs(first, last);
            (&mut *a, &mut *b)
        }
    }

    // ------------------------------------------------------------------
    // End operations
    // 两端操作
    // ------------------------------------------------------------------

    /// Write a new last element
    ///
    /// 写入新的末尾元素
    ///
    /// # Safety
    /// - `len < capacity`
    #[inline]
    pub unsafe fn push_back_unchecked(&mut self, value: T) -> &mut T {
        debug_assert!(self.len < self.capacity());
        unsafe {
            let slot = self.ptr_at(self.len);
            slot.write(value);
            self.len += 1;
            &mut *slot
        }
    }

    /// Write a new first element
    ///
    /// 写入新的首元素
    ///
    /// # Safety
    /// - `len < capacity`
    #[inline]
    pub unsafe fn push_front_unchecked(&mut self, value: T) -> &mut T {
        debug_assert!(self.len < self.capacity());
        let loc = self.begin.wrapping_sub(1) & self.mask();
        unsafe {
            let slot = self.block.slot(loc);
            slot.write(value);
            self.begin = loc;
            self.len += 1;
            &mut *slot
        }
    }

    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was live and is no longer counted
        Some(unsafe { self.ptr_at(self.len).read() })
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: the slot was live and is no longer counted once begin advances
        let value = unsafe { self.ptr_at(0).read() };
        self.begin = self.phys(1);
        self.len -= 1;
        Some(value)
    }

    /// Append `count` elements produced by `f`
    ///
    /// 在末尾追加 `count` 个由 `f` 生成的元素
    ///
    /// A panic in `f` leaves the elements produced so far in place.
    ///
    /// `f` panic 时，已生成的元素保留在原位。
    pub fn extend_back_with<F>(&mut self, count: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        assert!(count <= self.capacity() - self.len, "not enough room to extend");
        for _ in 0..count {
            let value = f();
            // SAFETY: room checked above
            unsafe { self.push_back_unchecked(value) };
        }
    }

    /// Drop elements from the back until `new_len` remain
    ///
    /// 从末尾 drop 元素，直到剩余 `new_len` 个
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let old_len = mem::replace(&mut self.len, new_len);
        // SAFETY: [new_len, old_len) was live and is no longer counted
        unsafe { self.drop_range(new_len, old_len) };
    }

    /// Drop elements from the front until `new_len` remain
    ///
    /// 从前端 drop 元素，直到剩余 `new_len` 个
    pub fn truncate_front(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let removed = self.len - new_len;
        // SAFETY: [0, removed) was live; runs are computed before begin moves
        unsafe {
            let (front, back) = self.raw_runs(0, removed);
            self.begin = self.phys(removed);
            self.len = new_len;
            drop_runs(front, back);
        }
    }

    pub fn clear(&mut self) {
        self.truncate(0);
        self.begin = 0;
    }

    /// Drop the logical range `[first, last)` without touching `len`
    ///
    /// # Safety
    /// - Every slot in the range holds a live value that is no longer counted
    unsafe fn drop_range(&mut self, first: usize, last: usize) {
        if !mem::needs_drop::<T>() {
            return;
        }
        unsafe {
            let (front, back) = self.raw_runs(first, last);
            drop_runs(front, back);
        }
    }

    // ------------------------------------------------------------------
    // Shifting
    // 移位
    // ------------------------------------------------------------------

    /// Move `count` contiguous slots from `src` to `dst` (physical, may overlap)
    ///
    /// 将 `count` 个连续槽位从 `src` 移动到 `dst`（物理索引，可重叠）
    ///
    /// # Safety
    /// - Both runs lie inside the block
    #[inline]
    unsafe fn move_run(&mut self, src: usize, dst: usize, count: usize) {
        if count == 0 || src == dst {
            return;
        }
        unsafe {
            let from = self.block.slot(src);
            let to = self.block.slot(dst);
            if RELOCATABLE {
                ptr::copy(from, to, count);
            } else if dst > src {
                for i in (0..count).rev() {
                    to.add(i).write(from.add(i).read());
                }
            } else {
                for i in 0..count {
                    to.add(i).write(from.add(i).read());
                }
            }
        }
    }

    /// Move `count` slots starting at physical `src` to physical `dst`, both wrapping
    ///
    /// 将从物理索引 `src` 开始的 `count` 个槽位移动到物理索引 `dst`，两者均可环绕
    ///
    /// The move is split into contiguous chunks, none of which crosses the end of
    /// the block on either side. `toward_back` means `dst` follows `src` in ring
    /// order; chunks are then processed from the back so no unread source slot is
    /// overwritten.
    ///
    /// 移动被拆分为若干连续块，任何一块在两侧都不跨越内存块末尾。
    /// `toward_back` 表示 `dst` 在环形顺序上位于 `src` 之后，此时从后向前处理各块。
    ///
    /// # Safety
    /// - `count` plus the shift distance must not exceed `capacity`
    unsafe fn wrap_move(&mut self, src: usize, dst: usize, count: usize, toward_back: bool) {
        let mask = self.mask();
        let capacity = self.capacity();
        unsafe {
            if toward_back {
                let mut remaining = count;
                while remaining > 0 {
                    let src_last = (src + remaining - 1) & mask;
                    let dst_last = (dst + remaining - 1) & mask;
                    let run = remaining.min(src_last + 1).min(dst_last + 1);
                    self.move_run(src_last + 1 - run, dst_last + 1 - run, run);
                    remaining -= run;
                }
            } else {
                let mut done = 0;
                while done < count {
                    let s = (src + done) & mask;
                    let d = (dst + done) & mask;
                    let run = (count - done).min(capacity - s).min(capacity - d);
                    self.move_run(s, d, run);
                    done += run;
                }
            }
        }
    }

    /// Open `count` uninitialized slots at logical `pos`
    ///
    /// 在逻辑位置 `pos` 处腾出 `count` 个未初始化槽位
    ///
    /// Whichever side of `pos` is shorter moves out of the way: the tail toward
    /// the back when `pos > len / 2` (or when appending), otherwise the head
    /// toward the front. `len` grows by `count` and the new slots are counted but
    /// uninitialized.
    ///
    /// `pos` 两侧较短的一侧让出空间：`pos > len / 2`（或在末尾追加）时尾部向后移动，
    /// 否则头部向前移动。`len` 增加 `count`，新槽位被计入但未初始化。
    ///
    /// # Safety
    /// - `pos <= len` and `len + count <= capacity`
    /// - The caller must initialize or close the gap before anything observes it
    unsafe fn open_gap(&mut self, pos: usize, count: usize) {
        debug_assert!(pos <= self.len && self.len + count <= self.capacity());
        if count == 0 {
            return;
        }
        unsafe {
            if pos > self.len / 2 || pos == self.len {
                let tail = self.len - pos;
                self.wrap_move(self.phys(pos), self.phys(pos + count), tail, true);
            } else {
                let new_begin = self.begin.wrapping_sub(count) & self.mask();
                self.wrap_move(self.begin, new_begin, pos, false);
                self.begin = new_begin;
            }
        }
        self.len += count;
    }

    /// Close `count` dead slots at logical `at`
    ///
    /// 关闭逻辑位置 `at` 处的 `count` 个无效槽位
    ///
    /// The shorter side moves over the gap. `len` shrinks by `count`.
    ///
    /// 较短的一侧移动以填补空隙。`len` 减少 `count`。
    ///
    /// # Safety
    /// - `[at, at + count)` holds no live values and lies inside `len`
    unsafe fn close_gap(&mut self, at: usize, count: usize) {
        debug_assert!(at + count <= self.len);
        if count == 0 {
            return;
        }
        let after = self.len - at - count;
        unsafe {
            if at < after {
                let new_begin = self.phys(count);
                self.wrap_move(self.begin, new_begin, at, true);
                self.begin = new_begin;
            } else {
                self.wrap_move(self.phys(at + count), self.phys(at), after, false);
            }
        }
        self.len -= count;
    }

    // ------------------------------------------------------------------
    // Insert / erase
    // 插入 / 删除
    // ------------------------------------------------------------------

    /// Insert `value` at logical `pos`
    ///
    /// 在逻辑位置 `pos` 插入 `value`
    pub fn insert(&mut self, pos: usize, value: T) -> &mut T {
        assert!(pos <= self.len, "insert position out of bounds");
        assert!(self.len < self.capacity(), "cannot insert in a full ring store");
        // SAFETY: room checked above; the gap is filled right away
        unsafe {
            self.open_gap(pos, 1);
            let slot = self.ptr_at(pos);
            slot.write(value);
            &mut *slot
        }
    }

    /// Insert the element produced by `f` at logical `pos`
    ///
    /// 在逻辑位置 `pos` 插入由 `f` 生成的元素
    ///
    /// With `RELOCATABLE`, the slot is opened first and `f` writes into it; a
    /// panic in `f` drops everything after `pos` and truncates to `pos`.
    /// Otherwise `f` runs before anything moves and a panic leaves the store
    /// untouched.
    ///
    /// 若 `RELOCATABLE`，先腾出槽位再由 `f` 写入；`f` panic 时 drop `pos` 之后的全部元素
    /// 并截断到 `pos`。否则 `f` 在任何移动之前执行，panic 时存储保持不变。
    pub fn insert_with<F>(&mut self, pos: usize, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        assert!(pos <= self.len, "insert position out of bounds");
        assert!(self.len < self.capacity(), "cannot insert in a full ring store");

        if !RELOCATABLE {
            let value = f();
            return self.insert(pos, value);
        }

        // SAFETY: room checked above; the guard keeps the store valid on unwind
        unsafe {
            self.open_gap(pos, 1);
            let guard = TruncateOnUnwind { store: self, pos };
            let value = f();
            let store = guard.disarm();
            let slot = store.ptr_at(pos);
            slot.write(value);
            &mut *slot
        }
    }

    /// Insert up to `count` items from `iter` at logical `pos`
    ///
    /// 在逻辑位置 `pos` 插入最多 `count` 个来自 `iter` 的元素
    ///
    /// The whole gap is opened once, then filled in order. If the iterator ends
    /// early or panics, the unfilled part of the gap is closed again, keeping the
    /// items already inserted. Returns the number of items inserted.
    ///
    /// 一次性腾出整个空隙后按顺序填充。若迭代器提前结束或 panic，未填充的部分会被重新关闭，
    /// 已插入的元素保留。返回插入的元素数量。
    pub fn insert_exact<I>(&mut self, pos: usize, count: usize, iter: &mut I) -> usize
    where
        I: Iterator<Item = T>,
    {
        assert!(pos <= self.len, "insert position out of bounds");
        assert!(count <= self.capacity() - self.len, "not enough room to insert");

        // SAFETY: room checked above; the guard closes whatever stays unfilled
        unsafe {
            self.open_gap(pos, count);
            let mut gap = GapFill {
                store: self,
                pos,
                count,
                filled: 0,
            };
            while gap.filled < count {
                let Some(value) = iter.next() else { break };
                gap.store.ptr_at(pos + gap.filled).write(value);
                gap.filled += 1;
            }
            gap.filled
        }
    }

    /// Remove and return the element at logical `pos`
    ///
    /// 移除并返回逻辑位置 `pos` 处的元素
    pub fn remove(&mut self, pos: usize) -> T {
        assert!(pos < self.len, "remove position out of bounds");
        // SAFETY: the value is moved out before its slot is closed
        unsafe {
            let value = self.ptr_at(pos).read();
            self.close_gap(pos, 1);
            value
        }
    }

    /// Drop the logical range `[first, last)` and close the gap
    ///
    /// drop 逻辑区间 `[first, last)` 并关闭空隙
    pub fn erase_range(&mut self, first: usize, last: usize) {
        assert!(first <= last && last <= self.len, "erase range out of bounds");
        if first == last {
            return;
        }
        // SAFETY: the guard closes the gap even if a destructor panics
        unsafe {
            let (front, back) = self.raw_runs(first, last);
            let _close = CloseOnDrop {
                store: self,
                at: first,
                count: last - first,
            };
            if mem::needs_drop::<T>() {
                drop_runs(front, back);
            }
        }
    }

    // ------------------------------------------------------------------
    // Relocation / cloning
    // 重定位 / 克隆
    // ------------------------------------------------------------------

    /// Move every live element into the empty store `dst`, in logical order
    ///
    /// 将所有有效元素按逻辑顺序移动到空存储 `dst`
    ///
    /// `dst` receives the elements starting at physical slot 0. `self` is left
    /// empty with its block still allocated.
    ///
    /// `dst` 从物理槽位 0 开始接收元素。`self` 变为空，但内存块仍保持分配。
    pub fn relocate_into(&mut self, dst: &mut Self) {
        assert!(dst.is_empty(), "relocation target must be empty");
        assert!(dst.capacity() >= self.len, "relocation target too small");

        let [(a, a_len), (b, b_len)] = self.runs(0, self.len);
        // SAFETY: distinct allocations; both runs are live in self and fit in dst
        unsafe {
            let out = dst.block.slot(0);
            if RELOCATABLE {
                ptr::copy_nonoverlapping(self.block.slot(a), out, a_len);
                ptr::copy_nonoverlapping(self.block.slot(b), out.add(a_len), b_len);
            } else {
                for i in 0..a_len {
                    out.add(i).write(self.block.slot(a + i).read());
                }
                for i in 0..b_len {
                    out.add(a_len + i).write(self.block.slot(b + i).read());
                }
            }
        }

        trace!(
            from_capacity = self.capacity(),
            to_capacity = dst.capacity(),
            len = self.len,
            "relocated ring store"
        );

        dst.begin = 0;
        dst.len = self.len;
        self.begin = 0;
        self.len = 0;
    }

    /// Clone every live element into a new store of the given capacity
    ///
    /// 将所有有效元素克隆到指定容量的新存储中
    ///
    /// A panicking `clone` drops the partial copy and leaves `self` untouched.
    ///
    /// `clone` panic 时会 drop 部分副本，`self` 保持不变。
    pub fn try_clone_with_capacity(&self, capacity: usize) -> Result<Self, CircularVecError>
    where
        T: Clone,
    {
        debug_assert!(capacity >= self.len);
        let mut out = Self::try_new(capacity)?;
        let (a, b) = self.spans(0, self.len);
        for value in a.iter().chain(b) {
            // SAFETY: capacity >= len
            unsafe { out.push_back_unchecked(value.clone()) };
        }
        Ok(out)
    }
}

impl<T: Clone, const RELOCATABLE: bool> DeepClone for RingStore<T, RELOCATABLE> {
    #[inline]
    fn try_deep_clone(&self) -> Result<Self, CircularVecError> {
        self.try_clone_with_capacity(self.capacity())
    }
}

impl<T, const RELOCATABLE: bool> Drop for RingStore<T, RELOCATABLE> {
    fn drop(&mut self) {
        let len = mem::replace(&mut self.len, 0);
        // SAFETY: [0, len) was live and is no longer counted
        unsafe { self.drop_range(0, len) };
    }
}

/// Drop two raw runs, still dropping the second if the first panics
///
/// # Safety
/// - Both runs hold live values that nothing else will drop
unsafe fn drop_runs<T>(front: *mut [T], back: *mut [T]) {
    struct Dropper<T>(*mut [T]);

    impl<T> Drop for Dropper<T> {
        fn drop(&mut self) {
            unsafe { ptr::drop_in_place(self.0) }
        }
    }

    let _back = Dropper(back);
    unsafe { ptr::drop_in_place(front) };
}

/// Keeps a store valid if an in-place insert unwinds
///
/// Slot `pos` is an open gap; on drop everything after it is dropped and the
/// length is cut to `pos`.
struct TruncateOnUnwind<'a, T, const RELOCATABLE: bool> {
    store: &'a mut RingStore<T, RELOCATABLE>,
    pos: usize,
}

impl<'a, T, const RELOCATABLE: bool> TruncateOnUnwind<'a, T, RELOCATABLE> {
    fn disarm(self) -> &'a mut RingStore<T, RELOCATABLE> {
        let this = mem::ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the reference is moved out exactly once
        unsafe { ptr::read(&this.store) }
    }
}

impl<T, const RELOCATABLE: bool> Drop for TruncateOnUnwind<'_, T, RELOCATABLE> {
    fn drop(&mut self) {
        let len = mem::replace(&mut self.store.len, self.pos);
        // SAFETY: (pos, len) was live; slot pos is the uninitialized gap
        unsafe { self.store.drop_range(self.pos + 1, len) };
    }
}

/// Closes the unfilled part of an opened gap
struct GapFill<'a, T, const RELOCATABLE: bool> {
    store: &'a mut RingStore<T, RELOCATABLE>,
    pos: usize,
    count: usize,
    filled: usize,
}

impl<T, const RELOCATABLE: bool> Drop for GapFill<'_, T, RELOCATABLE> {
    fn drop(&mut self) {
        // SAFETY: [pos + filled, pos + count) was opened and never written
        unsafe {
            self.store
                .close_gap(self.pos + self.filled, self.count - self.filled)
        };
    }
}

/// Closes a gap whose values have been (or are being) dropped
struct CloseOnDrop<'a, T, const RELOCATABLE: bool> {
    store: &'a mut RingStore<T, RELOCATABLE>,
    at: usize,
    count: usize,
}

impl<T, const RELOCATABLE: bool> Drop for CloseOnDrop<'_, T, RELOCATABLE> {
    fn drop(&mut self) {
        // SAFETY: the caller dropped every value in the gap
        unsafe { self.store.close_gap(self.at, self.count) };
    }
}

// Ensure RingStore is Send and Sync if T is
unsafe impl<T: Send, const RELOCATABLE: bool> Send for RingStore<T, RELOCATABLE> {}
unsafe impl<T: Sync, const RELOCATABLE: bool> Sync for RingStore<T, RELOCATABLE> {}

/// Round a size up to the capacity that holds it
///
/// 将大小向上取整为可容纳它的容量
///
/// # Returns
/// The smallest power of 2 that is >= `size`, 0 for 0, or `None` on overflow
///
/// # 返回值
/// >= `size` 的最小 2 的幂次；`size` 为 0 时返回 0；溢出时返回 `None`
#[inline]
pub fn capacity_for_size(size: usize) -> Option<usize> {
    if size == 0 {
        Some(0)
    } else {
        size.checked_next_power_of_two()
    }
}
