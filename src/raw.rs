//! Raw fixed-capacity block of uninitialized slots
//!
//! 未初始化槽位的原始定长内存块
//!
//! `RawBlock` owns an allocation large enough for `capacity` values of `T` and
//! nothing else: it never constructs, reads or drops elements. The owner tracks
//! which slots are live.
//!
//! `RawBlock` 只拥有一块可容纳 `capacity` 个 `T` 的内存：它从不构造、读取或
//! 释放元素，由所有者负责跟踪哪些槽位是有效的。

use crate::error::CircularVecError;
use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::NonNull;

pub(crate) struct RawBlock<T> {
    /// Start of the allocation (dangling when nothing is allocated)
    ///
    /// 分配的起始地址（未分配时为悬垂指针）
    ptr: NonNull<T>,

    /// Number of slots
    ///
    /// 槽位数量
    capacity: usize,

    _marker: PhantomData<T>,
}

impl<T> RawBlock<T> {
    /// Create a block with no storage
    ///
    /// 创建一个没有存储的内存块
    #[inline]
    pub const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocate a block with the specified number of slots
    ///
    /// 分配指定槽位数量的内存块
    ///
    /// Capacity 0 allocates nothing. Zero-sized types never touch the allocator.
    ///
    /// 容量为 0 时不分配。零大小类型从不调用分配器。
    ///
    /// # Errors
    /// - `CapacityOverflow` if `capacity * size_of::<T>()` exceeds `isize::MAX`
    /// - `AllocationFailed` if the allocator returns null
    pub fn try_with_capacity(capacity: usize) -> Result<Self, CircularVecError> {
        if capacity == 0 {
            return Ok(Self::empty());
        }

        let layout = Layout::array::<T>(capacity).map_err(|_| CircularVecError::CapacityOverflow)?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            });
        }

        // SAFETY: layout has a non-zero size
        // 安全性：layout 的大小非零
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>())
            .ok_or(CircularVecError::AllocationFailed { capacity, layout })?;

        Ok(Self {
            ptr,
            capacity,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get a pointer to the slot at the specified index
    ///
    /// 获取指定索引处槽位的指针
    ///
    /// # Safety
    /// - `index` must be ≤ capacity
    ///
    /// # 安全性
    /// - `index` 必须 ≤ capacity
    #[inline(always)]
    pub unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.capacity);
        unsafe { self.ptr.as_ptr().add(index) }
    }
}

impl<T> Drop for RawBlock<T> {
    fn drop(&mut self) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(layout) = Layout::array::<T>(self.capacity) {
            if layout.size() != 0 {
                // SAFETY: allocated in try_with_capacity with this exact layout
                // 安全性：由 try_with_capacity 以相同 layout 分配
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
            }
        }
    }
}

// Note: RawBlock never drops elements. The ring store above it is responsible
// for dropping every live slot before the block is released.
//
// 注意：RawBlock 从不释放元素。上层环形存储负责在释放内存块之前 drop 所有有效槽位。

unsafe impl<T: Send> Send for RawBlock<T> {}
unsafe impl<T: Sync> Sync for RawBlock<T> {}
