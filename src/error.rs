//! Error types for circular vector operations
//!
//! 环形向量操作的错误类型

use std::alloc::Layout;

/// Circular vector operation error
///
/// 环形向量操作错误
///
/// Element-level failures (a panicking `Clone`, closure or iterator) are not part
/// of this enum: they unwind through the container unchanged, leaving it in a
/// valid state.
///
/// 元素级失败（panic 的 `Clone`、闭包或迭代器）不属于此枚举：
/// 它们会原样展开穿过容器，并使容器保持有效状态。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CircularVecError {
    /// The allocator could not provide storage for `capacity` elements
    ///
    /// 分配器无法为 `capacity` 个元素提供存储
    #[error("failed to allocate {} bytes for {capacity} elements", .layout.size())]
    AllocationFailed {
        /// Requested element capacity
        capacity: usize,
        /// Layout handed to the allocator
        layout: Layout,
    },

    /// The requested capacity cannot be represented
    ///
    /// 请求的容量无法表示
    #[error("capacity overflow")]
    CapacityOverflow,

    /// Checked access outside `0..len`
    ///
    /// 越界的检查访问
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Requested logical index
        index: usize,
        /// Length at the time of the access
        len: usize,
    },
}

impl CircularVecError {
    /// Escalate an allocation error the way `Vec` does for infallible entry points.
    ///
    /// 按 `Vec` 的方式处理不可失败入口点上的分配错误。
    #[cold]
    #[track_caller]
    pub(crate) fn escalate(self) -> ! {
        match self {
            CircularVecError::AllocationFailed { layout, .. } => std::alloc::handle_alloc_error(layout),
            other => panic!("{other}"),
        }
    }
}

/// Unwrap an allocation result, escalating failures.
#[inline]
#[track_caller]
pub(crate) fn infallible<T>(result: Result<T, CircularVecError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => err.escalate(),
    }
}
