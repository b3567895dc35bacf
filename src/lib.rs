//! # Growable Circular Vector
//!
//! 可增长的环形向量
//!
//! `cowring` provides [`CircularVec`], a deque-like container stored in a single
//! power-of-two ring of slots. Elements can be pushed and popped at both ends in
//! amortized O(1), and inserted or erased anywhere by moving only the shorter
//! side of the position.
//!
//! `cowring` 提供 [`CircularVec`]，一种存储在单个 2 的幂次环形槽位中的类双端队列容器。
//! 两端的推入和弹出均摊 O(1)，任意位置的插入或删除只移动位置两侧中较短的一侧。
//!
//! ## Features
//!
//! 特性
//!
//! - **Contiguous storage** - One allocation, at most two contiguous runs per range
//! - **Copy-on-write** - [`Shared`] vectors clone in O(1) and copy on first write
//! - **Exclusive mode** - [`Exclusive`] vectors deep-copy eagerly and never share
//! - **Relocation modes** - Bulk moves by default, per-element moves on request
//! - **Panic safe** - A panicking `Clone`, closure or iterator leaves a valid vector
//!
//! - **连续存储** - 单次分配，每个区间至多两段连续内存
//! - **写时复制** - [`Shared`] 向量 O(1) 克隆，首次写入时复制
//! - **独占模式** - [`Exclusive`] 向量立即深拷贝，从不共享
//! - **重定位模式** - 默认整体移动，可选逐元素移动
//! - **panic 安全** - `Clone`、闭包或迭代器 panic 后向量仍然有效
//!
//! ## Quick Start
//!
//! 快速开始
//!
//! ```rust
//! use cowring::CircularVec;
//!
//! let mut v: CircularVec<i32> = CircularVec::new();
//! v.push_back(1);
//! v.push_back(2);
//! v.push_front(0);
//! assert_eq!(v, [0, 1, 2]);
//!
//! // Insert and erase anywhere
//! // 在任意位置插入和删除
//! v.insert(1, 99);
//! assert_eq!(v, [0, 99, 1, 2]);
//! v.erase(0);
//! assert_eq!(v, [99, 1, 2]);
//!
//! assert_eq!(v.pop_back(), Some(2));
//! assert_eq!(v.pop_front(), Some(99));
//! ```
//!
//! ## Copy-on-write
//!
//! 写时复制
//!
//! ```rust
//! use cowring::{circular_vec, ExclusiveCircularVec};
//!
//! let a = circular_vec![1, 2, 3];
//! let mut b = a.clone();
//! assert!(a.shares_storage_with(&b));
//!
//! // The first write gives `b` its own copy
//! // 第一次写入时 `b` 获得自己的副本
//! b[0] = 10;
//! assert_eq!(a, [1, 2, 3]);
//! assert_eq!(b, [10, 2, 3]);
//!
//! // Exclusive vectors copy right away
//! // 独占向量会立即复制
//! let c: ExclusiveCircularVec<i32> = a.to_sequence();
//! let d = c.clone();
//! assert!(!c.shares_storage_with(&d));
//! ```
//!
//! ## Span Views
//!
//! 区间视图
//!
//! ```rust
//! use cowring::CircularVec;
//!
//! let mut v: CircularVec<u32> = CircularVec::with_capacity(8);
//! v.extend(0..6);
//! v.truncate_front(3);
//! v.extend(6..10);
//!
//! // Any range is at most two slices
//! // 任意区间至多为两个切片
//! let spans = v.spans(1..6);
//! assert_eq!(spans.len(), 5);
//! let mut out = [0u32; 5];
//! spans.copy_to_slice(&mut out);
//! assert_eq!(out, [4, 5, 6, 7, 8]);
//! ```
//!
//! ## Cargo Features
//!
//! Cargo 特性
//!
//! - `serde` - `Serialize` / `Deserialize` as a sequence in logical order
//! - `tracing` - Debug and trace events for reallocation and copy-on-write
//! - `loom` - Model-check the shared reference count with loom
//!
//! - `serde` - 以逻辑顺序的序列实现 `Serialize` / `Deserialize`
//! - `tracing` - 重分配和写时复制的 debug 与 trace 事件
//! - `loom` - 使用 loom 对共享引用计数进行模型检查

mod shim;
mod raw;
mod core;
mod convert;
#[cfg(feature = "serde")]
mod serde_impl;

pub mod error;
pub mod span;
pub mod ownership;
pub mod iter;
pub mod circular;

pub use crate::circular::{CircularVec, ExclusiveCircularVec, SharedCircularVec};
pub use crate::core::capacity_for_size;
pub use crate::error::CircularVecError;
pub use crate::iter::{Cursor, IntoIter, Iter, IterMut};
pub use crate::ownership::{Exclusive, Ownership, Shared};
pub use crate::span::{Spans, SpansMut};

#[cfg(all(test, not(feature = "loom")))]
mod tests;
