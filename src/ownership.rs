//! Ownership wrappers for the backing store
//!
//! 底层存储的所有权包装
//!
//! A circular vector owns exactly one handle to its store. Two disciplines are
//! available, selected at compile time by the `O` type parameter:
//!
//! - [`Shared`]: copies share the store through an atomic reference count and a
//!   handle clones the store before its first mutation (copy-on-write)
//! - [`Exclusive`]: every copy deep-clones the store right away, so a handle is
//!   always private
//!
//! 环形向量恰好拥有一个指向其存储的句柄。两种所有权方式由类型参数 `O` 在编译期选择：
//!
//! - [`Shared`]：副本通过原子引用计数共享存储，句柄在第一次修改前克隆存储（写时复制）
//! - [`Exclusive`]：每次复制都会立即深拷贝存储，因此句柄始终是私有的
//!
//! # Thread safety
//!
//! Reference count updates are atomic: distinct handles that point at the same
//! store may be cloned, read and dropped from different threads concurrently.
//! Mutating one handle requires `&mut` access to it, so the "check count, clone,
//! publish" sequence of a detach never races with itself.
//!
//! # 线程安全
//!
//! 引用计数的更新是原子的：指向同一存储的不同句柄可以在不同线程中并发地克隆、读取和 drop。
//! 修改某个句柄需要对它的 `&mut` 访问，因此分离时的"检查计数、克隆、发布"序列不会与自身竞争。

use crate::error::CircularVecError;
use crate::shim::atomic::{self, AtomicUsize, Ordering};
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ptr::{self, NonNull};

mod sealed {
    pub trait Sealed {}
}

/// Ownership discipline of a circular vector
///
/// 环形向量的所有权方式
///
/// This trait is sealed: [`Shared`] and [`Exclusive`] are the only implementors.
///
/// 此 trait 是密封的：仅 [`Shared`] 和 [`Exclusive`] 实现了它。
pub trait Ownership: sealed::Sealed + 'static {
    /// Handle type wrapping a store of type `S`
    ///
    /// 包装类型为 `S` 的存储的句柄类型
    type Handle<S>: StoreHandle<S>;

    /// Whether copies of a container share one store
    const SHARES_STORAGE: bool;
}

/// Copy-on-write shared ownership
///
/// 写时复制的共享所有权
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Shared;

/// Exclusive ownership with eager deep copies
///
/// 立即深拷贝的独占所有权
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Exclusive;

impl sealed::Sealed for Shared {}
impl sealed::Sealed for Exclusive {}

impl Ownership for Shared {
    type Handle<S> = SharedPtr<S>;
    const SHARES_STORAGE: bool = true;
}

impl Ownership for Exclusive {
    type Handle<S> = ExclusivePtr<S>;
    const SHARES_STORAGE: bool = false;
}

/// A store that can be copied element by element
///
/// 可逐元素复制的存储
pub trait DeepClone: Sized {
    /// Clone the store, surfacing allocation failures
    ///
    /// 克隆存储，并报告分配失败
    fn try_deep_clone(&self) -> Result<Self, CircularVecError>;
}

/// Common contract of the ownership handles
///
/// 所有权句柄的公共约定
///
/// `get` never mutates anything. Write access goes through
/// [`get_mut_unchecked`](StoreHandle::get_mut_unchecked) once the caller has
/// established that the handle is private, either by observing
/// [`is_unique`](StoreHandle::is_unique) or by replacing the handle with a fresh one.
///
/// `get` 从不修改任何内容。写访问在调用者确认句柄私有之后通过
/// [`get_mut_unchecked`](StoreHandle::get_mut_unchecked) 进行。
pub trait StoreHandle<S>: Sized {
    /// Wrap a freshly built store
    fn new(store: S) -> Self;

    /// Read access to the store
    fn get(&self) -> &S;

    /// Whether no other handle observes the store
    ///
    /// 是否没有其他句柄观察该存储
    fn is_unique(&self) -> bool;

    /// Write access to the store
    ///
    /// # Safety
    /// - [`is_unique`](StoreHandle::is_unique) must hold
    unsafe fn get_mut_unchecked(&mut self) -> &mut S;

    /// Write access if the handle is private
    ///
    /// 若句柄私有则返回写访问
    #[inline]
    fn get_mut(&mut self) -> Option<&mut S> {
        if self.is_unique() {
            // SAFETY: uniqueness checked above
            Some(unsafe { self.get_mut_unchecked() })
        } else {
            None
        }
    }

    /// Handle for a copy of the owning container
    ///
    /// 为所属容器的副本生成句柄
    fn duplicate(&self) -> Result<Self, CircularVecError>
    where
        S: DeepClone;

    /// Take the store out if the handle is private
    ///
    /// 若句柄私有则取出存储
    fn try_unwrap(self) -> Result<S, Self>;

    /// Whether both handles point at the same store
    fn ptr_eq(&self, other: &Self) -> bool;

    /// Number of handles observing the store
    fn ref_count(&self) -> usize;
}

// ============================================================================
// Shared
// ============================================================================

/// Refcount ceiling, past which the process aborts rather than wrap
const MAX_REFCOUNT: usize = isize::MAX as usize;

struct SharedInner<S> {
    /// Number of live handles
    ///
    /// 有效句柄数量
    refs: AtomicUsize,
    store: S,
}

/// Reference-counted copy-on-write handle
///
/// 引用计数的写时复制句柄
pub struct SharedPtr<S> {
    inner: NonNull<SharedInner<S>>,
    _marker: PhantomData<SharedInner<S>>,
}

impl<S> SharedPtr<S> {
    #[inline]
    fn inner(&self) -> &SharedInner<S> {
        // SAFETY: the allocation lives as long as any handle
        unsafe { self.inner.as_ref() }
    }
}

impl<S> StoreHandle<S> for SharedPtr<S> {
    fn new(store: S) -> Self {
        let boxed = Box::new(SharedInner {
            refs: AtomicUsize::new(1),
            store,
        });
        Self {
            inner: NonNull::from(Box::leak(boxed)),
            _marker: PhantomData,
        }
    }

    #[inline]
    fn get(&self) -> &S {
        &self.inner().store
    }

    #[inline]
    fn is_unique(&self) -> bool {
        // Acquire pairs with the Release decrement of handles dropped elsewhere,
        // so their reads of the store happen before our writes.
        self.inner().refs.load(Ordering::Acquire) == 1
    }

    #[inline]
    unsafe fn get_mut_unchecked(&mut self) -> &mut S {
        unsafe { &mut (*self.inner.as_ptr()).store }
    }

    fn duplicate(&self) -> Result<Self, CircularVecError>
    where
        S: DeepClone,
    {
        let old = self.inner().refs.fetch_add(1, Ordering::Relaxed);
        if old > MAX_REFCOUNT {
            std::process::abort();
        }
        Ok(Self {
            inner: self.inner,
            _marker: PhantomData,
        })
    }

    fn try_unwrap(self) -> Result<S, Self> {
        if self
            .inner()
            .refs
            .compare_exchange(1, 0, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(self);
        }
        let this = ManuallyDrop::new(self);
        // SAFETY: the count dropped to zero, this was the last handle
        let boxed = unsafe { Box::from_raw(this.inner.as_ptr()) };
        let SharedInner { store, .. } = *boxed;
        Ok(store)
    }

    #[inline]
    fn ptr_eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }

    #[inline]
    fn ref_count(&self) -> usize {
        self.inner().refs.load(Ordering::Acquire)
    }
}

impl<S> Drop for SharedPtr<S> {
    fn drop(&mut self) {
        if self.inner().refs.fetch_sub(1, Ordering::Release) != 1 {
            return;
        }
        atomic::fence(Ordering::Acquire);
        // SAFETY: this was the last handle
        unsafe { drop(Box::from_raw(self.inner.as_ptr())) };
    }
}

unsafe impl<S: Send + Sync> Send for SharedPtr<S> {}
unsafe impl<S: Send + Sync> Sync for SharedPtr<S> {}

// ============================================================================
// Exclusive
// ============================================================================

/// Uniquely owned handle
///
/// 唯一所有的句柄
pub struct ExclusivePtr<S>(Box<S>);

impl<S> StoreHandle<S> for ExclusivePtr<S> {
    #[inline]
    fn new(store: S) -> Self {
        Self(Box::new(store))
    }

    #[inline]
    fn get(&self) -> &S {
        &self.0
    }

    #[inline]
    fn is_unique(&self) -> bool {
        true
    }

    #[inline]
    unsafe fn get_mut_unchecked(&mut self) -> &mut S {
        &mut self.0
    }

    fn duplicate(&self) -> Result<Self, CircularVecError>
    where
        S: DeepClone,
    {
        Ok(Self(Box::new(self.0.try_deep_clone()?)))
    }

    #[inline]
    fn try_unwrap(self) -> Result<S, Self> {
        Ok(*self.0)
    }

    #[inline]
    fn ptr_eq(&self, other: &Self) -> bool {
        ptr::eq(&*self.0, &*other.0)
    }

    #[inline]
    fn ref_count(&self) -> usize {
        1
    }
}
