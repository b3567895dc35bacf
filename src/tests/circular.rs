//! Comprehensive tests for the circular vector
//!
//! 环形向量的全面测试

use crate::{CircularVec, CircularVecError, Exclusive, ExclusiveCircularVec, SharedCircularVec};
use std::collections::VecDeque;
use std::rc::Rc;
use std::thread;

/// Vector of capacity `cap` holding `values` with logical 0 at physical `begin`
fn wrapped<const R: bool>(cap: usize, begin: usize, values: &[i32]) -> CircularVec<i32, Exclusive, R> {
    let mut v = CircularVec::with_capacity(cap);
    for _ in 0..begin {
        v.push_back(0);
        v.pop_front();
    }
    v.extend(values.iter().copied());
    assert_eq!(v.capacity(), cap);
    v
}

fn contents<O: crate::Ownership, const R: bool>(v: &CircularVec<i32, O, R>) -> Vec<i32> {
    v.iter().copied().collect()
}

// ============================================================================
// SEGMENT 1: Reference Scenarios
// 第1段：参考场景
// ============================================================================

#[test]
fn test_push_back_growth_then_push_front() {
    // Capacity doubles 0 -> 1 -> 2 -> 4 -> 8, the ninth element forces 16
    // 容量按 0 -> 1 -> 2 -> 4 -> 8 翻倍，第九个元素迫使扩容到 16
    let mut v: SharedCircularVec<i32> = SharedCircularVec::new();
    assert_eq!(v.capacity(), 0);

    let mut seen = Vec::new();
    for i in 1..=8 {
        v.push_back(i);
        seen.push(v.capacity());
    }
    assert_eq!(seen, vec![1, 2, 4, 4, 8, 8, 8, 8]);

    v.push_front(0);
    assert_eq!(v, [0, 1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(v.len(), 9);
    assert_eq!(v.capacity(), 16);
}

#[test]
fn test_erase_middle_keeps_storage() {
    let mut v: SharedCircularVec<i32> = crate::circular_vec![1, 2, 3, 4, 5];
    let capacity = v.capacity();
    let start = v.as_slices().0.as_ptr();

    v.erase(2);
    assert_eq!(v, [1, 2, 4, 5]);
    assert_eq!(v.len(), 4);
    assert_eq!(v.capacity(), capacity);
    assert_eq!(v.as_slices().0.as_ptr(), start);
}

#[test]
fn test_insert_at_every_begin_position() {
    // Alternate push_front/pop_back to walk the start around the ring
    // 交替执行 push_front/pop_back，使起点绕环移动
    for rounds in [0, 3, 6, 9] {
        let mut v: SharedCircularVec<i32> = SharedCircularVec::with_capacity(4);
        v.extend([1, 2, 3]);
        for _ in 0..rounds {
            let last = *v.back().unwrap();
            v.push_front(last);
            v.pop_back();
        }
        assert_eq!(v, [1, 2, 3]);

        v.insert(1, 99);
        assert_eq!(v, [1, 99, 2, 3], "rounds={rounds}");
        assert_eq!(v.capacity(), 4);
    }
}

// ============================================================================
// SEGMENT 2: Copy-on-write Isolation
// 第2段：写时复制隔离
// ============================================================================

#[test]
fn test_clone_shares_until_write() {
    let a: SharedCircularVec<i32> = crate::circular_vec![1, 2, 3, 4, 5];
    let mut b = a.clone();
    assert!(a.is_shared());
    assert!(b.shares_storage_with(&a));

    b.push_back(6);
    assert!(!b.shares_storage_with(&a));
    assert!(!a.is_shared());
    assert_eq!(a, [1, 2, 3, 4, 5]);
    assert_eq!(b, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_every_mutation_detaches() {
    type Op = fn(&mut SharedCircularVec<i32>);
    let ops: &[(&str, Op)] = &[
        ("push_front", |v| v.push_front(0)),
        ("pop_back", |v| {
            v.pop_back();
        }),
        ("pop_front", |v| {
            v.pop_front();
        }),
        ("insert", |v| {
            v.insert(2, 7);
        }),
        ("erase", |v| v.erase(1)),
        ("erase_range", |v| v.erase_range(1..3)),
        ("remove", |v| {
            v.remove(0);
        }),
        ("truncate", |v| v.truncate(2)),
        ("truncate_front", |v| v.truncate_front(2)),
        ("resize", |v| v.resize(9, 1)),
        ("resize_front", |v| v.resize_front(9, 1)),
        ("clear", |v| v.clear()),
        ("get_mut", |v| *v.get_mut(0).unwrap() = 42),
        ("index_mut", |v| v[4] = 42),
        ("iter_mut", |v| v.iter_mut().for_each(|x| *x *= 2)),
        ("swap", |v| v.swap(0, 4)),
        ("rotate_left", |v| v.rotate_left(2)),
        ("spans_mut", |v| v.spans_mut(..).fill(0)),
        ("reserve", |v| v.reserve(100)),
        ("assign_n", |v| v.assign_n(2, 8)),
        ("append", |v| {
            let other = v.clone();
            v.append(&other);
        }),
    ];

    for &(name, op) in ops {
        let a: SharedCircularVec<i32> = crate::circular_vec![1, 2, 3, 4, 5];
        let mut b = a.clone();
        op(&mut b);
        assert_eq!(a, [1, 2, 3, 4, 5], "{name} leaked into the original");
        assert!(!b.shares_storage_with(&a), "{name} kept sharing");
    }
}

#[test]
fn test_write_through_original_leaves_copy() {
    let mut a: SharedCircularVec<String> = ["x", "y"].iter().map(|s| s.to_string()).collect();
    let b = a.clone();
    a[0].push('!');
    assert_eq!(a, ["x!".to_string(), "y".to_string()]);
    assert_eq!(b, ["x".to_string(), "y".to_string()]);
}

#[test]
fn test_exclusive_clone_never_shares() {
    let a = ExclusiveCircularVec::from([1, 2, 3]);
    let b = a.clone();
    assert!(!a.shares_storage_with(&b));
    assert!(!a.is_shared());
    assert_eq!(a, b);
}

#[test]
fn test_share_count_tracks_copies() {
    let a: SharedCircularVec<i32> = SharedCircularVec::new();
    assert_eq!(a.share_count(), 0);

    let a: SharedCircularVec<i32> = crate::circular_vec![1, 2, 3];
    let b = a.clone();
    let c = b.clone();
    assert_eq!(a.share_count(), 3);
    assert!(c.is_shared());
    drop(b);
    assert_eq!(c.share_count(), 2);
    drop(c);
    assert_eq!(a.share_count(), 1);
    assert!(!a.is_shared());

    // Exclusive copies each own one store
    // 独占副本各自拥有一个存储
    let e = ExclusiveCircularVec::from([1, 2, 3]);
    let f = e.clone();
    assert_eq!(e.share_count(), 1);
    assert_eq!(f.share_count(), 1);
    assert!(!f.is_shared());
}

#[test]
fn test_as_mut_slices_detaches_and_wraps() {
    let mut empty: SharedCircularVec<i32> = SharedCircularVec::new();
    assert_eq!(empty.as_mut_slices(), (&mut [][..], &mut [][..]));

    let mut v = wrapped::<true>(4, 3, &[1, 2, 3]);
    let (a, b) = v.as_mut_slices();
    assert_eq!((&*a, &*b), (&[1][..], &[2, 3][..]));
    a[0] = 10;
    b[1] = 30;
    assert_eq!(v, [10, 2, 30]);

    let shared: SharedCircularVec<i32> = crate::circular_vec![1, 2];
    let mut copy = shared.clone();
    copy.as_mut_slices().0[0] = 5;
    assert_eq!(shared, [1, 2]);
    assert_eq!(copy, [5, 2]);
}

#[test]
fn test_read_only_views_do_not_detach() {
    let a: SharedCircularVec<i32> = crate::circular_vec![1, 2, 3];
    let b = a.clone();
    let _ = b.iter().count();
    let _ = b.spans(..).len();
    let _ = b.mid(0, None);
    assert!(b.shares_storage_with(&a));
}

#[test]
fn test_shared_into_iter_clones() {
    let a: SharedCircularVec<Rc<i32>> = (0..4).map(Rc::new).collect();
    let b = a.clone();
    let moved: Vec<Rc<i32>> = b.into_iter().collect();
    assert_eq!(moved.len(), 4);
    // The shared store was cloned, so each value now has two owners
    assert_eq!(Rc::strong_count(&a[0]), 2);
    drop(moved);
    assert_eq!(Rc::strong_count(&a[0]), 1);

    // A private store is moved out without cloning
    let c: SharedCircularVec<Rc<i32>> = (0..4).map(Rc::new).collect();
    let moved: Vec<Rc<i32>> = c.into_iter().collect();
    assert_eq!(Rc::strong_count(&moved[0]), 1);
}

#[test]
fn test_clones_across_threads() {
    let base: SharedCircularVec<u64> = (0..64).collect();
    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let mut copy = base.clone();
            thread::spawn(move || {
                let sum: u64 = copy.iter().sum();
                copy.push_back(t);
                copy[0] = t;
                (sum, copy.len(), copy[0])
            })
        })
        .collect();

    for (t, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), ((0..64u64).sum::<u64>(), 65, t as u64));
    }
    assert_eq!(base.len(), 64);
    assert_eq!(base[0], 0);
    assert!(!base.is_shared());
}

// ============================================================================
// SEGMENT 3: Capacity Management
// 第3段：容量管理
// ============================================================================

#[test]
fn test_reserve_rounds_and_never_shrinks() {
    let mut v: SharedCircularVec<i32> = crate::circular_vec![1, 2];
    v.reserve(5);
    assert_eq!(v.capacity(), 8);
    v.reserve(3);
    assert_eq!(v.capacity(), 8);
    assert_eq!(v, [1, 2]);
}

#[test]
fn test_shrink_to_fit_idempotent() {
    let mut v: ExclusiveCircularVec<i32> = ExclusiveCircularVec::with_capacity(64);
    v.extend(0..5);
    v.truncate_front(4);
    v.push_front(-1);

    v.shrink_to_fit();
    assert_eq!(v.capacity(), 8);
    assert_eq!(v, [-1, 1, 2, 3, 4]);
    let start = v.as_slices().0.as_ptr();

    v.shrink_to_fit();
    assert_eq!(v.capacity(), 8);
    assert_eq!(v.as_slices().0.as_ptr(), start);
    assert_eq!(v, [-1, 1, 2, 3, 4]);

    v.clear();
    v.shrink_to_fit();
    assert_eq!(v.capacity(), 0);
}

#[test]
fn test_clear_keeps_private_capacity() {
    let mut v: SharedCircularVec<i32> = (0..10).collect();
    assert_eq!(v.capacity(), 16);
    v.clear();
    assert!(v.is_empty());
    assert_eq!(v.capacity(), 16);

    v.extend(0..3);
    let copy = v.clone();
    v.clear();
    assert_eq!(v.capacity(), 0);
    assert_eq!(copy, [0, 1, 2]);
}

#[test]
fn test_capacity_errors() {
    let mut v: SharedCircularVec<u64> = crate::circular_vec![1];
    assert_eq!(v.try_reserve(usize::MAX), Err(CircularVecError::CapacityOverflow));
    assert_eq!(v.capacity(), 1);
    assert_eq!(v, [1]);

    let result = SharedCircularVec::<u64>::try_with_capacity(usize::MAX / 2);
    assert!(matches!(result, Err(CircularVecError::CapacityOverflow)));
}

#[test]
fn test_capacity_stays_power_of_two() {
    let mut v: SharedCircularVec<i32> = SharedCircularVec::new();
    for i in 0..200 {
        match i % 7 {
            0 | 1 | 2 => v.push_back(i),
            3 => v.push_front(i),
            4 => {
                v.pop_front();
            }
            5 => {
                v.insert(v.len() / 2, i);
            }
            _ => {
                if !v.is_empty() {
                    v.erase(v.len() / 3);
                }
            }
        }
        let cap = v.capacity();
        assert!(cap == 0 || cap.is_power_of_two());
        assert!(v.len() <= cap);
    }
}

#[test]
fn test_zero_sized_elements() {
    let mut v: SharedCircularVec<()> = SharedCircularVec::new();
    for _ in 0..100 {
        v.push_back(());
    }
    assert_eq!(v.len(), 100);
    assert_eq!(v.capacity(), 128);
    v.insert(50, ());
    v.erase_range(10..20);
    assert_eq!(v.len(), 91);
    assert_eq!(v.iter().count(), 91);
}

// ============================================================================
// SEGMENT 4: Positional Operations Across Wrap Positions
// 第4段：跨环绕位置的按位置操作
// ============================================================================

#[test]
fn test_insert_many_every_position() {
    for begin in 0..8 {
        for pos in 0..=6 {
            let mut v = wrapped::<true>(8, begin, &[1, 2, 3, 4, 5, 6]);
            let mut model: VecDeque<i32> = (1..=6).collect();
            v.insert_many(pos, [10, 11, 12]);
            for (k, x) in [10, 11, 12].into_iter().enumerate() {
                model.insert(pos + k, x);
            }
            assert_eq!(contents(&v), Vec::from(model), "begin={begin} pos={pos}");
            assert_eq!(v.capacity(), 16);
        }
    }
}

#[test]
fn test_insert_without_growth_every_position() {
    for begin in 0..8 {
        for pos in 0..=5 {
            let mut fast = wrapped::<true>(8, begin, &[1, 2, 3, 4, 5]);
            let mut slow = wrapped::<false>(8, begin, &[1, 2, 3, 4, 5]);
            fast.insert_many(pos, [8, 9]);
            slow.insert_many(pos, [8, 9]);

            let mut expected = vec![1, 2, 3, 4, 5];
            expected.splice(pos..pos, [8, 9]);
            assert_eq!(contents(&fast), expected);
            assert_eq!(contents(&slow), expected);
            assert_eq!(fast.capacity(), 8);
        }
    }
}

#[test]
fn test_erase_range_every_position() {
    for begin in 0..8 {
        for first in 0..=6 {
            for last in first..=6 {
                let mut v = wrapped::<false>(8, begin, &[1, 2, 3, 4, 5, 6]);
                v.erase_range(first..last);
                let mut expected = vec![1, 2, 3, 4, 5, 6];
                expected.drain(first..last);
                assert_eq!(contents(&v), expected, "begin={begin} {first}..{last}");
                assert_eq!(v.capacity(), 8);
            }
        }
    }
}

#[test]
fn test_insert_iter_unknown_length() {
    for pos in 0..=4 {
        let mut v = wrapped::<true>(4, 3, &[1, 2, 3, 4]);
        v.insert_iter(pos, (10..20).filter(|x| x % 3 == 0));

        let mut expected = vec![1, 2, 3, 4];
        expected.splice(pos..pos, [12, 15, 18]);
        assert_eq!(contents(&v), expected);
    }
}

#[test]
fn test_insert_n_and_insert_with() {
    let mut v: SharedCircularVec<i32> = crate::circular_vec![1, 2, 3];
    v.insert_n(1, 3, 0);
    assert_eq!(v, [1, 0, 0, 0, 2, 3]);
    let slot = v.insert_with(6, || 9);
    *slot += 1;
    assert_eq!(v, [1, 0, 0, 0, 2, 3, 10]);

    let mut slow: CircularVec<i32, Exclusive, false> = CircularVec::new();
    slow.insert_with(0, || 5);
    slow.insert_with(0, || 4);
    slow.insert_with(2, || 6);
    assert_eq!(slow, [4, 5, 6]);
}

#[test]
fn test_remove_and_checked_access() {
    let mut v: SharedCircularVec<i32> = crate::circular_vec![1, 2, 3];
    assert_eq!(v.remove(5), None);
    assert_eq!(v.remove(1), Some(2));
    assert_eq!(v, [1, 3]);

    assert_eq!(v.at(1), Ok(&3));
    assert_eq!(
        v.at(2),
        Err(CircularVecError::IndexOutOfBounds { index: 2, len: 2 })
    );
    *v.at_mut(0).unwrap() = 7;
    assert!(v.at_mut(9).is_err());
    assert_eq!(v.front(), Some(&7));
    assert_eq!(v.back(), Some(&3));
    *v.back_mut().unwrap() = 8;
    *v.front_mut().unwrap() += 1;
    assert_eq!(v, [8, 8]);
    assert_eq!(unsafe { *v.get_unchecked(1) }, 8);
}

#[test]
#[should_panic(expected = "index out of bounds: the len is 3 but the index is 3")]
fn test_index_out_of_bounds() {
    let v: SharedCircularVec<i32> = crate::circular_vec![1, 2, 3];
    let _ = v[3];
}

#[test]
#[should_panic(expected = "insertion index (is 4) should be <= len (is 3)")]
fn test_insert_past_end() {
    let mut v: SharedCircularVec<i32> = crate::circular_vec![1, 2, 3];
    v.insert(4, 0);
}

#[test]
#[should_panic(expected = "range end 4 out of bounds for length 3")]
fn test_erase_range_out_of_bounds() {
    let mut v: SharedCircularVec<i32> = crate::circular_vec![1, 2, 3];
    v.erase_range(1..=3);
}

// ============================================================================
// SEGMENT 5: Bulk Operations
// 第5段：批量操作
// ============================================================================

#[test]
fn test_resize_both_ends() {
    let mut v = wrapped::<true>(4, 2, &[1, 2, 3]);
    v.resize(6, 0);
    assert_eq!(v, [1, 2, 3, 0, 0, 0]);
    v.resize_front(8, 9);
    assert_eq!(v, [9, 9, 1, 2, 3, 0, 0, 0]);
    v.resize(5, 0);
    assert_eq!(v, [9, 9, 1, 2, 3]);
    v.resize_front(2, 0);
    assert_eq!(v, [2, 3]);

    let mut next = 0;
    v.resize_front_with(5, || {
        next += 1;
        next
    });
    assert_eq!(v, [1, 2, 3, 2, 3]);
    v.resize_with(7, Default::default);
    assert_eq!(v, [1, 2, 3, 2, 3, 0, 0]);
}

#[test]
fn test_assign_variants() {
    let mut v = wrapped::<true>(8, 6, &[1, 2, 3, 4, 5]);
    v.assign_exact([7, 8]);
    assert_eq!(v, [7, 8]);
    assert_eq!(v.capacity(), 8);

    v.assign_exact(vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(contents(&v), (1..=9).collect::<Vec<_>>());
    assert_eq!(v.capacity(), 16);

    v.assign_iter((0..20).step_by(5));
    assert_eq!(v, [0, 5, 10, 15]);

    v.assign_n(3, -1);
    assert_eq!(v, [-1, -1, -1]);

    v.assign_exact(std::iter::empty());
    assert!(v.is_empty());
}

#[test]
fn test_mid_ranges() {
    let v = wrapped::<true>(8, 5, &[1, 2, 3, 4, 5, 6]);
    assert_eq!(v.mid(1, Some(4)), [2, 3, 4, 5]);
    assert_eq!(v.mid(2, None), [3, 4, 5, 6]);
    assert_eq!(v.mid(6, None), [] as [i32; 0]);
    assert_eq!(v.mid(0, None), v);
    assert_eq!(v.mid(1, Some(4)).capacity(), 4);
}

#[test]
#[should_panic(expected = "mid range 4..8 out of bounds for length 6")]
fn test_mid_out_of_bounds() {
    let v = wrapped::<true>(8, 0, &[1, 2, 3, 4, 5, 6]);
    let _ = v.mid(4, Some(4));
}

#[test]
fn test_append_and_rotate() {
    let mut a = wrapped::<true>(4, 3, &[1, 2, 3]);
    let b = ExclusiveCircularVec::from([4, 5]);
    a.append(&b);
    assert_eq!(a, [1, 2, 3, 4, 5]);

    let mut model: VecDeque<i32> = contents(&a).into();
    a.rotate_left(2);
    model.rotate_left(2);
    assert_eq!(contents(&a), Vec::from(model.clone()));
    a.rotate_right(4);
    model.rotate_right(4);
    assert_eq!(contents(&a), Vec::from(model));
}

#[test]
fn test_rotate_full_ring() {
    let mut v = wrapped::<false>(4, 1, &[1, 2, 3, 4]);
    v.rotate_left(1);
    assert_eq!(v, [2, 3, 4, 1]);
    v.rotate_right(3);
    assert_eq!(v, [3, 4, 1, 2]);
}

#[test]
fn test_swap_and_swap_contents() {
    let mut a: SharedCircularVec<i32> = crate::circular_vec![1, 2, 3];
    let mut b: SharedCircularVec<i32> = crate::circular_vec![9];
    a.swap(0, 2);
    assert_eq!(a, [3, 2, 1]);
    a.swap_contents(&mut b);
    assert_eq!(a, [9]);
    assert_eq!(b, [3, 2, 1]);
}

// ============================================================================
// SEGMENT 6: Views and Interchange
// 第6段：视图与交换
// ============================================================================

#[test]
fn test_spans_and_for_each() {
    let mut v = wrapped::<true>(8, 6, &[1, 2, 3, 4, 5]);
    let spans = v.spans(..);
    assert!(spans.is_wrapped());
    assert_eq!(spans.as_slices(), (&[1, 2][..], &[3, 4, 5][..]));
    assert!(!v.spans(2..4).is_wrapped());
    assert!(v.spans(3..3).is_empty());

    let mut seen = Vec::new();
    v.for_each_in(1..4, |x| seen.push(*x));
    assert_eq!(seen, vec![2, 3, 4]);

    v.for_each_in_mut(.., |x| *x *= 10);
    assert_eq!(v, [10, 20, 30, 40, 50]);

    let mut spans = v.spans_mut(1..=3);
    spans.copy_from_slice(&[7, 8, 9]);
    assert_eq!(v, [10, 7, 8, 9, 50]);
}

#[test]
fn test_iterators_follow_logical_order() {
    let mut v = wrapped::<true>(8, 5, &[1, 2, 3, 4, 5, 6]);
    assert_eq!(v.iter().rev().copied().collect::<Vec<_>>(), vec![6, 5, 4, 3, 2, 1]);
    assert_eq!(v.iter().nth(4), Some(&5));
    assert_eq!(v.iter().len(), 6);

    for x in &mut v {
        *x += 1;
    }
    assert_eq!(v, [2, 3, 4, 5, 6, 7]);

    let owned: Vec<i32> = v.into_iter().rev().collect();
    assert_eq!(owned, vec![7, 6, 5, 4, 3, 2]);
}

#[test]
fn test_cursor_order_ignores_wrap() {
    let v = wrapped::<true>(4, 2, &[1, 2, 3, 4]);
    let mut cursor = v.cursor_front();
    let end = v.cursor_end();
    let mut seen = Vec::new();
    while cursor < end {
        seen.push(*cursor.get().unwrap());
        cursor.move_next();
    }
    assert_eq!(seen, vec![1, 2, 3, 4]);
    assert_eq!(end - v.cursor_front(), 4);
    assert_eq!(v.cursor(3).get(), Some(&4));
    assert_eq!((v.cursor(1) + 2).get(), Some(&4));
}

#[test]
fn test_to_sequence_round_trip() {
    for len in [0usize, 1, 5, 8, 13] {
        let mut v = wrapped::<true>(16, 11, &[]);
        v.extend((0..len as i32).map(|x| x * 3));
        let as_vec: Vec<i32> = v.to_sequence();
        let back: ExclusiveCircularVec<i32> = as_vec.into();
        assert_eq!(back, v);

        let deque: VecDeque<i32> = v.to_sequence();
        assert_eq!(deque.len(), len);
    }
}

#[test]
fn test_move_to_sequence_empties() {
    let mut v: SharedCircularVec<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
    let copy = v.clone();
    let moved: Vec<String> = v.move_to_sequence();
    assert_eq!(moved, vec!["a", "b"]);
    assert!(v.is_empty());
    assert_eq!(v.capacity(), 0);
    assert_eq!(copy.len(), 2);
}

#[test]
fn test_constructors() {
    let v: SharedCircularVec<String> = SharedCircularVec::with_len(3);
    assert_eq!(v.len(), 3);
    assert_eq!(v.capacity(), 4);
    assert!(v.iter().all(String::is_empty));

    let v: ExclusiveCircularVec<u8> = ExclusiveCircularVec::from_elem(5, 7);
    assert_eq!(v, [7; 5]);
    assert_eq!(v.capacity(), 8);

    let v: SharedCircularVec<i32> = VecDeque::from(vec![1, 2]).into();
    assert_eq!(v, [1, 2]);
    let v: SharedCircularVec<i32> = (&[3, 4][..]).into();
    assert_eq!(v, [3, 4]);
    let v: SharedCircularVec<i32> = SharedCircularVec::default();
    assert_eq!(v.capacity(), 0);
}

#[test]
fn test_elements_dropped_exactly_once() {
    let marker = Rc::new(());
    {
        let mut v: SharedCircularVec<Rc<()>> = SharedCircularVec::new();
        for _ in 0..10 {
            v.push_back(marker.clone());
            v.push_front(marker.clone());
        }
        v.erase_range(3..9);
        v.insert_n(2, 4, marker.clone());
        v.truncate_front(10);
        let copy = v.clone();
        v.pop_back();
        assert_eq!(Rc::strong_count(&marker), 1 + 10 + 9);
        drop(copy);
        v.shrink_to_fit();
        assert_eq!(Rc::strong_count(&marker), 1 + 9);
    }
    assert_eq!(Rc::strong_count(&marker), 1);
}
