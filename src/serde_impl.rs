//! Serde support (enabled with the `serde` feature)
//!
//! Serde 支持（通过 `serde` 特性启用）
//!
//! A vector serializes as a sequence of known length with its elements in logical
//! order, and deserializes by appending each element of the sequence. The physical
//! layout never reaches the wire.
//!
//! 向量序列化为已知长度的序列，元素按逻辑顺序排列；反序列化时依次追加序列中的每个元素。
//! 物理布局从不出现在序列化结果中。

use crate::circular::CircularVec;
use crate::ownership::Ownership;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::mem;

/// Upper bound for memory reserved up front from an untrusted length hint
const MAX_PREALLOC_BYTES: usize = 1024 * 1024;

impl<T, O, const RELOCATABLE: bool> Serialize for CircularVec<T, O, RELOCATABLE>
where
    T: Serialize,
    O: Ownership,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

struct CircularVecVisitor<T, O: Ownership, const RELOCATABLE: bool> {
    _marker: PhantomData<fn() -> CircularVec<T, O, RELOCATABLE>>,
}

impl<'de, T, O, const RELOCATABLE: bool> Visitor<'de> for CircularVecVisitor<T, O, RELOCATABLE>
where
    T: Deserialize<'de> + Clone,
    O: Ownership,
{
    type Value = CircularVec<T, O, RELOCATABLE>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let cap = seq
            .size_hint()
            .unwrap_or(0)
            .min(MAX_PREALLOC_BYTES / mem::size_of::<T>().max(1));
        let mut out = CircularVec::try_with_capacity(cap).map_err(de::Error::custom)?;
        while let Some(value) = seq.next_element()? {
            out.try_push_back(value).map_err(de::Error::custom)?;
        }
        Ok(out)
    }
}

impl<'de, T, O, const RELOCATABLE: bool> Deserialize<'de> for CircularVec<T, O, RELOCATABLE>
where
    T: Deserialize<'de> + Clone,
    O: Ownership,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(CircularVecVisitor {
            _marker: PhantomData,
        })
    }
}
