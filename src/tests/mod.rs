//! Crate-level tests
//!
//! 全 crate 范围的测试

mod circular;
