//! Study memory backends for Sensei.
//!
//! Implements the `StudyMemory` trait from `sensei-core`. Currently a
//! single in-memory backend; anything that can answer a ranked similarity
//! query over a learner's notes fits behind the same trait.

pub mod in_memory;

pub use in_memory::InMemoryStudyMemory;
