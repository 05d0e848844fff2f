//! Shared test utilities for the helm3 mixin workspace.
//!
//! This crate provides fixtures for exercising the mixin without a real
//! helm binary or cluster. It is a dev-dependency only and is not published.
//!
//! # Modules
//!
//! - [`buffer`]: cloneable in-memory writers for captured output
//! - [`fakes`]: a recording [`CommandRunner`](helm3_core::CommandRunner)
//!   and an in-memory [`ClusterClient`](helm3_core::ClusterClient)
//! - [`mixin`]: [`TestMixin`](mixin::TestMixin) wiring both into a
//!   temporary porter home

pub mod buffer;
pub mod fakes;
pub mod mixin;

pub use buffer::SharedBuffer;
pub use fakes::{FakeCluster, RecordingRunner};
pub use mixin::TestMixin;
