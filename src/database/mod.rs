// file: src/database/mod.rs
// description: membership store module exports
// reference: internal module structure

pub mod client;
pub mod memory;
pub mod store;

pub use client::RestMembershipStore;
pub use memory::InMemoryMembershipStore;
pub use store::{ChapterDirectory, MemberCreator};
