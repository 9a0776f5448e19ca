// Implementations of the leaderboard RecordStore.

pub mod firebase_store;
pub mod in_memory;

pub use firebase_store::FirebaseRecordStore;
pub use in_memory::InMemoryRecordStore;
