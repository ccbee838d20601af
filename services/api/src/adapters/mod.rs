pub mod memory;

pub use memory::MemoryJournalAdapter;
