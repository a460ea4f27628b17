// Module exports for pure logic
pub mod folders;
pub mod naming;
pub mod navigation;
pub mod query_file_store; // JSON persistence layer
pub mod query_store;      // Store trait + in-memory store
pub mod tabs;
pub mod tree;             // Sibling-set helpers
pub mod view;
