//! Filesystem adapters.

mod local;
mod memory;

pub use local::LocalFileWriter;
pub use memory::MemoryFileWriter;
