//! Hook process runners.

mod recording;
mod shell;

pub use recording::RecordingRunner;
pub use shell::ShellRunner;
