//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the SCM core and something it
//! does not own (time, the `sscm` process, the disk, unique IDs, the host's
//! user registry, the build console, the build being checked out).
//! Implementations live in `src/adapters/` and `src/store/`.

pub mod build;
pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod launcher;
pub mod listener;
pub mod users;

pub use build::BuildRecord;
pub use clock::Clock;
pub use filesystem::FileSystem;
pub use id_gen::IdGenerator;
pub use launcher::Launcher;
pub use listener::{ListenerWriter, TaskListener};
pub use users::{User, UserDirectory};
