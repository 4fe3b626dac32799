//! Core systems for CMK.
//!
//! This crate provides the foundational pieces shared by the CMK widget crates:
//!
//! - **Signal/Slot System**: Type-safe notifications between widgets and their owners
//! - **Object Identity**: Unique object IDs and optional display names
//! - **Logging**: `tracing` target names for filtering by subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use cmk_core::Signal;
//!
//! let clicked = Signal::<()>::new();
//!
//! let conn_id = clicked.connect(|_| {
//!     println!("clicked");
//! });
//!
//! clicked.emit(());
//! clicked.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod object;
pub mod signal;

pub use error::SignalError;
pub use object::{Object, ObjectBase, ObjectId};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
