//! Ready-made wrappers for the external tools toolpipe knows about.
//!
//! Each wrapper owns a [`CliTool`](crate::tool::CliTool) and is created by an
//! explicit constructor; nothing is spawned or configured until one is built.

pub mod fd;
pub mod gum;
pub mod htmlq;

pub use fd::Fd;
pub use gum::Gum;
pub use htmlq::Htmlq;
