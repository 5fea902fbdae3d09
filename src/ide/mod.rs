//! IDE features: the read-only feature boundary.
//!
//! Everything here reads a [`Snapshot`](crate::workspace::Snapshot) and
//! never mutates it. An unresolved usage is a normal answer (`None` or an
//! empty result), not an error.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take a snapshot in, return data out
//! 2. **No LSP types**: Locations are [`FileId`](crate::FileId) plus
//!    [`Span`](crate::Span), converted at the protocol boundary
//! 3. **No rendering**: Hover returns nodes; formatting text is the
//!    caller's job
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use solstice::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.set_file_content("A.sol", "contract A {}")?;
//!
//! let analysis = host.analysis();
//! let goto = analysis.goto_definition(file_id, position);
//! ```

mod analysis;
mod goto;
mod hover;
mod references;

pub use analysis::{Analysis, AnalysisHost};
pub use goto::{GotoResult, GotoTarget, Location, goto_definition, resolve_definition};
pub use hover::{HoverResult, declared_type_of, hover, identifier_name, resolve_hover_target};
pub use references::{Reference, ReferenceResult, find_references};
