//! pseudoc - Common Types and Utilities
//!
//! This crate contains the pieces shared by every stage of the pseudoc
//! compiler: source locations, the closed set of atomic types, the error
//! taxonomy and the compile options.

pub mod error;
pub mod options;
pub mod source_loc;
pub mod types;

pub use error::{CompilerError, LoweringError, ParseError, ScopeError};
pub use options::CompileOptions;
pub use source_loc::SourceLocation;
pub use types::AtomicType;
