pub mod cache;
pub mod config;
pub mod consts;
pub mod core_types;
pub mod dictionary;
pub mod error;
pub mod geometry;
pub mod input;
pub mod node;
pub mod operation;
pub mod policy;
pub mod profiler;
pub mod search;
pub mod session;

pub use crate::config::{Modality, PolicyConfig};
pub use crate::core_types::Suggestion;
pub use crate::error::{SgResult, SuggestError};
pub use crate::operation::EditOperation;
pub use crate::policy::{build_policy, update_node, CostPolicy};
pub use crate::session::SearchSession;
