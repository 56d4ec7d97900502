//! Deptree: dependency tree nodes for NLP components
//!
//! Nodes of a dependency parse kept in an arena, with per-head dependent
//! lists ordered by token id, navigation over the tree, and a separate
//! graph of semantic role arcs over the same nodes.

pub mod ancestry; // Ancestors, LCA, tree paths, argument candidates
pub mod field; // Attribute projections and directions
pub mod label; // Label filters (exact, set, regex)
pub mod navigate; // Dependents, siblings, subtrees, valency
pub mod node; // Node records and feature maps
pub mod semantic; // Semantic and secondary head arcs
pub mod text; // Word-form normalization
pub mod tree; // Tree arena and head links
pub mod tsv; // Tab-separated node encoding and reader

// Re-exports for convenience
pub use field::{Direction, Field};
pub use label::LabelFilter;
pub use node::{Features, Node, NodeId, ROOT_TAG};
pub use semantic::DepArc;
pub use tree::{HeadArc, Tree};
pub use tsv::{TsvConfig, TsvError, TsvReader};
