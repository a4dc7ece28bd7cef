//! Attribute mapping from source features onto grid cells

/// R-tree backed spatial join
pub mod mapper;
/// Cell/feature index pairs and joined row views
pub mod relation;

pub use mapper::{join, join_with_progress};
pub use relation::{CellMatch, JoinRelation, JoinedCell};
