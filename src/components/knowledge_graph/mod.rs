mod component;
mod dedup;
mod geometry;
mod guards;
mod layout;
mod normalize;
mod render;
mod state;
mod status;
mod types;
mod viewport;

pub use component::KnowledgeGraph;
pub use types::{Node, RawGraph};
