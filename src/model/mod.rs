mod edge;
mod flow;
mod node;

pub use edge::{EdgeId, EdgeModel};
pub use flow::FlowGraph;
pub use node::{NodeId, NodeModel, NodeType, Position};
