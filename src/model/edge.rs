use serde::{Deserialize, Serialize};

use crate::model::node::NodeId;

/// Unique identifier for an edge within a flow graph.
pub type EdgeId = String;

/// Directed edge between two tool nodes. The target consumes the source's
/// output.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EdgeModel {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

impl EdgeModel {
    /// Creates an edge whose id encodes its endpoints
    /// (`edge_<source>_<target>`) for traceability.
    pub fn connect(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("edge_{}_{}", source, target),
            source,
            target,
        }
    }
}
