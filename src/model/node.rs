use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// node id
pub type NodeId = String;

/// Tool node types understood by the downstream execution engine.
///
/// Each type has a fixed input/output contract: `search` consumes a
/// `query`, `crawl`/`extract`/`map` consume a `url`, `qa` consumes a
/// `question` plus the context produced by its upstream node.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeType {
    #[default]
    Search,
    Crawl,
    Extract,
    Map,
    Qa,
}

/// 2D display coordinate. Advisory only: the generator lays nodes out in a
/// left-to-right chain so the graph renders legibly, nothing downstream
/// depends on the values.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            x,
            y,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NodeModel {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub position: Position,
    pub data: Map<String, Value>,
}

impl NodeModel {
    pub fn new(
        id: impl Into<NodeId>,
        node_type: NodeType,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            node_type,
            position,
            data: Map::new(),
        }
    }

    /// Set a data key, returning self for chained construction.
    pub fn with_data(
        mut self,
        key: &str,
        value: impl Into<Value>,
    ) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}
