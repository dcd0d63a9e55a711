//! The flow graph: the sole externally visible artifact of generation.
//!
//! A `FlowGraph` is constructed fresh per request and is immutable once
//! returned. It is never merged or diffed across requests, and no graph is
//! persisted by this crate.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    FlowgenError, Result,
    model::{EdgeModel, NodeModel},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FlowGraph {
    /// Insertion order is the default left-to-right layout order.
    pub nodes: Vec<NodeModel>,
    pub edges: Vec<EdgeModel>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let graph = serde_json::from_str::<FlowGraph>(s);
        match graph {
            Ok(v) => Ok(v),
            Err(e) => Err(FlowgenError::Graph(format!("{}", e))),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a JSON value as a flow graph, checking the wire shape against
    /// the schema first so shape errors surface as `Convert` rather than as
    /// opaque deserialize failures.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        jsonschema::validate(&Self::schema(), &value)?;
        let graph = serde_json::from_value::<Self>(value)?;
        Ok(graph)
    }

    pub fn schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["nodes", "edges"],
            "properties": {
                "nodes": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["id", "type", "position", "data"],
                        "properties": {
                            "id": { "type": "string" },
                            "type": {
                                "type": "string",
                                "enum": ["search", "crawl", "extract", "map", "qa"]
                            },
                            "position": {
                                "type": "object",
                                "required": ["x", "y"],
                                "properties": {
                                    "x": { "type": "number" },
                                    "y": { "type": "number" }
                                }
                            },
                            "data": { "type": "object" }
                        }
                    }
                },
                "edges": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["id", "source", "target"],
                        "properties": {
                            "id": { "type": "string" },
                            "source": { "type": "string" },
                            "target": { "type": "string" }
                        }
                    }
                }
            }
        })
    }

    /// add node to the graph, returning its id for edge construction
    pub fn add_node(
        &mut self,
        node: NodeModel,
    ) -> String {
        let id = node.id.clone();
        self.nodes.push(node);
        id
    }

    /// add a directed edge between two existing nodes
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
    ) {
        self.edges.push(EdgeModel::connect(source, target));
    }

    /// Checks the structural invariants: node ids unique within the graph,
    /// every edge endpoint references an existing node, at least one node
    /// present.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(FlowgenError::Graph("graph has no nodes".to_string()));
        }

        let mut ids = HashSet::new();
        for node in self.nodes.iter() {
            if !ids.insert(node.id.as_str()) {
                return Err(FlowgenError::Graph(format!("duplicate node id '{}'", node.id)));
            }
        }

        for edge in self.edges.iter() {
            if !ids.contains(edge.source.as_str()) {
                return Err(FlowgenError::Graph(format!("edge '{}': source node {} not found", edge.id, edge.source)));
            }
            if !ids.contains(edge.target.as_str()) {
                return Err(FlowgenError::Graph(format!("edge '{}': target node {} not found", edge.id, edge.target)));
            }
        }

        Ok(())
    }
}
