//! Flow generation orchestrator - the main entry point for Flowgen.
//!
//! The generator drives the ordered resolution tiers: the primary chat
//! resolver, then the answer resolver, then the deterministic heuristic
//! matcher. No tier is revisited and the heuristic tier always succeeds,
//! so `generate` never fails.

use tracing::{debug, info, warn};

use crate::{
    Config, FlowgenError,
    heuristic::HeuristicMatcher,
    model::FlowGraph,
    resolver::{AnswerResolver, ChatResolver, Resolver},
};

/// The flow generation orchestrator.
///
/// One instance is constructed by the host's composition root and shared
/// across requests; it holds no mutable state and every call builds a
/// fresh graph from its inputs only, so concurrent requests are fully
/// independent.
///
/// # Example
///
/// ```rust,ignore
/// let generator = GeneratorBuilder::new().config(Config::from_env()).build();
///
/// let graph = generator.generate("summarize top 5 news from https://n.com").await;
/// println!("{}", graph.to_json()?);
/// ```
pub struct FlowGenerator {
    /// Remote resolution tiers, in priority order.
    resolvers: Vec<Box<dyn Resolver>>,
    /// Terminal tier; total over all prompts.
    heuristic: HeuristicMatcher,
}

impl FlowGenerator {
    /// Creates a generator with the standard tier sequence for the given
    /// configuration. Unconfigured tiers stay in the sequence and skip
    /// themselves at resolve time.
    pub fn new_with_config(config: Config) -> Self {
        let resolvers: Vec<Box<dyn Resolver>> = vec![Box::new(ChatResolver::new(config.chat)), Box::new(AnswerResolver::new(config.answer))];

        Self {
            resolvers,
            heuristic: HeuristicMatcher::new(),
        }
    }

    pub(crate) fn with_resolvers(resolvers: Vec<Box<dyn Resolver>>) -> Self {
        Self {
            resolvers,
            heuristic: HeuristicMatcher::new(),
        }
    }

    /// Generates a flow graph for the prompt. Never fails: remote tiers
    /// are tried strictly in order and any failure advances to the next
    /// tier, ending at the heuristic matcher. Total latency is bounded by
    /// the sum of the configured per-tier timeouts.
    pub async fn generate(
        &self,
        prompt: &str,
    ) -> FlowGraph {
        for resolver in self.resolvers.iter() {
            let kind = resolver.kind();
            match resolver.resolve(prompt).await {
                Ok(graph) => {
                    info!("tier '{}' produced a graph with {} nodes and {} edges", kind.as_ref(), graph.nodes.len(), graph.edges.len());
                    return graph;
                }
                Err(FlowgenError::Credential(msg)) => {
                    debug!("tier '{}' skipped: {}", kind.as_ref(), msg);
                }
                Err(err) => {
                    warn!("tier '{}' failed: {}", kind.as_ref(), err);
                }
            }
        }

        debug!("falling back to the heuristic matcher");
        self.heuristic.match_prompt(prompt)
    }
}
