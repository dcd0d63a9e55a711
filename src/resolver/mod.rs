//! Remote flow resolvers.
//!
//! A resolver is one best-effort strategy for turning a prompt into a flow
//! graph by asking an external service. Resolvers are constructed once
//! from config and shared across requests; each `resolve` call builds its
//! own HTTP client so no connection outlives the request.

mod answer;
mod chat;

use async_trait::async_trait;

pub use answer::AnswerResolver;
pub use chat::ChatResolver;

use crate::{Result, model::FlowGraph};

/// Which resolution strategy a resolver implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ResolverKind {
    /// Primary tier: chat-completion endpoint emitting the graph JSON directly.
    Chat,
    /// Secondary tier: AI-answer endpoint with the graph JSON embedded in free text.
    Answer,
}

#[async_trait]
pub trait Resolver: Send + Sync {
    /// Returns the kind of this resolver, used for tier logging.
    fn kind(&self) -> ResolverKind;

    /// Asks the remote service to produce a flow graph for the prompt.
    ///
    /// Returns `FlowgenError::Credential` when the tier is not configured,
    /// which the orchestrator treats as "skip" rather than "failed".
    /// Produced graphs are validated against the FlowGraph invariants
    /// before being accepted; a violation fails the tier.
    async fn resolve(
        &self,
        prompt: &str,
    ) -> Result<FlowGraph>;
}
