use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::{
    FlowgenError, Result,
    config::ChatConfig,
    model::FlowGraph,
    resolver::{Resolver, ResolverKind},
};

/// System instruction describing the tool nodes and the required JSON
/// shape. The endpoint is asked to emit the flow graph JSON directly.
const SYSTEM_PROMPT: &str = r#"
You are an expert at designing data flows for a web intelligence platform.
The platform has the following tool nodes:
- 'search': Performs a web search. Input: 'query'. Output: 'answer', 'results'.
- 'crawl': Crawls a URL. Input: 'url', 'query' (optional instructions). Output: 'results'.
- 'extract': Extracts content from a URL. Input: 'url', 'query' (optional extraction goal). Output: 'answer', 'results'.
- 'map': Maps the structure of a website. Input: 'url'. Output: 'results'.
- 'qa': Answers questions based on context. Input: 'question', 'context'. Output: 'answer'.

When a node follows another, it can use the output of the previous node as input.
For example, an 'extract' node following a 'search' node will automatically receive the URL from the search result.

Your task is to translate a user's natural language request into a JSON structure representing a flow of these nodes.
The JSON must follow this exact structure:
{
    "nodes": [
        {
            "id": "node_1",
            "type": "search",
            "position": {"x": 100, "y": 100},
            "data": {"query": "AI news"}
        }
    ],
    "edges": [
        {
            "id": "edge_1_2",
            "source": "node_1",
            "target": "node_2"
        }
    ]
}

RULES:
1. Only use the node types listed above.
2. Ensure nodes are logically connected.
3. Provide initial data (like 'query' or 'url') if mentioned in the prompt.
4. If a node depends on a previous one's output, just place it in the sequence; the system handles the data passing.
5. Return ONLY the JSON object. No explanation.
"#;

/// Tier-1 resolver: asks an OpenAI-compatible chat-completion endpoint to
/// emit the flow graph JSON directly.
pub struct ChatResolver {
    config: Option<ChatConfig>,
}

impl ChatResolver {
    pub fn new(config: Option<ChatConfig>) -> Self {
        Self {
            config,
        }
    }

    /// Pulls the generated flow graph out of a chat-completion response
    /// body and checks it against the graph invariants.
    fn parse_response(body: &str) -> Result<FlowGraph> {
        let data: serde_json::Value = serde_json::from_str(body)?;
        let content = data["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| FlowgenError::Convert("chat response has no choices[0].message.content".to_string()))?;

        let value: serde_json::Value = serde_json::from_str(content)?;
        let graph = FlowGraph::from_value(value)?;
        graph.validate()?;
        Ok(graph)
    }
}

#[async_trait]
impl Resolver for ChatResolver {
    fn kind(&self) -> ResolverKind {
        ResolverKind::Chat
    }

    async fn resolve(
        &self,
        prompt: &str,
    ) -> Result<FlowGraph> {
        let Some(config) = &self.config else {
            return Err(FlowgenError::Credential("chat resolver has no api key configured".to_string()));
        };

        let payload = json!({
            "model": config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": format!("Generate a flow for: {}", prompt) }
            ],
            "response_format": { "type": "json_object" }
        });

        debug!("requesting flow from chat endpoint, model '{}'", config.model);

        let client = reqwest::Client::new();
        let response = client
            .post(&config.base_url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .timeout(Duration::from_millis(config.timeout))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FlowgenError::Http(format!("chat endpoint returned {}: {}", status.as_u16(), body)));
        }

        Self::parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat_body(content: &str) -> String {
        json!({
            "choices": [ { "message": { "role": "assistant", "content": content } } ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_resolve_without_credential_is_skipped() {
        let resolver = ChatResolver::new(None);
        let err = resolver.resolve("search for rust").await.unwrap_err();
        assert!(matches!(err, FlowgenError::Credential(_)));
    }

    #[test]
    fn test_parse_response_accepts_valid_graph() {
        let content = json!({
            "nodes": [
                { "id": "node_1", "type": "search", "position": {"x": 100, "y": 100}, "data": {"query": "AI news"} }
            ],
            "edges": []
        })
        .to_string();

        let graph = ChatResolver::parse_response(&chat_body(&content)).unwrap();
        assert_eq!(graph.nodes.len(), 1);
    }

    #[test]
    fn test_parse_response_rejects_missing_content() {
        let body = json!({ "choices": [] }).to_string();
        let err = ChatResolver::parse_response(&body).unwrap_err();
        assert!(matches!(err, FlowgenError::Convert(_)));
    }

    #[test]
    fn test_parse_response_rejects_dangling_edge() {
        let content = json!({
            "nodes": [
                { "id": "node_1", "type": "search", "position": {"x": 100, "y": 100}, "data": {} }
            ],
            "edges": [
                { "id": "edge_node_1_node_2", "source": "node_1", "target": "node_2" }
            ]
        })
        .to_string();

        let err = ChatResolver::parse_response(&chat_body(&content)).unwrap_err();
        assert!(matches!(err, FlowgenError::Graph(_)));
    }

    #[test]
    fn test_parse_response_rejects_non_json_content() {
        let err = ChatResolver::parse_response(&chat_body("sure, here is your flow!")).unwrap_err();
        assert!(matches!(err, FlowgenError::Convert(_)));
    }
}
