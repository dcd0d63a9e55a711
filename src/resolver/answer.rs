use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::{
    FlowgenError, Result,
    config::AnswerConfig,
    model::FlowGraph,
    resolver::{Resolver, ResolverKind},
};

/// Tier-2 resolver: asks a general-purpose AI-answer endpoint for a
/// free-text answer and recovers the flow graph JSON embedded in it.
pub struct AnswerResolver {
    config: Option<AnswerConfig>,
}

impl AnswerResolver {
    pub fn new(config: Option<AnswerConfig>) -> Self {
        Self {
            config,
        }
    }

    /// Recovers the brace-delimited JSON object embedded in a free-text
    /// answer: the span from the first `{` to the last `}`. The answer may
    /// wrap the object in prose on either side.
    fn extract_json_object(answer: &str) -> Result<&str> {
        let start = answer.find('{').ok_or_else(|| FlowgenError::Convert("answer contains no JSON object".to_string()))?;
        let end = answer.rfind('}').filter(|end| *end > start).ok_or_else(|| FlowgenError::Convert("answer contains no JSON object".to_string()))?;
        Ok(&answer[start..=end])
    }

    fn parse_answer(answer: &str) -> Result<FlowGraph> {
        let embedded = Self::extract_json_object(answer)?;
        let value: serde_json::Value = serde_json::from_str(embedded)?;
        let graph = FlowGraph::from_value(value)?;
        graph.validate()?;
        Ok(graph)
    }
}

#[async_trait]
impl Resolver for AnswerResolver {
    fn kind(&self) -> ResolverKind {
        ResolverKind::Answer
    }

    async fn resolve(
        &self,
        prompt: &str,
    ) -> Result<FlowGraph> {
        let Some(config) = &self.config else {
            return Err(FlowgenError::Credential("answer resolver has no api key configured".to_string()));
        };

        let payload = json!({
            "api_key": config.api_key,
            "query": format!(
                "Design a flow of search/crawl/extract/map/qa tool nodes for this request, \
                 answered as one JSON object with 'nodes' and 'edges': {}",
                prompt
            ),
            "include_answer": true,
            "search_depth": config.search_depth,
        });

        debug!("requesting flow from answer endpoint");

        let client = reqwest::Client::new();
        let response = client
            .post(format!("{}/search", config.base_url))
            .json(&payload)
            .timeout(Duration::from_millis(config.timeout))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FlowgenError::Http(format!("answer endpoint returned {}: {}", status.as_u16(), body)));
        }

        let data: serde_json::Value = serde_json::from_str(&body)?;
        let answer = data["answer"].as_str().ok_or_else(|| FlowgenError::Convert("answer response has no 'answer' field".to_string()))?;

        Self::parse_answer(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_object_from_prose() {
        let answer = "Here is the flow you asked for: {\"nodes\": [], \"edges\": []} hope it helps";
        let extracted = AnswerResolver::extract_json_object(answer).unwrap();
        assert_eq!(extracted, "{\"nodes\": [], \"edges\": []}");
    }

    #[test]
    fn test_extract_json_object_spans_nested_braces() {
        let answer = "{\"nodes\": [{\"id\": \"node_1\"}], \"edges\": []}";
        let extracted = AnswerResolver::extract_json_object(answer).unwrap();
        assert_eq!(extracted, answer);
    }

    #[test]
    fn test_extract_json_object_without_braces_fails() {
        let err = AnswerResolver::extract_json_object("no json here").unwrap_err();
        assert!(matches!(err, FlowgenError::Convert(_)));
    }

    #[test]
    fn test_parse_answer_accepts_embedded_graph() {
        let answer = format!(
            "The flow is {} as requested.",
            json!({
                "nodes": [
                    { "id": "node_1", "type": "search", "position": {"x": 100, "y": 100}, "data": {"query": "rust"} },
                    { "id": "node_2", "type": "qa", "position": {"x": 450, "y": 100}, "data": {"question": "Summarize"} }
                ],
                "edges": [
                    { "id": "edge_node_1_node_2", "source": "node_1", "target": "node_2" }
                ]
            })
        );

        let graph = AnswerResolver::parse_answer(&answer).unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_parse_answer_rejects_shapeless_object() {
        let err = AnswerResolver::parse_answer("result: {\"status\": \"ok\"}").unwrap_err();
        assert!(matches!(err, FlowgenError::Convert(_)));
    }

    #[tokio::test]
    async fn test_resolve_without_credential_is_skipped() {
        let resolver = AnswerResolver::new(None);
        let err = resolver.resolve("search for rust").await.unwrap_err();
        assert!(matches!(err, FlowgenError::Credential(_)));
    }
}
