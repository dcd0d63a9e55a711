//! Deterministic, network-free flow generation.
//!
//! The heuristic matcher is the terminal tier of the resolution sequence:
//! a total, side-effect-free function from prompt to flow graph. It
//! classifies the lowercased prompt against an ordered list of
//! (predicate, builder) rules and instantiates the first matching rule's
//! template. The final rule matches everything, so the matcher never fails.
//!
//! Rule order is a contract, not an implementation detail: a prompt that
//! satisfies several rules always resolves via the earliest one.

mod url;

use tracing::debug;

pub use url::{detect_url, extract_count};

use crate::model::{FlowGraph, NodeModel, NodeType, Position};

/// "list/map the site" intent keywords for the map rule.
const MAP_KEYWORDS: &[&str] = &["render", "list url", "all url", "urls", "sitemap", "map site", "site map"];
/// summarization intent keywords for the map rule.
const SUMMARIZE_KEYWORDS: &[&str] = &["summarize", "summary", "news", "top", "bullet", "brief", "overview"];
/// keywords that signal a web-search intent.
const SEARCH_KEYWORDS: &[&str] = &["search", "find", "research", "compare", "analyze", "investigate", "what", "how", "why", "explain", "tell", "describe"];
/// keywords that ask for an answer on top of search results.
const QA_KEYWORDS: &[&str] = &["qa", "ask", "find the best", "summarize", "compare", "analyze", "explain", "describe", "tell", "what"];
/// keywords that ask for an answer on top of crawled/extracted content.
const FOLLOWUP_QA_KEYWORDS: &[&str] = &["summarize", "analyze", "qa", "ask", "explain", "describe"];

/// default item count when the prompt does not name one
const DEFAULT_ITEM_COUNT: u64 = 5;
/// qa question used when the prompt carries no more specific intent
const GENERIC_QA_QUESTION: &str = "Summarize the key findings from the results";

/// Prompt features computed once and shared by every rule.
struct PromptInfo {
    raw: String,
    lower: String,
    url: Option<String>,
}

impl PromptInfo {
    fn new(prompt: &str) -> Self {
        Self {
            raw: prompt.to_string(),
            lower: prompt.to_lowercase(),
            url: detect_url(prompt),
        }
    }

    fn contains_any(
        &self,
        keywords: &[&str],
    ) -> bool {
        keywords.iter().any(|kw| self.lower.contains(kw))
    }
}

/// A single classification rule: a predicate over the prompt features and
/// a builder that instantiates the rule's graph template.
struct Rule {
    name: &'static str,
    matches: fn(&PromptInfo) -> bool,
    build: fn(&PromptInfo) -> FlowGraph,
}

/// Classification rules in priority order. The first matching rule wins
/// and the last rule matches unconditionally.
const RULES: &[Rule] = &[
    Rule {
        name: "map_site",
        matches: |info| info.url.is_some() && (info.contains_any(MAP_KEYWORDS) || info.contains_any(SUMMARIZE_KEYWORDS)),
        build: build_map_flow,
    },
    Rule {
        name: "search",
        matches: |info| info.contains_any(SEARCH_KEYWORDS),
        build: build_search_flow,
    },
    Rule {
        name: "crawl_extract",
        matches: |info| info.lower.contains("crawl") || info.lower.contains("extract"),
        build: build_crawl_extract_flow,
    },
    Rule {
        name: "default",
        matches: |_| true,
        build: build_default_flow,
    },
];

/// Rule-based prompt classifier. Stateless; one instance can serve any
/// number of concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMatcher;

impl HeuristicMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Maps a prompt to a flow graph. Total: every input, including the
    /// empty string, yields a non-empty, internally consistent graph.
    pub fn match_prompt(
        &self,
        prompt: &str,
    ) -> FlowGraph {
        let info = PromptInfo::new(prompt);

        // The "default" rule matches everything, so the loop always returns.
        for rule in RULES {
            if (rule.matches)(&info) {
                debug!("heuristic rule '{}' matched", rule.name);
                return (rule.build)(&info);
            }
        }
        unreachable!("the default rule matches every prompt")
    }
}

/// Allocates the next sequential `node_<n>` id, 1-based.
fn next_id(graph: &FlowGraph) -> String {
    format!("node_{}", graph.nodes.len() + 1)
}

/// URL + list/summarize intent: map the site, extract the top N pages,
/// answer over them.
fn build_map_flow(info: &PromptInfo) -> FlowGraph {
    let mut graph = FlowGraph::new();
    // matches() guarantees a URL is present for this rule
    let url = info.url.clone().unwrap_or_default();
    let count = extract_count(&info.lower).unwrap_or(DEFAULT_ITEM_COUNT);

    let question = if info.lower.contains("news") {
        format!("Summarize the top {} news stories in a few bullet points", count)
    } else if info.lower.contains("summarize") || info.lower.contains("summary") {
        format!("Summarize the main content of these {} pages", count)
    } else {
        format!("List the top {} items from these pages", count)
    };

    let map = graph.add_node(NodeModel::new(next_id(&graph), NodeType::Map, Position::new(100.0, 100.0)).with_data("url", url));
    let extract = graph.add_node(
        NodeModel::new(next_id(&graph), NodeType::Extract, Position::new(450.0, 100.0))
            .with_data("label", format!("Extract Top {} Pages", count))
            .with_data("limit", count),
    );
    let qa = graph.add_node(NodeModel::new(next_id(&graph), NodeType::Qa, Position::new(800.0, 100.0)).with_data("question", question));

    graph.add_edge(&map, &extract);
    graph.add_edge(&extract, &qa);
    graph
}

/// Search intent: seed a search node with the full prompt, optionally
/// chain a crawl or extract step, and default to a qa step for any
/// substantive query.
fn build_search_flow(info: &PromptInfo) -> FlowGraph {
    let mut graph = FlowGraph::new();
    let mut x = 100.0;

    let search = graph.add_node(NodeModel::new(next_id(&graph), NodeType::Search, Position::new(x, 100.0)).with_data("query", info.raw.clone()));
    let mut tail = search;

    if info.lower.contains("crawl") {
        x += 450.0;
        let crawl = graph.add_node(NodeModel::new(next_id(&graph), NodeType::Crawl, Position::new(x, 100.0)).with_data("url", info.url.clone().unwrap_or_default()));
        graph.add_edge(&tail, &crawl);
        tail = crawl;
    } else if info.lower.contains("extract") {
        x += 450.0;
        let extract = graph.add_node(NodeModel::new(next_id(&graph), NodeType::Extract, Position::new(x, 100.0)).with_data("url", info.url.clone().unwrap_or_default()));
        graph.add_edge(&tail, &extract);
        tail = extract;
    }

    // qa is the default for any substantive query, not just explicit asks
    if info.contains_any(QA_KEYWORDS) || info.raw.chars().count() > 10 {
        x += 450.0;
        let qa = graph.add_node(NodeModel::new(next_id(&graph), NodeType::Qa, Position::new(x, 100.0)).with_data("question", GENERIC_QA_QUESTION));
        graph.add_edge(&tail, &qa);
    }

    graph
}

/// Crawl/extract without search intent: wire the requested steps in order
/// and append a qa step when the prompt also asks for an answer.
fn build_crawl_extract_flow(info: &PromptInfo) -> FlowGraph {
    let mut graph = FlowGraph::new();
    let url = info.url.clone().unwrap_or_default();
    let mut x = 100.0;
    let mut tail: Option<String> = None;

    if info.lower.contains("crawl") {
        let crawl = graph.add_node(NodeModel::new(next_id(&graph), NodeType::Crawl, Position::new(x, 150.0)).with_data("url", url.clone()));
        tail = Some(crawl);
        x += 350.0;
    }

    if info.lower.contains("extract") {
        let extract = graph.add_node(NodeModel::new(next_id(&graph), NodeType::Extract, Position::new(x, 150.0)).with_data("url", url));
        if let Some(prev) = &tail {
            graph.add_edge(prev, &extract);
        }
        tail = Some(extract);
        x += 350.0;
    }

    if info.contains_any(FOLLOWUP_QA_KEYWORDS) {
        let qa = graph.add_node(NodeModel::new(next_id(&graph), NodeType::Qa, Position::new(x, 150.0)).with_data("question", GENERIC_QA_QUESTION));
        // this rule only fires when crawl or extract is present, so a tail exists
        if let Some(prev) = &tail {
            graph.add_edge(prev, &qa);
        }
    }

    graph
}

/// No recognized pattern: a search over the raw prompt followed by a
/// generic qa step. Guarantees the matcher is total.
fn build_default_flow(info: &PromptInfo) -> FlowGraph {
    let mut graph = FlowGraph::new();

    let search = graph.add_node(NodeModel::new(next_id(&graph), NodeType::Search, Position::new(100.0, 100.0)).with_data("query", info.raw.clone()));
    let qa = graph.add_node(NodeModel::new(next_id(&graph), NodeType::Qa, Position::new(450.0, 100.0)).with_data("question", GENERIC_QA_QUESTION));
    graph.add_edge(&search, &qa);

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_types(graph: &FlowGraph) -> Vec<NodeType> {
        graph.nodes.iter().map(|n| n.node_type).collect()
    }

    // ==================== rule 1: map flow ====================

    #[test]
    fn test_map_with_url() {
        let graph = HeuristicMatcher::new().match_prompt("render all urls from https://example.com");

        assert!(node_types(&graph).contains(&NodeType::Map));
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_summarize_with_url_builds_map_extract_qa_chain() {
        let graph = HeuristicMatcher::new().match_prompt("summarize https://example.com");

        assert_eq!(node_types(&graph), vec![NodeType::Map, NodeType::Extract, NodeType::Qa]);
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[0].source, "node_1");
        assert_eq!(graph.edges[0].target, "node_2");
        assert_eq!(graph.edges[1].source, "node_2");
        assert_eq!(graph.edges[1].target, "node_3");
    }

    #[test]
    fn test_map_rule_wins_over_search_rule() {
        // "summarize" is also a search/qa keyword; rule 1 must win
        let graph = HeuristicMatcher::new().match_prompt("find and summarize https://example.com");
        assert!(node_types(&graph).contains(&NodeType::Map));
        assert!(!node_types(&graph).contains(&NodeType::Search));
    }

    #[test]
    fn test_top_n_news_sets_limit() {
        let graph = HeuristicMatcher::new().match_prompt("summarize top 5 news from https://news.com");

        let extract = graph.nodes.iter().find(|n| n.node_type == NodeType::Extract).unwrap();
        assert_eq!(extract.data["limit"], 5);
        assert_eq!(extract.data["label"], "Extract Top 5 Pages");

        let qa = graph.nodes.iter().find(|n| n.node_type == NodeType::Qa).unwrap();
        let question = qa.data["question"].as_str().unwrap();
        assert!(question.contains("news"));
    }

    #[test]
    fn test_count_defaults_to_five() {
        let graph = HeuristicMatcher::new().match_prompt("summarize the news from https://news.com");

        let extract = graph.nodes.iter().find(|n| n.node_type == NodeType::Extract).unwrap();
        assert_eq!(extract.data["limit"], 5);
    }

    #[test]
    fn test_map_node_carries_detected_url() {
        let graph = HeuristicMatcher::new().match_prompt("sitemap of https://example.com/docs.");

        let map = graph.nodes.iter().find(|n| n.node_type == NodeType::Map).unwrap();
        assert_eq!(map.data["url"], "https://example.com/docs");
    }

    // ==================== rule 2: search flow ====================

    #[test]
    fn test_search_query() {
        let graph = HeuristicMatcher::new().match_prompt("search for AI news");

        assert!(!graph.nodes.is_empty());
        assert!(node_types(&graph).contains(&NodeType::Search));
    }

    #[test]
    fn test_search_seeds_query_with_full_prompt() {
        let graph = HeuristicMatcher::new().match_prompt("what is machine learning");

        let search = graph.nodes.iter().find(|n| n.node_type == NodeType::Search).unwrap();
        assert_eq!(search.data["query"], "what is machine learning");
    }

    #[test]
    fn test_search_with_crawl_chains_crawl_node() {
        let graph = HeuristicMatcher::new().match_prompt("search then crawl the docs");

        assert_eq!(node_types(&graph), vec![NodeType::Search, NodeType::Crawl, NodeType::Qa]);
        assert_eq!(graph.edges[0].source, "node_1");
        assert_eq!(graph.edges[0].target, "node_2");
        assert_eq!(graph.edges[1].source, "node_2");
        assert_eq!(graph.edges[1].target, "node_3");
    }

    #[test]
    fn test_search_with_extract_chains_extract_node() {
        let graph = HeuristicMatcher::new().match_prompt("search and extract pricing data");

        assert_eq!(node_types(&graph), vec![NodeType::Search, NodeType::Extract, NodeType::Qa]);
    }

    #[test]
    fn test_compare_query_gets_qa() {
        let graph = HeuristicMatcher::new().match_prompt("compare Python and JavaScript");

        let types = node_types(&graph);
        assert!(types.contains(&NodeType::Search));
        assert!(types.contains(&NodeType::Qa));
    }

    #[test]
    fn test_analyze_query_gets_qa() {
        let graph = HeuristicMatcher::new().match_prompt("analyze the latest tech trends");

        let types = node_types(&graph);
        assert!(types.contains(&NodeType::Search));
        assert!(types.contains(&NodeType::Qa));
    }

    #[test]
    fn test_short_search_without_qa_keyword_skips_qa() {
        // "find cats" has search intent, no qa keyword, and 9 characters
        let graph = HeuristicMatcher::new().match_prompt("find cats");

        assert_eq!(node_types(&graph), vec![NodeType::Search]);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_long_search_defaults_to_qa() {
        let graph = HeuristicMatcher::new().match_prompt("search rust web frameworks");

        assert_eq!(node_types(&graph), vec![NodeType::Search, NodeType::Qa]);
        assert_eq!(graph.edges.len(), 1);
    }

    // ==================== rule 3: crawl/extract flow ====================

    #[test]
    fn test_crawl_only() {
        let graph = HeuristicMatcher::new().match_prompt("crawl https://example.com please");

        assert_eq!(node_types(&graph), vec![NodeType::Crawl]);
        let crawl = &graph.nodes[0];
        assert_eq!(crawl.data["url"], "https://example.com");
    }

    #[test]
    fn test_extract_only() {
        let graph = HeuristicMatcher::new().match_prompt("extract from https://example.com");

        assert!(node_types(&graph).contains(&NodeType::Extract));
    }

    #[test]
    fn test_crawl_then_extract_are_chained() {
        let graph = HeuristicMatcher::new().match_prompt("crawl and extract https://example.com pages");

        assert_eq!(node_types(&graph), vec![NodeType::Crawl, NodeType::Extract]);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].source, "node_1");
        assert_eq!(graph.edges[0].target, "node_2");
    }

    #[test]
    fn test_crawl_with_summarize_and_url_prefers_map_rule() {
        // URL + summarize keyword satisfies rule 1 before the crawl rule
        let graph = HeuristicMatcher::new().match_prompt("crawl https://example.com and summarize");

        let types = node_types(&graph);
        assert!(types.contains(&NodeType::Qa));
        assert!(types.contains(&NodeType::Map) || types.contains(&NodeType::Crawl));
    }

    #[test]
    fn test_crawl_without_url_gets_empty_url() {
        let graph = HeuristicMatcher::new().match_prompt("crawl the product pages");

        let crawl = graph.nodes.iter().find(|n| n.node_type == NodeType::Crawl).unwrap();
        assert_eq!(crawl.data["url"], "");
    }

    #[test]
    fn test_extract_with_qa_keyword_appends_qa() {
        let graph = HeuristicMatcher::new().match_prompt("crawl https://example.com then qa it");

        assert_eq!(node_types(&graph), vec![NodeType::Crawl, NodeType::Qa]);
        assert_eq!(graph.edges.len(), 1);
    }

    // ==================== rule 4: default flow ====================

    #[test]
    fn test_default_fallback_is_search_plus_qa() {
        let graph = HeuristicMatcher::new().match_prompt("asdkjh");

        assert_eq!(node_types(&graph), vec![NodeType::Search, NodeType::Qa]);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].source, graph.nodes[0].id);
        assert_eq!(graph.edges[0].target, graph.nodes[1].id);
    }

    #[test]
    fn test_unknown_query_gets_default_flow() {
        let graph = HeuristicMatcher::new().match_prompt("random query without keywords");

        assert!(!graph.nodes.is_empty());
        assert!(graph.validate().is_ok());
    }

    // ==================== totality and structure ====================

    #[test]
    fn test_totality_on_degenerate_inputs() {
        let matcher = HeuristicMatcher::new();
        for prompt in ["", "   ", "\n\t", "!!!", "asdkjh"] {
            let graph = matcher.match_prompt(prompt);
            assert!(!graph.nodes.is_empty(), "no nodes for prompt {:?}", prompt);
            assert!(graph.validate().is_ok(), "invalid graph for prompt {:?}", prompt);
        }
    }

    #[test]
    fn test_nodes_have_required_fields() {
        let graph = HeuristicMatcher::new().match_prompt("search for test");

        for node in &graph.nodes {
            assert!(!node.id.is_empty());
            assert!(!node.data.is_empty());
        }
    }

    #[test]
    fn test_edges_reference_valid_nodes() {
        let graph = HeuristicMatcher::new().match_prompt("search and analyze AI");

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        for edge in &graph.edges {
            assert!(ids.contains(&edge.source.as_str()));
            assert!(ids.contains(&edge.target.as_str()));
        }
    }

    #[test]
    fn test_positions_are_incremental() {
        let graph = HeuristicMatcher::new().match_prompt("map site https://example.com and summarize");

        let xs: Vec<f64> = graph.nodes.iter().map(|n| n.position.x).collect();
        for pair in xs.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_matcher_is_deterministic() {
        let matcher = HeuristicMatcher::new();
        let a = matcher.match_prompt("summarize top 3 news from https://n.com");
        let b = matcher.match_prompt("summarize top 3 news from https://n.com");
        assert_eq!(a, b);
    }
}
