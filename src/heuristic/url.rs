use regex::Regex;

/// Regex pattern for URLs in free text
/// Format: `scheme://` followed by anything up to the next whitespace
const URL_PATTERN: &str = r"[A-Za-z][A-Za-z0-9+.-]*://\S+";
/// Regex pattern for an item count qualifier
/// Format: an integer followed by a counting keyword, e.g. `top 5 news`
const COUNT_PATTERN: &str = r"(\d+)\s*(top|latest|recent|urls?|results?|news)";

/// Returns the first URL found in the text, with trailing sentence
/// punctuation stripped. Only the first match matters; multi-URL prompts
/// are not specially handled.
pub fn detect_url(text: &str) -> Option<String> {
    let re = Regex::new(URL_PATTERN).unwrap();
    re.find(text).map(|m| m.as_str().trim_end_matches(['.', ',', ';']).to_string()).filter(|url| !url.is_empty())
}

/// Extracts an item count like "top 5 news" or "3 results" from the text.
pub fn extract_count(text: &str) -> Option<u64> {
    let re = Regex::new(COUNT_PATTERN).unwrap();
    re.captures(text).and_then(|caps| caps[1].parse().ok())
}
