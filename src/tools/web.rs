//! Web search tool backed by DuckDuckGo HTML.
//!
//! Used by the web-search agent for the unstructured side of the analysis:
//! recent news, sector trends, and outlook. Results always carry their
//! source URL so the agent can cite them.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

/// Search the web via the DuckDuckGo HTML endpoint.
pub struct WebSearch;

/// A single parsed search result.
#[derive(Debug)]
struct SearchHit {
    title: String,
    snippet: String,
    url: String,
}

#[async_trait]
impl Tool for WebSearch {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for real-time and unstructured information: recent news, sector \
         outlook, and growth drivers. Returns titles, snippets and source URLs. Always cite \
         the returned sources."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query, e.g. 'future of Indian IT sector'"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of results (default: 5, max: 10)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let query = args["query"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'query' argument"))?;
        let max_results = args["max_results"].as_u64().unwrap_or(5).clamp(1, 10) as usize;

        let html = fetch_results_page(query).await?;

        if html.contains("anomaly-modal") || html.contains("Unfortunately, bots") {
            anyhow::bail!("DuckDuckGo blocked the request with a CAPTCHA; try again later");
        }

        let hits = parse_results(&html, max_results);
        if hits.is_empty() {
            return Ok(format!("No results found for: {}", query));
        }

        Ok(format_hits(&hits))
    }
}

/// Fetch the raw DuckDuckGo HTML results page.
async fn fetch_results_page(query: &str) -> anyhow::Result<String> {
    let url = format!(
        "https://html.duckduckgo.com/html/?q={}",
        urlencoding::encode(query)
    );

    let client = reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (compatible; finagent/0.1)")
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        anyhow::bail!("DuckDuckGo returned HTTP {}", response.status());
    }

    Ok(response.text().await?)
}

/// Extract up to `max_results` hits from the results page markup.
fn parse_results(html: &str, max_results: usize) -> Vec<SearchHit> {
    let mut hits = Vec::new();

    for chunk in html.split("class=\"result__body\"").skip(1) {
        if hits.len() >= max_results {
            break;
        }

        let title = field_after(chunk, "class=\"result__a\"");
        let snippet = field_after(chunk, "class=\"result__snippet\"");
        let url = field_after(chunk, "class=\"result__url\"");

        if let Some(title) = title {
            hits.push(SearchHit {
                title: html_decode(&title),
                snippet: html_decode(snippet.as_deref().unwrap_or("")),
                url: url.map(|u| u.trim().to_string()).unwrap_or_default(),
            });
        }
    }

    hits
}

/// Pull the text content of the first element following `marker`.
fn field_after(chunk: &str, marker: &str) -> Option<String> {
    let text = chunk
        .split(marker)
        .nth(1)?
        .split('>')
        .nth(1)?
        .split('<')
        .next()?;

    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Render hits as a numbered, source-attributed list.
fn format_hits(hits: &[SearchHit]) -> String {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "{}. **{}**\n{}\nSource: {}",
                i + 1,
                hit.title,
                hit.snippet,
                hit.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Basic HTML entity decoding.
fn html_decode(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}
