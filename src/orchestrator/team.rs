//! Declarative configuration of the analysis team.
//!
//! Roles, instructions, and tool assignments are data, not code: the specs
//! below are serialized into every runtime request. Nothing in this crate
//! interprets them.

use serde::{Deserialize, Serialize};

/// One member agent of the team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    pub role: String,
    pub instructions: Vec<String>,
    /// Names of registry tools this agent may call.
    pub tools: Vec<String>,
}

/// The coordinated team handed to the runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSpec {
    pub name: String,
    pub instructions: Vec<String>,
    pub success_criteria: String,
    pub markdown: bool,
    pub members: Vec<AgentSpec>,
}

/// The Indian-market analysis team: a financial analyst over the datasets
/// tools and a web-search agent for qualitative context, coordinated by a
/// reasoning team leader.
pub fn analysis_team() -> TeamSpec {
    let financial_analyst = AgentSpec {
        name: "Financial Analyst Agent".to_string(),
        role: "Analyzes financial data, market trends, and company performance to provide \
               investment insights for the Indian market (NSE/BSE)."
            .to_string(),
        instructions: vec![
            "Initial screen: use the market_screener tool first to identify top gainers from \
             the previous day's trends (country=IN, period=1d)."
                .to_string(),
            "Filter and select: choose 3-5 of the most promising large-cap or mid-cap \
             companies from the screener results."
                .to_string(),
            "Fundamental analysis: use the financial statement tools for deep fundamental \
             analysis of the selected tickers (remember the .NS/.BO suffix)."
                .to_string(),
            "Qualitative analysis: if necessary, ask the Web Search Agent for the latest \
             news, sector outlook, and future growth drivers of the selected companies."
                .to_string(),
            "Analyst Score: include a 1-10 score per recommendation, weighting fundamental \
             health (profitability, debt/equity, cash flow) and future outlook/news \
             sentiment equally."
                .to_string(),
            "Use tables to display data and give a concise rationale for each \
             recommendation."
                .to_string(),
        ],
        tools: vec![
            "market_screener".to_string(),
            "income_statements".to_string(),
            "balance_sheets".to_string(),
            "cash_flow_statements".to_string(),
            "company_info".to_string(),
            "news".to_string(),
            "stock_prices".to_string(),
            "search_tickers".to_string(),
            "sec_filings".to_string(),
        ],
    };

    let web_agent = AgentSpec {
        name: "Web Search Agent".to_string(),
        role: "Handles web search requests for real-time and unstructured data, especially \
               recent news, sector trends, and future outlook for Indian companies."
            .to_string(),
        instructions: vec![
            "Always include sources.".to_string(),
            "Focus search queries on the Indian stock market (e.g. 'future of Indian IT \
             sector', 'recent news for TCS India')."
                .to_string(),
            "Do not scrape lists of top gainers; the analyst's market screen covers that."
                .to_string(),
        ],
        tools: vec!["web_search".to_string()],
    };

    TeamSpec {
        name: "Reasoning Finance Team Leader".to_string(),
        instructions: vec![
            "Use tables to display data.".to_string(),
            "Provide the analysis and recommendations clearly, including the Analyst Score."
                .to_string(),
        ],
        success_criteria: "The team has identified and analyzed promising Indian stocks for \
                           long-term investment, providing a rationale and the Analyst Score \
                           for each."
            .to_string(),
        markdown: true,
        members: vec![web_agent, financial_analyst],
    }
}
