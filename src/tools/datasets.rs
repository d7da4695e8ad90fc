//! Financial Datasets query tools, driven by a declarative catalogue.
//!
//! Each entry in [`CATALOG`] names one remote endpoint and its parameter
//! spec (required/default markers included). A single generic
//! [`DatasetQuery`] tool does the dispatch: merge supplied arguments over
//! declared defaults, drop optional parameters that were never set, and
//! hand the shaped map to the client. No domain validation happens here;
//! the remote service owns that.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::Tool;
use crate::datasets::FinancialDatasetsClient;

/// Scalar type of a query parameter, for schema generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Str,
    Int,
    Float,
}

impl ParamKind {
    fn json_type(self) -> &'static str {
        match self {
            ParamKind::Str => "string",
            ParamKind::Int => "integer",
            ParamKind::Float => "number",
        }
    }
}

/// Default value for an optional parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Str(&'static str),
    Int(i64),
}

impl DefaultValue {
    fn to_value(self) -> Value {
        match self {
            DefaultValue::Str(s) => Value::String(s.to_string()),
            DefaultValue::Int(i) => Value::Number(i.into()),
        }
    }
}

/// One declared parameter of a catalogue entry.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<DefaultValue>,
}

/// One named, parameterized read-only query against the datasets API.
#[derive(Debug, Clone, Copy)]
pub struct QuerySpec {
    pub name: &'static str,
    pub description: &'static str,
    pub endpoint: &'static str,
    pub params: &'static [ParamSpec],
}

impl QuerySpec {
    /// Merge supplied arguments over declared defaults.
    ///
    /// Parameters left unset with no default are absent from the result,
    /// never present as null or empty.
    pub fn shape_params(&self, args: &Value) -> Map<String, Value> {
        let supplied = args.as_object();
        let mut shaped = Map::new();

        for param in self.params {
            let value = supplied
                .and_then(|m| m.get(param.name))
                .filter(|v| !v.is_null())
                .cloned()
                .or_else(|| param.default.map(DefaultValue::to_value));

            if let Some(value) = value {
                shaped.insert(param.name.to_string(), value);
            }
        }

        shaped
    }

    /// JSON schema for the runtime's tool selection.
    pub fn parameters_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in self.params {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(param.kind.json_type()));
            prop.insert("description".to_string(), json!(param.description));
            if let Some(default) = param.default {
                prop.insert("default".to_string(), default.to_value());
            }
            properties.insert(param.name.to_string(), Value::Object(prop));

            if param.required {
                required.push(param.name);
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// The fixed catalogue of Financial Datasets queries.
pub const CATALOG: &[QuerySpec] = &[
    QuerySpec {
        name: "market_screener",
        description: "Finds top-performing stocks for a market. Use this first to identify \
                      candidates (e.g. country=IN, period=1d, min_change_percent=3.0 for \
                      Indian momentum stocks).",
        endpoint: "market/screener",
        params: &[
            ParamSpec {
                name: "country",
                kind: ParamKind::Str,
                description: "ISO country code of the market, e.g. IN",
                required: true,
                default: None,
            },
            ParamSpec {
                name: "period",
                kind: ParamKind::Str,
                description: "Change-over period to screen by, e.g. 1d",
                required: true,
                default: None,
            },
            ParamSpec {
                name: "min_change_percent",
                kind: ParamKind::Float,
                description: "Minimum percent change over the period",
                required: true,
                default: None,
            },
            ParamSpec {
                name: "limit",
                kind: ParamKind::Int,
                description: "Maximum number of results",
                required: false,
                default: Some(DefaultValue::Int(10)),
            },
        ],
    },
    QuerySpec {
        name: "income_statements",
        description: "Get income statements for a ticker. Indian listings use the .NS or .BO \
                      suffix (e.g. TCS.NS).",
        endpoint: "financials/income-statements",
        params: &[
            ParamSpec {
                name: "ticker",
                kind: ParamKind::Str,
                description: "Ticker symbol, e.g. TCS.NS",
                required: true,
                default: None,
            },
            ParamSpec {
                name: "period",
                kind: ParamKind::Str,
                description: "Reporting period: annual, quarterly or ttm",
                required: false,
                default: Some(DefaultValue::Str("annual")),
            },
            ParamSpec {
                name: "limit",
                kind: ParamKind::Int,
                description: "Maximum number of statements",
                required: false,
                default: Some(DefaultValue::Int(10)),
            },
        ],
    },
    QuerySpec {
        name: "balance_sheets",
        description: "Get balance sheets for a ticker. Indian listings use the .NS or .BO suffix.",
        endpoint: "financials/balance-sheets",
        params: &[
            ParamSpec {
                name: "ticker",
                kind: ParamKind::Str,
                description: "Ticker symbol, e.g. TCS.NS",
                required: true,
                default: None,
            },
            ParamSpec {
                name: "period",
                kind: ParamKind::Str,
                description: "Reporting period: annual, quarterly or ttm",
                required: false,
                default: Some(DefaultValue::Str("annual")),
            },
            ParamSpec {
                name: "limit",
                kind: ParamKind::Int,
                description: "Maximum number of statements",
                required: false,
                default: Some(DefaultValue::Int(10)),
            },
        ],
    },
    QuerySpec {
        name: "cash_flow_statements",
        description: "Get cash flow statements for a ticker. Indian listings use the .NS or .BO \
                      suffix.",
        endpoint: "financials/cash-flow-statements",
        params: &[
            ParamSpec {
                name: "ticker",
                kind: ParamKind::Str,
                description: "Ticker symbol, e.g. TCS.NS",
                required: true,
                default: None,
            },
            ParamSpec {
                name: "period",
                kind: ParamKind::Str,
                description: "Reporting period: annual, quarterly or ttm",
                required: false,
                default: Some(DefaultValue::Str("annual")),
            },
            ParamSpec {
                name: "limit",
                kind: ParamKind::Int,
                description: "Maximum number of statements",
                required: false,
                default: Some(DefaultValue::Int(10)),
            },
        ],
    },
    QuerySpec {
        name: "company_info",
        description: "Get company information for a ticker (use .NS or .BO for Indian listings).",
        endpoint: "company",
        params: &[ParamSpec {
            name: "ticker",
            kind: ParamKind::Str,
            description: "Ticker symbol, e.g. RELIANCE.NS",
            required: true,
            default: None,
        }],
    },
    QuerySpec {
        name: "news",
        description: "Get market news, optionally filtered by ticker (e.g. RELIANCE.NS to focus \
                      on one Indian company).",
        endpoint: "news",
        params: &[
            ParamSpec {
                name: "ticker",
                kind: ParamKind::Str,
                description: "Optional ticker to filter news by",
                required: false,
                default: None,
            },
            ParamSpec {
                name: "limit",
                kind: ParamKind::Int,
                description: "Maximum number of articles",
                required: false,
                default: Some(DefaultValue::Int(50)),
            },
        ],
    },
    QuerySpec {
        name: "stock_prices",
        description: "Get stock prices for a ticker. Indian listings use the .NS or .BO suffix \
                      (e.g. RELIANCE.NS).",
        endpoint: "prices",
        params: &[
            ParamSpec {
                name: "ticker",
                kind: ParamKind::Str,
                description: "Ticker symbol, e.g. RELIANCE.NS",
                required: true,
                default: None,
            },
            ParamSpec {
                name: "interval",
                kind: ParamKind::Str,
                description: "Bar interval, e.g. 1d",
                required: false,
                default: Some(DefaultValue::Str("1d")),
            },
            ParamSpec {
                name: "limit",
                kind: ParamKind::Int,
                description: "Maximum number of bars",
                required: false,
                default: Some(DefaultValue::Int(100)),
            },
        ],
    },
    QuerySpec {
        name: "search_tickers",
        description: "Search for tickers matching a query (e.g. 'Reliance Industries India').",
        endpoint: "search",
        params: &[
            ParamSpec {
                name: "query",
                kind: ParamKind::Str,
                description: "Free-text search query",
                required: true,
                default: None,
            },
            ParamSpec {
                name: "limit",
                kind: ParamKind::Int,
                description: "Maximum number of matches",
                required: false,
                default: Some(DefaultValue::Int(10)),
            },
        ],
    },
    QuerySpec {
        name: "sec_filings",
        description: "Get SEC filings for a ticker. Primarily useful for Indian companies with \
                      US listings (ADRs).",
        endpoint: "sec-filings",
        params: &[
            ParamSpec {
                name: "ticker",
                kind: ParamKind::Str,
                description: "Ticker symbol",
                required: true,
                default: None,
            },
            ParamSpec {
                name: "form_type",
                kind: ParamKind::Str,
                description: "Optional form type filter, e.g. 10-K",
                required: false,
                default: None,
            },
            ParamSpec {
                name: "limit",
                kind: ParamKind::Int,
                description: "Maximum number of filings",
                required: false,
                default: Some(DefaultValue::Int(50)),
            },
        ],
    },
];

/// Generic dispatcher: one instance per [`CATALOG`] row.
pub struct DatasetQuery {
    spec: &'static QuerySpec,
    client: FinancialDatasetsClient,
}

impl DatasetQuery {
    pub fn new(spec: &'static QuerySpec, client: FinancialDatasetsClient) -> Self {
        Self { spec, client }
    }
}

#[async_trait]
impl Tool for DatasetQuery {
    fn name(&self) -> &str {
        self.spec.name
    }

    fn description(&self) -> &str {
        self.spec.description
    }

    fn parameters_schema(&self) -> Value {
        self.spec.parameters_schema()
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let params = self.spec.shape_params(&args);
        // Never an Err: the client serializes its own failures.
        Ok(self.client.fetch(self.spec.endpoint, &params).await)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::datasets::{ApiError, ApiErrorKind};

    fn catalog_spec(name: &str) -> &'static QuerySpec {
        CATALOG
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("no catalogue entry named {}", name))
    }

    #[test]
    fn income_statements_applies_defaults_over_missing_args() {
        let spec = catalog_spec("income_statements");
        let shaped = spec.shape_params(&json!({"ticker": "TCS.NS"}));

        let expected: Map<String, Value> =
            json!({"ticker": "TCS.NS", "period": "annual", "limit": 10})
                .as_object()
                .unwrap()
                .clone();
        assert_eq!(shaped, expected);
    }

    #[test]
    fn supplied_arguments_win_over_defaults() {
        let spec = catalog_spec("stock_prices");
        let shaped =
            spec.shape_params(&json!({"ticker": "RELIANCE.NS", "interval": "1w", "limit": 5}));

        assert_eq!(shaped["interval"], "1w");
        assert_eq!(shaped["limit"], 5);
    }

    #[test]
    fn unset_optional_parameters_are_entirely_absent() {
        let spec = catalog_spec("news");
        let shaped = spec.shape_params(&json!({}));

        assert!(!shaped.contains_key("ticker"));
        assert_eq!(shaped.len(), 1);
        assert_eq!(shaped["limit"], 50);
    }

    #[test]
    fn null_argument_counts_as_unset() {
        let spec = catalog_spec("news");
        let shaped = spec.shape_params(&json!({"ticker": null}));
        assert!(!shaped.contains_key("ticker"));
    }

    #[test]
    fn undeclared_arguments_are_dropped() {
        let spec = catalog_spec("company_info");
        let shaped = spec.shape_params(&json!({"ticker": "INFY.NS", "verbose": true}));
        assert_eq!(shaped.len(), 1);
        assert_eq!(shaped["ticker"], "INFY.NS");
    }

    #[test]
    fn required_parameters_without_defaults_stay_out_when_missing() {
        // Validation is the remote service's job; the screener just omits
        // whatever the agent did not supply.
        let spec = catalog_spec("market_screener");
        let shaped = spec.shape_params(&json!({"country": "IN"}));
        assert_eq!(shaped.len(), 2);
        assert_eq!(shaped["country"], "IN");
        assert_eq!(shaped["limit"], 10);
    }

    #[test]
    fn schema_marks_required_and_carries_defaults() {
        let spec = catalog_spec("market_screener");
        let schema = spec.parameters_schema();

        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["country", "period", "min_change_percent"]);

        assert_eq!(schema["properties"]["limit"]["default"], 10);
        assert_eq!(schema["properties"]["min_change_percent"]["type"], "number");
        assert_eq!(schema["properties"]["country"]["type"], "string");
    }

    #[tokio::test]
    async fn execute_returns_ok_even_without_a_credential() {
        let spec = catalog_spec("company_info");
        let tool = DatasetQuery::new(spec, FinancialDatasetsClient::new(None));

        let out = tool
            .execute(json!({"ticker": "TCS.NS"}))
            .await
            .expect("dataset tools never raise");

        let err: ApiError = serde_json::from_str(&out).unwrap();
        assert_eq!(err.kind, ApiErrorKind::Config);
    }
}
