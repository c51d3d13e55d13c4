use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `nodeType` value that carries sector and fundamentals.
pub const FIRM_NODE_TYPE: &str = "Firm";
/// `extraDetails` sentinel meaning "no sub-label".
pub const UNKNOWN_DETAILS: &str = "unknown";

/// Node record handed over by the graph renderer at hover time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDisplayData {
    pub label: String,
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    /// Presence flag; any truthy JSON value counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fundamentals: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ebitda: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ebitda_change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_value_change: Option<f64>,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: String,
}

/// Financial metrics shown for firms. Missing numbers are NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fundamentals {
    pub ebitda: f64,
    pub ebitda_change: f64,
    pub market_value: f64,
    pub market_value_change: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeCategory<'a> {
    Firm {
        sector: &'a str,
        ticker: &'a str,
        fundamentals: Option<Fundamentals>,
    },
    Other(&'a str),
}

impl NodeCategory<'_> {
    pub fn fundamentals(&self) -> Option<&Fundamentals> {
        match self {
            NodeCategory::Firm { fundamentals, .. } => fundamentals.as_ref(),
            NodeCategory::Other(_) => None,
        }
    }

    pub fn has_fundamentals(&self) -> bool {
        self.fundamentals().is_some()
    }
}

impl NodeDisplayData {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn category(&self) -> NodeCategory<'_> {
        if self.node_type != FIRM_NODE_TYPE {
            return NodeCategory::Other(&self.node_type);
        }
        let fundamentals = self
            .fundamentals
            .as_ref()
            .is_some_and(is_truthy)
            .then(|| Fundamentals {
                ebitda: self.ebitda.unwrap_or(f64::NAN),
                ebitda_change: self.ebitda_change.unwrap_or(f64::NAN),
                market_value: self.market_value.unwrap_or(f64::NAN),
                market_value_change: self.market_value_change.unwrap_or(f64::NAN),
            });
        NodeCategory::Firm {
            sector: self.sector.as_deref().unwrap_or_default(),
            ticker: self.ticker.as_deref().unwrap_or_default(),
            fundamentals,
        }
    }

    /// Label, with the ticker appended for firms that show fundamentals.
    pub fn main_label(&self) -> String {
        match self.category() {
            NodeCategory::Firm {
                ticker,
                fundamentals: Some(_),
                ..
            } if self.ticker.is_some() => format!("{} ({})", self.label, ticker),
            _ => self.label.clone(),
        }
    }

    pub fn sub_label(&self) -> Option<&str> {
        self.extra_details
            .as_deref()
            .filter(|details| !details.is_empty() && *details != UNKNOWN_DETAILS)
    }

    /// Sector for firms, the node type itself for everything else.
    pub fn category_label(&self) -> &str {
        match self.category() {
            NodeCategory::Firm { sector, .. } => sector,
            NodeCategory::Other(node_type) => node_type,
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(num) => num.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
