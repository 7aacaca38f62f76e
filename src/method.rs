use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::FormError;

/// The methods offered by the form's selection control.
///
/// This is the MCP handshake and tool family the bridge answers. Nothing checks
/// that the server actually implements a chosen method.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RpcMethod {
    #[serde(rename = "initialize")]
    Initialize,
    #[default]
    #[serde(rename = "tools/list")]
    ToolsList,
    #[serde(rename = "tools/call")]
    ToolsCall,
    #[serde(rename = "resources/list")]
    ResourcesList,
    #[serde(rename = "prompts/list")]
    PromptsList,
}

impl RpcMethod {
    /// Every selectable method, in display order.
    pub const ALL: [RpcMethod; 5] = [
        RpcMethod::ToolsList,
        RpcMethod::ToolsCall,
        RpcMethod::Initialize,
        RpcMethod::ResourcesList,
        RpcMethod::PromptsList,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RpcMethod::Initialize => "initialize",
            RpcMethod::ToolsList => "tools/list",
            RpcMethod::ToolsCall => "tools/call",
            RpcMethod::ResourcesList => "resources/list",
            RpcMethod::PromptsList => "prompts/list",
        }
    }

    /// Example params text shown next to the params field.
    pub fn params_template(&self) -> &'static str {
        match self {
            RpcMethod::Initialize => r#"{"protocolVersion": "2024-11-05"}"#,
            RpcMethod::ToolsCall => {
                r#"{"name": "airbnb_search", "arguments": {"location": "San Francisco"}}"#
            }
            RpcMethod::ToolsList | RpcMethod::ResourcesList | RpcMethod::PromptsList => "{}",
        }
    }
}

impl FromStr for RpcMethod {
    type Err = FormError;

    fn from_str(input: &str) -> Result<RpcMethod, Self::Err> {
        let wanted = input.trim();
        RpcMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| FormError::unknown_method(wanted))
    }
}

impl fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for method in RpcMethod::ALL {
            assert_eq!(method.as_str().parse::<RpcMethod>().unwrap(), method);
        }
    }

    #[test]
    fn unknown_method_is_rejected() {
        let err = "tools/delete".parse::<RpcMethod>().unwrap_err();
        assert!(matches!(err, FormError::UnknownMethod { ref name } if name == "tools/delete"));
    }

    #[test]
    fn templates_are_valid_params() {
        for method in RpcMethod::ALL {
            let parsed = crate::params::parse_params(method.params_template());
            assert!(parsed.is_ok(), "template for {method} must parse");
        }
    }

    #[test]
    fn serde_uses_wire_names() {
        let encoded = serde_json::to_string(&RpcMethod::ResourcesList).unwrap();
        assert_eq!(encoded, r#""resources/list""#);
    }
}
