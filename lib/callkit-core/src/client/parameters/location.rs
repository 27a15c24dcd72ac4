use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a parameter is placed in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// Substituted into the route template, e.g. `/users/{id}`.
    Path,
    /// Appended to the query string.
    Query,
    /// Sent as a request header.
    Header,
    /// Sent as a cookie.
    Cookie,
    /// Sent as the request body.
    Body,
}

impl ParamLocation {
    /// The lowercase wire name of the location.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Cookie => "cookie",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown location name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
#[display("Unknown parameter location '{location}'")]
pub struct InvalidLocation {
    /// The rejected input.
    pub location: String,
}

impl FromStr for ParamLocation {
    type Err = InvalidLocation;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let location = match value {
            "path" => Self::Path,
            "query" => Self::Query,
            "header" => Self::Header,
            "cookie" => Self::Cookie,
            "body" => Self::Body,
            _ => {
                return Err(InvalidLocation {
                    location: value.to_string(),
                });
            }
        };
        Ok(location)
    }
}
