// UI models module
// Calendar view granularities the layout engine serves

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    Day,
    Week,
    Month,
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewType::Day => "day",
            ViewType::Week => "week",
            ViewType::Month => "month",
        };
        f.write_str(name)
    }
}

impl FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(ViewType::Day),
            "week" => Ok(ViewType::Week),
            "month" => Ok(ViewType::Month),
            other => Err(format!("Unknown view type '{}'", other)),
        }
    }
}
