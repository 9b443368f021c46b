//! Pulls the machine-readable meal block out of the model's free-form report.
//!
//! The prompt asks the model to end its answer with
//!
//! ```text
//! @@MEAL_DATA@@
//! {"foodName": "Masala Dosa", "calories": 387}
//! @@MEAL_DATA@@
//! ```
//!
//! The block is always cut out of the prose handed back to the client, whether
//! or not its contents parse.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const SENTINEL: &str = "@@MEAL_DATA@@";

lazy_static! {
    static ref CODE_FENCE: Regex = Regex::new(r"(?s)^```[A-Za-z]*\s*(.*?)\s*```$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealFragment {
    pub food_name: String,
    #[serde(default, deserialize_with = "loose_calories")]
    pub calories: Option<f64>,
}

/// Numbers and numeric strings are taken as-is; any other value leaves the
/// meal without a calorie count rather than dropping it.
fn loose_calories<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(de)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum NoRecordReason {
    Absent,
    Unterminated,
    Malformed(String),
}

impl fmt::Display for NoRecordReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoRecordReason::Absent => f.write_str("no meal data block"),
            NoRecordReason::Unterminated => f.write_str("meal data block is not closed"),
            NoRecordReason::Malformed(e) => write!(f, "meal data block is malformed: {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Parsed {
        prose: String,
        fragment: MealFragment,
    },
    NoRecord {
        prose: String,
        reason: NoRecordReason,
    },
}

impl Extraction {
    pub fn prose(&self) -> &str {
        match self {
            Extraction::Parsed { prose, .. } | Extraction::NoRecord { prose, .. } => prose,
        }
    }
}

/// Strips the `*` the model uses for bold and bullets; the client renders plain text.
pub fn clean_markup(text: &str) -> String {
    text.replace('*', "")
}

pub fn extract(text: &str) -> Extraction {
    let Some(start) = text.find(SENTINEL) else {
        return Extraction::NoRecord {
            prose: text.trim().to_string(),
            reason: NoRecordReason::Absent,
        };
    };

    let after_open = start + SENTINEL.len();
    let Some(len) = text[after_open..].find(SENTINEL) else {
        return Extraction::NoRecord {
            prose: text[..start].trim().to_string(),
            reason: NoRecordReason::Unterminated,
        };
    };
    let end = after_open + len;
    let interior = &text[after_open..end];

    let mut prose = text[..start].trim_end().to_string();
    let rest = text[end + SENTINEL.len()..].trim();
    if !rest.is_empty() {
        if !prose.is_empty() {
            prose.push_str("\n\n");
        }
        prose.push_str(rest);
    }
    let prose = prose.trim().to_string();

    match parse_fragment(interior) {
        Ok(fragment) => Extraction::Parsed { prose, fragment },
        Err(e) => Extraction::NoRecord {
            prose,
            reason: NoRecordReason::Malformed(e.to_string()),
        },
    }
}

fn parse_fragment(interior: &str) -> Result<MealFragment, serde_json::Error> {
    let interior = interior.trim();
    let json = CODE_FENCE
        .captures(interior)
        .and_then(|c| c.get(1))
        .map_or(interior, |m| m.as_str());
    serde_json::from_str(json)
}
