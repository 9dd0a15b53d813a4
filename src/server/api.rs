//! JSON payload builders and query-string parsing for the ambitions API.

use std::fmt;

use serde::Serialize;

use crate::data::dataset::AmbitionDataset;
use crate::data::model::Ambition;
use crate::viewer::filter::{self, AmbitionView, FilterQuery};
use crate::viewer::Selection;

#[derive(Debug)]
pub enum ApiError {
    /// Malformed query value; maps to 400.
    Query(String),
    /// Payload serialization failure; maps to 500.
    Serialize(serde_json::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(msg) => write!(f, "{msg}"),
            Self::Serialize(err) => write!(f, "unable to serialize response: {err}"),
        }
    }
}

impl std::error::Error for ApiError {}

pub fn health_payload(dataset: &AmbitionDataset) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "oldworld-ambitions",
        "version": env!("CARGO_PKG_VERSION"),
        "ambitions": dataset.ambitions.len(),
        "nations": dataset.nations.len(),
    }))
}

/// Decode one query component: '+' as space plus %XX escapes. Invalid
/// escapes pass through untouched.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hex = bytes.get(i + 1..i + 3).and_then(|pair| {
                    std::str::from_utf8(pair)
                        .ok()
                        .and_then(|s| u8::from_str_radix(s, 16).ok())
                });
                match hex {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn query_pairs(path: &str) -> Vec<(String, String)> {
    let query = path.split('?').nth(1).unwrap_or("");
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = decode_component(parts.next().unwrap_or(""));
            let value = decode_component(parts.next().unwrap_or(""));
            (key, value)
        })
        .collect()
}

fn parse_bound(key: &str, value: &str) -> Result<u32, ApiError> {
    let bound: u32 = value
        .parse()
        .map_err(|_| ApiError::Query(format!("'{key}' must be an integer, got '{value}'")))?;
    if bound > 9 {
        return Err(ApiError::Query(format!("'{key}' must be 0..=9, got {bound}")));
    }
    Ok(bound)
}

/// Parse `/api/ambitions` query parameters into viewer inputs. Unknown keys
/// are ignored; malformed values for known keys are a 400.
pub fn parse_ambitions_query(path: &str) -> Result<(Selection, FilterQuery), ApiError> {
    let mut selection = Selection::default();
    let mut query = FilterQuery::default();

    for (key, value) in query_pairs(path) {
        match key.as_str() {
            "nation" => {
                if !value.is_empty() {
                    selection.nation = Some(value);
                }
            }
            "families" => {
                for family_class in value.split(',').filter(|fc| !fc.is_empty()) {
                    selection.add_family_class(family_class);
                }
            }
            "min" => query.accepted_min = parse_bound("min", &value)?,
            "max" => query.accepted_max = parse_bound("max", &value)?,
            "class" => {
                query.ambition_class = Some(value.parse().map_err(|_| {
                    ApiError::Query(format!("'class' must be an integer, got '{value}'"))
                })?);
            }
            "search" => query.search = value,
            "show_unavailable" => {
                query.show_unavailable = matches!(value.as_str(), "1" | "true");
            }
            _ => {}
        }
    }

    if query.accepted_min > query.accepted_max {
        return Err(ApiError::Query(format!(
            "'min' must not exceed 'max' ({} > {})",
            query.accepted_min, query.accepted_max
        )));
    }
    Ok((selection, query))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AmbitionItem<'a> {
    #[serde(flatten)]
    ambition: &'a Ambition,
    available: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unavailable_reasons: Vec<String>,
}

impl<'a> From<AmbitionView<'a>> for AmbitionItem<'a> {
    fn from(view: AmbitionView<'a>) -> AmbitionItem<'a> {
        AmbitionItem {
            ambition: view.ambition,
            available: view.availability.available,
            unavailable_reasons: view.availability.reasons,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AmbitionsResponse<'a> {
    summary: String,
    regular_total: usize,
    regular_available: usize,
    national_total: usize,
    national_available: usize,
    ambitions: Vec<AmbitionItem<'a>>,
    national_ambitions: Vec<AmbitionItem<'a>>,
}

pub fn ambitions_payload(path: &str, dataset: &AmbitionDataset) -> Result<String, ApiError> {
    let (selection, query) = parse_ambitions_query(path)?;
    let result = filter::run_query(dataset, &selection, &query);

    let response = AmbitionsResponse {
        summary: result.summary(),
        regular_total: result.regular_total,
        regular_available: result.regular_available,
        national_total: result.national_total,
        national_available: result.national_available,
        ambitions: result.regular.into_iter().map(AmbitionItem::from).collect(),
        national_ambitions: result.national.into_iter().map(AmbitionItem::from).collect(),
    };
    serde_json::to_string_pretty(&response).map_err(ApiError::Serialize)
}

/// Pick lists for the viewer controls: nations, family classes, categories.
pub fn nations_payload(dataset: &AmbitionDataset) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "nations": dataset.nations.values().collect::<Vec<_>>(),
        "familyClasses": dataset.family_classes.values().collect::<Vec<_>>(),
        "ambitionClasses": dataset.ambition_classes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plus_and_percent_escapes() {
        assert_eq!(decode_component("six+cities"), "six cities");
        assert_eq!(decode_component("wine%2Ciron"), "wine,iron");
        assert_eq!(decode_component("bad%zzescape"), "bad%zzescape");
    }

    #[test]
    fn parses_full_query_into_selection_and_filter() {
        let (selection, query) = parse_ambitions_query(
            "/api/ambitions?nation=NATION_ROME&families=FAMILYCLASS_SAGES,FAMILYCLASS_TRADERS\
             &min=2&max=7&class=3&search=stone+quarry&show_unavailable=0",
        )
        .unwrap();
        assert_eq!(selection.nation.as_deref(), Some("NATION_ROME"));
        assert_eq!(selection.family_classes.len(), 2);
        assert_eq!((query.accepted_min, query.accepted_max), (2, 7));
        assert_eq!(query.ambition_class, Some(3));
        assert_eq!(query.search, "stone quarry");
        assert!(!query.show_unavailable);
    }

    #[test]
    fn bare_path_yields_defaults() {
        let (selection, query) = parse_ambitions_query("/api/ambitions").unwrap();
        assert_eq!(selection, Selection::default());
        assert_eq!(query, FilterQuery::default());
    }

    #[test]
    fn malformed_bounds_are_query_errors() {
        assert!(matches!(
            parse_ambitions_query("/api/ambitions?min=abc"),
            Err(ApiError::Query(_))
        ));
        assert!(matches!(
            parse_ambitions_query("/api/ambitions?max=12"),
            Err(ApiError::Query(_))
        ));
        assert!(matches!(
            parse_ambitions_query("/api/ambitions?min=5&max=2"),
            Err(ApiError::Query(_))
        ));
    }
}
