//! JSON/YAML codec for node trees.
//!
//! The wire schema follows the style model's serde attributes: enums as
//! their CSS spellings, `-1` as the auto sentinel on numeric lengths,
//! default-valued fields omitted, transforms as `{a,b,c,d,e,f}` and grid
//! tracks as `{minSize, maxSize, fraction}` with repeats carrying
//! `{count, tracks}`.

use crate::error::Result;
use crate::node::Node;

/// Serializes a node tree to JSON.
pub fn to_json(node: &Node) -> Result<String> {
  Ok(serde_json::to_string(node)?)
}

/// Serializes a node tree to pretty-printed JSON.
pub fn to_json_pretty(node: &Node) -> Result<String> {
  Ok(serde_json::to_string_pretty(node)?)
}

/// Deserializes a node tree from JSON.
pub fn from_json(json: &str) -> Result<Node> {
  Ok(serde_json::from_str(json)?)
}

/// Serializes a node tree to YAML.
pub fn to_yaml(node: &Node) -> Result<String> {
  Ok(serde_yaml::to_string(node)?)
}

/// Deserializes a node tree from YAML.
pub fn from_yaml(yaml: &str) -> Result<Node> {
  Ok(serde_yaml::from_str(yaml)?)
}
