use crate::core::error::{ConfigError, ReleaseError, ReleaseResult};
use crate::release::version::LibwebrtcVersion;
use serde_json::{Map, Value};

/// Contents of `WebRTC.xcframework/build_info.json`
///
/// Values are kept as raw JSON; strings and numbers both read back as text.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildInfo(Map<String, Value>);

impl BuildInfo {
  pub fn from_slice(bytes: &[u8]) -> ReleaseResult<Self> {
    match serde_json::from_slice::<Value>(bytes)? {
      Value::Object(map) => Ok(Self(map)),
      other => Err(ReleaseError::message(format!(
        "build_info.json must be a JSON object, found {}",
        json_kind(&other)
      ))),
    }
  }

  /// Textual form of `key`; `None` when absent or null
  pub fn get(&self, key: &str) -> Option<String> {
    match self.0.get(key)? {
      Value::String(s) => Some(s.clone()),
      Value::Null => None,
      Value::Number(n) => Some(n.to_string()),
      Value::Bool(b) => Some(b.to_string()),
      other => Some(other.to_string()),
    }
  }

  pub fn require(&self, key: &str) -> ReleaseResult<String> {
    self.get(key).ok_or_else(|| {
      ReleaseError::Config(ConfigError::MissingField {
        field: key.to_string(),
      })
    })
  }

  /// Fields that disagree with `version`: `branch` against `M<major>`, then `commit` and `maint`
  pub fn mismatches(&self, version: &LibwebrtcVersion) -> Vec<String> {
    let expected = [
      ("branch", version.branch_name()),
      ("commit", version.commit.to_string()),
      ("maint", version.maint.to_string()),
    ];

    expected
      .into_iter()
      .filter(|(key, want)| self.get(key).as_deref() != Some(want.as_str()))
      .map(|(key, _)| key.to_string())
      .collect()
  }

  pub fn matches(&self, version: &LibwebrtcVersion) -> bool {
    self.mismatches(version).is_empty()
  }
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
