use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Echo returned by httpbin-style `/get` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpBinResponse {
    pub args: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub origin: String,
    pub url: String,
}

impl HttpBinResponse {
    /// Human-readable report, headers and arguments sorted by name.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HttpBinResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Response ===")?;
        writeln!(f, "URL: {}", self.url)?;
        writeln!(f, "Origin: {}", self.origin)?;

        writeln!(f, "\nHeaders:")?;
        for (name, value) in &self.headers {
            writeln!(f, "  {}: {}", name, value)?;
        }

        if !self.args.is_empty() {
            writeln!(f, "\nArguments:")?;
            for (name, value) in &self.args {
                writeln!(f, "  {}: {}", name, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "args": {"q": "rust"},
        "headers": {"User-Agent": "chunkdrain/0.1.0", "Accept": "*/*"},
        "origin": "203.0.113.7",
        "url": "https://httpbin.org/get?q=rust"
    }"#;

    #[test]
    fn renders_sorted_report() {
        let response: HttpBinResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(
            response.render(),
            "=== Response ===\n\
             URL: https://httpbin.org/get?q=rust\n\
             Origin: 203.0.113.7\n\
             \n\
             Headers:\n  \
             Accept: */*\n  \
             User-Agent: chunkdrain/0.1.0\n\
             \n\
             Arguments:\n  \
             q: rust\n"
        );
    }

    #[test]
    fn omits_empty_arguments_and_tolerates_missing_fields() {
        let response: HttpBinResponse =
            serde_json::from_str(r#"{"url": "http://x/"}"#).unwrap();
        let report = response.render();
        assert!(report.contains("URL: http://x/"));
        assert!(report.contains("Headers:"));
        assert!(!report.contains("Arguments:"));
    }

    #[test]
    fn display_writes_the_same_report() {
        let response: HttpBinResponse = serde_json::from_str(SAMPLE).unwrap();
        let out = format!("{}", response);
        assert_eq!(out, response.render());
        assert!(out.ends_with("  q: rust\n"));
    }
}
