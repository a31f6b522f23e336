// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.


use crate::utils::MASK;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Field and header names whose values never show up in diagnostic output.
pub const SENSITIVE_KEYS: &[&str] = &[
    "Authorization",
    "X-Security-Token",
    "stringData",
    "data",
    "secretName",
];

/// `"Key": "value"` with escaped quotes allowed inside the value.
static QUOTED_PAIR: Lazy<Regex> = Lazy::new(|| {
    let keys = SENSITIVE_KEYS
        .iter()
        .map(|k| format!("\"{}\"", regex::escape(k)))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r#"({keys}):\s*"(?:[^"\\]|\\.)*""#)).expect("valid regex")
});

/// `Key: value` up to the end of line, header names are case-insensitive.
static BARE_PAIR: Lazy<Regex> = Lazy::new(|| {
    let keys = SENSITIVE_KEYS
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)({keys}):\s*.*$")).expect("valid regex")
});

/// RedactingFormatter turns raw request/response dumps into log-safe text.
///
/// Each line that is a complete JSON document gets pretty-printed (one space
/// indent, key order kept), every other line is kept as is. Values of
/// [`SENSITIVE_KEYS`] are then masked on every line, both as quoted JSON pairs
/// and as `Key: value` header lines.
///
/// Masking runs after pretty-printing so that each JSON value sits on its own
/// line. It is string matching, not a structural walk: nested objects under a
/// sensitive key are not masked.
///
/// Pretty-printed lines are re-serialized, not re-indented: string escapes
/// come back in their canonical form (`"\u003c"` is shown as `"<"`) and only
/// the last of duplicate keys is kept. Lines that are not JSON are untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedactingFormatter;

impl RedactingFormatter {
    /// Create a new formatter.
    pub fn new() -> Self {
        Self
    }

    /// Format the raw dump into a redacted string.
    pub fn format(&self, raw: &[u8]) -> String {
        String::from_utf8_lossy(raw)
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .map(pretty_print_json_line)
            .map(|line| remove_sensitive(&line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn pretty_print_json_line(line: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(line) else {
        return line.to_string();
    };

    let mut buf = Vec::with_capacity(line.len() * 2);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    if value.serialize(&mut ser).is_err() {
        return line.to_string();
    }

    String::from_utf8(buf).unwrap_or_else(|_| line.to_string())
}

fn remove_sensitive(line: &str) -> String {
    let line = QUOTED_PAIR.replace_all(line, format!(r#"${{1}}: "{MASK}""#).as_str());
    BARE_PAIR
        .replace_all(&line, format!("${{1}}: {MASK}").as_str())
        .into_owned()
}
