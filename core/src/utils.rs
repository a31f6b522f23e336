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


//! Utility functions and types.

use std::fmt::Debug;

/// Mask token written in place of sensitive values.
pub const MASK: &str = "******";

/// Redacts a secret for `Debug` output.
///
/// - Empty values are shown as `EMPTY`.
/// - Values shorter than 12 bytes are fully masked.
/// - Longer values keep their first and last three characters so different
///   keys stay distinguishable in logs.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.len();
        if length == 0 {
            return f.write_str("EMPTY");
        }
        if length < 12 || !self.0.is_char_boundary(3) || !self.0.is_char_boundary(length - 3) {
            return f.write_str(MASK);
        }

        write!(f, "{}{MASK}{}", &self.0[..3], &self.0[length - 3..])
    }
}

/// Convert a lowercase header name into its canonical wire form.
///
/// `x-security-token` becomes `X-Security-Token`.
pub fn canonical_header_name(name: &str) -> String {
    let mut s = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            s.extend(c.to_uppercase());
        } else {
            s.extend(c.to_lowercase());
        }
        upper = c == '-';
    }
    s
}
