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


//! Time related utils.

use crate::{Error, Result};
use chrono::NaiveDateTime;
use chrono::Utc;

/// DateTime is the alias of chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Compact ISO 8601 format: "20220313T072004Z"
const ISO8601_COMPACT: &str = "%Y%m%dT%H%M%SZ";

/// Create a datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into compact ISO 8601: "20220313T072004Z"
pub fn format_iso8601(t: DateTime) -> String {
    t.format(ISO8601_COMPACT).to_string()
}

/// Parse compact ISO 8601 ("20220313T072004Z") into time.
pub fn parse_iso8601(s: &str) -> Result<DateTime> {
    NaiveDateTime::parse_from_str(s, ISO8601_COMPACT)
        .map(|t| t.and_utc())
        .map_err(|e| Error::request_invalid(format!("invalid iso8601 time {s:?}")).with_source(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_iso8601() {
        let t = Utc.with_ymd_and_hms(2022, 3, 13, 7, 20, 4).unwrap();
        assert_eq!("20220313T072004Z", format_iso8601(t));
    }

    #[test]
    fn test_parse_iso8601() {
        let t = parse_iso8601("20220313T072004Z").expect("must be valid");
        assert_eq!(Utc.with_ymd_and_hms(2022, 3, 13, 7, 20, 4).unwrap(), t);

        assert!(parse_iso8601("2022-03-13").is_err());
    }
}
