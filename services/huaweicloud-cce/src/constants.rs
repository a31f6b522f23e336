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


use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Headers used by the signing transport.
pub const X_PROJECT_ID: &str = "x-project-id";
pub const X_SECURITY_TOKEN: &str = "x-security-token";
pub const X_SDK_DATE: &str = "x-sdk-date";
pub const X_SDK_CONTENT_SHA256: &str = "x-sdk-content-sha256";

/// Algorithm name of the Huawei Cloud API Gateway signature.
pub const SIGNING_ALGORITHM: &str = "SDK-HMAC-SHA256";

// Env values used in huawei cloud cce.
pub const HW_ACCESS_KEY: &str = "HW_ACCESS_KEY";
pub const HW_SECRET_KEY: &str = "HW_SECRET_KEY";
pub const HW_PROJECT_ID: &str = "HW_PROJECT_ID";
pub const HW_SECURITY_TOKEN: &str = "HW_SECURITY_TOKEN";

/// AsciiSet for API Gateway uri encoding.
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static APIG_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
