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


use log::Level;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Log target used by [`LogCrateSink`] for diagnostic records.
pub const LOG_TARGET: &str = "kubeauth::transport";

/// Context carries the process-level capabilities used by transports.
///
/// ## Important
///
/// Environment access defaults to a no-op implementation, configure [`OsEnv`]
/// explicitly if config should be loaded from the process environment.
/// Diagnostic records default to the `log` facade via [`LogCrateSink`].
///
/// ## Example
///
/// ```
/// use kubeauth_core::{Context, OsEnv};
///
/// let ctx = Context::new().with_env(OsEnv);
/// ```
#[derive(Clone)]
pub struct Context {
    env: Arc<dyn Env>,
    log: Arc<dyn LogSink>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("env", &self.env)
            .field("log", &self.log)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with a no-op env and the `log` facade as sink.
    pub fn new() -> Self {
        Self {
            env: Arc::new(NoopEnv),
            log: Arc::new(LogCrateSink),
        }
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Replace the log sink implementation.
    pub fn with_log_sink(mut self, log: impl LogSink) -> Self {
        self.log = Arc::new(log);
        self
    }

    /// Get the environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Check whether debug records will be accepted by the sink.
    ///
    /// Transports call this on every request, so it must stay cheap.
    #[inline]
    pub fn is_debug_enabled(&self) -> bool {
        self.log.is_debug_enabled()
    }

    /// Emit a record to the configured sink.
    #[inline]
    pub fn emit(&self, level: Level, component: &str, record: &str) {
        self.log.emit(level, component, record)
    }
}

/// Permits parameterizing the environment access.
pub trait Env: Debug + Send + Sync + 'static {
    /// Get an environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    fn var(&self, key: &str) -> Option<String>;
}

/// Implements Env for the OS context.
#[derive(Debug, Copy, Clone)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }
}

/// StaticEnv provides a static env environment.
///
/// This is useful for testing or for providing a fixed environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// The environment variables to use.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }
}

/// NoopEnv is a no-op implementation that always returns None/empty.
///
/// This is used when no environment is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _key: &str) -> Option<String> {
        None
    }
}

/// LogSink receives the diagnostic records produced by transports.
///
/// Implementations must never block request processing for long: records are
/// fire-and-forget.
pub trait LogSink: Debug + Send + Sync + 'static {
    /// Whether debug records are wanted at all.
    ///
    /// Returning `false` lets transports skip all dump and format work.
    fn is_debug_enabled(&self) -> bool;

    /// Accept a formatted record tagged with severity and component name.
    fn emit(&self, level: Level, component: &str, record: &str);
}

/// LogCrateSink forwards records to the `log` facade under [`LOG_TARGET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCrateSink;

impl LogSink for LogCrateSink {
    fn is_debug_enabled(&self) -> bool {
        log::log_enabled!(target: LOG_TARGET, Level::Debug)
    }

    fn emit(&self, level: Level, component: &str, record: &str) {
        log::log!(target: LOG_TARGET, level, "[{component}] {record}");
    }
}

/// NoopLogSink drops every record and reports debug as disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    fn is_debug_enabled(&self) -> bool {
        false
    }

    fn emit(&self, _level: Level, _component: &str, _record: &str) {}
}
