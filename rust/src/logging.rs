// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Logging setup for the Athena adapter.
//!
//! Installs a `tracing-subscriber` writing to a file or stderr.
//!
//! ## Configuration priority
//!
//! 1. `athena.log_level` / `athena.log_file` credential options (highest)
//! 2. `RUST_LOG` environment variable
//! 3. Default: `warn`
//!
//! Fallbacks from Glue to SQL are logged at `debug`, so
//! `RUST_LOG=athena_adapter=debug` shows every catalog access failure.

use std::sync::OnceLock;
use tracing_subscriber::{
    fmt::{self, time::SystemTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Logging configuration, usually taken from [`crate::config::AthenaCredentials`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level: "OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE".
    pub level: Option<String>,
    /// Log file path. If unset, logs go to stderr.
    pub file: Option<String>,
}

/// Build the level filter, or `None` when logging is switched off.
fn level_filter(config: &LogConfig) -> Option<EnvFilter> {
    match config.level.as_deref() {
        Some(level) if level.eq_ignore_ascii_case("off") => None,
        Some(level) => Some(EnvFilter::new(format!(
            "athena_adapter={}",
            level.to_lowercase()
        ))),
        None => Some(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("athena_adapter=warn")),
        ),
    }
}

/// Initialize the tracing subscriber.
///
/// Runs at most once per process; the first [`crate::ConnectionContext`]
/// built with a log config wins and later calls are no-ops.
pub fn init_logging(config: &LogConfig) {
    LOGGING_INITIALIZED.get_or_init(|| {
        let Some(filter) = level_filter(config) else {
            return;
        };

        let Some(ref path) = config.file else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_timer(SystemTime),
                )
                .try_init()
                .ok();
            return;
        };

        match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .with_writer(file)
                            .with_target(false)
                            .with_ansi(false)
                            .with_timer(SystemTime),
                    )
                    .try_init()
                    .ok();
            }
            Err(e) => eprintln!("athena-adapter: failed to open log file {}: {}", path, e),
        }
    });
}
