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

//! Glue-first, SQL-second execution.

use crate::error::{Error, Result};
use tracing::debug;

/// Run `primary`; if it fails with [`Error::CatalogAccess`], discard its
/// partial work and return `fallback()` instead.
///
/// Every other error is returned unchanged. `operation` names the request
/// in the debug log.
pub fn with_fallback<T, P, F>(operation: &str, primary: P, fallback: F) -> Result<T>
where
    P: FnOnce() -> Result<T>,
    F: FnOnce() -> Result<T>,
{
    match primary() {
        Err(Error::CatalogAccess { code, message }) => {
            debug!(
                "Glue error while {}. Fallback into SQL execution: code={}, message={}",
                operation, code, message
            );
            fallback()
        }
        other => other,
    }
}
