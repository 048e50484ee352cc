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

//! S3 storage: where table data goes and how it is removed.

pub mod cleaner;
pub mod location;

pub use cleaner::{StorageCleaner, DELETE_BATCH_SIZE};
pub use location::{
    has_explicit_data_dir, parse_s3_location, schema_table_location, storage_table_location,
    storage_table_prefix, uuid_table_location, S3Location,
};
