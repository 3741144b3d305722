/*
Copyright 2024, Zep Software, Inc.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Values that satisfy DCAT because they are non-empty, but carry no
//! information ("hidden nulls").

/// Lowercase hidden-null tokens
pub static HIDDEN_NULLS: &[&str] = &[
    "",
    "null",
    "[]",
    "{}",
    "nan",
    "none",
    "ohne angabe",
    "keine angabe",
    "nichts",
];

/// Case-insensitive check, ignoring surrounding whitespace
pub fn is_hidden_null(value: &str) -> bool {
    let normalized = value.trim().to_lowercase();
    HIDDEN_NULLS.contains(&normalized.as_str())
}
