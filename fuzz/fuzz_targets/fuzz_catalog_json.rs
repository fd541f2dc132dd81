// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use distro_picker::validation::{validate_distros_array, validate_tags_array};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    for result in [validate_tags_array(&value), validate_distros_array(&value)] {
        assert_eq!(result.is_valid, result.errors.is_empty());
    }
});
