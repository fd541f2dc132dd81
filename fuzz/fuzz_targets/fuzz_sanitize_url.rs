// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use distro_picker::assets::sanitize_url;
use distro_picker::validation::is_valid_url;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &str| {
    let sanitized = sanitize_url(input);
    assert!(sanitized == "#" || is_valid_url(&sanitized));
});
