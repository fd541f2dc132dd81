// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Icon lookup and link sanitization for rendering distros

/// Icon used when a distro has no dedicated artwork
pub const DEFAULT_ICON: &str = "/ubuntu.png";

/// Placeholder returned for links that must not be rendered
pub const UNSAFE_URL_PLACEHOLDER: &str = "#";

/// Resolve the icon path for a distro ID
#[must_use]
pub fn distro_icon_path(distro_id: &str) -> &'static str {
    match distro_id {
        "mint" => "/mint.png",
        "zorin" => "/zorin.png",
        "popos" => "/popos.png",
        "aurora" => "/aurora.svg",
        "fedora-kde" | "fedora-workstation" => "/fedora.png",
        "bluefin" => "/bluefin.svg",
        "bazzite-kde" | "bazzite-gnome" => "/bazzite.svg",
        "cachyos" => "/cachyos.png",
        "lubuntu" => "/lubuntu.png",
        "linux-lite" => "/linux-lite.png",
        _ => DEFAULT_ICON,
    }
}

/// Normalize an external link, or return `#` unless it is absolute http(s)
#[must_use]
pub fn sanitize_url(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => parsed.into(),
        _ => UNSAFE_URL_PLACEHOLDER.to_string(),
    }
}
