/// URL helpers for Link Organizer: validity, display names and favicons
use url::Url;

/// Hostname keywords of well-known storefronts and the names shown for them.
/// Checked in order; the first keyword contained in the hostname wins.
const PLATFORM_NAMES: &[(&str, &str)] = &[
    ("steam", "Steam"),
    ("epicgames", "Epic Games"),
    ("gog", "GOG"),
    ("itch", "itch.io"),
    ("alienwarearena", "Alienware Arena"),
    ("ubisoft", "Ubisoft"),
];

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

/// A link is valid when it parses as an absolute URL with an `http` or
/// `https` scheme.
pub fn is_valid_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Resolve the human-readable name shown for a link
///
/// Algorithm:
/// 1. Parse the URL; if that fails, show the raw string
/// 2. If the hostname contains a known platform keyword → platform name
/// 3. Else drop a leading "www.", take the first label, upper-case its
///    first character
///
/// Examples:
/// - https://store.steampowered.com → Steam
/// - https://www.epicgames.com/store → Epic Games
/// - https://randomsite.example → Randomsite
pub fn link_name(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let hostname = parsed.host_str().unwrap_or_default();

    if let Some((_, name)) = PLATFORM_NAMES
        .iter()
        .find(|(keyword, _)| hostname.contains(keyword))
    {
        return name.to_string();
    }

    // Only a leading "www." is dropped, so "awww.foo.com" stays "Awww"
    let hostname = hostname.strip_prefix("www.").unwrap_or(hostname);
    capitalize(hostname.split('.').next().unwrap_or_default())
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the remote icon URL for a link.
/// The icon is best-effort: callers render the row whether or not it loads.
pub fn favicon_url(link: &str) -> Option<String> {
    Url::parse_with_params(FAVICON_SERVICE, &[("sz", "32"), ("domain_url", link)])
        .ok()
        .map(String::from)
}
