//! External video reference resolution.
//!
//! Hosted video arrives as a zoo of URL shapes - embed iframes,
//! manifest files, watch pages, or a bare asset token. This module
//! normalizes them into the canonical `(provider account id, asset id)`
//! pair and rebuilds a themable embed URL from that pair.
//!
//! Resolution is pure and infallible: an unrecognized input yields an
//! empty [`ReferencePair`], which callers treat as a validation failure,
//! not a crash.

use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;
use url::Url;

use crate::collab::QuizDirectory;

// =============================================================================
// ReferencePair
// =============================================================================

/// Canonical reference to an externally hosted video asset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferencePair {
    /// Provider account id (the `customer-<code>` host label).
    pub account_id: Option<CompactString>,
    /// Asset id within the account.
    pub asset_id: Option<CompactString>,
}

impl ReferencePair {
    /// The empty pair returned for unrecognized input.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether an asset id was extracted.
    pub fn is_resolved(&self) -> bool {
        self.asset_id.is_some()
    }

    fn asset(asset: &str) -> Self {
        Self {
            account_id: None,
            asset_id: Some(CompactString::from(asset)),
        }
    }

    fn full(account: Option<&str>, asset: &str) -> Self {
        Self {
            account_id: account.map(CompactString::from),
            asset_id: Some(CompactString::from(asset)),
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Minimum length for a bare token to be treated as an asset id.
const MIN_TOKEN_LEN: usize = 16;

/// Normalize a raw URL or token into a [`ReferencePair`].
///
/// Accepted shapes, first match wins:
/// 1. embed URL `…/<assetId>/iframe`
/// 2. manifest URL `…/<assetId>/manifest/<file>`
/// 3. bare `…/<assetId>` with arbitrary trailing path
/// 4. watch/short-form URL carrying only the asset id
/// 5. a bare alphanumeric token of 16+ characters
///
/// The account id, when present, comes from a `customer-<code>` host
/// label on the first three shapes.
pub fn resolve_reference(raw: &str) -> ReferencePair {
    let raw = raw.trim();
    if raw.is_empty() {
        return ReferencePair::none();
    }

    if let Ok(parsed) = Url::parse(raw) {
        return resolve_url(&parsed);
    }

    if is_asset_token(raw) {
        return ReferencePair::asset(raw);
    }

    ReferencePair::none()
}

fn resolve_url(parsed: &Url) -> ReferencePair {
    let account = parsed.host_str().and_then(account_from_host);
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    // 1. embed: …/<assetId>/iframe
    if segments.last() == Some(&"iframe")
        && let Some(asset) = segments.len().checked_sub(2).and_then(|i| segments.get(i))
        && is_segment_token(asset)
    {
        return ReferencePair::full(account.as_deref(), asset);
    }

    // 2. manifest: …/<assetId>/manifest/<file>
    if let Some(pos) = segments.iter().position(|s| *s == "manifest")
        && pos >= 1
        && is_segment_token(segments[pos - 1])
    {
        return ReferencePair::full(account.as_deref(), segments[pos - 1]);
    }

    // 3. bare …/<assetId> with arbitrary trailing path
    if let Some(first) = segments.first()
        && is_asset_token(first)
    {
        return ReferencePair::full(account.as_deref(), first);
    }

    // 4. watch-style: only the asset id, no account
    if is_watch_url(parsed, &segments)
        && let Some(last) = segments.last()
        && is_segment_token(last)
    {
        return ReferencePair::asset(last);
    }

    ReferencePair::none()
}

/// Extract `<code>` from a `customer-<code>` host label.
fn account_from_host(host: &str) -> Option<CompactString> {
    host.split('.')
        .find_map(|label| label.strip_prefix("customer-"))
        .filter(|code| !code.is_empty())
        .map(CompactString::from)
}

fn is_watch_url(parsed: &Url, segments: &[&str]) -> bool {
    let watch_host = parsed
        .host_str()
        .is_some_and(|h| h.split('.').next() == Some("watch"));
    let watch_path = matches!(segments.first(), Some(&"watch") | Some(&"w") | Some(&"v"));
    watch_host || watch_path
}

/// A standalone token plausible as an asset id: 16+ alphanumerics.
fn is_asset_token(value: &str) -> bool {
    value.len() >= MIN_TOKEN_LEN && value.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// A path segment plausible as an asset id (shorter ids appear in
/// watch URLs and explicit embed/manifest shapes).
fn is_segment_token(value: &str) -> bool {
    value.len() >= 8
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

// =============================================================================
// Embed URL construction
// =============================================================================

/// Host-supplied configuration for reference resolution and rendering.
#[derive(Clone)]
pub struct ResolverConfig {
    /// Account id used when a video URL carries none.
    pub fallback_account_id: Option<String>,
    /// Host suffix of the embed service.
    pub embed_host: String,
    /// Quiz metadata source consulted for preview rendering.
    pub quiz_directory: Option<Arc<dyn QuizDirectory>>,
}

impl ResolverConfig {
    pub const DEFAULT_EMBED_HOST: &'static str = "cloudflarestream.com";

    pub fn new() -> Self {
        Self {
            fallback_account_id: None,
            embed_host: Self::DEFAULT_EMBED_HOST.to_string(),
            quiz_directory: None,
        }
    }

    /// Set the fallback account id.
    pub fn with_fallback_account(mut self, code: impl Into<String>) -> Self {
        self.fallback_account_id = Some(code.into());
        self
    }

    /// Attach a quiz directory for preview rendering.
    pub fn with_quiz_directory(mut self, directory: Arc<dyn QuizDirectory>) -> Self {
        self.quiz_directory = Some(directory);
        self
    }

    /// Look up quiz metadata, when a directory is attached.
    pub fn quiz_meta(&self, quiz_id: &str) -> Option<crate::collab::QuizMeta> {
        self.quiz_directory.as_deref()?.lookup(quiz_id)
    }
}

impl fmt::Debug for ResolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverConfig")
            .field("fallback_account_id", &self.fallback_account_id)
            .field("embed_host", &self.embed_host)
            .finish_non_exhaustive()
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Display options appended to an embed URL.
///
/// `None` means "not explicitly set": the query parameter is omitted
/// entirely, which is not the same as `Some(false)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbedOptions {
    pub autoplay: Option<bool>,
    pub show_duration: Option<bool>,
    pub show_background: Option<bool>,
}

/// Build a themable embed URL for a resolved reference pair.
///
/// Returns `None` when no account id is available from either the pair
/// or the configured fallback - a reportable condition the caller must
/// surface, never a silent default.
pub fn build_embed_url(
    config: &ResolverConfig,
    account_id: Option<&str>,
    asset_id: &str,
    theme_color: Option<&str>,
    options: &EmbedOptions,
) -> Option<String> {
    let account = account_id.or(config.fallback_account_id.as_deref())?;
    let base = format!(
        "https://customer-{}.{}/{}/iframe",
        account, config.embed_host, asset_id
    );
    let mut url = Url::parse(&base).ok()?;

    {
        let mut query = url.query_pairs_mut();
        if let Some(theme) = theme_color {
            query.append_pair("primaryColor", theme);
        }
        if let Some(autoplay) = options.autoplay {
            query.append_pair("autoplay", bool_str(autoplay));
        }
        if let Some(duration) = options.show_duration {
            query.append_pair("showDuration", bool_str(duration));
        }
        if let Some(background) = options.show_background {
            query.append_pair("showBackground", bool_str(background));
        }
    }

    // An empty query would leave a dangling `?`.
    if url.query() == Some("") {
        url.set_query(None);
    }
    Some(url.into())
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

// =============================================================================
// Tests
// =============================================================================
