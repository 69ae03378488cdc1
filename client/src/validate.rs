/// Source-URL validation and submit gating.
///
/// Accepts the four TikTok URL shapes the backend can ingest: canonical
/// profile-video URLs, share short-links, and the two short domains.
use once_cell::sync::Lazy;
use regex::Regex;

use reelay_shared::models::Platform;

static CANONICAL_VIDEO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?tiktok\.com/@[\w.-]+/video/\d+").unwrap()
});

static SHARE_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?tiktok\.com/t/\w+").unwrap()
});

static VM_SHORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://vm\.tiktok\.com/\w+").unwrap()
});

static VT_SHORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://vt\.tiktok\.com/\w+").unwrap()
});

/// Validity of the URL field.
///
/// The empty field is `Neutral` rather than `Invalid` so no error is shown
/// before the user has typed anything. Front-ends re-run this on every
/// input change; a paste handler must defer to the next tick, since the
/// field value is not yet updated when the paste event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlValidity {
    Neutral,
    Valid,
    Invalid,
}

impl UrlValidity {
    pub fn is_valid(&self) -> bool {
        matches!(self, UrlValidity::Valid)
    }

    /// Inline indicator shown next to the URL field.
    pub fn indicator(&self) -> Indicator {
        match self {
            UrlValidity::Neutral => Indicator {
                text: "",
                tone: IndicatorTone::Neutral,
            },
            UrlValidity::Valid => Indicator {
                text: "\u{2713} Valid TikTok URL",
                tone: IndicatorTone::Valid,
            },
            UrlValidity::Invalid => Indicator {
                text: "\u{2717} Invalid URL. Must be a TikTok URL",
                tone: IndicatorTone::Invalid,
            },
        }
    }
}

/// Inline validation indicator: text plus a style tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub text: &'static str,
    pub tone: IndicatorTone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorTone {
    Neutral,
    Valid,
    Invalid,
}

/// Validate a raw URL field value.
pub fn validate_source_url(raw: &str) -> UrlValidity {
    let url = raw.trim();
    if url.is_empty() {
        return UrlValidity::Neutral;
    }
    let patterns = [&CANONICAL_VIDEO_RE, &SHARE_LINK_RE, &VM_SHORT_RE, &VT_SHORT_RE];
    if patterns.iter().any(|re| re.is_match(url)) {
        UrlValidity::Valid
    } else {
        UrlValidity::Invalid
    }
}

/// Target platform checkboxes. Both are selected initially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSelection {
    pub youtube: bool,
    pub instagram: bool,
}

impl Default for PlatformSelection {
    fn default() -> Self {
        PlatformSelection {
            youtube: true,
            instagram: true,
        }
    }
}

impl PlatformSelection {
    /// Whether at least one platform is selected.
    pub fn any(&self) -> bool {
        self.youtube || self.instagram
    }

    /// Selected platforms in fixed display order.
    pub fn selected(&self) -> Vec<Platform> {
        let mut platforms = Vec::with_capacity(2);
        if self.youtube {
            platforms.push(Platform::Youtube);
        }
        if self.instagram {
            platforms.push(Platform::Instagram);
        }
        platforms
    }
}

/// Submit gating: enabled iff the URL is valid and a platform is selected.
pub fn submit_enabled(validity: UrlValidity, platforms: &PlatformSelection) -> bool {
    validity.is_valid() && platforms.any()
}
