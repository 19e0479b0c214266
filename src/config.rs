use crate::log::LogLevel;
use crate::sections::TieBreak;
use serde::Serialize;

pub const DEFAULT_SCROLLED_THRESHOLD_PX: f64 = 50.0;
pub const DEFAULT_BACK_TO_TOP_THRESHOLD_PX: f64 = 500.0;
pub const DEFAULT_SECTION_PROBE_OFFSET_PX: f64 = 100.0;
pub const DEFAULT_HEADER_OFFSET_PX: f64 = 80.0;
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
pub const DEFAULT_REVEAL_BOTTOM_MARGIN_PX: f64 = 50.0;
pub const DEFAULT_COUNTER_THRESHOLD: f64 = 0.5;
pub const DEFAULT_COUNTER_DURATION_MS: f64 = 2_000.0;
pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 16.0;
pub const DEFAULT_SERVICE_CARD_STAGGER_MS: u32 = 100;
pub const DEFAULT_FEATURE_ITEM_STAGGER_MS: u32 = 150;
pub const DEFAULT_HERO_INTRO_DELAY_MS: u32 = 100;
pub const DEFAULT_TYPEWRITER_SPEED_MS: u32 = 50;
pub const DEFAULT_SECTION_TIE_BREAK: TieBreak = TieBreak::LastMatch;
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const SCROLL_THRESHOLD_PX_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const VISIBILITY_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
const COUNTER_DURATION_MS_BOUNDS: (f64, f64) = (100.0, 60_000.0);
const FRAME_INTERVAL_MS_BOUNDS: (f64, f64) = (1.0, 1_000.0);
const STAGGER_MS_BOUNDS: (u32, u32) = (0, 2_000);
const HERO_INTRO_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);
const TYPEWRITER_SPEED_MS_BOUNDS: (u32, u32) = (1, 1_000);

/// Tunables for every controller on the page.
///
/// Defaults reproduce the stock landing page. Any value can be overridden
/// through a `data-*` attribute on the document element (see
/// [`InteractionConfig::from_lookup`]); malformed or out-of-range values
/// fall back to the default.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionConfig {
    pub scrolled_threshold_px: f64,
    pub back_to_top_threshold_px: f64,
    pub section_probe_offset_px: f64,
    pub header_offset_px: f64,
    pub reveal_threshold: f64,
    pub reveal_bottom_margin_px: f64,
    pub counter_threshold: f64,
    pub counter_duration_ms: f64,
    pub frame_interval_ms: f64,
    pub service_card_stagger_ms: u32,
    pub feature_item_stagger_ms: u32,
    pub hero_intro_delay_ms: u32,
    pub typewriter_speed_ms: u32,
    pub section_tie_break: TieBreak,
    pub log_level: LogLevel,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold_px: DEFAULT_SCROLLED_THRESHOLD_PX,
            back_to_top_threshold_px: DEFAULT_BACK_TO_TOP_THRESHOLD_PX,
            section_probe_offset_px: DEFAULT_SECTION_PROBE_OFFSET_PX,
            header_offset_px: DEFAULT_HEADER_OFFSET_PX,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            reveal_bottom_margin_px: DEFAULT_REVEAL_BOTTOM_MARGIN_PX,
            counter_threshold: DEFAULT_COUNTER_THRESHOLD,
            counter_duration_ms: DEFAULT_COUNTER_DURATION_MS,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            service_card_stagger_ms: DEFAULT_SERVICE_CARD_STAGGER_MS,
            feature_item_stagger_ms: DEFAULT_FEATURE_ITEM_STAGGER_MS,
            hero_intro_delay_ms: DEFAULT_HERO_INTRO_DELAY_MS,
            typewriter_speed_ms: DEFAULT_TYPEWRITER_SPEED_MS,
            section_tie_break: DEFAULT_SECTION_TIE_BREAK,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl InteractionConfig {
    /// Builds the config from an attribute lookup, e.g.
    /// `|name| root.get_attribute(name)` in the browser.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let scrolled_threshold_px = parse_f64_with_bounds(
            &lookup,
            "data-scrolled-threshold",
            DEFAULT_SCROLLED_THRESHOLD_PX,
            SCROLL_THRESHOLD_PX_BOUNDS,
        );
        let back_to_top_threshold_px = parse_f64_with_bounds(
            &lookup,
            "data-back-to-top-threshold",
            DEFAULT_BACK_TO_TOP_THRESHOLD_PX,
            SCROLL_THRESHOLD_PX_BOUNDS,
        );
        let section_probe_offset_px = parse_f64_with_bounds(
            &lookup,
            "data-section-probe-offset",
            DEFAULT_SECTION_PROBE_OFFSET_PX,
            OFFSET_PX_BOUNDS,
        );
        let header_offset_px = parse_f64_with_bounds(
            &lookup,
            "data-header-offset",
            DEFAULT_HEADER_OFFSET_PX,
            OFFSET_PX_BOUNDS,
        );
        let reveal_threshold = parse_f64_with_bounds(
            &lookup,
            "data-reveal-threshold",
            DEFAULT_REVEAL_THRESHOLD,
            VISIBILITY_THRESHOLD_BOUNDS,
        );
        let reveal_bottom_margin_px = parse_f64_with_bounds(
            &lookup,
            "data-reveal-bottom-margin",
            DEFAULT_REVEAL_BOTTOM_MARGIN_PX,
            OFFSET_PX_BOUNDS,
        );
        let counter_threshold = parse_f64_with_bounds(
            &lookup,
            "data-counter-threshold",
            DEFAULT_COUNTER_THRESHOLD,
            VISIBILITY_THRESHOLD_BOUNDS,
        );
        let counter_duration_ms = parse_f64_with_bounds(
            &lookup,
            "data-counter-duration",
            DEFAULT_COUNTER_DURATION_MS,
            COUNTER_DURATION_MS_BOUNDS,
        );
        let frame_interval_ms = parse_f64_with_bounds(
            &lookup,
            "data-frame-interval",
            DEFAULT_FRAME_INTERVAL_MS,
            FRAME_INTERVAL_MS_BOUNDS,
        );
        let service_card_stagger_ms = parse_u32_with_bounds(
            &lookup,
            "data-service-card-stagger",
            DEFAULT_SERVICE_CARD_STAGGER_MS,
            STAGGER_MS_BOUNDS,
        );
        let feature_item_stagger_ms = parse_u32_with_bounds(
            &lookup,
            "data-feature-item-stagger",
            DEFAULT_FEATURE_ITEM_STAGGER_MS,
            STAGGER_MS_BOUNDS,
        );
        let hero_intro_delay_ms = parse_u32_with_bounds(
            &lookup,
            "data-hero-intro-delay",
            DEFAULT_HERO_INTRO_DELAY_MS,
            HERO_INTRO_DELAY_MS_BOUNDS,
        );
        let typewriter_speed_ms = parse_u32_with_bounds(
            &lookup,
            "data-typewriter-speed",
            DEFAULT_TYPEWRITER_SPEED_MS,
            TYPEWRITER_SPEED_MS_BOUNDS,
        );
        let section_tie_break = parse_non_empty_string(&lookup, "data-section-tie-break")
            .and_then(|value| TieBreak::from_str(&value))
            .unwrap_or(DEFAULT_SECTION_TIE_BREAK);
        let log_level = parse_non_empty_string(&lookup, "data-log-level")
            .and_then(|value| LogLevel::from_str(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            scrolled_threshold_px,
            back_to_top_threshold_px,
            section_probe_offset_px,
            header_offset_px,
            reveal_threshold,
            reveal_bottom_margin_px,
            counter_threshold,
            counter_duration_ms,
            frame_interval_ms,
            service_card_stagger_ms,
            feature_item_stagger_ms,
            hero_intro_delay_ms,
            typewriter_speed_ms,
            section_tie_break,
            log_level,
        }
    }
}

fn parse_non_empty_string<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_f64_with_bounds<F>(lookup: &F, name: &str, default: f64, bounds: (f64, f64)) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    parse_non_empty_string(lookup, name)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_u32_with_bounds<F>(lookup: &F, name: &str, default: u32, bounds: (u32, u32)) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    parse_non_empty_string(lookup, name)
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let attributes: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        move |name| attributes.get(name).cloned()
    }

    #[test]
    fn missing_attributes_yield_stock_defaults() {
        let config = InteractionConfig::from_lookup(|_| None);

        assert_eq!(config, InteractionConfig::default());
        assert_eq!(config.scrolled_threshold_px, 50.0);
        assert_eq!(config.back_to_top_threshold_px, 500.0);
        assert_eq!(config.header_offset_px, 80.0);
        assert_eq!(config.counter_duration_ms, 2_000.0);
        assert_eq!(config.frame_interval_ms, 16.0);
    }

    #[test]
    fn in_range_attributes_override_defaults() {
        let config = InteractionConfig::from_lookup(lookup_from(&[
            ("data-header-offset", " 96 "),
            ("data-reveal-threshold", "0.25"),
            ("data-feature-item-stagger", "200"),
            ("data-section-tie-break", "first"),
            ("data-log-level", "debug"),
        ]));

        assert_eq!(config.header_offset_px, 96.0);
        assert_eq!(config.reveal_threshold, 0.25);
        assert_eq!(config.feature_item_stagger_ms, 200);
        assert_eq!(config.section_tie_break, TieBreak::FirstMatch);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn malformed_or_out_of_range_attributes_fall_back() {
        let config = InteractionConfig::from_lookup(lookup_from(&[
            ("data-scrolled-threshold", "-5"),
            ("data-counter-threshold", "1.5"),
            ("data-frame-interval", "NaN"),
            ("data-counter-duration", "fast"),
            ("data-typewriter-speed", "0"),
            ("data-log-level", "verbose"),
            ("data-header-offset", ""),
        ]));

        assert_eq!(config, InteractionConfig::default());
    }

    #[test]
    fn config_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(InteractionConfig::default()).expect("serializable");

        assert_eq!(value["headerOffsetPx"], serde_json::json!(80.0));
        assert_eq!(value["sectionTieBreak"], serde_json::json!("last_match"));
        assert_eq!(value["logLevel"], serde_json::json!("info"));
    }
}
