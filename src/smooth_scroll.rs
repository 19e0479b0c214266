pub const BACK_TO_TOP_DESTINATION: f64 = 0.0;

/// Why an intercepted anchor click did not scroll anywhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NotAFragment,
    EmptyFragment,
    MissingTarget,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotAFragment => "not_a_fragment",
            Self::EmptyFragment => "empty_fragment",
            Self::MissingTarget => "missing_target",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavigationOutcome {
    ScrollTo(f64),
    Skipped(SkipReason),
}

/// Returns the element id an in-page `href` points at.
pub fn fragment_id(href: &str) -> Result<&str, SkipReason> {
    let fragment = href.trim().strip_prefix('#').ok_or(SkipReason::NotAFragment)?;

    if fragment.is_empty() {
        return Err(SkipReason::EmptyFragment);
    }

    Ok(fragment)
}

#[derive(Clone, Copy, Debug)]
pub struct SmoothScrollNavigator {
    header_offset: f64,
}

impl SmoothScrollNavigator {
    pub fn new(header_offset: f64) -> Self {
        Self { header_offset }
    }

    /// `target_top` is the target's viewport-relative top, or `None` when
    /// the fragment names no element on the page.
    pub fn resolve(&self, href: &str, target_top: Option<f64>, current_scroll: f64) -> NavigationOutcome {
        if let Err(reason) = fragment_id(href) {
            return NavigationOutcome::Skipped(reason);
        }

        match target_top {
            Some(top) => NavigationOutcome::ScrollTo(self.destination(top, current_scroll)),
            None => NavigationOutcome::Skipped(SkipReason::MissingTarget),
        }
    }

    pub fn destination(&self, target_top: f64, current_scroll: f64) -> f64 {
        target_top + current_scroll - self.header_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_clears_the_fixed_header() {
        let navigator = SmoothScrollNavigator::new(80.0);

        assert_eq!(navigator.destination(640.0, 1_200.0), 1_760.0);
        assert_eq!(navigator.destination(-300.0, 900.0), 520.0);
    }

    #[test]
    fn resolved_anchor_scrolls_to_target_minus_header() {
        let navigator = SmoothScrollNavigator::new(80.0);

        let outcome = navigator.resolve("#contact", Some(400.0), 250.0);
        assert_eq!(outcome, NavigationOutcome::ScrollTo(570.0));
    }

    #[test]
    fn missing_target_is_an_explicit_skip() {
        let navigator = SmoothScrollNavigator::new(80.0);

        let outcome = navigator.resolve("#pricing", None, 250.0);
        assert_eq!(outcome, NavigationOutcome::Skipped(SkipReason::MissingTarget));
    }

    #[test]
    fn bare_hash_is_skipped_before_lookup() {
        let navigator = SmoothScrollNavigator::new(80.0);

        let outcome = navigator.resolve("#", Some(10.0), 0.0);
        assert_eq!(outcome, NavigationOutcome::Skipped(SkipReason::EmptyFragment));
    }

    #[test]
    fn fragment_id_strips_the_hash() {
        assert_eq!(fragment_id("#services"), Ok("services"));
        assert_eq!(fragment_id("/booking#form"), Err(SkipReason::NotAFragment));
        assert_eq!(fragment_id("#"), Err(SkipReason::EmptyFragment));
    }
}
