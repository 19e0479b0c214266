pub const COUNTER_SUFFIX: char = '+';

/// Reads a counter's target the way `parseInt` does: optional leading
/// whitespace, optional sign, then as many ASCII digits as follow.
/// Trailing text such as the `+` suffix is ignored.
///
/// Unlike `parseInt`, digit runs past `i64` saturate instead of going
/// inexact, and a `0x` prefix is read as decimal `0`.
pub fn parse_counter_target(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }

    let value = digits.bytes().fold(0i64, |value, digit| {
        let digit = i64::from(digit - b'0');
        if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        }
    });

    Some(value)
}

/// A counter's target, read once from the text the element carries when
/// the page is set up. Later text changes never move it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterTarget {
    target: Option<i64>,
}

impl CounterTarget {
    pub fn from_initial_text(text: &str) -> Self {
        Self {
            target: parse_counter_target(text),
        }
    }

    pub fn target(&self) -> Option<i64> {
        self.target
    }

    pub fn animation(
        &self,
        duration_ms: f64,
        frame_interval_ms: f64,
    ) -> Option<CounterAnimation> {
        self.target.map(|target| CounterAnimation::new(target, duration_ms, frame_interval_ms))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub text: String,
    pub last: bool,
}

/// Frame-by-frame count from zero up to `target`.
///
/// Each frame adds `target / (duration / frame_interval)`. Frames below
/// the target show the floored running value, and the first frame at or
/// past it shows exactly the target. The iterator ends after that.
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: f64, frame_interval_ms: f64) -> Self {
        let frames = duration_ms / frame_interval_ms;
        let increment = if frames.is_finite() && frames >= 1.0 {
            target as f64 / frames
        } else {
            target as f64
        };

        Self {
            target,
            increment,
            current: 0.0,
            finished: false,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }
}

impl Iterator for CounterAnimation {
    type Item = CounterFrame;

    fn next(&mut self) -> Option<CounterFrame> {
        if self.finished {
            return None;
        }

        self.current += self.increment;

        if self.current < self.target as f64 {
            return Some(CounterFrame {
                text: format!("{}{COUNTER_SUFFIX}", self.current.floor() as i64),
                last: false,
            });
        }

        self.finished = true;
        Some(CounterFrame {
            text: format!("{}{COUNTER_SUFFIX}", self.target),
            last: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn displayed_values(frames: &[CounterFrame]) -> Vec<i64> {
        frames
            .iter()
            .map(|frame| {
                frame
                    .text
                    .trim_end_matches(COUNTER_SUFFIX)
                    .parse::<i64>()
                    .expect("numeric frame")
            })
            .collect()
    }

    #[test]
    fn parse_matches_parse_int_prefix_semantics() {
        assert_eq!(parse_counter_target("15"), Some(15));
        assert_eq!(parse_counter_target("  2500+"), Some(2_500));
        assert_eq!(parse_counter_target("98% happy"), Some(98));
        assert_eq!(parse_counter_target("-7"), Some(-7));
        assert_eq!(parse_counter_target("+12"), Some(12));
    }

    #[test]
    fn parse_rejects_text_without_leading_digits() {
        assert_eq!(parse_counter_target(""), None);
        assert_eq!(parse_counter_target("years"), None);
        assert_eq!(parse_counter_target("+"), None);
        assert_eq!(parse_counter_target("$100"), None);
    }

    #[test]
    fn parse_saturates_overlong_digit_runs() {
        assert_eq!(parse_counter_target("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_counter_target("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_counter_target("9223372036854775807"), Some(i64::MAX));
    }

    #[test]
    fn hex_prefix_reads_as_leading_zero() {
        assert_eq!(parse_counter_target("0x1F"), Some(0));
    }

    #[test]
    fn target_is_fixed_by_the_initial_text() {
        let target = CounterTarget::from_initial_text("1200+");

        // The element is later cleared or partially retyped.
        for later_text in ["", "1", "12"] {
            assert_ne!(CounterTarget::from_initial_text(later_text), target);
        }
        assert_eq!(target.target(), Some(1_200));

        let frames: Vec<_> = target
            .animation(2_000.0, 16.0)
            .expect("parsable target animates")
            .collect();
        assert_eq!(frames.last().map(|f| f.text.as_str()), Some("1200+"));
    }

    #[test]
    fn unparsable_initial_text_yields_no_animation() {
        let target = CounterTarget::from_initial_text("many");

        assert_eq!(target.target(), None);
        assert!(target.animation(2_000.0, 16.0).is_none());
    }

    #[test]
    fn hundred_counts_up_and_ends_at_exact_target() {
        let frames: Vec<_> = CounterAnimation::new(100, 2_000.0, 16.0).collect();
        let values = displayed_values(&frames);

        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(frames.last().map(|f| f.text.as_str()), Some("100+"));
        assert!(frames.last().is_some_and(|f| f.last));
        assert!(frames[..frames.len() - 1].iter().all(|f| !f.last));
        assert!(values[..values.len() - 1].iter().all(|value| *value < 100));
        assert!((125..=127).contains(&frames.len()));
    }

    #[test]
    fn first_frame_already_advances() {
        let mut animation = CounterAnimation::new(100, 2_000.0, 16.0);

        assert_eq!(animation.next().map(|f| f.text), Some("0+".to_string()));
        animation.nth(3);
        assert_eq!(animation.next().map(|f| f.text), Some("4+".to_string()));
    }

    #[test]
    fn zero_target_finishes_on_the_first_frame() {
        let frames: Vec<_> = CounterAnimation::new(0, 2_000.0, 16.0).collect();

        assert_eq!(
            frames,
            vec![CounterFrame {
                text: "0+".to_string(),
                last: true
            }]
        );
    }

    #[test]
    fn negative_target_jumps_straight_to_the_value() {
        let frames: Vec<_> = CounterAnimation::new(-5, 2_000.0, 16.0).collect();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].text, "-5+");
    }

    #[test]
    fn degenerate_timing_completes_in_one_frame() {
        let frames: Vec<_> = CounterAnimation::new(40, 10.0, 16.0).collect();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].text, "40+");
    }
}
