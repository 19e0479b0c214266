/// What the navbar controller reads on every scroll, resize or load tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSnapshot {
    pub offset: f64,
    pub navbar_height: i32,
}

/// Visual state owned by the navbar controller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavbarState {
    pub scrolled: bool,
    pub back_to_top_visible: bool,
    pub menu_top: String,
}

/// Elements the navbar controller toggles classes on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavbarPart {
    Navbar,
    BackToTop,
}

pub const SCROLLED_CLASS: &str = "scrolled";
pub const VISIBLE_CLASS: &str = "visible";

impl NavbarState {
    /// Class writes for this state. The back-to-top control is optional
    /// markup; without it only the navbar is touched.
    pub fn class_toggles(
        &self,
        back_to_top_present: bool,
    ) -> Vec<(NavbarPart, &'static str, bool)> {
        let mut toggles = vec![(NavbarPart::Navbar, SCROLLED_CLASS, self.scrolled)];
        if back_to_top_present {
            toggles.push((NavbarPart::BackToTop, VISIBLE_CLASS, self.back_to_top_visible));
        }
        toggles
    }
}

#[derive(Clone, Copy, Debug)]
pub struct NavbarStateController {
    scrolled_threshold: f64,
    back_to_top_threshold: f64,
}

impl NavbarStateController {
    pub fn new(scrolled_threshold: f64, back_to_top_threshold: f64) -> Self {
        Self {
            scrolled_threshold,
            back_to_top_threshold,
        }
    }

    pub fn state_for(&self, snapshot: ScrollSnapshot) -> NavbarState {
        NavbarState {
            scrolled: snapshot.offset > self.scrolled_threshold,
            back_to_top_visible: snapshot.offset > self.back_to_top_threshold,
            menu_top: mobile_menu_top(snapshot.navbar_height),
        }
    }
}

/// The mobile menu hangs directly below the navbar's rendered height.
pub fn mobile_menu_top(navbar_height: i32) -> String {
    format!("{navbar_height}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> NavbarStateController {
        NavbarStateController::new(50.0, 500.0)
    }

    fn at(offset: f64) -> NavbarState {
        controller().state_for(ScrollSnapshot {
            offset,
            navbar_height: 72,
        })
    }

    #[test]
    fn scrolled_state_flips_strictly_above_fifty() {
        assert!(!at(0.0).scrolled);
        assert!(!at(50.0).scrolled);
        assert!(at(50.5).scrolled);
        assert!(at(1_200.0).scrolled);
    }

    #[test]
    fn back_to_top_appears_strictly_above_five_hundred() {
        assert!(!at(499.0).back_to_top_visible);
        assert!(!at(500.0).back_to_top_visible);
        assert!(at(501.0).back_to_top_visible);
    }

    #[test]
    fn thresholds_hold_across_a_sweep_of_offsets() {
        for offset in (0..2_000).step_by(7) {
            let offset = f64::from(offset);
            let state = at(offset);
            assert_eq!(state.scrolled, offset > 50.0);
            assert_eq!(state.back_to_top_visible, offset > 500.0);
        }
    }

    #[test]
    fn menu_top_tracks_navbar_height() {
        assert_eq!(at(0.0).menu_top, "72px");
        assert_eq!(mobile_menu_top(0), "0px");
    }

    #[test]
    fn navbar_still_toggles_without_a_back_to_top_control() {
        let state = at(720.0);

        assert_eq!(
            state.class_toggles(false),
            vec![(NavbarPart::Navbar, "scrolled", true)]
        );
        assert_eq!(state.menu_top, "72px");
    }

    #[test]
    fn back_to_top_toggle_follows_the_navbar_one() {
        assert_eq!(
            at(20.0).class_toggles(true),
            vec![
                (NavbarPart::Navbar, "scrolled", false),
                (NavbarPart::BackToTop, "visible", false),
            ]
        );
    }

    #[test]
    fn repeated_ticks_with_same_input_are_stable() {
        assert_eq!(at(640.0), at(640.0));
    }
}
