#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuInput {
    ToggleClicked,
    LinkClicked,
    /// A click that bubbled to the document. The flags say whether the
    /// click target sits inside the menu panel or the toggle button.
    DocumentClicked { in_menu: bool, in_toggle: bool },
}

impl MenuState {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    pub fn next(self, input: MenuInput) -> Self {
        match input {
            MenuInput::ToggleClicked => self.toggled(),
            MenuInput::LinkClicked => Self::Closed,
            MenuInput::DocumentClicked { in_menu, in_toggle } => {
                if in_menu || in_toggle {
                    self
                } else {
                    Self::Closed
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTSIDE: MenuInput = MenuInput::DocumentClicked {
        in_menu: false,
        in_toggle: false,
    };

    #[test]
    fn menu_starts_closed() {
        assert_eq!(MenuState::default(), MenuState::Closed);
        assert!(!MenuState::default().is_open());
    }

    #[test]
    fn toggle_click_flips_state() {
        let open = MenuState::Closed.next(MenuInput::ToggleClicked);
        assert_eq!(open, MenuState::Open);
        assert_eq!(open.next(MenuInput::ToggleClicked), MenuState::Closed);
    }

    #[test]
    fn link_click_and_outside_click_close_an_open_menu() {
        assert_eq!(MenuState::Open.next(MenuInput::LinkClicked), MenuState::Closed);
        assert_eq!(MenuState::Open.next(OUTSIDE), MenuState::Closed);
    }

    #[test]
    fn closing_inputs_keep_a_closed_menu_closed() {
        assert_eq!(MenuState::Closed.next(MenuInput::LinkClicked), MenuState::Closed);
        assert_eq!(MenuState::Closed.next(OUTSIDE), MenuState::Closed);
    }

    #[test]
    fn toggle_click_bubbling_to_document_is_not_outside() {
        // Browser order: the toggle handler runs, then the document handler.
        let state = MenuState::Closed
            .next(MenuInput::ToggleClicked)
            .next(MenuInput::DocumentClicked {
                in_menu: false,
                in_toggle: true,
            });

        assert_eq!(state, MenuState::Open);
    }

    #[test]
    fn clicks_inside_the_panel_leave_it_open() {
        let state = MenuState::Open.next(MenuInput::DocumentClicked {
            in_menu: true,
            in_toggle: false,
        });

        assert_eq!(state, MenuState::Open);
    }
}
