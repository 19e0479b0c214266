use thiserror::Error;

/// Reasons a controller could not attach to the page.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("browser window is not available")]
    NoWindow,

    #[error("document is not available")]
    NoDocument,

    #[error("missing required element #{0}")]
    MissingElement(&'static str),

    #[error("element #{0} is not an HTML element")]
    NotHtmlElement(&'static str),

    #[error("selector `{0}` could not be queried")]
    Selector(&'static str),

    #[error("failed to register `{0}` listener")]
    Listener(&'static str),

    #[error("failed to create visibility observer: {0}")]
    Observer(String),

    #[error("failed to inject stylesheet")]
    Stylesheet,

    #[error("failed to schedule {0}")]
    Scheduler(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_missing_piece() {
        assert_eq!(
            SetupError::MissingElement("navToggle").to_string(),
            "missing required element #navToggle"
        );
        assert_eq!(
            SetupError::Listener("scroll").to_string(),
            "failed to register `scroll` listener"
        );
    }
}
