use serde::Serialize;

/// A page section as laid out at the moment of the scroll tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    pub fn contains(&self, probe: f64) -> bool {
        probe >= self.top && probe < self.top + self.height
    }
}

/// Which section wins when more than one range contains the probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    FirstMatch,
    LastMatch,
}

impl TieBreak {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first" | "first_match" => Some(Self::FirstMatch),
            "last" | "last_match" => Some(Self::LastMatch),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ActiveSectionHighlighter {
    probe_offset: f64,
    tie_break: TieBreak,
}

impl ActiveSectionHighlighter {
    pub fn new(probe_offset: f64, tie_break: TieBreak) -> Self {
        Self {
            probe_offset,
            tie_break,
        }
    }

    pub fn current_section<'a>(
        &self,
        scroll_offset: f64,
        sections: &'a [Section],
    ) -> Option<&'a Section> {
        let probe = scroll_offset + self.probe_offset;
        let mut matches = sections.iter().filter(|section| section.contains(probe));

        match self.tie_break {
            TieBreak::FirstMatch => matches.next(),
            TieBreak::LastMatch => matches.last(),
        }
    }

    /// Active flag for each link href, in the order given.
    pub fn link_states(
        &self,
        scroll_offset: f64,
        sections: &[Section],
        link_hrefs: &[String],
    ) -> Vec<bool> {
        let current = self.current_section(scroll_offset, sections);

        link_hrefs
            .iter()
            .map(|href| current.is_some_and(|section| links_to(href, &section.id)))
            .collect()
    }
}

fn links_to(href: &str, section_id: &str) -> bool {
    href.strip_prefix('#') == Some(section_id)
}
