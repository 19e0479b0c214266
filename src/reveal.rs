pub const ANIMATE_IN_CLASS: &str = "animate-in";
pub const LOADED_CLASS: &str = "loaded";

/// Injected once so the terminal state wins over the inline hidden style.
pub const ANIMATE_IN_STYLESHEET: &str = "
    .animate-in {
        opacity: 1 !important;
        transform: translateY(0) !important;
    }
";

pub const HERO_SELECTOR: &str = ".hero-text, .hero-image";

/// A set of inline style properties written in one go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InlineStyle {
    pub opacity: &'static str,
    pub transform: &'static str,
    pub transition: Option<&'static str>,
}

impl InlineStyle {
    pub fn properties(&self) -> Vec<(&'static str, &'static str)> {
        let mut properties = vec![("opacity", self.opacity), ("transform", self.transform)];
        if let Some(transition) = self.transition {
            properties.push(("transition", transition));
        }
        properties
    }
}

pub const REVEAL_HIDDEN_STYLE: InlineStyle = InlineStyle {
    opacity: "0",
    transform: "translateY(30px)",
    transition: Some("opacity 0.6s ease, transform 0.6s ease"),
};

pub const HERO_HIDDEN_STYLE: InlineStyle = InlineStyle {
    opacity: "0",
    transform: "translateY(20px)",
    transition: Some("opacity 0.8s ease, transform 0.8s ease"),
};

pub const HERO_SETTLED_STYLE: InlineStyle = InlineStyle {
    opacity: "1",
    transform: "translateY(0)",
    transition: None,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealGroup {
    ServiceCard,
    FeatureItem,
    InfoCard,
    AboutContent,
    SectionHeader,
}

impl RevealGroup {
    pub const ALL: [RevealGroup; 5] = [
        Self::ServiceCard,
        Self::FeatureItem,
        Self::InfoCard,
        Self::AboutContent,
        Self::SectionHeader,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            Self::ServiceCard => ".service-card",
            Self::FeatureItem => ".feature-item",
            Self::InfoCard => ".info-card",
            Self::AboutContent => ".about-content",
            Self::SectionHeader => ".section-header",
        }
    }
}

/// Per-index transition delays for the groups that reveal in sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stagger {
    pub service_card_step_ms: u32,
    pub feature_item_step_ms: u32,
}

impl Stagger {
    pub fn step_ms(&self, group: RevealGroup) -> Option<u32> {
        match group {
            RevealGroup::ServiceCard => Some(self.service_card_step_ms),
            RevealGroup::FeatureItem => Some(self.feature_item_step_ms),
            RevealGroup::InfoCard | RevealGroup::AboutContent | RevealGroup::SectionHeader => None,
        }
    }

    /// CSS `transition-delay` for the `index`-th member of `group`.
    pub fn delay(&self, group: RevealGroup, index: usize) -> Option<String> {
        let step = u64::from(self.step_ms(group)?);
        let index = u64::try_from(index).unwrap_or(u64::MAX);
        Some(format!("{}ms", index.saturating_mul(step)))
    }
}

/// Reveal bookkeeping for one element. Once animated it stays animated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealTarget {
    pub group: RevealGroup,
    pub index_in_group: usize,
    animated: bool,
}

impl RevealTarget {
    pub fn new(group: RevealGroup, index_in_group: usize) -> Self {
        Self {
            group,
            index_in_group,
            animated: false,
        }
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// Records an intersection. Returns `true` only on the first one.
    pub fn mark_visible(&mut self) -> bool {
        let first = !self.animated;
        self.animated = true;
        first
    }
}

/// Builds targets for every group, numbering members within their group.
pub fn reveal_targets(group_sizes: &[(RevealGroup, usize)]) -> Vec<RevealTarget> {
    group_sizes
        .iter()
        .flat_map(|&(group, size)| (0..size).map(move |index| RevealTarget::new(group, index)))
        .collect()
}
