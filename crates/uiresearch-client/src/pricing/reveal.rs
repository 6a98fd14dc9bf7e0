//! One-shot reveal of pricing cards and FAQ items as they scroll into view.

/// Elements that animate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealKind {
    PricingCard,
    FaqItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Transparent and offset downwards.
    Hidden,
    /// Fully opaque at its final position. Never hidden again.
    Visible,
}

/// Handle returned by [`RevealTracker::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealId(usize);

/// Fraction of an element that must be on screen before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    elements: Vec<(RevealKind, RevealState)>,
}

impl RevealTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing an element; it begins hidden.
    pub fn observe(&mut self, kind: RevealKind) -> RevealId {
        self.elements.push((kind, RevealState::Hidden));
        RevealId(self.elements.len() - 1)
    }

    #[must_use]
    pub fn state(&self, id: RevealId) -> Option<RevealState> {
        self.elements.get(id.0).map(|(_, state)| *state)
    }

    #[must_use]
    pub fn kind(&self, id: RevealId) -> Option<RevealKind> {
        self.elements.get(id.0).map(|(kind, _)| *kind)
    }

    /// Report how much of an element is visible. Returns true the first time
    /// the element crosses the threshold.
    pub fn on_intersection(&mut self, id: RevealId, visible_ratio: f64) -> bool {
        let Some((_, state)) = self.elements.get_mut(id.0) else {
            return false;
        };
        if *state == RevealState::Hidden && visible_ratio >= REVEAL_THRESHOLD {
            *state = RevealState::Visible;
            return true;
        }
        false
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.elements.iter().filter(|(_, s)| *s == RevealState::Visible).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_is_one_shot() {
        let mut tracker = RevealTracker::new();
        let card = tracker.observe(RevealKind::PricingCard);
        let faq = tracker.observe(RevealKind::FaqItem);

        assert_eq!(tracker.state(card), Some(RevealState::Hidden));
        assert!(!tracker.on_intersection(card, 0.05));
        assert!(tracker.on_intersection(card, 0.5));
        assert!(!tracker.on_intersection(card, 1.0));

        // Scrolling away does not hide it again
        assert!(!tracker.on_intersection(card, 0.0));
        assert_eq!(tracker.state(card), Some(RevealState::Visible));

        assert_eq!(tracker.state(faq), Some(RevealState::Hidden));
        assert_eq!(tracker.kind(faq), Some(RevealKind::FaqItem));
        assert_eq!(tracker.visible_count(), 1);
    }
}
