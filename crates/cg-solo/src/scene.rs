//! Scenes: a titled description with a list of choices.
//!
//! Every non-combat interaction is a scene. Choosing an option yields the
//! [`Step`] it carries, which the run applies.

use strsim::jaro_winkler;

use crate::shop::ShopVisit;
use crate::step::Step;

/// Minimum similarity score for fuzzy label matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// One option in a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    /// Button label.
    pub label: String,
    /// Shown but not selectable when false.
    pub enabled: bool,
    step: Step,
}

impl Choice {
    /// What choosing this option does.
    pub fn step(&self) -> &Step {
        &self.step
    }
}

/// A narrative beat waiting for a choice.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Heading.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Options, in display order.
    pub choices: Vec<Choice>,
    /// Set while the scene is a shop counter.
    pub shop: Option<ShopVisit>,
}

impl Scene {
    /// Create a scene without choices.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            choices: Vec::new(),
            shop: None,
        }
    }

    /// Add an enabled choice.
    pub fn choice(self, label: impl Into<String>, step: Step) -> Self {
        self.choice_enabled(label, step, true)
    }

    /// Add a choice that may be shown disabled.
    pub fn choice_enabled(mut self, label: impl Into<String>, step: Step, enabled: bool) -> Self {
        self.choices.push(Choice {
            label: label.into(),
            enabled,
            step,
        });
        self
    }

    /// Add a choice only when `condition` holds.
    pub fn choice_if(self, condition: bool, label: impl Into<String>, step: Step) -> Self {
        if condition {
            self.choice(label, step)
        } else {
            self
        }
    }

    /// Mark the scene as a shop counter.
    pub fn with_shop(mut self, visit: ShopVisit) -> Self {
        self.shop = Some(visit);
        self
    }

    /// Labels in display order.
    pub fn labels(&self) -> Vec<&str> {
        self.choices.iter().map(|c| c.label.as_str()).collect()
    }

    /// Resolve typed input to a choice index.
    ///
    /// Tries an exact (case-insensitive) label, then a unique prefix, then
    /// the best fuzzy match above the threshold.
    pub fn find_choice(&self, input: &str) -> Option<usize> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        let labels: Vec<String> = self.choices.iter().map(|c| c.label.to_lowercase()).collect();

        if let Some(i) = labels.iter().position(|l| *l == needle) {
            return Some(i);
        }

        let prefixed: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, l)| l.starts_with(&needle))
            .map(|(i, _)| i)
            .collect();
        if let [only] = prefixed.as_slice() {
            return Some(*only);
        }

        let mut scored: Vec<(usize, f64)> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (i, jaro_winkler(&needle, l)))
            .filter(|(_, score)| *score >= FUZZY_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.first().map(|(i, _)| *i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Scene {
        Scene::new("Cave", "Do you go deeper or try to leave the cave?")
            .choice("Go Deeper", Step::CaveDeeper)
            .choice("Exit Cave", Step::ExitCave)
    }

    #[test]
    fn builder_keeps_order() {
        let scene = sample();
        assert_eq!(scene.labels(), vec!["Go Deeper", "Exit Cave"]);
        assert!(scene.choices.iter().all(|c| c.enabled));
    }

    #[test]
    fn conditional_and_disabled_choices() {
        let scene = Scene::new("Hut", "")
            .choice_if(false, "Rest", Step::Finish)
            .choice_enabled("Buy", Step::Finish, false)
            .choice("Leave", Step::Finish);
        assert_eq!(scene.labels(), vec!["Buy", "Leave"]);
        assert!(!scene.choices[0].enabled);
    }

    #[test]
    fn exact_match_ignores_case() {
        assert_eq!(sample().find_choice("exit cave"), Some(1));
    }

    #[test]
    fn unique_prefix_matches() {
        assert_eq!(sample().find_choice("go"), Some(0));
    }

    #[test]
    fn fuzzy_match_tolerates_typos() {
        assert_eq!(sample().find_choice("Go Deepr"), Some(0));
    }

    #[test]
    fn unrelated_input_does_not_match() {
        assert_eq!(sample().find_choice("xyzzy"), None);
        assert_eq!(sample().find_choice("   "), None);
    }
}
