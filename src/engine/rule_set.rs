//! Ordered rule sets.
//!
//! Rule order is application order: a later rule sees the sentence exactly as
//! the earlier rules left it. Concatenation therefore has a meaning of its own;
//! applying `a` then `b` is the same as applying `a.concat(b)`.

use super::rule::DisambiguationRule;

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<DisambiguationRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<DisambiguationRule>) -> Self {
        Self { rules }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[DisambiguationRule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DisambiguationRule> {
        self.rules.iter()
    }

    /// Rule ids in application order.
    pub fn ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn push(&mut self, rule: DisambiguationRule) {
        self.rules.push(rule);
    }

    /// Append every rule of `other` after the rules of `self`.
    pub fn concat(mut self, other: RuleSet) -> RuleSet {
        self.rules.extend(other.rules);
        self
    }
}

impl From<Vec<DisambiguationRule>> for RuleSet {
    fn from(rules: Vec<DisambiguationRule>) -> Self {
        Self::new(rules)
    }
}

impl FromIterator<DisambiguationRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = DisambiguationRule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for RuleSet {
    type Item = DisambiguationRule;
    type IntoIter = std::vec::IntoIter<DisambiguationRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a DisambiguationRule;
    type IntoIter = std::slice::Iter<'a, DisambiguationRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Action, PatternElement, ReadingTemplate};

    fn rule(id: &str) -> DisambiguationRule {
        DisambiguationRule::new(id, vec![PatternElement::any()], Action::AddReading(ReadingTemplate::tag("X"))).unwrap()
    }

    #[test]
    fn concat_keeps_left_rules_first() {
        let set = RuleSet::new(vec![rule("r1")]).concat(RuleSet::new(vec![rule("r2"), rule("r3")]));
        assert_eq!(set.ids(), vec!["r1", "r2", "r3"]);
    }

    #[test]
    fn concat_of_empty_sets_is_empty() {
        assert!(RuleSet::empty().concat(RuleSet::empty()).is_empty());
    }
}
