//! Property-based tests using proptest

use proptest::prelude::*;
use lexsift::*;

const TAGS: &[&str] = &["NN", "NNS", "VB", "VBP", "DT", "adj:m", "adj:f", "noun:m", "noun:f", "noun:n"];

/// Tag patterns used by pattern elements and filters; several span many tags.
const TAG_PATTERNS: &[&str] = &["NN", "VB", "VBP", "DT", "NNS?", "VB.*", "adj:.*", "noun:.*", ".*:f"];

/// Gender feature of the `pos:gender` tags.
const GENDER: &str = r":(m|f|n)$";

fn arb_token() -> impl Strategy<Value = (String, Vec<usize>)> {
    ("[a-z]{1,6}", prop::collection::vec(0..TAGS.len(), 1..4))
}

fn arb_sentence() -> impl Strategy<Value = AnalyzedSentence> {
    prop::collection::vec(arb_token(), 0..8).prop_map(|tokens| {
        let mut position = 0;
        let tokens = tokens
            .into_iter()
            .map(|(text, tags)| {
                let readings = tags.into_iter().map(|t| Reading::new(text.clone(), TAGS[t])).collect();
                let token = AnalyzedToken::new(position, text.clone(), readings).unwrap();
                position += text.len() + 1;
                token
            })
            .collect();
        AnalyzedSentence::new(tokens)
    })
}

fn arb_element() -> impl Strategy<Value = PatternElement> {
    (0..TAG_PATTERNS.len(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(t, marked, negate, lemma)| {
        let mut el = PatternElement::any().with_tag(anchored(TAG_PATTERNS[t], true).unwrap());
        if lemma {
            el = el.with_lemma(anchored("[a-m].*", false).unwrap());
        }
        if negate {
            el = el.negated();
        }
        if marked { el.marked() } else { el }
    })
}

fn arb_action() -> impl Strategy<Value = Action> {
    (0..TAG_PATTERNS.len(), 0..TAGS.len(), 0..5usize, any::<bool>()).prop_map(|(p, t, kind, lemma)| {
        let re = anchored(TAG_PATTERNS[p], true).unwrap();
        let mut filter = ReadingFilter::tag(re);
        if lemma {
            filter.lemma = Some(anchored("[n-z].*", false).unwrap());
        }
        match kind {
            0 => Action::FilterReadings(filter),
            1 => Action::RemoveReadings(filter),
            2 => Action::AddReading(ReadingTemplate::tag(TAGS[t])),
            3 => Action::ReplaceReadings(vec![ReadingTemplate::tag(TAGS[t])]),
            _ => Action::Unify(regex::Regex::new(GENDER).unwrap()),
        }
    })
}

fn arb_rule() -> impl Strategy<Value = DisambiguationRule> {
    (prop::collection::vec(arb_element(), 1..3), arb_action(), 0..1000u32)
        .prop_map(|(pattern, action, id)| DisambiguationRule::new(format!("R{id}"), pattern, action).unwrap())
}

fn arb_unify_rule() -> impl Strategy<Value = DisambiguationRule> {
    prop::collection::vec(arb_element(), 1..4).prop_map(|pattern| {
        DisambiguationRule::new("AGREE", pattern, Action::Unify(regex::Regex::new(GENDER).unwrap())).unwrap()
    })
}

fn arb_rule_set() -> impl Strategy<Value = RuleSet> {
    prop::collection::vec(arb_rule(), 0..5).prop_map(RuleSet::new)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_tokens_never_lose_all_readings(sentence in arb_sentence(), rule in arb_rule()) {
        let mut sentence = sentence;
        rule.apply(&mut sentence);
        for token in sentence.tokens() {
            prop_assert!(!token.readings().is_empty());
        }
    }

    #[test]
    fn test_empty_rule_set_is_identity(sentence in arb_sentence()) {
        let d = RuleDisambiguator::new("empty", RuleSet::empty());
        prop_assert_eq!(d.disambiguate(sentence.clone()).unwrap(), sentence);
    }

    #[test]
    fn test_sequential_stages_equal_concatenated_rules(
        sentence in arb_sentence(),
        a in arb_rule_set(),
        b in arb_rule_set(),
    ) {
        let chained = HybridDisambiguator::empty()
            .with_stage(RuleDisambiguator::new("a", a.clone()))
            .with_stage(RuleDisambiguator::new("b", b.clone()));
        let single = RuleDisambiguator::new("a+b", a.concat(b));

        prop_assert_eq!(chained.disambiguate(sentence.clone()).unwrap(), single.disambiguate(sentence).unwrap());
    }

    #[test]
    fn test_filter_results_are_subsets(sentence in arb_sentence(), rule in arb_rule()) {
        prop_assume!(matches!(rule.mode(), MergeMode::FilterReadings | MergeMode::RemoveReadings | MergeMode::Unify));
        let before = sentence.clone();
        let after = rule.try_apply(sentence);
        for (old, new) in before.tokens().iter().zip(after.tokens()) {
            prop_assert!(new.readings().iter().all(|r| old.has_reading(r)));
        }
    }

    #[test]
    fn test_unify_narrows_without_emptying(sentence in arb_sentence(), rule in arb_unify_rule()) {
        let before = sentence.clone();
        let after = rule.try_apply(sentence);
        for (old, new) in before.tokens().iter().zip(after.tokens()) {
            prop_assert!(!new.readings().is_empty());
            prop_assert!(new.readings().iter().all(|r| old.has_reading(r)));
        }
    }

    #[test]
    fn test_textual_form_round_trips(sentence in arb_sentence()) {
        let parsed: AnalyzedSentence = sentence.to_string().parse().unwrap();
        prop_assert_eq!(parsed.to_string(), sentence.to_string());
    }
}
