use crate::rules::en;
use crate::{AnalyzedSentence, RuleDisambiguator};

fn disambiguator() -> RuleDisambiguator {
    RuleDisambiguator::new("builtin:en", en::get().unwrap())
}

#[test]
fn builtin_english_rules_load() {
    let rules = en::get().unwrap();
    assert!(!rules.is_empty());
    assert_eq!(rules.ids().first(), Some(&"TO_INFINITIVE"));
}

#[test]
fn english_examples_disambiguate() {
    // (input, expected output)
    let cases: Vec<(&str, &str)> = vec![
        ("to=to/TO walk=walk/NN|walk/VB", "to=to/TO walk=walk/VB"),
        ("can=can/MD swim=swim/VB|swim/NN", "can=can/MD swim=swim/VB"),
        ("the=the/DT walk=walk/NN|walk/VB", "the=the/DT walk=walk/NN"),
        ("my=my/PRP$ runs=run/NNS|run/VBZ", "my=my/PRP$ runs=run/NNS"),
        ("they=they/PRP go=go/VB|go/VBP", "they=they/PRP go=go/VBP"),
        ("She=she/PRP walks=walk/NNS|walk/VBZ", "She=she/PRP walks=walk/VBZ"),
        ("oh=oh/NN", "oh=oh/NN|oh/UH"),
        ("the=the/DT record=record/VB|record/VBP", "the=the/DT record=record/VBP"),
        ("school=school/NN", "school=school/NN"),
    ];

    let d = disambiguator();
    for (input, expected) in cases {
        let sentence: AnalyzedSentence = input.parse().unwrap();
        let out = d.run(sentence);
        assert_eq!(out.to_string(), expected, "input: {input}");
    }
}

#[test]
fn every_token_keeps_a_reading() {
    // "the" followed by a token that is only a verb: the remove rule would
    // empty it, so the reading survives.
    let d = disambiguator();
    let sentence: AnalyzedSentence = "the=the/DT go=go/VB".parse().unwrap();
    let (out, metrics) = d.run_with_metrics(sentence);

    assert_eq!(out.to_string(), "the=the/DT go=go/VB");
    assert_eq!(metrics.kept_original(), 1);
}
