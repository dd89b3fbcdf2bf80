use crate::RuleSet;
use crate::errors::LoadResult;

/// Built-in English rules, Penn Treebank tags.
pub(crate) fn get() -> LoadResult<RuleSet> {
    [
        rule! {
            id: "TO_INFINITIVE",
            description: "base form after infinitival 'to'",
            pattern: [text!("to"), tag!("VB").marked()],
            action: keep!("VB"),
        },
        rule! {
            id: "MODAL_BASE_FORM",
            description: "base form after a modal",
            pattern: [tag!("MD"), tag!("VB").marked()],
            action: keep!("VB"),
        },
        rule! {
            id: "DETERMINER_NOUN",
            description: "noun reading after a determiner or possessive",
            pattern: [tag!("DT|PRP\\$"), tag!("NNS?").marked()],
            action: keep!("NNS?"),
        },
        rule! {
            id: "PLURAL_PRONOUN_VBP",
            pattern: [text!("i|you|we|they"), tag!("VBP").marked()],
            action: keep!("VBP"),
        },
        rule! {
            id: "THIRD_PERSON_VBZ",
            pattern: [text!("he|she|it"), tag!("VBZ").marked()],
            action: keep!("VBZ"),
        },
        rule! {
            id: "INTERJECTION",
            pattern: [text!("oh|ah|wow|hey")],
            action: crate::Action::AddReading(crate::ReadingTemplate::tag("UH")),
        },
        rule! {
            id: "NO_VB_AFTER_THE",
            description: "a bare verb cannot follow 'the'",
            pattern: [text!("the"), tag!("VB").marked()],
            action: remove!("VB"),
        },
    ]
    .into_iter()
    .collect()
}
