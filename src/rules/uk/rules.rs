use crate::RuleSet;
use crate::errors::LoadResult;

// Tags follow the `pos:gender:case` layout, e.g. `noun:f:v_naz`, `adj:m:v_rod`.

/// Built-in Ukrainian rules.
pub(crate) fn get() -> LoadResult<RuleSet> {
    [
        rule! {
            id: "ADJ_NOUN_GENDER",
            description: "adjective and following noun agree in gender",
            pattern: [tag!("adj:.*"), tag!("noun:.*")],
            action: unify!(r":(m|f|n|p)(?::|$)"),
        },
        rule! {
            id: "ADJ_NOUN_CASE",
            description: "adjective and following noun agree in case",
            pattern: [tag!("adj:.*"), tag!("noun:.*")],
            action: unify!(r":(v_[a-z]+)$"),
        },
        rule! {
            id: "NO_NOMINATIVE_AFTER_PREP",
            pattern: [tag!("prep.*"), tag!("noun:.*").marked()],
            action: remove!("noun:.*:v_naz"),
        },
    ]
    .into_iter()
    .collect()
}
