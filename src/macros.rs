#[macro_export]
macro_rules! regex {
    ($pat:expr) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Pattern element on the surface text (case-insensitive, full match).
#[macro_export]
macro_rules! text {
    ($pat:literal) => {
        $crate::PatternElement::any().with_text($crate::regex!(concat!("(?i)^(?:", $pat, ")$")).clone())
    };
}

/// Pattern element on a reading tag (full match).
#[macro_export]
macro_rules! tag {
    ($pat:literal) => {
        $crate::PatternElement::any().with_tag($crate::regex!(concat!("^(?:", $pat, ")$")).clone())
    };
}

/// Pattern element on a reading lemma (case-insensitive, full match).
#[macro_export]
macro_rules! lemma {
    ($pat:literal) => {
        $crate::PatternElement::any().with_lemma($crate::regex!(concat!("(?i)^(?:", $pat, ")$")).clone())
    };
}

/// `filter-readings` action keeping readings whose tag fully matches.
#[macro_export]
macro_rules! keep {
    ($tag:literal) => {
        $crate::Action::FilterReadings($crate::ReadingFilter::tag($crate::regex!(concat!("^(?:", $tag, ")$")).clone()))
    };
}

/// `remove-readings` action dropping readings whose tag fully matches.
#[macro_export]
macro_rules! remove {
    ($tag:literal) => {
        $crate::Action::RemoveReadings($crate::ReadingFilter::tag($crate::regex!(concat!("^(?:", $tag, ")$")).clone()))
    };
}

/// `unify` action over capture group 1 of `$feature`.
#[macro_export]
macro_rules! unify {
    ($feature:literal) => {
        $crate::Action::Unify($crate::regex!($feature).clone())
    };
}

#[macro_export]
macro_rules! rule {
    (
        id: $id:expr,
        $(description: $desc:expr,)?
        pattern: [ $($el:expr),+ $(,)? ],
        action: $action:expr
        $(,)?
    ) => {{
        $crate::DisambiguationRule::new($id, vec![ $($el),+ ], $action)
            .map(|rule| rule $(.with_description($desc))?)
            .map_err(|err| $crate::RuleLoadError::invalid("builtin", $id, err.to_string()))
    }};
}
