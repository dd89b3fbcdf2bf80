use lexsift::{AnalyzedSentence, DisambiguationResult};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &AnalyzedSentence, res: &DisambiguationResult, color: bool) {
    let palette = ansi::Palette::new(color);
    let details = &res.details;
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Disambiguating: \"{}\"", input), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Stages ━━━", ansi::GRAY));
    if details.stages.is_empty() {
        println!("{}", palette.dim("  No stages configured"));
    }
    for (idx, stage) in details.stages.iter().enumerate() {
        println!("  {} {}", palette.paint(format!("[{}]", idx), ansi::GRAY), palette.paint(stage, ansi::BLUE));
    }

    println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    print_rules(res, &palette);

    println!("\n{}", palette.paint("━━━ Readings ━━━", ansi::GRAY));
    print_readings(input, &res.sentence, &palette);

    println!("\n{}", palette.paint("━━━ Summary ━━━", ansi::GRAY));
    println!(
        "  Readings: {} → {}  │  Kept original: {}  │  Total: {}",
        palette.paint(details.readings_before.to_string(), ansi::YELLOW),
        palette.paint(details.readings_after.to_string(), ansi::GREEN),
        if details.kept_original > 0 {
            palette.paint(details.kept_original.to_string(), ansi::YELLOW)
        } else {
            palette.dim("0")
        },
        palette.dim(format!("{:?}", res.elapsed)),
    );
    println!();
}

fn print_rules(res: &DisambiguationResult, palette: &ansi::Palette) {
    let fired: Vec<_> = res.details.rules.iter().filter(|r| r.matches > 0).collect();
    if fired.is_empty() {
        println!("{}", palette.dim("  No rule matched"));
        println!("\n{}", palette.dim("  Tip: Set LEXSIFT_DEBUG_RULES=1 to see missing rule files"));
        return;
    }

    for rule in fired {
        println!(
            "  {} {} {} {}",
            palette.paint(&rule.rule_id, ansi::CYAN),
            palette.dim(format!("({})", rule.stage)),
            palette.dim("matches:"),
            palette.paint(rule.matches.to_string(), ansi::YELLOW),
        );
        if rule.changed > 0 || rule.kept_original > 0 {
            println!(
                "      {} {}  {} {}",
                palette.dim("changed:"),
                palette.paint(rule.changed.to_string(), ansi::GREEN),
                palette.dim("│ kept original:"),
                palette.paint(rule.kept_original.to_string(), ansi::YELLOW),
            );
        }
    }
}

fn print_readings(before: &AnalyzedSentence, after: &AnalyzedSentence, palette: &ansi::Palette) {
    for (old, new) in before.tokens().iter().zip(after.tokens()) {
        let readings = new.readings().iter().map(|r| r.to_string()).collect::<Vec<_>>().join(" | ");
        let removed = old.readings().iter().filter(|r| !new.has_reading(r)).count();

        println!(
            "  {} {} {}",
            palette.bold(new.text()),
            palette.dim("│"),
            if removed > 0 || old.readings().len() != new.readings().len() {
                palette.paint(&readings, ansi::GREEN)
            } else {
                readings.clone()
            },
        );
        if removed > 0 {
            println!("      {}", palette.dim(format!("-{removed} reading(s)")));
        }
    }
}
