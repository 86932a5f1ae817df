use voxpense::{ClassificationResult, ClassificationVerbose, MatchTier};

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

pub fn print_result(result: &ClassificationResult, color: bool) {
    let palette = ansi::Palette::new(color);
    print_result_lines(result, &palette);
}

pub fn print_run(run: &ClassificationVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    let details = &run.details;
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Classifying: \"{}\"", run.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Input ━━━", ansi::GRAY));
    println!("  {} {}", palette.dim("normalized:"), details.normalized);
    println!("  {} {}", palette.dim("signals:   "), palette.paint(format!("{:?}", details.signals), ansi::BLUE));

    println!("\n{}", palette.paint("━━━ Amount ━━━", ansi::GRAY));
    match &details.amount {
        Some(m) => {
            println!(
                "  {} {} {} {}",
                palette.bold(palette.paint(m.value.to_string(), ansi::GREEN)),
                palette.dim("│"),
                palette.paint(m.pattern.name(), ansi::CYAN),
                palette.paint(format!("\"{}\" span {}..{}", m.matched, m.span.start, m.span.end), ansi::YELLOW),
            );
            if let Some(unit) = &m.unit {
                println!("  {} {}", palette.dim("unit:"), unit);
            }
        }
        None => println!("{}", palette.dim("  No amount stated")),
    }

    println!("\n{}", palette.paint("━━━ Tokens ━━━", ansi::GRAY));
    if details.tokens.is_empty() {
        println!("{}", palette.dim("  No tokens produced"));
    } else {
        let joined = details.tokens.iter().map(|t| palette.paint(t, ansi::YELLOW)).collect::<Vec<_>>().join(" │ ");
        println!("  {joined}");
    }

    println!("\n{}", palette.paint("━━━ Scores ━━━", ansi::GRAY));
    for score in &details.scores {
        let label = format!("{:<14}", score.category);
        let label = if score.category == run.result.category && !run.result.fallback {
            palette.bold(palette.paint(label, ansi::GREEN))
        } else if score.hits.is_empty() {
            palette.dim(label)
        } else {
            palette.paint(label, ansi::BLUE)
        };
        println!("  {} {:.3} {}", label, score.score, palette.dim(format!("(raw {:.2})", score.raw)));
        for hit in &score.hits {
            println!(
                "      {} {} {}",
                palette.paint(&hit.token, ansi::YELLOW),
                palette.dim(format!("~{}~", tier_name(hit.tier))),
                palette.paint(&hit.keyword, ansi::CYAN)
            );
        }
    }

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    print_result_lines(&run.result, &palette);

    let t = &details.timings;
    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Amount: {}  │  Tokenize: {}  │  Match: {}  │  Describe: {}",
        palette.paint(format!("{:?}", t.total), ansi::GREEN),
        palette.dim(format!("{:?}", t.amount)),
        palette.dim(format!("{:?}", t.tokenize)),
        palette.paint(format!("{:?}", t.matching), ansi::CYAN),
        palette.dim(format!("{:?}", t.describe)),
    );
    println!();
}

fn print_result_lines(result: &ClassificationResult, palette: &ansi::Palette) {
    let category = if result.fallback {
        format!("{} {}", palette.paint(&result.category, ansi::YELLOW), palette.dim("(fallback)"))
    } else {
        palette.bold(palette.paint(&result.category, ansi::GREEN))
    };
    println!("  {} {}", palette.dim("category:   "), category);
    println!("  {} {:.2}", palette.dim("confidence: "), result.confidence);
    println!(
        "  {} {}",
        palette.dim("amount:     "),
        result.extracted_amount.map(|a| a.to_string()).unwrap_or_else(|| palette.dim("-"))
    );
    println!(
        "  {} {}",
        palette.dim("description:"),
        result.extracted_description.clone().unwrap_or_else(|| palette.dim("-"))
    );
}

fn tier_name(tier: MatchTier) -> &'static str {
    match tier {
        MatchTier::Exact => "exact",
        MatchTier::Substring => "substring",
        MatchTier::Fuzzy => "fuzzy",
    }
}
