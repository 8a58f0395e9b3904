use screener::{ParseResultVerbose, Quote, Rule, Suggestion, SuggestionKind, TextBuffer};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
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

        pub fn verdict(&self, ok: bool) -> String {
            if ok { self.paint("✓", GREEN) } else { self.paint("✗", RED) }
        }
    }
}

pub fn print_run(res: &ParseResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Rule: \"{}\"", res.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Tokens ━━━", ansi::GRAY));
    if res.details.tokens.is_empty() {
        println!("{}", palette.dim("  No tokens produced"));
    }
    for tok in &res.details.tokens {
        println!(
            "  {} {} {}",
            palette.paint(format!("{:>3}..{:<3}", tok.start, tok.end), ansi::YELLOW),
            palette.paint(format!("{:<10}", tok.kind), ansi::BLUE),
            tok.lexeme
        );
    }
    if !res.details.classes.is_empty() {
        println!("  {} {}", palette.dim("classes:"), palette.dim(res.details.classes.join(" | ")));
    }

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    println!("  {} heuristic validation", palette.verdict(res.validated));
    match (&res.expr, &res.error) {
        (Some(expr), _) => {
            println!("  {} {}", palette.verdict(true), palette.bold(palette.paint(expr.to_string(), ansi::GREEN)));
            for (idx, clause) in expr.clauses().iter().enumerate() {
                println!(
                    "      {} {} {} {}",
                    palette.paint(format!("[{}]", idx), ansi::GRAY),
                    palette.paint(clause.field, ansi::BLUE),
                    palette.paint(clause.operator.symbol(), ansi::CYAN),
                    clause.value
                );
            }
        }
        (None, Some(err)) => {
            println!("  {} {}", palette.verdict(false), palette.paint(err.to_string(), ansi::RED));
            if let Some(pos) = err.position() {
                println!("    {}", res.text);
                println!("    {}{}", " ".repeat(res.text[..pos].chars().count()), palette.paint("^", ansi::RED));
            }
        }
        (None, None) => {}
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Lex: {}  │  Parse: {}",
        palette.paint(format!("{:?}", res.details.total), ansi::GREEN),
        palette.paint(format!("{:?}", res.details.lex), ansi::CYAN),
        palette.dim(format!("{:?}", res.details.parse)),
    );
    println!();
}

pub fn print_suggestions(buffer: &TextBuffer, suggestions: &[Suggestion], color: bool) {
    let palette = ansi::Palette::new(color);
    let (before, after) = buffer.text().split_at(buffer.cursor());
    println!("{}{}{}", before, palette.paint("|", ansi::YELLOW), after);

    if suggestions.is_empty() {
        println!("{}", palette.dim("  No suggestions"));
        return;
    }

    for (idx, s) in suggestions.iter().enumerate() {
        let kind = match s.kind {
            SuggestionKind::Field => palette.paint("field   ", ansi::BLUE),
            SuggestionKind::Operator => palette.paint("operator", ansi::CYAN),
            SuggestionKind::Value => palette.paint("value   ", ansi::GREEN),
            SuggestionKind::Example => palette.paint("example ", ansi::YELLOW),
        };
        let example = s.example.as_deref().map(|e| palette.dim(format!("  e.g. {e}"))).unwrap_or_default();
        println!(
            "  {} {} {} {}{}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            kind,
            palette.bold(&s.text),
            palette.dim(format!("│ {}", s.description)),
            example
        );
    }
}

pub fn print_validation(verdicts: &[(&str, bool)], color: bool) {
    let palette = ansi::Palette::new(color);
    for (line, ok) in verdicts {
        println!("  {} {}", palette.verdict(*ok), line);
    }
}

pub fn print_screen(rules: &[Rule], hits: &[&Quote], total: usize, color: bool) {
    let palette = ansi::Palette::new(color);

    println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    for rule in rules {
        let status = match &rule.error {
            None => palette.verdict(true),
            Some(err) => format!("{} {}", palette.verdict(false), palette.dim(err.to_string())),
        };
        println!("  {} {} {}", palette.paint(format!("#{}", rule.id), ansi::GRAY), rule.text, status);
    }

    println!("\n{}", palette.paint("━━━ Matches ━━━", ansi::GRAY));
    if hits.is_empty() {
        println!("{}", palette.dim("  No quotes matched"));
    }
    for quote in hits {
        println!("  {}", palette.bold(palette.paint(&quote.symbol, ansi::GREEN)));
    }
    println!("\n  {}", palette.dim(format!("{} of {} quotes matched", hits.len(), total)));
    println!();
}
