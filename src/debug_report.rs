use orakor::{RuleStats, Tally};

/// What a piece of the summary means; each tone maps to one SGR code.
#[derive(Clone, Copy)]
enum Tone {
    Heading,
    Section,
    Label,
    Count,
    Good,
    Bad,
    Muted,
}

impl Tone {
    fn sgr(self) -> &'static str {
        match self {
            Tone::Heading => "1;36",
            Tone::Section => "90",
            Tone::Label => "36",
            Tone::Count => "33",
            Tone::Good => "32",
            Tone::Bad => "31",
            Tone::Muted => "2",
        }
    }
}

struct Painter {
    enabled: bool,
}

impl Painter {
    fn tone(&self, tone: Tone, s: impl std::fmt::Display) -> String {
        if self.enabled { format!("\x1b[{}m{s}\x1b[0m", tone.sgr()) } else { s.to_string() }
    }

    /// Zero counts fade out; non-zero ones take `tone`.
    fn count(&self, tone: Tone, n: usize) -> String {
        self.tone(if n == 0 { Tone::Muted } else { tone }, n)
    }
}

/// Print the per-rule summary of a run to stderr. Stdout carries records only.
pub fn print_tally(tally: &Tally, color: bool) {
    let p = Painter { enabled: color };
    eprintln!("\n{}", p.tone(Tone::Heading, "⚙  Extraction summary"));

    eprintln!("\n{}", p.tone(Tone::Section, "━━━ Documents ━━━"));
    eprintln!(
        "  Read: {}  │  Failed: {}  │  Dayparts: {}",
        p.count(Tone::Good, tally.documents),
        p.count(Tone::Bad, tally.failed),
        p.tone(Tone::Muted, tally.stats.dayparts),
    );

    eprintln!("\n{}", p.tone(Tone::Section, "━━━ Rules ━━━"));
    if tally.stats.per_rule.is_empty() {
        eprintln!("{}", p.tone(Tone::Muted, "  No rule matched"));
    } else {
        let width = tally.stats.per_rule.keys().map(|id| id.chars().count()).max().unwrap_or(0);
        for (id, stats) in &tally.stats.per_rule {
            eprintln!("  {}  {}", p.tone(Tone::Label, format!("{id:<width$}")), stats_line(stats, &p));
        }
        eprintln!("  {}  {}", p.tone(Tone::Heading, format!("{:<width$}", "total")), stats_line(&tally.stats.total(), &p));
    }

    eprintln!("\n{}", p.tone(Tone::Section, "━━━ Timing ━━━"));
    eprintln!("  Total: {}", p.tone(Tone::Good, format!("{:?}", tally.elapsed)));
    eprintln!();
}

fn stats_line(stats: &RuleStats, p: &Painter) -> String {
    let fields = [
        ("matches", stats.matches, Tone::Count),
        ("emitted", stats.emitted, Tone::Good),
        ("ambiguous", stats.ambiguous, Tone::Count),
        ("unresolved", stats.unresolved, Tone::Bad),
        ("future", stats.future_skipped, Tone::Count),
    ];
    fields
        .iter()
        .map(|&(name, n, tone)| format!("{} {}", p.tone(Tone::Muted, format!("{name}:")), p.count(tone, n)))
        .collect::<Vec<_>>()
        .join("  ")
}
