//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use pulse_core::{AnalysisResponse, EntityMention, Polarity, SampleSource, SentimentResult};
use pulse_web::view::{percent, two_decimals, NO_ENTITIES_MESSAGE};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 28;
const CATEGORY_WIDTH: usize = 10;

/// Print a labelled value.
pub fn print_field(label: &str, value: &str) {
    println!("  {} {}", format!("{}:", label).dimmed(), value);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message.yellow());
}

/// Print the full analysis result.
pub fn print_analysis(text: &str, response: &AnalysisResponse) {
    println!("{}", truncate_visual(text, 76).dimmed());
    println!();
    print_sentiment(&response.sentiment);
    println!();
    print_entities_table(&response.entities);
}

fn sentiment_colored(result: &SentimentResult) -> ColoredString {
    match result.polarity() {
        Polarity::Positive => result.label.green().bold(),
        Polarity::Negative => result.label.red().bold(),
        Polarity::Neutral | Polarity::Unknown => result.label.yellow().bold(),
    }
}

pub fn print_sentiment(result: &SentimentResult) {
    println!("{}", "Sentiment".bold());
    println!("  {}  {}", sentiment_colored(result), percent(result.confidence).dimmed());
}

/// Print entities as a table, or the notice when there are none.
pub fn print_entities_table(entities: &[EntityMention]) {
    println!("{}", "Named Entity Recognition (NER)".bold());

    if entities.is_empty() {
        println!("  {}", NO_ENTITIES_MESSAGE.cyan());
        return;
    }

    println!("  {}", entity_row("Entity Name", "Category", "Confidence").bold());
    println!("  {}", "─".repeat(NAME_WIDTH + CATEGORY_WIDTH + 12));
    for entity in entities {
        println!(
            "  {}",
            entity_row(&entity.surface_form, &entity.category, &two_decimals(entity.confidence))
        );
    }
}

fn entity_row(name: &str, category: &str, confidence: &str) -> String {
    format!(
        "{} {} {}",
        pad_right(&truncate_visual(name, NAME_WIDTH - 1), NAME_WIDTH),
        pad_right(category, CATEGORY_WIDTH),
        confidence
    )
}

/// Print preset samples.
pub fn print_samples(samples: &[SampleSource]) {
    println!("{:<16} {:<16} {}", "Slug", "Name", "Text");
    println!("{}", "─".repeat(80));

    for sample in samples {
        let text = match sample.text() {
            Some(text) => truncate_visual(text, 44).normal(),
            None => "(type your own)".dimmed(),
        };
        println!("{:<16} {:<16} {}", sample.slug().cyan(), sample.display_name(), text);
    }
}

/// Right-pad to `width` terminal columns.
fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

/// Cut to at most `max_width` terminal columns, marking the cut with `..`.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(2);
    let mut used = 0;
    let kept: String = s
        .chars()
        .take_while(|ch| {
            used += ch.width().unwrap_or(0);
            used <= budget
        })
        .collect();
    format!("{}{}", kept, ".".repeat(max_width.min(2)))
}
