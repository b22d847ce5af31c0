//! Rendering generated notation for the terminal.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde_json::json;
use solfa::Generation;

/// Colors are off when NO_COLOR is set.
pub fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// The notation mapping as pretty JSON. With `explain`, it is wrapped together
/// with its source and, when present, the fallback reason and echoed hints.
pub fn json(generation: &Generation, explain: bool) -> Result<String> {
    let value = if explain {
        let mut value = json!({
            "notation": generation.notation,
            "source": generation.source,
        });
        if let Some(reason) = &generation.fallback_reason {
            value["fallbackReason"] = json!(reason.to_string());
        }
        if let Some(echoed) = &generation.echoed {
            value["echoed"] = json!(echoed);
        }
        value
    } else {
        json!(generation.notation)
    };

    serde_json::to_string_pretty(&value).context("Failed to format JSON")
}

/// Words across the top, one row per part, columns aligned under each word.
pub fn table(words: &[&str], generation: &Generation, explain: bool, color: bool) -> String {
    let label_width = generation
        .notation
        .parts()
        .map(|p| p.as_str().len())
        .max()
        .unwrap_or(0)
        .max("lyrics".len());

    let widths: Vec<usize> = words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            generation
                .notation
                .iter()
                .filter_map(|(_, seq)| seq.get(i))
                .map(|s| s.as_str().len())
                .fold(word.chars().count(), usize::max)
        })
        .collect();

    let mut lines = Vec::new();

    let header = row(words.iter().copied(), &widths);
    let label = format!("{:<label_width$}", "lyrics");
    if color {
        lines.push(format!("{}  {}", label.bold(), header));
    } else {
        lines.push(format!("{}  {}", label, header));
    }

    for (part, seq) in &generation.notation {
        let label = format!("{:<label_width$}", part.as_str());
        let cells = row(seq.iter().map(|s| s.as_str()), &widths);
        if color {
            let (r, g, b) = solfa::VoicePart::color(*part).rgb;
            lines.push(format!(
                "{}  {}",
                label.truecolor(r, g, b).bold(),
                cells.truecolor(r, g, b)
            ));
        } else {
            lines.push(format!("{}  {}", label, cells));
        }
    }

    if explain {
        let source = match &generation.fallback_reason {
            Some(reason) => format!("source: fallback ({})", reason),
            None => "source: external".to_string(),
        };
        lines.push(String::new());
        if color {
            lines.push(source.dimmed().to_string());
        } else {
            lines.push(source);
        }
    }

    lines.join("\n")
}

fn row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}
