//! CLI command implementations

use anyhow::{bail, Context, Result};
use choirconf::{ChoirConfig, ConfigSources, DefaultsConfig};
use solfa::{
    validate_syllable_set, validate_voice_range, Difficulty, GenerationOptions, NotationGenerator,
    RangeTable, Syllable, VoicePart,
};

use crate::output;
use crate::Format;

pub struct GenerateArgs {
    pub lyrics: String,
    pub parts: Vec<VoicePart>,
    pub options: GenerationOptions,
    pub offline: bool,
    pub format: Format,
    pub explain: bool,
}

/// Generation options from CLI flags, with config defaults filling the gaps.
pub fn options_from(
    defaults: &DefaultsConfig,
    key: Option<String>,
    tempo: Option<f64>,
    style: Option<String>,
    difficulty: Option<Difficulty>,
) -> Result<GenerationOptions> {
    let difficulty = match difficulty {
        Some(d) => d,
        None => defaults
            .difficulty
            .parse()
            .context("Invalid defaults.difficulty in config")?,
    };

    Ok(GenerationOptions {
        key: key.unwrap_or_else(|| defaults.key.clone()),
        tempo: tempo.unwrap_or_else(|| f64::from(defaults.tempo)),
        style: style.unwrap_or_else(|| defaults.style.clone()),
        difficulty,
    })
}

/// Generate notation and print it to stdout
pub async fn generate(config: &ChoirConfig, args: GenerateArgs) -> Result<()> {
    let generator = if args.offline {
        NotationGenerator::offline()
    } else {
        NotationGenerator::from_config(config).context("Failed to set up completion backend")?
    };

    let generation = generator
        .generate_detailed(&args.lyrics, &args.parts, &args.options)
        .await;

    let rendered = match args.format {
        Format::Json => output::json(&generation, args.explain)?,
        Format::Table => {
            let words = solfa::tokenize(&args.lyrics);
            output::table(&words, &generation, args.explain, output::use_color())
        }
    };
    println!("{}", rendered);

    Ok(())
}

/// Run both validators on a sequence; fails if either rejects it
pub fn validate(part: VoicePart, tokens: &[String]) -> Result<()> {
    let ranges = RangeTable::default();
    let range = ranges.get(part);

    if !validate_syllable_set(tokens) {
        let unknown: Vec<&str> = tokens
            .iter()
            .map(String::as_str)
            .filter(|t| Syllable::parse(t).is_none())
            .collect();
        println!("syllable_set: FAIL ({})", unknown.join(", "));
        bail!("Not a solfa sequence: {}", unknown.join(", "));
    }
    println!("syllable_set: ok");

    let sequence: Vec<Syllable> = tokens.iter().filter_map(|t| Syllable::parse(t)).collect();
    if !validate_voice_range(&sequence, part, &ranges) {
        let outside: Vec<&str> = sequence
            .iter()
            .filter(|s| !range.contains(**s))
            .map(|s| s.as_str())
            .collect();
        println!("voice_range: FAIL ({} outside {})", outside.join(", "), range);
        bail!("Sequence leaves the {} range {}", part, range);
    }
    println!("voice_range: ok ({} {})", part, range);

    Ok(())
}

/// Print the effective configuration, optionally preceded by its sources
pub fn show_config(config: &ChoirConfig, sources: Option<&ConfigSources>) {
    if let Some(sources) = sources {
        if sources.files.is_empty() {
            println!("# files: none (compiled defaults)");
        }
        for file in &sources.files {
            println!("# file: {}", file.display());
        }
        for var in &sources.env_overrides {
            println!("# env: {}", var);
        }
        println!();
    }
    print!("{}", config.to_toml());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let defaults = DefaultsConfig::default();
        let options = options_from(
            &defaults,
            Some("Eb".to_string()),
            None,
            None,
            Some(Difficulty::Advanced),
        )
        .unwrap();

        assert_eq!(options.key, "Eb");
        assert_eq!(options.tempo, f64::from(defaults.tempo));
        assert_eq!(options.style, defaults.style);
        assert_eq!(options.difficulty, Difficulty::Advanced);
    }

    #[test]
    fn test_config_difficulty_is_parsed() {
        let defaults = DefaultsConfig {
            difficulty: "Beginner".to_string(),
            ..Default::default()
        };
        let options = options_from(&defaults, None, Some(72.5), None, None).unwrap();
        assert_eq!(options.difficulty, Difficulty::Beginner);
        assert_eq!(options.tempo, 72.5);

        let broken = DefaultsConfig {
            difficulty: "expert".to_string(),
            ..Default::default()
        };
        assert!(options_from(&broken, None, None, None, None).is_err());
    }

    #[test]
    fn test_validate_reports_failures() {
        let ok: Vec<String> = ["do", "re", "mi"].iter().map(|s| s.to_string()).collect();
        assert!(validate(VoicePart::Soprano, &ok).is_ok());

        let high_bass: Vec<String> = ["do", "ti"].iter().map(|s| s.to_string()).collect();
        let err = validate(VoicePart::Bass, &high_bass).unwrap_err();
        assert!(err.to_string().contains("bass"));

        let garbage: Vec<String> = ["do", "so"].iter().map(|s| s.to_string()).collect();
        let err = validate(VoicePart::Alto, &garbage).unwrap_err();
        assert!(err.to_string().contains("so"));
    }
}
