//! Instructions sent to the completion backend.

use crate::options::GenerationOptions;
use crate::voice::RangeTable;

const RULES: &str = "\
You are a choral arranger who writes tonic solfa notation for four-part choirs.

Rules:
1. Use ONLY these syllables: do, re, mi, fa, sol, la, ti. No octave marks, \
accidentals, rests, durations or other symbols.
2. Write exactly one syllable per word of the lyrics, for every voice part.
3. Keep each voice part inside its range (lowest-highest syllable):
";

const LEADING: &str = "\
4. Make the four parts harmonically plausible together: prefer consonant \
thirds, sixths and complete triads on strong words.
5. Follow traditional voice-leading: prefer stepwise motion, avoid parallel \
fifths and octaves between any two parts, resolve ti up to do, keep the \
soprano above the alto and the tenor above the bass.

Answer with a single JSON object and nothing else, shaped exactly like:
{\"soprano\": [\"do\", ...], \"alto\": [...], \"tenor\": [...], \"bass\": [...], \
\"key\": \"C\", \"tempo\": 120, \"style\": \"traditional\"}
";

/// The fixed system instruction, with the range rule rendered from `ranges`.
pub fn system_prompt(ranges: &RangeTable) -> String {
    let mut prompt = String::from(RULES);
    for (part, range) in ranges.iter() {
        prompt.push_str(&format!("   - {}: {} to {}\n", part, range.low(), range.high()));
    }
    prompt.push_str(LEADING);
    prompt
}

/// The per-request instruction carrying the lyrics and generation hints.
pub fn user_prompt(lyrics: &str, word_count: usize, options: &GenerationOptions) -> String {
    format!(
        "Write four-part solfa notation for these lyrics ({word_count} words):\n\
         \"{lyrics}\"\n\n\
         Key: {key}\n\
         Tempo: {tempo} BPM\n\
         Style: {style}\n\
         Difficulty: {difficulty} (keep leaps small for beginners; advanced \
         singers can handle wider intervals)\n\
         Each of soprano, alto, tenor and bass must contain exactly {word_count} syllables.",
        lyrics = lyrics.trim(),
        key = options.key,
        tempo = options.tempo,
        style = options.style,
        difficulty = options.difficulty,
    )
}
