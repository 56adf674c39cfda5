use crate::error::Result;
use crate::pipeline::{ShiftCipher, Stage};
use std::path::Path;

/// Expected relative frequency of each letter in English prose, a..z.
const ENGLISH_FREQ: [f64; 26] = [
    0.08167, 0.01492, 0.02782, 0.04253, 0.12702, 0.02228, 0.02015, 0.06094, 0.06966, 0.00153,
    0.00772, 0.04025, 0.02406, 0.06749, 0.07507, 0.01929, 0.00095, 0.05987, 0.06327, 0.09056,
    0.02758, 0.00978, 0.02360, 0.00150, 0.01974, 0.00074,
];

/// Show letter-frequency analysis for a text file
pub fn show_analysis(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)?;
    Ok(analysis_report(&path.display().to_string(), &text))
}

/// Build the analysis report: letter frequencies, entropy, and the
/// chi-square shift estimate with a decoded preview.
pub fn analysis_report(label: &str, text: &str) -> String {
    let (counts, total) = letter_counts(text);
    let chars = text.chars().count();

    let mut output = String::new();
    output.push_str("Scytale Text Analysis\n");
    output.push_str("=====================\n\n");
    output.push_str(&format!("Source: {}\n", label));
    output.push_str(&format!("Length: {} chars, {} letters\n\n", chars, total));

    if total == 0 {
        output.push_str("No ASCII letters found; nothing to analyze\n");
        return output;
    }

    let (most, least) = extremes(&counts);
    output.push_str("Letter Frequency\n");
    output.push_str("----------------\n");
    output.push_str(&format!(
        "  Most common:  '{}' ({} times, {:.1}%)\n",
        (b'a' + most as u8) as char,
        counts[most],
        counts[most] as f64 / total as f64 * 100.0
    ));
    output.push_str(&format!(
        "  Least common: '{}' ({} times)\n",
        (b'a' + least as u8) as char,
        counts[least]
    ));
    output.push_str(&format!(
        "  Distinct letters: {}/26\n",
        counts.iter().filter(|&&c| c > 0).count()
    ));

    let entropy = letter_entropy(&counts, total);
    output.push_str(&format!(
        "  Shannon entropy: {:.4} bits/letter (max {:.4})\n",
        entropy,
        26f64.log2()
    ));
    output.push_str(&format!(
        "  Interpretation: {}\n\n",
        interpret_entropy(entropy)
    ));

    let ranked = ranked_shifts(&counts, total);
    let (best, best_chi) = ranked[0];
    let (second, second_chi) = ranked[1];

    output.push_str("Shift Estimate\n");
    output.push_str("--------------\n");
    output.push_str(&format!(
        "  Likely shift: {} (chi-square {:.2})\n",
        best, best_chi
    ));
    output.push_str(&format!(
        "  Runner-up:    {} (chi-square {:.2})\n",
        second, second_chi
    ));
    output.push_str(&format!(
        "  Confidence: {}\n",
        interpret_confidence(best_chi, second_chi)
    ));

    let decode = ShiftCipher::new(best as i64).inverse();
    output.push_str(&format!("  Decode with: shift:{}\n", decode.shift()));

    let preview_src: Vec<char> = text.chars().take(60).collect();
    let preview: String = decode.apply(&preview_src).into_iter().collect();
    output.push_str(&format!("  Preview: {}\n", preview.trim_end()));

    output
}

/// Estimate the shift a text was encoded with.
///
/// Tries all 26 candidates and picks the one whose decoded letter
/// distribution best matches English by chi-square. None when the text
/// has no ASCII letters. Short or unusual texts can mislead the estimate.
pub fn guess_shift(text: &str) -> Option<i64> {
    let (counts, total) = letter_counts(text);
    if total == 0 {
        return None;
    }
    let ranked = ranked_shifts(&counts, total);
    Some(ranked[0].0 as i64)
}

fn letter_counts(text: &str) -> ([u64; 26], u64) {
    let mut counts = [0u64; 26];
    let mut total = 0u64;
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            counts[(c.to_ascii_lowercase() as u8 - b'a') as usize] += 1;
            total += 1;
        }
    }
    (counts, total)
}

/// Shannon entropy over the letter distribution (bits per letter)
fn letter_entropy(counts: &[u64; 26], total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let mut entropy = 0.0;
    for &count in counts {
        if count > 0 {
            let p = count as f64 / total as f64;
            entropy -= p * p.log2();
        }
    }
    entropy
}

/// Chi-square of the distribution decoded with `shift` against English
fn chi_square_for_shift(counts: &[u64; 26], total: u64, shift: usize) -> f64 {
    let mut chi = 0.0;
    for (i, freq) in ENGLISH_FREQ.iter().enumerate() {
        let observed = counts[(i + shift) % 26] as f64;
        let expected = freq * total as f64;
        let diff = observed - expected;
        chi += diff * diff / expected;
    }
    chi
}

/// All 26 candidate shifts, best match first
fn ranked_shifts(counts: &[u64; 26], total: u64) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = (0..26)
        .map(|shift| (shift, chi_square_for_shift(counts, total, shift)))
        .collect();
    ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

fn extremes(counts: &[u64; 26]) -> (usize, usize) {
    let mut most = 0usize;
    let mut least = 0usize;
    for (i, &count) in counts.iter().enumerate() {
        if count > counts[most] {
            most = i;
        }
        if count < counts[least] {
            least = i;
        }
    }
    (most, least)
}

fn interpret_entropy(entropy: f64) -> &'static str {
    if entropy >= 4.6 {
        "Near uniform - heavily mixed or random letters"
    } else if entropy >= 3.8 {
        "Typical of natural language"
    } else if entropy >= 2.5 {
        "Skewed - repetitive or structured text"
    } else {
        "Very low - text is nearly constant"
    }
}

fn interpret_confidence(best: f64, second: f64) -> &'static str {
    if best <= f64::EPSILON {
        return "Strong - exact frequency match";
    }
    let ratio = second / best;
    if ratio >= 3.0 {
        "Strong - best shift clearly separated"
    } else if ratio >= 1.5 {
        "Moderate - runner-up is close"
    } else {
        "Weak - distribution fits several shifts"
    }
}
