//! Human-readable population figures for metric labels.

const MILLION: i64 = 1_000_000;
const THOUSAND: i64 = 1_000;

/// Abbreviates a population count or delta.
///
/// Values above one million render in millions (`"2 M"`, `"2.5 M"`).
/// Everything else renders as floored thousands, so `999` is `"0 K"` and a
/// small loss such as `-1` is `"-1 K"`.
pub fn format_number(n: i64) -> String {
    if n > MILLION {
        if n % MILLION == 0 {
            return format!("{} M", n / MILLION);
        }
        return format!("{:.1} M", n as f64 / MILLION as f64);
    }
    format!("{} K", n.div_euclid(THOUSAND))
}

/// [`format_number`] for unsigned population counts.
pub fn format_population(n: u64) -> String {
    format_number(i64::try_from(n).unwrap_or(i64::MAX))
}

/// Thousands-separated integer, e.g. `39,512,223`.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
