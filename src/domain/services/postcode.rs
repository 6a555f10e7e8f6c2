/// Local UK postcode shape checks. The remote postcode collaborator stays
/// authoritative for existence; this gate only rejects inputs that cannot be
/// a postcode at all.

/// Uppercase with all whitespace removed.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Outward code is one or two letters, a digit (or the R of GIR), and an
/// optional trailing digit or letter; inward code is a digit and two letters.
pub fn is_uk_postcode(text: &str) -> bool {
    let normalized = normalize(text);
    let chars: Vec<char> = normalized.chars().collect();
    if chars.len() < 5 || chars.len() > 7 {
        return false;
    }

    let (outward, inward) = chars.split_at(chars.len() - 3);
    if !(inward[0].is_ascii_digit()
        && inward[1].is_ascii_alphabetic()
        && inward[2].is_ascii_alphabetic())
    {
        return false;
    }

    let digit_or_r = |c: char| c.is_ascii_digit() || c == 'R';
    match outward {
        [a, b] => a.is_ascii_alphabetic() && digit_or_r(*b),
        [a, b, c] => {
            (a.is_ascii_alphabetic() && digit_or_r(*b) && c.is_ascii_alphanumeric())
                || (a.is_ascii_alphabetic() && b.is_ascii_alphabetic() && digit_or_r(*c))
        }
        [a, b, c, d] => {
            a.is_ascii_alphabetic()
                && b.is_ascii_alphabetic()
                && digit_or_r(*c)
                && d.is_ascii_alphanumeric()
        }
        _ => false,
    }
}

/// Canonical display form: outward code, space, inward code.
pub fn format(text: &str) -> String {
    let normalized = normalize(text);
    if normalized.len() >= 5 {
        let split = normalized.len() - 3;
        format!("{} {}", &normalized[..split], &normalized[split..])
    } else {
        normalized
    }
}
