use unicode_normalization::UnicodeNormalization;

/// Fold a product name or basket mention for similarity scoring.
///
/// NFKC normalization, lowercasing, whitespace collapsed to single spaces
/// with leading/trailing runs removed. Folding is applied identically to
/// catalog names and incoming mentions so the ratio scorer compares like
/// with like; display names are stored and returned unfolded.
pub fn fold(text: &str) -> String {
    let normalized: String = text.nfkc().collect();
    let lowered = normalized.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    for word in lowered.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
