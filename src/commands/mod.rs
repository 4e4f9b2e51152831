pub mod add;
pub mod compare;
pub mod dashboard;
pub mod import;
pub mod list;
pub mod remove;
pub mod search;

/// Clips a value to `max` characters for fixed-width table output.
pub(crate) fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::clip;

    #[test]
    fn clip_shortens_only_long_values() {
        assert_eq!(clip("Homo sapiens", 28), "Homo sapiens");
        assert_eq!(clip("Saccharomyces cerevisiae (strain ATCC 204508)", 12), "Saccharomyc…");
    }
}
