use crate::translate::LanguageOption;

const CATALOG: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bn", "Bengali"),
    ("zh", "Chinese"),
    ("nl", "Dutch"),
    ("en", "English"),
    ("fa", "Persian"),
    ("fr", "French"),
    ("de", "German"),
    ("el", "Greek"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ms", "Malay"),
    ("pa", "Punjabi"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("es", "Spanish"),
    ("sw", "Swahili"),
    ("sv", "Swedish"),
    ("ta", "Tamil"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
];

/// Static catalog offered by both language pickers.
pub fn languages() -> Vec<LanguageOption> {
    CATALOG
        .iter()
        .map(|(value, label)| LanguageOption::new(*value, *label))
        .collect()
}

pub fn find_language(code: &str) -> Option<LanguageOption> {
    CATALOG
        .iter()
        .find(|(value, _)| value.eq_ignore_ascii_case(code))
        .map(|(value, label)| LanguageOption::new(*value, *label))
}

/// Catalog entry for `code`, or a free-form option carrying the code verbatim.
pub fn resolve_language(code: &str) -> LanguageOption {
    find_language(code).unwrap_or_else(|| LanguageOption::new(code, code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_defaults_are_in_catalog() {
        assert_eq!(find_language("en").unwrap().label, "English");
        assert_eq!(find_language("UR").unwrap(), LanguageOption::new("ur", "Urdu"));
    }

    #[test]
    fn unknown_codes_pass_through() {
        assert_eq!(resolve_language("tlh"), LanguageOption::new("tlh", "tlh"));
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = languages().into_iter().map(|l| l.value).collect();
        let total = codes.len();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), total);
    }
}
