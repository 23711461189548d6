// src/core/classifier.rs — Keyword topic classifier
//
// Substring match of lower-cased text against fixed topic roots. Roots with a
// trailing space ("market ", "lead ") only match when followed by a space, so
// "bookmark" or "leader" do not count. There is no tokenizer: the rule is
// literal and must stay that way.

/// Built-in topic roots: finance, banking, marketing.
pub const TOPIC_ROOTS: &[&str] = &[
    // Finance
    "invest",
    "investment",
    "stock",
    "stocks",
    "share price",
    "bond",
    "mutual fund",
    "portfolio",
    "dividend",
    "equity",
    "finance",
    "financial",
    "money",
    "wealth",
    "budget",
    "saving",
    "retire",
    "pension",
    "insurance",
    "tax",
    "gst",
    "inflation",
    "interest",
    "interest rate",
    "roi",
    "crypto",
    "trading",
    "asset",
    "debt",
    "credit",
    "risk",
    "fraud",
    "scam",
    // Banking
    "bank",
    "banking",
    "loan",
    "mortgage",
    "account",
    "deposit",
    "withdraw",
    "atm",
    "upi",
    "neft",
    "rtgs",
    "ifsc",
    "kyc",
    "cheque",
    "payment",
    "transaction",
    // Marketing
    "market ",
    "marketing",
    "brand",
    "advertis",
    "campaign",
    "seo",
    "lead ",
    "customer",
    "sales",
    "revenue",
    "profit",
    "pricing",
];

/// Returns true when `text` mentions any built-in topic root.
pub fn is_financial_question(text: &str) -> bool {
    matches_roots(text, TOPIC_ROOTS.iter().copied())
}

fn matches_roots<'a>(text: &str, mut roots: impl Iterator<Item = &'a str>) -> bool {
    if text.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    roots.any(|root| lower.contains(root))
}

/// The built-in roots plus any configured additions.
#[derive(Debug, Clone, Default)]
pub struct TopicClassifier {
    extra: Vec<String>,
}

impl TopicClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra roots are lower-cased and kept verbatim otherwise, spaces included.
    pub fn with_extra_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra = keywords
            .into_iter()
            .map(|k| k.as_ref().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { extra }
    }

    pub fn is_financial(&self, text: &str) -> bool {
        let roots = TOPIC_ROOTS
            .iter()
            .copied()
            .chain(self.extra.iter().map(String::as_str));
        matches_roots(text, roots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_not_financial() {
        assert!(!is_financial_question(""));
    }

    #[test]
    fn test_interest_question_matches() {
        assert!(is_financial_question(
            "What is a good interest rate for savings?"
        ));
    }

    #[test]
    fn test_weather_question_does_not_match() {
        assert!(!is_financial_question("What's the weather today?"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_financial_question("HOW DO I OPEN A BANK ACCOUNT"));
        assert!(is_financial_question("Pay via UPI"));
    }

    #[test]
    fn test_substring_inside_words_matches() {
        // no word boundaries: "roi" inside "heroic", "tax" inside "syntax"
        assert!(is_financial_question("a heroic effort"));
        assert!(is_financial_question("rust syntax"));
    }

    #[test]
    fn test_trailing_space_roots() {
        assert!(is_financial_question("is the stock market open"));
        assert!(!is_financial_question("add a bookmark"));
        assert!(is_financial_question("how to qualify a lead for my team"));
        assert!(!is_financial_question("who is the team leader"));
        // trailing-space root at end of text does not match
        assert!(!is_financial_question("go to the flea market"));
    }

    #[test]
    fn test_every_root_matches_itself() {
        for root in TOPIC_ROOTS {
            assert!(is_financial_question(root), "root {:?} should match", root);
            let upper = root.to_uppercase();
            assert!(is_financial_question(&upper), "root {:?} upper", root);
        }
    }

    #[test]
    fn test_earliest_keyword_list_is_covered() {
        for word in [
            "investment",
            "stocks",
            "finance",
            "banking",
            "money",
            "risk",
            "fraud",
            "interest rate",
            "loan",
        ] {
            assert!(TOPIC_ROOTS.contains(&word), "missing {word}");
        }
    }

    #[test]
    fn test_about_fifty_roots() {
        assert!(TOPIC_ROOTS.len() >= 50);
    }

    #[test]
    fn test_extra_keywords_extend() {
        let classifier = TopicClassifier::with_extra_keywords(["Forex", ""]);
        assert!(classifier.is_financial("FOREX hedging"));
        assert!(classifier.is_financial("loan"));
        assert!(!classifier.is_financial("What's the weather today?"));
        assert!(!is_financial_question("forex hedging"));
    }
}
