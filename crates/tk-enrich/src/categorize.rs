//! Category keyword matching (E3, §4.6): links cases to categories by
//! word-boundary keyword match against `title`/`subject`, fixing the open
//! question in §9 toward precision over the legacy substring behavior.

use std::collections::HashMap;

use regex::Regex;

use tk_core::{CaseCategory, Category};
use tk_db::{DbError, Store};

#[derive(Default)]
pub struct Categorizer;

impl Categorizer {
    /// Runs one categorization pass: every case not yet linked to a
    /// category is matched against every category's keyword list, and the
    /// first matching keyword per category records a link (§4.6 step 3).
    ///
    /// # Errors
    /// Returns `DbError` if loading categories/cases or writing links fails.
    pub async fn run(&self, store: &Store) -> Result<usize, DbError> {
        let categories = store.get_categories().await?;
        let cases = store.list_cases_needing_categorization().await?;
        let matchers = build_matchers(&categories);

        let mut links = Vec::new();
        for case in &cases {
            let haystack =
                format!("{} {}", case.title.as_deref().unwrap_or_default(), case.subject.as_deref().unwrap_or_default());

            for category in &categories {
                if category_matches(&haystack, &matchers, category.keywords()) {
                    links.push(CaseCategory::new(case.id.clone(), category.id));
                }
            }
        }

        let count = links.len();
        store.upsert_case_categories(&links).await?;
        Ok(count)
    }
}

/// Compiles one case-insensitive word-boundary regex per distinct keyword
/// across all categories, so `run()` never recompiles a pattern per case.
fn build_matchers(categories: &[Category]) -> HashMap<&str, Regex> {
    let mut matchers = HashMap::new();
    for category in categories {
        for keyword in category.keywords() {
            if matchers.contains_key(keyword.as_str()) {
                continue;
            }
            if let Ok(re) = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword))) {
                matchers.insert(keyword.as_str(), re);
            }
        }
    }
    matchers
}

fn category_matches(haystack: &str, matchers: &HashMap<&str, Regex>, keywords: &[String]) -> bool {
    keywords.iter().any(|kw| matchers.get(kw.as_str()).is_some_and(|re| re.is_match(haystack)))
}

#[cfg(test)]
mod tests {
    use super::{build_matchers, category_matches};
    use tk_core::Category;

    fn matcher_for(keyword: &str) -> (Vec<Category>, Vec<String>) {
        let categories = vec![Category::new("test", vec![keyword.to_string()])];
        let keywords = vec![keyword.to_string()];
        (categories, keywords)
    }

    #[test]
    fn matches_whole_word_case_insensitively() {
        let (categories, keywords) = matcher_for("klimaatbeleid");
        let matchers = build_matchers(&categories);
        assert!(category_matches("Onderwerp: Klimaatbeleid", &matchers, &keywords));
    }

    #[test]
    fn does_not_match_substring_within_a_longer_word() {
        let (categories, keywords) = matcher_for("klimaat");
        let matchers = build_matchers(&categories);
        assert!(!category_matches("klimaatbeleidsplan", &matchers, &keywords));
    }

    #[test]
    fn matches_keyword_surrounded_by_punctuation() {
        let (categories, keywords) = matcher_for("klimaat");
        let matchers = build_matchers(&categories);
        assert!(category_matches("zorg, wonen en klimaat.", &matchers, &keywords));
    }
}
