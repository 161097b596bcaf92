use crate::types::CompletionContext;

/// Narrows candidates to the partial word under the cursor.
///
/// Only applies while mid-word with neither a comma nor a space ending the
/// preceding text. Matches are prefix matches ignoring case, returned sorted
/// by their lowercase form (ties broken by the original text). In every other
/// case the candidates come back untouched and in generation order.
pub fn filter_and_sort(candidates: Vec<String>, context: &CompletionContext) -> Vec<String> {
    if !should_filter(context) {
        return candidates;
    }

    let prefix = context.current_completing.to_lowercase();
    let mut matches: Vec<(String, String)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let key = candidate.to_lowercase();
            key.starts_with(&prefix).then_some((key, candidate))
        })
        .collect();
    matches.sort();
    matches.into_iter().map(|(_, candidate)| candidate).collect()
}

pub(crate) fn should_filter(context: &CompletionContext) -> bool {
    context.is_completing_word && !context.is_preceding_comma && !context.is_preceding_space
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mid_word(partial: &str) -> CompletionContext {
        CompletionContext {
            current_completing: partial.to_string(),
            is_completing_word: true,
            ..Default::default()
        }
    }

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn test_filters_by_case_insensitive_prefix() {
        let candidates = owned(&["ORDER BY", "OFFSET", "ON", "SELECT"]);
        let result = filter_and_sort(candidates, &mid_word("o"));
        assert_eq!(result, owned(&["OFFSET", "ON", "ORDER BY"]));
    }

    #[test]
    fn test_sort_ignores_case() {
        let candidates = owned(&["COUNT()", "city", "Code"]);
        let result = filter_and_sort(candidates, &mid_word("C"));
        assert_eq!(result, owned(&["city", "Code", "COUNT()"]));
    }

    #[test]
    fn test_not_mid_word_keeps_generation_order() {
        let candidates = owned(&["SELECT", "FROM", "WHERE"]);
        let context = CompletionContext {
            current_completing: String::new(),
            is_completing_word: false,
            is_preceding_space: true,
            ..Default::default()
        };
        assert_eq!(filter_and_sort(candidates.clone(), &context), candidates);
    }

    #[test]
    fn test_preceding_space_or_comma_disables_filter() {
        let candidates = owned(&["b", "a"]);
        let mut context = mid_word("x");
        context.is_preceding_space = true;
        assert_eq!(filter_and_sort(candidates.clone(), &context), candidates);

        let mut context = mid_word("x");
        context.is_preceding_comma = true;
        assert_eq!(filter_and_sort(candidates.clone(), &context), candidates);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let result = filter_and_sort(owned(&["("]), &mid_word("a"));
        assert!(result.is_empty());
    }
}
