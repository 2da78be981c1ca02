use std::fmt;

/// Inflects entity and navigation names.
///
/// Input and output are PascalCase identifiers.
pub trait PluralizationService: fmt::Debug + Send + Sync {
    fn pluralize(&self, word: &str) -> String;

    fn singularize(&self, word: &str) -> String;
}

/// English inflection backed by the `pluralizer` rule set.
///
/// Only the last word of a PascalCase identifier is inflected, so
/// `OrderItems` singularizes to `OrderItem`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishPluralizer;

impl PluralizationService for EnglishPluralizer {
    fn pluralize(&self, word: &str) -> String {
        inflect_last_word(word, 2)
    }

    fn singularize(&self, word: &str) -> String {
        inflect_last_word(word, 1)
    }
}

fn inflect_last_word(word: &str, count: isize) -> String {
    let (head, last) = word.split_at(last_word_start(word));

    if !last.chars().any(char::is_alphabetic) {
        return word.to_string();
    }

    let inflected = pluralizer::pluralize(&last.to_lowercase(), count, false);

    let mut chars = inflected.chars();
    let last = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    format!("{head}{last}")
}

/// Byte offset of the last uppercase character that follows a
/// non-uppercase one.
fn last_word_start(word: &str) -> usize {
    let mut start = 0;
    let mut prev_upper = true;

    for (index, ch) in word.char_indices() {
        if ch.is_uppercase() && !prev_upper {
            start = index;
        }
        prev_upper = ch.is_uppercase();
    }

    start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inflects_last_word_only() {
        let p = EnglishPluralizer;
        assert_eq!(p.pluralize("Customer"), "Customers");
        assert_eq!(p.pluralize("OrderItem"), "OrderItems");
        assert_eq!(p.singularize("OrderItems"), "OrderItem");
        assert_eq!(p.singularize("Categories"), "Category");
        assert_eq!(p.singularize("Customer"), "Customer");
    }

    #[test]
    fn last_word_boundaries() {
        assert_eq!(last_word_start("Customer"), 0);
        assert_eq!(last_word_start("OrderItem"), 5);
        assert_eq!(last_word_start("SKUs"), 0);
    }

    #[test]
    fn digits_only_tail_is_left_alone() {
        assert_eq!(EnglishPluralizer.pluralize("123"), "123");
    }
}
