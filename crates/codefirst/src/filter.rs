/// Selects which entity types a run generates, from a free-text list of
/// names.
///
/// Tokens are separated by whitespace, `,`, `:` or their full-width forms
/// `，` and `：`. Every token matches a name exactly, ignoring case; a token
/// ending in `*` also matches every name starting with the text before the
/// stars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// `None` when no filter was supplied
    tokens: Option<Vec<String>>,
}

const SEPARATORS: &[char] = &[',', '，', ':', '：'];

impl Filter {
    /// A filter including every entity type.
    pub fn all() -> Filter {
        Filter { tokens: None }
    }

    pub fn parse(src: Option<&str>) -> Filter {
        let Some(src) = src else {
            return Filter::all();
        };

        let tokens = src
            .split(|ch: char| ch.is_whitespace() || SEPARATORS.contains(&ch))
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();

        Filter {
            tokens: Some(tokens),
        }
    }

    pub fn tokens(&self) -> &[String] {
        self.tokens.as_deref().unwrap_or_default()
    }

    pub fn includes(&self, name: &str) -> bool {
        let Some(tokens) = &self.tokens else {
            return true;
        };

        let name = name.to_lowercase();

        tokens.iter().any(|token| {
            let token = token.to_lowercase();
            if token == name {
                return true;
            }

            match token.strip_suffix('*') {
                Some(prefix) => name.starts_with(prefix.trim_end_matches('*')),
                None => false,
            }
        })
    }

    /// True when no names were given, in which case the data context is
    /// generated too.
    ///
    /// A filter that was supplied but holds no tokens counts as a full run,
    /// even though it includes no entity type.
    pub fn is_full_run(&self) -> bool {
        self.tokens().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 3] = ["Customer", "Order", "OrderItem"];

    fn included(filter: &Filter) -> Vec<&'static str> {
        NAMES
            .iter()
            .copied()
            .filter(|name| filter.includes(name))
            .collect()
    }

    #[test]
    fn absent_includes_everything() {
        let filter = Filter::parse(None);
        assert_eq!(included(&filter), NAMES);
        assert!(filter.is_full_run());
    }

    #[test]
    fn prefix_wildcard() {
        let filter = Filter::parse(Some("Order*"));
        assert_eq!(included(&filter), ["Order", "OrderItem"]);
        assert!(!filter.is_full_run());
    }

    #[test]
    fn exact_match_ignores_case() {
        let filter = Filter::parse(Some("customer"));
        assert_eq!(included(&filter), ["Customer"]);
    }

    #[test]
    fn blank_includes_nothing_but_is_a_full_run() {
        let filter = Filter::parse(Some(" "));
        assert!(included(&filter).is_empty());
        assert!(filter.is_full_run());
    }

    #[test]
    fn every_separator_splits() {
        let filter = Filter::parse(Some("customer,order：ORDERITEM"));
        assert_eq!(filter.tokens(), ["customer", "order", "ORDERITEM"]);
        assert_eq!(included(&filter), NAMES);

        let filter = Filter::parse(Some("a，b:c\td"));
        assert_eq!(filter.tokens(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn repeated_stars_are_stripped() {
        let filter = Filter::parse(Some("ORD**"));
        assert_eq!(included(&filter), ["Order", "OrderItem"]);
    }

    #[test]
    fn wildcard_is_not_a_substring_match() {
        let filter = Filter::parse(Some("Item*"));
        assert!(included(&filter).is_empty());
    }
}
