/// A store or model identifier split into its underscore-separated parts.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let parts = src
            .split('_')
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect();
        Self { parts }
    }

    /// `ORDER_ITEM` → `OrderItem`.
    ///
    /// Each part is lowercased and its first character uppercased, so inner
    /// casing is not preserved: `OrderItem` → `Orderitem`.
    pub fn pascal_case(&self) -> String {
        self.parts.iter().map(|part| pascal_part(part)).collect()
    }
}

/// Shorthand for `Name::new(src).pascal_case()`.
pub fn pascal_case(src: &str) -> String {
    Name::new(src).pascal_case()
}

fn pascal_part(part: &str) -> String {
    let part = part.to_lowercase();

    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
