use serde::{Deserialize, Serialize};
use std::fmt;

/// A store data type exactly as the database declares it, e.g.
/// `VARCHAR2(50)`, `NUMBER(10,0)` or `TIMESTAMP(6) WITH TIME ZONE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Type(String);

impl Type {
    pub fn new(src: impl Into<String>) -> Type {
        Type(src.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The type name without its arguments, upper-cased, with whitespace
    /// collapsed: `timestamp(6) with  time zone` → `TIMESTAMP WITH TIME ZONE`.
    pub fn base(&self) -> String {
        let mut stripped = String::with_capacity(self.0.len());
        let mut depth = 0usize;

        for ch in self.0.chars() {
            match ch {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ if depth == 0 => stripped.push(ch),
                _ => {}
            }
        }

        stripped
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase()
    }

    /// Numeric arguments of the first parenthesized group: `NUMBER(10,2)` →
    /// `[10, 2]`. Non-numeric arguments (`MAX`) are skipped.
    pub fn args(&self) -> Vec<u32> {
        let Some(start) = self.0.find('(') else {
            return vec![];
        };
        let Some(len) = self.0[start..].find(')') else {
            return vec![];
        };

        self.0[start + 1..start + len]
            .split(',')
            .filter_map(|arg| arg.trim().parse().ok())
            .collect()
    }

    /// Declared length of character and binary types.
    pub fn length(&self) -> Option<u32> {
        match self.base().as_str() {
            "CHAR" | "NCHAR" | "VARCHAR" | "VARCHAR2" | "NVARCHAR" | "NVARCHAR2"
            | "CHARACTER" | "VARYING CHARACTER" | "NATIVE CHARACTER" | "RAW" | "BINARY"
            | "VARBINARY" => self.args().first().copied(),
            _ => None,
        }
    }
}

impl From<&str> for Type {
    fn from(src: &str) -> Type {
        Type::new(src)
    }
}

impl From<String> for Type {
    fn from(src: String) -> Type {
        Type(src)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_strips_arguments() {
        assert_eq!(Type::new("VARCHAR2(50)").base(), "VARCHAR2");
        assert_eq!(Type::new("number(10, 2)").base(), "NUMBER");
        assert_eq!(
            Type::new("timestamp(6) with  time zone").base(),
            "TIMESTAMP WITH TIME ZONE"
        );
        assert_eq!(Type::new("").base(), "");
    }

    #[test]
    fn args() {
        assert_eq!(Type::new("NUMBER(10,2)").args(), vec![10, 2]);
        assert_eq!(Type::new("NVARCHAR(MAX)").args(), Vec::<u32>::new());
        assert_eq!(Type::new("INTEGER").args(), Vec::<u32>::new());
    }

    #[test]
    fn length_only_for_sized_types() {
        assert_eq!(Type::new("VARCHAR2(50)").length(), Some(50));
        assert_eq!(Type::new("RAW(16)").length(), Some(16));
        assert_eq!(Type::new("NUMBER(10)").length(), None);
    }
}
