//! Trie alphabets.
//!
//! An [`Alphabet`] says how a lookup key is normalized into a word, how a
//! word decomposes into edge tokens, and how a node's cached prefix grows
//! by one token.

use std::fmt::{Debug, Display};

use taxon_types::Path;

/// The key space of a trie.
pub trait Alphabet {
    /// Edge label between a node and one of its children.
    type Token: Clone + Ord + Debug;
    /// Owned, normalized form of a key. Also the type of a node's prefix.
    type Word: Clone + Ord + Default + Debug + Display;
    /// Borrowed form callers pass to lookups and insertions.
    type Key: ?Sized;

    /// Normalize a key into the word that is actually indexed.
    fn standardize(key: &Self::Key) -> Self::Word;

    /// Split a standardized word into edge tokens, outermost first.
    fn tokens(word: &Self::Word) -> Vec<Self::Token>;

    /// The prefix of a child reached from `prefix` over `token`.
    fn extend(prefix: &Self::Word, token: &Self::Token) -> Self::Word;
}

/// Case-insensitive character alphabet: one node per lower-cased `char`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Chars;

impl Alphabet for Chars {
    type Token = char;
    type Word = String;
    type Key = str;

    fn standardize(key: &str) -> String {
        key.to_lowercase()
    }

    fn tokens(word: &String) -> Vec<char> {
        word.chars().collect()
    }

    fn extend(prefix: &String, token: &char) -> String {
        let mut out = String::with_capacity(prefix.len() + token.len_utf8());
        out.push_str(prefix);
        out.push(*token);
        out
    }
}

/// Path-level alphabet: one node per whole level. Levels compare exactly.
#[derive(Clone, Copy, Debug, Default)]
pub struct Levels;

impl Alphabet for Levels {
    type Token = String;
    type Word = Path;
    type Key = Path;

    fn standardize(key: &Path) -> Path {
        key.clone()
    }

    fn tokens(word: &Path) -> Vec<String> {
        word.levels().to_vec()
    }

    fn extend(prefix: &Path, token: &String) -> Path {
        prefix.concat(&Path::parse(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_fold_case() {
        assert_eq!(Chars::standardize("CaKe"), "cake");
        assert_eq!(Chars::tokens(&"ab".to_string()), vec!['a', 'b']);
        assert_eq!(Chars::extend(&"ca".to_string(), &'k'), "cak");
    }

    #[test]
    fn levels_keep_case() {
        let word = Levels::standardize(&Path::parse("/Reports/Q3"));
        assert_eq!(Levels::tokens(&word), vec!["Reports", "Q3"]);
        assert_eq!(
            Levels::extend(&Path::parse("/a"), &"b".to_string()),
            Path::parse("/a/b")
        );
    }
}
