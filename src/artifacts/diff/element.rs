//! Element contract for diffable sequences
//!
//! Anything that is `Clone + Eq + Hash` can be diffed. Text-like elements opt into
//! two extra capabilities by overriding the provided methods of [`Element`]:
//!
//! - line-mode acceleration, by naming a line terminator
//! - semantic cleanup scoring, by classifying each element

use bitflags::bitflags;
use std::hash::Hash;

/// Both cores must be strictly longer than this before line-mode kicks in
pub const DEFAULT_LINE_MODE_MIN_SIZE: usize = 1000;

bitflags! {
    /// Character classes consulted when scoring an edit boundary
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ElementClass: u8 {
        const NONE = 0b000;
        const ALPHANUMERIC = 0b001;
        const WHITESPACE = 0b010;
        const CONTROL = 0b100;
    }
}

impl ElementClass {
    pub fn is_alphanumeric(self) -> bool {
        self.contains(ElementClass::ALPHANUMERIC)
    }

    /// Whitespace only counts for elements that are not alphanumeric
    pub fn is_whitespace(self) -> bool {
        !self.is_alphanumeric() && self.contains(ElementClass::WHITESPACE)
    }

    /// A line break is whitespace that is also a control element (`\n`, `\r`, `\t`, ...)
    pub fn is_line_break(self) -> bool {
        self.is_whitespace() && self.contains(ElementClass::CONTROL)
    }
}

/// An atomic, comparable unit of a diffed sequence
pub trait Element: Clone + Eq + Hash {
    /// Element that ends a line. `None` disables line-mode for this type.
    fn line_terminator() -> Option<Self> {
        None
    }

    fn line_mode_min_size() -> usize {
        DEFAULT_LINE_MODE_MIN_SIZE
    }

    fn class(&self) -> ElementClass {
        ElementClass::NONE
    }
}

impl Element for char {
    fn line_terminator() -> Option<Self> {
        Some('\n')
    }

    fn class(&self) -> ElementClass {
        let mut class = ElementClass::NONE;
        if self.is_alphanumeric() {
            class |= ElementClass::ALPHANUMERIC;
        }
        if self.is_whitespace() {
            class |= ElementClass::WHITESPACE;
        }
        if self.is_control() {
            class |= ElementClass::CONTROL;
        }
        class
    }
}

impl Element for u8 {
    fn line_terminator() -> Option<Self> {
        Some(b'\n')
    }

    fn class(&self) -> ElementClass {
        let mut class = ElementClass::NONE;
        if self.is_ascii_alphanumeric() {
            class |= ElementClass::ALPHANUMERIC;
        }
        // `is_ascii_whitespace` leaves out vertical tab, which C's isspace accepts
        if self.is_ascii_whitespace() || *self == 0x0b {
            class |= ElementClass::WHITESPACE;
        }
        if self.is_ascii_control() {
            class |= ElementClass::CONTROL;
        }
        class
    }
}

macro_rules! impl_token_element {
    ($($ty:ty),* $(,)?) => {
        $(impl Element for $ty {})*
    };
}

// Integer tokens: line ids and other pre-interned sequences.
impl_token_element!(u16, u32, u64, usize, i32, i64);

// Whole-line tokens, e.g. the lines of two files.
impl Element for &str {}
impl Element for String {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('a', true, false, false)]
    #[case('7', true, false, false)]
    #[case(' ', false, true, false)]
    #[case('\n', false, true, true)]
    #[case('\t', false, true, true)]
    #[case('.', false, false, false)]
    fn test_char_classes(
        #[case] element: char,
        #[case] alphanumeric: bool,
        #[case] whitespace: bool,
        #[case] line_break: bool,
    ) {
        let class = element.class();
        assert_eq!(class.is_alphanumeric(), alphanumeric);
        assert_eq!(class.is_whitespace(), whitespace);
        assert_eq!(class.is_line_break(), line_break);
    }

    #[rstest]
    #[case(b'Z', true, false, false)]
    #[case(b' ', false, true, false)]
    #[case(b'\r', false, true, true)]
    #[case(b'!', false, false, false)]
    fn test_byte_classes(
        #[case] element: u8,
        #[case] alphanumeric: bool,
        #[case] whitespace: bool,
        #[case] line_break: bool,
    ) {
        let class = element.class();
        assert_eq!(class.is_alphanumeric(), alphanumeric);
        assert_eq!(class.is_whitespace(), whitespace);
        assert_eq!(class.is_line_break(), line_break);
    }

    #[test]
    fn test_tokens_have_no_line_mode() {
        assert_eq!(<usize as Element>::line_terminator(), None);
        assert_eq!(<&str as Element>::line_terminator(), None);
        assert_eq!(<char as Element>::line_terminator(), Some('\n'));
        assert_eq!(
            <char as Element>::line_mode_min_size(),
            DEFAULT_LINE_MODE_MIN_SIZE
        );
    }
}
