//! Static element selectors.
//!
//! The markup contract only ever needs a handful of simple selectors, so they
//! are plain `Copy` values that render to CSS for the browser and match
//! directly against the in-memory document.

use std::fmt;

/// A simple CSS selector (no combinators).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// `tag`
    Tag(&'static str),
    /// `.class`
    Class(&'static str),
    /// `#id`
    Id(&'static str),
    /// `[attr]`
    HasAttr(&'static str),
    /// `[attr^="prefix"]`
    AttrPrefix(&'static str, &'static str),
    /// Compound selector; every part must match.
    All(&'static [Selector]),
}

/// Anything a [`Selector`] can be tested against.
pub trait Matchable {
    fn tag_name(&self) -> &str;
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl Selector {
    /// Test the selector against a single element.
    pub fn matches(&self, element: &impl Matchable) -> bool {
        match *self {
            Selector::Tag(tag) => element.tag_name().eq_ignore_ascii_case(tag),
            Selector::Class(class) => element.has_class(class),
            Selector::Id(id) => element.attribute("id") == Some(id),
            Selector::HasAttr(name) => element.attribute(name).is_some(),
            Selector::AttrPrefix(name, prefix) => element
                .attribute(name)
                .is_some_and(|value| value.starts_with(prefix)),
            Selector::All(parts) => parts.iter().all(|part| part.matches(element)),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Selector::Tag(tag) => write!(f, "{}", tag),
            Selector::Class(class) => write!(f, ".{}", class),
            Selector::Id(id) => write!(f, "#{}", id),
            Selector::HasAttr(name) => write!(f, "[{}]", name),
            Selector::AttrPrefix(name, prefix) => write!(f, "[{}^=\"{}\"]", name, prefix),
            Selector::All(parts) => {
                // Type selectors must lead a compound selector
                let (tags, rest): (Vec<&Selector>, Vec<&Selector>) =
                    parts.iter().partition(|p| matches!(p, Selector::Tag(_)));
                for part in tags.into_iter().chain(rest) {
                    write!(f, "{}", part)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fake {
        tag: &'static str,
        classes: Vec<&'static str>,
        attrs: Vec<(&'static str, &'static str)>,
    }

    impl Matchable for Fake {
        fn tag_name(&self) -> &str {
            self.tag
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.contains(&class)
        }

        fn attribute(&self, name: &str) -> Option<&str> {
            self.attrs.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
        }
    }

    const LINK: Selector = Selector::All(&[
        Selector::AttrPrefix("href", "./"),
        Selector::Tag("a"),
    ]);

    #[test]
    fn renders_css() {
        assert_eq!(Selector::Class("card").to_string(), ".card");
        assert_eq!(Selector::HasAttr("data-src").to_string(), "[data-src]");
        assert_eq!(LINK.to_string(), "a[href^=\"./\"]");
    }

    #[test]
    fn compound_requires_every_part() {
        let anchor = Fake {
            tag: "A",
            classes: vec![],
            attrs: vec![("href", "./models.html")],
        };
        let fragment = Fake {
            tag: "a",
            classes: vec![],
            attrs: vec![("href", "#top")],
        };
        assert!(LINK.matches(&anchor));
        assert!(!LINK.matches(&fragment));
    }

    #[test]
    fn id_and_class() {
        let el = Fake {
            tag: "div",
            classes: vec!["card", "featured"],
            attrs: vec![("id", "hero")],
        };
        assert!(Selector::Id("hero").matches(&el));
        assert!(Selector::Class("featured").matches(&el));
        assert!(!Selector::Class("gallery-item").matches(&el));
    }
}
