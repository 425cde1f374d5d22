// src/parse/mod.rs
//! HTML extraction for the two site families.
//!
//! Parsers never fail on a missing element: an absent table or heading means
//! the site published nothing for that page, which is reported as
//! [`Parsed::NoData`] so the caller can move on to the next unit.

use scraper::{ElementRef, Selector};

pub mod oua;
pub mod plusliga;

/// Outcome of reading one document.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    Data(T),
    /// The expected element was absent; the reason names which one.
    NoData(&'static str),
}

impl<T> Parsed<T> {
    #[cfg(test)]
    pub(crate) fn data(self) -> Option<T> {
        match self {
            Parsed::Data(t) => Some(t),
            Parsed::NoData(_) => None,
        }
    }
}

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector should parse")
}

/// Text of every descendant node, each piece trimmed, joined without a separator.
pub(crate) fn stripped_text(el: &ElementRef) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

/// Trimmed text of a cell, reduced to its first line when it spans several.
pub(crate) fn first_line_text(el: &ElementRef) -> String {
    let text: String = el.text().collect();
    let text = text.trim();
    match text.split_once('\n') {
        Some((first, _)) => first.trim().to_string(),
        None => text.to_string(),
    }
}

/// Drops `head` leading and `tail` trailing rows; empty when nothing is left.
pub(crate) fn trim_rows<T>(mut rows: Vec<T>, head: usize, tail: usize) -> Vec<T> {
    if rows.len() <= head + tail {
        return Vec::new();
    }
    rows.truncate(rows.len() - tail);
    rows.drain(..head);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn cell_text_helpers() {
        let doc = Html::parse_fragment(
            "<div id='a'> Asseco <b> Resovia </b></div><div id='b'>\n  12  \n  (3)\n</div>",
        );
        let a = doc.select(&selector("#a")).next().unwrap();
        let b = doc.select(&selector("#b")).next().unwrap();
        assert_eq!(stripped_text(&a), "AssecoResovia");
        assert_eq!(first_line_text(&b), "12");
    }

    #[test]
    fn trim_rows_keeps_the_middle() {
        assert_eq!(trim_rows(vec![1, 2, 3, 4, 5, 6], 3, 2), vec![4]);
        assert_eq!(trim_rows(vec![1, 2, 3], 0, 2), vec![1]);
        assert!(trim_rows(vec![1, 2], 0, 2).is_empty());
        assert!(trim_rows(Vec::<u8>::new(), 3, 2).is_empty());
    }
}
