//! Fuzz target: label file parsing
//!
//! Feeds arbitrary bytes through `LabelSet::parse` and the index lookup
//! and verifies:
//! - No panics, including on invalid UTF-8 (lossily converted first)
//! - A parsed set holds exactly one label per non-blank line
//! - Every index, in range or not, resolves to some category
//!
//! cargo fuzz run fuzz_label_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use wastesort::classify::Category;
use wastesort::classify::labels::LabelSet;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    for line in text.lines() {
        let _ = Category::from_label(line);
    }

    let lines = text.lines().filter(|l| !l.trim().is_empty()).count();
    if let Some(labels) = LabelSet::parse(&text) {
        assert_eq!(labels.len(), lines);
        for index in 0..=labels.len() {
            let _ = labels.category_at(index, Category::Organic);
        }
    }
});
