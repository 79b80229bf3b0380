//! Fuzz target for filter, correct and integrity check on loaded datasets.
//!
//! Run with:
//!   cargo +nightly fuzz run editor_pipeline

#![no_main]

use cocoedit::editor::{CocoEditor, CorrectOptions};
use cocoedit::filter::FilterKind;
use cocoedit::validation::IssueCode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(mut editor) = CocoEditor::from_json_str(text) else {
        return;
    };

    editor
        .add_box_area_filter(FilterKind::Exclusion, None, Some(16.0))
        .correct(CorrectOptions::new(true, true));

    let report = editor.integrity();
    assert_eq!(report.count_code(IssueCode::MissingImageRef), 0);
    assert_eq!(report.count_code(IssueCode::MissingCategoryRef), 0);
});
