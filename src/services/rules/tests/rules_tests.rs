use super::*;
use std::fs;
use tempfile::TempDir;

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_patterns_match_from_start_only() {
    let matcher = Matcher::compile("btn_").unwrap();
    assert!(matcher.is_match("btn_close"));
    assert!(!matcher.is_match("big_btn_close"));
}

#[test]
fn test_global_and_per_file_entries_are_selected() {
    let rules = RuleSet::from_json(
        r#"{
            "skip": ["debug_", {"ui.sc": ["hud_"], "other.sc": ["menu_"]}],
            "split": []
        }"#,
    )
    .unwrap();

    let ui = rules.for_container("ui.sc");
    assert!(ui.is_skipped("debug_grid"));
    assert!(ui.is_skipped("hud_top"));
    assert!(!ui.is_skipped("menu_main"));

    let other = rules.for_container("other.sc");
    assert!(other.is_skipped("menu_main"));
    assert!(!other.is_skipped("hud_top"));
}

#[test]
fn test_clip_skipped_only_when_every_export_is_skipped() {
    let rules = RuleSet::from_json(r#"{"skip": ["debug_"], "split": []}"#)
        .unwrap()
        .for_container("a.sc");

    assert!(rules.skips_all(&names(&["debug_a", "debug_b"])));
    assert!(!rules.skips_all(&names(&["debug_a", "title"])));
    assert_eq!(rules.kept_exports(&names(&["debug_a", "title"])), names(&["title"]));
}

#[test]
fn test_document_key_appends_sanitized_split_suffixes() {
    let rules = RuleSet::from_json(r#"{"skip": [], "split": ["shop.*", "sh"]}"#)
        .unwrap()
        .for_container("a.sc");

    assert_eq!(rules.document_key(30, &names(&["title"])), "30");
    // The first matching export decides; both patterns match it.
    assert_eq!(
        rules.document_key(24, &names(&["title", "shop_item", "sh_other"])),
        "24_shop._sh"
    );
}

#[test]
fn test_suffix_strips_regex_metacharacters() {
    let matcher = Matcher::compile(r"loot_(box|chest)[0-9]+$").unwrap();
    assert_eq!(matcher.suffix(), "loot_(boxchest)0-9");
}

#[test]
fn test_absent_or_null_lists_mean_no_rules() {
    let rules = RuleSet::from_json(r#"{"skip": null}"#).unwrap();
    let container = rules.for_container("ui.sc");
    assert!(!container.is_skipped("debug_grid"));
    assert_eq!(container.document_key(30, &names(&["shop_offer"])), "30");
}

#[test]
fn test_malformed_entries_are_rejected() {
    for json in [
        r#"{"skip": [42], "split": []}"#,
        r#"{"skip": "debug_", "split": []}"#,
        r#"{"skip": [{"a.sc": "debug_"}], "split": []}"#,
        r#"{"skip": [], "split": ["(unclosed"]}"#,
        r#"["skip"]"#,
        r#"{"skip": [["debug_"]]}"#,
        r#"{"split": [{"a.sc": [7]}]}"#,
        "not json",
    ] {
        let err = RuleSet::from_json(json).unwrap_err();
        assert!(
            matches!(err, ConvertError::MalformedRule(_)),
            "expected MalformedRule for {json}, got {err:?}"
        );
    }
}

#[test]
fn test_load_missing_file_yields_empty_rules() {
    let temp = TempDir::new().unwrap();
    let rules = RuleSet::load(&temp.path().join("blacklist.json"))
        .unwrap()
        .for_container("a.sc");
    assert!(!rules.is_skipped("anything"));
    assert_eq!(rules.document_key(60, &names(&["anything"])), "60");
}

#[test]
fn test_load_reads_rule_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("blacklist.json");
    fs::write(&path, r#"{"skip": ["tmp_"], "split": ["event"]}"#).unwrap();

    let rules = RuleSet::load(&path).unwrap().for_container("a.sc");
    assert!(rules.is_skipped("tmp_1"));
    assert_eq!(rules.document_key(30, &names(&["event_xmas"])), "30_event");
}
