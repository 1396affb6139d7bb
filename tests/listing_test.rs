//! Tests for listing filters and limits.

mod common;

use archive_tools::policy::{DepthFilter, EntryFilter, PatternFilter};
use archive_tools::{
    list_archive, list_entries, open_archive, ArchiveEntry, Archiver, CallContext, Config,
    Error, Limits, ListArgs, ListOptions, DEFAULT_MAX_EXTRACT_SIZE,
};
use tempfile::tempdir;

fn entry(name: &str) -> ArchiveEntry {
    ArchiveEntry {
        name: name.to_string(),
        size: 0,
        permissions: String::new(),
    }
}

/// An archive with `count` files named `f000.txt`, `f001.txt`, ...
fn many_files(dir: &std::path::Path, count: usize) {
    let names: Vec<String> = (0..count).map(|i| format!("f{:03}.txt", i)).collect();
    let files: Vec<(&str, Option<&[u8]>)> = names
        .iter()
        .map(|n| (n.as_str(), Some(&b"x"[..])))
        .collect();
    common::write_zip_file(dir, "many.zip", &files);
}

// ============================================================================
// Patterns
// ============================================================================

#[test]
fn test_include_everything() {
    let dir = tempdir().unwrap();
    common::write_all_fixtures(dir.path());
    let archiver = Archiver::new(dir.path()).unwrap();

    for name in common::FIXTURES {
        let args = ListArgs {
            path: name.to_string(),
            include: Some(".*".to_string()),
            ..Default::default()
        };
        let result = archiver
            .list_archive_files(&CallContext::default(), &args)
            .unwrap();
        assert_eq!(result.filtered_files, result.total_files, "{}", name);
    }
}

#[test]
fn test_exclude_everything() {
    let dir = tempdir().unwrap();
    common::write_all_fixtures(dir.path());
    let archiver = Archiver::new(dir.path()).unwrap();

    for name in common::FIXTURES {
        let args = ListArgs {
            path: name.to_string(),
            exclude: Some(".*".to_string()),
            ..Default::default()
        };
        let result = archiver
            .list_archive_files(&CallContext::default(), &args)
            .unwrap();
        assert_eq!(result.filtered_files, 0, "{}", name);
        assert_eq!(result.displayed_files, 0);
        assert!(result.files.is_empty());
        // total counts entries before pattern filtering
        assert_eq!(result.total_files, 3);
    }
}

#[test]
fn test_include_suffix_pattern() {
    let dir = tempdir().unwrap();
    common::write_all_fixtures(dir.path());

    let args = ListArgs {
        path: "test.tar.gz".to_string(),
        include: Some(r"\.txt$".to_string()),
        ..Default::default()
    };
    let result = list_archive(dir.path(), &args).unwrap();
    assert_eq!(result.filtered_files, 1);
    assert_eq!(result.files[0].name, "foo/baar.txt");
}

#[test]
fn test_include_and_exclude_combined() {
    let dir = tempdir().unwrap();
    common::write_all_fixtures(dir.path());

    // Search semantics: a pattern may match anywhere in the name.
    let args = ListArgs {
        path: "test.cpio".to_string(),
        include: Some("ba".to_string()),
        exclude: Some("zz".to_string()),
        ..Default::default()
    };
    let result = list_archive(dir.path(), &args).unwrap();
    let names: Vec<_> = result.files.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["foo/baar.txt"]);
}

#[test]
fn test_empty_patterns_are_ignored() {
    let dir = tempdir().unwrap();
    common::write_all_fixtures(dir.path());

    let args = ListArgs {
        path: "test.zip".to_string(),
        include: Some(String::new()),
        exclude: Some(String::new()),
        ..Default::default()
    };
    let result = list_archive(dir.path(), &args).unwrap();
    assert_eq!(result.filtered_files, 3);
}

#[test]
fn test_invalid_pattern() {
    let dir = tempdir().unwrap();
    common::write_all_fixtures(dir.path());

    for (include, exclude) in [(Some("("), None), (None, Some("[a-"))] {
        let args = ListArgs {
            path: "test.zip".to_string(),
            include: include.map(String::from),
            exclude: exclude.map(String::from),
            ..Default::default()
        };
        let err = list_archive(dir.path(), &args).unwrap_err();
        match err {
            Error::InvalidPattern { pattern, .. } => {
                assert_eq!(Some(pattern.as_str()), include.or(exclude));
            }
            other => panic!("expected InvalidPattern, got {:?}", other),
        }
    }
}

#[test]
fn test_invalid_pattern_before_format() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"hi").unwrap();

    let args = ListArgs {
        path: "notes.txt".to_string(),
        include: Some("(".to_string()),
        ..Default::default()
    };
    let err = list_archive(dir.path(), &args).unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { .. }), "{:?}", err);
}

#[test]
fn test_pattern_filter_direct() {
    let filter = PatternFilter::new(Some("^foo/"), Some(r"\.txt$")).unwrap();
    assert!(filter.admits(&entry("foo/bazz")));
    assert!(!filter.admits(&entry("foo/baar.txt")));
    assert!(!filter.admits(&entry("bar/bazz")));

    assert!(PatternFilter::new(None, Some("")).unwrap().is_noop());
}

// ============================================================================
// Depth
// ============================================================================

#[test]
fn test_depth_counts_segments() {
    assert_eq!(DepthFilter::depth_of("foo"), 1);
    assert_eq!(DepthFilter::depth_of("foo/"), 1);
    assert_eq!(DepthFilter::depth_of("/foo/bar/"), 2);
    assert_eq!(DepthFilter::depth_of("a/b/c.txt"), 3);

    let filter = DepthFilter::new(2);
    assert!(filter.admits(&entry("a/b")));
    assert!(!filter.admits(&entry("a/b/c")));
    assert!(DepthFilter::new(0).admits(&entry("a/b/c/d/e")));
}

// ============================================================================
// Limits
// ============================================================================

#[test]
fn test_limit_default_is_one_hundred() {
    let dir = tempdir().unwrap();
    many_files(dir.path(), 150);

    let args = ListArgs {
        path: "many.zip".to_string(),
        ..Default::default()
    };
    let result = list_archive(dir.path(), &args).unwrap();
    assert_eq!(result.total_files, 150);
    assert_eq!(result.filtered_files, 150);
    assert_eq!(result.displayed_files, 100);
    assert_eq!(result.files.len(), 100);
    println!("✅ default limit applied: 100 of 150");
}

#[test]
fn test_limit_returns_prefix() {
    let dir = tempdir().unwrap();
    many_files(dir.path(), 20);

    let args = ListArgs {
        path: "many.zip".to_string(),
        limit: 5,
        ..Default::default()
    };
    let result = list_archive(dir.path(), &args).unwrap();
    assert_eq!(result.displayed_files, 5);
    let names: Vec<_> = result.files.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        ["f000.txt", "f001.txt", "f002.txt", "f003.txt", "f004.txt"]
    );
}

#[test]
fn test_limit_above_count() {
    let dir = tempdir().unwrap();
    many_files(dir.path(), 7);

    let args = ListArgs {
        path: "many.zip".to_string(),
        limit: 1000,
        ..Default::default()
    };
    let result = list_archive(dir.path(), &args).unwrap();
    assert_eq!(result.displayed_files, 7);
}

#[test]
fn test_configured_default_limit() {
    let dir = tempdir().unwrap();
    many_files(dir.path(), 30);

    let archiver = Archiver::new(dir.path()).unwrap().limits(Limits {
        default_list_limit: 10,
        ..Limits::default()
    });
    let args = ListArgs {
        path: "many.zip".to_string(),
        ..Default::default()
    };
    let result = archiver
        .list_archive_files(&CallContext::default(), &args)
        .unwrap();
    assert_eq!(result.displayed_files, 10);
    assert_eq!(result.filtered_files, 30);
}

#[test]
fn test_effective_limit() {
    let options = ListOptions::default();
    assert_eq!(options.effective_limit(0), 100);
    assert_eq!(options.effective_limit(25), 25);

    let options = ListOptions {
        limit: 3,
        ..Default::default()
    };
    assert_eq!(options.effective_limit(25), 3);
}

#[test]
fn test_filters_apply_in_order() {
    let dir = tempdir().unwrap();
    common::write_all_fixtures(dir.path());

    // depth first, then patterns, then limit
    let options = ListOptions {
        depth: 2,
        limit: 1,
        include: Some("foo/".to_string()),
        exclude: None,
    };
    let reader = open_archive(dir.path().join("test.tar.gz")).unwrap();
    let result = list_entries(reader, &options, 0).unwrap();

    assert_eq!(result.total_files, 3);
    assert_eq!(result.filtered_files, 3);
    assert_eq!(result.displayed_files, 1);
    assert_eq!(result.files[0].name.trim_end_matches('/'), "foo");
}

#[test]
fn test_listing_serializes_with_snake_case_keys() {
    let dir = tempdir().unwrap();
    common::write_all_fixtures(dir.path());

    let args = ListArgs {
        path: "test.cpio".to_string(),
        ..Default::default()
    };
    let result = list_archive(dir.path(), &args).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["total_files"], 3);
    assert_eq!(json["filtered_files"], 3);
    assert_eq!(json["displayed_files"], 3);
    assert_eq!(json["files"][1]["name"], "foo/baar.txt");
    assert_eq!(json["files"][1]["size"], 27);
    assert_eq!(json["files"][1]["permissions"], "0100644");
}

#[test]
fn test_list_args_deserialize_with_defaults() {
    let args: ListArgs = serde_json::from_str(r#"{"path": "a.zip"}"#).unwrap();
    assert_eq!(args.path, "a.zip");
    assert_eq!(args.depth, 0);
    assert_eq!(args.limit, 0);
    assert!(args.include.is_none());
}

#[test]
fn test_config_from_json() {
    let dir = tempdir().unwrap();
    many_files(dir.path(), 30);

    let config: Config = serde_json::from_value(serde_json::json!({
        "workdir": dir.path(),
        "default_list_limit": 10,
    }))
    .unwrap();
    assert_eq!(config.limits.default_list_limit, 10);
    assert_eq!(config.limits.max_extract_size, DEFAULT_MAX_EXTRACT_SIZE);

    let archiver = Archiver::from_config(&config).unwrap();
    let args = ListArgs {
        path: "many.zip".to_string(),
        ..Default::default()
    };
    let result = archiver
        .list_archive_files(&CallContext::default(), &args)
        .unwrap();
    assert_eq!(result.displayed_files, 10);
}
