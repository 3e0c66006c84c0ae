use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the canonical FTL file per locale.
const FTL_FILENAME: &str = "betterrest-estimator.ftl";

/// Root (relative to crate) for i18n assets.
const I18N_DIR: &str = "i18n";

/// Extract message IDs from a Fluent file.
/// Any line of the form `<identifier> =` counts as a message definition.
/// Comments, terms (`-` prefix), variants and blank lines are ignored.
fn parse_ftl_keys(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(|line| line.split_once('=').map(|(id, _)| id.trim()))
        .filter(|id| !id.is_empty() && id.chars().all(valid_key_char))
        .map(str::to_string)
        .collect()
}

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

/// Every `t!("...")` literal under `src/`. Dynamic IDs and direct `fl!`
/// calls are not seen.
fn referenced_keys(src_root: &Path) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![src_root.to_path_buf()];

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(read_dir) = fs::read_dir(&path) {
                stack.extend(read_dir.flatten().map(|entry| entry.path()));
            }
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            found.extend(keys_in(&content));
        }
    }

    found
}

/// `t!("...")` literals in one source text. The macro name must start a
/// token, so `assert!("7"...)` is not a lookup.
fn keys_in(content: &str) -> BTreeSet<String> {
    const OPEN: &str = "t!(\"";
    let mut found = BTreeSet::new();

    for (i, _) in content.match_indices(OPEN) {
        let preceded_by_ident = content[..i]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');
        if preceded_by_ident {
            continue;
        }
        let rest = &content[i + OPEN.len()..];
        if let Some(end) = rest.find('"') {
            let key = &rest[..end];
            if !key.is_empty() && key.chars().all(valid_key_char) {
                found.insert(key.to_string());
            }
        }
    }

    found
}

fn locale_dirs(i18n_root: &Path) -> Vec<String> {
    let mut dirs: Vec<String> = fs::read_dir(i18n_root)
        .map(|read_dir| {
            read_dir
                .flatten()
                .filter(|entry| entry.path().is_dir())
                .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
                .filter(|name| name.contains('-'))
                .collect()
        })
        .unwrap_or_default();
    dirs.sort();
    dirs
}

#[test]
fn scanner_only_counts_translation_macros() {
    let src = concat!(
        "assert!(\"7\".parse::<u8>().is_ok());\n",
        "let a = crate::t!(\"error-title\");\n",
        "let b = t!(\"sleep-hours\", hours = 8);\n",
        "let c = format!(\"{}\", 1);\n",
    );
    let keys: Vec<_> = keys_in(src).into_iter().collect();
    assert_eq!(keys, ["error-title", "sleep-hours"]);
}

#[test]
fn i18n_completeness() {
    let crate_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let i18n_root = crate_root.join(I18N_DIR);

    // 1. Fallback locale (en-US) must exist
    let fallback_file = i18n_root.join("en-US").join(FTL_FILENAME);
    let fallback_content =
        fs::read_to_string(&fallback_file).expect("Failed to read fallback FTL file");
    let fallback_keys = parse_ftl_keys(&fallback_content);
    assert!(
        !fallback_keys.is_empty(),
        "No message keys parsed from fallback FTL: {:?}",
        fallback_file
    );

    // 2. Every key used in the sources is defined by the fallback.
    let referenced = referenced_keys(&crate_root.join("src"));
    let missing_in_fallback: Vec<_> = referenced.difference(&fallback_keys).collect();
    assert!(
        missing_in_fallback.is_empty(),
        "Referenced translation keys missing in fallback: {:?}",
        missing_in_fallback
    );

    // 3. Every locale defines every fallback key.
    let mut per_locale_missing: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for locale in locale_dirs(&i18n_root) {
        let path = i18n_root.join(&locale).join(FTL_FILENAME);
        assert!(path.exists(), "Locale folder {locale} missing {:?}", path);

        let keys = parse_ftl_keys(&fs::read_to_string(&path).unwrap_or_default());
        let missing: Vec<String> = fallback_keys.difference(&keys).cloned().collect();
        if !missing.is_empty() {
            per_locale_missing.insert(locale, missing);
        }
    }

    if !per_locale_missing.is_empty() {
        let mut report = String::from("Locales with missing translations relative to fallback:\n");
        for (loc, miss) in &per_locale_missing {
            report.push_str(&format!("  {loc} ({} missing)\n", miss.len()));
            for k in miss {
                report.push_str(&format!("    {k}\n"));
            }
        }
        panic!("{report}");
    }

    // 4. Unused fallback keys are reported, not failed.
    let unused: Vec<_> = fallback_keys.difference(&referenced).cloned().collect();
    if !unused.is_empty() {
        eprintln!(
            "[i18n] NOTE: {} fallback keys unused in Rust sources: {}",
            unused.len(),
            unused.join(", ")
        );
    }
}
