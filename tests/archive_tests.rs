//! Tests for container extraction and member filtering.

use std::{
    fs,
    path::{Path, PathBuf},
};

use nbcollect::{
    CollectError,
    archive::{extract, filter_members, keep_member, open},
};
use pretty_assertions::assert_eq;


use archive_support::{files_below, notebook, write_file, write_zip};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn platform_metadata_is_dropped() {
    let listing = names(&[
        "__MACOSX/",
        "__MACOSX/._sol.ipynb",
        ".DS_Store",
        "sol.ipynb",
        "data/",
        "data/.hidden.csv",
        "data/input.csv",
        ".git/config",
        "nested/.ipynb_checkpoints/sol-checkpoint.ipynb",
    ]);

    assert_eq!(filter_members(listing), names(&["sol.ipynb", "data/", "data/input.csv"]));
}

#[test]
fn filtering_is_idempotent() {
    let listing = names(&[
        "__MACOSX/x",
        "a/.b/c",
        "._a.ipynb",
        "a.ipynb",
        "data/x.csv",
        "deep/data/y.csv",
    ]);

    let once = filter_members(listing);
    let twice = filter_members(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn keep_member_only_looks_at_segments() {
    assert!(keep_member("hw.3/sol.ipynb"));
    assert!(keep_member("MACOSX/sol.ipynb"));
    assert!(!keep_member("./sol.ipynb"));
}

#[test]
fn zip_extraction_writes_only_kept_members_in_order() {
    let tmp = tempfile::tempdir().unwrap();
    let nb = notebook("sol");
    let archive = write_zip(
        &tmp.path().join("in.zip"),
        &[
            ("__MACOSX/._sol.ipynb", Some(b"junk".as_slice())),
            ("sol.ipynb", Some(nb.as_slice())),
            ("data/", None),
            ("data/input.csv", Some(b"1,2,3".as_slice())),
            (".DS_Store", Some(b"junk".as_slice())),
        ],
    );
    let scratch = tmp.path().join("scratch");
    fs::create_dir_all(&scratch).unwrap();

    let extracted = extract(&archive, &scratch).expect("extract zip");

    assert_eq!(
        extracted,
        vec![scratch.join("sol.ipynb"), scratch.join("data"), scratch.join("data/input.csv")]
    );
    assert_eq!(files_below(&scratch), vec!["data/input.csv", "sol.ipynb"]);
    assert_eq!(fs::read(scratch.join("sol.ipynb")).unwrap(), nb);
}

#[test]
fn sevenz_extraction_round_trips_files() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    write_file(&src.join("sol.ipynb"), &notebook("7z"));
    write_file(&src.join("data/input.csv"), b"a,b");
    write_file(&src.join(".hidden"), b"junk");

    let archive = tmp.path().join("in.7z");
    sevenz_rust::compress_to_path(&src, &archive).expect("compress 7z");

    let scratch = tmp.path().join("scratch");
    fs::create_dir_all(&scratch).unwrap();
    let extracted = extract(&archive, &scratch).expect("extract 7z");

    assert_eq!(extracted, listed_below(&archive, &scratch));
    assert!(extracted.iter().any(|p| p.ends_with("sol.ipynb")));
    assert!(extracted.iter().any(|p| p.ends_with("data/input.csv")));
    assert!(!extracted.iter().any(|p| p.ends_with(".hidden")));
    assert!(!extracted.contains(&scratch));
    assert_eq!(fs::read(scratch.join("data/input.csv")).unwrap(), b"a,b");
}

/// Kept, non-root members of `archive` in listing order, resolved below `dest`.
fn listed_below(archive: &Path, dest: &Path) -> Vec<PathBuf> {
    let members = open(archive).expect("open archive").members().expect("list members");
    filter_members(members)
        .into_iter()
        .filter(|name| !name.trim_matches('/').is_empty())
        .map(|name| dest.join(name))
        .collect()
}

#[test]
fn sevenz_extraction_follows_listing_order() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    // an empty file is stored outside the compressed folder and decoded apart
    write_file(&src.join("a_empty.ipynb"), b"");
    write_file(&src.join("b_full.ipynb"), &notebook("full"));
    write_file(&src.join("data/x.csv"), b"1");

    let archive = tmp.path().join("in.7z");
    sevenz_rust::compress_to_path(&src, &archive).expect("compress 7z");

    let scratch = tmp.path().join("scratch");
    fs::create_dir_all(&scratch).unwrap();
    let extracted = extract(&archive, &scratch).expect("extract 7z");

    assert_eq!(extracted, listed_below(&archive, &scratch));
    assert_eq!(extracted.len(), 4);
    assert_eq!(fs::read(scratch.join("b_full.ipynb")).unwrap(), notebook("full"));
}

#[test]
fn unknown_extension_is_unsupported() {
    let tmp = tempfile::tempdir().unwrap();
    let archive = write_file(&tmp.path().join("in.rar"), b"Rar!");

    let err = extract(&archive, tmp.path()).unwrap_err();
    assert!(matches!(err, CollectError::UnsupportedFormat { .. }), "{err:?}");
}

#[test]
fn garbage_zip_is_corrupt() {
    let tmp = tempfile::tempdir().unwrap();
    let archive = write_file(&tmp.path().join("in.zip"), b"definitely not a zip file");

    let err = extract(&archive, tmp.path()).unwrap_err();
    assert!(matches!(err, CollectError::CorruptArchive { .. }), "{err:?}");
}

#[test]
fn garbage_7z_is_corrupt() {
    let tmp = tempfile::tempdir().unwrap();
    let archive = write_file(&tmp.path().join("in.7z"), b"definitely not a 7z file");

    let err = extract(&archive, tmp.path()).unwrap_err();
    assert!(matches!(err, CollectError::CorruptArchive { .. }), "{err:?}");
}
