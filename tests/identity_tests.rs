//! Tests for filename based identity classification.

use nbcollect::{IdentityKind, classify, identity::Grammar};

#[test]
fn individual_key_is_the_digit_string() {
    for (name, key) in [
        ("h42_Jane_Doe_hw3.ipynb", "42"),
        ("h007_Jane_Doe_hw3.zip", "007"),
        ("h1234567_Jean-Luc_Picard_Übung 3.7z", "1234567"),
        ("h0_A_B_x", "0"),
    ] {
        let id = classify(name).unwrap_or_else(|| panic!("{name} should match"));
        assert_eq!(id.kind(), IdentityKind::Individual, "{name}");
        assert_eq!(id.key(), key, "{name}");
    }
}

#[test]
fn individual_keeps_the_rest_for_diagnostics() {
    let id = classify("h42_Jane_Doe_hw3_final_v2.ipynb").expect("match");
    assert_eq!(id.rest(), "hw3_final_v2.ipynb");
}

#[test]
fn group_key_is_prefixed() {
    for (name, key) in [
        ("Gruppe 7_Erika_Meier_hw3.zip", "group7"),
        ("Group 12_Max_Mustermann_hw3.7z", "group12"),
        ("Gruppe 03_A_B_hw3.zip", "group03"),
    ] {
        let id = classify(name).unwrap_or_else(|| panic!("{name} should match"));
        assert_eq!(id.kind(), IdentityKind::Group, "{name}");
        assert_eq!(id.key(), key, "{name}");
    }
}

#[test]
fn group_accepts_empty_name_segments() {
    for name in [
        "Gruppe 7__Meier_hw3.zip",
        "Gruppe 7_Erika__hw3.zip",
        "Gruppe 7___hw3.zip",
        "Group 7__hw3.zip",
        "Group 7_Meier_hw3.zip",
    ] {
        let id = classify(name).unwrap_or_else(|| panic!("{name} should match"));
        assert_eq!(id.kind(), IdentityKind::Group, "{name}");
        assert_eq!(id.key(), "group7", "{name}");
    }
}

#[test]
fn group_rest_follows_the_last_name_separator() {
    assert_eq!(classify("Gruppe 7__Meier_hw3.zip").unwrap().rest(), "hw3.zip");
    assert_eq!(classify("Gruppe 7_Erika_Meier_hw_3.zip").unwrap().rest(), "hw_3.zip");
}

#[test]
fn unrelated_names_do_not_match() {
    for name in [
        "hw3.ipynb",
        "submissions.zip",
        "h42_Jane_hw3.ipynb",
        "hx42_Jane_Doe_hw3.ipynb",
        "H42_Jane_Doe_hw3.ipynb",
        "Gruppe7_A_B_hw3.zip",
        "Team 7_A_B_hw3.zip",
        "Gruppe 7",
        "",
    ] {
        assert!(classify(name).is_none(), "{name} should not match");
    }
}

#[test]
fn individual_grammar_is_tried_first() {
    assert_eq!(Grammar::ORDERED, [Grammar::Individual, Grammar::Group]);
    assert!(Grammar::Group.attempt("h42_Jane_Doe_hw3.ipynb").is_none());
    assert!(Grammar::Individual.attempt("Gruppe 7_A_B_hw3.zip").is_none());
}

#[test]
fn classification_is_stable() {
    let name = "Gruppe 7__Meier_hw3.zip";
    assert_eq!(classify(name), classify(name));
}
