use genrecli::genres::{ALL_GENRES, GENRE_KEYWORDS, MacroGenre, classify};

#[test]
fn test_classify_empty_input() {
    let genres: Vec<String> = Vec::new();
    assert_eq!(classify(&genres), MacroGenre::Unknown);
}

#[test]
fn test_classify_unknown_sentinel() {
    assert_eq!(classify(&["Unknown"]), MacroGenre::Unknown);
}

#[test]
fn test_classify_no_keyword_match() {
    assert_eq!(classify(&["corecore", "zolo"]), MacroGenre::Unknown);
}

#[test]
fn test_classify_is_case_insensitive() {
    assert_eq!(classify(&["JAZZ"]), MacroGenre::Jazz);
    assert_eq!(classify(&["Hard Rock"]), MacroGenre::Rock);
}

#[test]
fn test_classify_first_matching_tag_wins() {
    // the first tag matches nothing, the second decides
    assert_eq!(classify(&["zolo", "vocal jazz"]), MacroGenre::Jazz);
    // the first tag already matches, later tags are ignored
    assert_eq!(classify(&["dark trap", "classical"]), MacroGenre::HipHop);
}

#[test]
fn test_classify_indie_rock_is_rock() {
    assert_eq!(classify(&["indie rock"]), MacroGenre::Rock);
    assert_eq!(classify(&["indie rock", "jazz"]), MacroGenre::Rock);
}

#[test]
fn test_classify_table_order_resolves_ambiguity() {
    // "indie pop" contains both a Pop and a Rock keyword; "pop" comes
    // first in the table
    assert_eq!(classify(&["indie pop"]), MacroGenre::Pop);
    assert_eq!(classify(&["pop rock"]), MacroGenre::Pop);
    // "dubstep" must win over the later "dub" (Reggae) key
    assert_eq!(classify(&["dubstep"]), MacroGenre::Electronic);
}

#[test]
fn test_classify_common_tags() {
    assert_eq!(classify(&["synthpop"]), MacroGenre::Pop);
    assert_eq!(classify(&["detroit techno"]), MacroGenre::Electronic);
    assert_eq!(classify(&["boom bap"]), MacroGenre::HipHop);
    assert_eq!(classify(&["reggaeton"]), MacroGenre::Latin);
    assert_eq!(classify(&["neo soul"]), MacroGenre::RnbSoul);
    assert_eq!(classify(&["bluegrass"]), MacroGenre::Country);
    assert_eq!(classify(&["indie folk"]), MacroGenre::Rock); // "indie" precedes "folk"
    assert_eq!(classify(&["dancehall"]), MacroGenre::Reggae);
    assert_eq!(classify(&["delta blues"]), MacroGenre::Blues);
    assert_eq!(classify(&["afrobeat"]), MacroGenre::World);
    assert_eq!(classify(&["soundtrack"]), MacroGenre::Other);
    assert_eq!(classify(&["baroque"]), MacroGenre::Classical);
}

#[test]
fn test_keyword_table_order_is_pinned() {
    let position = |keyword: &str| {
        GENRE_KEYWORDS
            .iter()
            .position(|(k, _)| *k == keyword)
            .unwrap_or_else(|| panic!("keyword {} missing from table", keyword))
    };

    // the orderings the classifier contract depends on
    assert!(position("pop") < position("rock"));
    assert!(position("pop") < position("indie"));
    assert!(position("rock") < position("indie"));
    assert!(position("dubstep") < position("dub"));
    assert!(position("rap") < position("pop"));
}

#[test]
fn test_labels_round_trip() {
    for genre in ALL_GENRES {
        assert_eq!(MacroGenre::from_label(genre.label()), Some(*genre));
    }

    assert_eq!(MacroGenre::from_label("rock"), Some(MacroGenre::Rock));
    assert_eq!(MacroGenre::from_label(" hip-hop "), Some(MacroGenre::HipHop));
    assert_eq!(MacroGenre::from_label("r&b / soul"), Some(MacroGenre::RnbSoul));
    assert_eq!(MacroGenre::from_label("not a genre"), None);
}

#[test]
fn test_spanish_labels() {
    assert_eq!(MacroGenre::Unknown.label_es(), "Desconocido");
    assert_eq!(MacroGenre::Electronic.label_es(), "Electrónica");
    assert_eq!(MacroGenre::World.label_es(), "Música del Mundo");
    // untranslated labels fall back to the English ones
    assert_eq!(MacroGenre::Pop.label_es(), "Pop");
    assert_eq!(MacroGenre::Jazz.label_es(), "Jazz");
}
