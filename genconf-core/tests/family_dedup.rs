/// Family-name equality must ignore case and blank runs, and nothing else.
use genconf_core::family::{normalize_family, FamilyMap};
use proptest::prelude::*;

fn respace(name: &str, gaps: &[usize]) -> String {
    let mut out = String::new();
    for (i, word) in name.split(' ').enumerate() {
        let width = gaps.get(i).copied().unwrap_or(1);
        out.push_str(&" ".repeat(width));
        out.push_str(word);
    }
    out
}

proptest! {
    #[test]
    fn case_and_blank_variants_collide(
        words in prop::collection::vec("[A-Za-z0-9]{1,8}", 1..4),
        gaps in prop::collection::vec(0usize..4, 0..5),
        upper in any::<bool>(),
    ) {
        let name = words.join(" ");
        let mut variant = respace(&name, &gaps);
        if upper {
            variant = variant.to_uppercase();
        }

        let mut map = FamilyMap::new();
        prop_assert!(map.insert_first(&name, 1));
        prop_assert!(!map.insert_first(&variant, 2));
        prop_assert_eq!(map.get(&variant), Some(&1));
    }

    #[test]
    fn normalization_is_idempotent(name in "[A-Za-zÀ-ÿ0-9 \\t]{0,24}") {
        let once = normalize_family(&name);
        prop_assert_eq!(normalize_family(&once), once);
    }
}

#[test]
fn differing_letters_do_not_collide() {
    let mut map = FamilyMap::new();
    assert!(map.insert_first("DejaVu Sans", ()));
    assert!(map.insert_first("DejaVu Sans Mono", ()));
    assert!(map.insert_first("DejaVu Serif", ()));
    assert_eq!(map.len(), 3);
}
