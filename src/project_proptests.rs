use super::*;
use proptest::prelude::*;

/// パスセグメントに使える文字列(区切り文字を含まない)
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9._-]{1,12}"
}

proptest! {
    /// 導出名は区切り文字を含まない
    #[test]
    fn prop_derived_name_has_no_separators(input in "[a-zA-Z0-9._/\\\\-]{0,40}") {
        if let Some(name) = derive_project_name(&input) {
            prop_assert!(!name.contains('/'));
            prop_assert!(!name.contains('\\'));
            prop_assert!(!name.is_empty());
        }
    }

    /// Unix 形式と Windows 形式で同じセグメント列は同じ名前になる
    #[test]
    fn prop_separator_style_is_irrelevant(
        segments in proptest::collection::vec(segment_strategy(), 1..5)
    ) {
        let unix = segments.join("/");
        let windows = segments.join("\\");

        prop_assert_eq!(
            derive_project_name(&unix),
            derive_project_name(&windows)
        );
        prop_assert_eq!(
            derive_project_name(&unix),
            Some(segments.last().unwrap().clone())
        );
    }
}
