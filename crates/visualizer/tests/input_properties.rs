use bst_visualizer::{parse_value, App};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_integers_parse_back(n in any::<i64>()) {
        prop_assert_eq!(parse_value(&n.to_string()), Some(n));
    }

    #[test]
    fn prop_trailing_text_is_ignored(n in any::<i64>(), tail in "[a-z. ]{0,8}") {
        prop_assert_eq!(parse_value(&format!("  {n}{tail}")), Some(n));
    }

    #[test]
    fn prop_non_numeric_input_leaves_tree_alone(input in "[a-z ]{0,12}") {
        let mut app = App::default();
        prop_assert_eq!(app.insert_input(&input), None);
        prop_assert!(app.tree().is_empty());
    }

    #[test]
    fn prop_history_tracks_distinct_inserts(values in prop::collection::vec(-50i64..50, 1..30)) {
        let mut app = App::default();
        let mut distinct = values.clone();
        for value in values {
            app.insert_value(value);
        }
        distinct.sort_unstable();
        distinct.dedup();

        prop_assert_eq!(app.history().len(), distinct.len());
        prop_assert_eq!(bst_tree::visit_order(app.tree(), bst_tree::TraversalOrder::Inorder), distinct);
    }
}
