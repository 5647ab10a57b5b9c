mod common;

use common::{assert_invariants, nav, tabs, view};
use proptest::prelude::*;
use reactor_nav::mvi::Reducer;
use reactor_nav::nav::tree::find_visible_view;
use reactor_nav::nav::{
    NavContainerState, NavigationCommand, NavigationEvent, NavigationReducer, NavigationState,
    ReactorViewState, ViewContainerState,
};

/// Tags present in the fixtures, plus modal tags and one that never exists.
const TAGS: &[&str] = &["root", "tabs", "t0", "t1", "sheet", "picker", "missing"];
/// Presented containers may collide with existing tags but never use `missing`.
const MODAL_TAGS: &[&str] = &["root", "tabs", "t0", "t1", "sheet", "picker"];
const KEYS: &[&str] = &["A", "B", "C"];

fn root_fixture(which: usize) -> ViewContainerState {
    match which {
        0 => nav("root", &["R0"]).into(),
        1 => tabs("tabs", vec![nav("t0", &["V0"]), nav("t1", &["V1"])], 0).into(),
        _ => tabs(
            "tabs",
            vec![
                nav("t0", &["V0", "V1"]),
                nav("t1", &["W0"]).with_modal(nav("sheet", &["S0"])).unwrap(),
            ],
            1,
        )
        .into(),
    }
}

fn root_strategy() -> impl Strategy<Value = ViewContainerState> {
    (0usize..3).prop_map(root_fixture)
}

fn tag_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(TAGS.to_vec()).prop_map(|tag| tag.to_string())
}

fn view_strategy() -> impl Strategy<Value = ReactorViewState> {
    prop::sample::select(KEYS.to_vec()).prop_map(|key| view(key))
}

fn container_strategy() -> impl Strategy<Value = NavContainerState> {
    (
        prop::sample::select(MODAL_TAGS.to_vec()),
        prop::collection::vec(prop::sample::select(KEYS.to_vec()), 1..3),
    )
        .prop_map(|(tag, keys)| nav(tag, &keys))
}

fn event_strategy() -> impl Strategy<Value = NavigationEvent> {
    prop_oneof![
        (tag_strategy(), 0usize..4)
            .prop_map(|(tag, index)| NavigationEvent::ChangeContainerIndex { tag, index }),
        (tag_strategy(), container_strategy())
            .prop_map(|(tag, container)| NavigationEvent::PresentModally { tag, container }),
        tag_strategy().prop_map(|tag| NavigationEvent::DismissModal { tag }),
        (tag_strategy(), view_strategy())
            .prop_map(|(tag, view)| NavigationEvent::PushNavView { tag, view }),
        tag_strategy().prop_map(|tag| NavigationEvent::PopNavView { tag }),
        (tag_strategy(), prop::option::of(view_strategy()))
            .prop_map(|(tag, view)| NavigationEvent::UnwindToView { tag, view }),
        (tag_strategy(), view_strategy())
            .prop_map(|(tag, view)| NavigationEvent::ReplaceNavView { tag, view }),
        (tag_strategy(), prop::collection::vec(view_strategy(), 0..4))
            .prop_map(|(tag, views)| NavigationEvent::ReplaceNavViewStack { tag, views }),
        any::<bool>()
            .prop_map(|in_foreground| NavigationEvent::AppContextChanged { in_foreground }),
        root_strategy()
            .prop_map(|container| NavigationEvent::ReplaceRootContainer { container }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn any_event_sequence_keeps_the_tree_well_formed(
        root in root_strategy(),
        events in prop::collection::vec(event_strategy(), 1..40),
    ) {
        let mut state = NavigationState::new(root);
        for event in events {
            let before = state.clone();
            let missing_target = event.target_tag() == Some("missing");
            let (next, commands) = NavigationReducer::reduce(state, event);

            prop_assert_eq!(commands.len(), 1, "every event yields exactly one command");
            assert_invariants(&next);
            prop_assert!(find_visible_view(next.root_view_container()).is_some());

            if missing_target {
                prop_assert_eq!(&commands[0], &NavigationCommand::HiddenUpdate);
                prop_assert_eq!(&next, &before);
            }
            state = next;
        }
    }

    #[test]
    fn hidden_updates_never_change_the_visible_view(
        root in root_strategy(),
        events in prop::collection::vec(event_strategy(), 1..40),
    ) {
        let mut state = NavigationState::new(root);
        for event in events {
            let before = find_visible_view(state.root_view_container()).cloned();
            let (next, commands) = NavigationReducer::reduce(state, event);
            if commands[0] == NavigationCommand::HiddenUpdate {
                let after = find_visible_view(next.root_view_container()).cloned();
                prop_assert_eq!(before, after);
            }
            state = next;
        }
    }
}
