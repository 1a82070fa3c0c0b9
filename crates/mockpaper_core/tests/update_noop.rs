use mockpaper_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn form_edits_do_not_request_render() {
    let state = AppState::new();
    let (state, effects) = update(state, Msg::MockCountChanged("3".to_string()));
    let (mut state, more) = update(state, Msg::ApiKeyChanged("sk-test".to_string()));

    assert!(effects.is_empty());
    assert!(more.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state.form().mock_count, "3");
    assert_eq!(state.form().api_key, "sk-test");
}
