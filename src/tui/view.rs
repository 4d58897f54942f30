//! Interactive schedule browser
//!
//! Owns a [`BrowserState`] in an iocraft state hook. Store snapshots arrive
//! through a watch subscription; commands produced by the reducer are run
//! on the store by an async handler.

// Allow clone on Copy types - used intentionally in async closures for clarity
#![allow(clippy::clone_on_copy)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use iocraft::prelude::*;

use crate::forms::StaleSubjectsPolicy;
use crate::gateway::HttpGateway;
use crate::store::{Command, Store};
use crate::tui::components::{
    Footer, Header, ModalBorderColor, ModalContainer, ModalLayer, ScheduleForm, ScheduleTable,
    render_toast,
};
use crate::tui::model::{
    BrowserAction, BrowserState, compute_browser_view, key_to_action, reduce_browser_state,
};
use crate::tui::theme::theme;

const TOAST_POLL: Duration = Duration::from_millis(500);

#[derive(Default, Props)]
pub struct ScheduleBrowserProps {
    pub store: Option<Arc<Store<HttpGateway>>>,
    pub page_size: usize,
    pub policy: StaleSubjectsPolicy,
}

/// Run one action through the reducer and hand its commands to the store
fn apply(state: &mut State<BrowserState>, action: BrowserAction, dispatch: &Handler<Command>) {
    let current = state.read().clone();
    let (next, commands) = reduce_browser_state(current, action);
    state.set(next);
    for command in commands {
        dispatch.clone()(command);
    }
}

#[component]
pub fn ScheduleBrowser<'a>(
    props: &ScheduleBrowserProps,
    mut hooks: Hooks,
) -> impl Into<AnyElement<'a>> {
    let theme = theme();
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();

    let page_size = props.page_size;
    let policy = props.policy;
    let mut browser = hooks.use_state(move || BrowserState::new(page_size, policy));

    let dispatch: Handler<Command> = hooks.use_async_handler({
        let store = props.store.clone();
        move |command: Command| {
            let store = store.clone();
            async move {
                let Some(store) = store else {
                    return;
                };
                if let Err(e) = store.dispatch(command).await {
                    tracing::debug!("browser command failed: {}", e);
                }
            }
        }
    });

    // Feed store snapshots back into the browser state
    hooks.use_future({
        let receiver = props.store.as_ref().map(|store| store.subscribe());
        let mut browser = browser.clone();
        async move {
            let Some(mut receiver) = receiver else {
                return;
            };
            while receiver.changed().await.is_ok() {
                let snapshot = receiver.borrow_and_update().clone();
                let current = browser.read().clone();
                let (next, _) =
                    reduce_browser_state(current, BrowserAction::StoreUpdated(snapshot));
                browser.set(next);
            }
        }
    });

    // Drop toasts once they have been visible long enough
    hooks.use_future({
        let mut browser = browser.clone();
        async move {
            loop {
                tokio::time::sleep(TOAST_POLL).await;
                let expired = browser
                    .read()
                    .toast
                    .as_ref()
                    .is_some_and(|toast| toast.is_expired(Instant::now()));
                if expired {
                    browser.write().toast = None;
                }
            }
        }
    });

    let mut started = hooks.use_state(|| false);
    if !started.get() {
        started.set(true);
        apply(&mut browser, BrowserAction::Mount, &dispatch);
    }

    hooks.use_terminal_events({
        let dispatch = dispatch.clone();
        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) if kind != KeyEventKind::Release => {
                let action = key_to_action(code, modifiers, &browser.read());
                if let Some(action) = action {
                    apply(&mut browser, action, &dispatch);
                }
            }
            _ => {}
        }
    });

    let snapshot = browser.read().clone();
    if snapshot.should_exit {
        system.exit();
    }

    let view = compute_browser_view(&snapshot);
    let confirm_target = view.confirm_target.clone();

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
        ) {
            Header(summary: Some(view.page_label.clone()), loading: view.loading)

            ScheduleTable(rows: view.rows.clone(), empty_message: view.empty_message.clone())

            #(render_toast(&snapshot.toast))

            Footer(shortcuts: view.shortcuts.clone())

            #(view.form.clone().map(|form| element! {
                ModalLayer(clear: false) {
                    ModalContainer(
                        width: 72u32,
                        height_percent: 80u32,
                        title: form.title.clone(),
                        footer_text: "Tab/S-Tab move, ←/→ choose, C-s save, Esc cancel".to_string(),
                    ) {
                        ScheduleForm(lines: form.lines.clone(), loading: form.loading)
                    }
                }
            }))

            #(confirm_target.map(|target| element! {
                ModalLayer(clear: false) {
                    ModalContainer(
                        width: 50u32,
                        border_color: ModalBorderColor::Warning,
                        title: "Delete Schedule".to_string(),
                        footer_text: "y delete, n keep".to_string(),
                    ) {
                        Text(content: format!("Delete {target}? This cannot be undone."), color: theme.text)
                    }
                }
            }))
        }
    }
}
