mod common;

use std::sync::Arc;
use std::thread;

use common::{nav, two_tabs, view};
use parking_lot::Mutex;
use reactor_nav::nav::{
    BroadcastSubscriber, CommandSubscriber, NavigationCommand, NavigationCore, NavigationEvent,
    NavigationState,
};

type Log = Arc<Mutex<Vec<String>>>;

fn recorder(name: &'static str, log: &Log) -> impl CommandSubscriber + 'static {
    let log = Arc::clone(log);
    move |command: &NavigationCommand| log.lock().push(format!("{name}:{}", command.kind()))
}

fn push(tag: &str, key: &str) -> NavigationEvent {
    NavigationEvent::PushNavView {
        tag: tag.to_string(),
        view: view(key),
    }
}

#[test]
fn subscribers_are_notified_in_registration_order() {
    let log: Log = Arc::default();
    let core = NavigationCore::new(NavigationState::new(nav("root", &["a"])))
        .with_subscriber(recorder("first", &log))
        .with_subscriber(recorder("second", &log));

    core.dispatch(push("root", "b"));
    core.dispatch(NavigationEvent::PopNavView {
        tag: "root".to_string(),
    });

    assert_eq!(
        *log.lock(),
        vec![
            "first:nav_view_pushed",
            "second:nav_view_pushed",
            "first:nav_view_popped",
            "second:nav_view_popped",
        ]
    );
}

#[test]
fn noop_dispatch_still_delivers_hidden_update() {
    let log: Log = Arc::default();
    let core = NavigationCore::new(NavigationState::new(nav("root", &["a"])))
        .with_subscriber(recorder("only", &log));

    core.dispatch(push("missing", "b"));

    assert_eq!(*log.lock(), vec!["only:hidden_update"]);
    assert_eq!(core.current_visible_view(), Some(view("a")));
}

#[test]
fn public_queries_reflect_committed_state() {
    let core = NavigationCore::new(two_tabs(0));
    assert_eq!(core.current_visible_container().unwrap().tag(), "t0");

    core.dispatch(NavigationEvent::ChangeContainerIndex {
        tag: "tabs".to_string(),
        index: 1,
    });

    assert_eq!(core.current_visible_container().unwrap().tag(), "t1");
    assert_eq!(core.current_visible_view(), Some(view("V1")));
    assert_eq!(core.find_container("t0").unwrap().parent_tag(), Some("tabs"));
    assert!(core.find_container("nope").is_none());
}

#[test]
fn broadcast_listeners_each_receive_every_command() {
    let (broadcaster, mut first) = BroadcastSubscriber::new(8);
    let mut second = broadcaster.subscribe();
    let core =
        NavigationCore::new(NavigationState::new(nav("root", &["a"]))).with_subscriber(broadcaster);

    core.dispatch(NavigationEvent::AppContextChanged {
        in_foreground: true,
    });
    core.dispatch(push("root", "b"));

    for receiver in [&mut first, &mut second] {
        assert_eq!(
            receiver.try_recv().unwrap(),
            NavigationCommand::AppContextChanged {
                in_foreground: true
            }
        );
        assert_eq!(receiver.try_recv().unwrap(), NavigationCommand::NavViewPushed);
        assert!(receiver.try_recv().is_err());
    }
}

#[test]
fn subscriber_may_dispatch_follow_up_event() {
    let log: Log = Arc::default();
    let slot: Arc<Mutex<Option<Arc<NavigationCore>>>> = Arc::default();

    let follow_up = {
        let slot = Arc::clone(&slot);
        move |command: &NavigationCommand| {
            if *command == NavigationCommand::NavViewPushed {
                let core = slot.lock().clone();
                if let Some(core) = core {
                    core.dispatch(NavigationEvent::ReplaceNavView {
                        tag: "root".to_string(),
                        view: view("redirected"),
                    });
                }
            }
        }
    };

    let core = Arc::new(
        NavigationCore::new(NavigationState::new(nav("root", &["a"])))
            .with_subscriber(follow_up)
            .with_subscriber(recorder("log", &log)),
    );
    *slot.lock() = Some(Arc::clone(&core));

    core.dispatch(push("root", "b"));

    // The nested dispatch completes before the outer one reaches the logger.
    assert_eq!(
        *log.lock(),
        vec!["log:nav_view_replaced", "log:nav_view_pushed"]
    );
    assert_eq!(core.current_visible_view(), Some(view("redirected")));
    slot.lock().take();
}

#[test]
fn concurrent_dispatches_are_serialized() {
    let pushed = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&pushed);
    let core = Arc::new(
        NavigationCore::new(NavigationState::new(nav("root", &["base"]))).with_subscriber(
            move |command: &NavigationCommand| {
                if *command == NavigationCommand::NavViewPushed {
                    *counter.lock() += 1;
                }
            },
        ),
    );

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let core = Arc::clone(&core);
            thread::spawn(move || {
                for i in 0..25 {
                    core.dispatch(push("root", &format!("w{worker}-{i}")));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let state = core.state();
    let root = state.root_view_container().as_nav().unwrap();
    assert_eq!(root.depth(), 101);
    assert_eq!(*pushed.lock(), 100);
}
