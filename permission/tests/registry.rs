mod common;

use std::sync::{Arc, Barrier, Mutex};
use std::thread;

use common::{Counter, RecordingTarget};
use grantkit_permission::{
    Callback, Dispatch, Permission, PermissionRegistry, RequestKey, RequestTarget, ResultSet,
    Submission,
};

fn registry_with(target: &Arc<RecordingTarget>) -> Arc<PermissionRegistry> {
    let registry = Arc::new(PermissionRegistry::new());
    registry.bind(target.clone());
    registry
}

#[test]
fn concurrent_callers_share_one_prompt() {
    let target = RecordingTarget::new();
    let registry = registry_with(&target);
    let barrier = Arc::new(Barrier::new(2));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..2)
        .map(|caller| {
            let registry = registry.clone();
            let barrier = barrier.clone();
            let seen = seen.clone();
            thread::spawn(move || {
                barrier.wait();
                registry
                    .submit(
                        Callback::new(move |code, results: &ResultSet| {
                            let granted = results.is_granted(&Permission::READ_CONTACTS);
                            seen.lock().unwrap().push((caller, code, granted));
                        }),
                        69,
                        &[Permission::READ_CONTACTS],
                    )
                    .unwrap()
            })
        })
        .collect();

    let mut submissions: Vec<Submission> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    submissions.sort_by_key(|s| matches!(s, Submission::Joined { .. }));

    assert_eq!(
        submissions,
        vec![Submission::Prompted, Submission::Joined { waiting: 2 }]
    );
    assert_eq!(target.prompt_count(), 1);
    assert_eq!(
        registry.waiting(&RequestKey::new(69, &[Permission::READ_CONTACTS])),
        2
    );

    let dispatch = registry
        .dispatch(69, &[Permission::READ_CONTACTS], &[0])
        .unwrap();
    assert_eq!(dispatch, Dispatch::Consumed { delivered: 2, faults: 0 });

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|&(_, code, granted)| code == 69 && granted));
}

#[test]
fn many_threads_many_keys() {
    const THREADS: usize = 16;
    const CODES: u16 = 4;

    let target = RecordingTarget::new();
    let registry = registry_with(&target);
    let barrier = Arc::new(Barrier::new(THREADS));
    let delivered = Counter::default();

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let registry = registry.clone();
            let barrier = barrier.clone();
            let delivered = delivered.clone();
            thread::spawn(move || {
                let code = (i as u16 % CODES) + 1;
                barrier.wait();
                registry
                    .submit(
                        Callback::new(move |_, _| delivered.bump()),
                        code,
                        &[Permission::CAMERA, Permission::RECORD_AUDIO],
                    )
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(target.prompt_count(), CODES as usize);
    assert_eq!(registry.pending(), CODES as usize);

    for code in 1..=CODES {
        let dispatch = registry
            .dispatch(code, &[Permission::RECORD_AUDIO, Permission::CAMERA], &[0, -1])
            .unwrap();
        assert!(dispatch.is_consumed());
    }

    assert_eq!(delivered.get(), THREADS);
    assert_eq!(registry.pending(), 0);
}

#[test]
fn result_set_reflects_literal_grants() {
    let target = RecordingTarget::new();
    let registry = registry_with(&target);
    let (callback, receiver) = Callback::channel();

    registry
        .submit(callback, 12, &[Permission::CAMERA, Permission::READ_CALENDAR])
        .unwrap();
    registry
        .dispatch(12, &[Permission::CAMERA, Permission::READ_CALENDAR], &[-1, 0])
        .unwrap();

    let results = futures::executor::block_on(receiver).unwrap();
    assert!(!results.is_granted(&Permission::CAMERA));
    assert!(results.is_granted(&Permission::READ_CALENDAR));
    assert!(!results.is_granted(&Permission::READ_CONTACTS));
}

#[test]
fn second_dispatch_delivers_nothing() {
    let target = RecordingTarget::new();
    let registry = registry_with(&target);
    let calls = Counter::default();
    let counter = calls.clone();

    registry
        .submit(Callback::new(move |_, _| counter.bump()), 3, &[Permission::CAMERA])
        .unwrap();

    assert!(registry.dispatch(3, &[Permission::CAMERA], &[0]).unwrap().is_consumed());
    assert_eq!(
        registry.dispatch(3, &[Permission::CAMERA], &[0]).unwrap(),
        Dispatch::NotConsumed
    );
    assert_eq!(calls.get(), 1);
}

#[test]
fn callback_may_resubmit_during_dispatch() {
    let target = RecordingTarget::new();
    let registry = registry_with(&target);
    let inner = registry.clone();

    registry
        .submit(
            Callback::new(move |code, _| {
                inner
                    .submit(Callback::new(|_, _| {}), code, &[Permission::CAMERA])
                    .unwrap();
            }),
            8,
            &[Permission::CAMERA],
        )
        .unwrap();

    assert!(registry.dispatch(8, &[Permission::CAMERA], &[-1]).unwrap().is_consumed());
    assert_eq!(target.prompt_count(), 2);
    assert_eq!(registry.pending(), 1);
}

#[test]
fn stale_unbind_keeps_the_newer_target() {
    let a = RecordingTarget::new();
    let b = RecordingTarget::new();
    b.grant(Permission::CAMERA);

    let registry = PermissionRegistry::new();
    let a_dyn: Arc<dyn RequestTarget> = a.clone();
    registry.bind(a_dyn.clone());
    registry.bind(b.clone());
    registry.unbind(&a_dyn);

    assert_eq!(registry.is_granted(&Permission::CAMERA), Ok(true));

    registry
        .submit(Callback::new(|_, _| {}), 1, &[Permission::RECORD_AUDIO])
        .unwrap();
    assert_eq!(a.prompt_count(), 0);
    assert_eq!(b.prompt_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn tasks_awaiting_the_same_request() {
    let target = RecordingTarget::new();
    let registry = registry_with(&target);

    let receivers: Vec<_> = (0..8)
        .map(|_| {
            let (callback, receiver) = Callback::channel();
            registry
                .submit(callback, 69, &[Permission::READ_CONTACTS])
                .unwrap();
            tokio::spawn(receiver)
        })
        .collect();

    assert_eq!(target.prompt_count(), 1);

    let answering = registry.clone();
    tokio::task::spawn_blocking(move || {
        answering
            .dispatch(69, &[Permission::READ_CONTACTS], &[0])
            .unwrap()
    })
    .await
    .unwrap();

    for receiver in receivers {
        let results = receiver.await.unwrap().unwrap();
        assert!(results.is_granted(&Permission::READ_CONTACTS));
    }
}
