#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::{self, BoxFuture};
use grantkit_dialog::{Dialog, DialogError, Prompter};
use grantkit_permission::{Permission, RequestCode, RequestTarget};

/// A target that records prompts and never answers on its own.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub granted: Mutex<HashSet<Permission>>,
    pub explain: Mutex<HashSet<Permission>>,
    pub prompts: Mutex<Vec<(Vec<Permission>, RequestCode)>>,
}

impl RecordingTarget {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn grant(&self, permission: Permission) {
        self.granted.lock().unwrap().insert(permission);
    }

    pub fn advise_explaining(&self, permission: Permission) {
        self.explain.lock().unwrap().insert(permission);
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl RequestTarget for RecordingTarget {
    fn is_granted(&self, permission: &Permission) -> bool {
        self.granted.lock().unwrap().contains(permission)
    }

    fn should_explain(&self, permission: &Permission) -> bool {
        self.explain.lock().unwrap().contains(permission)
    }

    fn request_permissions(&self, permissions: &[Permission], code: RequestCode) {
        self.prompts
            .lock()
            .unwrap()
            .push((permissions.to_vec(), code));
    }
}

/// A prompter answering from a script and recording every dialog shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<bool>>,
    pub shown: Mutex<Vec<Dialog>>,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[bool]) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            shown: Mutex::new(Vec::new()),
        })
    }

    pub fn messages(&self) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .map(|dialog| dialog.message.clone())
            .collect()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, dialog: Dialog) -> BoxFuture<'_, Result<bool, DialogError>> {
        self.shown.lock().unwrap().push(dialog);
        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(DialogError::Cancelled);
        Box::pin(future::ready(answer))
    }
}

/// Counts invocations; shared between a callback and the test body.
#[derive(Debug, Default, Clone)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}
