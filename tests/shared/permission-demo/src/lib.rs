//! Demo host: an activity asking for contacts access the way an app would.

use std::sync::{Arc, Mutex};

use grantkit_dialog::AutoPrompter;
use grantkit_permission::{
    LifecycleEvent, Permission, PermissionRequest, Permissions, RequestCode, RequestOutcome,
    RequestTarget, ResultSet,
};

/// A fake foreground activity. Prompts are queued until the "user" answers.
#[derive(Debug, Default)]
pub struct DemoActivity {
    granted: Mutex<Vec<Permission>>,
    asked: Mutex<Vec<(Vec<Permission>, RequestCode)>>,
}

impl DemoActivity {
    /// Answer every queued prompt with `allow`, the way the platform would
    /// call back into the host.
    pub fn answer_all(&self, permissions: &Permissions, allow: bool) {
        let asked: Vec<_> = self.asked.lock().unwrap().drain(..).collect();
        for (requested, code) in asked {
            let grants: Vec<i32> = requested.iter().map(|_| if allow { 0 } else { -1 }).collect();
            if allow {
                self.granted.lock().unwrap().extend(requested.iter().cloned());
            }
            let result =
                permissions.on_request_permissions_result(code, &requested, &grants, |code, _, _| {
                    println!("request {code} not ours, passing to the default handler");
                });
            if let Err(e) = result {
                println!("request {code}: result rejected: {e}");
            }
        }
    }
}

impl RequestTarget for DemoActivity {
    fn is_granted(&self, permission: &Permission) -> bool {
        self.granted.lock().unwrap().contains(permission)
    }

    fn should_explain(&self, _permission: &Permission) -> bool {
        true
    }

    fn request_permissions(&self, permissions: &[Permission], code: RequestCode) {
        println!("platform prompt for {permissions:?} ({code})");
        self.asked.lock().unwrap().push((permissions.to_vec(), code));
    }
}

/// Run the demo; returns how many callbacks saw the permission granted.
pub async fn run() -> usize {
    println!("Running Permission Demo...");

    let permissions = Permissions::builder()
        .prompter(Arc::new(AutoPrompter::accepting()))
        .build();
    let activity = Arc::new(DemoActivity::default());
    let target: Arc<dyn RequestTarget> = activity.clone();
    permissions.on_lifecycle(&target, LifecycleEvent::Resumed);

    let granted = Arc::new(Mutex::new(0));
    for button in ["priming", "no priming"] {
        let granted = granted.clone();
        let mut builder = PermissionRequest::builder()
            .permission(Permission::READ_CONTACTS)
            .rationale("I need read access to contacts for the demo")
            .callback(move |_, results: &ResultSet| {
                if results.is_granted(&Permission::READ_CONTACTS) {
                    println!("[{button}] Permission granted");
                    *granted.lock().unwrap() += 1;
                } else {
                    println!("[{button}] Permission denied");
                }
            });
        if button == "priming" {
            builder = builder
                .priming_message("Do you want the demo to have read access to your contacts?");
        }

        match builder.build() {
            Ok(request) => match permissions.request(request, 69).await {
                Ok(RequestOutcome::AlreadyGranted) => {
                    println!("[{button}] Permission already granted");
                }
                Ok(outcome) => println!("[{button}] {outcome:?}"),
                Err(e) => println!("[{button}] request failed: {e}"),
            },
            Err(e) => println!("[{button}] invalid request: {e}"),
        }
    }

    activity.answer_all(&permissions, true);
    permissions.on_lifecycle(&target, LifecycleEvent::Paused);

    let count = *granted.lock().unwrap();
    count
}

#[cfg(test)]
mod tests {
    #[test]
    fn both_buttons_share_one_prompt() {
        assert_eq!(futures::executor::block_on(super::run()), 2);
    }
}
