//! Android request target using JNI.
//!
//! Talks to the bound `Activity` directly through
//! `checkSelfPermission`, `shouldShowRequestPermissionRationale` and
//! `requestPermissions`. The host forwards `onRequestPermissionsResult` to
//! [`dispatch_from_java`].

use std::fmt;

use jni::objects::{GlobalRef, JIntArray, JObject, JObjectArray, JString, JValue};
use jni::sys::{jint, jsize};
use jni::{JNIEnv, JavaVM};
use log::error;

use crate::{
    Dispatch, Permission, PermissionError, PermissionRegistry, RequestCode, RequestTarget, Result,
};

/// `PackageManager.PERMISSION_GRANTED`.
const PERMISSION_GRANTED: jint = 0;

/// A request target backed by an Android `Activity`.
pub struct AndroidTarget {
    vm: JavaVM,
    activity: GlobalRef,
}

impl fmt::Debug for AndroidTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AndroidTarget").finish_non_exhaustive()
    }
}

impl AndroidTarget {
    /// Wrap `activity`, keeping a global reference to it.
    ///
    /// # Errors
    /// Returns [`PermissionError::Platform`] if the JVM cannot be reached.
    pub fn new(env: &JNIEnv<'_>, activity: &JObject<'_>) -> Result<Self> {
        let vm = env.get_java_vm().map_err(map_jni_error)?;
        let activity = env.new_global_ref(activity).map_err(map_jni_error)?;
        Ok(Self { vm, activity })
    }

    fn with_activity<R, F>(&self, action: F) -> Result<R>
    where
        F: FnOnce(&mut JNIEnv<'_>, &JObject<'_>) -> jni::errors::Result<R>,
    {
        let mut env = self.vm.attach_current_thread().map_err(map_jni_error)?;
        let activity = self.activity.as_obj();
        action(&mut env, activity).map_err(map_jni_error)
    }
}

impl RequestTarget for AndroidTarget {
    fn is_granted(&self, permission: &Permission) -> bool {
        self.with_activity(|env, activity| {
            let name = env.new_string(permission.as_str())?;
            let status = env
                .call_method(
                    activity,
                    "checkSelfPermission",
                    "(Ljava/lang/String;)I",
                    &[JValue::Object(&name)],
                )?
                .i()?;
            Ok(status == PERMISSION_GRANTED)
        })
        .unwrap_or_else(|e| {
            error!("checkSelfPermission({permission}) failed: {e}");
            false
        })
    }

    fn should_explain(&self, permission: &Permission) -> bool {
        self.with_activity(|env, activity| {
            let name = env.new_string(permission.as_str())?;
            env.call_method(
                activity,
                "shouldShowRequestPermissionRationale",
                "(Ljava/lang/String;)Z",
                &[JValue::Object(&name)],
            )?
            .z()
        })
        .unwrap_or_else(|e| {
            error!("shouldShowRequestPermissionRationale({permission}) failed: {e}");
            false
        })
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn request_permissions(&self, permissions: &[Permission], code: RequestCode) {
        let result = self.with_activity(|env, activity| {
            let array = env.new_object_array(
                permissions.len() as jsize,
                "java/lang/String",
                JObject::null(),
            )?;
            for (index, permission) in permissions.iter().enumerate() {
                let name = env.new_string(permission.as_str())?;
                env.set_object_array_element(&array, index as jsize, &name)?;
                env.delete_local_ref(name)?;
            }
            env.call_method(
                activity,
                "requestPermissions",
                "([Ljava/lang/String;I)V",
                &[JValue::Object(&array), JValue::Int(jint::from(code))],
            )?;
            Ok(())
        });

        if let Err(e) = result {
            error!("requestPermissions({code}) failed: {e}");
        }
    }
}

/// Convert the arguments of `onRequestPermissionsResult` and dispatch them.
///
/// Returns whether the registry consumed the result; when it did not, the
/// host should call the `Activity`'s own implementation. Request codes this
/// registry cannot have issued are never consumed.
///
/// # Errors
/// Returns [`PermissionError::Platform`] if the Java arrays cannot be read, and
/// [`PermissionError::ArityMismatch`] if their lengths differ.
#[allow(clippy::cast_sign_loss)]
pub fn dispatch_from_java(
    env: &mut JNIEnv<'_>,
    registry: &PermissionRegistry,
    code: jint,
    permissions: &JObjectArray<'_>,
    grants: &JIntArray<'_>,
) -> Result<Dispatch> {
    let count = env.get_array_length(permissions).map_err(map_jni_error)?;
    let mut names = Vec::with_capacity(count.max(0) as usize);
    for index in 0..count {
        let element = env
            .get_object_array_element(permissions, index)
            .map_err(map_jni_error)?;
        let element = JString::from(element);
        let name: String = env.get_string(&element).map_err(map_jni_error)?.into();
        env.delete_local_ref(element).map_err(map_jni_error)?;
        names.push(Permission::new(name));
    }

    let grant_count = env.get_array_length(grants).map_err(map_jni_error)?;
    let mut raw = vec![0; grant_count.max(0) as usize];
    env.get_int_array_region(grants, 0, &mut raw)
        .map_err(map_jni_error)?;

    registry.dispatch_host_code(code, &names, &raw)
}

fn map_jni_error(err: jni::errors::Error) -> PermissionError {
    PermissionError::Platform(err.to_string())
}
