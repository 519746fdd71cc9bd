use jni::objects::{GlobalRef, JObject, JValue};
use jni::sys::jobject;
use jni::{JNIEnv, JavaVM};
use std::error::Error;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use super::{Permission, PermissionResponse, PermissionResult, PermissionSystem, RequestId};

const PERMISSION_GRANTED: i32 = 0;

fn manifest_name(permission: Permission) -> &'static str {
    match permission {
        Permission::Camera => "android.permission.CAMERA",
    }
}

/// Runtime permissions through the hosting `Activity`.
///
/// The native activity never sees `onRequestPermissionsResult`, so a pending request is
/// answered by re-checking the grant once the activity resumes after the system dialog.
pub struct AndroidPermissions {
    vm: Arc<JavaVM>,
    activity: GlobalRef,
    pending: Option<(Permission, RequestId, Sender<PermissionResponse>)>,
}

impl std::fmt::Debug for AndroidPermissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndroidPermissions").field("pending", &self.pending.as_ref().map(|p| p.1)).finish_non_exhaustive()
    }
}

impl AndroidPermissions {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let vm = Arc::new(unsafe { JavaVM::from_raw(ndk_context::android_context().vm().cast())? });
        let activity = {
            let env = vm.attach_current_thread()?;
            let ctx_ptr = ndk_context::android_context().context();
            if ctx_ptr.is_null() {
                return Err("Failed to get Android context".into());
            }
            env.new_global_ref(unsafe { JObject::from_raw(ctx_ptr as jobject) })?
        };
        Ok(Self {vm, activity, pending: None})
    }

    fn check(&self, permission: Permission) -> Result<bool, jni::errors::Error> {
        let mut env = self.vm.attach_current_thread()?;
        let status = Self::check_with(&mut env, self.activity.as_obj(), permission);
        if status.is_err() {
            let _ = env.exception_clear();
        }
        status
    }

    fn check_with(env: &mut JNIEnv, activity: &JObject, permission: Permission) -> Result<bool, jni::errors::Error> {
        let name = env.new_string(manifest_name(permission))?;
        let status = env
            .call_method(activity, "checkSelfPermission", "(Ljava/lang/String;)I", &[JValue::Object(&name)])?
            .i()?;
        Ok(status == PERMISSION_GRANTED)
    }

    fn ask(&self, permission: Permission, request: RequestId) -> Result<(), jni::errors::Error> {
        let mut env = self.vm.attach_current_thread()?;
        let asked = Self::ask_with(&mut env, self.activity.as_obj(), permission, request);
        if asked.is_err() {
            let _ = env.exception_clear();
        }
        asked
    }

    fn ask_with(env: &mut JNIEnv, activity: &JObject, permission: Permission, request: RequestId) -> Result<(), jni::errors::Error> {
        let name = env.new_string(manifest_name(permission))?;
        let names = env.new_object_array(1, "java/lang/String", &name)?;
        env.call_method(
            activity,
            "requestPermissions",
            "([Ljava/lang/String;I)V",
            &[JValue::Object(&names), JValue::Int(request)],
        )?;
        Ok(())
    }
}

impl PermissionSystem for AndroidPermissions {
    fn is_granted(&self, permission: Permission) -> bool {
        self.check(permission).unwrap_or_else(|e| {
            log::warn!("checkSelfPermission failed: {e}");
            false
        })
    }

    fn request(&mut self, permission: Permission, request: RequestId, reply: Sender<PermissionResponse>) {
        match self.ask(permission, request) {
            Ok(()) => self.pending = Some((permission, request, reply)),
            Err(e) => {
                log::warn!("requestPermissions failed: {e}");
                let _ = reply.send(PermissionResponse{request, result: PermissionResult::Denied});
            }
        }
    }

    fn resumed(&mut self) {
        if let Some((permission, request, reply)) = self.pending.take() {
            let result = match self.is_granted(permission) {
                true => PermissionResult::Granted,
                false => PermissionResult::Denied,
            };
            let _ = reply.send(PermissionResponse{request, result});
        }
    }
}
