use jni::objects::{GlobalRef, JObject, JObjectArray, JString, JThrowable, JValue};
use jni::sys::{jboolean, jobject};
use jni::{JNIEnv, JavaVM};
use std::error::Error;
use std::sync::Arc;

use super::{TorchControl, TorchError};

const FEATURE_CAMERA_FLASH: &str = "android.hardware.camera.flash";

/// Torch control through `android.hardware.camera2.CameraManager`.
#[derive(Clone)]
pub struct AndroidTorch {
    vm: Arc<JavaVM>,
    context: GlobalRef,
    camera_manager: GlobalRef,
}

impl std::fmt::Debug for AndroidTorch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndroidTorch").finish_non_exhaustive()
    }
}

impl AndroidTorch {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let vm = Arc::new(unsafe { JavaVM::from_raw(ndk_context::android_context().vm().cast())? });

        let (context, camera_manager) = {
            let mut env = vm.attach_current_thread()?;

            let ctx_ptr = ndk_context::android_context().context();
            if ctx_ptr.is_null() {
                return Err("Failed to get Android context".into());
            }
            let context_obj = unsafe { JObject::from_raw(ctx_ptr as jobject) };
            let context = env.new_global_ref(context_obj)?;

            let camera_service = env
                .get_static_field("android/content/Context", "CAMERA_SERVICE", "Ljava/lang/String;")?
                .l()?;
            let manager = env
                .call_method(
                    context.as_obj(),
                    "getSystemService",
                    "(Ljava/lang/String;)Ljava/lang/Object;",
                    &[JValue::Object(&camera_service)],
                )?
                .l()?;
            if manager.is_null() {
                return Err("CameraManager service unavailable".into());
            }
            (context, env.new_global_ref(manager)?)
        };

        Ok(Self {vm, context, camera_manager})
    }

    fn has_flash_feature_impl(&self, env: &mut JNIEnv) -> Result<bool, jni::errors::Error> {
        let package_manager = env
            .call_method(self.context.as_obj(), "getPackageManager", "()Landroid/content/pm/PackageManager;", &[])?
            .l()?;
        let feature = env.new_string(FEATURE_CAMERA_FLASH)?;
        env.call_method(
            &package_manager,
            "hasSystemFeature",
            "(Ljava/lang/String;)Z",
            &[JValue::Object(&feature)],
        )?
        .z()
    }

    fn camera_ids_impl(&self, env: &mut JNIEnv) -> Result<Vec<String>, jni::errors::Error> {
        let ids = env
            .call_method(self.camera_manager.as_obj(), "getCameraIdList", "()[Ljava/lang/String;", &[])?
            .l()?;
        let ids = JObjectArray::from(ids);
        let len = env.get_array_length(&ids)?;
        let mut result = Vec::with_capacity(len as usize);
        for i in 0..len {
            let id = JString::from(env.get_object_array_element(&ids, i)?);
            result.push(env.get_string(&id)?.into());
        }
        Ok(result)
    }

    fn set_torch_mode_impl(&self, env: &mut JNIEnv, camera_id: &str, on: bool) -> Result<(), jni::errors::Error> {
        let id = env.new_string(camera_id)?;
        env.call_method(
            self.camera_manager.as_obj(),
            "setTorchMode",
            "(Ljava/lang/String;Z)V",
            &[JValue::Object(&id), JValue::Bool(on as jboolean)],
        )?;
        Ok(())
    }

    /// Clears a pending Java exception and classifies it.
    ///
    /// Any `IllegalArgumentException` counts as the flash unit being unavailable on the
    /// camera, whatever argument it complained about.
    fn classify(env: &mut JNIEnv, camera_id: &str, error: jni::errors::Error) -> TorchError {
        let throwable = match env.exception_check() {
            Ok(true) => {
                let throwable = env.exception_occurred();
                let _ = env.exception_clear();
                throwable.ok()
            },
            _ => None,
        };
        let Some(throwable) = throwable else {
            return TorchError::AccessFailed(error.to_string());
        };
        let reason = Self::describe(env, &throwable).unwrap_or_else(|_| error.to_string());
        if env.is_instance_of(&throwable, "java/lang/IllegalArgumentException").unwrap_or(false) {
            TorchError::UnitUnavailable{camera_id: camera_id.to_string(), reason}
        } else {
            TorchError::AccessFailed(reason)
        }
    }

    /// Outside the torch call itself every failure is an access failure.
    fn access_failed(env: &mut JNIEnv, error: jni::errors::Error) -> TorchError {
        match Self::classify(env, "", error) {
            TorchError::UnitUnavailable{reason, ..} => TorchError::AccessFailed(reason),
            other => other,
        }
    }

    fn describe(env: &mut JNIEnv, throwable: &JThrowable) -> Result<String, jni::errors::Error> {
        let message = env.call_method(throwable, "toString", "()Ljava/lang/String;", &[])?.l()?;
        Ok(env.get_string(&JString::from(message))?.into())
    }
}

impl TorchControl for AndroidTorch {
    fn has_flash_feature(&self) -> Result<bool, TorchError> {
        let mut env = self.vm.attach_current_thread().map_err(|e| TorchError::AccessFailed(e.to_string()))?;
        self.has_flash_feature_impl(&mut env).map_err(|e| Self::access_failed(&mut env, e))
    }

    fn camera_ids(&self) -> Result<Vec<String>, TorchError> {
        let mut env = self.vm.attach_current_thread().map_err(|e| TorchError::AccessFailed(e.to_string()))?;
        self.camera_ids_impl(&mut env).map_err(|e| Self::access_failed(&mut env, e))
    }

    fn set_torch_mode(&mut self, camera_id: &str, on: bool) -> Result<(), TorchError> {
        let mut env = self.vm.attach_current_thread().map_err(|e| TorchError::AccessFailed(e.to_string()))?;
        self.set_torch_mode_impl(&mut env, camera_id, on).map_err(|e| Self::classify(&mut env, camera_id, e))
    }
}
