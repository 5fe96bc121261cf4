// Android camera bridge
//
// Launches the camera through MainActivity over JNI and polls for the captured
// file path. On other platforms every call returns a platform error.

use crate::capture::CaptureError;
use std::path::PathBuf;

const DEFAULT_MAIN_ACTIVITY_CLASS: &str = "dev/dioxus/main/MainActivity";

/// Camera launch timeout, polled in 100ms steps
pub const CAMERA_TIMEOUT_POLLS: u32 = 600;

#[cfg(target_os = "android")]
use jni::objects::{JClass, JObject, JString, JValue};

#[cfg(target_os = "android")]
use ndk_context::android_context;

/// Configuration for the camera bridge on Android
///
/// Allows customization of the MainActivity class name for different apps.
#[derive(Debug, Clone)]
pub struct AndroidPickerConfig {
    /// Fully qualified class name in slash format (e.g., "com/example/myapp/MainActivity")
    pub main_activity_class: String,
}

impl Default for AndroidPickerConfig {
    fn default() -> Self {
        Self {
            main_activity_class: DEFAULT_MAIN_ACTIVITY_CLASS.to_string(),
        }
    }
}

#[cfg(target_os = "android")]
fn jni_error(what: &str) -> impl Fn(jni::errors::Error) -> CaptureError + '_ {
    move |e| CaptureError::Other(format!("{} failed: {}", what, e))
}

#[cfg(target_os = "android")]
fn app_class_loader<'a>(env: &mut jni::JNIEnv<'a>) -> Result<JObject<'a>, CaptureError> {
    let at_cls = env
        .find_class("android/app/ActivityThread")
        .map_err(jni_error("find ActivityThread"))?;
    let at = env
        .call_static_method(
            &at_cls,
            "currentActivityThread",
            "()Landroid/app/ActivityThread;",
            &[],
        )
        .and_then(|v| v.l())
        .map_err(jni_error("currentActivityThread"))?;

    let app = env
        .call_method(&at, "getApplication", "()Landroid/app/Application;", &[])
        .and_then(|v| v.l())
        .map_err(jni_error("getApplication"))?;

    // Application not created yet, fall back to the system context
    let holder = if app.is_null() {
        env.call_method(&at, "getSystemContext", "()Landroid/app/ContextImpl;", &[])
            .and_then(|v| v.l())
            .map_err(jni_error("getSystemContext"))?
    } else {
        app
    };

    env.call_method(&holder, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .and_then(|v| v.l())
        .map_err(jni_error("getClassLoader"))
}

#[cfg(target_os = "android")]
fn main_activity<'a>(
    env: &mut jni::JNIEnv<'a>,
    config: &AndroidPickerConfig,
) -> Result<(JObject<'a>, JClass<'a>), CaptureError> {
    let loader = app_class_loader(env)?;
    let name: JString = env
        .new_string(config.main_activity_class.replace('/', "."))
        .map_err(jni_error("new_string"))?;
    let cls = env
        .call_method(
            &loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&JObject::from(name))],
        )
        .and_then(|v| v.l())
        .map_err(jni_error("ClassLoader.loadClass"))?;
    let cls = JClass::from(cls);

    let signature = format!("()L{};", config.main_activity_class);
    let instance = match env
        .call_static_method(&cls, "getInstance", &signature, &[])
        .and_then(|v| v.l())
    {
        Ok(instance) => instance,
        Err(_) => {
            if env.exception_check().unwrap_or(false) {
                let _ = env.exception_clear();
            }
            let field_signature = format!("L{};", config.main_activity_class);
            env.get_static_field(&cls, "instance", &field_signature)
                .and_then(|v| v.l())
                .map_err(jni_error("MainActivity.instance"))?
        }
    };

    if instance.is_null() {
        return Err(CaptureError::Other(
            "MainActivity instance is null - Activity not initialized?".to_string(),
        ));
    }

    Ok((instance, cls))
}

#[cfg(target_os = "android")]
fn static_string(
    env: &mut jni::JNIEnv<'_>,
    cls: &JClass<'_>,
    method: &str,
) -> Result<Option<String>, CaptureError> {
    let obj = match env
        .call_static_method(cls, method, "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
    {
        Ok(obj) if !obj.is_null() => obj,
        _ => return Ok(None),
    };
    let value: String = env
        .get_string((&obj).into())
        .map_err(jni_error("String conversion"))?
        .into();
    Ok(Some(value))
}

/// Capture a photo using the camera
///
/// Blocks until the user takes a photo, an error is reported or the
/// timeout (60 seconds) elapses. Returns the absolute path of the image.
#[cfg(target_os = "android")]
pub fn capture_photo_with_config(config: &AndroidPickerConfig) -> Result<PathBuf, CaptureError> {
    let vm_ptr = android_context().vm() as *mut *const jni::sys::JNIInvokeInterface_;
    let vm = unsafe { jni::JavaVM::from_raw(vm_ptr) }.map_err(jni_error("JavaVM"))?;
    let mut env = vm
        .attach_current_thread()
        .map_err(jni_error("JNI attach"))?;

    let (activity, main_cls) = main_activity(&mut env, config)?;

    env.call_static_method(&main_cls, "clearLastError", "()V", &[])
        .map_err(jni_error("clearLastError"))?;
    env.call_method(&activity, "launchCamera", "()V", &[])
        .map_err(jni_error("launchCamera"))?;

    for _ in 0..CAMERA_TIMEOUT_POLLS {
        std::thread::sleep(std::time::Duration::from_millis(100));

        if let Some(path) = static_string(&mut env, &main_cls, "getLastPhotoPath")? {
            return Ok(PathBuf::from(path));
        }

        if let Some(err) = static_string(&mut env, &main_cls, "getLastError")? {
            return Err(classify_activity_error(err));
        }
    }

    Err(CaptureError::Timeout("Camera timeout - no photo taken".to_string()))
}

#[cfg(not(target_os = "android"))]
pub fn capture_photo_with_config(_config: &AndroidPickerConfig) -> Result<PathBuf, CaptureError> {
    Err(CaptureError::PlatformNotSupported(
        "Camera not available on this platform".to_string(),
    ))
}

/// Map an error string reported by MainActivity to a capture error
pub fn classify_activity_error(message: String) -> CaptureError {
    let lower = message.to_lowercase();
    if lower.contains("cancel") {
        CaptureError::Cancelled(message)
    } else if lower.contains("permission") {
        CaptureError::PermissionDenied(message)
    } else {
        CaptureError::Other(message)
    }
}
