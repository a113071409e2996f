//! Onloaded hook stage.

use couchpush_manifest::PushCommand;
use tracing::{debug, info};

use crate::error::PushError;
use crate::loader::{AppLoader, Application};

/// Runs the command's `onloaded` hook, if one is configured.
///
/// The hook module is resolved against `basedir`, loaded, and invoked with
/// the application, the command and the loader. A load or invocation
/// failure aborts the command; the hook's return value is otherwise
/// ignored.
pub fn run_onloaded(
    name: &str,
    cmd: &PushCommand,
    app: &mut dyn Application,
    loader: &dyn AppLoader,
) -> Result<(), PushError> {
    let Some(path) = cmd.hook_path() else {
        debug!(command = name, "no onloaded hook found");
        return Ok(());
    };

    debug!(command = name, hook = %path.display(), "handling onloaded hook");

    let outcome = loader
        .load_hook(&path)
        .and_then(|hook| hook.call(app, cmd, loader));

    match outcome {
        Ok(()) => {
            info!(command = name, "onloaded hook applied successfully");
            Ok(())
        }
        Err(source) => Err(PushError::Hook {
            command: name.to_string(),
            path,
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use crate::loader::{BoxFuture, LoaderError, OnloadedHook};

    use super::*;

    struct StubApp {
        doc: serde_json::Value,
    }

    impl Application for StubApp {
        fn doc_mut(&mut self) -> &mut serde_json::Value {
            &mut self.doc
        }

        fn push(&mut self, _target_url: &str) -> BoxFuture<'_, Result<(), LoaderError>> {
            Box::pin(async { Ok(()) })
        }
    }

    /// A hook that stamps the document so the test can see it ran.
    struct StampHook;

    impl OnloadedHook for StampHook {
        fn call(
            &self,
            app: &mut dyn Application,
            cmd: &PushCommand,
            _loader: &dyn AppLoader,
        ) -> Result<(), LoaderError> {
            app.doc_mut()["hooked"] = serde_json::json!(cmd.host);
            Ok(())
        }
    }

    struct FailingHook;

    impl OnloadedHook for FailingHook {
        fn call(
            &self,
            _app: &mut dyn Application,
            _cmd: &PushCommand,
            _loader: &dyn AppLoader,
        ) -> Result<(), LoaderError> {
            Err(LoaderError::new("hook raised"))
        }
    }

    enum HookBehavior {
        LoadFails,
        Stamp,
        CallFails,
    }

    struct HookLoader {
        behavior: HookBehavior,
        loaded_from: Mutex<Option<PathBuf>>,
    }

    impl HookLoader {
        fn new(behavior: HookBehavior) -> Self {
            Self {
                behavior,
                loaded_from: Mutex::new(None),
            }
        }
    }

    impl AppLoader for HookLoader {
        fn create_app(
            &self,
            _module_path: &Path,
        ) -> BoxFuture<'_, Result<Box<dyn Application>, LoaderError>> {
            Box::pin(async { Err(LoaderError::new("not under test")) })
        }

        fn load_attachments(
            &self,
            _app: &mut dyn Application,
            _root: &Path,
            _prefix: Option<&str>,
        ) -> Result<(), LoaderError> {
            Ok(())
        }

        fn load_files(
            &self,
            _dir: &Path,
        ) -> Result<serde_json::Map<String, serde_json::Value>, LoaderError> {
            Err(LoaderError::new("not under test"))
        }

        fn load_hook(&self, path: &Path) -> Result<Box<dyn OnloadedHook>, LoaderError> {
            *self.loaded_from.lock().unwrap() = Some(path.to_path_buf());
            match self.behavior {
                HookBehavior::LoadFails => Err(LoaderError::new("module not found")),
                HookBehavior::Stamp => Ok(Box::new(StampHook)),
                HookBehavior::CallFails => Ok(Box::new(FailingHook)),
            }
        }
    }

    fn command(onloaded: Option<&str>) -> PushCommand {
        let mut json = serde_json::json!({
            "basedir": "/srv/app",
            "src": "ddocs",
            "host": "http://h/",
            "dbs": ["d"],
        });
        if let Some(hook) = onloaded {
            json["onloaded"] = serde_json::json!(hook);
        }
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn missing_hook_is_a_noop() {
        let cmd = command(None);
        let mut app = StubApp { doc: serde_json::json!({}) };
        let loader = HookLoader::new(HookBehavior::LoadFails);

        run_onloaded("docs", &cmd, &mut app, &loader).unwrap();
        assert!(loader.loaded_from.lock().unwrap().is_none());
    }

    #[test]
    fn hook_runs_against_the_application() {
        let cmd = command(Some("hooks/onloaded"));
        let mut app = StubApp { doc: serde_json::json!({}) };
        let loader = HookLoader::new(HookBehavior::Stamp);

        run_onloaded("docs", &cmd, &mut app, &loader).unwrap();

        assert_eq!(app.doc["hooked"], serde_json::json!("http://h/"));
        assert_eq!(
            *loader.loaded_from.lock().unwrap(),
            Some(PathBuf::from("/srv/app/hooks/onloaded"))
        );
    }

    #[test]
    fn load_failure_carries_command_and_path() {
        let cmd = command(Some("hooks/onloaded"));
        let mut app = StubApp { doc: serde_json::json!({}) };
        let loader = HookLoader::new(HookBehavior::LoadFails);

        let err = run_onloaded("docs", &cmd, &mut app, &loader).unwrap_err();
        match err {
            PushError::Hook { command, path, .. } => {
                assert_eq!(command, "docs");
                assert_eq!(path, PathBuf::from("/srv/app/hooks/onloaded"));
            }
            other => panic!("expected Hook error, got {other:?}"),
        }
    }

    #[test]
    fn invocation_failure_carries_command_and_path() {
        let cmd = command(Some("hooks/onloaded"));
        let mut app = StubApp { doc: serde_json::json!({}) };
        let loader = HookLoader::new(HookBehavior::CallFails);

        let err = run_onloaded("docs", &cmd, &mut app, &loader).unwrap_err();
        assert!(matches!(err, PushError::Hook { ref command, .. } if command == "docs"));
    }
}
