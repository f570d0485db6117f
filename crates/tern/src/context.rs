//! Build identity, exposed to the site as a virtual module.
//!
//! The site imports `virtual:context` to show which commit it was built from.

use std::env;

use serde::Serialize;

/// The id pages import the build context under.
pub const VIRTUAL_MODULE_ID: &str = "virtual:context";

/// The build identity used when the build runs outside CI.
pub const UNKNOWN_SHA: &str = "unknown";

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct BuildContext {
    #[serde(rename = "githubSHA")]
    pub github_sha: String,
}

impl BuildContext {
    /// Reads the build context from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            github_sha: lookup("GITHUB_SHA")
                .filter(|sha| !sha.is_empty())
                .unwrap_or_else(|| UNKNOWN_SHA.to_string()),
        }
    }
}

/// Serves a [`BuildContext`] under [`VIRTUAL_MODULE_ID`].
#[derive(Debug, Clone)]
pub struct ContextModule {
    context: BuildContext,
}

impl ContextModule {
    pub fn new(context: BuildContext) -> Self {
        Self { context }
    }

    /// The resolved id, prefixed with a NUL byte so no other resolver claims it.
    pub fn resolved_id() -> String {
        format!("\0{VIRTUAL_MODULE_ID}")
    }

    pub fn resolve_id(&self, id: &str) -> Option<String> {
        (id == VIRTUAL_MODULE_ID).then(Self::resolved_id)
    }

    pub fn load(&self, id: &str) -> Option<Result<String, serde_json::Error>> {
        (id == Self::resolved_id()).then(|| self.source())
    }

    /// Returns the module's source code.
    pub fn source(&self) -> Result<String, serde_json::Error> {
        Ok(format!(
            "export default {}",
            serde_json::to_string(&self.context)?
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn module(sha: Option<&str>) -> ContextModule {
        ContextModule::new(BuildContext::from_lookup(|key| {
            assert_eq!(key, "GITHUB_SHA");
            sha.map(str::to_string)
        }))
    }

    #[test]
    fn test_context_from_lookup() {
        assert_eq!(
            BuildContext::from_lookup(|_| Some("abc123".to_string())).github_sha,
            "abc123"
        );
        assert_eq!(BuildContext::from_lookup(|_| None).github_sha, "unknown");
        assert_eq!(
            BuildContext::from_lookup(|_| Some(String::new())).github_sha,
            "unknown"
        );
    }

    #[test]
    fn test_resolve_id() {
        let module = module(None);

        assert_eq!(
            module.resolve_id("virtual:context"),
            Some("\0virtual:context".to_string())
        );
        assert_eq!(module.resolve_id("virtual:pages.json"), None);
        assert_eq!(module.resolve_id("\0virtual:context"), None);
    }

    #[test]
    fn test_load() {
        let module = module(Some("0f1e2d"));

        assert_eq!(
            module.load("\0virtual:context").unwrap().unwrap(),
            r#"export default {"githubSHA":"0f1e2d"}"#
        );
        assert!(module.load("virtual:context").is_none());
    }
}
