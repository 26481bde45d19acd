/// Default mount path of the documentation UI
pub const DEFAULT_SWAGGER_UI_PATH: &str = "swagger-ui";

/// Matches request paths against the documentation UI mount point.
///
/// Serving the UI assets is left to the hosting server; this only decides whether a
/// request belongs to the UI and which asset it asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwaggerUiMount {
    prefix: String,
}

impl SwaggerUiMount {
    /// Mount under `path`; surrounding slashes are ignored, so `swagger-ui` and
    /// `/swagger-ui/` are the same mount.
    pub fn new(path: &str) -> Self {
        Self {
            prefix: format!("/{}/", path.trim_matches('/')),
        }
    }

    /// The `/<path>/` prefix request paths are compared against
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Asset path relative to the mount, or `None` if `request_path` is outside it
    pub fn resolve<'a>(&self, request_path: &'a str) -> Option<&'a str> {
        request_path.strip_prefix(self.prefix.as_str())
    }
}

impl Default for SwaggerUiMount {
    fn default() -> Self {
        Self::new(DEFAULT_SWAGGER_UI_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_normalized() {
        assert_eq!(SwaggerUiMount::new("swagger-ui").prefix(), "/swagger-ui/");
        assert_eq!(SwaggerUiMount::new("/docs/ui/").prefix(), "/docs/ui/");
        assert_eq!(SwaggerUiMount::default().prefix(), "/swagger-ui/");
    }

    #[test]
    fn test_resolve_inside_mount() {
        let mount = SwaggerUiMount::new("/swagger-ui");
        assert_eq!(mount.resolve("/swagger-ui/index.html"), Some("index.html"));
        assert_eq!(mount.resolve("/swagger-ui/"), Some(""));
    }

    #[test]
    fn test_resolve_outside_mount() {
        let mount = SwaggerUiMount::default();
        assert_eq!(mount.resolve("/swagger-ui"), None);
        assert_eq!(mount.resolve("/api/users"), None);
        assert_eq!(mount.resolve("/swagger-uix/index.html"), None);
    }
}
