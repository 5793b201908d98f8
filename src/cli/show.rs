//! Show command arguments

use clap::Parser;

/// Arguments for 'show' command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// What to show: verbs, apps, endpoints, get, list, or a search term
    pub target: Option<String>,

    /// Show all endpoints (same as 'show endpoints')
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// Select a value using a dotted path (e.g. .apps.0)
    #[arg(long = "path", value_name = "SELECTOR")]
    pub select_path: Option<String>,
}

/// Resolved 'show' target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowTarget {
    Verbs,
    Apps,
    Endpoints,
    Search(String),
}

impl ShowArgs {
    /// Resolve the target; `None` when neither a target nor --all is given
    pub fn resolve_target(&self) -> Option<ShowTarget> {
        if self.all {
            return Some(ShowTarget::Endpoints);
        }
        let target = self.target.as_deref()?;
        Some(match target {
            "verbs" | "commands" => ShowTarget::Verbs,
            "apps" => ShowTarget::Apps,
            "endpoints" | "get" | "list" => ShowTarget::Endpoints,
            term => ShowTarget::Search(term.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(target: Option<&str>, all: bool) -> ShowArgs {
        ShowArgs {
            target: target.map(str::to_string),
            all,
            select_path: None,
        }
    }

    #[test]
    fn test_resolve_target_keywords() {
        assert_eq!(args(Some("verbs"), false).resolve_target(), Some(ShowTarget::Verbs));
        assert_eq!(args(Some("commands"), false).resolve_target(), Some(ShowTarget::Verbs));
        assert_eq!(args(Some("apps"), false).resolve_target(), Some(ShowTarget::Apps));
        assert_eq!(args(Some("list"), false).resolve_target(), Some(ShowTarget::Endpoints));
    }

    #[test]
    fn test_resolve_target_search() {
        assert_eq!(
            args(Some("vlan"), false).resolve_target(),
            Some(ShowTarget::Search("vlan".to_string()))
        );
    }

    #[test]
    fn test_resolve_target_all_wins() {
        assert_eq!(args(Some("apps"), true).resolve_target(), Some(ShowTarget::Endpoints));
    }

    #[test]
    fn test_resolve_target_missing() {
        assert_eq!(args(None, false).resolve_target(), None);
    }
}
