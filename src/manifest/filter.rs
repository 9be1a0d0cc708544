//! Conditional filter for Gomfile entries
//!
//! An entry applies to a build when both of its optional constraints hold:
//! - `group`: one of the entry's groups equals one of the active build contexts
//! - `goos`: one of the entry's operating systems equals the target OS
//!
//! A missing option places no constraint. Matching is exact string equality;
//! which contexts are active is decided by the caller.

use super::{Dependency, OPTION_GOOS, OPTION_GROUP, OptionValue};

/// The build context entries are matched against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Active build contexts (e.g. `development`, `test`, `production`)
    pub groups: Vec<String>,
    /// Target operating system in Go naming (`linux`, `darwin`, `windows`, ...)
    pub goos: String,
}

impl BuildContext {
    /// Creates a context from active groups and a target OS.
    pub fn new<I, S>(groups: I, goos: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
            goos: goos.into(),
        }
    }

    /// Returns `true` if `dep` applies to this context.
    #[must_use]
    pub fn includes(&self, dep: &Dependency) -> bool {
        let group_ok = dep
            .option(OPTION_GROUP)
            .is_none_or(|value| any_matches(value, |g| self.groups.iter().any(|active| active == g)));
        let goos_ok = dep.option(OPTION_GOOS).is_none_or(|value| any_matches(value, |os| os == self.goos));

        if !(group_ok && goos_ok) {
            tracing::debug!("Skipping '{}' for context {:?}/{}", dep.name, self.groups, self.goos);
        }
        group_ok && goos_ok
    }

    /// Keeps the entries that apply to this context, preserving their order.
    #[must_use]
    pub fn filter(&self, deps: impl IntoIterator<Item = Dependency>) -> Vec<Dependency> {
        deps.into_iter().filter(|dep| self.includes(dep)).collect()
    }
}

fn any_matches(value: &OptionValue, pred: impl Fn(&str) -> bool) -> bool {
    value.values().into_iter().any(pred)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(groups: &[&str], goos: &str) -> BuildContext {
        BuildContext::new(groups.iter().copied(), goos)
    }

    #[test]
    fn test_unconstrained_always_included() {
        let dep = Dependency::new("a.io/x");
        assert!(ctx(&["development"], "linux").includes(&dep));
        assert!(ctx(&[], "windows").includes(&dep));
    }

    #[test]
    fn test_group_exact_match() {
        let dep = Dependency::new("a.io/x").with_option(OPTION_GROUP, "test");
        assert!(ctx(&["test"], "linux").includes(&dep));
        assert!(!ctx(&["development"], "linux").includes(&dep));
        assert!(!ctx(&["testing"], "linux").includes(&dep));
        assert!(ctx(&["development", "test"], "linux").includes(&dep));
    }

    #[test]
    fn test_group_list() {
        let dep = Dependency::new("a.io/x")
            .with_option(OPTION_GROUP, OptionValue::List(vec!["test".into(), "development".into()]));
        assert!(ctx(&["development"], "linux").includes(&dep));
        assert!(!ctx(&["production"], "linux").includes(&dep));
    }

    #[test]
    fn test_goos() {
        let dep = Dependency::new("a.io/x").with_option(OPTION_GOOS, "darwin");
        assert!(ctx(&["development"], "darwin").includes(&dep));
        assert!(!ctx(&["development"], "linux").includes(&dep));
    }

    #[test]
    fn test_both_constraints_must_pass() {
        let dep = Dependency::new("a.io/x")
            .with_option(OPTION_GROUP, "test")
            .with_option(OPTION_GOOS, "linux");
        assert!(ctx(&["test"], "linux").includes(&dep));
        assert!(!ctx(&["test"], "windows").includes(&dep));
        assert!(!ctx(&["development"], "linux").includes(&dep));
    }

    #[test]
    fn test_non_string_value_never_matches() {
        let dep = Dependency::new("a.io/x").with_option(OPTION_GROUP, OptionValue::Bool(true));
        assert!(!ctx(&["true"], "linux").includes(&dep));
    }

    #[test]
    fn test_filter_preserves_order() {
        let deps = vec![
            Dependency::new("z.io/last"),
            Dependency::new("a.io/test-only").with_option(OPTION_GROUP, "test"),
            Dependency::new("m.io/middle"),
        ];
        let kept = ctx(&["development"], "linux").filter(deps);
        let names: Vec<_> = kept.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["z.io/last", "m.io/middle"]);
    }
}
