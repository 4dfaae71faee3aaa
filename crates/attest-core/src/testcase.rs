//! Test case definition, hooks, and metadata.

use std::collections::BTreeMap;
use std::fmt;

use crate::fatal::fatal;

/// Hook run at construction time to describe the test case through metadata.
pub type HeadFn = fn(&mut TestCase);
/// The test logic.
pub type BodyFn = fn(&TestCase);
/// Hook the supervising process invokes after the body has run.
pub type CleanupFn = fn(&TestCase);

const IDENT_VAR: &str = "ident";
const HAS_CLEANUP_VAR: &str = "has.cleanup";

/// One instantiated test case: identity, hooks, the caller-supplied
/// configuration mapping, and the metadata the head hook filled in.
///
/// The `"ident"` metadata property always equals the constructor-supplied
/// identifier. The head hook may set any other property but mutating
/// `"ident"` is fatal, detected before the body ever runs.
pub struct TestCase {
    ident: String,
    body: BodyFn,
    cleanup: Option<CleanupFn>,
    config: Option<BTreeMap<String, String>>,
    vars: BTreeMap<String, String>,
}

impl TestCase {
    pub fn new(
        ident: &str,
        head: Option<HeadFn>,
        body: BodyFn,
        cleanup: Option<CleanupFn>,
        config: Option<BTreeMap<String, String>>,
    ) -> Self {
        let mut tc = TestCase {
            ident: ident.to_owned(),
            body,
            cleanup,
            config,
            vars: BTreeMap::new(),
        };
        tc.set_md_var(IDENT_VAR, ident);
        if tc.cleanup.is_some() {
            tc.set_md_var(HAS_CLEANUP_VAR, "true");
        }
        if let Some(head) = head {
            head(&mut tc);
        }
        if tc.vars.get(IDENT_VAR).map(String::as_str) != Some(ident) {
            fatal!("Test case head modified the read-only 'ident' property");
        }
        tc
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Sets or overwrites a metadata property.
    pub fn set_md_var(&mut self, name: &str, value: impl fmt::Display) {
        self.vars.insert(name.to_owned(), value.to_string());
    }

    pub fn has_md_var(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Returns a metadata property. The key must exist; asking for a missing
    /// one is a caller bug and panics.
    pub fn get_md_var(&self, name: &str) -> &str {
        match self.vars.get(name) {
            Some(value) => value,
            None => panic!(
                "test case '{}' has no metadata property '{name}'",
                self.ident
            ),
        }
    }

    /// Metadata properties in key order.
    pub fn md_vars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn has_config_var(&self, name: &str) -> bool {
        self.config
            .as_ref()
            .is_some_and(|config| config.contains_key(name))
    }

    /// Returns a configuration variable. The key must exist; asking for a
    /// missing one is a caller bug and panics.
    pub fn get_config_var(&self, name: &str) -> &str {
        match self.config.as_ref().and_then(|config| config.get(name)) {
            Some(value) => value,
            None => panic!(
                "test case '{}' has no configuration variable '{name}'",
                self.ident
            ),
        }
    }

    /// Like [`TestCase::get_config_var`] but returns `default` when the key
    /// is missing or no configuration mapping was supplied at all.
    pub fn get_config_var_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.config
            .as_ref()
            .and_then(|config| config.get(name))
            .map_or(default, String::as_str)
    }

    pub(crate) fn body(&self) -> BodyFn {
        self.body
    }

    pub(crate) fn cleanup(&self) -> Option<CleanupFn> {
        self.cleanup
    }
}

/// Static description of a test case, suitable for const registration
/// tables. [`TestCaseDef::instantiate`] turns it into a runnable
/// [`TestCase`] against a concrete configuration.
#[derive(Debug, Clone, Copy)]
pub struct TestCaseDef {
    pub ident: &'static str,
    pub head: Option<HeadFn>,
    pub body: BodyFn,
    pub cleanup: Option<CleanupFn>,
}

impl TestCaseDef {
    pub fn instantiate(&self, config: Option<BTreeMap<String, String>>) -> TestCase {
        TestCase::new(self.ident, self.head, self.body, self.cleanup, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_body(_tc: &TestCase) {}
    fn noop_cleanup(_tc: &TestCase) {}

    fn describing_head(tc: &mut TestCase) {
        tc.set_md_var("descr", "checks nothing in particular");
        tc.set_md_var("timeout", 300);
    }

    #[test]
    fn seeds_ident_metadata() {
        let tc = TestCase::new("t_exact", None, noop_body, None, None);
        assert_eq!(tc.ident(), "t_exact");
        assert_eq!(tc.get_md_var("ident"), "t_exact");
        assert!(!tc.has_md_var("has.cleanup"));
    }

    #[test]
    fn seeds_cleanup_marker_when_hook_present() {
        let tc = TestCase::new("t_clean", None, noop_body, Some(noop_cleanup), None);
        assert_eq!(tc.get_md_var("has.cleanup"), "true");
    }

    #[test]
    fn head_runs_during_construction() {
        let tc = TestCase::new("t_head", Some(describing_head), noop_body, None, None);
        assert_eq!(tc.get_md_var("descr"), "checks nothing in particular");
        assert_eq!(tc.get_md_var("timeout"), "300");
    }

    #[test]
    fn md_vars_iterates_in_key_order() {
        let tc = TestCase::new("t_order", Some(describing_head), noop_body, None, None);
        let keys: Vec<&str> = tc.md_vars().map(|(k, _)| k).collect();
        assert_eq!(keys, ["descr", "ident", "timeout"]);
    }

    #[test]
    fn set_md_var_overwrites() {
        let mut tc = TestCase::new("t_set", None, noop_body, None, None);
        tc.set_md_var("descr", "first");
        tc.set_md_var("descr", "second");
        assert_eq!(tc.get_md_var("descr"), "second");
    }

    #[test]
    #[should_panic(expected = "no metadata property")]
    fn missing_metadata_key_panics() {
        let tc = TestCase::new("t_missing", None, noop_body, None, None);
        let _ = tc.get_md_var("descr");
    }

    #[test]
    fn config_lookup_with_and_without_mapping() {
        let config = BTreeMap::from([("lang".to_owned(), "c".to_owned())]);
        let with = TestCase::new("t_cfg", None, noop_body, None, Some(config));
        assert!(with.has_config_var("lang"));
        assert_eq!(with.get_config_var("lang"), "c");
        assert_eq!(with.get_config_var_or("lang", "rust"), "c");
        assert_eq!(with.get_config_var_or("arch", "any"), "any");

        let without = TestCase::new("t_nocfg", None, noop_body, None, None);
        assert!(!without.has_config_var("lang"));
        assert_eq!(without.get_config_var_or("lang", "rust"), "rust");
    }

    #[test]
    #[should_panic(expected = "no configuration variable")]
    fn missing_config_key_panics() {
        let tc = TestCase::new("t_cfg_missing", None, noop_body, None, None);
        let _ = tc.get_config_var("lang");
    }

    #[test]
    fn def_instantiates_with_hooks() {
        const DEF: TestCaseDef = TestCaseDef {
            ident: "t_def",
            head: Some(describing_head),
            body: noop_body,
            cleanup: Some(noop_cleanup),
        };
        let tc = DEF.instantiate(None);
        assert_eq!(tc.ident(), "t_def");
        assert_eq!(tc.get_md_var("has.cleanup"), "true");
        assert_eq!(tc.get_md_var("timeout"), "300");
    }
}
