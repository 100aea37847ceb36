//! Source of the "current location" used when `parse` gets no explicit input.

/// Supplies the locator string (typically a full URL) that `parse` falls back to.
pub trait LocationProvider {
    fn current_location(&self) -> Option<String>;
}

impl<F> LocationProvider for F
where
    F: Fn() -> Option<String>,
{
    fn current_location(&self) -> Option<String> {
        self()
    }
}

/// A provider that always returns the same locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLocation(pub String);

impl StaticLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }
}

impl LocationProvider for StaticLocation {
    fn current_location(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// A provider with no location; `parse(None, &NoLocation)` is an empty mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn current_location(&self) -> Option<String> {
        None
    }
}

/// Reads the locator from an environment variable each time it is asked.
#[derive(Debug, Clone)]
pub struct EnvLocation {
    var: String,
}

impl EnvLocation {
    pub const DEFAULT_VAR: &'static str = "QSTRING_LOCATION";

    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvLocation {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VAR)
    }
}

impl LocationProvider for EnvLocation {
    fn current_location(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|s| !s.is_empty())
    }
}

/// Tries each provider in order and returns the first location found.
pub struct FirstOf<'a>(pub Vec<&'a dyn LocationProvider>);

impl LocationProvider for FirstOf<'_> {
    fn current_location(&self) -> Option<String> {
        self.0.iter().find_map(|p| p.current_location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_provider() {
        let p = || Some("http://example.com/?a=1".to_string());
        assert_eq!(p.current_location().as_deref(), Some("http://example.com/?a=1"));
    }

    #[test]
    fn static_and_none() {
        assert_eq!(
            StaticLocation::new("x?y=1").current_location().as_deref(),
            Some("x?y=1")
        );
        assert_eq!(NoLocation.current_location(), None);
    }

    #[test]
    fn env_provider_missing_var() {
        let p = EnvLocation::new("QSTRING_TEST_SURELY_UNSET_VAR");
        assert_eq!(p.current_location(), None);
    }

    #[test]
    fn first_of_skips_empty_providers() {
        let fallback = StaticLocation::new("?from=fallback");
        let chain = FirstOf(vec![&NoLocation as &dyn LocationProvider, &fallback]);
        assert_eq!(chain.current_location().as_deref(), Some("?from=fallback"));
        assert_eq!(
            FirstOf(vec![&NoLocation as &dyn LocationProvider]).current_location(),
            None
        );
    }
}
