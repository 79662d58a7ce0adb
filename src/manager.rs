//! Registration layer: fluent and options-table policy registration.

use std::sync::Arc;

use crate::pattern::WILDCARD;
use crate::policy::{CorsPolicy, PolicyOptions, StringOrList};
use crate::registry::PolicyRegistry;

/// Owns a [`PolicyRegistry`] during the configuration phase and offers the
/// two registration surfaces: the fluent [`origins`](CorsManager::origins)
/// chain and the declarative [`register`](CorsManager::register) options
/// table. Once configured, hand the registry to a dispatcher and stop
/// mutating it.
///
/// # Example
///
/// ```rust
/// use corsgate::manager::CorsManager;
///
/// let mut manager = CorsManager::new();
/// manager
///     .origins("https://a.com, *.example.com")
///     .methods("GET, HEAD, POST")
///     .credentials(true)
///     .max_age(600);
/// let dispatcher = manager.into_dispatcher();
/// ```
#[derive(Debug, Clone, Default)]
pub struct CorsManager {
    registry: PolicyRegistry,
}

impl CorsManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: PolicyRegistry::new(),
        }
    }

    /// Register a policy for the given origins and return a registrar for
    /// configuring it further. The new policy starts with wildcard headers
    /// and methods.
    pub fn origins(&mut self, origins: impl Into<StringOrList>) -> PolicyRegistrar<'_> {
        let mut policy = CorsPolicy::new();
        policy.set_allowed_origins(origins);
        let mut registrar = PolicyRegistrar {
            registry: &mut self.registry,
            policy,
        };
        registrar.commit();
        registrar
    }

    /// Register a policy from a deserialized options table. Absent origins
    /// default to the wildcard.
    pub fn register(&mut self, options: PolicyOptions) {
        let origins = options
            .origins
            .unwrap_or_else(|| StringOrList::from(WILDCARD));
        let mut registrar = self.origins(origins);
        if let Some(headers) = options.headers {
            registrar = registrar.headers(headers);
        }
        if let Some(methods) = options.methods {
            registrar = registrar.methods(methods);
        }
        if let Some(credentials) = options.credentials {
            registrar = registrar.credentials(credentials);
        }
        if let Some(exposed) = options.exposed_headers {
            registrar = registrar.exposed_headers(exposed);
        }
        if let Some(seconds) = options.max_age {
            registrar.max_age(seconds);
        }
    }

    #[must_use]
    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PolicyRegistry {
        &mut self.registry
    }

    #[must_use]
    pub fn into_registry(self) -> PolicyRegistry {
        self.registry
    }

    /// Finish configuration and build a dispatcher over the registry.
    #[must_use]
    pub fn into_dispatcher(self) -> crate::dispatcher::CorsDispatcher {
        crate::dispatcher::CorsDispatcher::new(self.registry)
    }
}

/// Fluent builder returned by [`CorsManager::origins`].
///
/// Holds the just-created policy directly rather than chasing the
/// registry's last-inserted entry; every setter re-commits the policy under
/// its origin keys, so the registration a reader observes is always the
/// latest configuration (last write for a key wins).
#[derive(Debug)]
pub struct PolicyRegistrar<'r> {
    registry: &'r mut PolicyRegistry,
    policy: CorsPolicy,
}

impl PolicyRegistrar<'_> {
    fn commit(&mut self) {
        self.registry.add(Arc::new(self.policy.clone()));
    }

    /// Set allowed request headers.
    pub fn headers(mut self, headers: impl Into<StringOrList>) -> Self {
        self.policy.set_allowed_headers(headers);
        self.commit();
        self
    }

    /// Set allowed request methods.
    pub fn methods(mut self, methods: impl Into<StringOrList>) -> Self {
        self.policy.set_allowed_methods(methods);
        self.commit();
        self
    }

    /// Allow or disallow credentialed requests.
    pub fn credentials(mut self, value: bool) -> Self {
        self.policy.set_allowed_credentials(value);
        self.commit();
        self
    }

    /// Set the headers exposed to browser-side code.
    pub fn exposed_headers(mut self, headers: impl Into<StringOrList>) -> Self {
        self.policy.set_exposed_headers(headers);
        self.commit();
        self
    }

    /// Set the preflight cache duration in seconds.
    pub fn max_age(mut self, seconds: u32) -> Self {
        self.policy.set_max_age(seconds);
        self.commit();
        self
    }
}
