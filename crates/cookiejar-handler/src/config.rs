use cookiejar_crypto::AddressDeriver;
use cookiejar_types::{Namespace, FAMILY_NAME, FAMILY_VERSION};

/// Immutable family configuration shared by every transaction.
///
/// Built once at startup (the namespace hash is computed here) and handed to
/// handlers behind an `Arc`; nothing mutates it afterwards.
#[derive(Clone, Debug)]
pub struct HandlerConfig {
    family_name: String,
    family_versions: Vec<String>,
    deriver: AddressDeriver,
}

impl HandlerConfig {
    pub fn new(family_name: impl Into<String>, family_versions: Vec<String>) -> Self {
        let family_name = family_name.into();
        let deriver = AddressDeriver::new(&family_name);
        Self {
            family_name,
            family_versions,
            deriver,
        }
    }

    /// Configuration for the `cookiejar` family, version `1.0`.
    pub fn cookiejar() -> Self {
        Self::new(FAMILY_NAME, vec![FAMILY_VERSION.to_string()])
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn family_versions(&self) -> &[String] {
        &self.family_versions
    }

    pub fn namespace(&self) -> &Namespace {
        self.deriver.namespace()
    }

    pub fn deriver(&self) -> &AddressDeriver {
        &self.deriver
    }
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self::cookiejar()
    }
}
