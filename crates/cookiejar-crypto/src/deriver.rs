use cookiejar_types::{Address, Namespace, ADDRESS_SUFFIX_LEN, NAMESPACE_LEN};

use crate::hasher::Sha512Hasher;

/// Maps signer identities to state addresses inside one family namespace.
///
/// The namespace hash is computed once at construction; the deriver is then
/// immutable and can be shared by reference across every transaction.
#[derive(Clone, Debug)]
pub struct AddressDeriver {
    namespace: Namespace,
}

impl AddressDeriver {
    /// Build a deriver for the given transaction family name.
    pub fn new(family_name: &str) -> Self {
        Self {
            namespace: Self::derive_namespace(family_name),
        }
    }

    /// First 6 hex characters of SHA-512 over the family name.
    pub fn derive_namespace(family_name: &str) -> Namespace {
        Namespace::from_derived(&Sha512Hasher::hash_hex_prefix(
            family_name.as_bytes(),
            NAMESPACE_LEN,
        ))
    }

    /// The namespace every derived address starts with.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Namespace followed by the first 64 hex characters of SHA-512 over the
    /// identity.
    pub fn derive_address(&self, identity: &str) -> Address {
        let suffix = Sha512Hasher::hash_hex_prefix(identity.as_bytes(), ADDRESS_SUFFIX_LEN);
        Address::from_derived(&self.namespace, &suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookiejar_types::{ADDRESS_LEN, FAMILY_NAME};
    use proptest::prelude::*;

    #[test]
    fn cookiejar_namespace() {
        assert_eq!(AddressDeriver::derive_namespace(FAMILY_NAME).as_str(), "a4d219");
    }

    #[test]
    fn known_address() {
        let deriver = AddressDeriver::new(FAMILY_NAME);
        let addr = deriver.derive_address("alice");
        assert_eq!(
            addr.as_str(),
            "a4d219408b27d3097eea5a46bf2ab6433a7234a33d5e49957b13ec7acc2ca08e1a13c7"
        );
        assert_eq!(addr.as_str().len(), ADDRESS_LEN);
    }

    #[test]
    fn address_is_inside_namespace() {
        let deriver = AddressDeriver::new(FAMILY_NAME);
        let addr = deriver.derive_address("02abcdef");
        assert!(deriver.namespace().contains(addr.as_str()));
    }

    #[test]
    fn other_family_other_namespace() {
        assert_ne!(
            AddressDeriver::derive_namespace("intkey"),
            AddressDeriver::derive_namespace(FAMILY_NAME)
        );
    }

    proptest! {
        #[test]
        fn derivation_is_pure(id in ".*") {
            let deriver = AddressDeriver::new(FAMILY_NAME);
            prop_assert_eq!(deriver.derive_address(&id), deriver.derive_address(&id));
        }

        #[test]
        fn distinct_identities_distinct_addresses(a in "[0-9a-f]{66}", b in "[0-9a-f]{66}") {
            prop_assume!(a != b);
            let deriver = AddressDeriver::new(FAMILY_NAME);
            prop_assert_ne!(deriver.derive_address(&a), deriver.derive_address(&b));
        }
    }
}
