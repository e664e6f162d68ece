use std::collections::BTreeMap;
use std::sync::Arc;

use cookiejar_store::StateStore;
use cookiejar_types::{Address, Namespace};
use tracing::{debug, info};

use crate::config::HandlerConfig;
use crate::error::{ApplyError, ApplyResult};
use crate::handler::TransactionHandler;
use crate::mutation::StateMutation;
use crate::payload::{parse_decimal, Operation};
use crate::transaction::Transaction;

/// Handler for the `cookiejar` family.
///
/// Each signer owns one jar at the address derived from their public key.
/// The jar's value is a decimal cookie count.
#[derive(Clone, Debug)]
pub struct CookieJarHandler {
    config: Arc<HandlerConfig>,
}

impl CookieJarHandler {
    pub fn new(config: Arc<HandlerConfig>) -> Self {
        debug!(
            family = config.family_name(),
            namespace = %config.namespace(),
            "cookiejar handler created"
        );
        Self { config }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Address of the jar owned by `public_key`.
    pub fn address_for(&self, public_key: &str) -> Address {
        self.config.deriver().derive_address(public_key)
    }

    fn bake(
        &self,
        state: &dyn StateStore,
        address: &Address,
        public_key: &str,
        amount: u64,
    ) -> ApplyResult<StateMutation> {
        let previous = read_balance(state, address)?;
        let balance = match previous {
            None => {
                info!(public_key, address = %address.short(), "no previous cookies, creating new jar");
                amount
            }
            Some(current) => current
                .checked_add(amount)
                .ok_or(ApplyError::BalanceOverflow { current, amount })?,
        };
        info!(address = %address.short(), amount, balance, "baking cookies");
        write_balance(state, address, balance)?;
        Ok(StateMutation {
            address: address.clone(),
            operation: Operation::Bake { amount },
            previous,
            balance,
        })
    }

    fn eat(
        &self,
        state: &dyn StateStore,
        address: &Address,
        public_key: &str,
        amount: u64,
    ) -> ApplyResult<StateMutation> {
        let current = read_balance(state, address)?.ok_or_else(|| ApplyError::AccountNotFound {
            public_key: public_key.to_string(),
        })?;
        if current < amount {
            return Err(ApplyError::InsufficientBalance {
                max: current,
                requested: amount,
            });
        }
        let balance = current - amount;
        info!(address = %address.short(), amount, balance, "eating cookies");
        write_balance(state, address, balance)?;
        Ok(StateMutation {
            address: address.clone(),
            operation: Operation::Eat { amount },
            previous: Some(current),
            balance,
        })
    }

    fn clear(
        &self,
        state: &dyn StateStore,
        address: &Address,
        public_key: &str,
    ) -> ApplyResult<StateMutation> {
        let current = read_balance(state, address)?.ok_or_else(|| ApplyError::AccountNotFound {
            public_key: public_key.to_string(),
        })?;
        info!(address = %address.short(), cleared = current, "clearing cookie jar");
        write_balance(state, address, 0)?;
        Ok(StateMutation {
            address: address.clone(),
            operation: Operation::Clear,
            previous: Some(current),
            balance: 0,
        })
    }
}

impl Default for CookieJarHandler {
    fn default() -> Self {
        Self::new(Arc::new(HandlerConfig::cookiejar()))
    }
}

impl TransactionHandler for CookieJarHandler {
    fn family_name(&self) -> &str {
        self.config.family_name()
    }

    fn family_versions(&self) -> &[String] {
        self.config.family_versions()
    }

    fn namespaces(&self) -> Vec<Namespace> {
        vec![self.config.namespace().clone()]
    }

    fn apply(
        &self,
        transaction: &Transaction,
        state: &dyn StateStore,
    ) -> ApplyResult<StateMutation> {
        let public_key = transaction.signer_public_key();
        let address = self.address_for(public_key);
        debug!(public_key, address = %address.short(), "applying transaction");

        let operation = Operation::from_bytes(&transaction.payload)?;
        debug!(operation = operation.name(), amount = ?operation.amount(), "parsed payload");

        match operation {
            Operation::Bake { amount } => self.bake(state, &address, public_key, amount),
            Operation::Eat { amount } => self.eat(state, &address, public_key, amount),
            Operation::Clear => self.clear(state, &address, public_key),
        }
    }
}

/// Current balance at `address`; `None` when the jar does not exist.
fn read_balance(state: &dyn StateStore, address: &Address) -> ApplyResult<Option<u64>> {
    let Some(raw) = state.get_one(address)? else {
        debug!(address = %address.short(), "no jar at address");
        return Ok(None);
    };
    let text = std::str::from_utf8(&raw).map_err(|e| ApplyError::CorruptState {
        address: address.clone(),
        reason: format!("value is not UTF-8: {e}"),
    })?;
    let balance = parse_decimal(text).ok_or_else(|| ApplyError::CorruptState {
        address: address.clone(),
        reason: format!("value {text:?} is not a cookie count"),
    })?;
    debug!(address = %address.short(), balance, "read jar");
    Ok(Some(balance))
}

fn write_balance(state: &dyn StateStore, address: &Address, balance: u64) -> ApplyResult<()> {
    let written = state.set(BTreeMap::from([(
        address.clone(),
        balance.to_string().into_bytes(),
    )]))?;
    if !written.contains(address) {
        return Err(ApplyError::WriteNotAcknowledged {
            address: address.clone(),
        });
    }
    Ok(())
}
