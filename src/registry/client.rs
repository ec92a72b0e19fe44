//! Land Registry Client
//!
//! Binds the configured signing account to the deployed contract and exposes
//! the two portal operations: register a record, fetch a record by id.

use ethers::contract::abigen;
use ethers::core::types::{Address, U256, U64};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use std::sync::Arc;
use thiserror::Error;

use crate::config::RegistryConfig;

abigen!(LandRegistry, "abi/LandRegistry.json");

/// Signer-backed middleware used for every contract call
type RegistryMiddleware = SignerMiddleware<Provider<Http>, LocalWallet>;

/// A land record as reported by the contract
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LandRecord {
    pub id: u64,
    pub owner: Address,
    pub property_address: String,
}

/// Ledger-reported outcome of a registration transaction
#[derive(Debug, Clone, serde::Serialize)]
pub struct RegistrationOutcome {
    pub tx_hash: String,
    pub block_number: Option<u64>,
}

/// Client bound to one deployed `LandRegistry` instance
#[derive(Debug)]
pub struct RegistryClient {
    contract: LandRegistry<RegistryMiddleware>,
    account: Address,
}

impl RegistryClient {
    /// Connect the configured signing account to the deployed contract.
    ///
    /// Fails with [`RegistryError::WalletUnavailable`] when no signer key is
    /// configured; no contract handle is constructed in that case.
    pub async fn connect(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let key = config
            .signer_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(RegistryError::WalletUnavailable)?;

        let contract_address = config.contract_address.parse::<Address>().map_err(|e| {
            RegistryError::Config(format!(
                "invalid contract address {:?}: {}",
                config.contract_address, e
            ))
        })?;

        let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
            .map_err(|e| RegistryError::Config(format!("invalid RPC url {:?}: {}", config.rpc_url, e)))?;

        let chain_id = match config.chain_id {
            Some(id) => id,
            None => provider.get_chainid().await?.as_u64(),
        };

        let wallet = key
            .parse::<LocalWallet>()
            .map_err(|e| RegistryError::Config(format!("invalid signer key: {}", e)))?
            .with_chain_id(chain_id);
        let account = wallet.address();

        let client = Arc::new(SignerMiddleware::new(provider, wallet));
        let contract = LandRegistry::new(contract_address, client);

        tracing::info!(
            account = ?account,
            contract = ?contract_address,
            chain_id,
            "land registry connected"
        );

        Ok(Self { contract, account })
    }

    /// Account the portal signs with
    pub fn account(&self) -> Address {
        self.account
    }

    /// Submit a registration and wait for the inclusion receipt.
    pub async fn register_land(
        &self,
        id: u64,
        owner: Address,
        property_address: &str,
    ) -> Result<RegistrationOutcome, RegistryError> {
        let call = self
            .contract
            .register_land(U256::from(id), owner, property_address.to_string());

        let pending = call
            .send()
            .await
            .map_err(|e| RegistryError::Contract(e.to_string()))?;
        let tx_hash = format!("{:?}", pending.tx_hash());

        let receipt = pending.await?.ok_or(RegistryError::TxDropped)?;
        if receipt.status == Some(U64::from(1)) {
            tracing::info!(tx_hash = %tx_hash, land_id = id, "land registration confirmed");
            Ok(RegistrationOutcome {
                tx_hash,
                block_number: receipt.block_number.map(|n| n.as_u64()),
            })
        } else {
            Err(RegistryError::TxFailed(tx_hash))
        }
    }

    /// Read-only lookup; `None` when the id has never been registered.
    pub async fn get_land_details(&self, id: u64) -> Result<Option<LandRecord>, RegistryError> {
        let (id, owner, property_address) = self
            .contract
            .get_land_details(U256::from(id))
            .call()
            .await
            .map_err(|e| RegistryError::Contract(e.to_string()))?;

        Ok(record_from_parts(id, owner, property_address))
    }
}

/// The contract returns a zeroed record for unknown ids.
fn record_from_parts(id: U256, owner: Address, property_address: String) -> Option<LandRecord> {
    if owner == Address::zero() {
        return None;
    }
    Some(LandRecord {
        id: id.as_u64(),
        owner,
        property_address,
    })
}

/// Errors that can occur when talking to the land registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No signing account is configured; the contract flow cannot start
    #[error("no signing account available; set registry.signer_key or MOTPORTAL_SIGNER_KEY")]
    WalletUnavailable,

    #[error("invalid registry configuration: {0}")]
    Config(String),

    #[error("provider error: {0}")]
    Provider(#[from] ethers::providers::ProviderError),

    #[error("contract call failed: {0}")]
    Contract(String),

    #[error("transaction {0} reverted on-chain")]
    TxFailed(String),

    #[error("transaction dropped from the mempool")]
    TxDropped,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known development key (ganache account #0)
    const DEV_KEY: &str = "4f3edf983ac636a65a842ce7c78d9aa706d3b113bce9c46f30d7d21715b23b1d";
    const DEV_ADDRESS: &str = "0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1";
    const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    fn config_with_key(key: Option<&str>) -> RegistryConfig {
        RegistryConfig {
            enabled: true,
            rpc_url: "http://localhost:8545".to_string(),
            contract_address: CONTRACT.to_string(),
            chain_id: Some(1337),
            signer_key: key.map(|k| k.to_string()),
        }
    }

    #[tokio::test]
    async fn connect_without_signer_is_wallet_unavailable() {
        let err = RegistryClient::connect(&config_with_key(None))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::WalletUnavailable));

        // An empty key counts as absent too
        let err = RegistryClient::connect(&config_with_key(Some("")))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::WalletUnavailable));
    }

    #[tokio::test]
    async fn connect_rejects_bad_contract_address() {
        let mut config = config_with_key(Some(DEV_KEY));
        config.contract_address = "not-an-address".to_string();

        let err = RegistryClient::connect(&config).await.unwrap_err();
        assert!(matches!(err, RegistryError::Config(_)));
    }

    #[tokio::test]
    async fn connect_derives_the_signing_account() {
        // With an explicit chain id no network round-trip is needed
        let client = RegistryClient::connect(&config_with_key(Some(DEV_KEY)))
            .await
            .unwrap();
        assert_eq!(client.account(), DEV_ADDRESS.parse::<Address>().unwrap());
    }

    #[test]
    fn zeroed_record_reads_as_absent() {
        assert_eq!(
            record_from_parts(U256::zero(), Address::zero(), String::new()),
            None
        );

        let owner: Address = DEV_ADDRESS.parse().unwrap();
        let record = record_from_parts(U256::from(7u64), owner, "123 Main St".to_string()).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.owner, owner);
        assert_eq!(record.property_address, "123 Main St");
    }
}
