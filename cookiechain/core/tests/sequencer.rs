use std::{
    path::PathBuf,
    sync::{Arc, Mutex, OnceLock},
    thread::{self, ThreadId},
};

use cookiechain_core::{
    config::{AccountConfig, BootstrapConfig, Secret, DEFAULT_QUERY_FUNCTION},
    identity::SigningIdentity,
    network::{Connection, NetworkConnector},
    sequencer::{BootstrapSequencer, Outcome, Step},
    BoxError, Error, Result,
};
use log::{Level, LevelFilter, Log, Metadata, Record};
use starknet::core::types::{Felt, FunctionCall};
use starknet::core::utils::get_selector_from_name;
use starknet::macros::{felt, short_string};
use tempfile::TempDir;
use url::Url;

const PHRASE: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const ADDR1: Felt = felt!("0xadd1");

const COOKIE_ABI: &str = r#"{
    "cookiesCount": { "outputs": [{ "type": "core::integer::u32" }], "state_mutability": "view" },
    "get_owned_cookies": {
        "inputs": [{ "name": "account", "type": "core::starknet::contract_address::ContractAddress" }],
        "outputs": [{ "type": "core::array::Array::<core::felt252>" }],
        "state_mutability": "view"
    },
    "register_cookie": { "inputs": [{ "name": "cookie", "type": "core::felt252" }], "state_mutability": "external" }
}"#;

#[derive(Debug, Clone)]
struct MockConnector {
    reachable: bool,
    connection: MockConnection,
}

#[derive(Debug, Clone)]
struct MockConnection {
    chain_id: Felt,
    response: std::result::Result<Vec<Felt>, String>,
    calls: Arc<Mutex<Vec<FunctionCall>>>,
}

impl MockConnector {
    fn reachable(response: std::result::Result<Vec<Felt>, String>) -> Self {
        Self {
            reachable: true,
            connection: MockConnection {
                chain_id: short_string!("SN_SEPOLIA"),
                response,
                calls: Default::default(),
            },
        }
    }

    fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::reachable(Ok(vec![]))
        }
    }

    fn calls(&self) -> Vec<FunctionCall> {
        self.connection.calls.lock().unwrap().clone()
    }
}

impl NetworkConnector for MockConnector {
    type Connection = MockConnection;

    fn endpoint(&self) -> &str {
        "wss://testnet.example/"
    }

    async fn connect(&self) -> Result<MockConnection> {
        if !self.reachable {
            return Err(Error::Connection {
                endpoint: self.endpoint().to_string(),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )),
            });
        }

        Ok(self.connection.clone())
    }
}

impl Connection for MockConnection {
    fn chain_id(&self) -> Felt {
        self.chain_id
    }

    async fn call(&self, call: FunctionCall) -> std::result::Result<Vec<Felt>, BoxError> {
        self.calls.lock().unwrap().push(call);
        self.response.clone().map_err(BoxError::from)
    }
}

struct Fixture {
    _dir: TempDir,
    abi_path: PathBuf,
}

fn fixture(abi: &str) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let abi_path = dir.path().join("cookie_chain.json");
    std::fs::write(&abi_path, abi).unwrap();

    Fixture {
        _dir: dir,
        abi_path,
    }
}

/// Keeps info records per test thread so parallel tests do not see each other's lines.
#[derive(Default)]
struct CapturingLogger {
    lines: Mutex<Vec<(ThreadId, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= Level::Info && metadata.target().starts_with("cookiechain_core")
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            self.lines
                .lock()
                .unwrap()
                .push((thread::current().id(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

fn logger() -> &'static CapturingLogger {
    static LOGGER: OnceLock<&'static CapturingLogger> = OnceLock::new();
    LOGGER.get_or_init(|| {
        let logger: &'static CapturingLogger = Box::leak(Box::default());
        log::set_logger(logger).unwrap();
        log::set_max_level(LevelFilter::Info);
        logger
    })
}

fn logged_lines() -> Vec<String> {
    let current = thread::current().id();
    logger()
        .lines
        .lock()
        .unwrap()
        .iter()
        .filter(|(thread, _)| *thread == current)
        .map(|(_, line)| line.clone())
        .collect()
}

fn config(abi_path: PathBuf) -> BootstrapConfig {
    BootstrapConfig {
        endpoint: Url::parse("wss://testnet.example/").unwrap(),
        secret: Secret::mnemonic(PHRASE),
        account: AccountConfig::default(),
        abi_path,
        contract_address: Some(ADDR1),
        query_function: DEFAULT_QUERY_FUNCTION.to_string(),
    }
}

#[tokio::test]
async fn test_full_bootstrap() {
    let fixture = fixture(COOKIE_ABI);
    let connector = MockConnector::reachable(Ok(vec![Felt::from(7u32)]));
    let sequencer = BootstrapSequencer::new(connector.clone(), config(fixture.abi_path.clone()));

    let report = sequencer.run().await.unwrap();

    let expected_identity =
        SigningIdentity::derive(&Secret::mnemonic(PHRASE), &AccountConfig::default()).unwrap();
    assert_eq!(report.connection.chain_id(), short_string!("SN_SEPOLIA"));
    assert_eq!(report.identity.address(), expected_identity.address());
    assert_eq!(report.contract.address(), ADDR1);

    let result = report.outcome.result().expect("query should succeed");
    assert_eq!(result.function, "cookiesCount");
    assert_eq!(result.to_string(), "7");

    let calls = connector.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].contract_address, ADDR1);
    assert_eq!(
        calls[0].entry_point_selector,
        get_selector_from_name("cookiesCount").unwrap()
    );
    assert!(calls[0].calldata.is_empty());
}

#[tokio::test]
async fn test_bootstrap_log_sequence() {
    logger();
    let fixture = fixture(r#"{"cookiesCount": {"outputs": [{"type": "core::integer::u32"}]}}"#);
    let connector = MockConnector::reachable(Ok(vec![Felt::from(7u32)]));

    let report = BootstrapSequencer::new(connector, config(fixture.abi_path.clone()))
        .run()
        .await
        .unwrap();

    let lines = logged_lines();
    assert_eq!(lines.len(), 4, "{lines:?}");
    assert!(lines[0].starts_with("Connected to wss://testnet.example/"), "{lines:?}");
    assert!(
        lines[1].starts_with(&format!("Account loaded: {:#x}", report.identity.address())),
        "{lines:?}"
    );
    assert_eq!(lines[2], "Contract loaded: 0xadd1");
    assert_eq!(lines[3], "Cookies count: 7");
}

#[tokio::test]
async fn test_repeated_runs_derive_the_same_account() {
    let fixture = fixture(COOKIE_ABI);

    let first = BootstrapSequencer::new(
        MockConnector::reachable(Ok(vec![Felt::ONE])),
        config(fixture.abi_path.clone()),
    )
    .run()
    .await
    .unwrap();
    let second = BootstrapSequencer::new(
        MockConnector::reachable(Ok(vec![Felt::ONE])),
        config(fixture.abi_path.clone()),
    )
    .run()
    .await
    .unwrap();

    assert_eq!(first.identity.address(), second.identity.address());
    assert_eq!(first.contract.abi(), second.contract.abi());
}

#[tokio::test]
async fn test_unreachable_endpoint_halts_before_identity() {
    let fixture = fixture(COOKIE_ABI);
    let connector = MockConnector::unreachable();
    let mut config = config(fixture.abi_path.clone());
    // A malformed secret would fail step two; the connect failure must win.
    config.secret = Secret::mnemonic("mnemonic_placeholder");

    let err = BootstrapSequencer::new(connector.clone(), config)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Connection { .. }));
    assert_eq!(err.step(), Step::Connect);
    assert!(connector.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_secret_halts_before_contract() {
    let fixture = fixture(COOKIE_ABI);
    let connector = MockConnector::reachable(Ok(vec![Felt::ONE]));
    let mut config = config(fixture.abi_path.clone());
    config.secret = Secret::mnemonic("resist oak face crash bean disorder");

    let err = BootstrapSequencer::new(connector.clone(), config)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidSecret(_)));
    assert_eq!(err.step(), Step::DeriveIdentity);
    assert!(connector.calls().is_empty());
}

#[tokio::test]
async fn test_missing_abi_halts_after_identity() {
    let dir = tempfile::tempdir().unwrap();
    let connector = MockConnector::reachable(Ok(vec![Felt::ONE]));
    let sequencer = BootstrapSequencer::new(
        connector.clone(),
        config(dir.path().join("build/cookie_chain.json")),
    );

    // Steps one and two succeed on their own.
    sequencer.connect().await.unwrap();
    sequencer.derive_identity().unwrap();

    let err = sequencer.run().await.unwrap_err();
    assert!(matches!(err, Error::AbiLoad { .. }));
    assert_eq!(err.step(), Step::LoadContract);
    assert!(connector.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_abi_halts() {
    let fixture = fixture("{ \"cookiesCount\": ");
    let connector = MockConnector::reachable(Ok(vec![Felt::ONE]));

    let err = BootstrapSequencer::new(connector, config(fixture.abi_path.clone()))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::AbiLoad { .. }));
}

#[tokio::test]
async fn test_query_failure_is_downgraded_to_warning() {
    let fixture = fixture(COOKIE_ABI);
    let connector = MockConnector::reachable(Err("ContractNotFound".to_string()));

    let report = BootstrapSequencer::new(connector.clone(), config(fixture.abi_path.clone()))
        .run()
        .await
        .unwrap();

    assert!(matches!(report.outcome, Outcome::SucceededWithWarning(_)));
    let warning = report.outcome.warning().unwrap();
    assert_eq!(warning.step(), Step::Query);
    assert!(warning.to_string().contains("cookiesCount"));
    assert_eq!(report.contract.address(), ADDR1);
    assert_eq!(connector.calls().len(), 1);
}

#[tokio::test]
async fn test_undeclared_query_is_downgraded_without_calling() {
    let fixture = fixture(r#"{"get_owner": {}}"#);
    let connector = MockConnector::reachable(Ok(vec![Felt::ONE]));

    let report = BootstrapSequencer::new(connector.clone(), config(fixture.abi_path.clone()))
        .run()
        .await
        .unwrap();

    assert!(report.outcome.warning().is_some());
    assert!(connector.calls().is_empty());
}

#[tokio::test]
async fn test_caller_address_is_passed_to_account_queries() {
    let fixture = fixture(COOKIE_ABI);
    let connector = MockConnector::reachable(Ok(vec![Felt::from(2u32), Felt::ONE, Felt::TWO]));
    let mut config = config(fixture.abi_path.clone());
    config.query_function = "get_owned_cookies".to_string();

    let report = BootstrapSequencer::new(connector.clone(), config)
        .run()
        .await
        .unwrap();

    assert_eq!(report.outcome.result().unwrap().to_string(), "[2, 1, 2]");
    assert_eq!(connector.calls()[0].calldata, vec![report.identity.address()]);
}

#[tokio::test]
async fn test_external_function_is_not_queried() {
    let fixture = fixture(COOKIE_ABI);
    let connector = MockConnector::reachable(Ok(vec![]));
    let mut config = config(fixture.abi_path.clone());
    config.query_function = "register_cookie".to_string();

    let report = BootstrapSequencer::new(connector.clone(), config)
        .run()
        .await
        .unwrap();

    assert!(report.outcome.warning().is_some());
    assert!(connector.calls().is_empty());
}

#[tokio::test]
async fn test_contract_address_resolved_from_artifact_networks() {
    let artifact = serde_json::json!({
        "abi": [{
            "type": "function",
            "name": "cookiesCount",
            "inputs": [],
            "outputs": [{ "type": "core::integer::u32" }],
            "state_mutability": "view"
        }],
        "networks": { "SN_SEPOLIA": { "address": "0xc00c1e" } }
    });
    let fixture = fixture(&artifact.to_string());
    let mut config = config(fixture.abi_path.clone());
    config.contract_address = None;

    let report = BootstrapSequencer::new(MockConnector::reachable(Ok(vec![Felt::ONE])), config.clone())
        .run()
        .await
        .unwrap();
    assert_eq!(report.contract.address(), Felt::from(0xc00c1eu32));

    let mut connector = MockConnector::reachable(Ok(vec![Felt::ONE]));
    connector.connection.chain_id = short_string!("SN_MAIN");
    let err = BootstrapSequencer::new(connector, config)
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ContractNotDeployed(ref chain) if chain == "SN_MAIN"));
}
