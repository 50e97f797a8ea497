//! Cross-backend parity run: one seed, N independent pipelines, one verdict.

use std::any::Any;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::Backend;
use crate::defaults::Defaults;
use crate::errors::{
    BackendError, BackendFailure, ConfigurationError, ImpossibleReason, ParityError,
};
use crate::seed::SeedMaterial;
use crate::signer::SignerSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Match,
    Mismatch,
    PartialFailure,
}

impl Verdict {
    /// Only a full match counts as success.
    pub fn is_success(self) -> bool {
        self == Verdict::Match
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Match => "MATCH",
            Verdict::Mismatch => "MISMATCH",
            Verdict::PartialFailure => "PARTIAL_FAILURE",
        })
    }
}

/// What one backend produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BackendOutcome {
    #[serde(rename_all = "camelCase")]
    Ok {
        public_key_hex: String,
        address: String,
    },
    Failed {
        kind: String,
        message: String,
    },
}

impl BackendOutcome {
    fn from_result(result: &Result<(Vec<u8>, String), BackendError>) -> Self {
        match result {
            Ok((public_key, address)) => BackendOutcome::Ok {
                public_key_hex: hex::encode(public_key),
                address: address.clone(),
            },
            Err(e) => BackendOutcome::Failed {
                kind: e.kind().to_string(),
                message: e.to_string(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, BackendOutcome::Ok { .. })
    }
}

/// One field on which succeeding backends disagree, with every backend's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub field: String,
    pub values: BTreeMap<String, String>,
}

/// Result of one run. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParityReport {
    run_id: Uuid,
    generated_at: String,
    chain_id: String,
    signer_spec: SignerSpec,
    backend_results: BTreeMap<String, BackendOutcome>,
    verdict: Verdict,
    mismatches: Vec<FieldDiff>,
}

impl ParityReport {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// RFC 3339, UTC.
    pub fn generated_at(&self) -> &str {
        &self.generated_at
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn signer_spec(&self) -> &SignerSpec {
        &self.signer_spec
    }

    pub fn backend_results(&self) -> &BTreeMap<String, BackendOutcome> {
        &self.backend_results
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn mismatches(&self) -> &[FieldDiff] {
        &self.mismatches
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    PreconditionsValidated,
    BackendsDispatched,
    ResultsCollected,
    Reported,
    Failed,
}

impl RunState {
    pub fn can_advance_to(self, next: RunState) -> bool {
        use RunState::*;
        matches!(
            (self, next),
            (NotStarted, PreconditionsValidated)
                | (NotStarted, Failed)
                | (PreconditionsValidated, BackendsDispatched)
                | (BackendsDispatched, ResultsCollected)
                | (ResultsCollected, Reported)
                | (ResultsCollected, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Reported | RunState::Failed)
    }
}

struct RunTracker {
    run_id: Uuid,
    state: RunState,
}

impl RunTracker {
    fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            state: RunState::NotStarted,
        }
    }

    fn advance(&mut self, next: RunState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal run transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(run_id = %self.run_id, from = ?self.state, to = ?next, "run state");
        self.state = next;
    }
}

/// Runs every registered backend over the same seed and compares the results.
pub struct ParityOrchestrator {
    chain_id: String,
    backends: Vec<Arc<dyn Backend>>,
}

impl ParityOrchestrator {
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            backends: Vec::new(),
        }
    }

    pub fn with_backend<B: Backend + 'static>(self, backend: B) -> Self {
        self.with_shared_backend(Arc::new(backend))
    }

    pub fn with_shared_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backends.push(backend);
        self
    }

    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    fn check_preconditions(
        &self,
        seed: &SeedMaterial,
        spec: &SignerSpec,
    ) -> Result<(), ConfigurationError> {
        if seed.is_empty() {
            return Err(ConfigurationError::EmptySeed);
        }
        spec.validate()?;
        if self.backends.len() < Defaults::MIN_BACKENDS {
            return Err(ConfigurationError::TooFewBackends {
                required: Defaults::MIN_BACKENDS,
                actual: self.backends.len(),
            });
        }
        let mut seen = HashSet::new();
        for name in self.backend_names() {
            if !seen.insert(name) {
                return Err(ConfigurationError::DuplicateBackend(name.to_string()));
            }
        }
        Ok(())
    }

    /// Consumes the seed; every copy handed to a backend is wiped when its
    /// task ends, the original when the run returns.
    pub async fn run(
        &self,
        seed: SeedMaterial,
        spec: &SignerSpec,
    ) -> Result<ParityReport, ParityError> {
        let run_id = Uuid::new_v4();
        let mut tracker = RunTracker::new(run_id);
        info!(
            run_id = %run_id,
            chain = %self.chain_id,
            backends = self.backends.len(),
            "parity run started"
        );

        if let Err(e) = self.check_preconditions(&seed, spec) {
            tracker.advance(RunState::Failed);
            warn!(run_id = %run_id, error = %e, "preconditions failed");
            return Err(e.into());
        }
        tracker.advance(RunState::PreconditionsValidated);

        let tasks = self.backends.iter().map(|backend| {
            let backend = Arc::clone(backend);
            let seed = seed.clone();
            let spec = spec.clone();
            tokio::task::spawn_blocking(move || {
                let public_key = backend.derive_public_key(&seed, &spec)?;
                let address = backend.derive_address(&seed, &spec)?;
                Ok::<_, BackendError>((public_key, address))
            })
        });
        let handles: Vec<_> = tasks.collect();
        tracker.advance(RunState::BackendsDispatched);

        // barrier: nothing is decided until every backend has answered
        let joined = join_all(handles).await;
        drop(seed);
        tracker.advance(RunState::ResultsCollected);

        let results: Vec<(String, Result<(Vec<u8>, String), BackendError>)> = self
            .backends
            .iter()
            .zip(joined)
            .map(|(backend, joined)| {
                let result = joined.unwrap_or_else(|e| {
                    let message = if e.is_panic() {
                        panic_message(e.into_panic())
                    } else {
                        e.to_string()
                    };
                    Err(BackendError::Panicked(message))
                });
                (backend.name().to_string(), result)
            })
            .collect();

        let mut failures = Vec::new();
        for (name, result) in &results {
            if let Err(error) = result {
                warn!(run_id = %run_id, backend = %name, kind = error.kind(), error = %error, "backend failed");
                failures.push(BackendFailure {
                    backend: name.clone(),
                    error: error.clone(),
                });
            } else {
                debug!(run_id = %run_id, backend = %name, "backend finished");
            }
        }

        if failures.len() == results.len() {
            tracker.advance(RunState::Failed);
            warn!(run_id = %run_id, "every backend failed");
            return Err(ParityError::ComparisonImpossible(
                ImpossibleReason::AllBackendsFailed(failures),
            ));
        }

        let mismatches = diff_successes(&results);
        let verdict = if !mismatches.is_empty() {
            Verdict::Mismatch
        } else if !failures.is_empty() {
            Verdict::PartialFailure
        } else {
            Verdict::Match
        };

        let report = ParityReport {
            run_id,
            generated_at: now_rfc3339(),
            chain_id: self.chain_id.clone(),
            signer_spec: spec.clone(),
            backend_results: results
                .iter()
                .map(|(name, result)| (name.clone(), BackendOutcome::from_result(result)))
                .collect(),
            verdict,
            mismatches,
        };
        tracker.advance(RunState::Reported);
        info!(run_id = %run_id, verdict = %verdict, "parity run finished");
        Ok(report)
    }
}

fn diff_successes(results: &[(String, Result<(Vec<u8>, String), BackendError>)]) -> Vec<FieldDiff> {
    let ok: Vec<(&str, &[u8], &str)> = results
        .iter()
        .filter_map(|(name, r)| {
            r.as_ref()
                .ok()
                .map(|(pk, addr)| (name.as_str(), pk.as_slice(), addr.as_str()))
        })
        .collect();

    let mut diffs = Vec::new();
    let Some(&(_, first_pk, first_addr)) = ok.first() else {
        return diffs;
    };
    if ok.iter().any(|(_, pk, _)| *pk != first_pk) {
        diffs.push(FieldDiff {
            field: "publicKey".into(),
            values: ok
                .iter()
                .map(|(name, pk, _)| (name.to_string(), hex::encode(pk)))
                .collect(),
        });
    }
    if ok.iter().any(|(_, _, addr)| *addr != first_addr) {
        diffs.push(FieldDiff {
            field: "address".into(),
            values: ok
                .iter()
                .map(|(name, _, addr)| (name.to_string(), addr.to_string()))
                .collect(),
        });
    }
    diffs
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn now_rfc3339() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::address::{
        AddressScheme, ChainParams, RawAddress, RawAddressOracle, StateInitOracle, WalletVersion,
    };
    use crate::backend::{NativeBackend, ReferenceBackend};
    use crate::errors::{DerivationError, EncodingError};
    use crate::key;
    use crate::signer::HashFunction;

    const PHRASE: &str =
        "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima";

    fn ton() -> AddressScheme {
        AddressScheme::Ton(ChainParams::default())
    }

    fn seed() -> SeedMaterial {
        SeedMaterial::from_phrase(PHRASE)
    }

    /// Native pipeline that hashes the seed with a different function.
    struct RehashingBackend {
        inner: NativeBackend,
        hash: HashFunction,
    }

    impl RehashingBackend {
        fn new(name: &str, hash: HashFunction) -> Self {
            Self {
                inner: NativeBackend::with_default_oracle(name, ton()),
                hash,
            }
        }

        fn spec(&self, spec: &SignerSpec) -> SignerSpec {
            SignerSpec {
                hash_function: self.hash,
                ..spec.clone()
            }
        }
    }

    impl Backend for RehashingBackend {
        fn name(&self) -> &str {
            self.inner.name()
        }

        fn derive_public_key(
            &self,
            seed: &SeedMaterial,
            spec: &SignerSpec,
        ) -> Result<Vec<u8>, BackendError> {
            self.inner.derive_public_key(seed, &self.spec(spec))
        }

        fn derive_address(
            &self,
            seed: &SeedMaterial,
            spec: &SignerSpec,
        ) -> Result<String, BackendError> {
            self.inner.derive_address(seed, &self.spec(spec))
        }
    }

    /// Fixed answers, optional delay, counts invocations.
    struct Scripted {
        name: String,
        answer: Result<(Vec<u8>, String), BackendError>,
        delay: Duration,
        calls: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn ok(name: &str, pk: &[u8], addr: &str) -> Self {
            Self {
                name: name.into(),
                answer: Ok((pk.to_vec(), addr.into())),
                delay: Duration::ZERO,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing(name: &str, error: BackendError) -> Self {
            Self {
                answer: Err(error),
                ..Self::ok(name, &[], "")
            }
        }

        fn slow(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    impl Backend for Scripted {
        fn name(&self) -> &str {
            &self.name
        }

        fn derive_public_key(&self, _: &SeedMaterial, _: &SignerSpec) -> Result<Vec<u8>, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(self.delay);
            self.answer.clone().map(|(pk, _)| pk)
        }

        fn derive_address(&self, _: &SeedMaterial, _: &SignerSpec) -> Result<String, BackendError> {
            self.answer.clone().map(|(_, addr)| addr)
        }
    }

    struct Panicking;

    impl Backend for Panicking {
        fn name(&self) -> &str {
            "panicking"
        }

        fn derive_public_key(&self, _: &SeedMaterial, _: &SignerSpec) -> Result<Vec<u8>, BackendError> {
            panic!("curve table corrupted");
        }

        fn derive_address(&self, _: &SeedMaterial, _: &SignerSpec) -> Result<String, BackendError> {
            unreachable!()
        }
    }

    fn native_and_reference(chain: &str, scheme: AddressScheme) -> ParityOrchestrator {
        ParityOrchestrator::new(chain)
            .with_backend(NativeBackend::with_default_oracle("native", scheme))
            .with_backend(ReferenceBackend::new("reference", scheme))
    }

    #[tokio::test]
    async fn native_and_reference_match_on_ton() {
        let report = native_and_reference("ton", ton())
            .run(seed(), &SignerSpec::ton())
            .await
            .unwrap();
        assert_eq!(report.verdict(), Verdict::Match);
        assert!(report.mismatches().is_empty());
        let expected = BackendOutcome::Ok {
            public_key_hex: "a5198ed72111b3fead3e6033e9cd50070e1ec782b8521e6ee877976f230b8d6c"
                .into(),
            address: "EQAicH5crLesqqrPmBSIncqc8KiekSs4nrBO0YciA8x2_gR0".into(),
        };
        assert_eq!(report.backend_results()["native"], expected);
        assert_eq!(report.backend_results()["reference"], expected);
        assert_eq!(report.chain_id(), "ton");
    }

    /// Oracle that ignores the requested version and always uses v3R2 code.
    struct StaleCodeOracle(StateInitOracle);

    impl RawAddressOracle for StaleCodeOracle {
        fn raw_address(
            &self,
            public_key: &[u8],
            _version: WalletVersion,
            workchain: i8,
        ) -> Result<RawAddress, EncodingError> {
            self.0.raw_address(public_key, WalletVersion::V3R2, workchain)
        }
    }

    #[tokio::test]
    async fn broken_native_oracle_is_caught_by_reference() {
        let native = NativeBackend::new(
            "native",
            ton(),
            Arc::new(StaleCodeOracle(StateInitOracle::new())),
        );
        let report = ParityOrchestrator::new("ton")
            .with_backend(native)
            .with_backend(ReferenceBackend::new("reference", ton()))
            .run(seed(), &SignerSpec::ton())
            .await
            .unwrap();
        assert_eq!(report.verdict(), Verdict::Mismatch);
        let fields: Vec<&str> = report.mismatches().iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, ["address"]);
    }

    #[tokio::test]
    async fn native_and_reference_match_on_evm() {
        let report = native_and_reference("ethereum", AddressScheme::Evm)
            .run(seed(), &SignerSpec::ethereum())
            .await
            .unwrap();
        assert_eq!(report.verdict(), Verdict::Match);
        match &report.backend_results()["native"] {
            BackendOutcome::Ok { public_key_hex, address } => {
                assert_eq!(public_key_hex.len(), 66);
                assert!(address.starts_with("0x") && address.len() == 42);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn different_hash_is_a_mismatch() {
        let report = ParityOrchestrator::new("ton")
            .with_backend(NativeBackend::with_default_oracle("sha256", ton()))
            .with_backend(RehashingBackend::new("sha512", HashFunction::Sha512))
            .run(seed(), &SignerSpec::ton())
            .await
            .unwrap();
        assert_eq!(report.verdict(), Verdict::Mismatch);
        let fields: Vec<&str> = report.mismatches().iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, ["publicKey", "address"]);
        let pks = &report.mismatches()[0].values;
        assert_eq!(pks.len(), 2);
        assert_ne!(pks["sha256"], pks["sha512"]);
    }

    #[tokio::test]
    async fn one_failure_is_partial() {
        let native = NativeBackend::with_default_oracle("native", ton());
        let pk = native.derive_public_key(&seed(), &SignerSpec::ton()).unwrap();
        let addr = native.derive_address(&seed(), &SignerSpec::ton()).unwrap();
        let report = ParityOrchestrator::new("ton")
            .with_backend(native)
            .with_backend(Scripted::ok("agreeing", &pk, &addr))
            .with_backend(Scripted::failing(
                "broken",
                BackendError::Derivation(DerivationError::InsufficientEntropy {
                    required: 32,
                    actual: 20,
                }),
            ))
            .run(seed(), &SignerSpec::ton())
            .await
            .unwrap();
        assert_eq!(report.verdict(), Verdict::PartialFailure);
        assert!(report.mismatches().is_empty());
        match &report.backend_results()["broken"] {
            BackendOutcome::Failed { kind, .. } => assert_eq!(kind, "derivation"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn disagreement_outranks_failure() {
        let report = ParityOrchestrator::new("x")
            .with_backend(Scripted::ok("a", &[1; 32], "A"))
            .with_backend(Scripted::ok("b", &[2; 32], "A"))
            .with_backend(Scripted::failing("c", BackendError::Panicked("boom".into())))
            .run(seed(), &SignerSpec::ton())
            .await
            .unwrap();
        assert_eq!(report.verdict(), Verdict::Mismatch);
        assert_eq!(report.mismatches().len(), 1);
        assert_eq!(report.mismatches()[0].field, "publicKey");
    }

    #[tokio::test]
    async fn empty_seed_runs_nothing() {
        let a = Scripted::ok("a", &[1; 32], "A");
        let b = Scripted::ok("b", &[1; 32], "A");
        let calls = [Arc::clone(&a.calls), Arc::clone(&b.calls)];
        let err = ParityOrchestrator::new("ton")
            .with_backend(a)
            .with_backend(b)
            .run(SeedMaterial::from_bytes(Vec::new()), &SignerSpec::ton())
            .await
            .unwrap_err();
        assert_eq!(err.configuration_error(), Some(&ConfigurationError::EmptySeed));
        assert!(calls.iter().all(|c| c.load(Ordering::SeqCst) == 0));
    }

    #[tokio::test]
    async fn invalid_spec_and_backend_set_rejected() {
        let bad = SignerSpec {
            coin_type: "ton".into(),
            ..SignerSpec::ton()
        };
        let err = native_and_reference("ton", ton()).run(seed(), &bad).await.unwrap_err();
        assert!(matches!(
            err.configuration_error(),
            Some(ConfigurationError::InvalidCoinType(_))
        ));

        let err = ParityOrchestrator::new("ton")
            .with_backend(Scripted::ok("only", &[1; 32], "A"))
            .run(seed(), &SignerSpec::ton())
            .await
            .unwrap_err();
        assert_eq!(
            err.configuration_error(),
            Some(&ConfigurationError::TooFewBackends { required: 2, actual: 1 })
        );

        let err = ParityOrchestrator::new("ton")
            .with_backend(Scripted::ok("twin", &[1; 32], "A"))
            .with_backend(Scripted::ok("twin", &[1; 32], "A"))
            .run(seed(), &SignerSpec::ton())
            .await
            .unwrap_err();
        assert_eq!(
            err.configuration_error(),
            Some(&ConfigurationError::DuplicateBackend("twin".into()))
        );
    }

    #[tokio::test]
    async fn all_failed_is_impossible() {
        let err = ParityOrchestrator::new("ton")
            .with_backend(Scripted::failing("a", BackendError::Panicked("x".into())))
            .with_backend(Panicking)
            .run(seed(), &SignerSpec::ton())
            .await
            .unwrap_err();
        match err {
            ParityError::ComparisonImpossible(ImpossibleReason::AllBackendsFailed(failures)) => {
                let names: Vec<&str> = failures.iter().map(|f| f.backend.as_str()).collect();
                assert_eq!(names, ["a", "panicking"]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn panic_is_captured_per_backend() {
        let report = ParityOrchestrator::new("ton")
            .with_backend(Scripted::ok("a", &[1; 32], "A"))
            .with_backend(Panicking)
            .run(seed(), &SignerSpec::ton())
            .await
            .unwrap();
        assert_eq!(report.verdict(), Verdict::PartialFailure);
        assert_eq!(
            report.backend_results()["panicking"],
            BackendOutcome::Failed {
                kind: "panicked".into(),
                message: "backend panicked: curve table corrupted".into(),
            }
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn slow_correct_backend_is_waited_for() {
        let report = ParityOrchestrator::new("x")
            .with_backend(Scripted::ok("fast-wrong", &[0; 32], "WRONG"))
            .with_backend(Scripted::ok("slow-right", &[7; 32], "RIGHT").slow(Duration::from_millis(150)))
            .run(seed(), &SignerSpec::ton())
            .await
            .unwrap();
        assert_eq!(report.verdict(), Verdict::Mismatch);
        assert!(report.backend_results()["slow-right"].is_ok());
    }

    #[tokio::test]
    async fn report_json_shape_and_no_private_key() {
        let report = native_and_reference("ton", ton())
            .run(seed(), &SignerSpec::ton())
            .await
            .unwrap();
        let json = report.to_json_pretty().unwrap();

        let kp = key::derive(&seed(), &SignerSpec::ton()).unwrap();
        assert!(!json.contains(&hex::encode(kp.private_key())));
        assert!(!json.to_lowercase().contains("private"));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["verdict"], "MATCH");
        assert_eq!(value["signerSpec"]["coinType"], "607");
        assert_eq!(value["backendResults"]["native"]["status"], "ok");
        assert!(value["backendResults"]["native"]["publicKeyHex"].is_string());
        assert!(value["runId"].is_string());
        assert!(report.generated_at().ends_with('Z'));
    }

    #[test]
    fn run_state_transitions() {
        use RunState::*;
        assert!(NotStarted.can_advance_to(PreconditionsValidated));
        assert!(NotStarted.can_advance_to(Failed));
        assert!(ResultsCollected.can_advance_to(Failed));
        assert!(!BackendsDispatched.can_advance_to(Failed));
        assert!(!Reported.can_advance_to(NotStarted));
        assert!(!ResultsCollected.can_advance_to(BackendsDispatched));
        assert!(Reported.is_terminal() && Failed.is_terminal());
        assert!(!ResultsCollected.is_terminal());
    }

    #[test]
    fn verdict_serializes_screaming() {
        assert_eq!(
            serde_json::to_string(&Verdict::PartialFailure).unwrap(),
            "\"PARTIAL_FAILURE\""
        );
        assert_eq!(Verdict::Mismatch.to_string(), "MISMATCH");
        assert!(Verdict::Match.is_success());
        assert!(!Verdict::PartialFailure.is_success());
    }
}
