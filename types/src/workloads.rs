use crate::error::ModelError;
use jr_codec::{serde_utils, to_canonical_bytes, CodecError};
use jr_common::{
    CoreIndex, Ed25519SecretKey, Ed25519Signature, EpochIndex, GuarantorId, Hash32, ServiceId,
    SlotIndex, UnsignedGas, WorkDigest, MAX_CORE_INDEX,
};
use jr_crypto::{hash, sign_message, CryptoError, Sha256};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkReportError {
    #[error("Crypto error: {0}")]
    CryptoError(#[from] CryptoError),
    #[error("Codec error: {0}")]
    CodecError(#[from] CodecError),
}

/// Unit of program execution inside a work package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Caller-chosen identifier, unique within the package.
    pub id: String,
    /// Hash of the program the item runs.
    #[serde(with = "serde_utils::hex_array")]
    pub program_hash: Hash32,
    /// Opaque input blob handed to the execution engine.
    pub input_data: String,
    /// Gas ceiling for the item's accumulation.
    pub gas_limit: UnsignedGas,
}

impl WorkItem {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.id.is_empty() {
            return Err(ModelError::EmptyField("work_item.id"));
        }
        if self.gas_limit == 0 {
            return Err(ModelError::ZeroGasLimit(self.id.clone()));
        }
        Ok(())
    }
}

/// Host-side details of the service authorizing a work package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDetails {
    pub host: String,
    pub url: ServiceId,
    pub function: String,
}

/// Atomic intent: an authorization plus an ordered sequence of work items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPackage {
    pub auth_token: String,
    pub auth_service: ServiceDetails,
    pub context: String,
    pub work_items: Vec<WorkItem>,
}

impl WorkPackage {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.auth_token.is_empty() {
            return Err(ModelError::EmptyField("work_package.auth_token"));
        }
        if self.context.is_empty() {
            return Err(ModelError::EmptyField("work_package.context"));
        }
        if self.work_items.is_empty() {
            return Err(ModelError::NoWorkItems);
        }
        for item in &self.work_items {
            item.validate()?;
        }
        Ok(())
    }
}

/// Context of the chain at the point the guarantor refined the work package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementContext {
    #[serde(with = "serde_utils::hex_array")]
    pub anchor_block_root: Hash32,
    pub anchor_block_number: SlotIndex,
    #[serde(with = "serde_utils::hex_array")]
    pub beefy_mmr_root: Hash32,
    pub current_slot: SlotIndex,
    pub current_epoch: EpochIndex,
    pub current_guarantors: Vec<GuarantorId>,
    pub previous_guarantors: Vec<GuarantorId>,
}

impl RefinementContext {
    /// Size of the two-epoch guarantor roster.
    pub fn guarantor_count(&self) -> usize {
        self.current_guarantors.len() + self.previous_guarantors.len()
    }

    pub fn is_current_guarantor(&self, id: &GuarantorId) -> bool {
        self.current_guarantors.contains(id)
    }

    pub fn is_previous_guarantor(&self, id: &GuarantorId) -> bool {
        self.previous_guarantors.contains(id)
    }
}

/// Erasure-coding descriptor for a report's availability data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySpec {
    pub total_fragments: u16,
    pub data_fragments: u16,
    #[serde(with = "serde_utils::hex_seq")]
    pub fragment_hashes: Vec<Hash32>,
}

impl AvailabilitySpec {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.data_fragments == 0 || self.data_fragments > self.total_fragments {
            return Err(ModelError::FragmentCountOutOfRange {
                data: self.data_fragments,
                total: self.total_fragments,
            });
        }
        if self.fragment_hashes.len() != self.total_fragments as usize {
            return Err(ModelError::FragmentHashesMismatch {
                hashes: self.fragment_hashes.len(),
                total: self.total_fragments,
            });
        }
        Ok(())
    }
}

/// A guarantor's post-refinement artifact: the work package, the execution
/// output, the availability descriptor and the guarantor's endorsement.
///
/// The endorsement pair (`guarantor_signature`, `guarantor_public_key`) is
/// excluded from the signable form, so every guarantor endorsing the same
/// work lands on the same digest and the pending-bucket merge can aggregate
/// their signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkReport {
    pub work_package: WorkPackage,
    pub refinement_context: RefinementContext,
    pub pvm_output: String,
    pub gas_used: UnsignedGas,
    pub availability_spec: Option<AvailabilitySpec>,
    #[serde(with = "serde_utils::hex_array")]
    pub guarantor_signature: Ed25519Signature,
    pub guarantor_public_key: GuarantorId,
    pub core_index: CoreIndex,
    pub slot: SlotIndex,
    pub dependencies: Vec<WorkDigest>,
}

impl Default for WorkReport {
    fn default() -> Self {
        Self {
            work_package: WorkPackage::default(),
            refinement_context: RefinementContext::default(),
            pvm_output: String::new(),
            gas_used: 0,
            availability_spec: None,
            guarantor_signature: [0u8; 64],
            guarantor_public_key: GuarantorId::default(),
            core_index: 0,
            slot: 0,
            dependencies: Vec::new(),
        }
    }
}

/// The signable view of a report: every field except the endorsement pair,
/// in canonical declaration order.
#[derive(Serialize)]
struct SignableWorkReport<'a> {
    work_package: &'a WorkPackage,
    refinement_context: &'a RefinementContext,
    pvm_output: &'a str,
    gas_used: UnsignedGas,
    availability_spec: &'a Option<AvailabilitySpec>,
    core_index: CoreIndex,
    slot: SlotIndex,
    dependencies: &'a [WorkDigest],
}

impl WorkReport {
    pub fn validate(&self) -> Result<(), ModelError> {
        self.work_package.validate()?;
        if let Some(spec) = &self.availability_spec {
            spec.validate()?;
        }
        if self.core_index > MAX_CORE_INDEX {
            return Err(ModelError::CoreIndexOutOfRange(self.core_index));
        }
        Ok(())
    }

    /// Canonical bytes of the signable form.
    pub fn signable_bytes(&self) -> Result<Vec<u8>, WorkReportError> {
        let signable = SignableWorkReport {
            work_package: &self.work_package,
            refinement_context: &self.refinement_context,
            pvm_output: &self.pvm_output,
            gas_used: self.gas_used,
            availability_spec: &self.availability_spec,
            core_index: self.core_index,
            slot: self.slot,
            dependencies: &self.dependencies,
        };
        Ok(to_canonical_bytes(&signable)?)
    }

    /// SHA-256 over the signable form: the report's identity in every bucket.
    pub fn digest(&self) -> Result<WorkDigest, WorkReportError> {
        Ok(WorkDigest(hash::<Sha256>(&self.signable_bytes()?)?))
    }

    /// Signs the report in place, stamping the endorsement pair.
    pub fn sign_with(
        &mut self,
        secret_key: &Ed25519SecretKey,
        public_key: GuarantorId,
    ) -> Result<(), WorkReportError> {
        let message = self.signable_bytes()?;
        self.guarantor_signature = sign_message(&message, secret_key);
        self.guarantor_public_key = public_key;
        Ok(())
    }
}

impl Display for WorkReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WorkReport {{ core: {}, slot: {}, items: {}, guarantor: {}, deps: {} }}",
            self.core_index,
            self.slot,
            self.work_package.work_items.len(),
            self.guarantor_public_key,
            self.dependencies.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::SigningKey;
    use jr_codec::from_canonical_slice;
    use jr_crypto::verify_signature;
    use rand::rngs::OsRng;

    fn sample_report() -> WorkReport {
        WorkReport {
            work_package: WorkPackage {
                auth_token: "token".into(),
                auth_service: ServiceDetails {
                    host: "host".into(),
                    url: "svc://transfer".into(),
                    function: "run".into(),
                },
                context: "ctx".into(),
                work_items: vec![WorkItem {
                    id: "item-0".into(),
                    program_hash: [1u8; 32],
                    input_data: "noop".into(),
                    gas_limit: 50,
                }],
            },
            refinement_context: RefinementContext {
                anchor_block_root: [2u8; 32],
                anchor_block_number: 90,
                beefy_mmr_root: [3u8; 32],
                current_slot: 100,
                current_epoch: 1,
                current_guarantors: vec![GuarantorId([9u8; 32])],
                previous_guarantors: vec![],
            },
            pvm_output: "ok".into(),
            gas_used: 10,
            availability_spec: None,
            guarantor_signature: [0u8; 64],
            guarantor_public_key: GuarantorId([9u8; 32]),
            core_index: 0,
            slot: 100,
            dependencies: vec![],
        }
    }

    #[test]
    fn digest_ignores_endorsement_pair() {
        let report = sample_report();
        let digest = report.digest().unwrap();

        let mut endorsed = report.clone();
        endorsed.guarantor_signature = [0xff; 64];
        endorsed.guarantor_public_key = GuarantorId([0xee; 32]);
        assert_eq!(endorsed.digest().unwrap(), digest);
    }

    #[test]
    fn digest_tracks_report_content() {
        let report = sample_report();
        let mut altered = report.clone();
        altered.gas_used += 1;
        assert_ne!(altered.digest().unwrap(), report.digest().unwrap());
    }

    #[test]
    fn sign_with_produces_verifiable_endorsement() {
        let mut rng = OsRng;
        let key = SigningKey::generate(&mut rng);
        let id = GuarantorId(key.verifying_key().to_bytes());

        let mut report = sample_report();
        report.sign_with(&key.to_bytes(), id).unwrap();

        let message = report.signable_bytes().unwrap();
        assert!(verify_signature(
            &message,
            report.guarantor_public_key.as_bytes(),
            &report.guarantor_signature
        ));
    }

    #[test]
    fn canonical_round_trip() {
        let report = sample_report();
        let bytes = jr_codec::to_canonical_bytes(&report).unwrap();
        let parsed: WorkReport = from_canonical_slice(&bytes).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn validation_rejects_empty_package() {
        let mut report = sample_report();
        report.work_package.work_items.clear();
        assert_eq!(report.validate(), Err(ModelError::NoWorkItems));
    }

    #[test]
    fn validation_rejects_zero_gas_item() {
        let mut report = sample_report();
        report.work_package.work_items[0].gas_limit = 0;
        assert_eq!(
            report.validate(),
            Err(ModelError::ZeroGasLimit("item-0".into()))
        );
    }

    #[test]
    fn validation_checks_availability_spec() {
        let mut report = sample_report();
        report.availability_spec = Some(AvailabilitySpec {
            total_fragments: 3,
            data_fragments: 2,
            fragment_hashes: vec![[0u8; 32]; 2],
        });
        assert_eq!(
            report.validate(),
            Err(ModelError::FragmentHashesMismatch { hashes: 2, total: 3 })
        );
    }

    #[test]
    fn validation_rejects_out_of_range_core() {
        let mut report = sample_report();
        report.core_index = MAX_CORE_INDEX + 1;
        assert_eq!(
            report.validate(),
            Err(ModelError::CoreIndexOutOfRange(MAX_CORE_INDEX + 1))
        );
    }
}
