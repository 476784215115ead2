use crate::error::LottoError;
use crate::CipherId;
use ink::prelude::vec::Vec;
use openbrush::traits::{AccountId, Timestamp};

pub type Ciphertext = Vec<u8>;
pub type CipherProof = Vec<u8>;

/// Validity window of a decrypt grant, in milliseconds.
/// A grant expires after this window and must be refreshed by the next
/// mutation of the value the principal should still be able to read.
pub const GRANT_VALIDITY: Timestamp = 7 * 24 * 60 * 60 * 1000;

/// Handle on an encrypted integer living in the cipher engine.
/// The plaintext is never visible to the contract logic.
#[derive(Debug, Eq, PartialEq, Copy, Clone, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct EncryptedNumber {
    pub handle: CipherId,
}

/// Handle on an encrypted boolean, produced by `cipher_eq`.
#[derive(Debug, Eq, PartialEq, Copy, Clone, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct EncryptedBool {
    pub handle: CipherId,
}

/// Restricted algebra on encrypted values, provided by an external engine.
/// The lottery is written entirely against this trait and stays oblivious
/// to the underlying cryptographic scheme.
pub trait CipherEngine {
    /// Import an externally encrypted value together with its validity proof.
    /// The engine verifies the proof (range and origin) and rejects the
    /// import with `InvalidProof` when it does not validate.
    fn import_external(
        &mut self,
        ciphertext: &Ciphertext,
        proof: &CipherProof,
    ) -> Result<EncryptedNumber, LottoError>;

    /// Trivially encrypt a public value.
    fn encrypt_plaintext(&mut self, value: u64) -> EncryptedNumber;

    /// Encrypted-domain equality, the result stays encrypted.
    fn cipher_eq(&mut self, a: EncryptedNumber, b: EncryptedNumber) -> EncryptedBool;

    /// Encrypted-domain conditional select.
    fn cipher_select(
        &mut self,
        cond: EncryptedBool,
        if_true: EncryptedNumber,
        if_false: EncryptedNumber,
    ) -> EncryptedNumber;

    /// Encrypted-domain addition.
    fn cipher_add(&mut self, a: EncryptedNumber, b: EncryptedNumber) -> EncryptedNumber;

    /// Allow `principal` to decrypt `value` off-chain for `GRANT_VALIDITY`.
    /// Expiry is enforced by the engine's decrypt path, not by the lottery.
    fn grant_decrypt(&mut self, value: EncryptedNumber, principal: AccountId);
}
