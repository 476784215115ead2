use crate::cipher::{CipherProof, Ciphertext};
use crate::CipherId;
use ink::storage::Mapping;
use openbrush::traits::{AccountId, Timestamp};

/// Mock transport used by the unit tests: the "ciphertext" is the little
/// endian plaintext and the proof is its Blake2x256 hash.
pub fn mock_cipher(value: u64) -> (Ciphertext, CipherProof) {
    use ink::env::hash;

    let ciphertext = value.to_le_bytes().to_vec();
    let mut proof = <hash::Blake2x256 as hash::HashOutput>::Type::default();
    ink::env::hash_bytes::<hash::Blake2x256>(&ciphertext, &mut proof);
    (ciphertext, proof.to_vec())
}

/// Transparent stand-in for the external cipher engine: a handle table
/// of plaintexts plus the time-bounded decrypt grants.
#[derive(Default, Debug)]
#[openbrush::storage_item]
pub struct MockCipherData {
    next_cipher_id: CipherId,
    values: Mapping<CipherId, u64>,
    grants: Mapping<(CipherId, AccountId), Timestamp>,
}

#[openbrush::contract]
pub mod lotto_contract {
    use crate::cipher::{
        CipherEngine, CipherProof, Ciphertext, EncryptedBool, EncryptedNumber, GRANT_VALIDITY,
    };
    use ink::codegen::Env;

    use crate::draws::{self, drawregistry_external, DrawRegistry, MAX_NUMBER, MIN_NUMBER};
    use crate::error::{LottoError, LottoError::*};
    use crate::lottery::Lottery;
    use crate::scores::{self, scoreledger_external, ScoreLedger};
    use crate::test_contract::MockCipherData;
    use crate::tickets::{self, ticketledger_external, TicketLedger};
    use crate::CipherId;
    use openbrush::traits::Storage;

    #[ink(storage)]
    #[derive(Default, Storage)]
    pub struct Contract {
        #[storage_field]
        draws: draws::Data,
        #[storage_field]
        tickets: tickets::Data,
        #[storage_field]
        scores: scores::Data,
        #[storage_field]
        cipher: MockCipherData,
    }

    impl DrawRegistry for Contract {}
    impl TicketLedger for Contract {}
    impl ScoreLedger for Contract {}
    impl Lottery for Contract {}

    impl Contract {
        #[ink(constructor)]
        pub fn new() -> Self {
            let mut instance = Self::default();
            DrawRegistry::init_first_draw(&mut instance);
            instance
        }

        /// Off-chain decrypt path of the engine: denied without a live grant.
        pub fn decrypt(&self, value: EncryptedNumber, principal: AccountId) -> Option<u64> {
            let expires_at = self.cipher.grants.get((value.handle, principal))?;
            if self.env().block_timestamp() > expires_at {
                return None;
            }
            self.cipher.values.get(value.handle)
        }

        fn store_value(&mut self, plaintext: u64) -> CipherId {
            let handle = self.cipher.next_cipher_id;
            self.cipher.next_cipher_id += 1;
            self.cipher.values.insert(handle, &plaintext);
            handle
        }
    }

    impl CipherEngine for Contract {
        fn import_external(
            &mut self,
            ciphertext: &Ciphertext,
            proof: &CipherProof,
        ) -> Result<EncryptedNumber, LottoError> {
            use ink::env::hash;

            let mut expected = <hash::Blake2x256 as hash::HashOutput>::Type::default();
            ink::env::hash_bytes::<hash::Blake2x256>(ciphertext, &mut expected);
            if proof.as_slice() != expected.as_slice() {
                return Err(InvalidProof);
            }

            let bytes: [u8; 8] = ciphertext.as_slice().try_into().map_err(|_| InvalidProof)?;
            let plaintext = u64::from_le_bytes(bytes);
            // the range proof covers the playable domain
            if plaintext < MIN_NUMBER as u64 || plaintext > MAX_NUMBER as u64 {
                return Err(InvalidProof);
            }

            let handle = self.store_value(plaintext);
            Ok(EncryptedNumber { handle })
        }

        fn encrypt_plaintext(&mut self, value: u64) -> EncryptedNumber {
            let handle = self.store_value(value);
            EncryptedNumber { handle }
        }

        fn cipher_eq(&mut self, a: EncryptedNumber, b: EncryptedNumber) -> EncryptedBool {
            let a = self.cipher.values.get(a.handle).unwrap_or_default();
            let b = self.cipher.values.get(b.handle).unwrap_or_default();
            let handle = self.store_value(u64::from(a == b));
            EncryptedBool { handle }
        }

        fn cipher_select(
            &mut self,
            cond: EncryptedBool,
            if_true: EncryptedNumber,
            if_false: EncryptedNumber,
        ) -> EncryptedNumber {
            let cond = self.cipher.values.get(cond.handle).unwrap_or_default();
            let chosen = if cond != 0 { if_true } else { if_false };
            let plaintext = self.cipher.values.get(chosen.handle).unwrap_or_default();
            let handle = self.store_value(plaintext);
            EncryptedNumber { handle }
        }

        fn cipher_add(&mut self, a: EncryptedNumber, b: EncryptedNumber) -> EncryptedNumber {
            let a = self.cipher.values.get(a.handle).unwrap_or_default();
            let b = self.cipher.values.get(b.handle).unwrap_or_default();
            let handle = self.store_value(a.wrapping_add(b));
            EncryptedNumber { handle }
        }

        fn grant_decrypt(&mut self, value: EncryptedNumber, principal: AccountId) {
            let expires_at = self.env().block_timestamp() + GRANT_VALIDITY;
            self.cipher
                .grants
                .insert((value.handle, principal), &expires_at);
        }
    }
}
