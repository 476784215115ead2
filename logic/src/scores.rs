use crate::cipher::{CipherEngine, EncryptedBool, EncryptedNumber};
use crate::error::{LottoError, LottoError::*};
use ink::storage::Mapping;
use openbrush::traits::{AccountId, Storage};

#[derive(Default, Debug)]
#[openbrush::storage_item]
pub struct Data {
    scores: Mapping<AccountId, Score>,
}

/// Reward points accumulator of a player.
/// `Uninitialized` is distinguishable from an encrypted zero by external
/// readers but is logically zero; the first ticket purchase moves the score
/// to `Zero` and the first reward to `Value`.
#[derive(Default, Debug, Eq, PartialEq, Copy, Clone, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub enum Score {
    #[default]
    Uninitialized,
    Zero(EncryptedNumber),
    Value(EncryptedNumber),
}

impl Score {
    pub fn handle(&self) -> Option<EncryptedNumber> {
        match self {
            Score::Uninitialized => None,
            Score::Zero(value) | Score::Value(value) => Some(*value),
        }
    }
}

#[openbrush::trait_definition]
pub trait ScoreLedger: Storage<Data> + CipherEngine {
    /// Set the player's score to an encrypted zero on their first purchase.
    /// Already initialized scores only get their decrypt grant refreshed,
    /// grants are time-bounded and expire.
    fn ensure_score_initialized(&mut self, player: AccountId) {
        match self.data::<Data>().scores.get(player) {
            None | Some(Score::Uninitialized) => {
                let zero = self.encrypt_plaintext(0);
                self.data::<Data>().scores.insert(player, &Score::Zero(zero));
                self.grant_decrypt(zero, player);
            }
            Some(Score::Zero(value)) | Some(Score::Value(value)) => {
                self.grant_decrypt(value, player);
            }
        }
    }

    /// The only score mutator. Computes
    /// `select(is_winner, old + reward, old)` entirely in the encrypted
    /// domain; the contract never branches on the plaintext of `is_winner`.
    fn apply_conditional_reward(
        &mut self,
        player: AccountId,
        is_winner: EncryptedBool,
        reward: u64,
    ) -> Result<(), LottoError> {
        let old_score = self
            .data::<Data>()
            .scores
            .get(player)
            .and_then(|score| score.handle())
            .ok_or(ScoreNotInitialized)?;

        let reward = self.encrypt_plaintext(reward);
        let increased = self.cipher_add(old_score, reward);
        let new_score = self.cipher_select(is_winner, increased, old_score);

        self.data::<Data>()
            .scores
            .insert(player, &Score::Value(new_score));
        self.grant_decrypt(new_score, player);

        Ok(())
    }

    #[ink(message)]
    fn get_score(&self, player: AccountId) -> Score {
        self.data::<Data>().scores.get(player).unwrap_or_default()
    }
}
