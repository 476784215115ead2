use crate::error::{LottoError, LottoError::*};
use crate::{DrawId, Number, Salt};
use ink::storage::Mapping;
use openbrush::traits::{Storage, Timestamp};

/// Smallest number a ticket can bet on.
pub const MIN_NUMBER: Number = 1;
/// Biggest number a ticket can bet on.
pub const MAX_NUMBER: Number = 9;

#[derive(Default, Debug)]
#[openbrush::storage_item]
pub struct Data {
    current_draw_id: DrawId,
    draws: Mapping<DrawId, Draw>,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Draw {
    /// meaningless (0) until the draw is resolved
    pub winning_number: Number,
    pub resolved: bool,
    pub resolved_at: Timestamp,
}

#[derive(scale::Encode)]
struct DrawSeed {
    draw_id: DrawId,
    seed: Salt,
}

/// Fold the randomness seed into a winning number in `MIN_NUMBER..=MAX_NUMBER`.
/// Deterministic for a given (draw, seed) pair. The seed comes from recent
/// block metadata, so whoever controls block production can bias it; that
/// weakness is accepted for this low-stakes game.
pub fn draw_winning_number(draw_id: DrawId, seed: &Salt) -> Result<Number, LottoError> {
    use ink::env::hash;

    let encoded = scale::Encode::encode(&DrawSeed {
        draw_id,
        seed: seed.clone(),
    });
    let mut output = <hash::Blake2x256 as hash::HashOutput>::Type::default();
    ink::env::hash_bytes::<hash::Blake2x256>(&encoded, &mut output);

    // keep only 8 bytes to compute the random u64
    let mut arr = [0x00; 8];
    arr.copy_from_slice(&output[0..8]);
    let rand_u64 = u64::from_le_bytes(arr);

    let span = (MAX_NUMBER as u64)
        .checked_sub(MIN_NUMBER as u64)
        .ok_or(SubOverFlow)?
        .checked_add(1)
        .ok_or(AddOverFlow)?;
    let number = rand_u64
        .checked_rem_euclid(span)
        .ok_or(DivByZero)?
        .checked_add(MIN_NUMBER as u64)
        .ok_or(AddOverFlow)?;

    Ok(number as Number)
}

#[openbrush::trait_definition]
pub trait DrawRegistry: Storage<Data> {
    /// Create draw 1 as the active draw. Called once from the constructor;
    /// a second call is a no-op.
    fn init_first_draw(&mut self) {
        if self.data::<Data>().current_draw_id != 0 {
            return;
        }
        self.data::<Data>().current_draw_id = 1;
        self.data::<Data>().draws.insert(
            1,
            &Draw {
                winning_number: 0,
                resolved: false,
                resolved_at: 0,
            },
        );
    }

    /// Resolve the draw the caller names and open the next one.
    /// The draw id is explicit so that a stale resolution attempt fails
    /// instead of silently resolving a later draw.
    fn resolve_active_draw(
        &mut self,
        draw_id: DrawId,
        seed: Salt,
        now: Timestamp,
    ) -> Result<Number, LottoError> {
        let current = self.data::<Data>().current_draw_id;
        if draw_id > current {
            return Err(DrawNotFound);
        }
        if draw_id < current {
            return Err(AlreadyResolved);
        }

        let mut draw = self.data::<Data>().draws.get(draw_id).ok_or(DrawNotFound)?;
        if draw.resolved {
            return Err(AlreadyResolved);
        }

        let winning_number = draw_winning_number(draw_id, &seed)?;
        draw.winning_number = winning_number;
        draw.resolved = true;
        draw.resolved_at = now;
        self.data::<Data>().draws.insert(draw_id, &draw);

        // open the next draw
        let next_draw_id = current.checked_add(1).ok_or(AddOverFlow)?;
        self.data::<Data>().current_draw_id = next_draw_id;
        self.data::<Data>().draws.insert(
            next_draw_id,
            &Draw {
                winning_number: 0,
                resolved: false,
                resolved_at: 0,
            },
        );

        Ok(winning_number)
    }

    #[ink(message)]
    fn get_draw(&self, draw_id: DrawId) -> Result<Draw, LottoError> {
        self.data::<Data>().draws.get(draw_id).ok_or(DrawNotFound)
    }

    #[ink(message)]
    fn get_current_draw_id(&self) -> DrawId {
        self.data::<Data>().current_draw_id
    }
}
