use crate::cipher::{CipherEngine, CipherProof, Ciphertext};
use crate::draws::DrawRegistry;
use crate::error::{LottoError, LottoError::*};
use crate::scores::ScoreLedger;
use crate::tickets::TicketLedger;
use crate::{DrawId, Number, Salt, TicketIndex};
use openbrush::traits::{AccountId, Balance, Timestamp};

/// Exact price of one ticket. A payment above or below is rejected.
pub const TICKET_PRICE: Balance = 1_000_000_000_000;

/// Points added to the player's score for a winning ticket.
pub const REWARD_POINTS: u64 = 10;

/// Orchestration of purchase, draw resolution and claim over the three
/// ledgers. Winner determination and score updates stay in the encrypted
/// domain end-to-end.
pub trait Lottery: DrawRegistry + TicketLedger + ScoreLedger + CipherEngine {
    /// Buy one ticket against the active draw.
    /// The buyer names the draw so that a purchase racing a resolution
    /// fails with `DrawClosed` instead of silently landing on the next draw.
    fn purchase(
        &mut self,
        player: AccountId,
        draw_id: DrawId,
        ciphertext: Ciphertext,
        proof: CipherProof,
        payment: Balance,
    ) -> Result<TicketIndex, LottoError> {
        if payment != TICKET_PRICE {
            return Err(InvalidPayment);
        }
        if draw_id != self.get_current_draw_id() {
            return Err(DrawClosed);
        }

        let number = self.import_external(&ciphertext, &proof)?;
        self.ensure_score_initialized(player);
        let index = self.append_ticket(player, number, draw_id)?;
        // only the buyer may read back the chosen number
        self.grant_decrypt(number, player);

        Ok(index)
    }

    /// Resolve the named draw with a publicly revealed winning number and
    /// open the next draw. Callable by anyone, effective once per draw.
    fn resolve_draw(
        &mut self,
        draw_id: DrawId,
        seed: Salt,
        now: Timestamp,
    ) -> Result<Number, LottoError> {
        self.resolve_active_draw(draw_id, seed, now)
    }

    /// Settle one ticket against its resolved draw. The equality test and
    /// the score update run on encrypted values; state changes are the same
    /// whether the ticket won or not.
    fn claim(&mut self, player: AccountId, index: TicketIndex) -> Result<DrawId, LottoError> {
        let ticket = self.get_ticket(player, index)?;
        if ticket.claimed {
            return Err(AlreadyClaimed);
        }

        let draw = self.get_draw(ticket.draw_id)?;
        if !draw.resolved {
            return Err(DrawNotResolved);
        }

        let winning_number = self.encrypt_plaintext(draw.winning_number as u64);
        let is_winner = self.cipher_eq(ticket.number, winning_number);
        self.apply_conditional_reward(player, is_winner, REWARD_POINTS)?;
        self.mark_claimed(player, index)?;

        Ok(ticket.draw_id)
    }
}
