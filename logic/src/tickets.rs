use crate::cipher::EncryptedNumber;
use crate::error::{LottoError, LottoError::*};
use crate::{DrawId, TicketIndex};
use ink::prelude::vec::Vec;
use ink::storage::Mapping;
use openbrush::traits::{AccountId, Storage};

#[derive(Default, Debug)]
#[openbrush::storage_item]
pub struct Data {
    tickets: Mapping<(AccountId, TicketIndex), Ticket>,
    nb_tickets: Mapping<AccountId, TicketIndex>,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Ticket {
    /// encrypted chosen number, opaque to everybody but the buyer
    pub number: EncryptedNumber,
    /// draw the ticket was purchased against, immutable
    pub draw_id: DrawId,
    pub claimed: bool,
}

#[openbrush::trait_definition]
pub trait TicketLedger: Storage<Data> {
    /// Append a new unclaimed ticket to the player's ledger and return its
    /// index (sequential from 0). The caller already checked the draw is
    /// still accepting tickets.
    fn append_ticket(
        &mut self,
        player: AccountId,
        number: EncryptedNumber,
        draw_id: DrawId,
    ) -> Result<TicketIndex, LottoError> {
        let index = self.data::<Data>().nb_tickets.get(player).unwrap_or(0);
        let next_count = index.checked_add(1).ok_or(AddOverFlow)?;

        self.data::<Data>().tickets.insert(
            (player, index),
            &Ticket {
                number,
                draw_id,
                claimed: false,
            },
        );
        self.data::<Data>().nb_tickets.insert(player, &next_count);

        Ok(index)
    }

    /// Flip the claimed flag, exactly once. A second attempt must fail,
    /// not silently succeed.
    fn mark_claimed(&mut self, player: AccountId, index: TicketIndex) -> Result<(), LottoError> {
        let mut ticket = self
            .data::<Data>()
            .tickets
            .get((player, index))
            .ok_or(InvalidIndex)?;
        if ticket.claimed {
            return Err(AlreadyClaimed);
        }
        ticket.claimed = true;
        self.data::<Data>().tickets.insert((player, index), &ticket);
        Ok(())
    }

    #[ink(message)]
    fn get_ticket(&self, player: AccountId, index: TicketIndex) -> Result<Ticket, LottoError> {
        self.data::<Data>()
            .tickets
            .get((player, index))
            .ok_or(InvalidIndex)
    }

    #[ink(message)]
    fn nb_tickets(&self, player: AccountId) -> TicketIndex {
        self.data::<Data>().nb_tickets.get(player).unwrap_or(0)
    }

    #[ink(message)]
    fn get_tickets(&self, player: AccountId) -> Vec<Ticket> {
        let count = self.nb_tickets(player);
        let mut tickets = Vec::new();
        for index in 0..count {
            if let Some(ticket) = self.data::<Data>().tickets.get((player, index)) {
                tickets.push(ticket);
            }
        }
        tickets
    }
}
