#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub type DrawId = u32;
pub type Number = u8;
pub type TicketIndex = u32;
pub type CipherId = u64;
pub type Salt = ink::prelude::vec::Vec<u8>;

pub mod cipher;
pub mod draws;
pub mod error;
pub mod lottery;
pub mod scores;
pub mod tickets;

#[cfg(test)]
mod test_contract;
